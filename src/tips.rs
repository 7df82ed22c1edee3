use crate::client::{with_deadline, EntityStore, ListQuery};
use crate::error::Result;
use kisan_mitra_common::{DailyTip, Language};
use std::time::Duration;

/// Tips written in `language`, newest first
pub async fn load_tips<S: EntityStore>(
    store: &S,
    language: Language,
    deadline: Duration,
) -> Result<Vec<DailyTip>> {
    let query = ListQuery::new()
        .filter("language", language.as_str())
        .sort("-created_date");
    let tips = with_deadline(deadline, store.list::<DailyTip>(&query)).await?;
    tracing::debug!(count = tips.len(), %language, "tips loaded");
    Ok(tips)
}
