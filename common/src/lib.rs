//! Kisan Mitra Common Library
//!
//! Domain types, prompts and response validation shared by the service
//! clients and the CLI. No I/O happens in this crate.

pub mod types;
pub mod timestamp;
pub mod error;
pub mod prompts;
pub mod parser;
pub mod translation;
pub mod summary;
pub mod labels;

pub use types::{
    ChatMessage, DailyTip, Entity, HealthStatus, Language, ScanReport, Sender, TipCategory,
    TipPriority, Treatments,
};
pub use error::{Error, Result};
pub use prompts::{
    build_chat_prompt, build_diagnosis_prompt, build_translation_prompt, diagnosis_schema,
    translation_schema,
};
pub use parser::{extract_json, parse_diagnosis, parse_translated_fields};
pub use translation::{apply_translation, RequiredKeys, TranslatableFields, TranslatedFields};
pub use summary::{filter_tips_by_category, health_summary, CategoryFilter, HealthSummaryEntry};
pub use labels::{chat_fallback, chat_welcome, health_status_label, voice_summary};
