//! User preferences
//!
//! One `PreferenceStore` is opened at startup and handed to the flows that
//! need it. Setters persist immediately and publish the new value on a
//! watch channel.

use crate::error::Result;
use kisan_mitra_common::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: Language,
    pub notifications_enabled: bool,
    pub auto_voice: bool,
}

pub struct PreferenceStore {
    path: PathBuf,
    sender: watch::Sender<Preferences>,
}

impl PreferenceStore {
    /// Missing or unreadable files yield the defaults
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = read_preferences(&path);
        let (sender, _) = watch::channel(prefs);
        Self { path, sender }
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(crate::config::Config::config_dir()?.join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Preferences {
        self.sender.borrow().clone()
    }

    pub fn language(&self) -> Language {
        self.sender.borrow().language
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.sender.subscribe()
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.update(|p| p.language = language)
    }

    pub fn set_notifications(&self, enabled: bool) -> Result<()> {
        self.update(|p| p.notifications_enabled = enabled)
    }

    pub fn set_auto_voice(&self, enabled: bool) -> Result<()> {
        self.update(|p| p.auto_voice = enabled)
    }

    fn update(&self, apply: impl FnOnce(&mut Preferences)) -> Result<()> {
        let mut prefs = self.current();
        apply(&mut prefs);
        write_preferences(&self.path, &prefs)?;
        tracing::debug!(?prefs, "preferences updated");
        self.sender.send_replace(prefs);
        Ok(())
    }
}

fn read_preferences(path: &Path) -> Preferences {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Preferences::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read preferences, using defaults");
            return Preferences::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "corrupt preferences, using defaults");
        Preferences::default()
    })
}

fn write_preferences(path: &Path, prefs: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(prefs)?)?;
    Ok(())
}
