use crate::error::{KisanMitraError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const API_KEY_ENV: &str = "KISAN_MITRA_API_KEY";
const APP_ID_ENV: &str = "KISAN_MITRA_APP_ID";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub app_id: Option<String>,
    /// Entity store root; the app id is appended
    pub base_url: String,
    /// LLM invocation endpoint; derived from base_url/app_id when unset
    pub llm_url: Option<String>,
    /// Deadline for every external call
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            app_id: None,
            base_url: "https://app.base44.com/api/apps".into(),
            llm_url: None,
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| KisanMitraError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("kisan-mitra"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // environment wins over the config file
        resolve(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
            .ok_or(KisanMitraError::MissingApiKey)
    }

    pub fn get_app_id(&self) -> Result<String> {
        resolve(std::env::var(APP_ID_ENV).ok(), self.app_id.as_deref()).ok_or_else(|| {
            KisanMitraError::Config(
                "app id is not set. Run `kisan-mitra config --set-app-id APP_ID`".into(),
            )
        })
    }

    /// `{base_url}/{app_id}`
    pub fn app_url(&self) -> Result<String> {
        Ok(format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.get_app_id()?
        ))
    }

    pub fn llm_url(&self) -> Result<String> {
        match self.llm_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => Ok(url.to_string()),
            None => Ok(format!("{}/integrations/Core/InvokeLLM", self.app_url()?)),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn set_app_id(&mut self, app_id: String) -> Result<()> {
        self.app_id = Some(app_id);
        self.save()
    }
}

fn resolve(env_value: Option<String>, file_value: Option<&str>) -> Option<String> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file_value.filter(|v| !v.trim().is_empty()).map(str::to_string))
}
