//! Entity types
//!
//! Shared between the HTTP clients and the CLI:
//! - ScanReport: one plant diagnosis (`PlantScan` entity)
//! - ChatMessage: one transcript entry (`ChatMessage` entity)
//! - DailyTip: one farming tip (`DailyTip` entity)

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An entity type stored in the remote entity store.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Path segment under `/entities/`
    const ENTITY_TYPE: &'static str;
}

/// Display language of user-facing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Bengali,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Bengali];

    /// Wire value (`english` / `hindi` / `bengali`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Bengali => "bengali",
        }
    }

    /// Name used inside LLM prompts
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Bengali => "Bengali",
        }
    }

    /// Name of the language written in itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी",
            Language::Bengali => "বাংলা",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "bengali" | "bn" => Ok(Language::Bengali),
            _ => Err(format!("Unknown language: {}. Use english, hindi, or bengali", s)),
        }
    }
}

/// Diagnosed plant health
///
/// Unrecognised wire values are kept verbatim so one odd record does not
/// break a whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Diseased,
    PestAffected,
    NutrientDeficient,
    Unknown(String),
}

impl HealthStatus {
    pub const KNOWN: [HealthStatus; 4] = [
        HealthStatus::Healthy,
        HealthStatus::Diseased,
        HealthStatus::PestAffected,
        HealthStatus::NutrientDeficient,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Diseased => "diseased",
            HealthStatus::PestAffected => "pest_affected",
            HealthStatus::NutrientDeficient => "nutrient_deficient",
            HealthStatus::Unknown(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, HealthStatus::Unknown(_))
    }

    /// Badge/chart color
    pub fn color(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "#22c55e",
            HealthStatus::Diseased => "#ef4444",
            HealthStatus::PestAffected => "#f97316",
            HealthStatus::NutrientDeficient => "#eab308",
            HealthStatus::Unknown(_) => "#6b7280",
        }
    }
}

impl From<String> for HealthStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "healthy" => HealthStatus::Healthy,
            "diseased" => HealthStatus::Diseased,
            "pest_affected" => HealthStatus::PestAffected,
            "nutrient_deficient" => HealthStatus::NutrientDeficient,
            _ => HealthStatus::Unknown(value),
        }
    }
}

impl From<HealthStatus> for String {
    fn from(value: HealthStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treatment recommendations, grouped by kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Treatments {
    pub organic: Vec<String>,
    pub chemical: Vec<String>,
    pub preventive: Vec<String>,
}

impl Treatments {
    pub fn is_empty(&self) -> bool {
        self.organic.is_empty() && self.chemical.is_empty() && self.preventive.is_empty()
    }
}

/// Scan report (`PlantScan` entity)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub image_url: String,

    pub plant_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    #[serde(default)]
    pub health_status: HealthStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_name: Option<String>,

    #[serde(default)]
    pub symptoms: Vec<String>,

    #[serde(default)]
    pub causes: Vec<String>,

    #[serde(default)]
    pub treatments: Treatments,

    #[serde(default)]
    pub growth_tips: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,

    #[serde(default)]
    pub language: Language,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::option"
    )]
    pub created_date: Option<DateTime<Utc>>,

    /// Translated health status text. Only set on a translated snapshot;
    /// `health_status` itself stays the enum.
    #[serde(skip)]
    pub health_status_label: Option<String>,
}

impl ScanReport {
    /// Confidence as a whole percentage, clamped to 0..=100
    pub fn confidence_percent(&self) -> Option<u8> {
        self.confidence_score
            .filter(|s| s.is_finite())
            .map(|s| (s.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

impl Entity for ScanReport {
    const ENTITY_TYPE: &'static str = "PlantScan";
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Chat transcript entry (`ChatMessage` entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub message: String,

    pub sender: Sender,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub session_id: String,

    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(message: impl Into<String>, sender: Sender, language: Language, session_id: &str) -> Self {
        Self {
            id: None,
            message: message.into(),
            sender,
            language,
            session_id: session_id.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl Entity for ChatMessage {
    const ENTITY_TYPE: &'static str = "ChatMessage";
}

/// Tip category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipCategory {
    DiseasePrevention,
    Fertilizer,
    Watering,
    PestControl,
    Seasonal,
    #[serde(other)]
    Other,
}

impl TipCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipCategory::DiseasePrevention => "disease_prevention",
            TipCategory::Fertilizer => "fertilizer",
            TipCategory::Watering => "watering",
            TipCategory::PestControl => "pest_control",
            TipCategory::Seasonal => "seasonal",
            TipCategory::Other => "other",
        }
    }
}

impl fmt::Display for TipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "disease_prevention" => Ok(TipCategory::DiseasePrevention),
            "fertilizer" => Ok(TipCategory::Fertilizer),
            "watering" => Ok(TipCategory::Watering),
            "pest_control" => Ok(TipCategory::PestControl),
            "seasonal" => Ok(TipCategory::Seasonal),
            _ => Err(format!(
                "Unknown category: {}. Use disease_prevention, fertilizer, watering, pest_control, or seasonal",
                s
            )),
        }
    }
}

/// Tip priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipPriority {
    Low,
    High,
    #[default]
    #[serde(other)]
    Medium,
}

/// Daily farming tip (`DailyTip` entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub content: String,

    pub category: TipCategory,

    #[serde(default)]
    pub priority: TipPriority,

    #[serde(default)]
    pub language: Language,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::option"
    )]
    pub created_date: Option<DateTime<Utc>>,
}

impl DailyTip {
    pub fn is_high_priority(&self) -> bool {
        self.priority == TipPriority::High
    }
}

impl Entity for DailyTip {
    const ENTITY_TYPE: &'static str = "DailyTip";
}
