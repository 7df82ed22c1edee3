//! Localized strings produced by the flows themselves
//!
//! Only text that the library emits (status labels, chat welcome/fallback,
//! the spoken report summary). Page copy is not kept here.

use crate::types::{HealthStatus, Language, ScanReport};

/// Health status label in `language`
pub fn health_status_label(status: &HealthStatus, language: Language) -> String {
    let label = match (status, language) {
        (HealthStatus::Healthy, Language::English) => "Healthy",
        (HealthStatus::Healthy, Language::Hindi) => "स्वस्थ",
        (HealthStatus::Healthy, Language::Bengali) => "সুস্থ",
        (HealthStatus::Diseased, Language::English) => "Diseased",
        (HealthStatus::Diseased, Language::Hindi) => "रोगग्रस्त",
        (HealthStatus::Diseased, Language::Bengali) => "রোগাক্রান্ত",
        (HealthStatus::PestAffected, Language::English) => "Pest Affected",
        (HealthStatus::PestAffected, Language::Hindi) => "कीट प्रभावित",
        (HealthStatus::PestAffected, Language::Bengali) => "পোকায় আক্রান্ত",
        (HealthStatus::NutrientDeficient, Language::English) => "Nutrient Deficient",
        (HealthStatus::NutrientDeficient, Language::Hindi) => "पोषक तत्व की कमी",
        (HealthStatus::NutrientDeficient, Language::Bengali) => "পুষ্টির অভাব",
        (HealthStatus::Unknown(raw), _) => return raw.clone(),
    };
    label.to_string()
}

/// Greeting shown when a chat session has no history
pub fn chat_welcome(language: Language) -> &'static str {
    match language {
        Language::English => "Hello! I'm your AI farming assistant. Ask me anything about crops, diseases, fertilizers, pest control, or any farming techniques. How can I help you today?",
        Language::Hindi => "नमस्ते! मैं आपका AI कृषि सहायक हूँ। फसल, रोग, उर्वरक, कीट नियंत्रण या किसी भी कृषि तकनीक के बारे में मुझसे कुछ भी पूछें। आज मैं आपकी कैसे मदद कर सकता हूँ?",
        Language::Bengali => "নমস্কার! আমি আপনার AI কৃষি সহায়ক। ফসল, রোগ, সার, পোকা নিয়ন্ত্রণ বা যেকোনো কৃষি কৌশল সম্পর্কে আমাকে যেকোনো কিছু জিজ্ঞাসা করুন। আজ আমি আপনাকে কীভাবে সাহায্য করতে পারি?",
    }
}

/// Transcript entry inserted when the assistant could not answer
pub fn chat_fallback(language: Language) -> &'static str {
    match language {
        Language::English => "Sorry, something went wrong. Please try again.",
        Language::Hindi => "क्षमा करें, कुछ गलत हुआ। कृपया पुनः प्रयास करें।",
        Language::Bengali => "দুঃখিত, কিছু ভুল হয়েছে। অনুগ্রহ করে আবার চেষ্টা করুন।",
    }
}

struct SummaryHeadings {
    plant_info: &'static str,
    health_status: &'static str,
    disease: &'static str,
    symptoms: &'static str,
}

fn summary_headings(language: Language) -> SummaryHeadings {
    match language {
        Language::English => SummaryHeadings {
            plant_info: "Plant Information",
            health_status: "Health Status",
            disease: "Disease Detected",
            symptoms: "Symptoms",
        },
        Language::Hindi => SummaryHeadings {
            plant_info: "पौधे की जानकारी",
            health_status: "स्वास्थ्य स्थिति",
            disease: "रोग की पहचान",
            symptoms: "लक्षण",
        },
        Language::Bengali => SummaryHeadings {
            plant_info: "উদ্ভিদের তথ্য",
            health_status: "স্বাস্থ্যের অবস্থা",
            disease: "রোগ সনাক্তকরণ",
            symptoms: "লক্ষণসমূহ",
        },
    }
}

/// Plain-text summary for reading a report aloud, in the report's language
pub fn voice_summary(report: &ScanReport) -> String {
    let h = summary_headings(report.language);
    let mut text = format!("{}: {}. ", h.plant_info, report.plant_name);

    if let Some(name) = report.scientific_name.as_deref().filter(|s| !s.is_empty()) {
        text.push_str(&format!("{}. ", name));
    }

    let status = report
        .health_status_label
        .clone()
        .unwrap_or_else(|| health_status_label(&report.health_status, report.language));
    text.push_str(&format!("{}: {}. ", h.health_status, status));

    if let Some(disease) = report.disease_name.as_deref().filter(|s| !s.is_empty()) {
        text.push_str(&format!("{}: {}. ", h.disease, disease));
    }

    if !report.symptoms.is_empty() {
        text.push_str(&format!("{}: {}. ", h.symptoms, report.symptoms.join(", ")));
    }

    text.trim_end().to_string()
}
