use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Safe,
    Moderate,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }
}

/// Stage-2 output shared by both pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenCheck {
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub allergen_detected: bool,
    #[serde(default)]
    pub detected_allergens: Vec<String>,
}

/// Request body for the allergen check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenQuery {
    pub ingredients_text: String,
    pub allergens: Vec<String>,
}

/// Badge level for the current render; `None` means no check has completed or
/// none was warranted.
pub fn derive_risk(check: Option<&AllergenCheck>) -> RiskLevel {
    match check.map(|c| c.risk_level) {
        Some(RiskLevel::High) => RiskLevel::High,
        Some(RiskLevel::Moderate) => RiskLevel::Moderate,
        Some(RiskLevel::Safe) => RiskLevel::Safe,
        Some(RiskLevel::Unknown) | None => RiskLevel::Unknown,
    }
}
