use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodDetails {
    pub ingredients: Vec<String>,
    pub nutritional_summary: String,
    pub region: String,
    pub history: String,
}

/// Stage-1 output of the AnalyzeFood pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub is_food: bool,
    #[serde(default)]
    pub food_details: Option<FoodDetails>,
    #[serde(default)]
    pub alternative_suggestions: Vec<String>,
}

impl Classification {
    /// Clamps confidence into `[0, 1]`; non-finite values become 0.
    pub fn normalized(mut self) -> Self {
        self.confidence = if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Text for the allergen check, or `None` when the image is not food or
    /// carries no ingredient details.
    pub fn allergen_query_text(&self) -> Option<String> {
        if !self.is_food {
            return None;
        }
        self.food_details
            .as_ref()
            .map(|details| details.ingredients.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(is_food: bool, ingredients: Option<Vec<&str>>) -> Classification {
        Classification {
            label: "pancakes".to_string(),
            confidence: 0.9,
            is_food,
            food_details: ingredients.map(|items| FoodDetails {
                ingredients: items.into_iter().map(String::from).collect(),
                ..FoodDetails::default()
            }),
            alternative_suggestions: Vec::new(),
        }
    }

    #[test]
    fn ingredients_are_joined_for_the_check() {
        let c = classification(true, Some(vec!["milk", "sugar"]));
        assert_eq!(c.allergen_query_text().as_deref(), Some("milk, sugar"));
    }

    #[test]
    fn no_query_when_not_food_or_without_details() {
        assert!(classification(false, Some(vec!["milk"])).allergen_query_text().is_none());
        assert!(classification(true, None).allergen_query_text().is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        let mut c = classification(true, None);
        c.confidence = 1.7;
        assert_eq!(c.clone().normalized().confidence, 1.0);
        c.confidence = f32::NAN;
        assert_eq!(c.normalized().confidence, 0.0);
    }

    #[test]
    fn parses_wire_shape() {
        let json = r#"{
            "label": "ramen",
            "confidence": 0.82,
            "isFood": true,
            "foodDetails": {
                "ingredients": ["wheat noodles", "egg"],
                "nutritionalSummary": "high sodium",
                "region": "Japan",
                "history": "..."
            },
            "alternativeSuggestions": ["udon"]
        }"#;
        let c: Classification = serde_json::from_str(json).unwrap();
        assert!(c.is_food);
        assert_eq!(c.food_details.unwrap().region, "Japan");
        assert_eq!(c.alternative_suggestions, vec!["udon"]);
    }

    #[test]
    fn sparse_responses_parse() {
        let c: Classification = serde_json::from_str(r#"{"isFood":false}"#).unwrap();
        assert!(!c.is_food);
        assert!(c.label.is_empty());
        assert!(c.allergen_query_text().is_none());

        let c: Classification = serde_json::from_str(
            r#"{"isFood":true,"foodDetails":{"ingredients":["milk","sugar"]}}"#,
        )
        .unwrap();
        assert_eq!(c.allergen_query_text().as_deref(), Some("milk, sugar"));

        let c: Classification = serde_json::from_str("{}").unwrap();
        assert!(!c.is_food);
    }
}
