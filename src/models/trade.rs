use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{deserialize_optional_level, deserialize_ordered_stats};

/// Level bounds shown as input hints; not enforced before sending.
pub const LEVEL_MIN: u32 = 1;
pub const LEVEL_MAX: u32 = 100;

/// The status string the scoring endpoint uses for an acceptable trade.
pub const FAIR_TRADE: &str = "Fair Trade";

// Two (name, level) pairs collected from the form
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct TradeInput {
    #[validate(length(min = 1, message = "Please enter both Pokémon names."))]
    pub name1: String,
    #[validate(length(min = 1, message = "Please enter both Pokémon names."))]
    pub name2: String,
    pub level1: u32,
    pub level2: u32,
}

/// Query parameters sent to the scoring endpoint.
#[derive(Debug, Serialize)]
pub struct TradeQuery<'a> {
    pub pokemon1: &'a str,
    pub pokemon2: &'a str,
    pub level1: u32,
    pub level2: u32,
}

impl<'a> From<&'a TradeInput> for TradeQuery<'a> {
    fn from(input: &'a TradeInput) -> Self {
        Self {
            pokemon1: &input.name1,
            pokemon2: &input.name2,
            level1: input.level1,
            level2: input.level2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeResult {
    pub pokemon1: String,
    pub pokemon2: String,
    #[serde(default)]
    pub pokemon1_image: Option<String>,
    #[serde(default)]
    pub pokemon2_image: Option<String>,
    pub pokemon1_level: u32,
    pub pokemon2_level: u32,
    pub pokemon1_stage: u32,
    pub pokemon2_stage: u32,
    #[serde(default, deserialize_with = "deserialize_optional_level")]
    pub pokemon1_min_evo_level: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_level")]
    pub pokemon2_min_evo_level: Option<u32>,
    #[serde(deserialize_with = "deserialize_ordered_stats")]
    pub pokemon1_stats: Vec<Stat>,
    #[serde(deserialize_with = "deserialize_ordered_stats")]
    pub pokemon2_stats: Vec<Stat>,
    pub fairness_score: f64,
    pub trade_status: String,
}

/// One side of a trade result, borrowed for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureCard<'a> {
    pub name: &'a str,
    pub image: Option<&'a str>,
    pub level: u32,
    pub stage: u32,
    pub min_evo_level: Option<u32>,
    pub stats: &'a [Stat],
}

impl TradeResult {
    pub fn cards(&self) -> [CreatureCard<'_>; 2] {
        [
            CreatureCard {
                name: &self.pokemon1,
                image: self.pokemon1_image.as_deref(),
                level: self.pokemon1_level,
                stage: self.pokemon1_stage,
                min_evo_level: self.pokemon1_min_evo_level,
                stats: &self.pokemon1_stats,
            },
            CreatureCard {
                name: &self.pokemon2,
                image: self.pokemon2_image.as_deref(),
                level: self.pokemon2_level,
                stage: self.pokemon2_stage,
                min_evo_level: self.pokemon2_min_evo_level,
                stats: &self.pokemon2_stats,
            },
        ]
    }

    // Exact, case-sensitive match
    pub fn is_fair(&self) -> bool {
        self.trade_status == FAIR_TRADE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_result_json;
    use serde_json::json;

    #[test]
    fn test_result_keeps_server_stat_order() {
        let result: TradeResult = serde_json::from_value(sample_result_json()).unwrap();
        let names: Vec<&str> = result
            .pokemon1_stats
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["hp", "attack", "defense", "special-attack", "special-defense", "speed"]
        );
    }

    #[test]
    fn test_result_from_text_keeps_order_and_accepts_floats() {
        let body = r#"{
            "pokemon1": "Ivysaur", "pokemon2": "Pikachu",
            "pokemon1_image": null, "pokemon2_image": "https://img/25.png",
            "pokemon1_level": 20, "pokemon2_level": 20,
            "pokemon1_stage": 2, "pokemon2_stage": 1,
            "pokemon1_min_evo_level": 16.0,
            "pokemon1_stats": {"speed": 60, "hp": 55.6},
            "pokemon2_stats": {},
            "fairness_score": 0.75,
            "trade_status": "Unfair Trade"
        }"#;
        let result: TradeResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.pokemon1_min_evo_level, Some(16));
        assert_eq!(result.pokemon2_min_evo_level, None);
        assert_eq!(result.pokemon1_image, None);
        assert_eq!(
            result.pokemon1_stats,
            vec![
                Stat { name: "speed".to_string(), value: 60.0 },
                Stat { name: "hp".to_string(), value: 55.6 },
            ]
        );
        assert!(!result.is_fair());
    }

    #[test]
    fn test_null_min_evo_level_is_none() {
        let mut body = sample_result_json();
        body["pokemon2_min_evo_level"] = json!(null);
        let result: TradeResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.pokemon2_min_evo_level, None);
    }

    #[test]
    fn test_fractional_min_evo_level_is_rejected() {
        let mut body = sample_result_json();
        body["pokemon1_min_evo_level"] = json!(16.5);
        assert!(serde_json::from_value::<TradeResult>(body).is_err());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut body = sample_result_json();
        body.as_object_mut().unwrap().remove("trade_status");
        assert!(serde_json::from_value::<TradeResult>(body).is_err());
    }

    #[test]
    fn test_is_fair_is_case_sensitive() {
        let mut result: TradeResult = serde_json::from_value(sample_result_json()).unwrap();
        assert!(result.is_fair());
        result.trade_status = "fair trade".to_string();
        assert!(!result.is_fair());
    }

    #[test]
    fn test_cards_project_each_side() {
        let result: TradeResult = serde_json::from_value(sample_result_json()).unwrap();
        let [left, right] = result.cards();
        assert_eq!(left.name, "Charmander");
        assert_eq!(left.stage, 1);
        assert_eq!(right.name, "Ivysaur");
        assert_eq!(right.min_evo_level, Some(16));
        assert_eq!(right.stats.len(), 6);
    }

    #[test]
    fn test_input_requires_both_names() {
        let input = TradeInput {
            name1: "pikachu".to_string(),
            name2: String::new(),
            level1: 5,
            level2: 5,
        };
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name2"));
        assert!(!err.field_errors().contains_key("name1"));
    }

    #[test]
    fn test_input_levels_are_not_validated() {
        let input = TradeInput {
            name1: "pikachu".to_string(),
            name2: "eevee".to_string(),
            level1: 0,
            level2: 150,
        };
        assert!(input.validate().is_ok());
    }
}
