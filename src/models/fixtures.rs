use serde_json::{json, Value};

use super::TradeResult;

/// A scoring response shaped like the endpoint's success body.
pub fn sample_result_json() -> Value {
    json!({
        "pokemon1": "Charmander",
        "pokemon2": "Ivysaur",
        "pokemon1_image": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/4.png",
        "pokemon2_image": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/2.png",
        "pokemon1_level": 30,
        "pokemon2_level": 25,
        "pokemon1_stage": 1,
        "pokemon2_stage": 2,
        "pokemon1_min_evo_level": 1,
        "pokemon2_min_evo_level": 16,
        "pokemon1_stats": {
            "hp": 39,
            "attack": 52,
            "defense": 43,
            "special-attack": 60,
            "special-defense": 50,
            "speed": 65
        },
        "pokemon2_stats": {
            "hp": 60,
            "attack": 62,
            "defense": 63,
            "special-attack": 80,
            "special-defense": 80,
            "speed": 60
        },
        "fairness_score": 0.83,
        "trade_status": "Fair Trade"
    })
}

pub fn sample_result() -> TradeResult {
    serde_json::from_value(sample_result_json()).expect("fixture matches TradeResult")
}
