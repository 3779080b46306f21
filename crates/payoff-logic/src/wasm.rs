//! WASM bindings for frontend tournament analysis

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{Game, InteractionSet, TournamentResult};

/// Analyse a fixed-length tournament under the classic game
///
/// # Arguments
/// * `names_json` - JSON array of player display names, in index order
/// * `interactions_json` - JSON serialized InteractionSet
/// * `turns` - Shared trial length used for normalization
///
/// # Returns
/// JSON serialized TournamentResult
#[wasm_bindgen]
pub fn analyse_tournament(
    names_json: &str,
    interactions_json: &str,
    turns: u32,
) -> Result<JsValue, JsError> {
    let names: Vec<String> = serde_json::from_str(names_json)
        .map_err(|e| JsError::new(&format!("Invalid player names: {}", e)))?;
    let interactions: InteractionSet = serde_json::from_str(interactions_json)
        .map_err(|e| JsError::new(&format!("Invalid interactions: {}", e)))?;

    let result = TournamentResult::from_interactions(
        &names,
        &interactions,
        &Game::default(),
        turns as usize,
    )
    .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Analyse a variable-length tournament under the classic game
///
/// Every normalization divides by the round count each trial actually
/// recorded, so no shared turn count is taken.
#[wasm_bindgen]
pub fn analyse_tournament_diff_length(
    names_json: &str,
    interactions_json: &str,
) -> Result<JsValue, JsError> {
    let names: Vec<String> = serde_json::from_str(names_json)
        .map_err(|e| JsError::new(&format!("Invalid player names: {}", e)))?;
    let interactions: InteractionSet = serde_json::from_str(interactions_json)
        .map_err(|e| JsError::new(&format!("Invalid interactions: {}", e)))?;

    let result =
        TournamentResult::from_interactions_diff_length(&names, &interactions, &Game::default())
            .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get the classic game constants: (R, S, T, P) = (3, 0, 5, 1)
#[wasm_bindgen]
pub fn get_classic_game() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&Game::default())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
