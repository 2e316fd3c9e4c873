//! Browser-facing handle around [`GameSession`].
//!
//! JavaScript owns rendering and pointer hit-testing. It forwards clicks as
//! `selectPile`/`selectSubtrahend`, calls `step` once per frame and draws
//! from `state()`.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::{FirstLegalMove, GameSession};
use crate::piles::RandomPiles;

#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// Classic table seeded from `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        Self {
            session: GameSession::new_with_defaults(u64::from(seed)),
        }
    }

    /// Builds a session from a plain JS config object. Missing keys take defaults.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue, seed: u32) -> Result<WasmGame, JsValue> {
        let config: GameConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        let session = GameSession::new(
            &config,
            Box::new(RandomPiles::new(u64::from(seed))),
            Box::new(FirstLegalMove),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { session })
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = selectPile)]
    pub fn select_pile(&mut self, index: usize) -> bool {
        self.session.select_pile(index)
    }

    #[wasm_bindgen(js_name = selectSubtrahend)]
    pub fn select_subtrahend(&mut self, value: u32) -> bool {
        self.session.select_subtrahend(value)
    }

    /// Direct move for the human on turn. Refused on an automated turn.
    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, pile: usize, subtrahend: u32) -> bool {
        self.session.attempt_human_move(pile, subtrahend)
    }

    #[wasm_bindgen(js_name = commitSelection)]
    pub fn commit_selection(&mut self) -> bool {
        self.session.commit_selection()
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    /// Runs one update tick. A broken automated actor surfaces as a thrown error.
    pub fn step(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self
            .session
            .step()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&outcome)
            .map_err(|e| JsValue::from_str(&format!("step encode failed: {e}")))
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.state())
            .map_err(|e| JsValue::from_str(&format!("state encode failed: {e}")))
    }
}
