#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use prime_piles::wasm::WasmGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn new_game_starts_with_player_a_on_turn() {
    let game = WasmGame::new(5);
    let state = game.state().unwrap();

    assert_eq!(field(&state, "current_player").as_string().as_deref(), Some("A"));
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
    assert!(!game.is_over());
}

#[wasm_bindgen_test]
fn selection_is_rejected_for_missing_pile() {
    let mut game = WasmGame::new(5);

    assert!(!game.select_pile(3));
    assert!(game.select_pile(0));
}

#[wasm_bindgen_test]
fn from_config_rejects_duplicate_subtrahends() {
    let config = Object::new();
    let subtrahends = js_sys::Array::of2(&JsValue::from(2), &JsValue::from(2));
    Reflect::set(&config, &JsValue::from_str("subtrahends"), &subtrahends).unwrap();

    assert!(WasmGame::from_config(config.into(), 1).is_err());
}
