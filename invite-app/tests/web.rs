//! Browser tests. Run with `wasm-pack test --headless --firefox invite-app`.

#![cfg(target_arch = "wasm32")]

use invite_app::InviteApp;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn missing_markup_is_reported() {
    let err = InviteApp::new(None).err().expect("blank page has no controls");
    let message = err.as_string().expect("string error");
    assert!(message.contains("Missing page element"), "{message}");
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected_before_binding() {
    let err = InviteApp::new(Some(r#"{"card_count": 0}"#.to_string()))
        .err()
        .expect("zero cards is invalid");
    let message = err.as_string().expect("string error");
    assert!(message.contains("card_count"), "{message}");
}
