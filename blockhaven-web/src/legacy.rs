//! Functions exported for inline `onclick` attributes in the page markup.
use blockhaven_site::numbers::price_from_f64;
use blockhaven_site::{PasswordField, UiEvent};
use wasm_bindgen::prelude::*;

use crate::runtime::dispatch;

#[wasm_bindgen(js_name = buyProduct)]
pub fn buy_product(name: String, price: f64) {
    match price_from_f64(price) {
        Some(unit_price) => dispatch(UiEvent::AddToCart { name, unit_price }),
        None => log::warn!("buyProduct({name}): invalid price {price}"),
    }
}

#[wasm_bindgen(js_name = removeFromCart)]
pub fn remove_from_cart(name: String) {
    dispatch(UiEvent::RemoveFromCart { name });
}

#[wasm_bindgen]
pub fn checkout() {
    dispatch(UiEvent::CheckoutClicked);
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() {
    dispatch(UiEvent::CartClosed);
}

#[wasm_bindgen(js_name = copyIP)]
pub fn copy_ip() {
    dispatch(UiEvent::CopyAddressClicked);
}

#[wasm_bindgen(js_name = togglePassword)]
pub fn toggle_password() {
    dispatch(UiEvent::PasswordToggled(PasswordField::Password));
}

#[wasm_bindgen(js_name = toggleConfirmPassword)]
pub fn toggle_confirm_password() {
    dispatch(UiEvent::PasswordToggled(PasswordField::ConfirmPassword));
}
