use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

/// Failures talking to browser APIs.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("element not found: {0}")]
    Missing(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Retrieve the document object for DOM interactions.
///
/// # Panics
/// Panics when the document cannot be accessed from the current browser window.
#[must_use]
pub fn document() -> Document {
    window()
        .document()
        .expect("`document` should exist in browser context")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Every element matching `selector`, in document order. An invalid selector
/// yields nothing.
#[must_use]
pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(list) = document().query_selector_all(selector) else {
        log::warn!("invalid selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First element matching `selector`, if any.
#[must_use]
pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

/// Element by id as an `HtmlElement`.
#[must_use]
pub fn html_by_id(id: &str) -> Option<HtmlElement> {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Set one inline style property, logging failures.
pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>()
        && let Err(err) = html.style().set_property(property, value)
    {
        log::warn!("style {property}: {}", js_error_message(&err));
    }
}

/// Add or remove `class` on `el`.
pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::warn!("class {class}: {}", js_error_message(&err));
    }
}

/// Append a fresh element to `<body>`.
///
/// # Errors
/// Returns an error if the element cannot be created or the body is missing.
pub fn append_to_body(tag: &str, class: &str) -> Result<Element, WebError> {
    let doc = document();
    let el = doc.create_element(tag)?;
    el.set_class_name(class);
    let body = doc
        .body()
        .ok_or_else(|| WebError::Missing("body".to_string()))?;
    body.append_child(&el)?;
    Ok(el)
}
