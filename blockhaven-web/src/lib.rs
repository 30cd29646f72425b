#![forbid(unsafe_code)]
//! Browser glue for the Blockhaven site: binds DOM events to the
//! `blockhaven-site` controller and applies the effects it returns.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod apply;
pub mod dom;
pub mod format;
pub mod legacy;
pub mod listeners;
pub mod markup;
pub mod runtime;
pub mod scheduler;
pub mod settings;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A logger may already be installed by a host page; keep going either way.
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(err) = runtime::start_site() {
        dom::console_error(&format!("Blockhaven failed to start: {err}"));
    }
}
