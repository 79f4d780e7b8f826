//! Handwritten digit guesser
//!
//! WASM front end: draw a digit or pick a sample, upload a trained network
//! (or train one), and see the engine's per-digit confidence.

mod browser;
mod dom;
mod engine;
mod logger;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Set up panic hook for better error messages in WASM
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logger::init(log::LevelFilter::Info);
    browser::init()
}
