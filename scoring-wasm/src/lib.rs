/*!
WebAssembly bindings for the handwriting scoring engine.

This is a thin request/response shim: it decodes the `JsValue`/`&[u8]`
arguments JavaScript hands it, calls into [`scoring_core`], and encodes
the result back into a `JsValue` for the caller. It holds no state
between calls, same as the library underneath it.
*/

use serde_derive::Serialize;
use wasm_bindgen::prelude::*;

/// Install a panic hook that forwards Rust panics to the browser
/// console, and initialize console-backed logging. Call once from
/// JavaScript before using anything else in this module.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Warn);
}

/// Mirrors [`scoring_core::ScoreResult`], but as an owned, serializable
/// struct so it can cross the wasm boundary as a plain JS object.
#[derive(Serialize)]
struct JsScoreResult {
    score: u8,
    stars: u8,
    feedback: &'static str,
    coverage: u8,
    accuracy: u8,
    similarity: u8,
    reference_image: Vec<u8>,
}

impl From<scoring_core::ScoreResult> for JsScoreResult {
    fn from(r: scoring_core::ScoreResult) -> Self {
        JsScoreResult {
            score: r.score,
            stars: r.stars,
            feedback: r.feedback,
            coverage: r.coverage,
            accuracy: r.accuracy,
            similarity: r.similarity,
            reference_image: r.reference_image,
        }
    }
}

/// Score `image_png` (a drawing, PNG-encoded) against the glyph
/// `font_bytes` renders for `character`.
///
/// Returns a JS object with `score`, `stars`, `feedback`, `coverage`,
/// `accuracy`, `similarity`, and `reference_image` (a `Uint8Array`-
/// compatible byte array) fields, or rejects with a string describing
/// the failure.
#[wasm_bindgen]
pub fn score(image_png: &[u8], character: char, font_bytes: &[u8]) -> Result<JsValue, JsValue> {
    let result = scoring_core::score(image_png, character, font_bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&JsScoreResult::from(result))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the glyph `font_bytes` draws for `character`, alone, as PNG
/// bytes of `size` by `size` pixels.
#[wasm_bindgen(js_name = renderReference)]
pub fn render_reference(character: char, font_bytes: &[u8], size: u32) -> Result<Vec<u8>, JsValue> {
    scoring_core::render_reference(character, font_bytes, size)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
