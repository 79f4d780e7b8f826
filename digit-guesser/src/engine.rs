//! Bindings to the JS engine module.
//!
//! The page loads the engine before this module starts and exposes it as
//! `window.engine`. Every function may throw; the thrown value becomes the
//! message shown to the user.

use common::{Hyperparameters, ImageInput, ModelArtifact};
use js_sys::{Array, Float64Array};
use pipeline::{InferenceEngine, SampleProvider, TrainingEngine};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = engine)]
    fn query_neuralnetwork(network: &str, image: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = engine)]
    fn query_bundled(image: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = engine)]
    fn train_neuralnetwork(
        hidden_neurons: &str,
        training_rounds: &str,
        learning_rate: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = engine)]
    fn get_random_image() -> Result<JsValue, JsValue>;
}

/// Text of a thrown JS value: the message of an `Error`, the string itself,
/// or its debug form for anything else
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

fn scores_from_js(value: JsValue) -> Result<Vec<f64>, String> {
    if let Some(typed) = value.dyn_ref::<Float64Array>() {
        return Ok(typed.to_vec());
    }
    if Array::is_array(&value) {
        return Array::from(&value)
            .iter()
            .map(|score| {
                score
                    .as_f64()
                    .ok_or_else(|| format!("Engine returned a non-numeric score: {:?}", score))
            })
            .collect();
    }
    Err(format!("Engine returned {:?} instead of a list of scores", value))
}

fn text_from_js(value: JsValue, what: &str) -> Result<String, String> {
    value
        .as_string()
        .ok_or_else(|| format!("Engine returned {:?} instead of {}", value, what))
}

/// The engine living in `window.engine`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsEngine;

impl InferenceEngine for JsEngine {
    fn classify(
        &self,
        artifact: Option<&ModelArtifact>,
        image: &ImageInput,
    ) -> Result<Vec<f64>, String> {
        let scores = match artifact {
            Some(artifact) => query_neuralnetwork(artifact.as_str(), image.as_str()),
            None => query_bundled(image.as_str()),
        }
        .map_err(|e| js_error_message(&e))?;
        scores_from_js(scores)
    }
}

impl TrainingEngine for JsEngine {
    fn train(&self, hyperparameters: &Hyperparameters) -> Result<String, String> {
        let network = train_neuralnetwork(
            &hyperparameters.hidden_neurons,
            &hyperparameters.training_rounds,
            &hyperparameters.learning_rate,
        )
        .map_err(|e| js_error_message(&e))?;
        text_from_js(network, "a serialized network")
    }
}

impl SampleProvider for JsEngine {
    fn sample(&self) -> Result<String, String> {
        let markup = get_random_image().map_err(|e| js_error_message(&e))?;
        text_from_js(markup, "sample markup")
    }
}
