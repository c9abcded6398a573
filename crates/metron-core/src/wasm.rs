//! WebAssembly bindings for metron-core
//!
//! Measures cross the boundary as serialised JSON blobs. Enable the "wasm"
//! feature to use these bindings.

#![cfg(feature = "wasm")]

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::{
    AutoCompleter, FormatOptions, Measure, MeasureAlias, Prefix, PrefixMask, ScoringConfig,
    SerialisedMeasure, StringFormatter,
};

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Corpus handed over from JavaScript
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorpusJson {
    measures: Vec<SerialisedMeasure<f64>>,
    #[serde(default)]
    prefixes: Vec<PrefixJson>,
    #[serde(default)]
    aliases: Vec<AliasJson>,
    #[serde(default)]
    scoring: ScoringConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrefixJson {
    name: String,
    symbol: String,
    multiplier: f64,
    #[serde(default)]
    type_flags: Vec<String>,
}

#[derive(Deserialize)]
struct AliasJson {
    measure: SerialisedMeasure<f64>,
    text: Vec<String>,
}

#[derive(Serialize)]
struct CompletionJson {
    symbol: String,
    name: String,
    score: f64,
    measure: SerialisedMeasure<f64>,
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// WASM-compatible wrapper for the autocompleter
#[wasm_bindgen]
pub struct WasmAutoCompleter {
    completer: AutoCompleter<f64>,
}

#[wasm_bindgen]
impl WasmAutoCompleter {
    /// Build from a corpus JSON object:
    /// `{"measures": [...], "prefixes": [...], "aliases": [...], "scoring": {...}}`
    #[wasm_bindgen(constructor)]
    pub fn new(corpus_json: &str) -> Result<WasmAutoCompleter, JsError> {
        let corpus: CorpusJson = serde_json::from_str(corpus_json).map_err(js_error)?;

        let measures = corpus
            .measures
            .iter()
            .map(Measure::deserialise)
            .collect::<crate::Result<Vec<_>>>()
            .map_err(js_error)?;
        let prefixes = corpus
            .prefixes
            .into_iter()
            .map(|p| Prefix::new(p.name, p.symbol, p.multiplier, PrefixMask::new(p.type_flags)))
            .collect();
        let aliases = corpus
            .aliases
            .iter()
            .map(|a| Ok(MeasureAlias::new(Measure::deserialise(&a.measure)?, a.text.clone())))
            .collect::<crate::Result<Vec<_>>>()
            .map_err(js_error)?;

        Ok(Self {
            completer: AutoCompleter::with_config(measures, prefixes, aliases, corpus.scoring),
        })
    }

    /// Complete a query, returning a JSON array ranked best first
    #[wasm_bindgen]
    pub fn complete(&self, query: &str) -> String {
        let symbols = StringFormatter::symbols();
        let names = StringFormatter::names();

        let results: Vec<CompletionJson> = self
            .completer
            .complete(query)
            .into_iter()
            .map(|c| CompletionJson {
                symbol: c.measure.format(false, &symbols),
                name: c.measure.format(true, &names),
                score: c.score,
                measure: c.measure.serialise(),
            })
            .collect();

        serde_json::to_string(&results).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Format a serialised measure with JSON format options (`{}` for defaults)
#[wasm_bindgen]
pub fn format_measure(measure_json: &str, plural: bool, options_json: &str) -> Result<String, JsError> {
    let measure: Measure = Measure::from_json(measure_json).map_err(js_error)?;
    let options: FormatOptions = serde_json::from_str(options_json).map_err(js_error)?;
    Ok(measure.format(plural, &StringFormatter::new(options)))
}

/// Convert a value between two serialised measures
#[wasm_bindgen]
pub fn convert(value: f64, from_json: &str, to_json: &str) -> Result<f64, JsError> {
    let from: Measure = Measure::from_json(from_json).map_err(js_error)?;
    let to: Measure = Measure::from_json(to_json).map_err(js_error)?;
    let converter = from.create_converter_to(&to).map_err(js_error)?;
    Ok(converter.convert(&value))
}
