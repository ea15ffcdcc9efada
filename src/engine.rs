//! Public conversion API.
//!
//! Thin dispatch over the forward, reverse, and routing layers: detect the
//! source script, pick the right engine for the source/target combination,
//! and attach a confidence score to the result.

use serde::Serialize;
use tracing::debug;

use crate::forward;
use crate::quality::{self, Tier};
use crate::reverse;
use crate::router;
use crate::unicode::{self, Script};

pub use crate::reverse::{PronunciationGuide, ToLatinResult};

/// A scored conversion outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub text: String,
    pub confidence: f32,
    pub source_script: Script,
}

/// Detect the dominant script of `text`.
pub fn detect_script(text: &str) -> Script {
    unicode::detect_script(text)
}

/// CSS class for rendering text in `script`.
pub fn script_css_class(script: Script) -> &'static str {
    script.css_class()
}

/// Transliterate Latin `text` into `target` (Latin → Indic direction).
pub fn transliterate(text: &str, target: Script) -> String {
    forward::transliterate(text, target)
}

/// Convert Indic `text` from `source` to `target` through the strategy
/// chain; same-script input passes through.
pub fn cross_script_transliterate(text: &str, source: Script, target: Script) -> String {
    router::route(text, source, target).text
}

/// Detect the script of `text` and convert it to Latin phonetic spelling.
pub fn to_latin(text: &str) -> ToLatinResult {
    reverse::to_latin(text)
}

/// Detect-and-convert entry point: route `text` into `target` whatever its
/// source script, with a confidence score.
pub fn convert(text: &str, target: Script) -> ConversionResult {
    let source = unicode::detect_script(text);

    let (out, tier) = if source == target {
        (text.to_string(), Tier::Passthrough)
    } else if matches!(source, Script::Latin | Script::Unknown) {
        let outcome = forward::transliterate_tiered(text, target);
        (outcome.text, outcome.tier)
    } else {
        let outcome = router::route(text, source, target);
        (outcome.text, outcome.tier)
    };

    let confidence = quality::score(tier, text, &out, source);
    debug!(%source, %target, tier = tier.name(), confidence, "convert");
    ConversionResult {
        text: out,
        confidence,
        source_script: source,
    }
}
