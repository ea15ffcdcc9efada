//! Confidence scoring for conversion outcomes.
//!
//! Confidence is a discrete tier marker derived from which fallback tier
//! produced the result, not a statistical probability. The constants here
//! are configuration values tuned against the fallback chain.

use crate::unicode::{script_of_char, Script};

/// Which tier of the fallback chain produced a result.
///
/// Variants are ordered by ascending fidelity so `min` across a multi-word
/// conversion yields the weakest tier used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Every tier exhausted; output is a marked failure string.
    Failure,
    /// Per-character approximation map, lowest-fidelity conversion.
    CharFallback,
    /// Cross-script conversion bridged through Latin phonetics.
    LatinBridge,
    /// Whole-word or greedy table hit.
    DirectHit,
    /// Source already matched the target script.
    Passthrough,
}

impl Tier {
    /// Fixed base confidence for this tier.
    pub const fn confidence(self) -> f32 {
        match self {
            Tier::Passthrough => 0.95,
            Tier::DirectHit => 0.8,
            Tier::LatinBridge => 0.7,
            Tier::CharFallback => 0.3,
            Tier::Failure => 0.1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Passthrough => "passthrough",
            Tier::DirectHit => "direct",
            Tier::LatinBridge => "latin-bridge",
            Tier::CharFallback => "char-fallback",
            Tier::Failure => "failure",
        }
    }
}

/// Subtracted when the output is suspiciously short relative to the input.
const SHORT_OUTPUT_PENALTY: f32 = 0.2;
/// Subtracted when the output still contains source-script code points.
const RESIDUE_PENALTY: f32 = 0.1;

/// Score a conversion outcome.
///
/// Starts from the tier's fixed confidence and penalizes degenerate signals:
/// an output under a third of the input length, and incomplete conversion
/// (source-script code points remaining in the output). Floored at 0.
/// Passthrough is not a conversion, so no penalty applies to it.
pub fn score(tier: Tier, input: &str, output: &str, source: Script) -> f32 {
    let base = tier.confidence();
    if tier == Tier::Passthrough {
        return base;
    }

    let mut score = base;
    let in_len = input.chars().count();
    let out_len = output.chars().count();
    if out_len * 3 < in_len {
        score -= SHORT_OUTPUT_PENALTY;
    }
    if output.chars().any(|c| script_of_char(c) == Some(source)) {
        score -= RESIDUE_PENALTY;
    }
    score.max(0.0)
}
