//! Cross-script routing between Indic scripts.
//!
//! Strategies are tried in decreasing fidelity order: a direct pair table
//! when one exists, then bridging through Latin phonetics, then a coarse
//! per-character approximation. A strategy's output counts only if it is
//! non-degenerate; otherwise the next one runs. When everything fails the
//! original text is returned behind a visible marker rather than dropped.

use tracing::debug;

use crate::forward;
use crate::quality::Tier;
use crate::reverse;
use crate::tables::{self, MappingTable};
use crate::unicode::Script;

/// Prefix marking text every strategy failed to convert.
pub const FAILURE_PREFIX: &str = "\u{26a0} ";

pub struct RouteOutcome {
    pub text: String,
    pub tier: Tier,
}

/// Route `text` from `source` to `target` through the strategy chain.
pub fn route(text: &str, source: Script, target: Script) -> RouteOutcome {
    if source == target {
        return RouteOutcome {
            text: text.to_string(),
            tier: Tier::Passthrough,
        };
    }

    let strategies: [(Tier, &str, fn(&str, Script, Script) -> Option<String>); 3] = [
        (Tier::DirectHit, "direct-pair", direct_pair),
        (Tier::LatinBridge, "latin-bridge", latin_bridge),
        (Tier::CharFallback, "approximation", approximate),
    ];

    for (tier, name, strategy) in strategies {
        if let Some(out) = strategy(text, source, target) {
            if is_degenerate(&out, text) {
                debug!(strategy = name, "degenerate output, trying next strategy");
                continue;
            }
            debug!(strategy = name, %source, %target, "route succeeded");
            return RouteOutcome { text: out, tier };
        }
    }

    debug!(%source, %target, "all strategies exhausted");
    RouteOutcome {
        text: format!("{FAILURE_PREFIX}{text}"),
        tier: Tier::Failure,
    }
}

/// Output that is blank, unchanged, or an inner failure marker does not
/// count as a conversion.
fn is_degenerate(output: &str, input: &str) -> bool {
    output.trim().is_empty() || output == input || output.starts_with(FAILURE_PREFIX)
}

/// Dedicated source→target pair table, highest fidelity.
fn direct_pair(text: &str, source: Script, target: Script) -> Option<String> {
    let table = tables::direct(source, target)?;
    Some(map_units(text, table))
}

/// Convert to Latin phonetics, then forward into the target script.
///
/// Also the natural path when the target itself is Latin. Bridging is only
/// sound if the reverse step actually converted something: empty or
/// unchanged output skips the bridge entirely.
fn latin_bridge(text: &str, source: Script, target: Script) -> Option<String> {
    let latin = reverse::to_latin_text(text, source)?;
    if latin.trim().is_empty() || latin.trim() == text.trim() {
        return None;
    }
    if target == Script::Latin {
        return Some(latin);
    }
    Some(forward::transliterate(&latin, target))
}

/// Coarse per-character approximation table, last resort.
///
/// Approximation tables are keyed on Devanagari source characters only.
fn approximate(text: &str, source: Script, target: Script) -> Option<String> {
    if source != Script::Devanagari {
        return None;
    }
    let table = tables::approx(target)?;
    Some(map_units(text, table))
}

/// Greedy table walk keeping unmapped characters as-is.
fn map_units(text: &str, table: &MappingTable) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if let Some((dst, consumed)) = table.lookup_at(&chars, i) {
            out.push_str(dst);
            i += consumed;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}
