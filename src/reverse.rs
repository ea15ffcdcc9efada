//! Indic → Latin phonetic conversion.
//!
//! Same greedy longest-match discipline as the forward direction, over the
//! reverse tables: precomposed conjuncts are probed before single-character
//! decomposition, and virama-type marks map to the empty string (they
//! suppress the inherent vowel rather than contributing a sound).

use serde::Serialize;
use tracing::debug;

use crate::quality::{self, Tier};
use crate::tables::{self, MappingTable};
use crate::unicode::{self, Script};

/// Placeholder for unrecognized non-ASCII code points, so coverage gaps
/// stay visible instead of being silently dropped.
const UNKNOWN_MARK: char = '?';

#[derive(Debug, Clone, Serialize)]
pub struct ToLatinResult {
    pub result: String,
    pub detected_script: Script,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PronunciationGuide {
    pub original: String,
    pub phonetic: String,
    pub script: Script,
    pub syllables: Vec<String>,
}

/// Convert `text` from `source` into Latin phonetic spelling.
///
/// Returns `None` when no reverse table exists for `source` (Latin or
/// Unknown input). Output is whitespace-normalized and lowercased.
pub fn to_latin_text(text: &str, source: Script) -> Option<String> {
    let table = tables::reverse(source)?;

    // Whole-phrase shortcut (some dictionary entries span spaces).
    let trimmed = text.trim();
    if let Some(hit) = table.word(trimmed) {
        return Some(hit.to_string());
    }

    let words: Vec<String> = trimmed
        .split_whitespace()
        .map(|w| reverse_word(w, table))
        .collect();
    Some(words.join(" ").trim().to_lowercase())
}

fn reverse_word(word: &str, table: &MappingTable) -> String {
    if let Some(hit) = table.word(word) {
        return hit.to_string();
    }
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());
    let mut i = 0;
    while i < chars.len() {
        if let Some((dst, consumed)) = table.lookup_at(&chars, i) {
            out.push_str(dst);
            i += consumed;
        } else {
            let c = chars[i];
            if c.is_ascii() {
                out.push(c);
            } else {
                out.push(UNKNOWN_MARK);
            }
            i += 1;
        }
    }
    out
}

/// Universal reverse transliteration: detect the script, convert, score.
///
/// Latin input passes through at the passthrough tier; input with no
/// detectable script comes back unchanged at the failure tier. The result
/// falls back to the original text rather than ever being blank.
pub fn to_latin(text: &str) -> ToLatinResult {
    let detected = unicode::detect_script(text);
    let (result, tier) = match detected {
        Script::Latin => (text.to_string(), Tier::Passthrough),
        Script::Unknown => (text.to_string(), Tier::Failure),
        script => match to_latin_text(text, script) {
            Some(out) if !out.trim().is_empty() => (out, Tier::DirectHit),
            _ => (text.to_string(), Tier::Failure),
        },
    };
    debug!(script = %detected, tier = tier.name(), "reverse transliteration");
    let confidence = quality::score(tier, text, &result, detected);
    ToLatinResult {
        result,
        detected_script: detected,
        confidence,
    }
}

/// Phonetic spelling plus a rough syllable split for pronunciation help.
pub fn pronunciation_guide(text: &str) -> PronunciationGuide {
    let converted = to_latin(text);
    let syllables = break_into_syllables(&converted.result);
    PronunciationGuide {
        original: text.to_string(),
        phonetic: converted.result,
        script: converted.detected_script,
        syllables,
    }
}

/// Insert a break between vowel-consonant-vowel runs, then split.
fn break_into_syllables(phonetic: &str) -> Vec<String> {
    use std::sync::OnceLock;

    use regex::Regex;

    static VCV: OnceLock<Regex> = OnceLock::new();
    let vcv = VCV.get_or_init(|| {
        Regex::new("([aeiou])([bcdfghjklmnpqrstvwxyz]+)([aeiou])")
            .expect("syllable pattern must be valid")
    });
    vcv.replace_all(phonetic, "$1$2-$3")
        .split(['-', ' '])
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
