//! Latin → Indic forward transliteration.
//!
//! Conversion never fails: each word degrades through a fixed tier chain
//! (whole-word table, morphological variants, greedy longest-match walk,
//! single-character fallback, keep-the-original-character), and a final
//! check guarantees non-blank output for non-blank input.

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::quality::Tier;
use crate::rewrite;
use crate::tables::{self, MappingTable};
use crate::unicode::Script;

/// Fixed abbreviation expansions applied during preprocessing.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("st.", "street"),
    ("rd.", "road"),
    ("dr.", "doctor"),
    ("mr.", "mister"),
];

pub struct ForwardOutcome {
    pub text: String,
    /// Weakest tier used across the input's words.
    pub tier: Tier,
}

/// Transliterate Latin `text` into `target`.
///
/// A target without a forward table (Latin, Unknown) returns the input
/// unchanged. Output is never blank for non-blank input.
pub fn transliterate(text: &str, target: Script) -> String {
    transliterate_tiered(text, target).text
}

/// As [`transliterate`], also reporting which fallback tier the result
/// came from.
pub fn transliterate_tiered(text: &str, target: Script) -> ForwardOutcome {
    let Some(table) = tables::forward(target) else {
        return ForwardOutcome {
            text: text.to_string(),
            tier: Tier::Passthrough,
        };
    };

    let prepared = preprocess(text);
    if prepared.is_empty() {
        // Blank input; nothing to guarantee.
        return ForwardOutcome {
            text: text.to_string(),
            tier: Tier::Failure,
        };
    }

    // Whole-phrase shortcut before any rewriting can disturb it.
    if let Some(hit) = table.word(&prepared) {
        debug!(target = %target, tier = "word", "whole-phrase hit");
        return ForwardOutcome {
            text: hit.to_string(),
            tier: Tier::DirectHit,
        };
    }

    let rewritten = if target == Script::Devanagari {
        rewrite::apply(&prepared)
    } else {
        prepared
    };

    let mut weakest = Tier::Passthrough;
    let mut out_words = Vec::new();
    for word in rewritten.split_whitespace() {
        let (converted, tier) = transliterate_word(word, table);
        weakest = weakest.min(tier);
        out_words.push(converted);
    }
    let out = out_words.join(" ");

    // Never-blank guarantee: if every tier produced emptiness, hand back
    // the original input instead.
    if out.trim().is_empty() {
        debug!(target = %target, "all tiers produced blank output, keeping input");
        return ForwardOutcome {
            text: text.to_string(),
            tier: Tier::Failure,
        };
    }

    debug!(target = %target, tier = weakest.name());
    ForwardOutcome { text: out, tier: weakest }
}

/// Compose to NFC, trim, collapse whitespace, lowercase, expand fixed
/// abbreviations. Composition keeps combining marks from walking the table
/// as stray characters.
fn preprocess(text: &str) -> String {
    let lowered = text.nfc().collect::<String>().to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|w| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == w)
                .map(|(_, full)| *full)
                .unwrap_or(w)
        })
        .collect();
    words.join(" ")
}

/// Single-word tier chain.
fn transliterate_word(word: &str, table: &MappingTable) -> (String, Tier) {
    if let Some(hit) = table.word(word) {
        return (hit.to_string(), Tier::DirectHit);
    }
    for variant in morphological_variants(word) {
        if let Some(hit) = table.word(variant) {
            debug!(word, variant, "morphological variant hit");
            return (hit.to_string(), Tier::DirectHit);
        }
    }
    char_walk(word, table)
}

/// Whole-word lookup variants: strip common English suffixes.
fn morphological_variants(word: &str) -> impl Iterator<Item = &str> {
    ["ing", "ed", "s"]
        .into_iter()
        .filter_map(|suffix| word.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
}

/// Greedy longest-match walk with per-character fallback.
///
/// Unmappable characters pass through unchanged rather than being dropped.
fn char_walk(word: &str, table: &MappingTable) -> (String, Tier) {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() * 2);
    let mut tier = Tier::DirectHit;
    let mut i = 0;
    while i < chars.len() {
        if let Some((dst, consumed)) = table.lookup_at(&chars, i) {
            out.push_str(dst);
            i += consumed;
        } else if let Some(approx) = table.fallback(chars[i]) {
            out.push_str(approx);
            tier = tier.min(Tier::CharFallback);
            i += 1;
        } else {
            out.push(chars[i]);
            tier = tier.min(Tier::CharFallback);
            i += 1;
        }
    }
    (out, tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_hit() {
        let out = transliterate("namaste", Script::Devanagari);
        assert_eq!(out, "नमस्ते");
    }

    #[test]
    fn whole_phrase_hit_before_split() {
        let out = transliterate("thank you", Script::Devanagari);
        assert_eq!(out, "धन्यवाद");
    }

    #[test]
    fn whole_word_hit_is_direct_tier() {
        let outcome = transliterate_tiered("namaste", Script::Devanagari);
        assert_eq!(outcome.tier, Tier::DirectHit);
    }

    #[test]
    fn case_normalized_before_lookup() {
        assert_eq!(
            transliterate("Namaste", Script::Devanagari),
            transliterate("namaste", Script::Devanagari)
        );
    }

    #[test]
    fn greedy_longest_match_end_to_end() {
        // "chha" must be consumed as one unit (छ), never "ch" + "ha".
        let out = transliterate("chhaya", Script::Devanagari);
        assert!(out.starts_with('छ'), "expected छ prefix, got {out}");
        assert!(!out.contains('ह'), "ha must not appear, got {out}");
    }

    #[test]
    fn unknown_word_uses_char_fallback() {
        let outcome = transliterate_tiered("xqz", Script::Devanagari);
        assert!(!outcome.text.trim().is_empty());
        assert_eq!(outcome.tier, Tier::CharFallback);
        // Fully converted: no Latin letters remain.
        assert!(!outcome.text.chars().any(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn never_blank_for_non_empty_input() {
        for input in ["namaste", "xqz", "...", "a b c", "St. Road"] {
            for target in [
                Script::Devanagari,
                Script::Tamil,
                Script::Malayalam,
                Script::Gurmukhi,
            ] {
                let out = transliterate(input, target);
                assert!(!out.trim().is_empty(), "blank output for {input} → {target}");
            }
        }
    }

    #[test]
    fn empty_input_does_not_panic() {
        let out = transliterate("", Script::Devanagari);
        assert_eq!(out, "");
    }

    #[test]
    fn abbreviations_expanded() {
        // "st." expands to "street" before lookup; the walk output must not
        // contain a bare dot-terminated token.
        let prepared = preprocess("MG St. Delhi");
        assert_eq!(prepared, "mg street delhi");
    }

    #[test]
    fn decomposed_input_composed_before_walk() {
        // e + U+0301 must compose to é, not leave the combining mark as a
        // stray character in the walk.
        let decomposed = "cafe\u{0301}";
        let composed = "caf\u{e9}";
        assert_eq!(preprocess(decomposed), preprocess(composed));
        assert_eq!(
            transliterate(decomposed, Script::Devanagari),
            transliterate(composed, Script::Devanagari)
        );
        assert!(!preprocess(decomposed).contains('\u{0301}'));
    }

    #[test]
    fn whitespace_collapsed() {
        assert_eq!(preprocess("  hello   world "), "hello world");
    }

    #[test]
    fn morphological_variant_strips_suffix() {
        // "waters" misses, stem "water" hits the word table.
        let out = transliterate("waters", Script::Devanagari);
        assert_eq!(out, "पानी");
    }

    #[test]
    fn latin_target_returns_input() {
        assert_eq!(transliterate("hello", Script::Latin), "hello");
        assert_eq!(transliterate("hello", Script::Unknown), "hello");
    }

    #[test]
    fn digits_map_to_target_numerals() {
        let out = transliterate("2024", Script::Devanagari);
        assert_eq!(out, "२०२४");
    }

    #[test]
    fn all_four_targets_convert_namaste_phonetics() {
        // "ka" exists in every forward table.
        assert_eq!(transliterate("ka", Script::Devanagari), "क");
        assert_eq!(transliterate("ka", Script::Tamil), "க");
        assert_eq!(transliterate("ka", Script::Malayalam), "ക");
        assert_eq!(transliterate("ka", Script::Gurmukhi), "ਕ");
    }
}
