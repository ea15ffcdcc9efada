//! Contextual rewrite rules for Latin input.
//!
//! An ordered pipeline of regex substitutions that normalizes English
//! spelling quirks into phoneme-friendly form before the table walk. Each
//! rule scans the output of the rules before it, so the order below is part
//! of the contract, not an implementation detail. Rules inject Devanagari
//! directly (matras, anusvara), so they run only for the Devanagari target.

use std::sync::OnceLock;

use regex::Regex;

struct ContextRule {
    pattern: Regex,
    replacement: &'static str,
}

/// (pattern, replacement) specs in application order.
///
/// The `regex` crate has no lookaround or backreferences, so the soft-letter
/// rules capture and re-emit the trailing vowel, and gemination is spelled
/// out per consonant (those patterns are disjoint, so their relative order
/// is free). The silent-h rule is anchored to word start so it cannot split
/// the ch/th/sh/kh/gh/bh digraphs the mapping table matches as units.
const RULE_SPECS: &[(&str, &str)] = &[
    // Soft consonant + vowel clusters
    ("ch([aeiou])", "च$1"),
    ("sh([aeiou])", "श$1"),
    ("th([aeiou])", "थ$1"),
    // Silent h at word start before a vowel
    (r"\bh([aeiou])", "ह$1"),
    // Doubled consonants become consonant + halant + consonant
    ("kk", "k\u{094d}k"),
    ("gg", "g\u{094d}g"),
    ("tt", "t\u{094d}t"),
    ("pp", "p\u{094d}p"),
    ("bb", "b\u{094d}b"),
    ("dd", "d\u{094d}d"),
    ("nn", "n\u{094d}n"),
    ("mm", "m\u{094d}m"),
    ("rr", "r\u{094d}r"),
    ("ll", "l\u{094d}l"),
    ("vv", "v\u{094d}v"),
    ("ss", "s\u{094d}s"),
    // English vowel digraphs
    ("ou", "ओ"),
    ("ea", "ी"),
    ("ei", "ै"),
    // Common English endings
    ("ing$", "िंग"),
    ("tion$", "शन"),
    ("sion$", "शन"),
];

fn rules() -> &'static [ContextRule] {
    static RULES: OnceLock<Vec<ContextRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_SPECS
            .iter()
            .map(|(pattern, replacement)| ContextRule {
                pattern: Regex::new(pattern).expect("rewrite rule patterns must be valid"),
                replacement,
            })
            .collect()
    })
}

/// Apply the full rule pipeline over the whole string, in order.
pub fn apply(text: &str) -> String {
    let mut result = text.to_string();
    for rule in rules() {
        result = rule
            .pattern
            .replace_all(&result, rule.replacement)
            .into_owned();
    }
    result
}
