//! Script classification for Indic and Latin text.
//!
//! Detection counts code points per Unicode block in a single pass and
//! returns the dominant script. Ties break in a fixed, documented order
//! rather than map iteration order.

use serde::{Deserialize, Serialize};

/// A writing system, identified by its Unicode block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Devanagari,
    Tamil,
    Malayalam,
    Gurmukhi,
    Unknown,
}

impl Script {
    /// Stable identifier the presentation layer uses to pick a font.
    pub fn css_class(self) -> &'static str {
        match self {
            Script::Latin | Script::Unknown => "font-latin",
            Script::Devanagari => "text-hindi",
            Script::Tamil => "text-tamil",
            Script::Malayalam => "text-malayalam",
            Script::Gurmukhi => "text-gurmukhi",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Devanagari => "devanagari",
            Script::Tamil => "tamil",
            Script::Malayalam => "malayalam",
            Script::Gurmukhi => "gurmukhi",
            Script::Unknown => "unknown",
        }
    }

    /// Parse a script name as used by the CLI and table files.
    pub fn parse(name: &str) -> Option<Script> {
        match name.to_ascii_lowercase().as_str() {
            "latin" | "english" => Some(Script::Latin),
            "devanagari" | "hindi" => Some(Script::Devanagari),
            "tamil" => Some(Script::Tamil),
            "malayalam" => Some(Script::Malayalam),
            "gurmukhi" | "gurumukhi" | "punjabi" => Some(Script::Gurmukhi),
            _ => None,
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

pub fn is_tamil(c: char) -> bool {
    ('\u{0B80}'..='\u{0BFF}').contains(&c)
}

pub fn is_gurmukhi(c: char) -> bool {
    ('\u{0A00}'..='\u{0A7F}').contains(&c)
}

pub fn is_malayalam(c: char) -> bool {
    ('\u{0D00}'..='\u{0D7F}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Classify a single code point, or `None` for characters outside every
/// tracked block (digits, punctuation, whitespace, other scripts).
pub fn script_of_char(c: char) -> Option<Script> {
    if is_devanagari(c) {
        Some(Script::Devanagari)
    } else if is_tamil(c) {
        Some(Script::Tamil)
    } else if is_gurmukhi(c) {
        Some(Script::Gurmukhi)
    } else if is_malayalam(c) {
        Some(Script::Malayalam)
    } else if is_latin(c) {
        Some(Script::Latin)
    } else {
        None
    }
}

/// Tie-break order for detection: first script reaching the maximum count
/// wins. Indic scripts take precedence over Latin so that mixed text with
/// an equal share of both reads as the Indic script.
const DETECTION_ORDER: [Script; 5] = [
    Script::Devanagari,
    Script::Tamil,
    Script::Gurmukhi,
    Script::Malayalam,
    Script::Latin,
];

fn count_scripts(text: &str) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for c in text.chars() {
        if let Some(s) = script_of_char(c) {
            let idx = DETECTION_ORDER.iter().position(|d| *d == s).unwrap_or(0);
            counts[idx] += 1;
        }
    }
    counts
}

/// Detect the dominant script of `text` by code-point count.
///
/// Empty or whitespace-only input detects as `Latin` (absence of any Indic
/// signal is treated as Latin by convention); non-empty input where no code
/// point falls in a tracked block detects as `Unknown`.
pub fn detect_script(text: &str) -> Script {
    if text.trim().is_empty() {
        return Script::Latin;
    }
    let counts = count_scripts(text);
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Script::Unknown;
    }
    for (i, script) in DETECTION_ORDER.iter().enumerate() {
        if counts[i] == max {
            return *script;
        }
    }
    Script::Unknown
}

/// Detect the dominant script together with its share of all counted code
/// points. The share is a coverage ratio, not a conversion-tier confidence;
/// the two scales are not comparable.
pub fn detect_script_share(text: &str) -> (Script, f32) {
    let script = detect_script(text);
    if script == Script::Unknown {
        return (script, 0.0);
    }
    let counts = count_scripts(text);
    let total: usize = counts.iter().sum();
    if total == 0 {
        // Whitespace-only Latin default.
        return (script, 0.0);
    }
    let idx = DETECTION_ORDER
        .iter()
        .position(|d| *d == script)
        .unwrap_or(0);
    (script, counts[idx] as f32 / total as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_devanagari('न'));
        assert!(!is_devanagari('a'));
        assert!(is_tamil('ந'));
        assert!(is_gurmukhi('ਸ'));
        assert!(is_malayalam('ന'));
        assert!(is_latin('a'));
        assert!(!is_latin('न'));
        assert_eq!(script_of_char('5'), None);
        assert_eq!(script_of_char('。'), None);
    }

    #[test]
    fn test_detect_pure_scripts() {
        assert_eq!(detect_script("नमस्ते"), Script::Devanagari);
        assert_eq!(detect_script("நமஸ்காரம்"), Script::Tamil);
        assert_eq!(detect_script("നമസ്കാരം"), Script::Malayalam);
        assert_eq!(detect_script("ਸਤਿ ਸ਼੍ਰੀ ਅਕਾਲ"), Script::Gurmukhi);
        assert_eq!(detect_script("hello"), Script::Latin);
    }

    #[test]
    fn test_detect_empty_is_latin() {
        assert_eq!(detect_script(""), Script::Latin);
        assert_eq!(detect_script("   \t\n"), Script::Latin);
    }

    #[test]
    fn test_detect_no_signal_is_unknown() {
        assert_eq!(detect_script("123 !!"), Script::Unknown);
    }

    #[test]
    fn test_detect_mixed_dominant_wins() {
        // "Hello" has 5 Latin letters, "नमस्ते" has 6 Devanagari code points.
        assert_eq!(detect_script("Hello नमस्ते"), Script::Devanagari);
    }

    #[test]
    fn test_detect_tie_break_order() {
        // One Devanagari and one Tamil code point: Devanagari comes first
        // in the documented order.
        assert_eq!(detect_script("क க"), Script::Devanagari);
        // Latin loses ties to any Indic script.
        assert_eq!(detect_script("aக"), Script::Tamil);
    }

    #[test]
    fn test_detect_share() {
        let (script, share) = detect_script_share("नमस्ते");
        assert_eq!(script, Script::Devanagari);
        assert!((share - 1.0).abs() < f32::EPSILON);

        let (script, share) = detect_script_share("Hello नमस्ते");
        assert_eq!(script, Script::Devanagari);
        assert!(share > 0.5 && share < 1.0);
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(Script::Devanagari.css_class(), "text-hindi");
        assert_eq!(Script::Latin.css_class(), "font-latin");
        assert_eq!(Script::Unknown.css_class(), "font-latin");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Script::parse("hindi"), Some(Script::Devanagari));
        assert_eq!(Script::parse("gurumukhi"), Some(Script::Gurmukhi));
        assert_eq!(Script::parse("Tamil"), Some(Script::Tamil));
        assert_eq!(Script::parse("klingon"), None);
    }
}
