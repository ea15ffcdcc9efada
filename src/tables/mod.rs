//! Phonetic mapping tables.
//!
//! Each table has three sections: `[words]` (whole-word shortcuts, tried
//! before any character walk), `[units]` (1–5 code-point phonetic units,
//! matched greedy-longest-first), and `[fallback]` (single source character
//! to a destination approximation, the last resort before passing the
//! character through unchanged).
//!
//! Table data is embedded as TOML and parsed once into a process-wide
//! `OnceLock` registry; `init_custom_tables` may replace individual tables
//! before first use. Tables are append-only static data — nothing mutates
//! them after construction.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::unicode::Script;

/// Longest unit key length the lookup will ever probe.
pub const MAX_UNIT_LEN: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[units] table is empty")]
    Empty,
    #[error("empty key in [{section}]")]
    EmptyKey { section: &'static str },
    #[error("unit key too long (max {MAX_UNIT_LEN} code points): {0}")]
    KeyTooLong(String),
    #[error("fallback key must be a single code point: {0}")]
    FallbackKeyNotChar(String),
    #[error("tables already initialized")]
    AlreadyInitialized,
}

#[derive(Deserialize)]
struct TableConfig {
    #[serde(default)]
    words: BTreeMap<String, String>,
    units: BTreeMap<String, String>,
    #[serde(default)]
    fallback: BTreeMap<String, String>,
}

/// An immutable phonetic mapping table.
#[derive(Debug)]
pub struct MappingTable {
    words: HashMap<String, String>,
    units: HashMap<String, String>,
    fallback: HashMap<char, String>,
    max_unit_len: usize,
}

impl MappingTable {
    /// Parse and validate a table from TOML text.
    ///
    /// Empty *values* are legal ([units] maps virama to the empty string);
    /// empty keys, unit keys over [`MAX_UNIT_LEN`] code points, and
    /// multi-character fallback keys are not.
    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        let config: TableConfig =
            toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

        if config.units.is_empty() {
            return Err(TableError::Empty);
        }

        let mut max_unit_len = 0;
        for key in config.units.keys() {
            let len = key.chars().count();
            if len == 0 {
                return Err(TableError::EmptyKey { section: "units" });
            }
            if len > MAX_UNIT_LEN {
                return Err(TableError::KeyTooLong(key.clone()));
            }
            max_unit_len = max_unit_len.max(len);
        }
        if config.words.keys().any(|k| k.is_empty()) {
            return Err(TableError::EmptyKey { section: "words" });
        }

        let mut fallback = HashMap::with_capacity(config.fallback.len());
        for (key, value) in config.fallback {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    fallback.insert(c, value);
                }
                _ => return Err(TableError::FallbackKeyNotChar(key)),
            }
        }

        Ok(Self {
            words: config.words.into_iter().collect(),
            units: config.units.into_iter().collect(),
            fallback,
            max_unit_len,
        })
    }

    /// Whole-word (or whole-phrase) shortcut lookup.
    pub fn word(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    /// Greedy longest-match unit lookup at `pos` in `chars`.
    ///
    /// Probes candidate lengths from the longest key present in the table
    /// down to 1 and returns the destination token plus the number of code
    /// points consumed. A shorter match must never win over a longer one,
    /// so the explicit decreasing loop is the contract here — not an
    /// optimization detail.
    pub fn lookup_at(&self, chars: &[char], pos: usize) -> Option<(&str, usize)> {
        if pos >= chars.len() {
            return None;
        }
        let limit = self.max_unit_len.min(chars.len() - pos);
        let mut key = String::with_capacity(limit * 4);
        for len in (1..=limit).rev() {
            key.clear();
            key.extend(&chars[pos..pos + len]);
            if let Some(dst) = self.units.get(&key) {
                return Some((dst.as_str(), len));
            }
        }
        None
    }

    /// Single-character approximation, the tier below the unit walk.
    pub fn fallback(&self, c: char) -> Option<&str> {
        self.fallback.get(&c).map(String::as_str)
    }

    pub fn max_unit_len(&self) -> usize {
        self.max_unit_len
    }
}

/// Identifies one table in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// Latin phonetics → Indic script.
    Forward(Script),
    /// Indic script → Latin phonetics.
    Reverse(Script),
    /// Direct script-to-script pair (high-traffic pairs only).
    Direct(Script, Script),
    /// Coarse per-character approximation, Devanagari source.
    Approx(Script),
}

const BUILTIN: &[(TableId, &str)] = &[
    (
        TableId::Forward(Script::Devanagari),
        include_str!("data/latin_devanagari.toml"),
    ),
    (
        TableId::Forward(Script::Tamil),
        include_str!("data/latin_tamil.toml"),
    ),
    (
        TableId::Forward(Script::Malayalam),
        include_str!("data/latin_malayalam.toml"),
    ),
    (
        TableId::Forward(Script::Gurmukhi),
        include_str!("data/latin_gurmukhi.toml"),
    ),
    (
        TableId::Reverse(Script::Devanagari),
        include_str!("data/devanagari_latin.toml"),
    ),
    (
        TableId::Reverse(Script::Tamil),
        include_str!("data/tamil_latin.toml"),
    ),
    (
        TableId::Reverse(Script::Malayalam),
        include_str!("data/malayalam_latin.toml"),
    ),
    (
        TableId::Reverse(Script::Gurmukhi),
        include_str!("data/gurmukhi_latin.toml"),
    ),
    (
        TableId::Direct(Script::Tamil, Script::Devanagari),
        include_str!("data/tamil_devanagari.toml"),
    ),
    (
        TableId::Approx(Script::Tamil),
        include_str!("data/devanagari_tamil_approx.toml"),
    ),
    (
        TableId::Approx(Script::Malayalam),
        include_str!("data/devanagari_malayalam_approx.toml"),
    ),
    (
        TableId::Approx(Script::Gurmukhi),
        include_str!("data/devanagari_gurmukhi_approx.toml"),
    ),
];

static CUSTOM: OnceLock<Vec<(TableId, String)>> = OnceLock::new();

/// Replace individual built-in tables before first use.
///
/// Overrides are validated eagerly; the call fails after any table access
/// has already materialized the registry.
pub fn init_custom_tables(overrides: Vec<(TableId, String)>) -> Result<(), TableError> {
    for (_, toml_str) in &overrides {
        MappingTable::from_toml(toml_str)?;
    }
    CUSTOM
        .set(overrides)
        .map_err(|_| TableError::AlreadyInitialized)
}

pub struct TableSet {
    map: HashMap<TableId, MappingTable>,
}

impl TableSet {
    /// Get or initialize the global registry.
    pub fn global() -> &'static TableSet {
        static INSTANCE: OnceLock<TableSet> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let mut map = HashMap::with_capacity(BUILTIN.len());
            for (id, toml_str) in BUILTIN {
                let table =
                    MappingTable::from_toml(toml_str).expect("embedded table TOML must be valid");
                map.insert(*id, table);
            }
            if let Some(overrides) = CUSTOM.get() {
                for (id, toml_str) in overrides {
                    let table = MappingTable::from_toml(toml_str)
                        .expect("custom table TOML was validated at init");
                    map.insert(*id, table);
                }
            }
            TableSet { map }
        })
    }

    pub fn get(&self, id: TableId) -> Option<&MappingTable> {
        self.map.get(&id)
    }
}

/// Latin → `target` table, if `target` is a supported Indic script.
pub fn forward(target: Script) -> Option<&'static MappingTable> {
    TableSet::global().get(TableId::Forward(target))
}

/// `source` → Latin phonetics table.
pub fn reverse(source: Script) -> Option<&'static MappingTable> {
    TableSet::global().get(TableId::Reverse(source))
}

/// Direct script-pair table, provided only for high-traffic pairs.
pub fn direct(source: Script, target: Script) -> Option<&'static MappingTable> {
    TableSet::global().get(TableId::Direct(source, target))
}

/// Coarse Devanagari → `target` per-character approximation table.
pub fn approx(target: Script) -> Option<&'static MappingTable> {
    TableSet::global().get(TableId::Approx(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[units]
a = "अ"
ka = "क"
chha = "छ"

[words]
namaste = "नमस्ते"

[fallback]
q = "क"
"#;
        let table = MappingTable::from_toml(toml).unwrap();
        assert_eq!(table.word("namaste"), Some("नमस्ते"));
        assert_eq!(table.fallback('q'), Some("क"));
        assert_eq!(table.max_unit_len(), 4);
    }

    #[test]
    fn lookup_prefers_longest() {
        let toml = r#"
[units]
ch = "च"
ha = "ह"
chha = "छ"
"#;
        let table = MappingTable::from_toml(toml).unwrap();
        let chars: Vec<char> = "chhaya".chars().collect();
        // "chha" (4) must win over "ch" (2) at position 0.
        assert_eq!(table.lookup_at(&chars, 0), Some(("छ", 4)));
        // At position 4 only "ya" remains; no unit matches "ya" here.
        assert_eq!(table.lookup_at(&chars, 4), None);
    }

    #[test]
    fn lookup_shorter_at_miss() {
        let toml = r#"
[units]
ch = "च"
chha = "छ"
"#;
        let table = MappingTable::from_toml(toml).unwrap();
        let chars: Vec<char> = "chy".chars().collect();
        // "chy" and "ch" probe lengths 3 then 2; 2 hits.
        assert_eq!(table.lookup_at(&chars, 0), Some(("च", 2)));
    }

    #[test]
    fn empty_value_is_legal() {
        // Virama suppresses the inherent vowel; it maps to nothing.
        let toml = "[units]\n\"\u{094d}\" = \"\"\n";
        let table = MappingTable::from_toml(toml).unwrap();
        let chars: Vec<char> = "\u{094d}".chars().collect();
        assert_eq!(table.lookup_at(&chars, 0), Some(("", 1)));
    }

    #[test]
    fn lookup_at_or_past_end_is_none() {
        let toml = "[units]\na = \"अ\"\n";
        let table = MappingTable::from_toml(toml).unwrap();
        let chars: Vec<char> = "a".chars().collect();
        assert_eq!(table.lookup_at(&chars, 1), None);
        assert_eq!(table.lookup_at(&chars, 5), None);
        assert_eq!(table.lookup_at(&[], 0), None);
    }

    #[test]
    fn error_empty_units() {
        let err = MappingTable::from_toml("[units]\n").unwrap_err();
        assert!(matches!(err, TableError::Empty));
    }

    #[test]
    fn error_key_too_long() {
        let err = MappingTable::from_toml("[units]\nabcdef = \"x\"\n").unwrap_err();
        assert!(matches!(err, TableError::KeyTooLong(_)));
    }

    #[test]
    fn error_multichar_fallback_key() {
        let toml = "[units]\na = \"अ\"\n[fallback]\nab = \"x\"\n";
        let err = MappingTable::from_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::FallbackKeyNotChar(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = MappingTable::from_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }

    #[test]
    fn all_builtin_tables_parse() {
        for (id, toml_str) in BUILTIN {
            let table = MappingTable::from_toml(toml_str)
                .unwrap_or_else(|e| panic!("table {id:?} failed to parse: {e}"));
            assert!(table.max_unit_len() <= MAX_UNIT_LEN);
        }
    }

    #[test]
    fn registry_has_all_forward_and_reverse() {
        for script in [
            Script::Devanagari,
            Script::Tamil,
            Script::Malayalam,
            Script::Gurmukhi,
        ] {
            assert!(forward(script).is_some(), "missing forward {script}");
            assert!(reverse(script).is_some(), "missing reverse {script}");
        }
        assert!(forward(Script::Latin).is_none());
        assert!(direct(Script::Tamil, Script::Devanagari).is_some());
        assert!(direct(Script::Malayalam, Script::Tamil).is_none());
    }
}
