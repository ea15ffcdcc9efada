//! Phonetic transliteration between Latin and four Indic scripts
//! (Devanagari, Tamil, Malayalam, Gurmukhi).
//!
//! The engine is synchronous and side-effect free: mapping tables and
//! rewrite rules are built once on first use and read-only afterwards,
//! so callers may invoke conversions concurrently without locking.

pub mod engine;
pub mod forward;
pub mod quality;
pub mod reverse;
pub(crate) mod rewrite;
pub mod router;
pub mod tables;
pub mod trace_init;
pub mod unicode;

pub use engine::{
    convert, cross_script_transliterate, detect_script, script_css_class, to_latin, transliterate,
    ConversionResult, ToLatinResult,
};
pub use quality::Tier;
pub use unicode::Script;
