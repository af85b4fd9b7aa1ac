//! # prosemark_code
//!
//! Prose-span extraction from programming-language source.
//!
//! Each supported language carries a [`LanguageProfile`]: a delimiter
//! strip pattern, a grammar, and an ordered list of structural queries
//! that locate prose-bearing spans (comment runs, docstrings). Profiles
//! are compiled once into an immutable [`ProfileRegistry`] and shared by
//! reference into the pipeline; construction failures are startup-fatal,
//! not per-file errors.

mod extract;
mod language;
mod profile;

pub use extract::{CodeError, CodeSpan};
pub use language::{Language, UnknownLanguage};
pub use profile::{DelimiterTrim, LanguageProfile, ProfileError, ProfileRegistry, QuerySpec};
