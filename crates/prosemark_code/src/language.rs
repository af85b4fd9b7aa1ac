//! Language detection and grammar selection.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Programming languages with a prose-extraction profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Python source files (`.py`).
    Python,
    /// Rust source files (`.rs`).
    Rust,
    /// TypeScript source files (`.ts`, `.tsx`).
    TypeScript,
}

impl Language {
    /// Detects the language from a file extension, with or without the
    /// leading dot. Returns `None` for unrecognised extensions.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "py" | "pyi" => Some(Self::Python),
            "rs" => Some(Self::Rust),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Returns the tree-sitter grammar for this language.
    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            // The TSX grammar is a superset, so `.tsx` parses correctly.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Lower-case identifier, useful as a configuration key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Rust => "rust",
            Self::TypeScript => "typescript",
        }
    }

    /// All languages with a profile.
    pub const fn all() -> &'static [Self] {
        &[Self::Python, Self::Rust, Self::TypeScript]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct UnknownLanguage(String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "python" | "py" => Ok(Self::Python),
            "rust" | "rs" => Ok(Self::Rust),
            "typescript" | "ts" => Ok(Self::TypeScript),
            other => Err(UnknownLanguage(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("py", Language::Python)]
    #[case(".py", Language::Python)]
    #[case("pyi", Language::Python)]
    #[case("rs", Language::Rust)]
    #[case("ts", Language::TypeScript)]
    #[case("tsx", Language::TypeScript)]
    fn from_extension_recognises_supported_languages(
        #[case] ext: &str,
        #[case] expected: Language,
    ) {
        assert_eq!(Language::from_extension(ext), Some(expected));
    }

    #[rstest]
    #[case("md")]
    #[case("go")]
    fn from_extension_returns_none_for_unknown(#[case] ext: &str) {
        assert_eq!(Language::from_extension(ext), None);
    }

    #[rstest]
    #[case("python", Language::Python)]
    #[case("Rust", Language::Rust)]
    #[case("TYPESCRIPT", Language::TypeScript)]
    fn from_str_parses_language_names(#[case] input: &str, #[case] expected: Language) {
        assert_eq!(input.parse::<Language>(), Ok(expected));
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert!("cobol".parse::<Language>().is_err());
    }
}
