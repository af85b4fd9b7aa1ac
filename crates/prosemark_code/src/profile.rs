//! Per-language prose extraction profiles.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

use crate::language::Language;

/// Byte trim applied to a query capture to drop its delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterTrim {
    /// Bytes removed from the start of the capture.
    pub start: usize,
    /// Bytes removed from the end of the capture.
    pub end: usize,
}

/// Trim for triple-quoted docstring captures.
const TRIPLE_QUOTE: DelimiterTrim = DelimiterTrim { start: 3, end: 3 };

/// A structural query plus the capture adjustment for its matches.
#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    /// Tree-sitter query source.
    pub pattern: &'static str,
    /// Delimiter bytes stripped from each capture.
    pub trim: Option<DelimiterTrim>,
}

/// A query compiled against a grammar, ready to run.
pub(crate) struct CompiledQuery {
    pub(crate) query: tree_sitter::Query,
    pub(crate) trim: Option<DelimiterTrim>,
}

/// How to find prose-bearing spans in one language's source.
///
/// Queries run in registration order; later queries may re-capture spans
/// already covered by earlier ones, so extraction deduplicates
/// overlapping captures afterwards.
pub struct LanguageProfile {
    pub(crate) delimiters: Regex,
    pub(crate) language: tree_sitter::Language,
    pub(crate) queries: Vec<CompiledQuery>,
}

impl LanguageProfile {
    fn compile(
        language: Language,
        delimiters: &str,
        specs: &[QuerySpec],
    ) -> Result<Self, ProfileError> {
        let delimiters = Regex::new(delimiters).map_err(|e| ProfileError::Delimiters {
            language,
            message: e.to_string(),
        })?;

        let grammar = language.grammar();
        let mut queries = Vec::with_capacity(specs.len());
        for spec in specs {
            let query = tree_sitter::Query::new(&grammar, spec.pattern).map_err(|e| {
                ProfileError::Query {
                    language,
                    message: e.to_string(),
                }
            })?;
            queries.push(CompiledQuery {
                query,
                trim: spec.trim,
            });
        }

        Ok(Self {
            delimiters,
            language: grammar,
            queries,
        })
    }

    /// Strips single-line comment markers and string delimiters from a
    /// raw text fragment.
    pub fn strip_delimiters(&self, text: &str) -> String {
        self.delimiters.replace_all(text, "").into_owned()
    }
}

/// Startup-fatal profile construction failure.
///
/// Profiles are fixed configuration compiled once; a failure here is a
/// defect in the registry itself, never a per-file error.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ProfileError {
    /// The delimiter strip pattern failed to compile.
    #[error("invalid delimiter pattern for {language}: {message}")]
    Delimiters { language: Language, message: String },

    /// A structural query failed to compile against the grammar.
    #[error("invalid query for {language}: {message}")]
    Query { language: Language, message: String },
}

/// Immutable lookup table from language to profile.
///
/// Built once at startup and passed by reference into the pipeline; all
/// profiles are registered before the first lookup can happen.
pub struct ProfileRegistry {
    profiles: HashMap<Language, LanguageProfile>,
}

impl ProfileRegistry {
    /// Compiles every known profile.
    pub fn new() -> Result<Self, ProfileError> {
        let mut profiles = HashMap::new();
        profiles.insert(Language::Python, python()?);
        profiles.insert(Language::Rust, rust()?);
        profiles.insert(Language::TypeScript, typescript()?);
        Ok(Self { profiles })
    }

    /// Looks up the profile for `language`.
    pub fn lookup(&self, language: Language) -> Option<&LanguageProfile> {
        self.profiles.get(&language)
    }
}

fn python() -> Result<LanguageProfile, ProfileError> {
    LanguageProfile::compile(
        Language::Python,
        r#"#\s?|\s*"""\s*|\s*'''\s*"#,
        &[
            QuerySpec {
                pattern: "(comment)+ @comment",
                trim: None,
            },
            // Function docstring
            QuerySpec {
                pattern: "(function_definition
  body: (block . (expression_statement (string) @docstring)))",
                trim: Some(TRIPLE_QUOTE),
            },
            // Class docstring
            QuerySpec {
                pattern: "(class_definition
  body: (block . (expression_statement (string) @docstring)))",
                trim: Some(TRIPLE_QUOTE),
            },
            // Module docstring
            QuerySpec {
                pattern: "(module . (expression_statement (string) @docstring))",
                trim: Some(TRIPLE_QUOTE),
            },
        ],
    )
}

fn rust() -> Result<LanguageProfile, ProfileError> {
    LanguageProfile::compile(
        Language::Rust,
        r"//[!/]?\s?",
        &[
            QuerySpec {
                pattern: "(line_comment)+ @comment",
                trim: None,
            },
            QuerySpec {
                pattern: "(block_comment) @comment",
                trim: None,
            },
        ],
    )
}

fn typescript() -> Result<LanguageProfile, ProfileError> {
    LanguageProfile::compile(
        Language::TypeScript,
        r"//\s?|/\*+\s?|\s*\*/",
        &[QuerySpec {
            pattern: "(comment)+ @comment",
            trim: None,
        }],
    )
}
