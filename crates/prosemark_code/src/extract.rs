//! Prose-span extraction from parsed source.

use thiserror::Error;
use tracing::debug;
use tree_sitter::{Parser, QueryCursor, StreamingIterator};

use crate::profile::{DelimiterTrim, LanguageProfile};

/// A prose-bearing region captured from source code.
///
/// Offsets point at the capture after delimiter trimming, so `text` for a
/// docstring contains only the prose between the quote markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpan {
    /// Captured text with delimiters trimmed.
    pub text: String,
    /// Byte offset of the capture start in the source.
    pub start: usize,
    /// Byte offset one past the capture end.
    pub end: usize,
    /// Zero-based row of the capture start.
    pub row: usize,
    /// Zero-based column of the capture start.
    pub column: usize,
}

/// Per-source extraction failure.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum CodeError {
    /// The grammar refused to load into the parser.
    #[error("grammar rejected: {0}")]
    Grammar(String),

    /// The parser produced no tree for this source.
    #[error("source could not be parsed")]
    Parse,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    start: usize,
    end: usize,
    row: usize,
    column: usize,
    trim: Option<DelimiterTrim>,
}

impl Candidate {
    fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this capture is more specific than an overlapping one: a
    /// delimiter-accurate capture beats a plain one; among trimmed
    /// captures the innermost wins, among plain runs the widest (a merged
    /// comment run absorbs its sub-runs).
    fn beats(&self, other: &Candidate) -> bool {
        match (self.trim.is_some(), other.trim.is_some()) {
            (true, false) => true,
            (false, true) => false,
            (true, true) => self.len() < other.len(),
            (false, false) => self.len() > other.len(),
        }
    }
}

impl LanguageProfile {
    /// Runs the profile's queries over `source` in registration order and
    /// returns the deduplicated prose spans.
    pub fn extract(&self, source: &str) -> Result<Vec<CodeSpan>, CodeError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| CodeError::Grammar(e.to_string()))?;
        let tree = parser.parse(source, None).ok_or(CodeError::Parse)?;

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut cursor = QueryCursor::new();
        for compiled in &self.queries {
            let mut matches =
                cursor.matches(&compiled.query, tree.root_node(), source.as_bytes());
            while let Some(found) = matches.next() {
                // A quantified pattern captures each node of the run; the
                // whole run is treated as a single span.
                let Some(first) = found.captures.first() else {
                    continue;
                };
                let mut start = first.node.start_byte();
                let mut end = first.node.end_byte();
                let position = first.node.start_position();
                for capture in found.captures {
                    start = start.min(capture.node.start_byte());
                    end = end.max(capture.node.end_byte());
                }
                candidates.push(Candidate {
                    start,
                    end,
                    row: position.row,
                    column: position.column,
                    trim: compiled.trim,
                });
            }
        }

        let kept = dedup_overlapping(candidates);
        debug!("extracted {} prose spans", kept.len());

        let mut spans = Vec::with_capacity(kept.len());
        for candidate in kept {
            if let Some(span) = materialize(source, &candidate) {
                spans.push(span);
            }
        }
        spans.sort_by_key(|s| (s.start, s.end));
        Ok(spans)
    }
}

/// Later queries may re-capture spans already covered by earlier ones
/// (a module docstring also matches the generic comment query); keep the
/// most specific capture per overlapping region.
fn dedup_overlapping(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if let Some(existing) = kept.iter_mut().find(|k| k.overlaps(&candidate)) {
            if candidate.beats(existing) {
                *existing = candidate;
            }
        } else {
            kept.push(candidate);
        }
    }
    kept
}

/// Applies the delimiter trim and slices the capture text.
fn materialize(source: &str, candidate: &Candidate) -> Option<CodeSpan> {
    let (start, end, column) = match candidate.trim {
        Some(trim) if candidate.len() >= trim.start + trim.end => (
            candidate.start + trim.start,
            candidate.end - trim.end,
            candidate.column + trim.start,
        ),
        _ => (candidate.start, candidate.end, candidate.column),
    };
    let text = source.get(start..end)?;
    Some(CodeSpan {
        text: text.to_string(),
        start,
        end,
        row: candidate.row,
        column,
    })
}
