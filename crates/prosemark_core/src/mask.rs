//! Ignore-pattern masking.
//!
//! Rewrites a document so that regions matching configured ignore rules
//! are replaced with placeholder templates before the document is handed
//! to a markup renderer. Replacement is value-for-value: the placeholder
//! embeds the captured text at its original position, so line count and
//! the relative order of surviving content never change and rendered
//! positions can be mapped back to source coordinates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use globset::Glob;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Document;
use crate::error::MaskError;
use crate::template::PlaceholderTemplate;

/// Front-matter fence at the very top of a document.
static FRONT_MATTER: OnceLock<Regex> = OnceLock::new();

fn front_matter() -> &'static Regex {
    FRONT_MATTER.get_or_init(|| {
        Regex::new(r"(?s)^(?:---|\+\+\+)\n(.+?)\n(?:---|\+\+\+)")
            .expect("front-matter pattern is valid")
    })
}

/// Block and token ignore patterns keyed by syntax scope glob.
///
/// Order within a pattern list is significant: later patterns run against
/// the output of earlier ones. Block patterns are replaced with the block
/// template, token patterns with the inline template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreRules {
    /// Configuration file these rules were loaded from, carried into
    /// pattern errors so they are actionable without inspecting internals.
    #[serde(skip)]
    pub source: PathBuf,
    /// Patterns whose matches become block placeholders.
    #[serde(default)]
    pub block: HashMap<String, Vec<String>>,
    /// Patterns whose matches become inline placeholders.
    #[serde(default)]
    pub token: HashMap<String, Vec<String>>,
}

/// Masks `doc`'s ignored regions, returning the rewritten text.
///
/// A leading front-matter fence is always replaced wholesale; block and
/// token rules apply only when their syntax scope matches one of the
/// document's extension forms. A pattern that fails to compile aborts the
/// mask operation for this document.
pub fn mask(
    doc: &Document,
    block: &PlaceholderTemplate,
    inline: &PlaceholderTemplate,
    rules: &IgnoreRules,
) -> Result<String, MaskError> {
    debug!("masking {}", doc.path.display());

    let mut masked = strip_front_matter(&doc.content, block);

    for (scope, patterns) in &rules.block {
        if !scope_matches(scope, doc, &rules.source)? {
            continue;
        }
        for pattern in patterns {
            let re = compile_pattern(pattern, &rules.source)?;
            masked = if doc.is_rst() {
                replace_indented(&masked, &re, block)
            } else {
                replace_all(&masked, &re, block)
            };
        }
    }

    for (scope, patterns) in &rules.token {
        if !scope_matches(scope, doc, &rules.source)? {
            continue;
        }
        for pattern in patterns {
            let re = compile_pattern(pattern, &rules.source)?;
            masked = replace_all(&masked, &re, inline);
        }
    }

    Ok(masked)
}

fn strip_front_matter(content: &str, block: &PlaceholderTemplate) -> String {
    let Some(caps) = front_matter().captures(content) else {
        return content.to_string();
    };
    let Some(whole) = caps.get(0) else {
        return content.to_string();
    };
    let captured = caps.get(1).map_or(whole.as_str(), |m| m.as_str());

    let mut out = String::with_capacity(content.len());
    out.push_str(&block.apply(captured));
    out.push_str(&content[whole.end()..]);
    out
}

fn scope_matches(scope: &str, doc: &Document, config: &Path) -> Result<bool, MaskError> {
    let glob =
        Glob::new(scope).map_err(|e| MaskError::scope(scope, config, e.to_string()))?;
    let matcher = glob.compile_matcher();
    Ok(doc.extensions().iter().any(|ext| matcher.is_match(ext)))
}

fn compile_pattern(pattern: &str, config: &Path) -> Result<Regex, MaskError> {
    Regex::new(pattern).map_err(|e| MaskError::pattern(pattern, config, e.to_string()))
}

/// Replaces every match with the templated capture.
///
/// The captured text is the first capture group when the pattern has one,
/// otherwise the whole match; the replaced span is always the whole match.
fn replace_all(text: &str, re: &Regex, template: &PlaceholderTemplate) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let captured = caps.get(1).map_or(whole.as_str(), |m| m.as_str());
        out.push_str(&text[last..whole.start()]);
        out.push_str(&template.apply(captured));
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}

/// reStructuredText literal blocks must stay indented relative to the
/// directive above them, so each match is re-indented by a fixed margin
/// and only the first unconsumed occurrence of the matched text is
/// rewritten per match; a blind replace-all would desynchronize line
/// offsets against the directive marker.
fn replace_indented(text: &str, re: &Regex, template: &PlaceholderTemplate) -> String {
    let mut out = text.to_string();
    let mut consumed = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let needle = whole.as_str();
        let Some(found) = out[consumed..].find(needle) else {
            continue;
        };
        let at = consumed + found;
        let replacement = template.apply(&indent(needle, "    "));
        out.replace_range(at..at + needle.len(), &replacement);
        consumed = at + replacement.len();
    }
    out
}

/// Prefixes every line of `text` with `margin`.
fn indent(text: &str, margin: &str) -> String {
    let mut out = String::with_capacity(text.len() + margin.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(margin);
        out.push_str(line);
    }
    out
}
