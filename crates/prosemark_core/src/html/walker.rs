//! Prose dispatch over lexed HTML tokens.

use std::sync::OnceLock;

use logos::{Lexer, Logos};
use regex::Regex;
use tracing::debug;

use super::lexer::{HtmlToken, tag_name};
use crate::document::Document;

/// Containers whose character data is never prose.
const NON_PROSE: &[&str] = &["script", "style", "pre", "code", "tt"];

/// Heading tag shape, `h1` through `h6` (and any single-digit level).
static HEADING: OnceLock<Regex> = OnceLock::new();

fn heading() -> &'static Regex {
    HEADING.get_or_init(|| Regex::new(r"^h\d$").expect("heading pattern is valid"))
}

/// A run of natural-language text with its position in the rendered stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProseSegment {
    /// The text content.
    pub text: String,
    /// Byte offset of the segment, shifted by the walker's base offset.
    pub offset: usize,
    /// Outline depth of the most recent heading (1 for `h1` and so on).
    /// Text inside the heading itself carries the heading's own depth.
    pub heading_depth: Option<u8>,
}

/// Lazy, single-pass walker over a rendered HTML stream.
///
/// Text tokens are yielded as [`ProseSegment`]s; tag tokens are consumed
/// for structural bookkeeping (outline depth, non-prose containers) and
/// comment tokens are dropped. The walker is not restartable: walking
/// again requires re-lexing from byte zero.
pub struct ProseWalker<'a> {
    lexer: Lexer<'a, HtmlToken>,
    base_offset: usize,
    heading_depth: Option<u8>,
    suppressed: usize,
}

impl<'a> ProseWalker<'a> {
    /// Starts a walk over `html`, reporting offsets shifted by
    /// `base_offset` so findings land on the originating document.
    pub fn new(doc: &Document, html: &'a str, base_offset: usize) -> Self {
        debug!("walking rendered stream for {}", doc.path.display());
        Self {
            lexer: HtmlToken::lexer(html),
            base_offset,
            heading_depth: None,
            suppressed: 0,
        }
    }

    fn observe_tag(&mut self, raw: &str) {
        let (name, closing) = tag_name(raw);
        if name.is_empty() {
            return;
        }
        if heading().is_match(&name) {
            if !closing {
                self.heading_depth = name.as_bytes().get(1).map(|d| *d - b'0');
            }
            return;
        }
        if NON_PROSE.contains(&name.as_str()) {
            if closing {
                self.suppressed = self.suppressed.saturating_sub(1);
            } else if !raw.ends_with("/>") {
                self.suppressed += 1;
            }
        }
    }
}

impl Iterator for ProseWalker<'_> {
    type Item = ProseSegment;

    fn next(&mut self) -> Option<ProseSegment> {
        loop {
            let token = self.lexer.next()?;
            let raw = self.lexer.slice();
            match token {
                Ok(HtmlToken::Tag) => self.observe_tag(raw),
                Ok(HtmlToken::Comment) | Err(_) => {}
                Ok(HtmlToken::Text) | Ok(HtmlToken::StrayLt) => {
                    if self.suppressed == 0 && !raw.trim().is_empty() {
                        return Some(ProseSegment {
                            text: raw.to_string(),
                            offset: self.base_offset + self.lexer.span().start,
                            heading_depth: self.heading_depth,
                        });
                    }
                }
            }
        }
    }
}
