//! Rendered-HTML tokenization and prose dispatch.
//!
//! The lexer splits a rendered HTML stream into spanned tokens; the walker
//! consumes them, forwarding only natural-language text together with its
//! byte offset so findings can be reported at the correct location in the
//! original document.

mod lexer;
mod walker;

pub use lexer::HtmlToken;
pub use walker::{ProseSegment, ProseWalker};

use std::borrow::Cow;

/// Decodes a rendered HTML byte stream for walking.
///
/// The renderer contract promises UTF-8; stray invalid sequences are
/// replaced rather than failing the whole document.
pub fn decode(html: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(html)
}
