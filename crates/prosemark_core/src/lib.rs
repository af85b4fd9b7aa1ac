//! # prosemark_core
//!
//! Markup-aware prose isolation.
//!
//! This crate provides:
//! - The [`Document`] model with normalized/real extension forms
//! - Ignore-pattern masking that rewrites non-prose regions in place
//! - An HTML token walker that dispatches only natural-language text
//!
//! ## Example
//!
//! ```rust,ignore
//! use prosemark_core::{Document, IgnoreRules, PlaceholderTemplate, html, mask};
//!
//! let doc = Document::new("guide.md", content);
//! let block = PlaceholderTemplate::new("\n```\n{}\n```\n")?;
//! let inline = PlaceholderTemplate::new("`{}`")?;
//!
//! let masked = mask(&doc, &block, &inline, &rules)?;
//! let rendered = gateway.render(&doc, &masked).await?;
//!
//! let text = html::decode(&rendered);
//! for segment in html::ProseWalker::new(&doc, &text, 0) {
//!     // hand segment.text and segment.offset to the rule engine
//! }
//! ```

mod document;
mod error;
pub mod html;
mod mask;
mod template;

pub use document::Document;
pub use error::MaskError;
pub use html::{ProseSegment, ProseWalker};
pub use mask::{IgnoreRules, mask};
pub use template::PlaceholderTemplate;
