//! # prosemark_render
//!
//! Obtains rendered HTML for masked documents.
//!
//! The [`RendererGateway`] supports three modes: a pre-built artifact
//! shared across a run, in-process Markdown rendering, and an external
//! renderer service speaking a plain-text POST contract. Before the first
//! service-mode render, [`wait_until_reachable`] confirms the renderer
//! process is accepting connections.

mod error;
mod gateway;
mod probe;

pub use error::RenderError;
pub use gateway::RendererGateway;
pub use probe::{STARTUP_DEADLINE, wait_until_reachable};
