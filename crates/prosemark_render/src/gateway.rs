//! Markup renderer gateway.

use std::path::Path;

use pulldown_cmark::{Options, Parser as MarkdownParser, html};
use tracing::debug;

use prosemark_core::Document;

use crate::error::RenderError;

/// Obtains the rendered HTML for a masked document.
#[derive(Debug)]
pub struct RendererGateway {
    mode: Mode,
}

#[derive(Debug)]
enum Mode {
    /// One externally rendered artifact shared by every document in the
    /// run, read in full at construction.
    Prebuilt { html: Vec<u8> },
    /// In-process Markdown rendering.
    Local,
    /// External renderer service speaking the plain-text POST contract.
    Service {
        endpoint: String,
        client: reqwest::Client,
    },
}

impl RendererGateway {
    /// Reads a pre-built artifact once; every later render reuses the
    /// same bytes.
    pub fn prebuilt(artifact: &Path) -> Result<Self, RenderError> {
        let html = std::fs::read(artifact).map_err(|source| RenderError::ArtifactRead {
            path: artifact.to_path_buf(),
            source,
        })?;
        Ok(Self {
            mode: Mode::Prebuilt { html },
        })
    }

    /// Renders Markdown-family documents in-process.
    pub fn local() -> Self {
        Self { mode: Mode::Local }
    }

    /// Sends masked text to an external renderer endpoint.
    pub fn service(endpoint: impl Into<String>) -> Self {
        Self {
            mode: Mode::Service {
                endpoint: endpoint.into(),
                client: reqwest::Client::new(),
            },
        }
    }

    /// Renders the masked text of `doc` to HTML bytes.
    pub async fn render(&self, doc: &Document, masked: &str) -> Result<Vec<u8>, RenderError> {
        match &self.mode {
            Mode::Prebuilt { html } => Ok(html.clone()),
            Mode::Local => Ok(render_markdown(masked).into_bytes()),
            Mode::Service { endpoint, client } => post(client, endpoint, doc, masked).await,
        }
    }
}

/// Issues the render request and maps the renderer's answer.
async fn post(
    client: &reqwest::Client,
    endpoint: &str,
    doc: &Document,
    masked: &str,
) -> Result<Vec<u8>, RenderError> {
    debug!("rendering {} via {endpoint}", doc.path.display());

    let response = client
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, "text/plain")
        .header(reqwest::header::ACCEPT, "text/plain")
        .body(masked.to_string())
        .send()
        .await
        .map_err(|source| RenderError::Transport {
            path: doc.path.clone(),
            source,
        })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(RenderError::Rejected {
            path: doc.path.clone(),
            status,
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| RenderError::Transport {
            path: doc.path.clone(),
            source,
        })?;
    Ok(body.to_vec())
}

/// Converts Markdown to HTML with the common extension set.
fn render_markdown(text: &str) -> String {
    let parser = MarkdownParser::new_ext(
        text,
        Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH,
    );
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}
