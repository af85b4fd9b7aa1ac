//! Source document model.

use std::path::{Path, PathBuf};

/// A source document flowing through the lint pipeline.
///
/// The extension is carried in two forms: `real_ext` is the literal
/// extension as authored on disk, matched against user-authored glob
/// patterns; `normed_ext` is the canonical form shared by a format family
/// (`.markdown` and `.mdown` both normalize to `.md`) so that rule scopes
/// written for the family apply to every spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path the document was read from.
    pub path: PathBuf,
    /// Raw document content.
    pub content: String,
    /// Canonical extension for the format family.
    pub normed_ext: String,
    /// Literal extension as authored on disk.
    pub real_ext: String,
}

impl Document {
    /// Creates a document, deriving both extension forms from `path`.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let real_ext = extension_of(&path);
        let normed_ext = normalize_extension(&real_ext);
        Self {
            path,
            content: content.into(),
            normed_ext,
            real_ext,
        }
    }

    /// Both extension forms, tried in order when matching rule scopes.
    pub fn extensions(&self) -> [&str; 2] {
        [self.normed_ext.as_str(), self.real_ext.as_str()]
    }

    /// Whether the literal format is in the reStructuredText family.
    pub fn is_rst(&self) -> bool {
        matches!(self.real_ext.as_str(), ".rst" | ".rest")
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Maps an extension to the canonical form shared by its format family.
fn normalize_extension(ext: &str) -> String {
    let normed = match ext {
        ".md" | ".markdown" | ".mdown" | ".mdtxt" | ".mdtext" => ".md",
        ".rst" | ".rest" => ".rst",
        ".adoc" | ".asciidoc" | ".asc" => ".adoc",
        ".html" | ".htm" => ".html",
        other => other,
    };
    normed.to_string()
}
