//! Placeholder templates for masked regions.

use crate::error::MaskError;

/// Slot marker substituted with the captured text.
const SLOT: &str = "{}";

/// A single-slot template standing in for a masked region.
///
/// Block templates keep multi-line captures anchored at their original
/// position; inline templates replace spans within a line. The slot
/// contract is validated here, at configuration load, not at first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderTemplate {
    template: String,
}

impl PlaceholderTemplate {
    /// Validates that `template` carries exactly one `{}` slot.
    pub fn new(template: impl Into<String>) -> Result<Self, MaskError> {
        let template = template.into();
        if template.matches(SLOT).count() != 1 {
            return Err(MaskError::Template { template });
        }
        Ok(Self { template })
    }

    /// Renders the placeholder for one captured region.
    pub fn apply(&self, captured: &str) -> String {
        self.template.replacen(SLOT, captured, 1)
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }
}
