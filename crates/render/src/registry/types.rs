//! Registry type definitions for style templates.

use serde::{Deserialize, Serialize};

/// Immutable map from style identifiers to Typst templates.
///
/// Passed explicitly to the assembler instead of living in process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRegistry {
    /// Known templates.
    pub templates: Vec<TemplateDefinition>,
    /// Style used when the requested one is missing or unknown.
    pub default_style: String,
}

/// A single template definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    /// Style identifier (e.g., "modern-tech").
    pub id: String,
    /// Path of the template file, relative to the main document.
    pub path: String,
    /// Function exported by the template and applied with a show rule.
    pub entry: String,
}

impl TemplateRegistry {
    /// Get the template registered for a style identifier.
    pub fn get(&self, style: &str) -> Option<&TemplateDefinition> {
        self.templates.iter().find(|t| t.id == style)
    }

    /// Check if a style identifier is known.
    pub fn is_supported_style(&self, style: &str) -> bool {
        self.get(style).is_some()
    }

    /// Resolve a requested style, falling back to the default style.
    ///
    /// Returns `None` only when the default style itself is not registered.
    pub fn resolve(&self, style: Option<&str>) -> Option<&TemplateDefinition> {
        style
            .and_then(|s| self.get(s))
            .or_else(|| self.get(&self.default_style))
    }

    /// Paths of every registered template file.
    pub fn template_paths(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.path.as_str())
    }
}
