//! Type definitions for the Typst renderer.

use serde::{Deserialize, Serialize};

/// Document language passed to the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Chinese (`"zh"`).
    #[default]
    Zh,
    /// English (`"en"`).
    En,
}

impl Lang {
    /// Returns the Typst language tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Zh => "zh",
            Lang::En => "en",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something the renderer dropped or substituted instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderWarning {
    /// A footnote reference had no matching definition and was dropped.
    UnresolvedFootnote {
        /// Identifier as written in the reference.
        identifier: String,
    },
    /// A footnote body referenced itself; the inner reference was dropped.
    RecursiveFootnote {
        /// Identifier as written in the reference.
        identifier: String,
    },
    /// A link reference had no matching definition and was rendered as text.
    UnresolvedLink {
        /// Identifier as written in the reference.
        identifier: String,
    },
    /// The requested style is not registered; the default template was used.
    UnknownStyle {
        /// Requested style identifier.
        style: String,
    },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::UnresolvedFootnote { identifier } => {
                write!(f, "footnote '{}' has no definition", identifier)
            }
            RenderWarning::RecursiveFootnote { identifier } => {
                write!(f, "footnote '{}' references itself", identifier)
            }
            RenderWarning::UnresolvedLink { identifier } => {
                write!(f, "link reference '{}' has no definition", identifier)
            }
            RenderWarning::UnknownStyle { style } => {
                write!(f, "unknown style '{}', using default template", style)
            }
        }
    }
}

/// Result of rendering a document with resolved metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOutput {
    /// Complete Typst source.
    pub typst: String,
    /// Resolved title (may be empty).
    pub title: String,
    /// Resolved authors.
    pub authors: Vec<String>,
    /// Resolved language.
    pub lang: Lang,
    /// Non-fatal substitutions made while rendering.
    pub warnings: Vec<RenderWarning>,
}
