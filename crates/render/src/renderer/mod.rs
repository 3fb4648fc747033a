//! Document-tree to Typst renderer.
//!
//! # Module Structure
//!
//! - `types` - Output and warning types
//! - `references` - Link/footnote definition tables
//! - `text` - Plain-text extraction for matching
//! - `title` - Title, author, and language resolution
//! - `context` - Rendering state shared across one conversion
//! - `block` / `inline` - Node rendering

pub mod block;
mod context;
pub mod inline;
pub mod references;
pub mod text;
pub mod title;
mod types;

pub use context::Context;
pub use references::References;
pub use title::{LeadingTitle, ResolvedMetadata};
pub use types::{Lang, RenderOutput, RenderWarning};

use crate::codegen::assemble;
use crate::registry::{TemplateRegistry, default_registry, defaults::fallback_template};
use context::join_rendered;
use marktyp_core::{Document, MarktypError, ParseOptions, parse_document};
use serde::{Deserialize, Serialize};

/// Conversion options supplied by the caller.
///
/// Every field is optional; unset fields are resolved from frontmatter, the
/// leading heading, or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Document title.
    pub title: Option<String>,
    /// Document authors.
    pub authors: Option<Vec<String>>,
    /// Template style identifier. Unknown values use the default style.
    pub style: Option<String>,
    /// Document language.
    pub lang: Option<Lang>,
}

/// Renders a document with the built-in template registry.
///
/// # Examples
///
/// ```
/// use marktyp_core::{Block, Document, Inline};
/// use marktyp_render::{Options, render_document};
///
/// let doc = Document::new(vec![
///     Block::heading(1, vec![Inline::text("Hello")]),
///     Block::paragraph(vec![Inline::text("World")]),
/// ]);
/// let typst = render_document(&doc, &Options::default());
/// assert!(typst.contains("#show: article.with(title: \"Hello\", lang: \"zh\")"));
/// assert!(typst.ends_with("\n\nWorld\n"));
/// ```
pub fn render_document(doc: &Document, options: &Options) -> String {
    render_document_with(doc, options, &default_registry()).typst
}

/// Renders a document against an explicit template registry, returning the
/// resolved metadata and any warnings alongside the Typst source.
pub fn render_document_with(
    doc: &Document,
    options: &Options,
    registry: &TemplateRegistry,
) -> RenderOutput {
    let references = References::collect(&doc.children);
    let meta = title::resolve_metadata(doc, options, &references);
    let mut ctx = Context::new(references);

    if let Some(style) = options.style.as_deref()
        && !registry.is_supported_style(style)
    {
        ctx.warn(RenderWarning::UnknownStyle {
            style: style.to_string(),
        });
    }
    let template = registry
        .resolve(options.style.as_deref())
        .cloned()
        .unwrap_or_else(fallback_template);

    let parts: Vec<_> = doc
        .children
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != meta.excluded_heading)
        .map(|(_, node)| block::render_block(node, 0, &mut ctx))
        .collect();
    let body = join_rendered(parts, "\n\n");

    let typst = assemble(&template, &meta, &body);
    RenderOutput {
        typst,
        title: meta.title,
        authors: meta.authors,
        lang: meta.lang,
        warnings: ctx.finish(),
    }
}

/// Parses Markdown with the default front-end options and renders it.
pub fn markdown_to_typst(input: &str, options: &Options) -> Result<String, MarktypError> {
    let doc = parse_document(input, &ParseOptions::default())?;
    Ok(render_document(&doc, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marktyp_core::{Block, Inline};

    #[test]
    fn options_deserialize_from_camel_case_json() {
        let options: Options = serde_json::from_str(
            r#"{"title":"T","authors":["A"],"style":"classic-editorial","lang":"en"}"#,
        )
        .unwrap();
        assert_eq!(options.title.as_deref(), Some("T"));
        assert_eq!(options.authors, Some(vec!["A".to_string()]));
        assert_eq!(options.lang, Some(Lang::En));

        let empty: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Options::default());
    }

    #[test]
    fn unknown_style_falls_back_with_warning() {
        let doc = Document::new(vec![Block::paragraph(vec![Inline::text("x")])]);
        let options = Options {
            style: Some("brutalist".to_string()),
            ..Options::default()
        };
        let out = render_document_with(&doc, &options, &default_registry());
        assert!(out.typst.starts_with("#import \"styles/modern-tech.typ\": article\n"));
        assert_eq!(
            out.warnings,
            vec![RenderWarning::UnknownStyle {
                style: "brutalist".to_string()
            }]
        );
    }

    #[test]
    fn registry_without_default_uses_builtin_template() {
        let registry = TemplateRegistry {
            templates: vec![],
            default_style: "missing".to_string(),
        };
        let out = render_document_with(&Document::default(), &Options::default(), &registry);
        assert!(out.typst.starts_with("#import \"styles/modern-tech.typ\": article"));
    }

    #[test]
    fn markdown_entry_point_parses_and_renders() {
        let typst = markdown_to_typst("# Hello\n\nWorld", &Options::default()).unwrap();
        assert_eq!(
            typst,
            "#import \"styles/modern-tech.typ\": article\n\n#show: article.with(title: \"Hello\", lang: \"zh\")\n\nWorld\n"
        );
    }
}
