//! Built-in template registry.

use super::types::{TemplateDefinition, TemplateRegistry};

/// Style used when none is requested or the requested one is unknown.
pub const DEFAULT_STYLE: &str = "modern-tech";

/// Creates the built-in registry.
///
/// # Example
///
/// ```
/// use marktyp_render::registry::default_registry;
///
/// let registry = default_registry();
/// let template = registry.resolve(Some("classic-editorial")).unwrap();
/// assert_eq!(template.path, "styles/classic-editorial.typ");
/// assert_eq!(registry.resolve(Some("nope")).unwrap().id, "modern-tech");
/// ```
pub fn default_registry() -> TemplateRegistry {
    TemplateRegistry {
        templates: vec![
            article_template("modern-tech"),
            article_template("classic-editorial"),
        ],
        default_style: DEFAULT_STYLE.to_string(),
    }
}

/// Template used when a registry cannot resolve even its default style.
pub fn fallback_template() -> TemplateDefinition {
    article_template(DEFAULT_STYLE)
}

/// Typst source of a built-in template, for registering with a compiler.
pub fn bundled_source(id: &str) -> Option<&'static str> {
    match id {
        "modern-tech" => Some(include_str!("../../styles/modern-tech.typ")),
        "classic-editorial" => Some(include_str!("../../styles/classic-editorial.typ")),
        _ => None,
    }
}

fn article_template(id: &str) -> TemplateDefinition {
    TemplateDefinition {
        id: id.to_string(),
        path: format!("styles/{id}.typ"),
        entry: "article".to_string(),
    }
}
