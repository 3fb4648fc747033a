//! Assembly of the final Typst source: template import, show rule, and body.

use crate::escape::quote_string;
use crate::registry::TemplateDefinition;
use crate::renderer::ResolvedMetadata;

/// `#import "path": entry`
///
/// # Examples
///
/// ```
/// use marktyp_render::codegen::import_line;
/// use marktyp_render::registry::default_registry;
///
/// let registry = default_registry();
/// let template = registry.resolve(None).unwrap();
/// assert_eq!(import_line(template), "#import \"styles/modern-tech.typ\": article");
/// ```
pub fn import_line(template: &TemplateDefinition) -> String {
    format!("#import \"{}\": {}", template.path, template.entry)
}

/// Renders quoted items as a Typst array literal.
///
/// A single element gets a trailing comma so it is not read as a
/// parenthesized expression.
///
/// # Examples
///
/// ```
/// use marktyp_render::codegen::typst_array;
///
/// assert_eq!(typst_array(&["\"a\"".to_string()]), "(\"a\",)");
/// assert_eq!(typst_array(&["1".to_string(), "2".to_string()]), "(1, 2)");
/// ```
pub fn typst_array(items: &[String]) -> String {
    if items.len() == 1 {
        format!("({},)", items[0])
    } else {
        format!("({})", items.join(", "))
    }
}

/// Builds the `#show:` rule applying the template with document metadata.
pub fn show_rule(template: &TemplateDefinition, meta: &ResolvedMetadata) -> String {
    let mut args = Vec::new();
    if !meta.title.is_empty() {
        args.push(format!("title: {}", quote_string(&meta.title)));
    }
    if !meta.authors.is_empty() {
        let authors: Vec<String> = meta.authors.iter().map(|a| quote_string(a)).collect();
        args.push(format!("authors: {}", typst_array(&authors)));
    }
    args.push(format!("lang: {}", quote_string(meta.lang.as_str())));

    format!("#show: {}.with({})", template.entry, args.join(", "))
}

/// Joins the header and the rendered body into the final document.
pub fn assemble(template: &TemplateDefinition, meta: &ResolvedMetadata, body: &str) -> String {
    format!(
        "{}\n\n{}\n\n{}\n",
        import_line(template),
        show_rule(template, meta),
        body
    )
}
