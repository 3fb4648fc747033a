use marktyp_core::{ParseOptions, parse_document};
use marktyp_render::registry::defaults::bundled_source;
use marktyp_render::{Options, default_registry, render_document_with};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Options
// ============================================================================

fn parse_options(options: JsValue) -> Result<Options, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(Options::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn parse_markdown(source: &str) -> Result<marktyp_core::Document, JsError> {
    parse_document(source, &ParseOptions::default())
        .map_err(|e| JsError::new(&format!("Parse error: {}", e)))
}

// ============================================================================
// Conversion API
// ============================================================================

/// Converts Markdown into a complete Typst document.
///
/// # Arguments
///
/// * `source` - Markdown text, optionally starting with a `---` frontmatter block
/// * `options` - Optional object: `{ title, authors, style, lang }`
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { markdownToTypst } from './marktyp_wasm';
///
/// const typst = markdownToTypst('# Hello\n\nWorld', { lang: 'en' });
/// // #import "styles/modern-tech.typ": article
/// //
/// // #show: article.with(title: "Hello", lang: "en")
/// //
/// // World
/// ```
#[wasm_bindgen(js_name = markdownToTypst)]
pub fn markdown_to_typst(source: &str, options: JsValue) -> Result<String, JsError> {
    let options = parse_options(options)?;
    let doc = parse_markdown(source)?;
    Ok(render_document_with(&doc, &options, &default_registry()).typst)
}

/// Converts Markdown and returns the Typst source together with the resolved
/// metadata and warnings: `{ typst, title, authors, lang, warnings }`.
#[wasm_bindgen]
pub fn render(source: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let doc = parse_markdown(source)?;
    let output = render_document_with(&doc, &options, &default_registry());
    serde_wasm_bindgen::to_value(&output)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Parses Markdown into the document tree the renderer consumes.
#[wasm_bindgen(js_name = parseTree)]
pub fn parse_tree(source: &str) -> Result<JsValue, JsError> {
    let doc = parse_markdown(source)?;
    serde_wasm_bindgen::to_value(&doc)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Template API
// ============================================================================

/// Paths the generated documents import templates from, relative to the
/// main document.
#[wasm_bindgen(js_name = templatePaths)]
pub fn template_paths() -> js_sys::Array {
    default_registry()
        .template_paths()
        .map(JsValue::from_str)
        .collect()
}

/// Typst source of a built-in style, for registering with a compiler.
#[wasm_bindgen(js_name = templateSource)]
pub fn template_source(style: &str) -> Option<String> {
    bundled_source(style).map(str::to_string)
}
