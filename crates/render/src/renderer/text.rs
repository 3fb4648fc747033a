//! Plain-text extraction used for title detection and `[toc]` matching.

use super::references::References;
use marktyp_core::Inline;

/// Reduces phrasing content to plain text. The result is never escaped and is
/// only meant for comparisons.
///
/// Strikethrough, highlight, sub/superscript, math, images and footnote
/// references contribute nothing.
pub fn plain_text(nodes: &[Inline], refs: &References<'_>) -> String {
    let mut text = String::new();
    for node in nodes {
        extract_text_from_node(node, refs, &mut text);
    }
    text
}

fn extract_text_from_node(node: &Inline, refs: &References<'_>, buffer: &mut String) {
    match node {
        Inline::Text { value } | Inline::InlineCode { value } => buffer.push_str(value),
        Inline::Strong { children } | Inline::Emphasis { children } | Inline::Link { children, .. } => {
            for child in children {
                extract_text_from_node(child, refs, buffer);
            }
        }
        Inline::LinkReference {
            identifier,
            label,
            children,
        } => {
            let text = plain_text(children, refs);
            if !text.trim().is_empty() {
                buffer.push_str(&text);
            } else if let Some(url) = refs.link_url(identifier) {
                buffer.push_str(url);
            } else {
                buffer.push_str(literal_label(label.as_deref(), identifier));
            }
        }
        Inline::LineBreak => buffer.push('\n'),
        _ => {}
    }
}

/// The label as written, or the identifier when the label is missing or empty.
pub(super) fn literal_label<'s>(label: Option<&'s str>, identifier: &'s str) -> &'s str {
    match label {
        Some(label) if !label.is_empty() => label,
        _ => identifier,
    }
}
