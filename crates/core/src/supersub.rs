//! Caret/tilde span tokenizer.
//!
//! Splits `^...^` and `~...~` spans inside text leaves into [`Inline::Superscript`]
//! and [`Inline::Subscript`] nodes. Runs once over the tree before rendering.

use crate::ast::{Block, Document, Inline};
use once_cell::sync::Lazy;
use regex::Regex;

/// Leftmost-first, non-greedy; a span never crosses a line break.
static SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\^[^\n\r]+?\^|~[^\n\r]+?~").expect("span pattern is valid")
});

/// Rewrites every text leaf of the document in place.
///
/// Generated nodes are never rescanned, and the contents of existing
/// superscript/subscript nodes are left alone, so running the pass twice is a
/// no-op.
pub fn split_supersub(doc: &mut Document) {
    for block in &mut doc.children {
        split_block(block);
    }
}

fn split_block(block: &mut Block) {
    match block {
        Block::Heading { children, .. } | Block::Paragraph { children } => split_inlines(children),
        Block::FootnoteDefinition { children, .. } | Block::Blockquote { children } => {
            for child in children {
                split_block(child);
            }
        }
        Block::List { items, .. } => {
            for item in items {
                for child in &mut item.children {
                    split_block(child);
                }
            }
        }
        Block::Table { rows, .. } => {
            for cell in rows.iter_mut().flatten() {
                split_inlines(cell);
            }
        }
        Block::Frontmatter { .. }
        | Block::LinkDefinition { .. }
        | Block::CodeBlock { .. }
        | Block::ThematicBreak
        | Block::MathBlock { .. } => {}
    }
}

fn split_inlines(nodes: &mut Vec<Inline>) {
    if !nodes.iter().any(needs_visit) {
        return;
    }

    let original = std::mem::take(nodes);
    nodes.reserve(original.len());
    for mut node in original {
        match &mut node {
            Inline::Text { value } if value.contains(['^', '~']) => {
                nodes.extend(split_text(value));
            }
            Inline::Strong { children }
            | Inline::Emphasis { children }
            | Inline::Strike { children }
            | Inline::Highlight { children }
            | Inline::Link { children, .. }
            | Inline::LinkReference { children, .. } => {
                split_inlines(children);
                nodes.push(node);
            }
            _ => nodes.push(node),
        }
    }
}

fn needs_visit(node: &Inline) -> bool {
    match node {
        Inline::Text { value } => value.contains(['^', '~']),
        Inline::Superscript { .. } | Inline::Subscript { .. } => false,
        other => other.children().is_some(),
    }
}

/// Splits a single text value into plain text and span nodes.
///
/// ```
/// use marktyp_core::ast::Inline;
/// use marktyp_core::supersub::split_text;
///
/// let nodes = split_text("E^2^");
/// assert_eq!(nodes[0], Inline::text("E"));
/// assert!(matches!(nodes[1], Inline::Superscript { .. }));
/// ```
pub fn split_text(value: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for m in SPAN_RE.find_iter(value) {
        push_text(&mut out, &value[cursor..m.start()]);
        out.push(span_node(m.as_str()));
        cursor = m.end();
    }
    push_text(&mut out, &value[cursor..]);

    out
}

fn span_node(span: &str) -> Inline {
    let inner = &span[1..span.len() - 1];
    if inner.is_empty() {
        return Inline::text(span);
    }
    let children = vec![Inline::text(inner)];
    if span.starts_with('^') {
        Inline::Superscript { children }
    } else {
        Inline::Subscript { children }
    }
}

fn push_text(out: &mut Vec<Inline>, value: &str) {
    if !value.is_empty() {
        out.push(Inline::text(value));
    }
}
