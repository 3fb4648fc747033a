//! Block-level rendering.

use super::context::{Context, indent_lines, join_rendered};
use super::inline::render_inlines;
use super::text::plain_text;
use marktyp_core::{Align, Block, Inline, ListItem, TableRow};

/// Emitted for a paragraph whose only text is `[toc]`.
pub const OUTLINE: &str = "#outline(title: auto, indent: auto)";
/// Emitted for a thematic break.
pub const THEMATIC_BREAK: &str = "#line(length: 100%, stroke: 0.6pt)";

const ORDERED_MARKER: &str = "+";
const UNORDERED_MARKER: &str = "-";

/// Renders one block at the given indent level.
///
/// Returns `None` for blocks that contribute nothing (frontmatter and
/// definitions). An empty string is possible and is dropped by callers.
pub fn render_block(block: &Block, indent: usize, ctx: &mut Context<'_>) -> Option<String> {
    match block {
        Block::Frontmatter { .. }
        | Block::LinkDefinition { .. }
        | Block::FootnoteDefinition { .. } => None,
        Block::Heading { depth, children } => Some(render_heading(*depth, children, indent, ctx)),
        Block::Paragraph { children } => {
            Some(indent_lines(&render_paragraph(children, ctx), indent))
        }
        Block::List { ordered, items } => Some(render_list(*ordered, items, indent, ctx)),
        Block::CodeBlock { lang, value } => {
            Some(render_code_block(lang.as_deref(), value, indent))
        }
        Block::Blockquote { children } => Some(render_blockquote(children, indent, ctx)),
        Block::ThematicBreak => Some(indent_lines(THEMATIC_BREAK, indent)),
        Block::Table { align, rows } => render_table(align, rows, indent, ctx),
        Block::MathBlock { value } => {
            // The inner spaces make this block math rather than inline math.
            Some(indent_lines(&format!("$ {} $", value.trim()), indent))
        }
    }
}

fn render_heading(depth: u8, children: &[Inline], indent: usize, ctx: &mut Context<'_>) -> String {
    let level = usize::from(depth.clamp(1, 6));
    let content = render_inlines(children, ctx);
    indent_lines(&format!("{} {}", "=".repeat(level), content), indent)
}

/// Renders paragraph content without indentation.
fn render_paragraph(children: &[Inline], ctx: &mut Context<'_>) -> String {
    let text = plain_text(children, ctx.references());
    if text.trim().to_lowercase() == "[toc]" {
        return OUTLINE.to_string();
    }
    render_inlines(children, ctx)
}

fn render_list(ordered: bool, items: &[ListItem], indent: usize, ctx: &mut Context<'_>) -> String {
    let marker = if ordered {
        ORDERED_MARKER
    } else {
        UNORDERED_MARKER
    };
    let rendered: Vec<_> = items
        .iter()
        .map(|item| Some(render_list_item(item, marker, indent, ctx)))
        .collect();
    join_rendered(rendered, "\n")
}

/// Renders a list item.
///
/// A leading paragraph shares the marker line. Its continuation lines are not
/// re-indented. Every other child goes one level deeper.
fn render_list_item(item: &ListItem, marker: &str, indent: usize, ctx: &mut Context<'_>) -> String {
    let base_indent = "  ".repeat(indent);
    let nested = indent + 1;
    let mut lines = Vec::new();

    let rest = match item.children.split_first() {
        Some((Block::Paragraph { children }, rest)) => {
            lines.push(format!(
                "{base_indent}{marker} {}",
                render_paragraph(children, ctx)
            ));
            rest
        }
        _ => {
            lines.push(format!("{base_indent}{marker}"));
            &item.children[..]
        }
    };

    for child in rest {
        match child {
            Block::List { ordered, items } => {
                lines.push(render_list(*ordered, items, nested, ctx));
            }
            other => {
                if let Some(rendered) = render_block(other, nested, ctx)
                    && !rendered.is_empty()
                {
                    lines.push(rendered);
                }
            }
        }
    }

    lines.join("\n")
}

/// Length of the longest run of consecutive backticks in `value`.
fn longest_backtick_run(value: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in value.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Picks a fence longer than any backtick run inside `value`.
///
/// ```
/// use marktyp_render::renderer::block::code_fence;
///
/// assert_eq!(code_fence("plain"), "```");
/// assert_eq!(code_fence("a ```` b"), "`````");
/// ```
pub fn code_fence(value: &str) -> String {
    "`".repeat((longest_backtick_run(value) + 1).max(3))
}

fn render_code_block(lang: Option<&str>, value: &str, indent: usize) -> String {
    let value = value.strip_suffix('\n').unwrap_or(value);
    let fence = code_fence(value);
    let open = match lang.map(str::trim).filter(|l| !l.is_empty()) {
        Some(lang) => format!("{fence}{lang}"),
        None => fence.clone(),
    };
    [
        indent_lines(&open, indent),
        indent_lines(value, indent),
        indent_lines(&fence, indent),
    ]
    .join("\n")
}

fn render_blockquote(children: &[Block], indent: usize, ctx: &mut Context<'_>) -> String {
    let parts: Vec<_> = children
        .iter()
        .map(|child| render_block(child, 0, ctx))
        .collect();
    let body = join_rendered(parts, "\n\n");

    let open = indent_lines("#quote[", indent);
    let close = indent_lines("]", indent);
    if body.trim().is_empty() {
        return format!("{open}\n{close}");
    }
    [open, indent_lines(&body, indent + 1), close].join("\n")
}

fn align_name(align: Option<Align>) -> &'static str {
    match align {
        Some(Align::Right) => "right",
        Some(Align::Center) => "center",
        Some(Align::Left) | None => "left",
    }
}

fn render_table(
    align: &[Option<Align>],
    rows: &[TableRow],
    indent: usize,
    ctx: &mut Context<'_>,
) -> Option<String> {
    let (header, body) = rows.split_first()?;
    let column_count = header.len();

    let columns = vec!["auto"; column_count].join(", ");
    let aligns = (0..column_count)
        .map(|i| align_name(align.get(i).copied().flatten()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut cells = Vec::new();
    for cell in header {
        cells.push(format!("[*{}*]", render_inlines(cell, ctx)));
    }
    for cell in body.iter().flatten() {
        cells.push(format!("[{}]", render_inlines(cell, ctx)));
    }

    let lines = [
        "#table(".to_string(),
        format!("  columns: ({columns}),"),
        format!("  align: ({aligns}),"),
        format!("  {}", cells.join(", ")),
        ")".to_string(),
    ];
    Some(indent_lines(&lines.join("\n"), indent))
}
