//! Inline (phrasing) rendering.

use super::block::render_block;
use super::context::{Context, join_rendered};
use super::text::literal_label;
use super::types::RenderWarning;
use crate::escape::{escape_string, escape_text};
use marktyp_core::Inline;

/// Renders a run of phrasing content. Dropped nodes contribute nothing.
pub fn render_inlines(nodes: &[Inline], ctx: &mut Context<'_>) -> String {
    let mut out = String::new();
    for node in nodes {
        if let Some(rendered) = render_inline(node, ctx) {
            out.push_str(&rendered);
        }
    }
    out
}

/// Renders a single inline node, or `None` when it is dropped.
pub fn render_inline(node: &Inline, ctx: &mut Context<'_>) -> Option<String> {
    let rendered = match node {
        Inline::Text { value } => escape_text(value),
        Inline::Strong { children } => format!("*{}*", render_inlines(children, ctx)),
        Inline::Emphasis { children } => format!("_{}_", render_inlines(children, ctx)),
        Inline::Strike { children } => format!("#strike[{}]", render_inlines(children, ctx)),
        Inline::Highlight { children } => {
            format!("#highlight[{}]", render_inlines(children, ctx))
        }
        Inline::Subscript { children } => format!("#sub[{}]", render_inlines(children, ctx)),
        Inline::Superscript { children } => {
            format!("#super[{}]", render_inlines(children, ctx))
        }
        Inline::FootnoteReference { identifier } => return render_footnote(identifier, ctx),
        Inline::InlineCode { value } => format!("`{}`", value.replace('`', "\\`")),
        Inline::InlineMath { value } => format!("${}$", value.trim()),
        // Alt text has no counterpart in the emitted image call.
        Inline::Image { url, .. } => format!("#image(\"{}\")", escape_string(url)),
        Inline::Link { url, children } => {
            let label = render_inlines(children, ctx);
            hyperlink(url, label)
        }
        Inline::LinkReference {
            identifier,
            label,
            children,
        } => {
            let rendered_label = render_inlines(children, ctx);
            match ctx.references().link_url(identifier) {
                Some(url) => hyperlink(url, rendered_label),
                None => {
                    ctx.warn(RenderWarning::UnresolvedLink {
                        identifier: identifier.clone(),
                    });
                    if rendered_label.is_empty() {
                        escape_text(literal_label(label.as_deref(), identifier))
                    } else {
                        rendered_label
                    }
                }
            }
        }
        Inline::LineBreak => "\\\n".to_string(),
    };
    Some(rendered)
}

/// `#link("url")[label]`, using the URL as label when the label is blank.
fn hyperlink(url: &str, label: String) -> String {
    let label = if label.trim().is_empty() {
        escape_text(url)
    } else {
        label
    };
    format!("#link(\"{}\")[{}]", escape_string(url), label)
}

/// Expands a footnote body onto a single line.
fn render_footnote(identifier: &str, ctx: &mut Context<'_>) -> Option<String> {
    let Some(blocks) = ctx.references().footnote(identifier) else {
        ctx.warn(RenderWarning::UnresolvedFootnote {
            identifier: identifier.to_string(),
        });
        return None;
    };

    let key = identifier.to_lowercase();
    if !ctx.enter_footnote(&key) {
        ctx.warn(RenderWarning::RecursiveFootnote {
            identifier: identifier.to_string(),
        });
        return None;
    }
    let parts: Vec<_> = blocks.iter().map(|b| render_block(b, 0, ctx)).collect();
    ctx.exit_footnote();

    Some(format!("#footnote[{}]", join_rendered(parts, " ").trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::references::References;
    use marktyp_core::Block;

    fn render_with(blocks: &[Block], nodes: &[Inline]) -> (String, Vec<RenderWarning>) {
        let mut ctx = Context::new(References::collect(blocks));
        let out = render_inlines(nodes, &mut ctx);
        (out, ctx.finish())
    }

    fn render(nodes: &[Inline]) -> String {
        render_with(&[], nodes).0
    }

    fn text(value: &str) -> Inline {
        Inline::text(value)
    }

    #[test]
    fn formatting_wrappers() {
        let nodes = vec![
            Inline::Strong {
                children: vec![text("b")],
            },
            Inline::Emphasis {
                children: vec![text("i")],
            },
            Inline::Strike {
                children: vec![text("s")],
            },
            Inline::Highlight {
                children: vec![text("h")],
            },
            Inline::Subscript {
                children: vec![text("2")],
            },
            Inline::Superscript {
                children: vec![text("n")],
            },
        ];
        assert_eq!(
            render(&nodes),
            "*b*_i_#strike[s]#highlight[h]#sub[2]#super[n]"
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(render(&[text("50$ #1 *x*")]), "50\\$ \\#1 \\*x\\*");
    }

    #[test]
    fn inline_code_escapes_backticks_without_growing() {
        let node = Inline::InlineCode {
            value: "a`b``c".to_string(),
        };
        assert_eq!(render(&[node]), "`a\\`b\\`\\`c`");
    }

    #[test]
    fn inline_math_is_trimmed() {
        let node = Inline::InlineMath {
            value: " x^2 ".to_string(),
        };
        assert_eq!(render(&[node]), "$x^2$");
    }

    #[test]
    fn image_uses_url_only() {
        let node = Inline::Image {
            url: "img/a \"b\".png".to_string(),
            alt: "ignored".to_string(),
        };
        assert_eq!(render(&[node]), "#image(\"img/a \\\"b\\\".png\")");
    }

    #[test]
    fn link_with_and_without_label() {
        let labeled = Inline::Link {
            url: "https://x.dev/a_b".to_string(),
            children: vec![text("site")],
        };
        assert_eq!(render(&[labeled]), "#link(\"https://x.dev/a_b\")[site]");

        let bare = Inline::Link {
            url: "https://x.dev/a_b".to_string(),
            children: vec![text(" ")],
        };
        assert_eq!(
            render(&[bare]),
            "#link(\"https://x.dev/a_b\")[https://x.dev/a\\_b]"
        );
    }

    #[test]
    fn link_reference_resolves_last_definition_case_insensitively() {
        let blocks = vec![
            Block::LinkDefinition {
                identifier: "Docs".to_string(),
                url: "https://old".to_string(),
            },
            Block::LinkDefinition {
                identifier: "DOCS".to_string(),
                url: "https://new".to_string(),
            },
        ];
        let node = Inline::LinkReference {
            identifier: "docs".to_string(),
            label: Some("docs".to_string()),
            children: vec![text("the docs")],
        };
        let (out, warnings) = render_with(&blocks, &[node]);
        assert_eq!(out, "#link(\"https://new\")[the docs]");
        assert!(warnings.is_empty());
    }

    #[test]
    fn resolved_reference_with_empty_label_shows_url() {
        let blocks = vec![Block::LinkDefinition {
            identifier: "a".to_string(),
            url: "https://a".to_string(),
        }];
        let node = Inline::LinkReference {
            identifier: "a".to_string(),
            label: None,
            children: vec![],
        };
        assert_eq!(
            render_with(&blocks, &[node]).0,
            "#link(\"https://a\")[https://a]"
        );
    }

    #[test]
    fn unresolved_reference_degrades_to_text() {
        let labeled = Inline::LinkReference {
            identifier: "missing".to_string(),
            label: Some("Missing".to_string()),
            children: vec![text("shown")],
        };
        let (out, warnings) = render_with(&[], &[labeled]);
        assert_eq!(out, "shown");
        assert_eq!(
            warnings,
            vec![RenderWarning::UnresolvedLink {
                identifier: "missing".to_string()
            }]
        );

        let empty = Inline::LinkReference {
            identifier: "my_ref".to_string(),
            label: None,
            children: vec![],
        };
        assert_eq!(render(&[empty]), "my\\_ref");
    }

    #[test]
    fn footnote_body_is_flattened_to_one_line() {
        let blocks = vec![Block::FootnoteDefinition {
            identifier: "Note".to_string(),
            children: vec![
                Block::paragraph(vec![text("First.")]),
                Block::paragraph(vec![text("Second.")]),
            ],
        }];
        let nodes = vec![
            text("Claim"),
            Inline::FootnoteReference {
                identifier: "note".to_string(),
            },
        ];
        assert_eq!(
            render_with(&blocks, &nodes).0,
            "Claim#footnote[First. Second.]"
        );
    }

    #[test]
    fn missing_footnote_renders_nothing() {
        let nodes = vec![
            text("a "),
            Inline::FootnoteReference {
                identifier: "none".to_string(),
            },
            text("b"),
        ];
        let (out, warnings) = render_with(&[], &nodes);
        assert_eq!(out, "a b");
        assert_eq!(
            warnings,
            vec![RenderWarning::UnresolvedFootnote {
                identifier: "none".to_string()
            }]
        );
    }

    #[test]
    fn self_referencing_footnote_terminates() {
        let blocks = vec![Block::FootnoteDefinition {
            identifier: "loop".to_string(),
            children: vec![Block::paragraph(vec![
                text("again"),
                Inline::FootnoteReference {
                    identifier: "LOOP".to_string(),
                },
            ])],
        }];
        let node = Inline::FootnoteReference {
            identifier: "loop".to_string(),
        };
        let (out, warnings) = render_with(&blocks, &[node]);
        assert_eq!(out, "#footnote[again]");
        assert_eq!(
            warnings,
            vec![RenderWarning::RecursiveFootnote {
                identifier: "LOOP".to_string()
            }]
        );
    }

    #[test]
    fn line_break_is_backslash_newline() {
        let nodes = vec![text("a"), Inline::LineBreak, text("b")];
        assert_eq!(render(&nodes), "a\\\nb");
    }
}
