//! Markdown parsing front-end and tree transform hooks.

use crate::ast::{Align, Block, Document, Inline, ListItem};
use crate::supersub::split_supersub;
use crate::{MarktypError, SourceLocation};
use markdown::mdast::{AlignKind, Node};
use markdown::message::{Message, Place};
use std::borrow::Cow;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML frontmatter parsing.
    pub frontmatter: bool,
    /// Enable math constructs ($inline$ and $$block$$).
    pub math: bool,
    /// Split `^sup^` and `~sub~` spans after parsing.
    pub supersub: bool,
}

impl ParseOptions {
    /// Defaults used by the Typst conversion.
    pub const fn typst() -> Self {
        Self {
            gfm: true,
            frontmatter: true,
            math: true,
            supersub: true,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            // `~x~` belongs to the subscript tokenizer.
            gfm_strikethrough_single_tilde: false,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::typst()
    }
}

/// Trait for preprocessing raw markdown text before parsing.
pub trait TextTransform {
    /// Transform the input markdown text, returning an owned or borrowed string.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> TextTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// Trait for rewriting the document tree after parsing.
pub trait TreeTransform {
    /// Mutate the document in place.
    fn transform(&self, doc: &mut Document);
}

impl<F> TreeTransform for F
where
    F: Fn(&mut Document),
{
    fn transform(&self, doc: &mut Document) {
        (self)(doc)
    }
}

/// Configurable parsing pipeline with optional transforms.
pub struct ParserPipeline {
    options: markdown::ParseOptions,
    text_transforms: Vec<Box<dyn TextTransform>>,
    tree_transforms: Vec<Box<dyn TreeTransform>>,
}

impl ParserPipeline {
    /// Create a new pipeline from markdown-rs parse options.
    pub fn new(options: markdown::ParseOptions) -> Self {
        Self {
            options,
            text_transforms: Vec::new(),
            tree_transforms: Vec::new(),
        }
    }

    /// Create the pipeline described by core options, including the
    /// superscript/subscript pass when enabled.
    pub fn from_options(options: &ParseOptions) -> Self {
        let mut pipeline = Self::new(options.to_markdown());
        if options.supersub {
            pipeline.add_tree_transform(split_supersub);
        }
        pipeline
    }

    /// Add a text preprocessor transform.
    pub fn add_text_transform<T: TextTransform + 'static>(&mut self, transform: T) {
        self.text_transforms.push(Box::new(transform));
    }

    /// Add a tree transform.
    pub fn add_tree_transform<T: TreeTransform + 'static>(&mut self, transform: T) {
        self.tree_transforms.push(Box::new(transform));
    }

    /// Parse markdown into a document using the configured pipeline.
    pub fn parse(&self, input: &str) -> Result<Document, MarktypError> {
        let mut current = Cow::Borrowed(input);
        for transform in &self.text_transforms {
            let next = transform.transform(current.as_ref());
            current = Cow::Owned(next.into_owned());
        }

        let root = markdown::to_mdast(&current, &self.options).map_err(|err| {
            MarktypError::MarkdownAdapter {
                message: err.to_string(),
                location: message_location(&err),
            }
        })?;

        let mut doc = match root {
            Node::Root(root) => Document::new(convert_blocks(&root.children)),
            other => {
                return Err(MarktypError::InternalError(format!(
                    "expected document root, got {other:?}"
                )));
            }
        };

        for transform in &self.tree_transforms {
            transform.transform(&mut doc);
        }

        Ok(doc)
    }
}

/// Parse markdown into a document tree using core options.
pub fn parse_document(input: &str, options: &ParseOptions) -> Result<Document, MarktypError> {
    ParserPipeline::from_options(options).parse(input)
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

fn convert_blocks(nodes: &[Node]) -> Vec<Block> {
    nodes.iter().filter_map(convert_block).collect()
}

fn convert_block(node: &Node) -> Option<Block> {
    let block = match node {
        Node::Yaml(yaml) => Block::Frontmatter {
            value: yaml.value.clone(),
        },
        Node::Definition(def) => Block::LinkDefinition {
            identifier: def.identifier.clone(),
            url: def.url.clone(),
        },
        Node::FootnoteDefinition(def) => Block::FootnoteDefinition {
            identifier: def.identifier.clone(),
            children: convert_blocks(&def.children),
        },
        Node::Heading(heading) => Block::Heading {
            depth: heading.depth,
            children: convert_inlines(&heading.children),
        },
        Node::Paragraph(para) => Block::Paragraph {
            children: convert_inlines(&para.children),
        },
        Node::List(list) => Block::List {
            ordered: list.ordered,
            items: list
                .children
                .iter()
                .filter_map(|child| match child {
                    Node::ListItem(item) => Some(ListItem::new(convert_blocks(&item.children))),
                    _ => None,
                })
                .collect(),
        },
        Node::Code(code) => Block::CodeBlock {
            lang: code.lang.clone(),
            value: code.value.clone(),
        },
        Node::Blockquote(quote) => Block::Blockquote {
            children: convert_blocks(&quote.children),
        },
        Node::ThematicBreak(_) => Block::ThematicBreak,
        Node::Table(table) => Block::Table {
            align: table.align.iter().map(convert_align).collect(),
            rows: table
                .children
                .iter()
                .filter_map(|row| match row {
                    Node::TableRow(row) => Some(
                        row.children
                            .iter()
                            .filter_map(|cell| match cell {
                                Node::TableCell(cell) => Some(convert_inlines(&cell.children)),
                                _ => None,
                            })
                            .collect(),
                    ),
                    _ => None,
                })
                .collect(),
        },
        Node::Math(math) => Block::MathBlock {
            value: math.value.clone(),
        },
        other => {
            log::debug!("Dropping markdown block without a Typst equivalent: {other:?}");
            return None;
        }
    };
    Some(block)
}

fn convert_align(align: &AlignKind) -> Option<Align> {
    match align {
        AlignKind::Left => Some(Align::Left),
        AlignKind::Right => Some(Align::Right),
        AlignKind::Center => Some(Align::Center),
        AlignKind::None => None,
    }
}

fn convert_inlines(nodes: &[Node]) -> Vec<Inline> {
    nodes.iter().filter_map(convert_inline).collect()
}

fn convert_inline(node: &Node) -> Option<Inline> {
    let inline = match node {
        Node::Text(text) => Inline::text(text.value.clone()),
        Node::Strong(strong) => Inline::Strong {
            children: convert_inlines(&strong.children),
        },
        Node::Emphasis(emphasis) => Inline::Emphasis {
            children: convert_inlines(&emphasis.children),
        },
        Node::Delete(delete) => Inline::Strike {
            children: convert_inlines(&delete.children),
        },
        Node::InlineCode(code) => Inline::InlineCode {
            value: code.value.clone(),
        },
        Node::InlineMath(math) => Inline::InlineMath {
            value: math.value.clone(),
        },
        Node::Link(link) => Inline::Link {
            url: link.url.clone(),
            children: convert_inlines(&link.children),
        },
        Node::LinkReference(reference) => Inline::LinkReference {
            identifier: reference.identifier.clone(),
            label: reference.label.clone(),
            children: convert_inlines(&reference.children),
        },
        Node::FootnoteReference(reference) => Inline::FootnoteReference {
            identifier: reference.identifier.clone(),
        },
        Node::Image(image) => Inline::Image {
            url: image.url.clone(),
            alt: image.alt.clone(),
        },
        Node::Break(_) => Inline::LineBreak,
        other => {
            log::debug!("Dropping markdown inline without a Typst equivalent: {other:?}");
            return None;
        }
    };
    Some(inline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Document {
        parse_document(input, &ParseOptions::default()).expect("markdown should parse")
    }

    #[test]
    fn converts_heading_and_paragraph() {
        let doc = parse("# Hello\n\nWorld");
        assert_eq!(
            doc.children,
            vec![
                Block::heading(1, vec![Inline::text("Hello")]),
                Block::paragraph(vec![Inline::text("World")]),
            ]
        );
    }

    #[test]
    fn keeps_frontmatter_raw() {
        let doc = parse("---\ntitle: T\n---\n\nBody");
        assert_eq!(
            doc.children[0],
            Block::Frontmatter {
                value: "title: T".to_string()
            }
        );
    }

    #[test]
    fn single_tilde_becomes_subscript_not_strike() {
        let doc = parse("H~2~O and ~~gone~~");
        let Block::Paragraph { children } = &doc.children[0] else {
            panic!("expected paragraph");
        };
        assert!(matches!(children[1], Inline::Subscript { .. }));
        assert!(children.iter().any(|c| matches!(c, Inline::Strike { .. })));
    }

    #[test]
    fn supersub_can_be_disabled() {
        let options = ParseOptions {
            supersub: false,
            ..ParseOptions::default()
        };
        let doc = parse_document("E^2^", &options).unwrap();
        assert_eq!(
            doc.children,
            vec![Block::paragraph(vec![Inline::text("E^2^")])]
        );
    }

    #[test]
    fn converts_table_alignment() {
        let doc = parse("| A | B | C |\n|:--|--:|---|\n| 1 | 2 | 3 |");
        let Block::Table { align, rows } = &doc.children[0] else {
            panic!("expected table");
        };
        assert_eq!(align, &vec![Some(Align::Left), Some(Align::Right), None]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], vec![Inline::text("A")]);
    }

    #[test]
    fn converts_references_and_definitions() {
        let doc = parse("See [docs][Ref] and note[^n].\n\n[ref]: https://example.com\n\n[^n]: Body");
        assert!(doc.children.iter().any(|b| matches!(
            b,
            Block::LinkDefinition { url, .. } if url == "https://example.com"
        )));
        assert!(
            doc.children
                .iter()
                .any(|b| matches!(b, Block::FootnoteDefinition { .. }))
        );
    }

    #[test]
    fn math_blocks_and_inline_math() {
        let doc = parse("$$\na^2\n$$\n\nInline $x$ here");
        assert_eq!(
            doc.children[0],
            Block::MathBlock {
                value: "a^2".to_string()
            }
        );
        let Block::Paragraph { children } = &doc.children[1] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            children[1],
            Inline::InlineMath {
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn pipeline_runs_text_transforms_first() {
        fn expand_title(input: &str) -> Cow<'_, str> {
            Cow::Owned(input.replace("TITLE", "# Real"))
        }

        let mut pipeline = ParserPipeline::new(ParseOptions::default().to_markdown());
        pipeline.add_text_transform(expand_title);
        let doc = pipeline.parse("TITLE").unwrap();
        assert_eq!(
            doc.children,
            vec![Block::heading(1, vec![Inline::text("Real")])]
        );
    }

    #[test]
    fn drops_raw_html() {
        let doc = parse("<div>raw</div>\n\nKept");
        assert_eq!(
            doc.children,
            vec![Block::paragraph(vec![Inline::text("Kept")])]
        );
    }
}
