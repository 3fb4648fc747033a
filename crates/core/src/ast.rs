//! Document tree consumed by the Typst renderer.
//!
//! The tree is a closed set of block and inline variants. It is produced once
//! by a front-end (see [`crate::parse`]), optionally rewritten by tree
//! transforms such as [`crate::supersub`], and then only read.

use serde::{Deserialize, Serialize};

/// Root of a parsed document: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level blocks in source order.
    pub children: Vec<Block>,
}

impl Document {
    /// Creates a document from its root blocks.
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

/// Column alignment declared by a table delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    /// `:---`
    Left,
    /// `---:`
    Right,
    /// `:---:`
    Center,
}

/// A table cell is a run of phrasing content.
pub type TableCell = Vec<Inline>;

/// A table row is an ordered list of cells.
pub type TableRow = Vec<TableCell>;

/// One item of a [`Block::List`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Block content of the item.
    pub children: Vec<Block>,
}

impl ListItem {
    /// Creates a list item from its blocks.
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

/// Block-level (flow) content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// Raw YAML-style metadata block.
    Frontmatter {
        /// Text between the fences, without the fences themselves.
        value: String,
    },
    /// `[identifier]: url`
    LinkDefinition {
        /// Identifier as written; matched case-insensitively.
        identifier: String,
        /// Destination URL.
        url: String,
    },
    /// `[^identifier]: body`
    FootnoteDefinition {
        /// Identifier as written; matched case-insensitively.
        identifier: String,
        /// Footnote body.
        children: Vec<Block>,
    },
    /// ATX or setext heading.
    Heading {
        /// Heading rank. Values outside 1..=6 are clamped when rendering.
        depth: u8,
        /// Heading content.
        children: Vec<Inline>,
    },
    /// Paragraph of phrasing content.
    Paragraph {
        /// Paragraph content.
        children: Vec<Inline>,
    },
    /// Ordered or unordered list.
    List {
        /// `true` for `1.` style lists.
        ordered: bool,
        /// List items.
        items: Vec<ListItem>,
    },
    /// Fenced or indented code.
    CodeBlock {
        /// Info string language, if any.
        lang: Option<String>,
        /// Raw code.
        value: String,
    },
    /// `> quote`
    Blockquote {
        /// Quoted blocks.
        children: Vec<Block>,
    },
    /// `***`
    ThematicBreak,
    /// GFM table. The first row is the header row.
    Table {
        /// Declared column alignments; `None` means unspecified.
        align: Vec<Option<Align>>,
        /// Rows, header first.
        rows: Vec<TableRow>,
    },
    /// `$$ ... $$`
    MathBlock {
        /// Raw math source.
        value: String,
    },
}

/// Phrasing (inline) content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    /// Literal text.
    Text {
        /// Text value.
        value: String,
    },
    /// `**strong**`
    Strong {
        /// Content.
        children: Vec<Inline>,
    },
    /// `*emphasis*`
    Emphasis {
        /// Content.
        children: Vec<Inline>,
    },
    /// `~~strike~~`
    Strike {
        /// Content.
        children: Vec<Inline>,
    },
    /// Highlighted (marked) text.
    Highlight {
        /// Content.
        children: Vec<Inline>,
    },
    /// `H~2~O`
    Subscript {
        /// Content.
        children: Vec<Inline>,
    },
    /// `E^2^`
    Superscript {
        /// Content.
        children: Vec<Inline>,
    },
    /// `` `code` ``
    InlineCode {
        /// Raw code.
        value: String,
    },
    /// `$math$`
    InlineMath {
        /// Raw math source.
        value: String,
    },
    /// `[label](url)`
    Link {
        /// Destination URL.
        url: String,
        /// Link label.
        children: Vec<Inline>,
    },
    /// `[label][identifier]`, `[identifier][]` or `[identifier]`
    LinkReference {
        /// Identifier used to look up the definition.
        identifier: String,
        /// Label as written in the source, if the parser kept it.
        label: Option<String>,
        /// Rendered label content.
        children: Vec<Inline>,
    },
    /// `[^identifier]`
    FootnoteReference {
        /// Identifier used to look up the definition.
        identifier: String,
    },
    /// `![alt](url)`
    Image {
        /// Image URL.
        url: String,
        /// Alternative text.
        alt: String,
    },
    /// Hard line break.
    LineBreak,
}

impl Inline {
    /// Creates a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text {
            value: value.into(),
        }
    }

    /// Returns the child sequence of container variants.
    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Inline::Strong { children }
            | Inline::Emphasis { children }
            | Inline::Strike { children }
            | Inline::Highlight { children }
            | Inline::Subscript { children }
            | Inline::Superscript { children }
            | Inline::Link { children, .. }
            | Inline::LinkReference { children, .. } => Some(children),
            _ => None,
        }
    }
}

impl Block {
    /// Creates a paragraph.
    pub fn paragraph(children: Vec<Inline>) -> Self {
        Block::Paragraph { children }
    }

    /// Creates a heading.
    pub fn heading(depth: u8, children: Vec<Inline>) -> Self {
        Block::Heading { depth, children }
    }
}
