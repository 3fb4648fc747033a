#![deny(missing_docs)]
//! marktyp core: document tree, frontmatter reader, Markdown front-end, and
//! the superscript/subscript tokenizer.

/// Document tree types.
pub mod ast;
/// Core error types.
pub mod error;
/// Line-oriented frontmatter reader.
pub mod frontmatter;
/// Markdown parsing utilities and tree transform hooks.
pub mod parse;
/// `^sup^` / `~sub~` span tokenizer.
pub mod supersub;

pub use ast::{Align, Block, Document, Inline, ListItem, TableCell, TableRow};
pub use error::{MarktypError, SourceLocation};
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use parse::{
    ParseOptions, ParserPipeline, TextTransform, TreeTransform, parse_document,
};
pub use supersub::split_supersub;
