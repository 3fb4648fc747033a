//! Link and footnote definition lookup tables.

use marktyp_core::Block;
use std::collections::HashMap;

/// Definitions declared at the document root, keyed by lower-cased identifier.
#[derive(Debug, Default)]
pub struct References<'a> {
    links: HashMap<String, &'a str>,
    footnotes: HashMap<String, &'a [Block]>,
}

impl<'a> References<'a> {
    /// Indexes the root block sequence. Nested definitions are not collected.
    ///
    /// When an identifier is declared more than once, the last declaration wins.
    pub fn collect(blocks: &'a [Block]) -> Self {
        let mut references = Self::default();
        for block in blocks {
            match block {
                Block::LinkDefinition { identifier, url } => {
                    references.links.insert(identifier.to_lowercase(), url);
                }
                Block::FootnoteDefinition {
                    identifier,
                    children,
                } => {
                    references
                        .footnotes
                        .insert(identifier.to_lowercase(), children);
                }
                _ => {}
            }
        }
        references
    }

    /// URL of the link definition for `identifier`.
    pub fn link_url(&self, identifier: &str) -> Option<&'a str> {
        self.links.get(&identifier.to_lowercase()).copied()
    }

    /// Body of the footnote definition for `identifier`.
    pub fn footnote(&self, identifier: &str) -> Option<&'a [Block]> {
        self.footnotes.get(&identifier.to_lowercase()).copied()
    }
}
