//! Title, author, and language resolution.

use super::Options;
use super::references::References;
use super::text::plain_text;
use super::types::Lang;
use marktyp_core::{Block, Document, Frontmatter, parse_frontmatter};

/// A level-1 heading that opens the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingTitle {
    /// Trimmed plain text of the heading.
    pub text: String,
    /// Index of the heading among the root blocks.
    pub index: usize,
}

/// Final document metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    /// Title, possibly empty.
    pub title: String,
    /// Authors, possibly empty.
    pub authors: Vec<String>,
    /// Language tag.
    pub lang: Lang,
    /// Root index of the heading that duplicates the title and must be left
    /// out of the body.
    pub excluded_heading: Option<usize>,
}

/// Reads the first frontmatter block at the root, if any.
pub fn document_frontmatter(doc: &Document) -> Frontmatter {
    doc.children
        .iter()
        .find_map(|block| match block {
            Block::Frontmatter { value } => Some(parse_frontmatter(value)),
            _ => None,
        })
        .unwrap_or_default()
}

/// Finds a level-1 heading that is the first root block other than
/// frontmatter and link definitions.
///
/// Any other block before it disqualifies detection entirely.
pub fn find_leading_title(blocks: &[Block], refs: &References<'_>) -> Option<LeadingTitle> {
    let (index, block) = blocks
        .iter()
        .enumerate()
        .find(|(_, b)| !matches!(b, Block::Frontmatter { .. } | Block::LinkDefinition { .. }))?;

    let Block::Heading { depth: 1, children } = block else {
        return None;
    };

    let text = plain_text(children, refs).trim().to_string();
    if text.is_empty() {
        return None;
    }
    Some(LeadingTitle { text, index })
}

/// Maps a free-form language value onto a supported tag by prefix.
///
/// ```
/// use marktyp_render::renderer::title::coerce_lang;
/// use marktyp_render::Lang;
///
/// assert_eq!(coerce_lang(" zh-Hans "), Some(Lang::Zh));
/// assert_eq!(coerce_lang("EN"), Some(Lang::En));
/// assert_eq!(coerce_lang("fr"), None);
/// ```
pub fn coerce_lang(value: &str) -> Option<Lang> {
    let v = value.trim().to_lowercase();
    if v.starts_with("zh") {
        Some(Lang::Zh)
    } else if v.starts_with("en") {
        Some(Lang::En)
    } else {
        None
    }
}

/// Merges caller options, frontmatter, and the leading heading.
pub fn resolve_metadata(
    doc: &Document,
    options: &Options,
    refs: &References<'_>,
) -> ResolvedMetadata {
    let frontmatter = document_frontmatter(doc);
    let leading = find_leading_title(&doc.children, refs);

    let lang = options
        .lang
        .or_else(|| frontmatter.lang.as_deref().and_then(coerce_lang))
        .unwrap_or_default();

    let title = options
        .title
        .clone()
        .or(frontmatter.title)
        .or_else(|| leading.as_ref().map(|l| l.text.clone()))
        .unwrap_or_default();

    let authors = options
        .authors
        .clone()
        .or(frontmatter.authors)
        .unwrap_or_default();

    let excluded_heading = leading
        .filter(|l| l.text.trim() == title.trim())
        .map(|l| l.index);

    ResolvedMetadata {
        title,
        authors,
        lang,
        excluded_heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marktyp_core::Inline;

    fn h(depth: u8, text: &str) -> Block {
        Block::heading(depth, vec![Inline::text(text)])
    }

    fn p(text: &str) -> Block {
        Block::paragraph(vec![Inline::text(text)])
    }

    fn fm(value: &str) -> Block {
        Block::Frontmatter {
            value: value.to_string(),
        }
    }

    fn resolve(blocks: Vec<Block>, options: &Options) -> ResolvedMetadata {
        let doc = Document::new(blocks);
        let refs = References::collect(&doc.children);
        resolve_metadata(&doc, options, &refs)
    }

    #[test]
    fn leading_heading_becomes_title_and_is_excluded() {
        let meta = resolve(vec![h(1, " Hello "), p("World")], &Options::default());
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.excluded_heading, Some(0));
        assert_eq!(meta.lang, Lang::Zh);
        assert!(meta.authors.is_empty());
    }

    #[test]
    fn detection_skips_frontmatter_and_link_definitions_only() {
        let def = Block::LinkDefinition {
            identifier: "a".to_string(),
            url: "https://a".to_string(),
        };
        let meta = resolve(vec![fm("lang: en"), def, h(1, "T")], &Options::default());
        assert_eq!(meta.excluded_heading, Some(2));
        assert_eq!(meta.lang, Lang::En);

        let meta = resolve(vec![p("intro"), h(1, "T")], &Options::default());
        assert_eq!(meta.title, "");
        assert_eq!(meta.excluded_heading, None);
    }

    #[test]
    fn level_two_heading_is_not_a_title() {
        let meta = resolve(vec![h(2, "Sub")], &Options::default());
        assert_eq!(meta.title, "");
        assert_eq!(meta.excluded_heading, None);
    }

    #[test]
    fn empty_heading_is_not_a_title() {
        let meta = resolve(vec![h(1, "   ")], &Options::default());
        assert_eq!(meta.excluded_heading, None);
    }

    #[test]
    fn explicit_title_keeps_heading_unless_equal() {
        let options = Options {
            title: Some("Other".to_string()),
            ..Options::default()
        };
        let meta = resolve(vec![h(1, "Hello")], &options);
        assert_eq!(meta.title, "Other");
        assert_eq!(meta.excluded_heading, None);

        let options = Options {
            title: Some("  Hello".to_string()),
            ..Options::default()
        };
        let meta = resolve(vec![h(1, "Hello")], &options);
        assert_eq!(meta.excluded_heading, Some(0));
    }

    #[test]
    fn title_comparison_is_case_sensitive() {
        let options = Options {
            title: Some("hello".to_string()),
            ..Options::default()
        };
        let meta = resolve(vec![h(1, "Hello")], &options);
        assert_eq!(meta.excluded_heading, None);
    }

    #[test]
    fn frontmatter_title_and_authors() {
        let meta = resolve(
            vec![
                fm("title: From FM\nauthors: [A, B]\nlang: fr"),
                h(1, "From FM"),
            ],
            &Options::default(),
        );
        assert_eq!(meta.title, "From FM");
        assert_eq!(meta.authors, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(meta.lang, Lang::Zh);
        assert_eq!(meta.excluded_heading, Some(1));
    }

    #[test]
    fn explicit_options_win_over_frontmatter() {
        let options = Options {
            authors: Some(vec!["Caller".to_string()]),
            lang: Some(Lang::Zh),
            ..Options::default()
        };
        let meta = resolve(vec![fm("author: FM\nlang: en")], &options);
        assert_eq!(meta.authors, vec!["Caller".to_string()]);
        assert_eq!(meta.lang, Lang::Zh);
    }
}
