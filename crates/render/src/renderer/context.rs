//! Rendering context for the Typst renderer.

use super::references::References;
use super::types::RenderWarning;

/// Prefixes every line of `text` with two spaces per indent level.
pub(super) fn indent_lines(text: &str, level: usize) -> String {
    if level == 0 {
        return text.to_string();
    }
    let indent = "  ".repeat(level);
    text.split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Joins rendered blocks, skipping dropped and empty results.
pub(super) fn join_rendered<I>(parts: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// State shared by the block and inline renderers during one conversion.
pub struct Context<'a> {
    references: References<'a>,
    warnings: Vec<RenderWarning>,
    /// Lower-cased identifiers of footnotes currently being expanded.
    footnote_stack: Vec<String>,
}

impl<'a> Context<'a> {
    /// Creates a context over the document's definition tables.
    pub fn new(references: References<'a>) -> Self {
        Self {
            references,
            warnings: Vec::new(),
            footnote_stack: Vec::new(),
        }
    }

    /// Definition tables collected from the document root.
    pub fn references(&self) -> &References<'a> {
        &self.references
    }

    /// Records a non-fatal substitution.
    pub fn warn(&mut self, warning: RenderWarning) {
        log::debug!("{warning}");
        self.warnings.push(warning);
    }

    /// Marks a footnote as being expanded. Returns false if it already is.
    pub fn enter_footnote(&mut self, key: &str) -> bool {
        if self.footnote_stack.iter().any(|k| k == key) {
            return false;
        }
        self.footnote_stack.push(key.to_string());
        true
    }

    /// Leaves the innermost footnote expansion.
    pub fn exit_footnote(&mut self) {
        self.footnote_stack.pop();
    }

    /// Consumes the context and returns collected warnings.
    pub fn finish(self) -> Vec<RenderWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_prefixes_every_line_including_blank_ones() {
        assert_eq!(indent_lines("a\n\nb", 1), "  a\n  \n  b");
        assert_eq!(indent_lines("a\nb", 0), "a\nb");
        assert_eq!(indent_lines("x", 3), "      x");
    }

    #[test]
    fn join_skips_none_and_empty() {
        let parts = vec![Some("a".to_string()), None, Some(String::new()), Some("b".to_string())];
        assert_eq!(join_rendered(parts, "\n\n"), "a\n\nb");
    }

    #[test]
    fn footnote_stack_detects_reentry() {
        let mut ctx = Context::new(References::default());
        assert!(ctx.enter_footnote("a"));
        assert!(!ctx.enter_footnote("a"));
        assert!(ctx.enter_footnote("b"));
        ctx.exit_footnote();
        ctx.exit_footnote();
        assert!(ctx.enter_footnote("a"));
    }
}
