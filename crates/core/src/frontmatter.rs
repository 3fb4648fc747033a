//! Restricted, line-oriented frontmatter reader.
//!
//! Only the fields that drive document metadata are recognized: `lang` /
//! `language`, `title`, `author` and `authors`. Everything else is ignored and
//! the reader never fails.

/// Metadata fields read from a frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Raw language scalar (coerced later by the title resolver).
    pub lang: Option<String>,
    /// Document title.
    pub title: Option<String>,
    /// Author list from `author:` or `authors:`.
    pub authors: Option<Vec<String>>,
}

impl Frontmatter {
    /// Returns true when no field was recognized.
    pub fn is_empty(&self) -> bool {
        self.lang.is_none() && self.title.is_none() && self.authors.is_none()
    }
}

/// Parses the raw text of a frontmatter block.
///
/// The first occurrence of each field wins. A scalar that unquotes to an empty
/// string does not count as an occurrence for `lang` and `title`, so a later
/// line may still provide them.
pub fn parse_frontmatter(raw: &str) -> Frontmatter {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let mut result = Frontmatter::default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        i += 1;

        let Some((key, rest)) = split_key(line) else {
            continue;
        };

        match key {
            "lang" | "language" if is_unset(&result.lang) && !rest.is_empty() => {
                result.lang = Some(unquote_scalar(rest));
            }
            "title" if is_unset(&result.title) && !rest.is_empty() => {
                result.title = Some(unquote_scalar(rest));
            }
            "author" if result.authors.is_none() && !rest.is_empty() => {
                result.authors = Some(non_empty(vec![unquote_scalar(rest)]));
            }
            "authors" if result.authors.is_none() => {
                let inline = rest.trim();
                if !inline.is_empty() {
                    result.authors = Some(parse_inline_list(inline));
                    continue;
                }

                let mut list = Vec::new();
                while let Some(item) = lines.get(i).and_then(|l| block_list_item(l)) {
                    list.push(unquote_scalar(item));
                    i += 1;
                }
                result.authors = Some(non_empty(list));
            }
            _ => {}
        }
    }

    result
}

/// Strips one matching pair of surrounding quotes and trims whitespace.
///
/// ```
/// use marktyp_core::frontmatter::unquote_scalar;
///
/// assert_eq!(unquote_scalar("  \"Ada Lovelace\" "), "Ada Lovelace");
/// assert_eq!(unquote_scalar("'x'"), "x");
/// assert_eq!(unquote_scalar("\"mismatched'"), "\"mismatched'");
/// ```
pub fn unquote_scalar(value: &str) -> String {
    let v = value.trim();
    let quoted = v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')));
    if quoted {
        v[1..v.len() - 1].trim().to_string()
    } else {
        v.to_string()
    }
}

/// Splits `key: rest`, returning the key and everything after the colon.
fn split_key(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, rest))
}

/// Parses `[a, b, c]` or a bare scalar into a list.
fn parse_inline_list(value: &str) -> Vec<String> {
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        let inner = &value[1..value.len() - 1];
        return non_empty(inner.split(',').map(unquote_scalar).collect());
    }
    non_empty(vec![unquote_scalar(value)])
}

/// Returns the item text of a `- item` line.
fn block_list_item(line: &str) -> Option<&str> {
    let item = line.trim_start().strip_prefix('-')?;
    if item.is_empty() {
        return None;
    }
    Some(item)
}

fn non_empty(values: Vec<String>) -> Vec<String> {
    values.into_iter().filter(|v| !v.is_empty()).collect()
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
