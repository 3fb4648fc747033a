//! Escaping helpers for Typst markup and string literals.

/// Escapes prose for Typst markup mode.
///
/// Only characters that collide with constructs the renderer itself emits are
/// escaped: `\ # * _ ` [ ] $`.
///
/// # Examples
///
/// ```
/// use marktyp_render::escape::escape_text;
///
/// assert_eq!(escape_text("a*b_c"), "a\\*b\\_c");
/// assert_eq!(escape_text("#[x]"), "\\#\\[x\\]");
/// assert_eq!(escape_text("<@ok>"), "<@ok>");
/// ```
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '#' | '*' | '_' | '`' | '[' | ']' | '$') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Escapes a value for use inside a double-quoted Typst string literal.
///
/// # Examples
///
/// ```
/// use marktyp_render::escape::escape_string;
///
/// assert_eq!(escape_string("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape_string("a\\b"), "a\\\\b");
/// assert_eq!(escape_string("line1\nline2"), "line1\\nline2");
/// ```
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Quotes a value as a Typst string literal.
pub fn quote_string(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}
