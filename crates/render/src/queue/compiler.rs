//! Seams for the external Typst compiler.

use super::error::CompileError;

/// Capabilities requested when creating a compiler instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilerFeatures {
    /// Load fonts covering Chinese, Japanese, and Korean text.
    pub cjk: bool,
}

/// What a single compile run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    /// PDF bytes, absent when compilation failed.
    pub artifact: Option<Vec<u8>>,
    /// Diagnostics in the order the compiler reported them.
    pub diagnostics: Vec<String>,
}

/// A stateful Typst compiler with an in-memory file registry.
///
/// Instances are not shared between threads; the queue keeps one on its
/// worker and feeds it one request at a time.
pub trait TypstCompiler {
    /// Registers or replaces a text source at `path`.
    fn add_source(&mut self, path: &str, text: &str);
    /// Registers or replaces a binary asset at `path`.
    fn add_asset(&mut self, path: &str, bytes: &[u8]);
    /// Compiles the document registered at `main_path`.
    fn compile(&mut self, main_path: &str) -> CompileOutput;
}

/// Creates compiler instances on the worker thread.
pub trait CompilerFactory: Send + 'static {
    /// Builds a compiler with the given capabilities.
    fn create(&self, features: &CompilerFeatures) -> Result<Box<dyn TypstCompiler>, CompileError>;
}

impl<F> CompilerFactory for F
where
    F: Fn(&CompilerFeatures) -> Result<Box<dyn TypstCompiler>, CompileError> + Send + 'static,
{
    fn create(&self, features: &CompilerFeatures) -> Result<Box<dyn TypstCompiler>, CompileError> {
        self(features)
    }
}

/// A template file registered with every new compiler instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Absolute path inside the compiler's file registry.
    pub path: String,
    /// Typst source text.
    pub text: String,
}

impl TemplateSource {
    /// Creates a template source.
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Whether `text` contains characters that need CJK fonts.
///
/// ```
/// use marktyp_render::queue::contains_cjk;
///
/// assert!(contains_cjk("标题 Title"));
/// assert!(contains_cjk("カタカナ"));
/// assert!(!contains_cjk("Plain ASCII, accents: é"));
/// ```
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(
            c,
            '\u{3000}'..='\u{303F}'
                | '\u{3040}'..='\u{30FF}'
                | '\u{3400}'..='\u{4DBF}'
                | '\u{4E00}'..='\u{9FFF}'
                | '\u{AC00}'..='\u{D7AF}'
                | '\u{F900}'..='\u{FAFF}'
                | '\u{FF00}'..='\u{FFEF}'
                | '\u{20000}'..='\u{2A6DF}'
        )
    })
}
