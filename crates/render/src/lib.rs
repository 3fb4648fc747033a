#![deny(missing_docs)]
//! marktyp rendering engine: document tree to Typst, template registry, and
//! the compile queue that feeds a Typst compiler.

/// Final document assembly (template import and show rule).
pub mod codegen;
/// Escaping for Typst markup and string literals.
pub mod escape;
/// Style identifier → template mappings.
pub mod registry;
/// Block and inline rendering.
pub mod renderer;
/// FIFO compile queue in front of a stateful compiler.
#[cfg(feature = "queue")]
pub mod queue;

pub use registry::{DEFAULT_STYLE, TemplateDefinition, TemplateRegistry, default_registry};
pub use renderer::{
    Lang, Options, RenderOutput, RenderWarning, markdown_to_typst, render_document,
    render_document_with,
};
