//! Style identifier → Typst template mappings.

pub mod defaults;
mod types;

pub use defaults::{DEFAULT_STYLE, default_registry};
pub use types::{TemplateDefinition, TemplateRegistry};
