use thiserror::Error;

/// Failures surfaced by the compile queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The compiler could not be created or the worker could not start.
    #[error("Compiler setup failed: {0}")]
    Setup(String),
    /// The compiler produced no artifact.
    #[error("{message}")]
    Failed {
        /// Diagnostics joined by newlines, or a fixed fallback when empty.
        message: String,
        /// Diagnostics reported by the compiler.
        diagnostics: Vec<String>,
    },
    /// The worker thread is gone and the request will never complete.
    #[error("Compile worker terminated")]
    WorkerTerminated,
}

impl CompileError {
    /// Diagnostics attached to the failure, if any.
    pub fn diagnostics(&self) -> &[String] {
        match self {
            Self::Failed { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}
