//! Request and response messages exchanged with the compile worker.

use super::error::CompileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A request to compile one Typst document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    /// Caller-chosen identifier echoed in the response.
    pub id: String,
    /// Full Typst source of the main document.
    pub main_typst: String,
    /// Binary assets (images) keyed by the path the markup refers to.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub assets: BTreeMap<String, Vec<u8>>,
}

impl CompileRequest {
    /// Creates a request with a fresh random id and no assets.
    pub fn new(main_typst: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            main_typst: main_typst.into(),
            assets: BTreeMap::new(),
        }
    }

    /// Adds an asset, replacing any previous one at the same path.
    pub fn with_asset(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.assets.insert(path.into(), bytes);
        self
    }
}

/// The worker's answer to a [`CompileRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    /// Identifier of the request this answers.
    pub id: String,
    /// Outcome of the compilation.
    pub result: CompileResult,
}

/// Outcome carried by a [`CompileResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CompileResult {
    /// The compiler produced a PDF.
    Ok {
        /// PDF bytes.
        pdf: Vec<u8>,
        /// Warnings reported alongside the artifact.
        diagnostics: Vec<String>,
    },
    /// The compiler produced nothing.
    Err {
        /// Human-readable failure message.
        error: String,
        /// Diagnostics reported by the compiler.
        diagnostics: Vec<String>,
    },
}

/// A successfully compiled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPdf {
    /// PDF bytes.
    pub pdf: Vec<u8>,
    /// Warnings reported alongside the artifact.
    pub diagnostics: Vec<String>,
}

impl CompileResponse {
    /// Converts the wire outcome into a `Result`.
    pub fn into_result(self) -> Result<CompiledPdf, CompileError> {
        match self.result {
            CompileResult::Ok { pdf, diagnostics } => Ok(CompiledPdf { pdf, diagnostics }),
            CompileResult::Err { error, diagnostics } => Err(CompileError::Failed {
                message: error,
                diagnostics,
            }),
        }
    }
}

impl From<Result<CompiledPdf, CompileError>> for CompileResult {
    fn from(result: Result<CompiledPdf, CompileError>) -> Self {
        match result {
            Ok(CompiledPdf { pdf, diagnostics }) => Self::Ok { pdf, diagnostics },
            Err(err) => Self::Err {
                diagnostics: err.diagnostics().to_vec(),
                error: err.to_string(),
            },
        }
    }
}
