//! Serialized access to a stateful Typst compiler.
//!
//! A [`CompileQueue`] owns one worker thread which owns the compiler. Requests
//! are processed strictly in arrival order. The compiler is created on the
//! first request, receives the template sources right after creation, and is
//! rebuilt with CJK fonts the first time a document needs them.

mod compiler;
mod error;
mod wire;

pub use compiler::{
    CompileOutput, CompilerFactory, CompilerFeatures, TemplateSource, TypstCompiler, contains_cjk,
};
pub use error::CompileError;
pub use wire::{CompileRequest, CompileResponse, CompileResult, CompiledPdf};

use crate::registry::TemplateRegistry;
use crate::registry::defaults::bundled_source;
use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Path the main document is registered under.
pub const MAIN_PATH: &str = "/main.typ";

const NO_DIAGNOSTICS: &str = "Typst compilation failed (no diagnostics)";

struct Job {
    request: CompileRequest,
    reply: Sender<CompileResponse>,
}

/// Pending result of a submitted request.
#[derive(Debug)]
pub struct CompileHandle {
    id: String,
    receiver: Receiver<CompileResponse>,
}

impl CompileHandle {
    /// Identifier of the submitted request.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Blocks until the worker answers.
    pub fn wait_response(self) -> Result<CompileResponse, CompileError> {
        self.receiver
            .recv()
            .map_err(|_| CompileError::WorkerTerminated)
    }

    /// Blocks until the worker answers and unpacks the outcome.
    pub fn wait(self) -> Result<CompiledPdf, CompileError> {
        self.wait_response()?.into_result()
    }
}

/// FIFO front end to a compiler living on a dedicated thread.
pub struct CompileQueue {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl CompileQueue {
    /// Starts the worker. No compiler is created until the first request.
    pub fn new<F: CompilerFactory>(
        factory: F,
        templates: Vec<TemplateSource>,
    ) -> Result<Self, CompileError> {
        let (sender, jobs) = mpsc::channel::<Job>();
        let worker = thread::Builder::new()
            .name("typst-compile".to_string())
            .spawn(move || {
                // Compilers are created here and never leave this thread.
                let mut state = WorkerState {
                    factory,
                    templates,
                    loaded: None,
                };
                for job in jobs {
                    let id = job.request.id.clone();
                    let response = state.process(job.request);
                    if job.reply.send(response).is_err() {
                        log::debug!("Compile result {id} discarded, caller is gone");
                    }
                }
                log::debug!("Compile worker stopped");
            })
            .map_err(|e| CompileError::Setup(format!("cannot spawn compile worker: {e}")))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Starts a queue whose compilers receive the bundled sources of every
    /// template in `registry`, at `/` + the template path.
    pub fn with_registry<F: CompilerFactory>(
        factory: F,
        registry: &TemplateRegistry,
    ) -> Result<Self, CompileError> {
        let templates = registry
            .templates
            .iter()
            .filter_map(|t| {
                let Some(text) = bundled_source(&t.id) else {
                    log::warn!("No bundled source for template {}", t.id);
                    return None;
                };
                Some(TemplateSource::new(format!("/{}", t.path), text))
            })
            .collect();
        Self::new(factory, templates)
    }

    /// Enqueues a request and returns immediately.
    pub fn submit_request(&self, request: CompileRequest) -> Result<CompileHandle, CompileError> {
        let sender = self.sender.as_ref().ok_or(CompileError::WorkerTerminated)?;
        let (reply, receiver) = mpsc::channel();
        let id = request.id.clone();
        sender
            .send(Job { request, reply })
            .map_err(|_| CompileError::WorkerTerminated)?;
        Ok(CompileHandle { id, receiver })
    }

    /// Enqueues a document with a fresh request id.
    pub fn submit(
        &self,
        main_typst: impl Into<String>,
        assets: BTreeMap<String, Vec<u8>>,
    ) -> Result<CompileHandle, CompileError> {
        let mut request = CompileRequest::new(main_typst);
        request.assets = assets;
        self.submit_request(request)
    }

    /// Compiles a document, blocking until every earlier request is done.
    pub fn compile(
        &self,
        main_typst: impl Into<String>,
        assets: BTreeMap<String, Vec<u8>>,
    ) -> Result<CompiledPdf, CompileError> {
        self.submit(main_typst, assets)?.wait()
    }
}

impl Drop for CompileQueue {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain queued jobs and exit.
        self.sender.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::warn!("Compile worker panicked");
        }
    }
}

struct LoadedCompiler {
    compiler: Box<dyn TypstCompiler>,
    features: CompilerFeatures,
}

struct WorkerState<F> {
    factory: F,
    templates: Vec<TemplateSource>,
    loaded: Option<LoadedCompiler>,
}

impl<F: CompilerFactory> WorkerState<F> {
    fn process(&mut self, request: CompileRequest) -> CompileResponse {
        let result = self.run(&request);
        if let Err(err) = &result {
            log::warn!("Compile request {} failed: {err}", request.id);
        }
        CompileResponse {
            id: request.id,
            result: result.into(),
        }
    }

    fn run(&mut self, request: &CompileRequest) -> Result<CompiledPdf, CompileError> {
        let compiler = self.compiler_for(contains_cjk(&request.main_typst))?;
        compiler.add_source(MAIN_PATH, &request.main_typst);
        for (path, bytes) in &request.assets {
            compiler.add_asset(path, bytes);
        }

        let output = compiler.compile(MAIN_PATH);
        match output.artifact {
            Some(pdf) => Ok(CompiledPdf {
                pdf,
                diagnostics: output.diagnostics,
            }),
            None => {
                let message = if output.diagnostics.is_empty() {
                    NO_DIAGNOSTICS.to_string()
                } else {
                    output.diagnostics.join("\n")
                };
                Err(CompileError::Failed {
                    message,
                    diagnostics: output.diagnostics,
                })
            }
        }
    }

    /// Returns the current compiler, creating or upgrading it first when
    /// needed. A failed rebuild leaves no compiler; the next request retries.
    fn compiler_for(&mut self, needs_cjk: bool) -> Result<&mut dyn TypstCompiler, CompileError> {
        let loaded = match self.loaded.take() {
            Some(loaded) if loaded.features.cjk || !needs_cjk => loaded,
            _ => self.load(CompilerFeatures { cjk: needs_cjk })?,
        };
        Ok(self.loaded.insert(loaded).compiler.as_mut())
    }

    fn load(&self, features: CompilerFeatures) -> Result<LoadedCompiler, CompileError> {
        log::debug!("Creating Typst compiler (cjk: {})", features.cjk);
        let mut compiler = self.factory.create(&features)?;
        for template in &self.templates {
            compiler.add_source(&template.path, &template.text);
        }
        Ok(LoadedCompiler { compiler, features })
    }
}
