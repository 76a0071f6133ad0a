//! Async runtime bridge for running background tasks in egui

use std::io;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Bridge between async runtime and egui
pub struct AsyncBridge {
    /// Tokio runtime for async operations (wrapped in Option for clean shutdown)
    runtime: Option<Runtime>,

    /// Channel for receiving progress updates
    progress_rx: Arc<Mutex<Option<mpsc::UnboundedReceiver<ProgressUpdate>>>>,
}

/// Progress update from a background submission
#[derive(Clone, Debug)]
pub struct ProgressUpdate {
    pub kind: ProgressKind,
    pub message: Option<String>,
    pub elapsed_ms: Option<u64>,
}

impl ProgressUpdate {
    pub fn new(kind: ProgressKind) -> Self {
        Self {
            kind,
            message: None,
            elapsed_ms: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }
}

/// Type of progress update
#[derive(Clone, Debug)]
pub enum ProgressKind {
    Started { job_id: String },
    Info { message: String },
    Warning { message: String },
    Completed {
        status: u16,
        final_url: String,
        body: String,
    },
    Failed { error: String },
}

impl AsyncBridge {
    /// Create a new async bridge with its own multi-threaded runtime
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            runtime: Some(Runtime::new()?),
            progress_rx: Arc::new(Mutex::new(None)),
        })
    }

    /// Runtime for spawning tasks; `None` once shut down
    pub fn runtime(&self) -> Option<&Runtime> {
        self.runtime.as_ref()
    }

    /// Register a progress receiver, replacing any previous one
    pub fn register_progress_receiver(&self, rx: mpsc::UnboundedReceiver<ProgressUpdate>) {
        if let Ok(mut guard) = self.progress_rx.lock() {
            *guard = Some(rx);
        }
    }

    pub fn clear_progress_receiver(&self) {
        if let Ok(mut guard) = self.progress_rx.lock() {
            *guard = None;
        }
    }

    /// Poll for progress updates and call the handler
    pub fn poll_progress<F>(&self, mut handler: F)
    where
        F: FnMut(ProgressUpdate),
    {
        if let Ok(mut guard) = self.progress_rx.lock() {
            if let Some(rx) = guard.as_mut() {
                while let Ok(update) = rx.try_recv() {
                    handler(update);
                }
            }
        }
    }
}

impl Drop for AsyncBridge {
    fn drop(&mut self) {
        // Dropping a runtime from inside another runtime's context panics
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
