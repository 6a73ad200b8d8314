//! notesd - small in-memory note-keeping HTTP service
//!
//! Clients create, read, update and delete textual notes keyed by filename.
//! Notes live in process memory only and are lost on restart.
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use notesd::{Config, Core};
//!
//! let core = Core::new(Config::default());
//! core.start_api_server().await?;
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! notesd --config ~/.notesd/config.toml
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod note;
pub mod store;
pub mod tracer;

// Re-export main types for convenience
pub use config::Config;
pub use error::{CoreError, Result};
pub use note::Note;
pub use store::NoteStore;
pub use tracer::OperationTracer;

use std::sync::Arc;

/// Core service: owns the note store and serves it over HTTP
pub struct Core {
    /// Configuration
    pub config: Config,

    /// The note store, shared with request handlers
    store: Arc<NoteStore>,
}

impl Core {
    /// Create a new Core instance with an empty store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(NoteStore::new()))
    }

    /// Create a Core instance around an existing store
    pub fn with_store(config: Config, store: Arc<NoteStore>) -> Self {
        Core { config, store }
    }

    /// Get a reference to the note store
    pub fn store(&self) -> &Arc<NoteStore> {
        &self.store
    }

    /// Start the HTTP API server (blocks until shutdown)
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        let tracer = OperationTracer::new(self.config.tracing.on_unexpected);
        tracing::info!(
            "Starting API server on {} (on unexpected error: {:?})",
            addr,
            tracer.policy()
        );
        api::serve(addr, self.store.clone(), tracer).await
    }
}
