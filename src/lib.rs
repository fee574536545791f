// src/lib.rs
// Public library surface for embedders and integration tests.

pub mod error;
pub mod feed;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod refresh;
pub mod registry;
pub mod render;
pub mod sanitize;
pub mod scheduler;
pub mod scrape;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::error::IngestError;
pub use crate::model::{NewsRecord, RawItem};
pub use crate::refresh::RefreshEngine;
pub use crate::registry::{IngestionMethod, Language, SourceDescriptor};
pub use crate::scheduler::RefreshScheduler;
pub use crate::store::NewsStore;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs from an embedder's entrypoint or a test.
/// Honors `RUST_LOG`; defaults to crate-level info. Safe to call more than
/// once.
pub fn enable_dev_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("samachar=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}
