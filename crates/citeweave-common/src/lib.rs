//! citeweave-common — Shared types, errors, and the capped HTTP client used across all Citeweave crates.

pub mod error;
pub mod domain;
pub mod paths;
pub mod sandbox;

// Re-export commonly used types
pub use domain::{Source, Strategy};
pub use error::{CiteweaveError, Result};
pub use paths::ArtifactPaths;
