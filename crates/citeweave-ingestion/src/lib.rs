//! citeweave-ingestion — Reference fetching from bibliographic APIs.
//!
//! One client per source (OpenAlex, Semantic Scholar, Crossref), each
//! normalising its response schema into the common [`models::ReferenceRecord`]
//! shape at ingestion time. The fetch loop queries one keyword at a time,
//! sequentially, and treats per-keyword failures as empty results.

pub mod fetch;
pub mod models;
pub mod sources;

pub use fetch::{fetch_references, ReferenceSet};
pub use models::ReferenceRecord;
pub use sources::ReferenceSource;
