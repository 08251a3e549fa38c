//! Release indexers.
//!
//! # Module layout
//!
//! - [`indexer`] -- Trait definition and the [`ReleaseInfo`] record.
//! - [`registry`] -- Per-mode indexer lookup.
//! - [`newznab`] -- HTTP indexer for Newznab and Torznab APIs.

pub mod indexer;
pub mod newznab;
pub mod registry;

pub use indexer::{Indexer, ReleaseInfo};
pub use newznab::NewznabIndexer;
pub use registry::{IndexerRegistry, IndexerSource, SearchToggles};
