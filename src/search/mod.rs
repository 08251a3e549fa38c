//! Movie search: criteria construction and concurrent indexer dispatch.
//!
//! # Module layout
//!
//! - [`criteria`] -- What to search for, built from a movie and its profile.
//! - [`dispatch`] -- Fan-out to every enabled indexer and merge of the results.
//! - [`service`] -- Movie-id entry point tying the two together.

pub mod criteria;
pub mod dispatch;
pub mod service;

pub use criteria::SearchCriteria;
pub use dispatch::{IndexerDispatcher, IndexerFailure, SearchBatch};
pub use service::SearchService;
