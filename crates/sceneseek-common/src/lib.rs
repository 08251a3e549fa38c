//! Sceneseek-Common: Shared types, IDs, and errors.
//!
//! This crate provides common functionality used across sceneseek:
//!
//! - **Typed IDs**: Integer newtypes for movies and profiles
//! - **Core Types**: Languages, alternative-title sources, and search modes
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use sceneseek_common::{Error, Language, MovieId, Result, SearchMode};
//!
//! let movie_id = MovieId::new(42);
//! assert_eq!(movie_id.get(), 42);
//!
//! assert_eq!(SearchMode::from_interactive(true), SearchMode::Interactive);
//! assert!(Language::French.is_known());
//!
//! fn lookup(id: MovieId) -> Result<()> {
//!     Err(Error::not_found("movie", id))
//! }
//! let err = lookup(movie_id).unwrap_err();
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "movie not found: 42");
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
