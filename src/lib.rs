//! Sceneseek - concurrent movie search across Newznab/Torznab indexers
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod decision;
pub mod indexers;
pub mod profiles;
pub mod search;
