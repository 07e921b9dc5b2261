//! Prelude module for iso8601_qualifier crate.
//!
//! Re-exports commonly used derive macros from derive_more.

pub use derive_more::{Display, Into};
