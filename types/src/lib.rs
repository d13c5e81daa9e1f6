//! Shared type definitions for arel
//!
//! This crate holds the small vocabulary types that every other arel crate
//! agrees on:
//!
//! - [`Dialect`] - SQL dialect selector (generic, PostgreSQL, MySQL, SQLite)
//! - [`PlaceholderStyle`] - how bind placeholders are spelled in SQL text
//!
//! # Features
//!
//! - `std` - Standard library support (enabled by default)
//! - `serde` - Enable serde serialization/deserialization

#![cfg_attr(not(feature = "std"), no_std)]

mod dialect;
mod placeholder;

pub use dialect::{Dialect, DialectParseError};
pub use placeholder::PlaceholderStyle;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{Dialect, PlaceholderStyle};
}
