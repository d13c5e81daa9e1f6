//! # arel-core
//!
//! Relational algebra for SQL: build a tree of [`Node`]s with the
//! [`predications`] and the managers, then render it with a [`Visitor`]
//! either as inline SQL or as a [`CompiledQuery`] with ordered binds.
//!
//! ## Feature Flags
//!
//! - `std` - Standard library support (default)
//! - `serde` - Serialize/Deserialize for [`Value`], [`Dialect`] and [`PlaceholderStyle`]
//! - `chrono` - Date and timestamp values
//! - `uuid` - UUID values
//! - `tracing` - Debug events for every compiled statement
//! - `profiling` - puffin scopes around rendering

pub mod collectors;
pub mod error;
pub mod helpers;
pub mod managers;
pub mod math;
pub mod nodes;
pub mod placeholder;
pub mod predications;
pub mod profiling;
pub mod tracing;
pub mod value;
pub mod visitors;

// Re-export key types and traits
pub use arel_types::{Dialect, PlaceholderStyle};
pub use collectors::{Bind, BindCollector, Collector, CompiledQuery, SqlString};
pub use error::{ArelError, Result};
pub use helpers::*;
pub use managers::{DeleteManager, InsertManager, SelectManager, UpdateManager};
pub use nodes::*;
pub use value::Value;
pub use visitors::{
    AnsiQuoting, DialectExt, Dot, MySql, MySqlQuoting, Postgres, PostgresQuoting, Quoting, Sqlite,
    SqliteQuoting, ToSql, Visitor, visitor_for,
};

/// Everything needed to build and render statements.
pub mod prelude {
    pub use crate::collectors::CompiledQuery;
    pub use crate::error::{ArelError, Result};
    pub use crate::helpers::*;
    pub use crate::managers::{DeleteManager, InsertManager, SelectManager, UpdateManager};
    pub use crate::nodes::{
        Attribute, Cte, FrameBound, JoinKind, NamedWindow, Node, Table, TableAlias, Window,
    };
    pub use crate::value::Value;
    pub use crate::visitors::{DialectExt, Visitor};
    pub use arel_types::{Dialect, PlaceholderStyle};
}
