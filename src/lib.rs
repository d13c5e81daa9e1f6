//! # Arel for Rust
//!
//! Relational algebra for SQL. Build a statement tree with tables,
//! attributes and managers, then render it for a dialect, either with
//! inline literals or as parameterized SQL plus its binds.
//!
//! ## Quick Start
//!
//! ```rust
//! use arel::prelude::*;
//!
//! # fn main() -> arel::Result<()> {
//! let users = Table::new("users");
//!
//! let mut query = users.from();
//! query
//!     .project([users.attr("id")])
//!     .r#where(users.attr("id").eq(10));
//!
//! assert_eq!(
//!     query.to_sql()?,
//!     r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 10"#
//! );
//!
//! let compiled = query.compile(Dialect::PostgreSQL)?;
//! assert_eq!(
//!     compiled.sql(),
//!     r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = $1"#
//! );
//! assert_eq!(compiled.values()?, vec![Value::Integer(10)]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Dialects
//!
//! | Dialect    | Visitor    | Identifiers | Placeholders |
//! |------------|------------|-------------|--------------|
//! | Generic    | `ToSql`    | `"name"`    | `?`          |
//! | PostgreSQL | `Postgres` | `"name"`    | `$1`         |
//! | MySQL      | `MySql`    | `` `name` `` | `?`          |
//! | SQLite     | `Sqlite`   | `"name"`    | `?`          |

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for arel operations
pub use arel_core::error::Result;

/// SQL dialect selector
pub use arel_types::Dialect;

/// Error types
pub mod error {
    pub use arel_core::error::ArelError;
}

pub use arel_core::{
    DeleteManager, InsertManager, SelectManager, Table, UpdateManager, Value,
};

// =============================================================================
// Core module - the whole engine
// =============================================================================

/// Node tree, predications, visitors and collectors.
///
/// # Module Structure
///
/// - **Nodes**: `Node`, `Table`, `Attribute`, `SelectStatement`, `Window`, ...
/// - **Predications**: free functions such as `eq`, `matches`, `between`,
///   also available as methods on `Attribute` and `Node`.
/// - **Visitors**: `ToSql`, `Postgres`, `MySql`, `Sqlite`, `Dot`.
/// - **Collectors**: `SqlString`, `BindCollector`, `CompiledQuery`.
pub mod core {
    pub use arel_core::*;

    /// Predicates as free functions.
    ///
    /// ```rust,ignore
    /// use arel::core::predications::{eq, gt};
    /// ```
    pub use arel_core::predications;
}

// =============================================================================
// Prelude
// =============================================================================

/// Commonly used types, helpers and traits.
///
/// ```rust
/// use arel::prelude::*;
/// ```
pub mod prelude {
    pub use arel_core::prelude::*;
}
