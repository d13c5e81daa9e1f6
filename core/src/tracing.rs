//! Tracing utilities for statement compilation.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the dialect, SQL text and bind count.
///
/// ```ignore
/// arel_trace_sql!(Dialect::PostgreSQL, &sql, binds.len());
/// ```
#[macro_export]
macro_rules! arel_trace_sql {
    ($dialect:expr, $sql:expr, $bind_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(dialect = %$dialect, sql = %$sql, binds = $bind_count, "arel.compile");
    };
}

/// Emit a warn-level tracing event when rendering fails.
///
/// ```ignore
/// arel_trace_error!(Dialect::MySQL, &err);
/// ```
#[macro_export]
macro_rules! arel_trace_error {
    ($dialect:expr, $error:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(dialect = %$dialect, error = %$error, "arel.compile_failed");
    };
}
