//! Profiling utilities for SQL rendering
//!
//! Integrates with the puffin profiler when the "profiling" feature is enabled.
//! The macro is always defined and compiles to nothing without the feature.

/// Re-export puffin macros for convenience
#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

/// Profile a visitor entry point.
#[macro_export]
macro_rules! profile_render {
    ($operation:literal) => {
        #[cfg(feature = "profiling")]
        ::puffin::profile_scope!("arel_render", $operation);
    };
}
