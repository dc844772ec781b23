//! # rublas
//!
//! Dense matrix arithmetic for Rust: a column-major [`Matrix`](core::Matrix)
//! container with aliasing-safe in-place operations, MATLAB-style slicing
//! through [`Range`](core::Range) cursors, and Level-1 strided fallback
//! kernels backing the element-wise layer.
//!
//! This crate is a thin facade over `rublas-core`; `use rublas::prelude::*;`
//! brings the common types into scope.

pub use rublas_core as core;

/// Glob-import convenience: `use rublas::prelude::*;`
pub mod prelude {
    pub use rublas_core::prelude::*;
}
