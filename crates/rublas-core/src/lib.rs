//! # rublas-core
//!
//! Dense column-major matrices over `f32`/`f64` with aliasing-safe
//! arithmetic.
//!
//! The layering, bottom up:
//!
//! * [`kernels`] — Level-1 strided primitives (copy, swap, axpy, dot) over
//!   flat buffers, with bounds checking up front.
//! * [`backend`] — the gemv/ger/gemm call contract and the pure-Rust
//!   [`backend::Reference`] implementation behind it.
//! * [`dispatch`] — matrix-level routing: Level-1 to the kernels,
//!   Level-2/3 to the backend.
//! * [`matrix`] — the [`Matrix`] container: construction, slicing through
//!   [`Range`] cursors, element-wise and matrix arithmetic with explicit
//!   destination control ([`Operand`]).
//!
//! ```
//! use rublas_core::Matrix;
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//! let x = Matrix::vector(vec![1.0, 2.0, 3.0]);
//! let y = a.mmul(&x).unwrap();
//! assert_eq!(y.as_slice(), [14.0, 32.0]);
//! ```

pub mod backend;
pub mod dispatch;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod ranges;

pub use dtype::Element;
pub use error::{Error, Result};
pub use matrix::{Matrix, Operand};
pub use ranges::Range;

/// Glob-import convenience: `use rublas_core::prelude::*;`
pub mod prelude {
    pub use crate::dtype::Element;
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{Matrix, Operand};
    pub use crate::ranges::Range;
}
