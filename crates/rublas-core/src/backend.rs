//! Call contract for the native BLAS binding, plus the pure-Rust reference
//! implementation used as the default backend.
//!
//! The engine reaches matrix-vector and matrix-matrix work through the fixed
//! signatures below: element counts, a scale factor, the backing buffer, a
//! start offset into it, and a stride (vectors) or leading dimension
//! (matrices), all column-major. The core never passes overlapping buffers
//! as distinct arguments and never assumes a routine mutates anything but
//! its designated output.
//!
//! [`Reference`] implements the contract directly from the documented
//! semantics (`y = alpha*A*x + beta*y`, `C = alpha*A*B + beta*C`,
//! `A += alpha*x*y^T`) and never fails. A binding to an external BLAS
//! reports a non-zero routine status through
//! [`status_to_result`] as [`Error::NativeRoutine`].

use crate::dtype::Element;
use crate::error::{Error, Result};

/// Level-2/3 routines the engine delegates to.
///
/// All matrices are column-major: element `(i, j)` of an `m x n` matrix
/// stored at `off` with leading dimension `ld` lives at `off + i + ld * j`.
#[allow(clippy::too_many_arguments)]
pub trait Backend<T: Element> {
    /// `y = alpha * A * x + beta * y` for an `m x n` matrix `A`.
    ///
    /// When `beta` is zero, `y` is overwritten without being read.
    fn gemv(
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        a_off: usize,
        lda: usize,
        x: &[T],
        x_off: usize,
        incx: usize,
        beta: T,
        y: &mut [T],
        y_off: usize,
        incy: usize,
    ) -> Result<()>;

    /// Rank-1 update `A += alpha * x * y^T` for an `m x n` matrix `A`.
    fn ger(
        m: usize,
        n: usize,
        alpha: T,
        x: &[T],
        x_off: usize,
        incx: usize,
        y: &[T],
        y_off: usize,
        incy: usize,
        a: &mut [T],
        a_off: usize,
        lda: usize,
    ) -> Result<()>;

    /// `C = alpha * A * B + beta * C` for `A: m x k`, `B: k x n`, `C: m x n`.
    ///
    /// When `beta` is zero, `C` is overwritten without being read.
    fn gemm(
        m: usize,
        n: usize,
        k: usize,
        alpha: T,
        a: &[T],
        a_off: usize,
        lda: usize,
        b: &[T],
        b_off: usize,
        ldb: usize,
        beta: T,
        c: &mut [T],
        c_off: usize,
        ldc: usize,
    ) -> Result<()>;
}

/// Map a BLAS/LAPACK-style status code to a `Result`.
///
/// Backends built on external libraries call this with the routine's return
/// status; zero is success, anything else is propagated opaquely.
pub fn status_to_result(routine: &'static str, status: i32) -> Result<()> {
    if status == 0 {
        Ok(())
    } else {
        Err(Error::NativeRoutine { routine, status })
    }
}

/// Pure-Rust implementation of the [`Backend`] contract.
pub struct Reference;

impl<T: Element> Backend<T> for Reference {
    fn gemv(
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        a_off: usize,
        lda: usize,
        x: &[T],
        x_off: usize,
        incx: usize,
        beta: T,
        y: &mut [T],
        y_off: usize,
        incy: usize,
    ) -> Result<()> {
        // Scale (or clear) y first, then accumulate column by column.
        if beta == T::zero() {
            let mut yi = y_off;
            for _ in 0..m {
                y[yi] = T::zero();
                yi += incy;
            }
        } else if beta != T::one() {
            let mut yi = y_off;
            for _ in 0..m {
                y[yi] *= beta;
                yi += incy;
            }
        }

        for j in 0..n {
            let xj = alpha * x[x_off + j * incx];
            if xj != T::zero() {
                let col = a_off + lda * j;
                let mut yi = y_off;
                for i in 0..m {
                    y[yi] += a[col + i] * xj;
                    yi += incy;
                }
            }
        }
        Ok(())
    }

    fn ger(
        m: usize,
        n: usize,
        alpha: T,
        x: &[T],
        x_off: usize,
        incx: usize,
        y: &[T],
        y_off: usize,
        incy: usize,
        a: &mut [T],
        a_off: usize,
        lda: usize,
    ) -> Result<()> {
        for j in 0..n {
            let yj = alpha * y[y_off + j * incy];
            if yj != T::zero() {
                let col = a_off + lda * j;
                let mut xi = x_off;
                for i in 0..m {
                    a[col + i] += x[xi] * yj;
                    xi += incx;
                }
            }
        }
        Ok(())
    }

    fn gemm(
        m: usize,
        n: usize,
        k: usize,
        alpha: T,
        a: &[T],
        a_off: usize,
        lda: usize,
        b: &[T],
        b_off: usize,
        ldb: usize,
        beta: T,
        c: &mut [T],
        c_off: usize,
        ldc: usize,
    ) -> Result<()> {
        // jki loop order: walks A and C down columns, the contiguous
        // direction in column-major storage.
        for j in 0..n {
            let c_col = c_off + ldc * j;
            if beta == T::zero() {
                for i in 0..m {
                    c[c_col + i] = T::zero();
                }
            } else if beta != T::one() {
                for i in 0..m {
                    c[c_col + i] *= beta;
                }
            }

            for p in 0..k {
                let bpj = alpha * b[b_off + p + ldb * j];
                if bpj != T::zero() {
                    let a_col = a_off + lda * p;
                    for i in 0..m {
                        c[c_col + i] += a[a_col + i] * bpj;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_gemv_overwrites_when_beta_zero() {
        // Column-major A = [[1, 3], [2, 4]], x = [5, 6].
        let a = [1.0_f64, 2.0, 3.0, 4.0];
        let x = [5.0_f64, 6.0];
        let mut y = [99.0_f64, 99.0];
        <Reference as Backend<f64>>::gemv(2, 2, 1.0, &a, 0, 2, &x, 0, 1, 0.0, &mut y, 0, 1)
            .unwrap();
        assert_eq!(y, [23.0, 34.0]);
    }

    #[test]
    fn test_gemv_accumulates_with_beta() {
        // y = 2*A*x + 3*y with A = I.
        let a = [1.0_f64, 0.0, 0.0, 1.0];
        let x = [1.0_f64, 2.0];
        let mut y = [10.0_f64, 10.0];
        <Reference as Backend<f64>>::gemv(2, 2, 2.0, &a, 0, 2, &x, 0, 1, 3.0, &mut y, 0, 1)
            .unwrap();
        assert_eq!(y, [32.0, 34.0]);
    }

    #[test]
    fn test_gemv_rectangular() {
        // A = [[1, 2, 3], [4, 5, 6]] (2x3 column-major), x = [1, 0, 1].
        let a = [1.0_f64, 4.0, 2.0, 5.0, 3.0, 6.0];
        let x = [1.0_f64, 0.0, 1.0];
        let mut y = [0.0_f64; 2];
        <Reference as Backend<f64>>::gemv(2, 3, 1.0, &a, 0, 2, &x, 0, 1, 0.0, &mut y, 0, 1)
            .unwrap();
        assert_eq!(y, [4.0, 10.0]);
    }

    #[test]
    fn test_ger_outer_product() {
        // A = 0, then A += 2 * x * y^T with x = [1, 2], y = [3, 4].
        let x = [1.0_f64, 2.0];
        let y = [3.0_f64, 4.0];
        let mut a = [0.0_f64; 4];
        <Reference as Backend<f64>>::ger(2, 2, 2.0, &x, 0, 1, &y, 0, 1, &mut a, 0, 2).unwrap();
        // Column-major [[6, 8], [12, 16]].
        assert_eq!(a, [6.0, 12.0, 8.0, 16.0]);
    }

    #[test]
    fn test_gemm_square() {
        // A = [[1, 2], [3, 4]], B = [[5, 6], [7, 8]] in column-major.
        let a = [1.0_f64, 3.0, 2.0, 4.0];
        let b = [5.0_f64, 7.0, 6.0, 8.0];
        let mut c = [0.0_f64; 4];
        <Reference as Backend<f64>>::gemm(2, 2, 2, 1.0, &a, 0, 2, &b, 0, 2, 0.0, &mut c, 0, 2)
            .unwrap();
        // A*B = [[19, 22], [43, 50]] column-major.
        assert_eq!(c, [19.0, 43.0, 22.0, 50.0]);
    }

    #[test]
    fn test_gemm_beta_accumulate() {
        let a = [1.0_f64, 0.0, 0.0, 1.0];
        let b = [5.0_f64, 7.0, 6.0, 8.0];
        let mut c = [1.0_f64; 4];
        <Reference as Backend<f64>>::gemm(2, 2, 2, 2.0, &a, 0, 2, &b, 0, 2, 3.0, &mut c, 0, 2)
            .unwrap();
        assert_eq!(c, [13.0, 17.0, 15.0, 19.0]);
    }

    #[test]
    fn test_status_mapping() {
        assert!(status_to_result("dgesv", 0).is_ok());
        let err = status_to_result("dgesv", 3).unwrap_err();
        assert_eq!(
            err,
            Error::NativeRoutine {
                routine: "dgesv",
                status: 3
            }
        );
    }
}
