//! Matrix-level routing onto the kernel and backend layers.
//!
//! The arithmetic layer never touches strides or offsets itself: it calls
//! these wrappers with whole matrices, and the wrapper picks the execution
//! path. Level-1 work (copy, swap, scale, accumulate, dot) always goes to
//! the strided fallback kernels in [`crate::kernels`], since O(n) work never
//! amortizes a boundary crossing into a native library. Level-2/3 work
//! (gemv, ger, gemm) goes through the [`Backend`] contract, bound here to
//! the pure-Rust [`Reference`] implementation.
//!
//! Callers are responsible for shape agreement; element counts are taken
//! from the source operand, so an undersized destination surfaces as the
//! kernel's bounds error rather than silent truncation.

use crate::backend::{Backend, Reference};
use crate::dtype::Element;
use crate::error::Result;
use crate::kernels;
use crate::matrix::Matrix;

/// Exchange the contents of two equally sized matrices.
pub fn swap<T: Element>(x: &mut Matrix<T>, y: &mut Matrix<T>) -> Result<()> {
    let n = x.len();
    kernels::swap(n, x.as_mut_slice(), 0, 1, y.as_mut_slice(), 0, 1)
}

/// Scale every element: `x *= alpha`.
pub fn scal<T: Element>(alpha: T, x: &mut Matrix<T>) {
    for v in x.as_mut_slice() {
        *v *= alpha;
    }
}

/// Overwrite `y` with the elements of `x`.
pub fn copy<T: Element>(x: &Matrix<T>, y: &mut Matrix<T>) -> Result<()> {
    let n = x.len();
    kernels::copy(n, x.as_slice(), 0, 1, y.as_mut_slice(), 0, 1)
}

/// Accumulate `y += alpha * x`.
pub fn axpy<T: Element>(alpha: T, x: &Matrix<T>, y: &mut Matrix<T>) -> Result<()> {
    let n = x.len();
    kernels::axpy(n, alpha, x.as_slice(), 0, 1, y.as_mut_slice(), 0, 1)
}

/// Fused `z = alpha * x + y` into a third matrix.
pub fn axpy_into<T: Element>(
    alpha: T,
    x: &Matrix<T>,
    y: &Matrix<T>,
    z: &mut Matrix<T>,
) -> Result<()> {
    let n = x.len();
    kernels::axpy_into(
        n,
        alpha,
        x.as_slice(),
        0,
        1,
        y.as_slice(),
        0,
        1,
        z.as_mut_slice(),
        0,
        1,
    )
}

/// Dot product over all elements, shape-agnostic.
pub fn dot<T: Element>(x: &Matrix<T>, y: &Matrix<T>) -> Result<T> {
    let n = x.len();
    kernels::dot(n, x.as_slice(), 0, 1, y.as_slice(), 0, 1)
}

/// `y = alpha * a * x + beta * y` for a matrix `a` and column vectors
/// `x`, `y`.
pub fn gemv<T: Element>(
    alpha: T,
    a: &Matrix<T>,
    x: &Matrix<T>,
    beta: T,
    y: &mut Matrix<T>,
) -> Result<()> {
    let (m, n) = (a.rows(), a.columns());
    Reference::gemv(
        m,
        n,
        alpha,
        a.as_slice(),
        0,
        m,
        x.as_slice(),
        0,
        1,
        beta,
        y.as_mut_slice(),
        0,
        1,
    )
}

/// Rank-1 update `a += alpha * x * y^T`.
pub fn ger<T: Element>(alpha: T, x: &Matrix<T>, y: &Matrix<T>, a: &mut Matrix<T>) -> Result<()> {
    let (m, n) = (a.rows(), a.columns());
    Reference::ger(
        m,
        n,
        alpha,
        x.as_slice(),
        0,
        1,
        y.as_slice(),
        0,
        1,
        a.as_mut_slice(),
        0,
        m,
    )
}

/// `c = alpha * a * b + beta * c`.
pub fn gemm<T: Element>(
    alpha: T,
    a: &Matrix<T>,
    b: &Matrix<T>,
    beta: T,
    c: &mut Matrix<T>,
) -> Result<()> {
    let (m, k, n) = (a.rows(), a.columns(), b.columns());
    Reference::gemm(
        m,
        n,
        k,
        alpha,
        a.as_slice(),
        0,
        m,
        b.as_slice(),
        0,
        k,
        beta,
        c.as_mut_slice(),
        0,
        m,
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_swap_matrices() {
        let mut x = Matrix::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let mut y = Matrix::from_vec(2, 1, vec![3.0, 4.0]).unwrap();
        swap(&mut x, &mut y).unwrap();
        assert_eq!(x.as_slice(), [3.0, 4.0]);
        assert_eq!(y.as_slice(), [1.0, 2.0]);
    }

    #[test]
    fn test_scal() {
        let mut x = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        scal(2.0, &mut x);
        assert_eq!(x.as_slice(), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_copy_overwrites() {
        let x = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut y = Matrix::<f64>::full(2, 2, 9.0);
        copy(&x, &mut y).unwrap();
        assert_eq!(y, x);
    }

    #[test]
    fn test_axpy_undersized_destination_is_caught() {
        let x = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let mut y = Matrix::from_vec(1, 2, vec![0.0, 0.0]).unwrap();
        let err = axpy(1.0, &x, &mut y).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn test_dot_ignores_shape() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let y = Matrix::from_vec(1, 3, vec![4.0, 5.0, 6.0]).unwrap();
        assert_eq!(dot(&x, &y).unwrap(), 32.0);
    }

    #[test]
    fn test_gemv_matches_gemm_for_single_column() {
        let a = Matrix::from_vec(2, 3, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]).unwrap();
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let mut y = Matrix::new(2, 1);
        let mut c = Matrix::new(2, 1);
        gemv(1.0, &a, &x, 0.0, &mut y).unwrap();
        gemm(1.0, &a, &x, 0.0, &mut c).unwrap();
        assert_eq!(y.as_slice(), c.as_slice());
        assert_eq!(y.as_slice(), [14.0, 32.0]);
    }

    #[test]
    fn test_ger() {
        let x = Matrix::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let y = Matrix::from_vec(2, 1, vec![3.0, 4.0]).unwrap();
        let mut a = Matrix::new(2, 2);
        ger(1.0, &x, &y, &mut a).unwrap();
        assert_eq!(a.as_slice(), [3.0, 6.0, 4.0, 8.0]);
    }
}
