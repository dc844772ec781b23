//! Factory constructors: constant fills, identity, random matrices,
//! evenly spaced vectors and concatenation.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

impl<T: Element> Matrix<T> {
    /// A `rows x columns` matrix of zeros. Alias of [`Matrix::new`].
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Matrix::new(rows, columns)
    }

    /// A `rows x columns` matrix of ones.
    pub fn ones(rows: usize, columns: usize) -> Self {
        Matrix::full(rows, columns, T::one())
    }

    /// A `rows x columns` matrix with every element set to `value`.
    pub fn full(rows: usize, columns: usize, value: T) -> Self {
        let mut m = Matrix::new(rows, columns);
        m.fill(value);
        m
    }

    /// The `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Matrix::new(n, n);
        for i in 0..n {
            m.put(i, i, T::one());
        }
        m
    }

    /// A square matrix with the elements of `x` on the diagonal.
    pub fn diag_from(x: &Matrix<T>) -> Self {
        let n = x.len();
        let mut m = Matrix::new(n, n);
        for (i, &v) in x.as_slice().iter().enumerate() {
            m.put(i, i, v);
        }
        m
    }

    /// A matrix of uniform random values in `[0, 1)`.
    pub fn rand(rows: usize, columns: usize) -> Self {
        let mut m = Matrix::new(rows, columns);
        for v in m.as_mut_slice() {
            *v = T::from_f64(fastrand::f64());
        }
        m
    }

    /// A matrix of standard normal random values (Box-Muller).
    pub fn randn(rows: usize, columns: usize) -> Self {
        let mut m = Matrix::new(rows, columns);
        let data = m.as_mut_slice();
        let mut i = 0;
        while i < data.len() {
            // 1 - u keeps the argument of ln strictly positive.
            let u = 1.0 - fastrand::f64();
            let v = fastrand::f64();
            let r = (-2.0 * u.ln()).sqrt();
            let theta = 2.0 * std::f64::consts::PI * v;
            data[i] = T::from_f64(r * theta.cos());
            if i + 1 < data.len() {
                data[i + 1] = T::from_f64(r * theta.sin());
            }
            i += 2;
        }
        m
    }

    /// A column vector of `n >= 2` evenly spaced values from `lower` to
    /// `upper` inclusive.
    pub fn linspace(lower: T, upper: T, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(Error::SizeMismatch {
                op: "linspace",
                expected: 2,
                got: n,
            });
        }
        let mut m = Matrix::new(n, 1);
        let step = (upper - lower) / T::from_usize(n - 1);
        for (i, v) in m.as_mut_slice().iter_mut().enumerate() {
            *v = lower + step * T::from_usize(i);
        }
        // Land exactly on the endpoint regardless of rounding in the steps.
        m.put(n - 1, 0, upper);
        Ok(m)
    }

    /// Stack `a` beside `b`: same row count, columns appended.
    pub fn concat_horizontally(a: &Matrix<T>, b: &Matrix<T>) -> Result<Self> {
        if a.rows() != b.rows() {
            return Err(Error::SizeMismatch {
                op: "concat_horizontally",
                expected: a.rows(),
                got: b.rows(),
            });
        }
        // Columns are contiguous, so this is one buffer append.
        let mut data = Vec::with_capacity(a.len() + b.len());
        data.extend_from_slice(a.as_slice());
        data.extend_from_slice(b.as_slice());
        Matrix::from_vec(a.rows(), a.columns() + b.columns(), data)
    }

    /// Stack `a` above `b`: same column count, rows appended.
    pub fn concat_vertically(a: &Matrix<T>, b: &Matrix<T>) -> Result<Self> {
        if a.columns() != b.columns() {
            return Err(Error::SizeMismatch {
                op: "concat_vertically",
                expected: a.columns(),
                got: b.columns(),
            });
        }
        let rows = a.rows() + b.rows();
        let mut out = Matrix::new(rows, a.columns());
        for j in 0..a.columns() {
            for i in 0..a.rows() {
                out.put(i, j, a.get(i, j));
            }
            for i in 0..b.rows() {
                out.put(a.rows() + i, j, b.get(i, j));
            }
        }
        Ok(out)
    }
}
