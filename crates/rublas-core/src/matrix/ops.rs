//! Matrix arithmetic with explicit destination control.
//!
//! Every binary operation comes in three forms that encode where the
//! result lands:
//!
//! * `op(rhs)` allocates a fresh result,
//! * `op_into(rhs, result)` writes into a distinct destination, resizing
//!   it when its element count does not match,
//! * `op_assign(rhs)` updates the receiver in place.
//!
//! The right-hand side is anything convertible to [`Operand`]: a matrix
//! reference, a bare value, or [`Operand::Itself`] for the case where the
//! operand is the receiver (`x.sub_assign(Operand::Itself)` zeroes `x`;
//! the borrow rules rule out expressing that as `x.sub_assign(&x)`).
//!
//! Operand compatibility is by element count, not shape, and a `1 x 1`
//! matrix on either side degrades to its value and broadcasts. When an
//! in-place scalar receiver meets a larger operand, the receiver's value
//! is read out first and the receiver reallocated to the operand's shape,
//! so the result is still exact.
//!
//! For non-commutative in-place forms where the receiver is the right
//! operand (`rsub_assign` with a matrix), the receiver is negated in place
//! and the other operand accumulated, one pass each, no temporary.
//! Matrix multiplication cannot reuse its inputs as scratch at all, so the
//! aliased `mmul_assign` multiplies into a temporary and moves it in.
//!
//! The `+`, `-`, `*`, `/` operators are panicking sugar over these
//! methods; `*` is matrix multiplication.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::dispatch;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::kernels;
use crate::matrix::Matrix;

/// Right-hand side of a matrix operation.
pub enum Operand<'a, T: Element> {
    /// Another matrix.
    Mat(&'a Matrix<T>),
    /// A plain value, applied to every element.
    Value(T),
    /// The receiver of the call itself.
    Itself,
}

impl<'a, T: Element> From<&'a Matrix<T>> for Operand<'a, T> {
    fn from(m: &'a Matrix<T>) -> Self {
        Operand::Mat(m)
    }
}

impl<'a, T: Element> From<T> for Operand<'a, T> {
    fn from(v: T) -> Self {
        Operand::Value(v)
    }
}

/// Reallocate `result` when its element count does not match; an equal
/// count is accepted as-is, whatever its shape.
fn ensure_result<T: Element>(rows: usize, columns: usize, result: &mut Matrix<T>) {
    if result.len() != rows * columns {
        result.resize(rows, columns);
    }
}

// ============================================================================
// Addition and subtraction (kernel-backed)
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Element-wise sum, as a fresh matrix.
    ///
    /// ```
    /// use rublas_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
    /// let c = a.add(&b).unwrap();
    /// assert_eq!(c, Matrix::from_rows(&[[6.0, 8.0], [10.0, 12.0]]).unwrap());
    /// ```
    pub fn add<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Matrix<T>> {
        let mut result = Matrix::empty();
        self.add_into(rhs, &mut result)?;
        Ok(result)
    }

    /// Element-wise sum into `result`.
    pub fn add_into<'a>(
        &self,
        rhs: impl Into<Operand<'a, T>>,
        result: &mut Matrix<T>,
    ) -> Result<()> {
        match rhs.into() {
            Operand::Value(v) => {
                ensure_result(self.rows, self.columns, result);
                for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                    *r = a + v;
                }
                Ok(())
            }
            Operand::Itself => {
                ensure_result(self.rows, self.columns, result);
                for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                    *r = a + a;
                }
                Ok(())
            }
            Operand::Mat(o) => {
                if o.is_scalar() && !self.is_scalar() {
                    return self.add_into(Operand::Value(o.data[0]), result);
                }
                if self.is_scalar() && !o.is_scalar() {
                    return o.add_into(Operand::Value(self.data[0]), result);
                }
                self.check_same_length(o, "add")?;
                ensure_result(self.rows, self.columns, result);
                dispatch::axpy_into(T::one(), o, self, result)
            }
        }
    }

    /// Element-wise sum in place.
    pub fn add_assign<'a>(&mut self, rhs: impl Into<Operand<'a, T>>) -> Result<&mut Self> {
        match rhs.into() {
            Operand::Value(v) => {
                for a in &mut self.data {
                    *a += v;
                }
                Ok(self)
            }
            Operand::Itself => {
                for a in &mut self.data {
                    *a += *a;
                }
                Ok(self)
            }
            Operand::Mat(o) => {
                if o.is_scalar() && !self.is_scalar() {
                    return self.add_assign(Operand::Value(o.data[0]));
                }
                if self.is_scalar() && !o.is_scalar() {
                    let v = self.data[0];
                    self.resize(o.rows, o.columns);
                    for (a, &b) in self.data.iter_mut().zip(o.data.iter()) {
                        *a = b + v;
                    }
                    return Ok(self);
                }
                self.check_same_length(o, "add")?;
                dispatch::axpy(T::one(), o, self)?;
                Ok(self)
            }
        }
    }

    /// Element-wise difference `self - rhs`, as a fresh matrix.
    pub fn sub<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Matrix<T>> {
        let mut result = Matrix::empty();
        self.sub_into(rhs, &mut result)?;
        Ok(result)
    }

    /// Element-wise difference into `result`.
    pub fn sub_into<'a>(
        &self,
        rhs: impl Into<Operand<'a, T>>,
        result: &mut Matrix<T>,
    ) -> Result<()> {
        match rhs.into() {
            Operand::Value(v) => {
                ensure_result(self.rows, self.columns, result);
                for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                    *r = a - v;
                }
                Ok(())
            }
            Operand::Itself => {
                ensure_result(self.rows, self.columns, result);
                for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                    *r = a - a;
                }
                Ok(())
            }
            Operand::Mat(o) => {
                if o.is_scalar() && !self.is_scalar() {
                    return self.sub_into(Operand::Value(o.data[0]), result);
                }
                if self.is_scalar() && !o.is_scalar() {
                    return o.rsub_into(Operand::Value(self.data[0]), result);
                }
                self.check_same_length(o, "sub")?;
                ensure_result(self.rows, self.columns, result);
                // result = -o + self, fused.
                dispatch::axpy_into(-T::one(), o, self, result)
            }
        }
    }

    /// Element-wise difference in place.
    pub fn sub_assign<'a>(&mut self, rhs: impl Into<Operand<'a, T>>) -> Result<&mut Self> {
        match rhs.into() {
            Operand::Value(v) => {
                for a in &mut self.data {
                    *a -= v;
                }
                Ok(self)
            }
            Operand::Itself => {
                // Not a plain fill: NaN - NaN stays NaN.
                for a in &mut self.data {
                    *a = *a - *a;
                }
                Ok(self)
            }
            Operand::Mat(o) => {
                if o.is_scalar() && !self.is_scalar() {
                    return self.sub_assign(Operand::Value(o.data[0]));
                }
                if self.is_scalar() && !o.is_scalar() {
                    let v = self.data[0];
                    self.resize(o.rows, o.columns);
                    for (a, &b) in self.data.iter_mut().zip(o.data.iter()) {
                        *a = v - b;
                    }
                    return Ok(self);
                }
                self.check_same_length(o, "sub")?;
                dispatch::axpy(-T::one(), o, self)?;
                Ok(self)
            }
        }
    }

    /// Reversed difference `rhs - self`, as a fresh matrix.
    pub fn rsub<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Matrix<T>> {
        let mut result = Matrix::empty();
        self.rsub_into(rhs, &mut result)?;
        Ok(result)
    }

    /// Reversed difference `rhs - self` into `result`.
    pub fn rsub_into<'a>(
        &self,
        rhs: impl Into<Operand<'a, T>>,
        result: &mut Matrix<T>,
    ) -> Result<()> {
        match rhs.into() {
            Operand::Value(v) => {
                ensure_result(self.rows, self.columns, result);
                for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                    *r = v - a;
                }
                Ok(())
            }
            Operand::Itself => {
                ensure_result(self.rows, self.columns, result);
                for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                    *r = a - a;
                }
                Ok(())
            }
            Operand::Mat(o) => o.sub_into(Operand::Mat(self), result),
        }
    }

    /// Reversed difference `rhs - self` in place on the receiver.
    ///
    /// With a matrix operand this negates the receiver and accumulates,
    /// one pass each, no temporary.
    pub fn rsub_assign<'a>(&mut self, rhs: impl Into<Operand<'a, T>>) -> Result<&mut Self> {
        match rhs.into() {
            Operand::Value(v) => {
                for a in &mut self.data {
                    *a = v - *a;
                }
                Ok(self)
            }
            Operand::Itself => {
                for a in &mut self.data {
                    *a = *a - *a;
                }
                Ok(self)
            }
            Operand::Mat(o) => {
                if o.is_scalar() && !self.is_scalar() {
                    return self.rsub_assign(Operand::Value(o.data[0]));
                }
                if self.is_scalar() && !o.is_scalar() {
                    let v = self.data[0];
                    self.resize(o.rows, o.columns);
                    for (a, &b) in self.data.iter_mut().zip(o.data.iter()) {
                        *a = b - v;
                    }
                    return Ok(self);
                }
                self.check_same_length(o, "rsub")?;
                dispatch::scal(-T::one(), self);
                dispatch::axpy(T::one(), o, self)?;
                Ok(self)
            }
        }
    }
}

// ============================================================================
// Element-wise products, quotients, comparisons and logical ops
// ============================================================================

macro_rules! elementwise {
    ($name:ident, $name_into:ident, $name_assign:ident, $opname:literal, $doc:literal, $f:expr) => {
        impl<T: Element> Matrix<T> {
            #[doc = $doc]
            #[doc = ""]
            #[doc = "Returns a fresh matrix; a `1 x 1` operand on either side broadcasts."]
            pub fn $name<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Matrix<T>> {
                let mut result = Matrix::empty();
                self.$name_into(rhs, &mut result)?;
                Ok(result)
            }

            #[doc = $doc]
            #[doc = ""]
            #[doc = "Writes into `result`, reallocating it on element-count mismatch."]
            pub fn $name_into<'a>(
                &self,
                rhs: impl Into<Operand<'a, T>>,
                result: &mut Matrix<T>,
            ) -> Result<()> {
                let f = $f;
                match rhs.into() {
                    Operand::Value(v) => {
                        ensure_result(self.rows, self.columns, result);
                        for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                            *r = f(a, v);
                        }
                    }
                    Operand::Itself => {
                        ensure_result(self.rows, self.columns, result);
                        for (r, &a) in result.data.iter_mut().zip(self.data.iter()) {
                            *r = f(a, a);
                        }
                    }
                    Operand::Mat(o) => {
                        if o.is_scalar() && !self.is_scalar() {
                            return self.$name_into(Operand::Value(o.data[0]), result);
                        }
                        if self.is_scalar() && !o.is_scalar() {
                            let v = self.data[0];
                            ensure_result(o.rows, o.columns, result);
                            for (r, &b) in result.data.iter_mut().zip(o.data.iter()) {
                                *r = f(v, b);
                            }
                            return Ok(());
                        }
                        self.check_same_length(o, $opname)?;
                        ensure_result(self.rows, self.columns, result);
                        for ((r, &a), &b) in result
                            .data
                            .iter_mut()
                            .zip(self.data.iter())
                            .zip(o.data.iter())
                        {
                            *r = f(a, b);
                        }
                    }
                }
                Ok(())
            }

            #[doc = $doc]
            #[doc = ""]
            #[doc = "In place on the receiver."]
            pub fn $name_assign<'a>(
                &mut self,
                rhs: impl Into<Operand<'a, T>>,
            ) -> Result<&mut Self> {
                let f = $f;
                match rhs.into() {
                    Operand::Value(v) => {
                        for a in &mut self.data {
                            *a = f(*a, v);
                        }
                    }
                    Operand::Itself => {
                        for a in &mut self.data {
                            *a = f(*a, *a);
                        }
                    }
                    Operand::Mat(o) => {
                        if o.is_scalar() && !self.is_scalar() {
                            let v = o.data[0];
                            for a in &mut self.data {
                                *a = f(*a, v);
                            }
                        } else if self.is_scalar() && !o.is_scalar() {
                            let v = self.data[0];
                            self.resize(o.rows, o.columns);
                            for (a, &b) in self.data.iter_mut().zip(o.data.iter()) {
                                *a = f(v, b);
                            }
                        } else {
                            self.check_same_length(o, $opname)?;
                            for (a, &b) in self.data.iter_mut().zip(o.data.iter()) {
                                *a = f(*a, b);
                            }
                        }
                    }
                }
                Ok(self)
            }
        }
    };
}

elementwise!(mul, mul_into, mul_assign, "mul", "Element-wise product.", |a: T, b: T| a * b);
elementwise!(
    div,
    div_into,
    div_assign,
    "div",
    "Element-wise quotient `self / rhs`.",
    |a: T, b: T| a / b
);
elementwise!(
    rdiv,
    rdiv_into,
    rdiv_assign,
    "rdiv",
    "Reversed element-wise quotient `rhs / self`.",
    |a: T, b: T| b / a
);
elementwise!(
    lt,
    lt_into,
    lt_assign,
    "lt",
    "Element-wise `<`, yielding 1.0 where the predicate holds and 0.0 elsewhere.",
    |a: T, b: T| if a < b { T::one() } else { T::zero() }
);
elementwise!(
    le,
    le_into,
    le_assign,
    "le",
    "Element-wise `<=`, yielding 1.0 where the predicate holds and 0.0 elsewhere.",
    |a: T, b: T| if a <= b { T::one() } else { T::zero() }
);
elementwise!(
    gt,
    gt_into,
    gt_assign,
    "gt",
    "Element-wise `>`, yielding 1.0 where the predicate holds and 0.0 elsewhere.",
    |a: T, b: T| if a > b { T::one() } else { T::zero() }
);
elementwise!(
    ge,
    ge_into,
    ge_assign,
    "ge",
    "Element-wise `>=`, yielding 1.0 where the predicate holds and 0.0 elsewhere.",
    |a: T, b: T| if a >= b { T::one() } else { T::zero() }
);
elementwise!(
    eq_elements,
    eq_elements_into,
    eq_elements_assign,
    "eq",
    "Element-wise equality, yielding 1.0 where elements match (NaN matches nothing).",
    |a: T, b: T| if a == b { T::one() } else { T::zero() }
);
elementwise!(
    ne_elements,
    ne_elements_into,
    ne_elements_assign,
    "ne",
    "Element-wise inequality, yielding 1.0 where elements differ.",
    |a: T, b: T| if a != b { T::one() } else { T::zero() }
);
elementwise!(
    and,
    and_into,
    and_assign,
    "and",
    "Logical AND over truth values (non-zero is true), yielding 0.0 or 1.0.",
    |a: T, b: T| if a != T::zero() && b != T::zero() {
        T::one()
    } else {
        T::zero()
    }
);
elementwise!(
    or,
    or_into,
    or_assign,
    "or",
    "Logical OR over truth values (non-zero is true), yielding 0.0 or 1.0.",
    |a: T, b: T| if a != T::zero() || b != T::zero() {
        T::one()
    } else {
        T::zero()
    }
);
elementwise!(
    xor,
    xor_into,
    xor_assign,
    "xor",
    "Logical XOR over truth values (non-zero is true), yielding 0.0 or 1.0.",
    |a: T, b: T| if (a != T::zero()) != (b != T::zero()) {
        T::one()
    } else {
        T::zero()
    }
);
elementwise!(
    min_elements,
    min_elements_into,
    min_elements_assign,
    "min_elements",
    "Element-wise minimum.",
    |a: T, b: T| a.min(b)
);
elementwise!(
    max_elements,
    max_elements_into,
    max_elements_assign,
    "max_elements",
    "Element-wise maximum.",
    |a: T, b: T| a.max(b)
);

// ============================================================================
// Unary operations
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Negation of every element, as a fresh matrix.
    pub fn neg(&self) -> Matrix<T> {
        let mut m = self.dup();
        m.neg_assign();
        m
    }

    /// Negate every element in place.
    pub fn neg_assign(&mut self) -> &mut Self {
        for a in &mut self.data {
            *a = -*a;
        }
        self
    }

    /// Logical NOT: 1.0 where the element is zero, 0.0 elsewhere.
    pub fn not(&self) -> Matrix<T> {
        let mut m = self.dup();
        m.not_assign();
        m
    }

    /// Logical NOT in place.
    pub fn not_assign(&mut self) -> &mut Self {
        for a in &mut self.data {
            *a = if *a == T::zero() { T::one() } else { T::zero() };
        }
        self
    }

    /// Truth value of every element: 1.0 where non-zero, 0.0 where zero.
    pub fn truth(&self) -> Matrix<T> {
        let mut m = self.dup();
        m.truth_assign();
        m
    }

    /// Truth values in place.
    pub fn truth_assign(&mut self) -> &mut Self {
        for a in &mut self.data {
            *a = if *a == T::zero() { T::zero() } else { T::one() };
        }
        self
    }
}

// ============================================================================
// Matrix multiplication and rank-1 update
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Matrix product `self * rhs`, as a fresh matrix.
    ///
    /// A `1 x 1` operand on either side degrades to element-wise scaling.
    /// A single-column right operand routes through the matrix-vector
    /// path.
    pub fn mmul<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Matrix<T>> {
        let mut result = Matrix::empty();
        self.mmul_into(rhs, &mut result)?;
        Ok(result)
    }

    /// Matrix product into `result`, reallocating it unless it already has
    /// the product's exact shape.
    pub fn mmul_into<'a>(
        &self,
        rhs: impl Into<Operand<'a, T>>,
        result: &mut Matrix<T>,
    ) -> Result<()> {
        match rhs.into() {
            Operand::Value(v) => self.mul_into(Operand::Value(v), result),
            Operand::Itself => {
                self.check_multipliable(self, "mmul")?;
                if result.rows != self.rows || result.columns != self.columns {
                    result.resize(self.rows, self.columns);
                }
                dispatch::gemm(T::one(), self, self, T::zero(), result)
            }
            Operand::Mat(o) => {
                if o.is_scalar() && !self.is_scalar() {
                    return self.mul_into(Operand::Value(o.data[0]), result);
                }
                if self.is_scalar() && !o.is_scalar() {
                    return o.mul_into(Operand::Value(self.data[0]), result);
                }
                self.check_multipliable(o, "mmul")?;
                if result.rows != self.rows || result.columns != o.columns {
                    result.resize(self.rows, o.columns);
                }
                if o.columns == 1 {
                    dispatch::gemv(T::one(), self, o, T::zero(), result)
                } else {
                    dispatch::gemm(T::one(), self, o, T::zero(), result)
                }
            }
        }
    }

    /// Matrix product in place on the receiver.
    ///
    /// The receiver is an input of the product, so the multiply runs into
    /// a temporary which then replaces the receiver's buffer. Fails with
    /// [`Error::InvalidDestination`] when the product's shape differs from
    /// the receiver's (only a square right operand keeps it fixed).
    pub fn mmul_assign<'a>(&mut self, rhs: impl Into<Operand<'a, T>>) -> Result<&mut Self> {
        match rhs.into() {
            Operand::Value(v) => self.mul_assign(Operand::Value(v)),
            Operand::Itself => {
                self.check_multipliable(self, "mmul")?;
                log::debug!(
                    "mmul: destination aliases an operand, multiplying through a temporary"
                );
                let mut tmp = Matrix::new(self.rows, self.columns);
                dispatch::gemm(T::one(), self, self, T::zero(), &mut tmp)?;
                *self = tmp;
                Ok(self)
            }
            Operand::Mat(o) => {
                if o.is_scalar() && !self.is_scalar() {
                    return self.mul_assign(Operand::Value(o.data[0]));
                }
                if self.is_scalar() && !o.is_scalar() {
                    return self.mul_assign(Operand::Mat(o));
                }
                self.check_multipliable(o, "mmul")?;
                if self.columns != o.columns {
                    // The product is rows x o.columns; the receiver cannot
                    // change shape while it is also an input.
                    return Err(Error::InvalidDestination { op: "mmul" });
                }
                log::debug!(
                    "mmul: destination aliases an operand, multiplying through a temporary"
                );
                let mut tmp = Matrix::new(self.rows, o.columns);
                if o.columns == 1 {
                    dispatch::gemv(T::one(), self, o, T::zero(), &mut tmp)?;
                } else {
                    dispatch::gemm(T::one(), self, o, T::zero(), &mut tmp)?;
                }
                *self = tmp;
                Ok(self)
            }
        }
    }

    /// Rank-1 update `self += alpha * x * y^T`.
    ///
    /// `x` must have `rows` elements and `y` must have `columns` elements;
    /// either may be any shape of that length.
    pub fn rank_one_update(&mut self, alpha: T, x: &Matrix<T>, y: &Matrix<T>) -> Result<&mut Self> {
        if x.len() != self.rows {
            return Err(Error::SizeMismatch {
                op: "rank_one_update: x",
                expected: self.rows,
                got: x.len(),
            });
        }
        if y.len() != self.columns {
            return Err(Error::SizeMismatch {
                op: "rank_one_update: y",
                expected: self.columns,
                got: y.len(),
            });
        }
        dispatch::ger(alpha, x, y, self)?;
        Ok(self)
    }
}

// ============================================================================
// Row and column vector broadcasts
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Add a length-`columns` vector to every row, in place.
    ///
    /// One strided accumulate per row.
    pub fn add_row_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_row_vector_operand(x, "add_row_vector")?;
        for i in 0..self.rows {
            kernels::axpy(
                self.columns,
                T::one(),
                &x.data,
                0,
                1,
                &mut self.data,
                i,
                self.rows,
            )?;
        }
        Ok(self)
    }

    /// Subtract a length-`columns` vector from every row, in place.
    pub fn sub_row_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_row_vector_operand(x, "sub_row_vector")?;
        for i in 0..self.rows {
            kernels::axpy(
                self.columns,
                -T::one(),
                &x.data,
                0,
                1,
                &mut self.data,
                i,
                self.rows,
            )?;
        }
        Ok(self)
    }

    /// Add a length-`rows` vector to every column, in place.
    pub fn add_column_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_column_vector_operand(x, "add_column_vector")?;
        for j in 0..self.columns {
            kernels::axpy(
                self.rows,
                T::one(),
                &x.data,
                0,
                1,
                &mut self.data,
                j * self.rows,
                1,
            )?;
        }
        Ok(self)
    }

    /// Subtract a length-`rows` vector from every column, in place.
    pub fn sub_column_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_column_vector_operand(x, "sub_column_vector")?;
        for j in 0..self.columns {
            kernels::axpy(
                self.rows,
                -T::one(),
                &x.data,
                0,
                1,
                &mut self.data,
                j * self.rows,
                1,
            )?;
        }
        Ok(self)
    }

    /// Multiply every row element-wise by a length-`columns` vector, in
    /// place.
    pub fn mul_row_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_row_vector_operand(x, "mul_row_vector")?;
        for j in 0..self.columns {
            let v = x.data[j];
            for i in 0..self.rows {
                self.data[i + self.rows * j] *= v;
            }
        }
        Ok(self)
    }

    /// Divide every row element-wise by a length-`columns` vector, in
    /// place.
    pub fn div_row_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_row_vector_operand(x, "div_row_vector")?;
        for j in 0..self.columns {
            let v = x.data[j];
            for i in 0..self.rows {
                self.data[i + self.rows * j] /= v;
            }
        }
        Ok(self)
    }

    /// Multiply every column element-wise by a length-`rows` vector, in
    /// place.
    pub fn mul_column_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_column_vector_operand(x, "mul_column_vector")?;
        for j in 0..self.columns {
            for i in 0..self.rows {
                self.data[i + self.rows * j] *= x.data[i];
            }
        }
        Ok(self)
    }

    /// Divide every column element-wise by a length-`rows` vector, in
    /// place.
    pub fn div_column_vector_assign(&mut self, x: &Matrix<T>) -> Result<&mut Self> {
        self.check_column_vector_operand(x, "div_column_vector")?;
        for j in 0..self.columns {
            for i in 0..self.rows {
                self.data[i + self.rows * j] /= x.data[i];
            }
        }
        Ok(self)
    }

    /// Add a vector to every row, as a fresh matrix.
    pub fn add_row_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.add_row_vector_assign(x)?;
        Ok(m)
    }

    /// Subtract a vector from every row, as a fresh matrix.
    pub fn sub_row_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.sub_row_vector_assign(x)?;
        Ok(m)
    }

    /// Add a vector to every column, as a fresh matrix.
    pub fn add_column_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.add_column_vector_assign(x)?;
        Ok(m)
    }

    /// Subtract a vector from every column, as a fresh matrix.
    pub fn sub_column_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.sub_column_vector_assign(x)?;
        Ok(m)
    }

    /// Multiply every row by a vector, as a fresh matrix.
    pub fn mul_row_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.mul_row_vector_assign(x)?;
        Ok(m)
    }

    /// Divide every row by a vector, as a fresh matrix.
    pub fn div_row_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.div_row_vector_assign(x)?;
        Ok(m)
    }

    /// Multiply every column by a vector, as a fresh matrix.
    pub fn mul_column_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.mul_column_vector_assign(x)?;
        Ok(m)
    }

    /// Divide every column by a vector, as a fresh matrix.
    pub fn div_column_vector(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let mut m = self.dup();
        m.div_column_vector_assign(x)?;
        Ok(m)
    }

    /// Scale a single row in place.
    ///
    /// # Panics
    ///
    /// Panics when the row index is out of bounds.
    pub fn mul_row(&mut self, r: usize, alpha: T) -> &mut Self {
        assert!(r < self.rows, "row index out of bounds");
        for j in 0..self.columns {
            self.data[r + self.rows * j] *= alpha;
        }
        self
    }

    /// Scale a single column in place.
    ///
    /// # Panics
    ///
    /// Panics when the column index is out of bounds.
    pub fn mul_column(&mut self, c: usize, alpha: T) -> &mut Self {
        assert!(c < self.columns, "column index out of bounds");
        for i in 0..self.rows {
            self.data[i + self.rows * c] *= alpha;
        }
        self
    }

    fn check_row_vector_operand(&self, x: &Matrix<T>, op: &'static str) -> Result<()> {
        if x.len() != self.columns {
            return Err(Error::SizeMismatch {
                op,
                expected: self.columns,
                got: x.len(),
            });
        }
        Ok(())
    }

    fn check_column_vector_operand(&self, x: &Matrix<T>, op: &'static str) -> Result<()> {
        if x.len() != self.rows {
            return Err(Error::SizeMismatch {
                op,
                expected: self.rows,
                got: x.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Operator sugar
// ============================================================================

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl<'a, 'b, T: Element> $trait<&'b Matrix<T>> for &'a Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: &'b Matrix<T>) -> Matrix<T> {
                match Matrix::$inherent(self, rhs) {
                    Ok(m) => m,
                    Err(e) => panic!("{}", e),
                }
            }
        }

        impl<'a, T: Element> $trait<T> for &'a Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                match Matrix::$inherent(self, rhs) {
                    Ok(m) => m,
                    Err(e) => panic!("{}", e),
                }
            }
        }
    };
}

binary_operator!(Add, add, add);
binary_operator!(Sub, sub, sub);
// `*` is matrix multiplication; use `mul`/`mul_assign` for the
// element-wise product.
binary_operator!(Mul, mul, mmul);
binary_operator!(Div, div, div);

impl<'a, T: Element> Neg for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        let mut m = self.dup();
        m.neg_assign();
        m
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn m22() -> Matrix<f64> {
        Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap()
    }

    fn n22() -> Matrix<f64> {
        Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap()
    }

    #[test]
    fn test_add_fresh() {
        let c = m22().add(&n22()).unwrap();
        assert_eq!(c, Matrix::from_rows(&[[6.0, 8.0], [10.0, 12.0]]).unwrap());
    }

    #[test]
    fn test_three_destinations_agree() {
        let (a, b) = (m22(), n22());
        let fresh = a.add(&b).unwrap();

        let mut into = Matrix::<f64>::new(2, 2);
        a.add_into(&b, &mut into).unwrap();
        assert_eq!(fresh, into);

        let mut assign = a.dup();
        assign.add_assign(&b).unwrap();
        assert_eq!(fresh, assign);
    }

    #[test]
    fn test_add_scalar_value_and_scalar_matrix_agree() {
        let a = m22();
        let by_value = a.add(2.0).unwrap();
        let by_matrix = a.add(&Matrix::scalar(2.0)).unwrap();
        assert_eq!(by_value, by_matrix);
        assert_eq!(by_value.get(1, 1), 6.0);
    }

    #[test]
    fn test_scalar_receiver_broadcasts() {
        // 1x1 + 2x2 takes the operand's shape.
        let s = Matrix::scalar(10.0);
        let c = s.add(&m22()).unwrap();
        assert_eq!(c.rows(), 2);
        assert_eq!(c.get(1, 0), 13.0);

        // In place: the receiver's value is read out, then it reallocates.
        let mut s = Matrix::scalar(10.0);
        s.sub_assign(&m22()).unwrap();
        assert_eq!(s.rows(), 2);
        assert_eq!(s.get(0, 0), 9.0);
        assert_eq!(s.get(1, 1), 6.0);
    }

    #[test]
    fn test_length_not_shape_compatibility() {
        // 3x3 against 1x9: same element count, different shapes.
        let a = Matrix::<f64>::ones(3, 3);
        let b = Matrix::<f64>::ones(1, 9);
        let c = a.add(&b).unwrap();
        assert_eq!(c.rows(), 3);
        assert_eq!(c.sum(), 18.0);

        let short = Matrix::<f64>::ones(1, 8);
        assert!(matches!(
            a.add(&short),
            Err(Error::SizeMismatch { op: "add", .. })
        ));
    }

    #[test]
    fn test_sub_and_rsub() {
        let a = m22();
        let b = n22();
        let d = b.sub(&a).unwrap();
        assert_eq!(d.as_slice(), [4.0, 4.0, 4.0, 4.0]);
        // rsub swaps the roles.
        let r = a.rsub(&b).unwrap();
        assert_eq!(r, d);
        let rv = a.rsub(10.0).unwrap();
        assert_eq!(rv.get(0, 0), 9.0);
    }

    #[test]
    fn test_rsub_assign_negates_then_accumulates() {
        let mut a = m22();
        a.rsub_assign(&n22()).unwrap();
        assert_eq!(a.as_slice(), [4.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_self_subtraction_zeroes() {
        let mut x = m22();
        x.sub_assign(Operand::Itself).unwrap();
        assert_eq!(x, Matrix::zeros(2, 2));
    }

    #[test]
    fn test_self_addition_doubles() {
        let mut x = m22();
        x.add_assign(Operand::Itself).unwrap();
        assert_eq!(x, Matrix::from_rows(&[[2.0, 4.0], [6.0, 8.0]]).unwrap());
    }

    #[test]
    fn test_mul_div_rdiv() {
        let a = m22();
        let p = a.mul(&a).unwrap();
        assert_eq!(p.as_slice(), [1.0, 9.0, 4.0, 16.0]);
        let q = a.div(2.0).unwrap();
        assert_eq!(q.get(1, 1), 2.0);
        let r = a.rdiv(12.0).unwrap();
        assert_eq!(r.as_slice(), [12.0, 4.0, 6.0, 3.0]);
    }

    #[test]
    fn test_comparisons_yield_truth_matrices() {
        let a = m22();
        let t = a.gt(2.0).unwrap();
        assert_eq!(t.as_slice(), [0.0, 1.0, 0.0, 1.0]);
        let e = a.eq_elements(&m22()).unwrap();
        assert_eq!(e.sum(), 4.0);
        let n = a.ne_elements(3.0).unwrap();
        assert_eq!(n.sum(), 3.0);
    }

    #[test]
    fn test_logical_ops() {
        let a = Matrix::from_vec(1, 4, vec![0.0, 1.0, 0.0, 2.0]).unwrap();
        let b = Matrix::from_vec(1, 4, vec![0.0, 0.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.and(&b).unwrap().as_slice(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(a.or(&b).unwrap().as_slice(), [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(a.xor(&b).unwrap().as_slice(), [0.0, 1.0, 1.0, 0.0]);
        assert_eq!(a.not().as_slice(), [1.0, 0.0, 1.0, 0.0]);
        assert_eq!(a.truth().as_slice(), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_min_max_elements() {
        let a = m22();
        let b = Matrix::from_rows(&[[4.0, 1.0], [2.0, 5.0]]).unwrap();
        assert_eq!(a.min_elements(&b).unwrap().as_slice(), [1.0, 2.0, 1.0, 4.0]);
        assert_eq!(a.max_elements(&b).unwrap().as_slice(), [4.0, 3.0, 2.0, 5.0]);
    }

    #[test]
    fn test_mmul_square() {
        let c = m22().mmul(&n22()).unwrap();
        assert_eq!(c, Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]).unwrap());
    }

    #[test]
    fn test_mmul_vector_path() {
        // 2x3 times 3x1.
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let x = Matrix::vector(vec![1.0, 2.0, 3.0]);
        let y = a.mmul(&x).unwrap();
        assert_eq!(y.rows(), 2);
        assert_eq!(y.columns(), 1);
        assert_eq!(y.as_slice(), [14.0, 32.0]);
    }

    #[test]
    fn test_mmul_incompatible() {
        let a = Matrix::<f64>::new(2, 3);
        let b = Matrix::<f64>::new(2, 2);
        assert!(matches!(
            a.mmul(&b),
            Err(Error::SizeMismatch { op: "mmul", .. })
        ));
    }

    #[test]
    fn test_mmul_scalar_degrade() {
        let a = m22();
        let c = a.mmul(&Matrix::scalar(2.0)).unwrap();
        assert_eq!(c, a.mul(2.0).unwrap());
    }

    #[test]
    fn test_mmul_assign_square_matches_fresh() {
        let fresh = m22().mmul(&n22()).unwrap();
        let mut x = m22();
        x.mmul_assign(&n22()).unwrap();
        assert_eq!(x, fresh);
    }

    #[test]
    fn test_mmul_assign_itself() {
        let fresh = m22().mmul(&m22()).unwrap();
        let mut x = m22();
        x.mmul_assign(Operand::Itself).unwrap();
        assert_eq!(x, fresh);
    }

    #[test]
    fn test_mmul_assign_shape_change_is_rejected() {
        // 2x3 times 3x1 produces 2x1; the receiver cannot become that.
        let mut a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let x = Matrix::vector(vec![1.0, 2.0, 3.0]);
        assert_eq!(
            a.mmul_assign(&x).unwrap_err(),
            Error::InvalidDestination { op: "mmul" }
        );
    }

    #[test]
    fn test_mmul_into_reshapes_destination() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let x = Matrix::vector(vec![1.0, 2.0, 3.0]);
        let mut out = Matrix::<f64>::new(3, 3);
        a.mmul_into(&x, &mut out).unwrap();
        assert_eq!(out.rows(), 2);
        assert_eq!(out.columns(), 1);
        assert_eq!(out.as_slice(), [14.0, 32.0]);
    }

    #[test]
    fn test_rank_one_update() {
        let mut a = Matrix::<f64>::zeros(2, 2);
        let x = Matrix::vector(vec![1.0, 2.0]);
        let y = Matrix::vector(vec![3.0, 4.0]);
        a.rank_one_update(2.0, &x, &y).unwrap();
        assert_eq!(a, Matrix::from_rows(&[[6.0, 8.0], [12.0, 16.0]]).unwrap());
        let long = Matrix::vector(vec![1.0, 2.0, 3.0]);
        assert!(a.rank_one_update(1.0, &long, &y).is_err());
    }

    #[test]
    fn test_row_vector_broadcast() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let x = Matrix::row_vector(vec![10.0, 20.0]);
        m.add_row_vector_assign(&x).unwrap();
        assert_eq!(m, Matrix::from_rows(&[[11.0, 22.0], [13.0, 24.0]]).unwrap());
        m.sub_row_vector_assign(&x).unwrap();
        assert_eq!(m, m22());
    }

    #[test]
    fn test_column_vector_broadcast() {
        let m = m22();
        let x = Matrix::vector(vec![10.0, 20.0]);
        let out = m.add_column_vector(&x).unwrap();
        assert_eq!(
            out,
            Matrix::from_rows(&[[11.0, 12.0], [23.0, 24.0]]).unwrap()
        );
        let scaled = m.mul_column_vector(&x).unwrap();
        assert_eq!(
            scaled,
            Matrix::from_rows(&[[10.0, 20.0], [60.0, 80.0]]).unwrap()
        );
    }

    #[test]
    fn test_broadcast_length_check() {
        let mut m = m22();
        let bad = Matrix::row_vector(vec![1.0, 2.0, 3.0]);
        assert!(m.add_row_vector_assign(&bad).is_err());
        assert!(m.div_column_vector_assign(&bad).is_err());
    }

    #[test]
    fn test_mul_single_row_and_column() {
        let mut m = m22();
        m.mul_row(0, 10.0);
        assert_eq!(m, Matrix::from_rows(&[[10.0, 20.0], [3.0, 4.0]]).unwrap());
        m.mul_column(1, 0.5);
        assert_eq!(m, Matrix::from_rows(&[[10.0, 10.0], [3.0, 2.0]]).unwrap());
    }

    #[test]
    fn test_div_row_vector() {
        let m = Matrix::from_rows(&[[2.0, 9.0], [4.0, 12.0]]).unwrap();
        let x = Matrix::row_vector(vec![2.0, 3.0]);
        let out = m.div_row_vector(&x).unwrap();
        assert_eq!(out, Matrix::from_rows(&[[1.0, 3.0], [2.0, 4.0]]).unwrap());
    }

    #[test]
    fn test_operator_sugar() {
        let a = m22();
        let b = n22();
        assert_eq!(&a + &b, a.add(&b).unwrap());
        assert_eq!(&b - &a, b.sub(&a).unwrap());
        assert_eq!(&a * &b, a.mmul(&b).unwrap());
        assert_eq!(&a / 2.0, a.div(2.0).unwrap());
        assert_eq!((-&a).get(0, 0), -1.0);
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn test_operator_sugar_panics_on_mismatch() {
        let a = m22();
        let b = Matrix::<f64>::ones(1, 3);
        let _ = &a + &b;
    }

    #[test]
    fn test_into_keeps_destination_shape_on_equal_length() {
        // A 1x4 destination already has 4 elements; add_into keeps it.
        let a = m22();
        let mut out = Matrix::<f64>::new(1, 4);
        a.add_into(&n22(), &mut out).unwrap();
        assert_eq!(out.rows(), 1);
        assert_eq!(out.as_slice(), [6.0, 10.0, 8.0, 12.0]);
    }

    #[test]
    fn test_add_then_sub_round_trips() {
        let x = Matrix::from_rows(&[[0.1, 0.2], [0.3, 0.4]]).unwrap();
        let y = n22();
        let back = x.add(&y).unwrap().sub(&y).unwrap();
        assert!(back.eq_approx(&x, 1e-12));
    }

    #[test]
    fn test_assign_forms_chain() {
        let mut x = m22();
        x.add_assign(1.0).unwrap().sub_assign(1.0).unwrap();
        assert_eq!(x, m22());
    }

    #[test]
    fn test_nan_self_subtraction_stays_nan() {
        let mut x = Matrix::from_vec(1, 2, vec![1.0, f64::NAN]).unwrap();
        x.sub_assign(Operand::Itself).unwrap();
        assert_eq!(x.get(0, 0), 0.0);
        assert!(x.get(0, 1).is_nan());
    }
}
