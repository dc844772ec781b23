//! Strided buffer kernels: Level-1 fallbacks over flat arrays.
//!
//! These implement the linear-time vector primitives (copy, swap,
//! scaled-accumulate, dot) directly on slices with an explicit start offset
//! and stride per buffer. Crossing into a native BLAS costs a call and a
//! copy per buffer, which O(n) work never amortizes, so the dispatch layer
//! always routes Level-1 operations here.
//!
//! Contract: each kernel validates `offset + (n - 1) * stride` against the
//! buffer length before touching memory and fails with
//! [`Error::OutOfBounds`] on violation. The dominant unit-stride,
//! zero-offset case takes a bulk path instead of an index loop.

#![allow(clippy::too_many_arguments)]

use crate::dtype::Element;
use crate::error::{Error, Result};

/// Validate that walking `n` elements from `offset` by `stride` stays
/// inside a buffer of length `len`.
fn check_bounds(what: &'static str, n: usize, len: usize, offset: usize, stride: usize) -> Result<()> {
    if n == 0 {
        return Ok(());
    }
    let last = offset + (n - 1) * stride;
    if last >= len {
        return Err(Error::OutOfBounds {
            what,
            n,
            len,
            offset,
            stride,
        });
    }
    Ok(())
}

/// Copy `n` elements of `x` into `y`: `y[i] = x[i]`.
pub fn copy<T: Element>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_stride: usize,
    y: &mut [T],
    y_off: usize,
    y_stride: usize,
) -> Result<()> {
    check_bounds("copy: x", n, x.len(), x_off, x_stride)?;
    check_bounds("copy: y", n, y.len(), y_off, y_stride)?;

    if x_stride == 1 && y_stride == 1 {
        y[y_off..y_off + n].copy_from_slice(&x[x_off..x_off + n]);
    } else {
        let (mut xi, mut yi) = (x_off, y_off);
        for _ in 0..n {
            y[yi] = x[xi];
            xi += x_stride;
            yi += y_stride;
        }
    }
    Ok(())
}

/// Exchange `n` elements of `x` and `y`.
pub fn swap<T: Element>(
    n: usize,
    x: &mut [T],
    x_off: usize,
    x_stride: usize,
    y: &mut [T],
    y_off: usize,
    y_stride: usize,
) -> Result<()> {
    check_bounds("swap: x", n, x.len(), x_off, x_stride)?;
    check_bounds("swap: y", n, y.len(), y_off, y_stride)?;

    if x_stride == 1 && y_stride == 1 && x_off == 0 && y_off == 0 {
        for (a, b) in x[..n].iter_mut().zip(y[..n].iter_mut()) {
            core::mem::swap(a, b);
        }
    } else {
        let (mut xi, mut yi) = (x_off, y_off);
        for _ in 0..n {
            let z = x[xi];
            x[xi] = y[yi];
            y[yi] = z;
            xi += x_stride;
            yi += y_stride;
        }
    }
    Ok(())
}

/// Scaled accumulate: `y[i] += alpha * x[i]`.
///
/// `alpha == 1` skips the multiply per element.
pub fn axpy<T: Element>(
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_stride: usize,
    y: &mut [T],
    y_off: usize,
    y_stride: usize,
) -> Result<()> {
    check_bounds("axpy: x", n, x.len(), x_off, x_stride)?;
    check_bounds("axpy: y", n, y.len(), y_off, y_stride)?;

    if x_stride == 1 && y_stride == 1 && x_off == 0 && y_off == 0 {
        if alpha == T::one() {
            for (yi, &xi) in y[..n].iter_mut().zip(x[..n].iter()) {
                *yi += xi;
            }
        } else {
            for (yi, &xi) in y[..n].iter_mut().zip(x[..n].iter()) {
                *yi += alpha * xi;
            }
        }
    } else {
        let (mut xi, mut yi) = (x_off, y_off);
        if alpha == T::one() {
            for _ in 0..n {
                y[yi] += x[xi];
                xi += x_stride;
                yi += y_stride;
            }
        } else {
            for _ in 0..n {
                y[yi] += alpha * x[xi];
                xi += x_stride;
                yi += y_stride;
            }
        }
    }
    Ok(())
}

/// Fused form `z[i] = alpha * x[i] + y[i]` writing a third buffer.
///
/// Used by the dispatch layer for fresh-destination additions, saving the
/// copy-then-accumulate round trip.
pub fn axpy_into<T: Element>(
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_stride: usize,
    y: &[T],
    y_off: usize,
    y_stride: usize,
    z: &mut [T],
    z_off: usize,
    z_stride: usize,
) -> Result<()> {
    check_bounds("axpy_into: x", n, x.len(), x_off, x_stride)?;
    check_bounds("axpy_into: y", n, y.len(), y_off, y_stride)?;
    check_bounds("axpy_into: z", n, z.len(), z_off, z_stride)?;

    if x_stride == 1 && y_stride == 1 && z_stride == 1 && x_off == 0 && y_off == 0 && z_off == 0 {
        if alpha == T::one() {
            for i in 0..n {
                z[i] = x[i] + y[i];
            }
        } else {
            for i in 0..n {
                z[i] = alpha * x[i] + y[i];
            }
        }
    } else {
        let (mut xi, mut yi, mut zi) = (x_off, y_off, z_off);
        for _ in 0..n {
            z[zi] = alpha * x[xi] + y[yi];
            xi += x_stride;
            yi += y_stride;
            zi += z_stride;
        }
    }
    Ok(())
}

/// Dot product `sum(x[i] * y[i])`.
pub fn dot<T: Element>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_stride: usize,
    y: &[T],
    y_off: usize,
    y_stride: usize,
) -> Result<T> {
    check_bounds("dot: x", n, x.len(), x_off, x_stride)?;
    check_bounds("dot: y", n, y.len(), y_off, y_stride)?;

    let mut s = T::zero();
    if x_stride == 1 && y_stride == 1 && x_off == 0 && y_off == 0 {
        for (&a, &b) in x[..n].iter().zip(y[..n].iter()) {
            s += a * b;
        }
    } else {
        let (mut xi, mut yi) = (x_off, y_off);
        for _ in 0..n {
            s += x[xi] * y[yi];
            xi += x_stride;
            yi += y_stride;
        }
    }
    Ok(s)
}
