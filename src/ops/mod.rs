//! # Operation Dispatch Layer
//!
//! Precision-dispatched kernels over caller-owned buffers.
//!
//! ## Submodules
//!
//! - [`unary`] — sign, sign-bit and absolute value
//! - [`blas`] — GEMM, GEMV and level-1 vector routines
//! - [`vml`] — vectorized elementwise arithmetic and transcendentals
//! - [`buffer`] — fill, scalar add and copy
//! - [`wgpu`] *(opt-in)* — device copy primitive used in GPU mode
//!
//! ## Dispatch
//!
//! Each operation is generic over [`crate::Real`] (or [`crate::Element`] for
//! fill/copy). The trait impl for `f32` or `f64` picks the kernel, so the
//! dispatch is resolved at compile time. Only [`buffer::copy`] also looks at
//! the runtime [`crate::mode::Mode`].
//!
//! ## Preconditions
//!
//! Arguments are checked before any kernel runs. A failed check panics with
//! the corresponding [`crate::MathError`] message; no operation performs a
//! partial write.
//!
//! ## Feature Flags
//!
//! - `wgpu` — enables the `wgpu` device copy primitive

use crate::element::Element;
use rayon::prelude::*;

pub mod blas;
pub mod buffer;
pub mod unary;
pub mod vml;

#[cfg(feature = "wgpu")]
pub mod wgpu;

/// Buffers with at least this many elements are split across the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Writes `y[i] = f(x[i])`. Lengths are checked by the caller.
#[inline]
pub(crate) fn map_unary<T, U, F>(x: &[T], y: &mut [U], f: F)
where
    T: Element,
    U: Element,
    F: Fn(T) -> U + Send + Sync,
{
    if y.len() >= PARALLEL_THRESHOLD {
        y.par_iter_mut()
            .zip(x.par_iter())
            .for_each(|(out, &v)| *out = f(v));
    } else {
        for (out, &v) in y.iter_mut().zip(x) {
            *out = f(v);
        }
    }
}

/// Writes `y[i] = f(a[i], b[i])`. Lengths are checked by the caller.
#[inline]
pub(crate) fn map_binary<T, F>(a: &[T], b: &[T], y: &mut [T], f: F)
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    if y.len() >= PARALLEL_THRESHOLD {
        y.par_iter_mut()
            .zip(a.par_iter().zip(b.par_iter()))
            .for_each(|(out, (&u, &v))| *out = f(u, v));
    } else {
        for ((out, &u), &v) in y.iter_mut().zip(a).zip(b) {
            *out = f(u, v);
        }
    }
}

/// Updates `y[i] = f(x[i], y[i])` in place. Lengths are checked by the caller.
#[inline]
pub(crate) fn update_with<T, F>(x: &[T], y: &mut [T], f: F)
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    if y.len() >= PARALLEL_THRESHOLD {
        y.par_iter_mut()
            .zip(x.par_iter())
            .for_each(|(out, &v)| *out = f(v, *out));
    } else {
        for (out, &v) in y.iter_mut().zip(x) {
            *out = f(v, *out);
        }
    }
}

/// Applies `f` to every element of `y` in place.
#[inline]
pub(crate) fn update_in_place<T, F>(y: &mut [T], f: F)
where
    T: Element,
    F: Fn(T) -> T + Send + Sync,
{
    if y.len() >= PARALLEL_THRESHOLD {
        y.par_iter_mut().for_each(|out| *out = f(*out));
    } else {
        for out in y.iter_mut() {
            *out = f(*out);
        }
    }
}
