//! Element types accepted by the dispatch layer.
//!
//! Every operation in this crate is generic over one of three small, sealed
//! trait families:
//!
//! - [`Element`] — anything that can be filled or copied (`i32`, `u32`, `i64`,
//!   `u64`, `f32`, `f64`).
//! - [`Real`] — the two floating-point widths, which carry the
//!   precision-specific GEMM kernel and the bit-level helpers.
//! - [`BernoulliOutput`] — the integer types a Bernoulli draw may be written as.
//!
//! The traits are sealed: the set of element types is fixed, so adding one
//! means adding a kernel binding here rather than implementing a trait
//! downstream.

use core::fmt::{Debug, Display};
use core::iter::Sum;

use bytemuck::Pod;
use num_traits::Float;
use rand::distr::uniform::SampleUniform;

mod sealed {
    pub trait Sealed {}
}

/// A plain-old-data buffer element.
///
/// All-zero bytes are a valid value for every implementor and equal `0`, which
/// is what lets [`crate::set`] clear a buffer with a bulk byte fill.
pub trait Element: Pod + Debug + Default + PartialEq + Send + Sync + sealed::Sealed {
    /// Additive identity.
    const ZERO: Self;
}

macro_rules! impl_element {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl Element for $t {
                const ZERO: Self = $zero;
            }
        )*
    };
}

impl_element! {
    i32 => 0,
    u32 => 0,
    i64 => 0,
    u64 => 0,
    f32 => 0.0,
    f64 => 0.0,
}

/// A floating-point element: `f32` or `f64`.
pub trait Real: Element + Float + SampleUniform + Sum + Display {
    /// Absolute differences below this are considered exact.
    const MIN_ERROR: Self;
    /// Absolute differences below this are a close match.
    const AVG_ERROR: Self;
    /// Absolute differences at or above this are not considered equal.
    const MAX_ERROR: Self;

    /// The smallest representable value strictly greater than `self`.
    #[must_use]
    fn next_up(self) -> Self;

    /// The raw IEEE-754 bit pattern, widened to 64 bits.
    fn bits(self) -> u64;

    /// `1` for `true`, `0` for `false`.
    fn from_bool(b: bool) -> Self;

    /// Lossy conversion to `f64` (exact for both implementors).
    fn as_f64(self) -> f64;

    /// Precision-specific GEMM kernel over explicit row/column strides.
    ///
    /// Computes `C = alpha * A * B + beta * C` where `A` is `m x k`, `B` is
    /// `k x n` and `C` is `m x n`, each addressed by `(row_stride, col_stride)`.
    ///
    /// # Safety
    ///
    /// Every element addressed through the strides must lie inside the buffer
    /// behind the corresponding pointer, and `c` must not alias `a` or `b`.
    #[allow(clippy::too_many_arguments)]
    unsafe fn gemm_kernel(
        m: usize,
        k: usize,
        n: usize,
        alpha: Self,
        a: *const Self,
        rsa: isize,
        csa: isize,
        b: *const Self,
        rsb: isize,
        csb: isize,
        beta: Self,
        c: *mut Self,
        rsc: isize,
        csc: isize,
    );
}

macro_rules! impl_real {
    ($t:ty, $kernel:path, $min:expr, $avg:expr, $max:expr) => {
        impl Real for $t {
            const MIN_ERROR: Self = $min;
            const AVG_ERROR: Self = $avg;
            const MAX_ERROR: Self = $max;

            #[inline]
            fn next_up(self) -> Self {
                <$t>::next_up(self)
            }

            #[inline]
            fn bits(self) -> u64 {
                u64::from(self.to_bits())
            }

            #[inline]
            fn from_bool(b: bool) -> Self {
                if b { 1.0 } else { 0.0 }
            }

            #[inline]
            #[allow(clippy::cast_lossless)]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            unsafe fn gemm_kernel(
                m: usize,
                k: usize,
                n: usize,
                alpha: Self,
                a: *const Self,
                rsa: isize,
                csa: isize,
                b: *const Self,
                rsb: isize,
                csb: isize,
                beta: Self,
                c: *mut Self,
                rsc: isize,
                csc: isize,
            ) {
                // SAFETY: upheld by the caller, see the trait docs.
                unsafe {
                    $kernel(m, k, n, alpha, a, rsa, csa, b, rsb, csb, beta, c, rsc, csc);
                }
            }
        }
    };
}

impl_real!(f32, matrixmultiply::sgemm, 1e-6, 1e-5, 1e-3);
impl_real!(f64, matrixmultiply::dgemm, 1e-13, 1e-6, 1e-3);

/// Integer types a Bernoulli draw can be written into.
pub trait BernoulliOutput: Element {
    /// `1` for a success, `0` otherwise.
    fn from_outcome(success: bool) -> Self;
}

impl BernoulliOutput for i32 {
    #[inline]
    fn from_outcome(success: bool) -> Self {
        Self::from(success)
    }
}

impl BernoulliOutput for u32 {
    #[inline]
    fn from_outcome(success: bool) -> Self {
        Self::from(success)
    }
}

/// Returns the smallest representable value strictly greater than `b`,
/// stepping toward positive infinity.
///
/// `next_after(T::MAX)` is `+inf`; `next_after(+inf)` is `+inf`; NaN stays NaN.
///
/// # Example
///
/// ```
/// use briny_math::next_after;
///
/// let up = next_after(1.0f32);
/// assert!(up > 1.0);
/// assert_eq!(up, 1.0 + f32::EPSILON);
/// ```
#[inline]
#[must_use]
pub fn next_after<T: Real>(b: T) -> T {
    Real::next_up(b)
}
