//! Approximate equality of kernel output.
//!
//! Results that went through a different summation order (parallel
//! reductions, blocked GEMM) rarely match a reference bit for bit. These
//! helpers classify the absolute difference into bands whose widths come from
//! [`Real::MIN_ERROR`], [`Real::AVG_ERROR`] and [`Real::MAX_ERROR`].

use crate::element::Real;

/// How close two values are.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApproxEquality {
    /// Below `MIN_ERROR`.
    Precise = 0,
    /// Below `AVG_ERROR`.
    Partial = 1,
    /// Below `MAX_ERROR`.
    Relative = 2,
    /// Not equal.
    Scarce = 3,
}

/// Classifies the distance between `self` and `rhs`.
pub trait RelativeEq<Rhs: ?Sized = Self> {
    /// The band `self` falls into relative to `rhs`.
    fn approx_eq(&self, rhs: &Rhs) -> ApproxEquality;
}

impl<T: Real> RelativeEq for T {
    fn approx_eq(&self, rhs: &Self) -> ApproxEquality {
        let dif = (*self - *rhs).abs();
        if dif < T::MIN_ERROR {
            ApproxEquality::Precise
        } else if dif < T::AVG_ERROR {
            ApproxEquality::Partial
        } else if dif < T::MAX_ERROR {
            ApproxEquality::Relative
        } else {
            ApproxEquality::Scarce
        }
    }
}

/// A slice is as close as its worst element; slices of different lengths are
/// [`ApproxEquality::Scarce`].
impl<T: Real> RelativeEq for [T] {
    fn approx_eq(&self, rhs: &Self) -> ApproxEquality {
        if self.len() != rhs.len() {
            return ApproxEquality::Scarce;
        }
        let mut eq = ApproxEquality::Precise;
        for (a, b) in self.iter().zip(rhs) {
            eq = eq.max(a.approx_eq(b));
            if eq == ApproxEquality::Scarce {
                break;
            }
        }
        eq
    }
}

/// `true` when `a` and `b` are at most [`ApproxEquality::Partial`] apart.
pub fn approx_eq<A: RelativeEq<B> + ?Sized, B: ?Sized>(a: &A, b: &B) -> bool {
    a.approx_eq(b) <= ApproxEquality::Partial
}
