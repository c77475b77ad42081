//! Vectorized elementwise math.
//!
//! One output element per input element, IEEE semantics throughout: division
//! by zero yields an infinity or NaN, `ln` of a negative value is NaN.

use super::{map_binary, map_unary};
use crate::element::Real;
use crate::error::{ensure, non_empty, same_len};

#[inline]
fn check_unary(op: &'static str, a_len: usize, y_len: usize) {
    ensure(non_empty(op, a_len).and_then(|()| same_len(op, a_len, y_len)));
}

#[inline]
fn check_binary(op: &'static str, a_len: usize, b_len: usize, y_len: usize) {
    ensure(
        non_empty(op, a_len)
            .and_then(|()| same_len(op, a_len, b_len))
            .and_then(|()| same_len(op, a_len, y_len)),
    );
}

macro_rules! binary_op {
    ($(#[$doc:meta])* $name:ident, |$u:ident, $v:ident| $body:expr) => {
        $(#[$doc])*
        ///
        /// # Panics
        ///
        /// If `a` is empty or the three lengths differ.
        pub fn $name<T: Real>(a: &[T], b: &[T], y: &mut [T]) {
            check_binary(stringify!($name), a.len(), b.len(), y.len());
            map_binary(a, b, y, |$u, $v| $body);
        }
    };
}

macro_rules! unary_op {
    ($(#[$doc:meta])* $name:ident, $f:expr) => {
        $(#[$doc])*
        ///
        /// # Panics
        ///
        /// If `a` is empty or `y.len() != a.len()`.
        pub fn $name<T: Real>(a: &[T], y: &mut [T]) {
            check_unary(stringify!($name), a.len(), y.len());
            map_unary(a, y, $f);
        }
    };
}

binary_op!(
    /// `y[i] = a[i] + b[i]`.
    add, |u, v| u + v
);
binary_op!(
    /// `y[i] = a[i] - b[i]`.
    sub, |u, v| u - v
);
binary_op!(
    /// `y[i] = a[i] * b[i]`.
    mul, |u, v| u * v
);
binary_op!(
    /// `y[i] = a[i] / b[i]`.
    div, |u, v| u / v
);

unary_op!(
    /// `y[i] = a[i]²`.
    sqr, |v: T| v * v
);
unary_op!(
    /// `y[i] = eᵃ⁽ⁱ⁾`.
    exp, T::exp
);
unary_op!(
    /// Natural logarithm, `y[i] = ln a[i]`.
    ln, T::ln
);
unary_op!(
    /// `y[i] = |a[i]|`.
    abs, T::abs
);

/// `y[i] = a[i]ᵇ` for a scalar exponent `b`.
///
/// # Panics
///
/// If `a` is empty or `y.len() != a.len()`.
///
/// # Example
///
/// ```
/// let mut y = [0.0f64; 3];
/// briny_math::powx(&[1.0, 2.0, 3.0], 2.0, &mut y);
/// assert_eq!(y, [1.0, 4.0, 9.0]);
/// ```
pub fn powx<T: Real>(a: &[T], b: T, y: &mut [T]) {
    check_unary("powx", a.len(), y.len());
    map_unary(a, y, |v| v.powf(b));
}
