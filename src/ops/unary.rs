//! Pointwise sign and magnitude functions.

use super::map_unary;
use crate::element::Real;
use crate::error::{ensure, non_empty, same_len};

#[inline]
fn check(op: &'static str, x_len: usize, y_len: usize) {
    ensure(non_empty(op, x_len).and_then(|()| same_len(op, x_len, y_len)));
}

/// Writes the sign of each element: `-1`, `0` or `1`. NaN maps to `0`.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
///
/// # Example
///
/// ```
/// let x = [-2.5f32, 0.0, 3.0];
/// let mut y = [0.0f32; 3];
/// briny_math::sign(&x, &mut y);
/// assert_eq!(y, [-1.0, 0.0, 1.0]);
/// ```
pub fn sign<T: Real>(x: &[T], y: &mut [T]) {
    check("sign", x.len(), y.len());
    map_unary(x, y, |v| {
        T::from_bool(T::zero() < v) - T::from_bool(v < T::zero())
    });
}

/// Writes `1` where the sign bit is set and `0` elsewhere.
///
/// Unlike [`sign`] this sees the sign of `-0.0` and of negative NaNs.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
pub fn sgnbit<T: Real>(x: &[T], y: &mut [T]) {
    check("sgnbit", x.len(), y.len());
    map_unary(x, y, |v| T::from_bool(v.is_sign_negative()));
}

/// Writes `|x[i]|`.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
pub fn fabs<T: Real>(x: &[T], y: &mut [T]) {
    check("fabs", x.len(), y.len());
    map_unary(x, y, T::abs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_maps_to_unit_values() {
        let x = [-3.0f64, -0.0, 0.0, 0.5, f64::NAN, f64::NEG_INFINITY];
        let mut y = [9.0; 6];
        sign(&x, &mut y);
        assert_eq!(y, [-1.0, 0.0, 0.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn sgnbit_sees_negative_zero() {
        let x = [-0.0f32, 0.0, -1.0, 2.0, -f32::NAN];
        let mut y = [0.0; 5];
        sgnbit(&x, &mut y);
        assert_eq!(y, [1.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn fabs_on_large_buffer_takes_parallel_path() {
        let x: Vec<f32> = (0..10_000).map(|i| if i % 2 == 0 { -(i as f32) } else { i as f32 }).collect();
        let mut y = vec![0.0f32; x.len()];
        fabs(&x, &mut y);
        assert!(y.iter().enumerate().all(|(i, &v)| v == i as f32));
    }

    #[test]
    #[should_panic(expected = "sign: count must be positive")]
    fn sign_rejects_empty_input() {
        let mut y: [f32; 0] = [];
        sign(&[], &mut y);
    }

    #[test]
    #[should_panic(expected = "fabs: length mismatch, expected 2, got 3")]
    fn fabs_rejects_mismatched_output() {
        let mut y = [0.0f64; 3];
        fabs(&[1.0, 2.0], &mut y);
    }
}
