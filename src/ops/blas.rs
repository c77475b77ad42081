//! BLAS-style linear algebra over row-major buffers.
//!
//! GEMM and GEMV go through the precision-specific kernel bound on
//! [`Real::gemm_kernel`] (`matrixmultiply::sgemm` / `dgemm`); transposition is
//! expressed by swapping an operand's row and column strides, so no operand is
//! ever copied. The level-1 routines are plain loops that fan out over rayon
//! for large buffers.

use rayon::prelude::*;

use super::{PARALLEL_THRESHOLD, update_in_place, update_with};
use crate::element::Real;
use crate::error::{MathResult, at_least, ensure, non_empty, same_len};

/// Whether an operand is used as stored or transposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transpose {
    /// `op(X) = X`.
    #[default]
    NoTrans,
    /// `op(X) = Xᵀ`.
    Trans,
}

impl Transpose {
    /// Row and column strides of `op(X)` for a row-major `X` with leading
    /// dimension `ld`.
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn strides(self, ld: usize) -> (isize, isize) {
        match self {
            Self::NoTrans => (ld as isize, 1),
            Self::Trans => (1, ld as isize),
        }
    }
}

fn check_dims(op: &'static str, dims: &[usize]) -> MathResult<()> {
    dims.iter().try_for_each(|&d| non_empty(op, d))
}

/// General matrix-matrix multiply: `C = alpha * op(A) * op(B) + beta * C`.
///
/// All matrices are row-major. `op(A)` is `m x k`, `op(B)` is `k x n` and `C` is
/// `m x n`. When `trans_a` is [`Transpose::NoTrans`], `A` is stored `m x k`
/// (leading dimension `k`), otherwise `k x m` (leading dimension `m`); `B`
/// likewise with leading dimension `n` or `k`. `C` always has leading
/// dimension `n`. If `beta` is zero, `C` is not read.
///
/// # Panics
///
/// If any dimension is zero or a buffer holds fewer elements than its shape.
///
/// # Example
///
/// ```
/// use briny_math::{gemm, Transpose};
///
/// let a = [1.0f32, 2.0, 3.0, 4.0];
/// let b = [5.0f32, 6.0, 7.0, 8.0];
/// let mut c = [0.0f32; 4];
/// gemm(Transpose::NoTrans, Transpose::NoTrans, 2, 2, 2, 1.0, &a, &b, 0.0, &mut c);
/// assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
/// ```
#[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
pub fn gemm<T: Real>(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    b: &[T],
    beta: T,
    c: &mut [T],
) {
    ensure(
        check_dims("gemm", &[m, n, k])
            .and_then(|()| at_least("gemm", "a", m.saturating_mul(k), a.len()))
            .and_then(|()| at_least("gemm", "b", k.saturating_mul(n), b.len()))
            .and_then(|()| at_least("gemm", "c", m.saturating_mul(n), c.len())),
    );

    let lda = match trans_a {
        Transpose::NoTrans => k,
        Transpose::Trans => m,
    };
    let ldb = match trans_b {
        Transpose::NoTrans => n,
        Transpose::Trans => k,
    };
    let (rsa, csa) = trans_a.strides(lda);
    let (rsb, csb) = trans_b.strides(ldb);
    #[allow(clippy::cast_possible_wrap)]
    let rsc = n as isize;

    log::trace!("gemm {trans_a:?}/{trans_b:?} m={m} n={n} k={k}");

    // SAFETY: the length checks above cover every element addressed through
    // these strides, and `c` is a unique borrow so it cannot alias `a` or `b`.
    unsafe {
        T::gemm_kernel(
            m,
            k,
            n,
            alpha,
            a.as_ptr(),
            rsa,
            csa,
            b.as_ptr(),
            rsb,
            csb,
            beta,
            c.as_mut_ptr(),
            rsc,
            1,
        );
    }
}

/// General matrix-vector multiply: `y = alpha * op(A) * x + beta * y`.
///
/// `A` is stored row-major as `m x n`. With [`Transpose::NoTrans`], `x` has `n`
/// elements and `y` has `m`; with [`Transpose::Trans`], `x` has `m` and `y` has
/// `n`. If `beta` is zero, `y` is not read.
///
/// # Panics
///
/// If `m` or `n` is zero or a buffer is shorter than its shape.
#[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
pub fn gemv<T: Real>(
    trans_a: Transpose,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    x: &[T],
    beta: T,
    y: &mut [T],
) {
    let (rows, cols) = match trans_a {
        Transpose::NoTrans => (m, n),
        Transpose::Trans => (n, m),
    };
    ensure(
        check_dims("gemv", &[m, n])
            .and_then(|()| at_least("gemv", "a", m.saturating_mul(n), a.len()))
            .and_then(|()| at_least("gemv", "x", cols, x.len()))
            .and_then(|()| at_least("gemv", "y", rows, y.len())),
    );

    // A always has leading dimension n
    let (rsa, csa) = trans_a.strides(n);

    // SAFETY: `op(A)` is rows x cols inside `a`, `x` is a cols x 1 column and
    // `y` a rows x 1 column, all bounds-checked above; `y` is uniquely borrowed.
    unsafe {
        T::gemm_kernel(
            rows,
            cols,
            1,
            alpha,
            a.as_ptr(),
            rsa,
            csa,
            x.as_ptr(),
            1,
            1,
            beta,
            y.as_mut_ptr(),
            1,
            1,
        );
    }
}

/// `y = alpha * x + y`.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
pub fn axpy<T: Real>(alpha: T, x: &[T], y: &mut [T]) {
    ensure(non_empty("axpy", x.len()).and_then(|()| same_len("axpy", x.len(), y.len())));
    update_with(x, y, |xi, yi| alpha * xi + yi);
}

/// `y = alpha * x + beta * y`.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
pub fn axpby<T: Real>(alpha: T, x: &[T], beta: T, y: &mut [T]) {
    ensure(non_empty("axpby", x.len()).and_then(|()| same_len("axpby", x.len(), y.len())));
    update_with(x, y, |xi, yi| alpha * xi + beta * yi);
}

/// `x = alpha * x`, in place.
///
/// # Panics
///
/// If `x` is empty.
pub fn scal<T: Real>(alpha: T, x: &mut [T]) {
    ensure(non_empty("scal", x.len()));
    update_in_place(x, |v| alpha * v);
}

/// `y = alpha * x`.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
pub fn scale<T: Real>(alpha: T, x: &[T], y: &mut [T]) {
    ensure(non_empty("scale", x.len()).and_then(|()| same_len("scale", x.len(), y.len())));
    y.copy_from_slice(x);
    update_in_place(y, |v| alpha * v);
}

/// Inner product of two equal-length vectors.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
///
/// # Example
///
/// ```
/// assert_eq!(briny_math::dot(&[1.0f64, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
pub fn dot<T: Real>(x: &[T], y: &[T]) -> T {
    ensure(non_empty("dot", x.len()).and_then(|()| same_len("dot", x.len(), y.len())));
    if x.len() >= PARALLEL_THRESHOLD {
        x.par_iter().zip(y.par_iter()).map(|(&u, &v)| u * v).sum()
    } else {
        x.iter().zip(y).map(|(&u, &v)| u * v).sum()
    }
}

/// Position of the `i`-th logical element of an `n`-vector with increment
/// `inc`, following BLAS: a negative increment starts from the far end.
#[inline]
fn strided_index(i: usize, n: usize, inc: isize) -> usize {
    let step = inc.unsigned_abs();
    if inc >= 0 { i * step } else { (n - 1 - i) * step }
}

/// Elements a strided vector of `n` entries spans. Saturates at
/// `usize::MAX`, which no buffer can satisfy.
#[inline]
fn strided_span(n: usize, inc: isize) -> usize {
    (n - 1).saturating_mul(inc.unsigned_abs()).saturating_add(1)
}

/// Inner product of two strided vectors of `n` logical elements each.
///
/// `incx`/`incy` follow BLAS conventions: element `i` of `x` sits at
/// `i * incx`, or counts back from the end when `incx` is negative; an
/// increment of zero repeats the first element.
///
/// # Panics
///
/// If `n` is zero or either buffer is too short for `n` and its increment.
pub fn strided_dot<T: Real>(n: usize, x: &[T], incx: isize, y: &[T], incy: isize) -> T {
    ensure(
        non_empty("strided_dot", n)
            .and_then(|()| at_least("strided_dot", "x", strided_span(n, incx), x.len()))
            .and_then(|()| at_least("strided_dot", "y", strided_span(n, incy), y.len())),
    );
    if incx == 1 && incy == 1 {
        return dot(&x[..n], &y[..n]);
    }
    (0..n)
        .map(|i| x[strided_index(i, n, incx)] * y[strided_index(i, n, incy)])
        .sum()
}

/// Sum of absolute values.
///
/// # Panics
///
/// If `x` is empty.
pub fn asum<T: Real>(x: &[T]) -> T {
    ensure(non_empty("asum", x.len()));
    if x.len() >= PARALLEL_THRESHOLD {
        x.par_iter().map(|v| v.abs()).sum()
    } else {
        x.iter().map(|v| v.abs()).sum()
    }
}

/// Number of differing bits between the IEEE bit patterns of `x` and `y`,
/// summed over all elements.
///
/// # Panics
///
/// If `x` is empty or `y.len() != x.len()`.
pub fn hamming_distance<T: Real>(x: &[T], y: &[T]) -> u64 {
    ensure(
        non_empty("hamming_distance", x.len())
            .and_then(|()| same_len("hamming_distance", x.len(), y.len())),
    );
    x.iter()
        .zip(y)
        .map(|(&u, &v)| u64::from((u.bits() ^ v.bits()).count_ones()))
        .sum()
}
