//! Precondition errors.
//!
//! Every operation checks its arguments before touching a kernel. The free
//! functions treat a failed check as a programming error in the caller and
//! panic with the error's message; [`crate::rng::MathRng`] hands the same
//! values back as `Err` instead.

use thiserror::Error;

/// A violated precondition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A buffer that must hold at least one element was empty.
    #[error("{op}: count must be positive")]
    EmptyBuffer {
        /// The operation that rejected the call.
        op: &'static str,
    },

    /// Two buffers that must be the same length were not.
    #[error("{op}: length mismatch, expected {expected}, got {actual}")]
    LengthMismatch {
        /// The operation that rejected the call.
        op: &'static str,
        /// The required length.
        expected: usize,
        /// The length that was passed.
        actual: usize,
    },

    /// A buffer is shorter than the dimensions say it must be.
    #[error("{op}: buffer `{buffer}` holds {actual} elements, needs at least {required}")]
    BufferTooShort {
        /// The operation that rejected the call.
        op: &'static str,
        /// Which operand was too short.
        buffer: &'static str,
        /// Minimum element count implied by the dimensions.
        required: usize,
        /// The length that was passed.
        actual: usize,
    },

    /// Uniform bounds with `a > b` (or NaN).
    #[error("uniform: lower bound {a} exceeds upper bound {b}")]
    InvalidRange {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
    },

    /// A Gaussian standard deviation that is not strictly positive.
    #[error("gaussian: sigma must be positive, got {0}")]
    InvalidSigma(f64),

    /// A Bernoulli probability outside `[0, 1]`.
    #[error("bernoulli: probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    /// The sampler refused parameters that passed the checks above, e.g. a
    /// uniform span too wide to represent.
    #[error("{op}: distribution rejected parameters: {reason}")]
    Distribution {
        /// The operation that rejected the call.
        op: &'static str,
        /// The sampler's own message.
        reason: String,
    },
}

/// Result alias for checked operations.
pub type MathResult<T> = Result<T, MathError>;

/// Panics with the message of `err` if it is `Err`.
///
/// This is the fatal-assertion path shared by every free function.
#[inline]
#[track_caller]
pub(crate) fn ensure(check: MathResult<()>) {
    if let Err(err) = check {
        panic!("{err}");
    }
}

/// Rejects an empty buffer.
#[inline]
pub(crate) fn non_empty(op: &'static str, len: usize) -> MathResult<()> {
    if len == 0 {
        return Err(MathError::EmptyBuffer { op });
    }
    Ok(())
}

/// Rejects a buffer whose length differs from `expected`.
#[inline]
pub(crate) fn same_len(op: &'static str, expected: usize, actual: usize) -> MathResult<()> {
    if expected != actual {
        return Err(MathError::LengthMismatch {
            op,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Rejects a buffer shorter than `required`.
#[inline]
pub(crate) fn at_least(
    op: &'static str,
    buffer: &'static str,
    required: usize,
    actual: usize,
) -> MathResult<()> {
    if actual < required {
        return Err(MathError::BufferTooShort {
            op,
            buffer,
            required,
            actual,
        });
    }
    Ok(())
}
