//! briny_math: type-dispatched numerical kernels for `f32`/`f64` buffers.
//!
//! A thin layer a machine-learning framework calls into for dense linear
//! algebra, elementwise math and random draws. Each operation is generic over
//! its element type and resolves to the precision-specific kernel at compile
//! time; buffers stay owned by the caller.
//!
//! # Features
//!
//! - BLAS-style routines: [`gemm`], [`gemv`], [`axpy`], [`axpby`], [`scal`],
//!   [`dot`], [`strided_dot`], [`asum`], [`scale`], plus [`hamming_distance`].
//! - Vectorized math: [`add`], [`sub`], [`mul`], [`div`], [`powx`], [`sqr`],
//!   [`exp`], [`ln`], [`abs`], and the pointwise [`sign`], [`sgnbit`], [`fabs`].
//! - Buffer utilities: [`set`], [`add_scalar`], [`copy`], [`copy_raw`].
//! - Random draws from one shared generator: [`rng_uniform`],
//!   [`rng_gaussian`], [`rng_bernoulli`], [`rng_rand`].
//!
//! # Modules
//!
//! - [`ops`] — the kernels, grouped by family.
//! - [`rng`] — shared and owned random generators.
//! - [`element`] — the sealed element-type traits and [`next_after`].
//! - [`mode`] — CPU/GPU compute mode consulted by [`copy`].
//! - [`approx`] — tolerance bands for comparing float output.
//! - [`error`] — precondition errors.
//!
//! # Preconditions
//!
//! Counts must be positive, lengths must agree, probabilities lie in `[0, 1]`,
//! `sigma > 0` and `a <= b`. A violation is a bug in the caller: the free
//! functions panic with a [`MathError`] message rather than returning.
//!
//! # Example
//!
//! ```rust
//! use briny_math::{axpy, dot, Transpose, gemm};
//!
//! let x = [1.0f32, 2.0, 3.0];
//! let mut y = [4.0f32, 5.0, 6.0];
//! assert_eq!(dot(&x, &y), 32.0);
//!
//! axpy(2.0, &x, &mut y);
//! assert_eq!(y, [6.0, 9.0, 12.0]);
//!
//! let eye = [1.0f64, 0.0, 0.0, 1.0];
//! let b = [2.0f64, 3.0, 4.0, 5.0];
//! let mut c = [0.0f64; 4];
//! gemm(Transpose::NoTrans, Transpose::NoTrans, 2, 2, 2, 1.0, &eye, &b, 0.0, &mut c);
//! assert_eq!(c, b);
//! ```

pub mod approx;
pub mod element;
pub mod error;
pub mod mode;
pub mod ops;
pub mod rng;

pub use element::{BernoulliOutput, Element, Real, next_after};
pub use error::{MathError, MathResult};
pub use ops::blas::{
    Transpose, asum, axpby, axpy, dot, gemm, gemv, hamming_distance, scal, scale, strided_dot,
};
pub use ops::buffer::{add_scalar, copy, copy_raw, set};
pub use ops::unary::{fabs, sgnbit, sign};
pub use ops::vml::{abs, add, div, exp, ln, mul, powx, sqr, sub};
pub use rng::{
    MathRng, rng_bernoulli, rng_gaussian, rng_rand, rng_uniform, set_random_seed, with_global_rng,
};
