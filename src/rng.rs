//! Random draws.
//!
//! All free functions in this module draw from one process-wide generator. It
//! is created lazily from OS entropy on first use and guarded by a mutex, so
//! draws are safe from any thread, but they are **not** independent streams:
//! two call sites interleave in whatever order they run. A run is reproducible
//! only by reseeding with [`set_random_seed`] and repeating the exact same
//! global call sequence.
//!
//! Callers that want an isolated stream own a [`MathRng`] instead. Its
//! methods report bad parameters as [`MathError`] values, while the global
//! functions treat them as fatal and panic.
//!
//! # Example
//!
//! ```
//! use briny_math::rng::{rng_gaussian, rng_uniform, set_random_seed};
//!
//! set_random_seed(1701);
//! let mut noise = [0.0f32; 16];
//! rng_gaussian(0.0, 0.1, &mut noise);
//!
//! let mut u = [0.0f64; 16];
//! rng_uniform(-1.0, 1.0, &mut u);
//! assert!(u.iter().all(|v| (-1.0..=1.0).contains(v)));
//! ```

use parking_lot::Mutex;
use rand::distr::{Bernoulli, Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Normal, StandardNormal};

use crate::element::{BernoulliOutput, Real};
use crate::error::{MathError, MathResult, ensure, non_empty};

/// A random generator handle with the crate's draw kinds.
#[derive(Debug, Clone)]
pub struct MathRng {
    inner: StdRng,
}

impl MathRng {
    /// Deterministic generator for a given seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// One raw 32-bit draw.
    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Fills `r` with values drawn uniformly from the closed interval `[a, b]`.
    ///
    /// The sampler is half-open, so the upper bound is widened to
    /// [`crate::next_after`]`(b)`; that makes `b` itself reachable. When `b`
    /// is the largest finite value the bound stays at `b`. A draw that rounds
    /// up past `b` (possible when the span is a few ulps wide) is redrawn.
    ///
    /// Spans wider than the largest finite value, such as `[-MAX, MAX]`, are
    /// sampled at half scale and doubled.
    ///
    /// # Errors
    ///
    /// [`MathError::EmptyBuffer`] if `r` is empty, [`MathError::InvalidRange`]
    /// unless `a <= b`.
    pub fn uniform<T: Real>(&mut self, a: T, b: T, r: &mut [T]) -> MathResult<()> {
        non_empty("uniform", r.len())?;
        if !(a <= b) {
            return Err(MathError::InvalidRange {
                a: a.as_f64(),
                b: b.as_f64(),
            });
        }
        let upper = match Real::next_up(b) {
            up if up.is_finite() => up,
            _ => T::max_value(),
        };
        if a == upper {
            // only reachable when a == b == MAX
            r.fill(a);
            return Ok(());
        }

        let two = T::one() + T::one();
        let halved = !(upper - a).is_finite();
        let dist = if halved {
            Uniform::new(a / two, upper / two)
        } else {
            Uniform::new(a, upper)
        }
        .map_err(|err| MathError::Distribution {
            op: "uniform",
            reason: err.to_string(),
        })?;

        for v in r.iter_mut() {
            *v = loop {
                let x = dist.sample(&mut self.inner);
                let x = if halved { x * two } else { x };
                if x <= b {
                    break x;
                }
            };
        }
        Ok(())
    }

    /// Fills `r` with draws from a normal distribution with mean `mu` and
    /// standard deviation `sigma`.
    ///
    /// # Errors
    ///
    /// [`MathError::EmptyBuffer`] if `r` is empty, [`MathError::InvalidSigma`]
    /// unless `sigma > 0`.
    pub fn gaussian<T>(&mut self, mu: T, sigma: T, r: &mut [T]) -> MathResult<()>
    where
        T: Real,
        StandardNormal: Distribution<T>,
    {
        non_empty("gaussian", r.len())?;
        if !(sigma > T::zero()) {
            return Err(MathError::InvalidSigma(sigma.as_f64()));
        }
        let dist = Normal::new(mu, sigma).map_err(|err| MathError::Distribution {
            op: "gaussian",
            reason: err.to_string(),
        })?;
        for v in r.iter_mut() {
            *v = dist.sample(&mut self.inner);
        }
        Ok(())
    }

    /// Fills `r` with independent 0/1 outcomes, each `1` with probability `p`.
    ///
    /// # Errors
    ///
    /// [`MathError::EmptyBuffer`] if `r` is empty,
    /// [`MathError::InvalidProbability`] unless `0 <= p <= 1`.
    pub fn bernoulli<T, I>(&mut self, p: T, r: &mut [I]) -> MathResult<()>
    where
        T: Real,
        I: BernoulliOutput,
    {
        non_empty("bernoulli", r.len())?;
        if !(p >= T::zero() && p <= T::one()) {
            return Err(MathError::InvalidProbability(p.as_f64()));
        }
        let dist = Bernoulli::new(p.as_f64()).map_err(|err| MathError::Distribution {
            op: "bernoulli",
            reason: err.to_string(),
        })?;
        for v in r.iter_mut() {
            *v = I::from_outcome(dist.sample(&mut self.inner));
        }
        Ok(())
    }

    /// Reseeds in place.
    pub fn reseed(&mut self, seed: u64) {
        self.inner = StdRng::seed_from_u64(seed);
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_RNG: Mutex<MathRng> = {
        log::debug!("creating shared generator from OS entropy");
        Mutex::new(MathRng::from_entropy())
    };
}

/// Reseeds the shared generator.
pub fn set_random_seed(seed: u64) {
    log::debug!("reseeding shared generator with {seed}");
    GLOBAL_RNG.lock().reseed(seed);
}

/// Runs `f` with exclusive access to the shared generator.
///
/// Draws made through the handle cannot interleave with other threads. The
/// lock is not reentrant: calling any other global draw from inside `f`
/// deadlocks.
pub fn with_global_rng<R>(f: impl FnOnce(&mut MathRng) -> R) -> R {
    f(&mut GLOBAL_RNG.lock())
}

/// One raw 32-bit draw from the shared generator.
pub fn rng_rand() -> u32 {
    GLOBAL_RNG.lock().next_u32()
}

/// Fills `r` uniformly from `[a, b]` using the shared generator.
///
/// # Panics
///
/// If `r` is empty or `a > b`. See [`MathRng::uniform`].
pub fn rng_uniform<T: Real>(a: T, b: T, r: &mut [T]) {
    ensure(GLOBAL_RNG.lock().uniform(a, b, r));
}

/// Fills `r` with normal draws using the shared generator.
///
/// # Panics
///
/// If `r` is empty or `sigma <= 0`. See [`MathRng::gaussian`].
pub fn rng_gaussian<T>(mu: T, sigma: T, r: &mut [T])
where
    T: Real,
    StandardNormal: Distribution<T>,
{
    ensure(GLOBAL_RNG.lock().gaussian(mu, sigma, r));
}

/// Fills `r` with Bernoulli outcomes using the shared generator.
///
/// `r` may be `i32` or `u32`.
///
/// # Panics
///
/// If `r` is empty or `p` lies outside `[0, 1]`. See [`MathRng::bernoulli`].
pub fn rng_bernoulli<T: Real, I: BernoulliOutput>(p: T, r: &mut [I]) {
    ensure(GLOBAL_RNG.lock().bernoulli(p, r));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_handles_are_reproducible() {
        let mut a = MathRng::from_seed(42);
        let mut b = MathRng::from_seed(42);
        let mut xa = [0.0f64; 32];
        let mut xb = [0.0f64; 32];
        a.gaussian(1.0, 2.0, &mut xa).unwrap();
        b.gaussian(1.0, 2.0, &mut xb).unwrap();
        assert_eq!(xa, xb);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn uniform_stays_in_closed_interval() {
        let mut rng = MathRng::from_seed(7);
        let mut r = vec![0.0f32; 100_000];
        rng.uniform(0.0, 1.0, &mut r).unwrap();
        assert!(r.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn uniform_degenerate_interval_hits_upper_bound() {
        let mut rng = MathRng::from_seed(3);
        let mut r = [0.0f64; 64];
        rng.uniform(1.0, 1.0, &mut r).unwrap();
        assert!(r.iter().all(|&v| v == 1.0));

        let mut r = [0.0f32; 8];
        rng.uniform(f32::MAX, f32::MAX, &mut r).unwrap();
        assert!(r.iter().all(|&v| v == f32::MAX));
    }

    #[test]
    fn uniform_rejects_inverted_bounds() {
        let mut rng = MathRng::from_seed(0);
        let mut r = [0.0f64; 4];
        assert_eq!(
            rng.uniform(2.0, 1.0, &mut r),
            Err(MathError::InvalidRange { a: 2.0, b: 1.0 })
        );
        assert!(rng.uniform(f64::NAN, 1.0, &mut r).is_err());
    }

    #[test]
    fn uniform_narrow_span_stays_closed_and_reaches_b() {
        let mut rng = MathRng::from_seed(9);
        let b = 1.0f32 + f32::EPSILON;
        let mut r = vec![0.0f32; 10_000];
        rng.uniform(1.0, b, &mut r).unwrap();
        assert!(r.iter().all(|v| (1.0..=b).contains(v)));
        assert!(r.iter().any(|&v| v == b));

        let b = Real::next_up(Real::next_up(5.0f64));
        let mut r = vec![0.0f64; 10_000];
        rng.uniform(5.0, b, &mut r).unwrap();
        assert!(r.iter().all(|v| (5.0..=b).contains(v)));
        assert!(r.iter().any(|&v| v == b));
    }

    #[test]
    fn uniform_full_finite_span_is_sampled() {
        let mut rng = MathRng::from_seed(0);
        let mut r = vec![0.0f64; 1000];
        rng.uniform(-f64::MAX, f64::MAX, &mut r).unwrap();
        assert!(r.iter().all(|v| v.is_finite()));
        assert!(r.iter().any(|&v| v < 0.0) && r.iter().any(|&v| v > 0.0));

        let mut r = [0.0f32; 64];
        rng.uniform(0.0, f32::MAX, &mut r).unwrap();
        assert!(r.iter().all(|v| (0.0..=f32::MAX).contains(v)));
    }

    #[test]
    fn gaussian_rejects_non_positive_sigma() {
        let mut rng = MathRng::from_seed(0);
        let mut r = [0.0f32; 4];
        assert_eq!(
            rng.gaussian(0.0, 0.0, &mut r),
            Err(MathError::InvalidSigma(0.0))
        );
        assert!(rng.gaussian(0.0, -1.0, &mut r).is_err());
    }

    #[test]
    fn gaussian_moments_are_plausible() {
        let mut rng = MathRng::from_seed(11);
        let mut r = vec![0.0f64; 50_000];
        rng.gaussian(3.0, 0.5, &mut r).unwrap();
        let n = r.len() as f64;
        let mean = r.iter().sum::<f64>() / n;
        let var = r.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        assert!((mean - 3.0).abs() < 0.02, "mean {mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std {}", var.sqrt());
    }

    #[test]
    fn bernoulli_extremes_and_range() {
        let mut rng = MathRng::from_seed(5);

        let mut r = [7i32; 256];
        rng.bernoulli(0.0f32, &mut r).unwrap();
        assert!(r.iter().all(|&v| v == 0));

        let mut r = [7u32; 256];
        rng.bernoulli(1.0f64, &mut r).unwrap();
        assert!(r.iter().all(|&v| v == 1));

        let mut r = [7i32; 4096];
        rng.bernoulli(0.3f64, &mut r).unwrap();
        assert!(r.iter().all(|&v| v == 0 || v == 1));
        let ones = r.iter().filter(|&&v| v == 1).count();
        assert!(ones > 1000 && ones < 1500, "{ones} successes");
    }

    #[test]
    fn bernoulli_rejects_out_of_range_probability() {
        let mut rng = MathRng::from_seed(0);
        let mut r = [0u32; 2];
        assert_eq!(
            rng.bernoulli(1.5f64, &mut r),
            Err(MathError::InvalidProbability(1.5))
        );
        assert!(rng.bernoulli(-0.1f32, &mut r).is_err());
        assert!(rng.bernoulli(f64::NAN, &mut r).is_err());
    }

    #[test]
    fn empty_buffers_are_rejected() {
        let mut rng = MathRng::from_seed(0);
        let mut r: [f32; 0] = [];
        assert_eq!(
            rng.uniform(0.0, 1.0, &mut r),
            Err(MathError::EmptyBuffer { op: "uniform" })
        );
    }
}
