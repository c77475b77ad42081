//! Compute mode selection.
//!
//! The surrounding framework runs either on the host or on an accelerator.
//! This module holds that choice in a process-wide flag so the few operations
//! that care (currently only [`crate::copy`]) can route through the device
//! path.
//!
//! # Modes
//!
//! - `Cpu` — host memory; every operation runs on the CPU (default).
//! - `Gpu` — buffers are handed to the device copy primitive where one exists.
//!   With the `wgpu` feature disabled this behaves exactly like `Cpu`.
//!
//! The mode is stored in an `AtomicU8`, so switching is cheap and lock-free.

use core::sync::atomic::{AtomicU8, Ordering};

/// Where buffer traffic is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Mode {
    /// Host execution (default).
    #[default]
    Cpu = 0,
    /// Accelerator execution.
    Gpu = 1,
}

impl TryFrom<u8> for Mode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Cpu),
            1 => Ok(Self::Gpu),
            other => Err(other),
        }
    }
}

/// Process-wide active mode.
///
/// The mode changes rarely and never mid-kernel, so acquire/release ordering
/// on a single byte is enough.
static GLOBAL_MODE: AtomicU8 = AtomicU8::new(Mode::Cpu as u8);

/// Sets the active compute mode.
///
/// # Example
///
/// ```
/// use briny_math::mode::{mode, set_mode, Mode};
///
/// set_mode(Mode::Gpu);
/// assert_eq!(mode(), Mode::Gpu);
/// set_mode(Mode::Cpu);
/// ```
pub fn set_mode(m: Mode) {
    let prev = GLOBAL_MODE.swap(m as u8, Ordering::AcqRel);
    if prev != m as u8 {
        log::debug!("compute mode switched to {m:?}");
    }
}

/// Returns the active compute mode.
///
/// An unrecognized stored value reads as [`Mode::Cpu`].
pub fn mode() -> Mode {
    Mode::try_from(GLOBAL_MODE.load(Ordering::Acquire)).unwrap_or_default()
}
