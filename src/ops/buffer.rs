//! Fill, scalar add and copy.

use crate::element::{Element, Real};
use crate::error::{ensure, non_empty, same_len};
use crate::mode::{Mode, mode};

use super::update_in_place;

/// Sets every element of `y` to `alpha`.
///
/// A zero `alpha` clears the buffer with a bulk byte fill; all-zero bytes are
/// `0` for every [`Element`].
///
/// # Panics
///
/// If `y` is empty.
///
/// # Example
///
/// ```
/// let mut y = [7u32; 4];
/// briny_math::set(0, &mut y);
/// assert_eq!(y, [0; 4]);
/// ```
pub fn set<T: Element>(alpha: T, y: &mut [T]) {
    ensure(non_empty("set", y.len()));
    if alpha == T::ZERO {
        bytemuck::cast_slice_mut::<T, u8>(y).fill(0);
        return;
    }
    y.fill(alpha);
}

/// Adds `alpha` to every element of `y`.
///
/// # Panics
///
/// If `y` is empty.
pub fn add_scalar<T: Real>(alpha: T, y: &mut [T]) {
    ensure(non_empty("add_scalar", y.len()));
    update_in_place(y, |v| v + alpha);
}

/// Copies `src` into `dst`.
///
/// In [`Mode::Gpu`] the copy goes through the device copy primitive when the
/// crate is built with `wgpu`. If that is unavailable or fails, the copy falls
/// back to a host memory copy; the result is the same either way.
///
/// # Panics
///
/// If `src` is empty or `dst.len() != src.len()`.
pub fn copy<T: Element>(src: &[T], dst: &mut [T]) {
    ensure(non_empty("copy", src.len()).and_then(|()| same_len("copy", src.len(), dst.len())));

    match mode() {
        Mode::Gpu => {
            #[cfg(feature = "wgpu")]
            {
                if super::wgpu::wgpu_copy(src, dst).is_some() {
                    return;
                }
                log::warn!("device copy of {} elements failed, using host copy", src.len());
            }
        }
        Mode::Cpu => {}
    }

    dst.copy_from_slice(src);
}

/// Copies `n` elements from `src` to `dst`, doing nothing when both point at
/// the same buffer.
///
/// This is the entry point for callers that hold raw buffers which may alias.
///
/// # Panics
///
/// If `n` is zero.
///
/// # Safety
///
/// Unless `src == dst`, `src` must be valid for `n` reads and `dst` for `n`
/// writes, both properly aligned, and the two ranges must not overlap.
pub unsafe fn copy_raw<T: Element>(n: usize, src: *const T, dst: *mut T) {
    ensure(non_empty("copy", n));
    if core::ptr::eq(src, dst) {
        return;
    }
    // SAFETY: upheld by the caller; the ranges are distinct and valid for `n`.
    let (src, dst) = unsafe {
        (
            core::slice::from_raw_parts(src, n),
            core::slice::from_raw_parts_mut(dst, n),
        )
    };
    copy(src, dst);
}
