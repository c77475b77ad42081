//! Device copy primitive backed by WGPU.
//!
//! In [`crate::mode::Mode::Gpu`], [`crate::copy`] routes buffer traffic
//! through the device: the source is uploaded into a device buffer, copied
//! buffer-to-buffer on the GPU, then read back into the destination through a
//! mapped staging buffer.
//!
//! The GPU context is created lazily on first use (via `lazy_static`). If no
//! adapter or device is available, the context stays absent and every device
//! copy reports failure so the caller can take the host path.

use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::element::Element;

/// Failures on the device path.
#[derive(Error, Debug)]
pub enum GpuError {
    /// No suitable adapter.
    #[error("adapter error: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    /// The adapter refused to hand out a device.
    #[error("device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// The staging buffer could not be mapped for reading.
    #[error("buffer map error: {0}")]
    Map(#[from] wgpu::BufferAsyncError),
    /// Waiting on the device failed.
    #[error("device poll error: {0}")]
    Poll(#[from] wgpu::PollError),
    /// The mapping callback never ran.
    #[error("buffer map callback was dropped")]
    MapCallbackDropped,
    /// The copy needs a buffer larger than the device allows.
    #[error("copy of {size} bytes exceeds device max_buffer_size {limit}")]
    TooLarge {
        /// Bytes requested.
        size: u64,
        /// `max_buffer_size` of the device.
        limit: u64,
    },
    /// The device rejected a buffer or command during the copy.
    #[error("device validation error: {0}")]
    Validation(String),
}

/// Rejects a copy of `size` bytes that no device buffer can hold.
fn check_size(size: u64, limit: u64) -> Result<(), GpuError> {
    if size > limit {
        return Err(GpuError::TooLarge { size, limit });
    }
    Ok(())
}

/// Holds the WGPU device and queue used for device copies.
pub struct GpuContext {
    /// The GPU device.
    pub device: wgpu::Device,
    /// Submission queue for `device`.
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Selects the default adapter and opens a device and queue on it.
    ///
    /// Uses `pollster::block_on` to wait on WGPU's async setup calls.
    ///
    /// # Errors
    ///
    /// If no adapter is found or the device request is refused.
    pub fn new() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::default();
        let adapter =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))?;
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("briny_math"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::default(),
        }))?;

        Ok(Self { device, queue })
    }
}

lazy_static::lazy_static! {
    static ref GPU_CONTEXT: Option<GpuContext> = match GpuContext::new() {
        Ok(ctx) => {
            log::debug!("GPU context initialized");
            Some(ctx)
        }
        Err(err) => {
            log::warn!("GPU context unavailable: {err}");
            None
        }
    };
}

/// Copies `src` into `dst` through device memory.
///
/// Returns `None` if there is no GPU context or the copy fails; `dst` is only
/// written on success.
pub fn wgpu_copy<T: Element>(src: &[T], dst: &mut [T]) -> Option<()> {
    let ctx = GPU_CONTEXT.as_ref()?;
    match pollster::block_on(run_copy(ctx, src, dst)) {
        Ok(()) => Some(()),
        Err(err) => {
            log::warn!("device copy failed: {err}");
            None
        }
    }
}

async fn run_copy<T: Element>(ctx: &GpuContext, src: &[T], dst: &mut [T]) -> Result<(), GpuError> {
    let device = &ctx.device;
    let queue = &ctx.queue;

    let bytes: &[u8] = bytemuck::cast_slice(src);
    let size = bytes.len() as u64;
    check_size(size, device.limits().max_buffer_size)?;

    // uncaptured validation errors panic in wgpu's default handler
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let upload = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("copy_src"),
        contents: bytes,
        usage: wgpu::BufferUsages::COPY_SRC,
    });

    let device_buf = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("copy_dst"),
        size,
        usage: wgpu::BufferUsages::COPY_SRC | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("copy_staging"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("copy_encoder"),
    });
    encoder.copy_buffer_to_buffer(&upload, 0, &device_buf, 0, size);
    encoder.copy_buffer_to_buffer(&device_buf, 0, &staging, 0, size);
    queue.submit(Some(encoder.finish()));

    if let Some(err) = device.pop_error_scope().await {
        return Err(GpuError::Validation(err.to_string()));
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let slice = staging.slice(..);
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device.poll(wgpu::PollType::Wait)?;
    rx.recv().map_err(|_| GpuError::MapCallbackDropped)??;

    {
        let view = slice.get_mapped_range();
        bytemuck::cast_slice_mut::<T, u8>(dst).copy_from_slice(&view);
    }
    staging.unmap();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_copy_is_refused() {
        let limit = wgpu::Limits::default().max_buffer_size;
        assert!(check_size(limit, limit).is_ok());
        let err = check_size(limit + 4, limit).unwrap_err();
        assert!(matches!(err, GpuError::TooLarge { .. }));
        assert!(err.to_string().contains("exceeds device max_buffer_size"));
    }

    #[test]
    fn copy_round_trips_or_declines() {
        let src: Vec<u32> = (0..1024).collect();
        let mut dst = vec![0u32; 1024];
        match wgpu_copy(&src, &mut dst) {
            Some(()) => assert_eq!(dst, src),
            None => assert!(dst.iter().all(|&v| v == 0)),
        }
    }
}
