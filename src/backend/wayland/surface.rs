//! Surface sizing and shared memory buffers, shared between the Wayland event
//! thread (which configures them) and the frame clock thread (which presents).

use anyhow::{Context, Result};
use log::info;
use smithay_client_toolkit::shm::{Shm, slot::SlotPool};
use wayland_client::protocol::wl_surface::WlSurface;

/// Tracks the presentable surface, its buffer pool, and the configured size.
pub struct SurfaceState {
    wl_surface: Option<WlSurface>,
    pool: Option<SlotPool>,
    width: u32,
    height: u32,
    configured: bool,
}

impl SurfaceState {
    /// Creates a new, unconfigured surface state.
    pub fn new() -> Self {
        Self {
            wl_surface: None,
            pool: None,
            width: 0,
            height: 0,
            configured: false,
        }
    }

    /// Assigns the surface frames are attached to.
    pub fn set_wl_surface(&mut self, surface: WlSurface) {
        self.wl_surface = Some(surface);
    }

    pub fn wl_surface(&self) -> Option<&WlSurface> {
        self.wl_surface.as_ref()
    }

    /// Updates the surface dimensions, returning `true` if the size changed.
    ///
    /// When the size changes, any existing buffer pool becomes invalid and is dropped.
    pub fn update_dimensions(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        if changed {
            self.pool = None;
        }
        changed
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    /// Returns whether the surface has completed its initial configure with a usable size.
    pub fn is_configured(&self) -> bool {
        self.configured && self.width > 0 && self.height > 0
    }

    /// Ensures a shared memory pool sized for `buffer_count` frames exists.
    pub fn ensure_pool(&mut self, shm: &Shm, buffer_count: usize) -> Result<()> {
        if self.pool.is_none() {
            let buffer_size = (self.width * self.height * 4) as usize;
            let pool_size = buffer_size * buffer_count;
            info!(
                "Creating new SlotPool ({}x{}, {} bytes, {} buffers)",
                self.width, self.height, pool_size, buffer_count
            );
            let pool = SlotPool::new(pool_size, shm).context("Failed to create slot pool")?;
            self.pool = Some(pool);
        }
        Ok(())
    }

    pub fn pool_mut(&mut self) -> Option<&mut SlotPool> {
        self.pool.as_mut()
    }

    /// Releases the surface and its buffers on teardown.
    pub fn reset(&mut self) {
        self.pool = None;
        self.wl_surface = None;
        self.configured = false;
    }
}
