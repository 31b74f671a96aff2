//! Presents compositor frames on the Wayland surface from the frame clock thread.

use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use wayland_client::{Connection, protocol::wl_shm};

use super::surface::SurfaceState;
use crate::backend::{DisplaySurface, FrameView, PresentError};
use crate::draw::Color;

/// The [`DisplaySurface`] half of the Wayland backend.
///
/// Each present copies the finished frame into a fresh pool buffer, then
/// attaches, damages, and commits it in one go, so the compositor only ever
/// shows complete frames.
pub struct WaylandDisplay {
    conn: Connection,
    surface: Arc<Mutex<SurfaceState>>,
    background: Color,
}

impl WaylandDisplay {
    pub(super) fn new(
        conn: Connection,
        surface: Arc<Mutex<SurfaceState>>,
        background: Color,
    ) -> Self {
        Self {
            conn,
            surface,
            background,
        }
    }
}

impl DisplaySurface for WaylandDisplay {
    fn size(&self) -> (i32, i32) {
        let surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        if surface.is_configured() {
            (
                surface.width().min(i32::MAX as u32) as i32,
                surface.height().min(i32::MAX as u32) as i32,
            )
        } else {
            (0, 0)
        }
    }

    fn background(&self) -> Color {
        self.background
    }

    fn present(&mut self, frame: FrameView<'_>) -> Result<(), PresentError> {
        let mut surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        if !surface.is_configured() {
            return Err(PresentError::NotConfigured);
        }

        let width = surface.width() as i32;
        let height = surface.height() as i32;
        if (frame.width, frame.height) != (width, height) {
            // Resized between render and present; the next tick catches up.
            return Err(PresentError::SizeMismatch {
                frame_width: frame.width,
                frame_height: frame.height,
                surface_width: width,
                surface_height: height,
            });
        }

        let wl_surface = surface
            .wl_surface()
            .cloned()
            .ok_or(PresentError::NotConfigured)?;
        let pool = surface
            .pool_mut()
            .ok_or_else(|| PresentError::Buffer("buffer pool not created".to_string()))?;

        let stride = width * 4;
        let (buffer, canvas) = pool
            .create_buffer(width, height, stride, wl_shm::Format::Argb8888)
            .map_err(|err| PresentError::Buffer(err.to_string()))?;

        for y in 0..height {
            let row = frame.row(y);
            let start = y as usize * stride as usize;
            canvas[start..start + row.len()].copy_from_slice(row);
        }

        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width, height);
        wl_surface.commit();
        debug!("Committed {}x{} frame", width, height);

        self.conn
            .flush()
            .map_err(|err| PresentError::Connection(err.to_string()))
    }
}
