//! In-memory display surface for offscreen rendering and tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DisplaySurface, FrameView, PresentError};
use crate::draw::Color;

#[derive(Debug)]
struct Inner {
    width: i32,
    height: i32,
    background: Color,
    pixels: Vec<u32>,
    frame_size: (i32, i32),
    presented: u64,
    failures_pending: u32,
}

/// A surface that keeps the most recently presented frame in memory.
///
/// Clones share the same state, so one handle can be moved into a frame
/// clock while another inspects the presented pixels.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    inner: Arc<Mutex<Inner>>,
}

impl HeadlessSurface {
    pub fn new(width: i32, height: i32, background: Color) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                width,
                height,
                background,
                pixels: Vec::new(),
                frame_size: (0, 0),
                presented: 0,
                failures_pending: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Changes the reported size; the next tick reallocates its buffer.
    pub fn resize(&self, width: i32, height: i32) {
        let mut inner = self.lock();
        inner.width = width;
        inner.height = height;
    }

    /// Makes the next `count` presents fail, to exercise error recovery.
    pub fn fail_next_presents(&self, count: u32) {
        self.lock().failures_pending = count;
    }

    /// Number of frames successfully presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.lock().presented
    }

    /// Size of the last presented frame.
    pub fn frame_size(&self) -> (i32, i32) {
        self.lock().frame_size
    }

    /// Premultiplied ARGB32 value at `(x, y)` in the last presented frame.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let inner = self.lock();
        let (width, height) = inner.frame_size;
        if x < 0 || y < 0 || x >= width || y >= height {
            return None;
        }
        inner.pixels.get((y * width + x) as usize).copied()
    }
}

impl DisplaySurface for HeadlessSurface {
    fn size(&self) -> (i32, i32) {
        let inner = self.lock();
        (inner.width, inner.height)
    }

    fn background(&self) -> Color {
        self.lock().background
    }

    fn present(&mut self, frame: FrameView<'_>) -> Result<(), PresentError> {
        let mut inner = self.lock();

        if inner.failures_pending > 0 {
            inner.failures_pending -= 1;
            return Err(PresentError::Buffer("injected failure".to_string()));
        }

        if (frame.width, frame.height) != (inner.width, inner.height) {
            return Err(PresentError::SizeMismatch {
                frame_width: frame.width,
                frame_height: frame.height,
                surface_width: inner.width,
                surface_height: inner.height,
            });
        }

        let mut pixels = Vec::with_capacity((frame.width * frame.height) as usize);
        for y in 0..frame.height {
            pixels.extend(
                frame
                    .row(y)
                    .chunks_exact(4)
                    .map(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]])),
            );
        }

        inner.pixels = pixels;
        inner.frame_size = (frame.width, frame.height);
        inner.presented += 1;
        Ok(())
    }
}
