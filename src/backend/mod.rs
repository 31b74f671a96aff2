//! Display surfaces the compositor presents finished frames to.
//!
//! The compositor never talks to a windowing system directly; it renders into
//! its own buffer and hands the result to a [`DisplaySurface`] as one
//! [`FrameView`]. [`headless::HeadlessSurface`] keeps frames in memory,
//! [`wayland`] shows them on a Wayland layer surface.

use thiserror::Error;

use crate::draw::Color;

pub mod headless;
pub mod wayland;

pub use headless::HeadlessSurface;

/// A fully rendered frame in Cairo's ARGB32 layout (premultiplied alpha,
/// native-endian 32-bit pixels).
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub width: i32,
    pub height: i32,
    /// Bytes per row, at least `width * 4`
    pub stride: usize,
    pub data: &'a [u8],
}

impl FrameView<'_> {
    /// Row `y` without its stride padding.
    pub fn row(&self, y: i32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * 4]
    }
}

/// Errors raised while handing a frame to a display surface.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("surface is not configured yet")]
    NotConfigured,

    #[error("frame is {frame_width}x{frame_height} but surface is {surface_width}x{surface_height}")]
    SizeMismatch {
        frame_width: i32,
        frame_height: i32,
        surface_width: i32,
        surface_height: i32,
    },

    #[error("failed to acquire a presentation buffer: {0}")]
    Buffer(String),

    #[error("display connection error: {0}")]
    Connection(String),
}

/// The visible surface the compositor blits into.
///
/// Implementations are moved onto the frame clock thread, hence `Send`.
pub trait DisplaySurface: Send {
    /// Current size in pixels. A non-positive dimension means the surface is
    /// not realized yet and the tick is skipped.
    fn size(&self) -> (i32, i32);

    /// Color the compositor clears every frame to.
    fn background(&self) -> Color;

    /// Replaces the visible contents with `frame` in a single operation.
    fn present(&mut self, frame: FrameView<'_>) -> Result<(), PresentError>;
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn size(&self) -> (i32, i32) {
        (**self).size()
    }

    fn background(&self) -> Color {
        (**self).background()
    }

    fn present(&mut self, frame: FrameView<'_>) -> Result<(), PresentError> {
        (**self).present(frame)
    }
}
