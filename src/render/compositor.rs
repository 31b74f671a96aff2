//! Off-screen compositing of the scene into a display surface.

use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use crate::backend::{DisplaySurface, FrameView, PresentError};
use crate::draw::{self, FontDescriptor};
use crate::scene::SceneState;

/// Errors from a single compositor tick. None of them are fatal; the frame
/// clock logs them and tries again on the next tick.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to allocate {width}x{height} pixel buffer: {source}")]
    Allocation {
        width: i32,
        height: i32,
        source: cairo::Error,
    },

    #[error("cairo drawing failed: {0}")]
    Draw(#[from] cairo::Error),

    #[error("pixel buffer is still borrowed: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("presentation failed: {0}")]
    Present(#[from] PresentError),
}

/// What a tick ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The surface reported a non-positive size; nothing was drawn.
    Skipped,
    /// A full frame was rendered and handed to the surface.
    Presented { points: usize, texts: usize },
}

/// Renders snapshots of a [`SceneState`] into an owned off-screen buffer and
/// presents each finished frame in one copy.
///
/// The pixel buffer never leaves the compositor, and it is reallocated
/// whenever the surface size changes. Because every frame is cleared and
/// drawn off-screen first, the visible surface only ever receives complete
/// frames.
pub struct Compositor {
    scene: Arc<SceneState>,
    font: FontDescriptor,
    buffer: Option<cairo::ImageSurface>,
}

impl Compositor {
    pub fn new(scene: Arc<SceneState>, font: FontDescriptor) -> Self {
        Self {
            scene,
            font,
            buffer: None,
        }
    }

    /// Size of the current pixel buffer, if one has been allocated.
    pub fn buffer_size(&self) -> Option<(i32, i32)> {
        self.buffer
            .as_ref()
            .map(|buffer| (buffer.width(), buffer.height()))
    }

    /// Runs one clear → render → present cycle against `surface`.
    pub fn tick(&mut self, surface: &mut dyn DisplaySurface) -> Result<TickOutcome, RenderError> {
        let (width, height) = surface.size();
        if width <= 0 || height <= 0 {
            debug!("Surface not realized ({}x{}), skipping tick", width, height);
            return Ok(TickOutcome::Skipped);
        }

        let mut buffer = self.take_buffer(width, height)?;
        let result = self.compose(&mut buffer, surface);
        // Keep the allocation even if this frame failed.
        self.buffer = Some(buffer);
        result
    }

    fn take_buffer(&mut self, width: i32, height: i32) -> Result<cairo::ImageSurface, RenderError> {
        if let Some(buffer) = self.buffer.take() {
            if buffer.width() == width && buffer.height() == height {
                return Ok(buffer);
            }
            info!(
                "Surface resized from {}x{} to {}x{}, reallocating pixel buffer",
                buffer.width(),
                buffer.height(),
                width,
                height
            );
        }

        cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).map_err(|source| {
            RenderError::Allocation {
                width,
                height,
                source,
            }
        })
    }

    fn compose(
        &self,
        buffer: &mut cairo::ImageSurface,
        surface: &mut dyn DisplaySurface,
    ) -> Result<TickOutcome, RenderError> {
        // Snapshots are taken one collection at a time and the locks are
        // released before any painting happens.
        let points = self.scene.points_snapshot();
        let texts = self.scene.texts_snapshot();

        {
            let ctx = cairo::Context::new(&*buffer)?;
            draw::render::clear(&ctx, surface.background())?;
            draw::render::render_points(&ctx, &points, self.scene.color())?;
            draw::render::render_texts(&ctx, &texts, self.scene.color(), &self.font)?;
        }
        buffer.flush();

        let width = buffer.width();
        let height = buffer.height();
        let stride = buffer.stride() as usize;
        let data = buffer.data()?;
        surface.present(FrameView {
            width,
            height,
            stride,
            data: &data,
        })?;

        debug!(
            "Presented {}x{} frame ({} points, {} texts)",
            width,
            height,
            points.len(),
            texts.len()
        );
        Ok(TickOutcome::Presented {
            points: points.len(),
            texts: texts.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessSurface;
    use crate::draw::Point2d;
    use crate::draw::color::{BLUE, RED, WHITE};
    use crate::scene::TextAnnotation;

    fn setup(width: i32, height: i32) -> (Arc<SceneState>, Compositor, HeadlessSurface) {
        let scene = Arc::new(SceneState::default());
        let compositor = Compositor::new(Arc::clone(&scene), FontDescriptor::default());
        let surface = HeadlessSurface::new(width, height, WHITE);
        (scene, compositor, surface)
    }

    #[test]
    fn unrealized_surface_is_skipped() {
        let (_scene, mut compositor, mut surface) = setup(0, 10);
        assert_eq!(compositor.tick(&mut surface).unwrap(), TickOutcome::Skipped);
        assert_eq!(compositor.buffer_size(), None);
        assert_eq!(surface.frames_presented(), 0);
    }

    #[test]
    fn points_are_painted_in_the_current_color() {
        let (scene, mut compositor, mut surface) = setup(8, 8);
        scene.set_color(Some(RED));
        scene.add_point(Point2d::new(3.0, 4.0));

        let outcome = compositor.tick(&mut surface).unwrap();
        assert_eq!(outcome, TickOutcome::Presented { points: 1, texts: 0 });
        assert_eq!(surface.pixel(3, 4), Some(0xFFFF_0000));
        assert_eq!(surface.pixel(0, 0), Some(0xFFFF_FFFF));
    }

    #[test]
    fn each_frame_starts_from_a_clean_background() {
        let (scene, mut compositor, mut surface) = setup(4, 4);
        scene.add_point(Point2d::new(1.0, 1.0));
        compositor.tick(&mut surface).unwrap();
        assert_eq!(surface.pixel(1, 1), Some(0xFF00_0000));

        scene.clear_points();
        compositor.tick(&mut surface).unwrap();
        assert_eq!(surface.pixel(1, 1), Some(0xFFFF_FFFF));
    }

    #[test]
    fn color_change_applies_to_the_next_frame() {
        let (scene, mut compositor, mut surface) = setup(4, 4);
        scene.add_point(Point2d::new(2.0, 2.0));
        compositor.tick(&mut surface).unwrap();
        scene.set_color(Some(BLUE));
        assert_eq!(surface.pixel(2, 2), Some(0xFF00_0000));

        compositor.tick(&mut surface).unwrap();
        assert_eq!(surface.pixel(2, 2), Some(0xFF00_00FF));
    }

    const BACKGROUND: u32 = 0xFFFF_FFFF;

    fn text_setup() -> (Arc<SceneState>, Compositor, HeadlessSurface) {
        let scene = Arc::new(SceneState::new(RED));
        let font = FontDescriptor {
            size: 24.0,
            ..FontDescriptor::default()
        };
        let compositor = Compositor::new(Arc::clone(&scene), font);
        let surface = HeadlessSurface::new(80, 48, WHITE);
        (scene, compositor, surface)
    }

    fn inked(surface: &HeadlessSurface, rows: std::ops::Range<i32>) -> Vec<u32> {
        let (width, _) = surface.frame_size();
        rows.flat_map(move |y| (0..width).filter_map(move |x| surface.pixel(x, y)))
            .filter(|&px| px != BACKGROUND)
            .collect()
    }

    #[test]
    fn text_is_drawn_above_its_baseline_in_the_draw_color() {
        let (scene, mut compositor, mut surface) = text_setup();
        scene.add_text(TextAnnotation::new("WWW", Point2d::new(2.0, 30.0)));

        let outcome = compositor.tick(&mut surface).unwrap();
        assert_eq!(outcome, TickOutcome::Presented { points: 0, texts: 1 });

        let glyphs = inked(&surface, 0..30);
        assert!(!glyphs.is_empty(), "no glyph pixels above the baseline");
        for px in &glyphs {
            // Red over white: the red channel stays saturated, only green and
            // blue drop with coverage.
            assert_eq!(px >> 24, 0xFF);
            assert_eq!((px >> 16) & 0xFF, 0xFF, "pixel {px:#010x}");
        }
        assert!(
            glyphs.iter().any(|px| (px >> 8) & 0xFF < 0x80),
            "glyphs are too faint"
        );

        assert!(inked(&surface, 38..48).is_empty());
    }

    #[test]
    fn popped_text_leaves_a_clean_frame() {
        let (scene, mut compositor, mut surface) = text_setup();
        scene.add_text(TextAnnotation::new("WWW", Point2d::new(2.0, 30.0)));
        compositor.tick(&mut surface).unwrap();
        assert!(!inked(&surface, 0..48).is_empty());

        assert!(scene.pop_text().is_some());
        let outcome = compositor.tick(&mut surface).unwrap();
        assert_eq!(outcome, TickOutcome::Presented { points: 0, texts: 0 });
        assert!(inked(&surface, 0..48).is_empty());
    }

    #[test]
    fn buffer_follows_surface_size() {
        let (_scene, mut compositor, mut surface) = setup(4, 4);
        compositor.tick(&mut surface).unwrap();
        assert_eq!(compositor.buffer_size(), Some((4, 4)));

        surface.resize(6, 3);
        compositor.tick(&mut surface).unwrap();
        assert_eq!(compositor.buffer_size(), Some((6, 3)));
        assert_eq!(surface.frame_size(), (6, 3));
    }

    #[test]
    fn present_failure_is_reported_and_recovers() {
        let (_scene, mut compositor, mut surface) = setup(2, 2);
        surface.fail_next_presents(1);
        assert!(matches!(
            compositor.tick(&mut surface),
            Err(RenderError::Present(_))
        ));
        assert!(compositor.tick(&mut surface).is_ok());
        assert_eq!(surface.frames_presented(), 1);
    }
}
