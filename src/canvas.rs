//! The client-facing drawing surface.
//!
//! A [`Canvas`] ties a [`SceneState`] to a running [`FrameClock`]. Every
//! drawing call rasterizes on the calling thread and appends the result to the
//! scene; the clock repaints the whole scene on its own schedule. All drawing
//! methods take `&self`, so one canvas can be shared by any number of threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::info;

use crate::backend::DisplaySurface;
use crate::backend::wayland::WaylandBackend;
use crate::config::Config;
use crate::draw::{FontDescriptor, Point2d, raster, resolve_color};
use crate::render::FrameClock;
use crate::scene::{SceneState, TextAnnotation};

const CLOSE_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// An immediate-mode drawing surface.
pub struct Canvas {
    scene: Arc<SceneState>,
    shutdown: Arc<AtomicBool>,
    width: i32,
    height: i32,
    // Field order is drop order: stop ticking before the event thread goes away.
    clock: FrameClock,
    backend: Option<WaylandBackend>,
}

impl Canvas {
    /// Opens a layer surface on the running Wayland compositor and starts
    /// drawing to it.
    ///
    /// Returns once the compositor has configured the surface, so
    /// [`width`](Self::width) and [`height`](Self::height) are final.
    pub fn open(config: &Config) -> Result<Self> {
        let scene = Arc::new(SceneState::new(config.drawing.default_color.to_color()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let (backend, display) =
            WaylandBackend::spawn(config, Arc::clone(&scene), Arc::clone(&shutdown))?;
        Self::start(scene, shutdown, display, config, Some(backend))
    }

    /// Draws to an arbitrary display surface, such as a
    /// [`HeadlessSurface`](crate::backend::HeadlessSurface).
    pub fn with_surface<S>(surface: S, config: &Config) -> Result<Self>
    where
        S: DisplaySurface + 'static,
    {
        let scene = Arc::new(SceneState::new(config.drawing.default_color.to_color()));
        let shutdown = Arc::new(AtomicBool::new(false));
        Self::start(scene, shutdown, surface, config, None)
    }

    fn start<S>(
        scene: Arc<SceneState>,
        shutdown: Arc<AtomicBool>,
        surface: S,
        config: &Config,
        backend: Option<WaylandBackend>,
    ) -> Result<Self>
    where
        S: DisplaySurface + 'static,
    {
        let (width, height) = surface.size();
        let clock = FrameClock::start(
            Arc::clone(&scene),
            FontDescriptor::from(&config.text),
            surface,
            config.frame_interval(),
            Arc::clone(&shutdown),
        )?;
        info!("Canvas ready ({}x{})", width, height);

        Ok(Self {
            scene,
            shutdown,
            width,
            height,
            clock,
            backend,
        })
    }

    /// Surface width in pixels, as reported when the canvas opened.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Surface height in pixels, as reported when the canvas opened.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The shared scene this canvas draws into.
    pub fn scene(&self) -> &Arc<SceneState> {
        &self.scene
    }

    // ------------------------------------------------------------------
    // Points
    // ------------------------------------------------------------------

    pub fn add_point(&self, point: Point2d) {
        self.scene.add_point(point);
    }

    /// Adds all points as one batch; no other thread sees part of it.
    pub fn add_points<I>(&self, points: I)
    where
        I: IntoIterator<Item = Point2d>,
    {
        self.scene.add_points(points);
    }

    /// Removes the first point equal to `point`, if any.
    pub fn remove_point(&self, point: Point2d) {
        self.scene.remove_point(point);
    }

    pub fn clear_points(&self) {
        self.scene.clear_points();
    }

    // ------------------------------------------------------------------
    // Shapes
    // ------------------------------------------------------------------

    pub fn draw_point(&self, point: Point2d) {
        self.scene.add_point(point);
    }

    pub fn draw_line(&self, p1: Point2d, p2: Point2d) {
        self.scene.add_points(raster::line(p1, p2));
    }

    /// Outlines the rectangle with opposite corners `p1` and `p2`.
    pub fn draw_rect(&self, p1: Point2d, p2: Point2d) {
        self.scene.add_points(raster::rect(p1, p2));
    }

    pub fn draw_circle(&self, center: Point2d, radius: i32) {
        self.scene.add_points(raster::circle(center, radius));
    }

    /// Draws column `x` across the full surface height.
    pub fn draw_vertical_line(&self, x: i32) {
        self.scene.add_points(raster::vertical_span(x, self.height));
    }

    /// Draws row `y` across the full surface width.
    pub fn draw_horizontal_line(&self, y: i32) {
        self.scene.add_points(raster::horizontal_span(y, self.width));
    }

    // ------------------------------------------------------------------
    // Text, color, pointer
    // ------------------------------------------------------------------

    /// Places `text` with its baseline starting at `anchor`.
    pub fn draw_text(&self, text: impl Into<String>, anchor: Point2d) {
        self.scene.add_text(TextAnnotation::new(text, anchor));
    }

    /// Removes the most recently drawn text, if any.
    pub fn pop_text(&self) {
        self.scene.pop_text();
    }

    /// Switches the draw color by name (`"dark gray"`) or hex (`"#ff8800"`,
    /// `"0xff8800"`). Anything unrecognized draws in black.
    pub fn set_color(&self, spec: &str) {
        self.scene.set_color(Some(resolve_color(spec)));
    }

    /// Last pointer position over the surface, in surface pixels.
    pub fn mouse_coordinates(&self) -> Point2d {
        let (x, y) = self.scene.mouse();
        Point2d::from_pixel(x, y)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// True once the surface was closed, by [`close`](Self::close), the user,
    /// or the compositor.
    pub fn is_closed(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Blocks until the surface is closed.
    pub fn wait_closed(&self) {
        while !self.is_closed() {
            thread::sleep(CLOSE_POLL_INTERVAL);
        }
    }

    /// Requests teardown. The frame clock and event thread exit within one
    /// tick; dropping the canvas waits for them.
    pub fn close(&self) {
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            info!("Canvas close requested");
        }
    }

    /// Frames the clock has ticked so far.
    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    /// Whether the Wayland event thread (if any) is still running.
    pub fn backend_alive(&self) -> bool {
        self.backend
            .as_ref()
            .is_some_and(|backend| !backend.is_finished())
    }
}
