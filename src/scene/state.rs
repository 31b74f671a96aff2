// Thread-safe accumulator of points and text; drawing threads append, the compositor
// copies snapshots out, and the input thread updates the pointer position.
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::TextAnnotation;
use crate::draw::{Color, Point2d, color::BLACK};

/// Single source of truth for everything drawn on the surface.
///
/// The point list and the text list each sit behind their own mutex, so a
/// drawing thread adding points never waits on one adding text. Locks are held
/// only for the mutation itself or for the copy taken by [`points_snapshot`] /
/// [`texts_snapshot`], never while painting.
///
/// The draw color and the pointer position are plain atomics: writers publish
/// with `Release`, readers load with `Acquire`, and both values are packed into
/// a single word so they can never be observed half-written.
///
/// [`points_snapshot`]: SceneState::points_snapshot
/// [`texts_snapshot`]: SceneState::texts_snapshot
#[derive(Debug)]
pub struct SceneState {
    points: Mutex<Vec<Point2d>>,
    texts: Mutex<Vec<TextAnnotation>>,
    color: AtomicU32,
    mouse: AtomicU64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(BLACK)
    }
}

impl SceneState {
    /// Creates an empty scene drawing in `color`.
    pub fn new(color: Color) -> Self {
        Self {
            points: Mutex::new(Vec::new()),
            texts: Mutex::new(Vec::new()),
            color: AtomicU32::new(color.to_argb32()),
            mouse: AtomicU64::new(pack_mouse(0, 0)),
        }
    }

    fn lock_points(&self) -> MutexGuard<'_, Vec<Point2d>> {
        // A panicking client thread must not wedge the compositor.
        self.points.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_texts(&self) -> MutexGuard<'_, Vec<TextAnnotation>> {
        self.texts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Points
    // ------------------------------------------------------------------

    /// Appends one point.
    pub fn add_point(&self, point: Point2d) {
        self.lock_points().push(point);
    }

    /// Appends a batch of points under a single lock acquisition.
    ///
    /// The batch is collected before locking, so readers see either none or
    /// all of it. An empty batch does not touch the lock.
    pub fn add_points<I>(&self, points: I)
    where
        I: IntoIterator<Item = Point2d>,
    {
        let batch: Vec<Point2d> = points.into_iter().collect();
        if batch.is_empty() {
            return;
        }
        self.lock_points().extend(batch);
    }

    /// Removes the first point equal to `point`.
    ///
    /// Returns `false` if no such point was stored.
    pub fn remove_point(&self, point: Point2d) -> bool {
        let mut points = self.lock_points();
        match points.iter().position(|p| *p == point) {
            Some(index) => {
                points.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every point.
    pub fn clear_points(&self) {
        self.lock_points().clear();
    }

    pub fn point_count(&self) -> usize {
        self.lock_points().len()
    }

    /// Copies the point list in insertion order.
    pub fn points_snapshot(&self) -> Vec<Point2d> {
        self.lock_points().clone()
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Appends a text annotation.
    pub fn add_text(&self, annotation: TextAnnotation) {
        self.lock_texts().push(annotation);
    }

    /// Removes and returns the most recently added annotation, if any.
    pub fn pop_text(&self) -> Option<TextAnnotation> {
        self.lock_texts().pop()
    }

    pub fn text_count(&self) -> usize {
        self.lock_texts().len()
    }

    /// Copies the text list in insertion order.
    pub fn texts_snapshot(&self) -> Vec<TextAnnotation> {
        self.lock_texts().clone()
    }

    // ------------------------------------------------------------------
    // Color and pointer
    // ------------------------------------------------------------------

    /// Sets the draw color for the next composited frame. `None` keeps the
    /// current color.
    ///
    /// The color is stored packed as ARGB32, so each channel is quantized to
    /// 8 bits: each component reads back as the nearest multiple of `1 / 255`.
    pub fn set_color(&self, color: Option<Color>) {
        if let Some(color) = color {
            self.color.store(color.to_argb32(), Ordering::Release);
        }
    }

    /// Current draw color, with 8-bit channel precision.
    pub fn color(&self) -> Color {
        Color::from_argb32(self.color.load(Ordering::Acquire))
    }

    /// Records the latest pointer position in surface-local pixels.
    pub fn set_mouse(&self, x: i32, y: i32) {
        self.mouse.store(pack_mouse(x, y), Ordering::Release);
    }

    /// Last recorded pointer position.
    pub fn mouse(&self) -> (i32, i32) {
        unpack_mouse(self.mouse.load(Ordering::Acquire))
    }
}

fn pack_mouse(x: i32, y: i32) -> u64 {
    ((x as u32 as u64) << 32) | (y as u32 as u64)
}

fn unpack_mouse(packed: u64) -> (i32, i32) {
    ((packed >> 32) as u32 as i32, packed as u32 as i32)
}
