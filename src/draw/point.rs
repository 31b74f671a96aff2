//! Point value types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A 2D coordinate in surface-local pixel space.
///
/// Fields are public for convenient construction, but points are treated as
/// immutable values once stored in the scene. Two points are equal only when
/// both coordinates are bit-for-bit identical, which keeps `Eq` and `Hash`
/// consistent (so `-0.0 != 0.0` and `NaN == NaN` for identical NaN payloads).
#[derive(Clone, Copy, Debug)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point from integer pixel coordinates.
    pub fn from_pixel(x: i32, y: i32) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }

    /// Pixel the point lands on when painted (truncation toward zero).
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl PartialEq for Point2d {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for Point2d {}

impl Hash for Point2d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl From<(i32, i32)> for Point2d {
    fn from((x, y): (i32, i32)) -> Self {
        Self::from_pixel(x, y)
    }
}

impl From<(f64, f64)> for Point2d {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?} ,{:?})", self.x, self.y)
    }
}

/// A mutable 3D coordinate.
///
/// Not used by the 2D renderer; provided for clients that keep their own
/// 3D models and project them onto the surface themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3d {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_ints(x: i32, y: i32, z: i32) -> Self {
        Self::new(x as f64, y as f64, z as f64)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }
}

impl fmt::Display for Point3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?} ,{:?} ,{:?})", self.x, self.y, self.z)
    }
}
