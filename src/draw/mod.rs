//! Drawing primitives: points, colors, rasterization, and Cairo painting.
//!
//! - [`Point2d`] / [`Point3d`]: coordinate value types
//! - [`raster`]: pure scan conversion of lines, rectangles, and circles
//! - [`Color`] and [`resolve_color`]: color values and the name/hex resolver
//! - [`render`]: painting scene contents into a Cairo context

pub mod color;
pub mod font;
pub mod point;
pub mod raster;
pub mod render;

pub use color::{Color, resolve_color};
pub use font::FontDescriptor;
pub use point::{Point2d, Point3d};
