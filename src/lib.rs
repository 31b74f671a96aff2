//! Immediate-mode 2D drawing surface.
//!
//! Client threads add points and text to a shared scene through a [`Canvas`];
//! a frame clock repaints the scene into an off-screen Cairo buffer about 60
//! times a second and presents each finished frame to a display surface in one
//! step.

pub mod backend;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod render;
pub mod scene;

pub use canvas::Canvas;
pub use config::Config;
pub use draw::{Color, Point2d, Point3d};
