//! Wayland presentation through a wlr-layer-shell surface.
//!
//! [`WaylandBackend`] owns the protocol event thread (configure, pointer,
//! keyboard); [`WaylandDisplay`] is handed to the frame clock and commits
//! finished frames. Both share the surface size and buffer pool.

mod backend;
mod display;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;
pub use display::WaylandDisplay;
