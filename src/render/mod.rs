//! Frame production: the off-screen [`Compositor`] and the [`FrameClock`]
//! thread that drives it.

pub mod clock;
pub mod compositor;

pub use clock::{DEFAULT_FRAME_INTERVAL, FrameClock};
pub use compositor::{Compositor, RenderError, TickOutcome};
