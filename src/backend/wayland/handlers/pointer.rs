// Feeds pointer positions into the scene so clients can poll the mouse coordinates.
use log::debug;
use smithay_client_toolkit::seat::pointer::{PointerEvent, PointerEventKind, PointerHandler};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use super::super::state::WaylandState;

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            match event.kind {
                PointerEventKind::Enter { .. } | PointerEventKind::Motion { .. } => {
                    self.scene
                        .set_mouse(event.position.0 as i32, event.position.1 as i32);
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left surface");
                }
                _ => {}
            }
        }
    }
}
