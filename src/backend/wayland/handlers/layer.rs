// Responds to layer-shell configure/close events: keeps the shared surface size and
// buffer pool in sync with the compositor and turns a close into a teardown request.
use log::{info, warn};
use smithay_client_toolkit::shell::wlr_layer::{
    LayerShellHandler, LayerSurface, LayerSurfaceConfigure,
};
use wayland_client::{Connection, QueueHandle};

use super::super::state::WaylandState;

impl LayerShellHandler for WaylandState {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        self.request_close("layer surface closed by compositor");
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        info!(
            "Layer surface configured: {}x{}",
            configure.new_size.0, configure.new_size.1
        );

        // A zero dimension means "pick your own", i.e. whatever we asked for.
        let width = if configure.new_size.0 > 0 {
            configure.new_size.0
        } else {
            self.requested_size.0
        };
        let height = if configure.new_size.1 > 0 {
            configure.new_size.1
        } else {
            self.requested_size.1
        };

        let buffer_count = self.buffer_count;
        let mut surface = self.lock_surface();
        if surface.update_dimensions(width, height) {
            info!("Surface size changed - recreating SlotPool");
        }
        if width > 0 && height > 0 {
            if let Err(err) = surface.ensure_pool(&self.shm, buffer_count) {
                warn!("Failed to allocate buffers for {}x{}: {:#}", width, height, err);
            }
        }
        surface.set_configured(true);
    }
}
