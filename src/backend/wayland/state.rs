// Holds the live Wayland protocol state owned by the event thread; handler submodules
// update it as configure, pointer, and keyboard events arrive.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;
use smithay_client_toolkit::{
    compositor::CompositorState, output::OutputState, registry::RegistryState, seat::SeatState,
    shell::wlr_layer::LayerShell, shm::Shm,
};

use super::surface::SurfaceState;
use crate::scene::SceneState;

/// Internal Wayland state driven by the event loop.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management, shared with the presenter
    pub(super) surface: Arc<Mutex<SurfaceState>>,
    pub(super) requested_size: (u32, u32),
    pub(super) buffer_count: usize,

    // Pointer motion lands here
    pub(super) scene: Arc<SceneState>,

    // Raised on close; also observed by the frame clock
    pub(super) shutdown: Arc<AtomicBool>,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        requested_size: (u32, u32),
        buffer_count: usize,
        scene: Arc<SceneState>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: Arc::new(Mutex::new(SurfaceState::new())),
            requested_size,
            buffer_count,
            scene,
            shutdown,
        }
    }

    pub(super) fn lock_surface(&self) -> MutexGuard<'_, SurfaceState> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn is_configured(&self) -> bool {
        self.lock_surface().is_configured()
    }

    pub(super) fn should_exit(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Teardown hook: the user or the compositor closed the surface.
    pub(super) fn request_close(&self, reason: &str) {
        info!("Closing surface: {}", reason);
        self.shutdown.store(true, Ordering::Release);
    }
}
