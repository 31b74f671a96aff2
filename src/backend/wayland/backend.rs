// Starts the Wayland event thread, waits for the first configure, and hands the
// presentable half of the backend back to the caller.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    reexports::{calloop::EventLoop, calloop_wayland_source::WaylandSource},
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell},
    },
    shm::Shm,
};
use wayland_client::{Connection, globals::registry_queue_init};

use super::display::WaylandDisplay;
use super::state::WaylandState;
use crate::config::Config;
use crate::draw::Color;
use crate::scene::SceneState;

/// How long to wait for the compositor's first configure.
const CONFIGURE_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on a single event loop wait, so shutdown is noticed promptly.
const DISPATCH_TIMEOUT: Duration = Duration::from_millis(50);

/// Settings the event thread needs, captured up front so `Config` stays on the
/// caller's side.
struct SurfaceRequest {
    title: String,
    width: Option<u32>,
    height: Option<u32>,
    background: Color,
    buffer_count: usize,
}

/// Handle to the Wayland event thread.
pub struct WaylandBackend {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl WaylandBackend {
    /// Connects to the compositor, maps a layer surface, and returns once it has
    /// been configured.
    ///
    /// Raising `shutdown` (or closing the surface, which raises it) ends the
    /// event thread.
    ///
    /// # Errors
    /// Fails if no compositor is reachable, a required global is missing, or the
    /// surface is not configured within a few seconds.
    pub fn spawn(
        config: &Config,
        scene: Arc<SceneState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<(Self, WaylandDisplay)> {
        let request = SurfaceRequest {
            title: config.surface.title.clone(),
            width: config.surface.width,
            height: config.surface.height,
            background: config.surface.background.to_color(),
            buffer_count: config.performance.buffer_count as usize,
        };

        let (ready_tx, ready_rx) = mpsc::channel::<Result<WaylandDisplay>>();
        let thread_shutdown = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("wayland-events".into())
            .spawn(move || {
                let mut ready = Some(ready_tx);
                if let Err(err) = run_events(request, scene, &thread_shutdown, &mut ready) {
                    match ready.take() {
                        Some(tx) => report_readiness(&tx, Err(err)),
                        None => error!("Wayland event loop failed: {:#}", err),
                    }
                }
                // Whatever ended the loop, the surface is gone for everyone.
                thread_shutdown.store(true, Ordering::Release);
            })
            .context("Failed to spawn Wayland event thread")?;

        let mut backend = Self {
            shutdown,
            handle: Some(handle),
        };

        info!("Waiting for the layer surface to be configured...");
        match ready_rx.recv_timeout(CONFIGURE_TIMEOUT) {
            Ok(Ok(display)) => Ok((backend, display)),
            Ok(Err(err)) => {
                backend.join();
                Err(err)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!("Timed out waiting for the compositor to configure the surface");
                backend.shutdown.store(true, Ordering::Release);
                backend.join();
                Err(anyhow!("Timed out waiting for the surface to be configured"))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                backend.join();
                Err(anyhow!(
                    "Wayland event thread exited before the surface was configured"
                ))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }

    /// Waits for the event thread to exit. Does not request shutdown itself.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.join() {
                warn!("Wayland event thread panicked: {:?}", err);
            }
        }
    }
}

impl Drop for WaylandBackend {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        self.join();
    }
}

fn run_events(
    request: SurfaceRequest,
    scene: Arc<SceneState>,
    shutdown: &Arc<AtomicBool>,
    ready: &mut Option<mpsc::Sender<Result<WaylandDisplay>>>,
) -> Result<()> {
    info!("Starting Wayland backend");

    let conn = Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
    debug!("Connected to Wayland display");

    let (globals, event_queue) =
        registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
    let qh = event_queue.handle();

    let compositor_state =
        CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
    debug!("Bound compositor");

    let layer_shell =
        LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
    debug!("Bound layer shell");

    let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
    debug!("Bound shared memory");

    let output_state = OutputState::new(&globals, &qh);
    let seat_state = SeatState::new(&globals, &qh);
    let registry_state = RegistryState::new(&globals);

    let requested_size = (request.width.unwrap_or(0), request.height.unwrap_or(0));
    let mut state = WaylandState::new(
        registry_state,
        compositor_state,
        layer_shell,
        shm,
        output_state,
        seat_state,
        requested_size,
        request.buffer_count,
        scene,
        Arc::clone(shutdown),
    );

    info!("Creating layer shell surface");
    let wl_surface = state.compositor_state.create_surface(&qh);
    let layer_surface = state.layer_shell.create_layer_surface(
        &qh,
        wl_surface,
        Layer::Overlay,
        Some(request.title.clone()),
        None,
    );

    match (request.width, request.height) {
        (Some(width), Some(height)) => {
            // Centered window-like surface.
            layer_surface.set_anchor(Anchor::empty());
            layer_surface.set_size(width, height);
        }
        (width, height) => {
            // Anchoring to every edge stretches the unset dimensions across the output.
            layer_surface.set_anchor(Anchor::all());
            layer_surface.set_size(width.unwrap_or(0), height.unwrap_or(0));
            layer_surface.set_exclusive_zone(-1);
        }
    }
    layer_surface.set_keyboard_interactivity(KeyboardInteractivity::OnDemand);
    layer_surface.commit();

    state
        .lock_surface()
        .set_wl_surface(layer_surface.wl_surface().clone());
    info!("Layer shell surface created ({})", request.title);

    let mut event_loop: EventLoop<WaylandState> =
        EventLoop::try_new().context("Failed to create event loop")?;
    WaylandSource::new(conn.clone(), event_queue)
        .insert(event_loop.handle())
        .map_err(|err| anyhow!("Failed to register Wayland event source: {}", err.error))?;

    let mut loop_error = None;
    while !state.should_exit() {
        if let Err(err) = event_loop.dispatch(Some(DISPATCH_TIMEOUT), &mut state) {
            warn!("Event loop error: {}", err);
            loop_error = Some(anyhow!("Wayland event loop error: {}", err));
            break;
        }

        if state.is_configured() {
            if let Some(tx) = ready.take() {
                info!("Layer surface ready");
                let display = WaylandDisplay::new(
                    conn.clone(),
                    Arc::clone(&state.surface),
                    request.background,
                );
                report_readiness(&tx, Ok(display));
            }
        }
    }

    info!("Wayland event loop finished");
    state.lock_surface().reset();
    drop(layer_surface);
    if let Err(err) = conn.flush() {
        debug!("Final flush failed: {}", err);
    }

    match loop_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn report_readiness(tx: &mpsc::Sender<Result<WaylandDisplay>>, result: Result<WaylandDisplay>) {
    if let Err(err) = tx.send(result) {
        debug!(
            "Surface readiness receiver dropped before signal could be delivered: {}",
            err
        );
    }
}
