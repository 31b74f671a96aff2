//! Fixed-cadence driver for the compositor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use super::compositor::{Compositor, TickOutcome};
use crate::backend::DisplaySurface;
use crate::draw::FontDescriptor;
use crate::scene::SceneState;

/// Default tick period (~60 ticks per second).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Consecutive failures after which tick errors are logged at `error` level.
const MAX_CONSECUTIVE_FAILURES: u32 = 10;

/// Background thread that ticks a [`Compositor`] at a fixed period until
/// stopped.
///
/// The clock redraws the full scene every tick whether or not anything
/// changed. Tick errors are logged and the next tick simply tries again.
///
/// The loop exits when [`FrameClock::stop`] is called, when the clock is
/// dropped, or when the shared shutdown flag passed to [`FrameClock::start`]
/// is raised by someone else (for example the display backend on close).
pub struct FrameClock {
    shutdown: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl FrameClock {
    /// Spawns the clock thread.
    ///
    /// The compositor is built on the clock thread itself, so its pixel
    /// buffer never crosses threads.
    pub fn start<S>(
        scene: Arc<SceneState>,
        font: FontDescriptor,
        mut surface: S,
        interval: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Self>
    where
        S: DisplaySurface + 'static,
    {
        let ticks = Arc::new(AtomicU64::new(0));
        let thread_shutdown = Arc::clone(&shutdown);
        let thread_ticks = Arc::clone(&ticks);

        let handle = thread::Builder::new()
            .name("frame-clock".into())
            .spawn(move || {
                let mut compositor = Compositor::new(scene, font);
                run_loop(
                    &mut compositor,
                    &mut surface,
                    interval,
                    &thread_shutdown,
                    &thread_ticks,
                );
            })
            .context("Failed to spawn frame clock thread")?;

        info!("Frame clock started ({}ms interval)", interval.as_millis());
        Ok(Self {
            shutdown,
            ticks,
            handle: Some(handle),
        })
    }

    /// Number of ticks run so far, including skipped and failed ones.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Signals the loop to exit and waits for it. Idempotent.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            match handle.join() {
                Ok(()) => info!("Frame clock stopped"),
                Err(err) => warn!("Frame clock thread panicked: {:?}", err),
            }
        }
    }
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(
    compositor: &mut Compositor,
    surface: &mut dyn DisplaySurface,
    interval: Duration,
    shutdown: &AtomicBool,
    ticks: &AtomicU64,
) {
    let mut consecutive_failures = 0u32;
    let mut next_deadline = Instant::now();

    while !shutdown.load(Ordering::Acquire) {
        match compositor.tick(surface) {
            Ok(outcome) => {
                if consecutive_failures > 0 {
                    info!(
                        "Rendering recovered after {} failed ticks",
                        consecutive_failures
                    );
                }
                consecutive_failures = 0;
                if outcome == TickOutcome::Skipped {
                    debug!("Tick skipped");
                }
            }
            Err(err) => {
                consecutive_failures = consecutive_failures.saturating_add(1);
                if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    error!(
                        "Rendering error ({} consecutive failures): {}",
                        consecutive_failures, err
                    );
                } else {
                    warn!(
                        "Rendering error (attempt {}/{}): {}",
                        consecutive_failures, MAX_CONSECUTIVE_FAILURES, err
                    );
                }
            }
        }
        ticks.fetch_add(1, Ordering::AcqRel);

        next_deadline += interval;
        let now = Instant::now();
        if next_deadline <= now {
            // Fell behind; don't try to catch up with a burst of ticks.
            next_deadline = now;
            continue;
        }

        // Unparked early by `stop`; spurious wakeups just re-check the flag.
        while !shutdown.load(Ordering::Acquire) {
            let now = Instant::now();
            if now >= next_deadline {
                break;
            }
            thread::park_timeout(next_deadline - now);
        }
    }
}
