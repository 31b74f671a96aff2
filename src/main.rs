use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};

use pixelpad::{Canvas, Config, Point2d};

#[derive(Parser, Debug)]
#[command(name = "pixelpad")]
#[command(version, about = "Immediate-mode drawing surface for Wayland compositors")]
struct Cli {
    /// Surface title (layer-shell namespace)
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Surface width in pixels (default: full output width)
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Surface height in pixels (default: full output height)
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// Draw a sample scene and a live pointer readout
    #[arg(long)]
    demo: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if std::env::var("WAYLAND_DISPLAY").is_err() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor (Hyprland, Sway, etc.).");
        return Err(anyhow::anyhow!("WAYLAND_DISPLAY not set"));
    }

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {:#}. Using defaults.", e);
            Config::default()
        }
    };
    if let Some(title) = cli.title {
        config.surface.title = title;
    }
    if cli.width.is_some() {
        config.surface.width = cli.width;
    }
    if cli.height.is_some() {
        config.surface.height = cli.height;
    }
    config.validate_and_clamp();

    let interrupted = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&interrupted))
            .context("Failed to register signal handler")?;
    }

    let canvas = Canvas::open(&config)?;
    log::info!("Surface open ({}x{}); press Escape to close", canvas.width(), canvas.height());

    if cli.demo {
        draw_demo(&canvas);
    }

    while !canvas.is_closed() {
        if interrupted.load(Ordering::Acquire) {
            log::info!("Signal received, closing surface");
            canvas.close();
            break;
        }
        if cli.demo {
            let mouse = canvas.mouse_coordinates();
            canvas.pop_text();
            canvas.draw_text(format!("mouse {}", mouse), Point2d::new(20.0, 40.0));
        }
        thread::sleep(Duration::from_millis(50));
    }

    drop(canvas);
    log::info!("pixelpad exited");
    Ok(())
}

fn draw_demo(canvas: &Canvas) {
    let (width, height) = (canvas.width(), canvas.height());
    let center = Point2d::from_pixel(width / 2, height / 2);

    // One draw color applies to the whole frame.
    canvas.set_color("dark gray");
    canvas.draw_vertical_line(width / 2);
    canvas.draw_horizontal_line(height / 2);
    canvas.draw_rect(Point2d::new(40.0, 60.0), Point2d::from_pixel(width - 40, height - 40));
    let radius = (width.min(height) / 4).max(1);
    canvas.draw_circle(center, radius);
    canvas.draw_circle(center, radius / 2);
    canvas.draw_line(Point2d::new(40.0, 60.0), Point2d::from_pixel(width - 40, height - 40));
    canvas.draw_text("pixelpad", center);
    canvas.draw_text("mouse", Point2d::new(20.0, 40.0));
}
