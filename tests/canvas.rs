use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixelpad::backend::HeadlessSurface;
use pixelpad::draw::color::{BLACK, RED, WHITE};
use pixelpad::{Canvas, Config, Point2d};

const OPAQUE_BLACK: u32 = 0xFF00_0000;
const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;

fn fast_config() -> Config {
    let mut config = Config::default();
    config.performance.frame_interval_ms = 2;
    config
}

fn headless(width: i32, height: i32) -> (HeadlessSurface, Canvas) {
    let surface = HeadlessSurface::new(width, height, WHITE);
    let canvas = Canvas::with_surface(surface.clone(), &fast_config()).unwrap();
    (surface, canvas)
}

fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}

/// Waits until a frame that started after this call has been presented.
fn wait_for_fresh_frame(surface: &HeadlessSurface) {
    let seen = surface.frames_presented();
    assert!(
        wait_for(|| surface.frames_presented() >= seen + 2),
        "no frames presented"
    );
}

#[test]
fn drawn_line_reaches_the_surface() {
    let (surface, canvas) = headless(32, 16);
    assert_eq!((canvas.width(), canvas.height()), (32, 16));

    canvas.draw_line(Point2d::new(0.0, 0.0), Point2d::new(5.0, 0.0));
    wait_for_fresh_frame(&surface);

    for x in 0..=5 {
        assert_eq!(surface.pixel(x, 0), Some(OPAQUE_BLACK), "x = {x}");
    }
    assert_eq!(surface.pixel(6, 0), Some(OPAQUE_WHITE));
    assert_eq!(surface.pixel(0, 1), Some(OPAQUE_WHITE));
}

#[test]
fn removed_points_disappear_on_the_next_frame() {
    let (surface, canvas) = headless(8, 8);
    canvas.add_point(Point2d::from_pixel(3, 3));
    wait_for_fresh_frame(&surface);
    assert_eq!(surface.pixel(3, 3), Some(OPAQUE_BLACK));

    canvas.remove_point(Point2d::from_pixel(3, 3));
    wait_for_fresh_frame(&surface);
    assert_eq!(surface.pixel(3, 3), Some(OPAQUE_WHITE));
}

#[test]
fn color_change_applies_to_the_whole_next_frame() {
    let (surface, canvas) = headless(8, 8);
    canvas.draw_point(Point2d::from_pixel(1, 1));
    canvas.set_color("#ff0000");
    assert_eq!(canvas.scene().color(), RED);

    wait_for_fresh_frame(&surface);
    assert_eq!(surface.pixel(1, 1), Some(0xFFFF_0000));

    canvas.set_color("not-a-color");
    assert_eq!(canvas.scene().color(), BLACK);
}

#[test]
fn full_span_lines_use_the_surface_extent() {
    let (_surface, canvas) = headless(40, 30);

    canvas.draw_vertical_line(4);
    assert_eq!(canvas.scene().point_count(), 30);

    canvas.clear_points();
    canvas.draw_horizontal_line(4);
    let points = canvas.scene().points_snapshot();
    assert_eq!(points.len(), 40);
    assert_eq!(points[0], Point2d::from_pixel(0, 4));
    assert_eq!(points[39], Point2d::from_pixel(39, 4));
}

#[test]
fn shapes_reduce_to_points() {
    let (_surface, canvas) = headless(64, 64);

    canvas.draw_rect(Point2d::new(0.0, 0.0), Point2d::new(3.0, 2.0));
    // Four edges, corners shared between them.
    assert_eq!(canvas.scene().point_count(), 4 + 4 + 3 + 3);

    canvas.clear_points();
    canvas.draw_circle(Point2d::new(10.0, 10.0), 5);
    assert_eq!(canvas.scene().point_count(), 32);
}

#[test]
fn text_stack_pops_most_recent() {
    let (_surface, canvas) = headless(64, 32);

    canvas.pop_text();
    assert_eq!(canvas.scene().text_count(), 0);

    canvas.draw_text("first", Point2d::new(2.0, 20.0));
    canvas.draw_text("second", Point2d::new(2.0, 28.0));
    canvas.pop_text();

    let texts = canvas.scene().texts_snapshot();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, "first");
}

#[test]
fn mouse_coordinates_follow_the_scene() {
    let (_surface, canvas) = headless(16, 16);
    assert_eq!(canvas.mouse_coordinates(), Point2d::from_pixel(0, 0));

    canvas.scene().set_mouse(12, 7);
    assert_eq!(canvas.mouse_coordinates(), Point2d::from_pixel(12, 7));
}

#[test]
fn concurrent_drawing_loses_no_points() {
    const THREADS: i32 = 8;
    const PER_THREAD: i32 = 1000;

    let (surface, canvas) = headless(64, 64);
    let canvas = Arc::new(canvas);

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let canvas = Arc::clone(&canvas);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    canvas.add_point(Point2d::from_pixel(i % 64, t));
                    if i % 100 == 0 {
                        thread::yield_now();
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(
        canvas.scene().point_count(),
        (THREADS * PER_THREAD) as usize
    );
    wait_for_fresh_frame(&surface);
    assert!(canvas.ticks() > 0);
}

#[test]
fn presentation_failures_do_not_stop_the_clock() {
    let (surface, canvas) = headless(8, 8);
    let ticks_before = canvas.ticks();
    surface.fail_next_presents(5);
    canvas.add_point(Point2d::from_pixel(2, 2));

    wait_for_fresh_frame(&surface);
    assert_eq!(surface.pixel(2, 2), Some(OPAQUE_BLACK));
    assert!(canvas.ticks() >= ticks_before + 5);
}

#[test]
fn resized_surface_gets_resized_frames() {
    let (surface, _canvas) = headless(8, 8);
    wait_for_fresh_frame(&surface);
    assert_eq!(surface.frame_size(), (8, 8));

    surface.resize(20, 10);
    assert!(wait_for(|| surface.frame_size() == (20, 10)));
}

#[test]
fn close_stops_ticking() {
    let (surface, canvas) = headless(8, 8);
    wait_for_fresh_frame(&surface);

    canvas.close();
    canvas.wait_closed();
    assert!(canvas.is_closed());
    assert!(!canvas.backend_alive());

    drop(canvas);
    let frames = surface.frames_presented();
    thread::sleep(Duration::from_millis(20));
    assert_eq!(surface.frames_presented(), frames);
}
