//! Scan conversion of stroked primitives into discrete points.
//!
//! Every function here is pure: it only produces a point sequence, and the
//! caller decides where to store it. All output points sit on integer pixel
//! coordinates.

use super::point::Point2d;

/// Rounds a coordinate to the nearest integer, with ties going toward
/// positive infinity (`-0.5` rounds to `0`, `2.5` rounds to `3`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Rasterizes a straight segment using Bresenham's algorithm.
///
/// Endpoints are rounded with [`round_half_up`] first; the walk itself uses
/// integer arithmetic only. Points are emitted from the smaller to the larger
/// coordinate along the major axis, so `line(a, b)` and `line(b, a)` cover
/// the same pixels. A degenerate segment yields exactly one point.
pub fn line(p1: Point2d, p2: Point2d) -> Vec<Point2d> {
    LineWalk::new(p1, p2).collect()
}

/// Lazy Bresenham walk behind [`line`].
///
/// Deltas and the error term are kept in `i64`, so endpoints anywhere in the
/// `i32` range never overflow.
#[derive(Debug, Clone)]
pub struct LineWalk {
    steep: bool,
    x: i64,
    x_end: i64,
    y: i64,
    y_step: i64,
    dx: i64,
    dy: i64,
    error: i64,
}

impl LineWalk {
    pub fn new(p1: Point2d, p2: Point2d) -> Self {
        let mut x0 = i64::from(round_half_up(p1.x));
        let mut y0 = i64::from(round_half_up(p1.y));
        let mut x1 = i64::from(round_half_up(p2.x));
        let mut y1 = i64::from(round_half_up(p2.y));

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }

        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        Self {
            steep,
            x: x0,
            x_end: x1,
            y: y0,
            y_step: if y0 < y1 { 1 } else { -1 },
            dx,
            dy: (y1 - y0).abs(),
            error: dx / 2,
        }
    }

    fn remaining(&self) -> u64 {
        (self.x_end - self.x + 1).max(0) as u64
    }
}

impl Iterator for LineWalk {
    type Item = Point2d;

    fn next(&mut self) -> Option<Point2d> {
        if self.x > self.x_end {
            return None;
        }

        let point = if self.steep {
            pixel(self.y, self.x)
        } else {
            pixel(self.x, self.y)
        };

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_step;
            self.error += self.dx;
        }
        self.x += 1;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(len) => (len, Some(len)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Rasterizes the outline of the axis-aligned rectangle spanned by two
/// opposite corners, as four [`line`] calls.
pub fn rect(p1: Point2d, p2: Point2d) -> Vec<Point2d> {
    let mut points = line(p1, Point2d::new(p2.x, p1.y));
    points.extend(line(Point2d::new(p1.x, p2.y), p2));
    points.extend(line(p1, Point2d::new(p1.x, p2.y)));
    points.extend(line(p2, Point2d::new(p2.x, p1.y)));
    points
}

/// Rasterizes a circle outline with the integer midpoint algorithm.
///
/// The center is truncated to integer coordinates. Each step emits the eight
/// octant-mirrored points in a fixed order, so points on the axes and the
/// diagonals appear more than once. A negative radius yields nothing.
pub fn circle(center: Point2d, radius: i32) -> Vec<Point2d> {
    CircleWalk::new(center, radius).collect()
}

/// Lazy midpoint walk behind [`circle`].
///
/// Mirrored coordinates are computed in `i64`; points past the `i32` range
/// keep their exact position since [`Point2d`] stores `f64`.
#[derive(Debug, Clone)]
pub struct CircleWalk {
    cx: i64,
    cy: i64,
    x: i64,
    y: i64,
    err: i64,
    octant: u8,
}

impl CircleWalk {
    pub fn new(center: Point2d, radius: i32) -> Self {
        let (cx, cy) = center.to_pixel();
        Self {
            cx: i64::from(cx),
            cy: i64::from(cy),
            x: i64::from(radius),
            y: 0,
            err: 0,
            octant: 0,
        }
    }

    fn step(&mut self) {
        self.y += 1;
        // Both checks run every step; the second sees the err updated by the first.
        if self.err <= 0 {
            self.err += 2 * self.y + 1;
        }
        if self.err > 0 {
            self.x -= 1;
            self.err -= 2 * self.x + 1;
        }
    }
}

impl Iterator for CircleWalk {
    type Item = Point2d;

    fn next(&mut self) -> Option<Point2d> {
        if self.x < self.y {
            return None;
        }

        let (cx, cy, x, y) = (self.cx, self.cy, self.x, self.y);
        let point = match self.octant {
            0 => pixel(cx + x, cy + y),
            1 => pixel(cx + y, cy + x),
            2 => pixel(cx - y, cy + x),
            3 => pixel(cx - x, cy + y),
            4 => pixel(cx - x, cy - y),
            5 => pixel(cx - y, cy - x),
            6 => pixel(cx + y, cy - x),
            _ => pixel(cx + x, cy - y),
        };

        self.octant += 1;
        if self.octant == 8 {
            self.octant = 0;
            self.step();
        }

        Some(point)
    }
}

fn pixel(x: i64, y: i64) -> Point2d {
    Point2d::new(x as f64, y as f64)
}

/// One point per row at column `x`, covering `0..height`.
pub fn vertical_span(x: i32, height: i32) -> Vec<Point2d> {
    (0..height.max(0)).map(|y| Point2d::from_pixel(x, y)).collect()
}

/// One point per column at row `y`, covering `0..width`.
pub fn horizontal_span(y: i32, width: i32) -> Vec<Point2d> {
    (0..width.max(0)).map(|x| Point2d::from_pixel(x, y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pixels(points: &[Point2d]) -> Vec<(i32, i32)> {
        points.iter().map(|p| p.to_pixel()).collect()
    }

    #[test]
    fn horizontal_line_emits_every_pixel_in_order() {
        let pts = line(Point2d::new(0.0, 0.0), Point2d::new(5.0, 0.0));
        assert_eq!(
            pixels(&pts),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]
        );
    }

    #[test]
    fn diagonal_line_steps_both_axes() {
        let pts = line(Point2d::new(0.0, 0.0), Point2d::new(3.0, 3.0));
        assert_eq!(pixels(&pts), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn shallow_line_matches_reference() {
        let pts = line(Point2d::new(0.0, 0.0), Point2d::new(5.0, 2.0));
        assert_eq!(
            pixels(&pts),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
        );
    }

    #[test]
    fn steep_line_swaps_axes_back_on_emit() {
        let pts = line(Point2d::new(0.0, 0.0), Point2d::new(1.0, 4.0));
        assert_eq!(pixels(&pts), vec![(0, 0), (0, 1), (0, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn line_is_symmetric_in_its_endpoints() {
        let cases = [
            ((0.0, 0.0), (7.0, 3.0)),
            ((2.0, 9.0), (-4.0, 1.0)),
            ((10.0, 10.0), (10.0, -3.0)),
            ((-5.0, 2.0), (6.0, -8.0)),
        ];
        for (a, b) in cases {
            let forward: HashSet<_> = line(a.into(), b.into()).into_iter().collect();
            let backward: HashSet<_> = line(b.into(), a.into()).into_iter().collect();
            assert_eq!(forward, backward, "{:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn degenerate_line_is_a_single_point() {
        let pts = line(Point2d::new(4.0, 7.0), Point2d::new(4.0, 7.0));
        assert_eq!(pixels(&pts), vec![(4, 7)]);
    }

    #[test]
    fn endpoints_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        let pts = line(Point2d::new(0.5, 0.0), Point2d::new(2.5, 0.0));
        assert_eq!(pixels(&pts), vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn rect_traces_four_edges() {
        let pts = rect(Point2d::new(0.0, 0.0), Point2d::new(3.0, 2.0));
        // 4 + 4 + 3 + 3 points, corners repeated
        assert_eq!(pts.len(), 14);
        let unique: HashSet<_> = pixels(&pts).into_iter().collect();
        let expected: HashSet<_> = [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (0, 2),
            (1, 2),
            (2, 2),
            (3, 2),
            (0, 1),
            (3, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn circle_radius_zero_repeats_the_center() {
        let pts = circle(Point2d::new(3.0, 4.0), 0);
        assert_eq!(pixels(&pts), vec![(3, 4); 8]);
    }

    #[test]
    fn circle_radius_one_matches_reference() {
        let pts = circle(Point2d::new(0.0, 0.0), 1);
        assert_eq!(
            pixels(&pts),
            vec![
                (1, 0),
                (0, 1),
                (0, 1),
                (-1, 0),
                (-1, 0),
                (0, -1),
                (0, -1),
                (1, 0)
            ]
        );
    }

    #[test]
    fn circle_radius_five_matches_reference() {
        let pts = circle(Point2d::new(0.0, 0.0), 5);
        assert_eq!(pts.len(), 32);

        let first_octant: Vec<_> = pixels(&pts)
            .into_iter()
            .step_by(8)
            .collect();
        assert_eq!(first_octant, vec![(5, 0), (4, 1), (4, 2), (3, 3)]);

        let unique: HashSet<_> = pixels(&pts).into_iter().collect();
        assert_eq!(unique.len(), 24);
        assert!(unique.contains(&(-4, 2)));
        assert!(unique.contains(&(2, -4)));
        assert!(!unique.contains(&(5, 1)));
    }

    #[test]
    fn circle_truncates_its_center() {
        let pts = circle(Point2d::new(10.9, -2.9), 0);
        assert_eq!(pts[0].to_pixel(), (10, -2));
    }

    #[test]
    fn negative_radius_yields_nothing() {
        assert!(circle(Point2d::new(0.0, 0.0), -1).is_empty());
    }

    #[test]
    fn line_across_the_whole_i32_range_does_not_overflow() {
        let walk = LineWalk::new(Point2d::new(-2.0e9, 0.0), Point2d::new(2.0e9, 0.0));
        assert_eq!(walk.size_hint().0 as u64, 4_000_000_001);

        let head: Vec<_> = walk.clone().take(3).collect();
        assert_eq!(
            head,
            vec![
                Point2d::new(-2.0e9, 0.0),
                Point2d::new(-2.0e9 + 1.0, 0.0),
                Point2d::new(-2.0e9 + 2.0, 0.0),
            ]
        );

        let steep = LineWalk::new(
            Point2d::new(0.0, i32::MIN as f64),
            Point2d::new(1.0, i32::MAX as f64),
        );
        let first = steep.take(1).next();
        assert_eq!(first, Some(Point2d::new(0.0, i32::MIN as f64)));
    }

    #[test]
    fn huge_circle_keeps_exact_coordinates() {
        let first_step: Vec<_> = CircleWalk::new(Point2d::new(10.0, 10.0), i32::MAX)
            .take(8)
            .collect();
        let r = i32::MAX as f64;
        assert_eq!(first_step[0], Point2d::new(10.0 + r, 10.0));
        assert_eq!(first_step[1], Point2d::new(10.0, 10.0 + r));
        assert_eq!(first_step[4], Point2d::new(10.0 - r, 10.0));
        assert_eq!(first_step[6], Point2d::new(10.0, 10.0 - r));

        let off_center: Vec<_> = CircleWalk::new(Point2d::new(i32::MIN as f64, 0.0), 3)
            .take(8)
            .collect();
        assert_eq!(off_center[3], Point2d::new(i32::MIN as f64 - 3.0, 0.0));
    }

    #[test]
    fn spans_cover_the_full_extent() {
        let v = vertical_span(7, 4);
        assert_eq!(pixels(&v), vec![(7, 0), (7, 1), (7, 2), (7, 3)]);
        let h = horizontal_span(2, 3);
        assert_eq!(pixels(&h), vec![(0, 2), (1, 2), (2, 2)]);
        assert!(horizontal_span(0, -5).is_empty());
    }
}
