//! Rasterization primitives.
//!
//! Line drawing (Bresenham and Wu anti-aliased) plus viewport clipping.
//! Clipping matters here because an explicit y range, or IEEE Inf samples,
//! can place trace segments far outside the plot area; segments are clipped
//! before any pixel work.
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Liang, Y-D., & Barsky, B. (1984). "A New Concept and Method for
//!   Line Clipping." ACM TOG, 3(1), 1-22.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

// ============================================================================
// Clipping
// ============================================================================

/// Clip a segment to a rectangle using the Liang-Barsky algorithm.
///
/// Returns the visible sub-segment, or `None` when the segment lies entirely
/// outside. Endpoints exactly on the boundary are kept.
#[must_use]
pub fn clip_segment(p0: Point, p1: Point, rect: &Rect) -> Option<(Point, Point)> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    // Each boundary contributes (denominator, numerator) for the parametric
    // intersection; a zero denominator means the segment is parallel.
    let checks = [
        (-dx, p0.x - rect.x),          // left
        (dx, rect.right() - p0.x),     // right
        (-dy, p0.y - rect.y),          // top
        (dy, rect.bottom() - p0.y),    // bottom
    ];

    for (denom, num) in checks {
        if denom.abs() < f32::EPSILON {
            if num < 0.0 {
                return None;
            }
            continue;
        }
        let t = num / denom;
        if denom < 0.0 {
            if t > t1 {
                return None;
            }
            if t > t0 {
                t0 = t;
            }
        } else {
            if t < t0 {
                return None;
            }
            if t < t1 {
                t1 = t;
            }
        }
    }

    let a = Point::new(p0.x + t0 * dx, p0.y + t0 * dy);
    let b = Point::new(p0.x + t1 * dx, p0.y + t1 * dy);
    Some((a, b))
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels per step along the major axis, with intensities weighted by the
/// fractional distance from the ideal line position.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl1, xpxl1, color, rfpart(yend) * xgap);
        plot(fb, ypxl1 + 1, xpxl1, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl1, ypxl1, color, rfpart(yend) * xgap);
        plot(fb, xpxl1, ypxl1 + 1, color, fpart(yend) * xgap);
    }

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl2, xpxl2, color, rfpart(yend) * xgap);
        plot(fb, ypxl2 + 1, xpxl2, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl2, ypxl2, color, rfpart(yend) * xgap);
        plot(fb, xpxl2, ypxl2 + 1, color, fpart(yend) * xgap);
    }

    // Main loop
    if steep {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, ipart, x, color, rfpart(intery));
            plot(fb, ipart + 1, x, color, fpart(intery));
            intery += gradient;
        }
    } else {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, x, ipart, color, rfpart(intery));
            plot(fb, x, ipart + 1, color, fpart(intery));
            intery += gradient;
        }
    }
}

/// Draw a clipped polyline run with anti-aliasing.
pub fn draw_polyline_aa(fb: &mut Framebuffer, points: &[Point], color: Rgba) {
    for pair in points.windows(2) {
        draw_line_aa(fb, pair[0].x, pair[0].y, pair[1].x, pair[1].y, color);
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity) as u8;
        let blended = color.with_alpha(alpha);
        fb.blend_pixel(x as u32, y as u32, blended);
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn test_clip_fully_inside() {
        let (a, b) = clip_segment(Point::new(10.0, 10.0), Point::new(90.0, 90.0), &VIEW).unwrap();
        assert_eq!(a, Point::new(10.0, 10.0));
        assert_eq!(b, Point::new(90.0, 90.0));
    }

    #[test]
    fn test_clip_fully_outside() {
        assert!(clip_segment(Point::new(-50.0, -50.0), Point::new(-10.0, -10.0), &VIEW).is_none());
        assert!(clip_segment(Point::new(150.0, 0.0), Point::new(150.0, 100.0), &VIEW).is_none());
    }

    #[test]
    fn test_clip_crossing() {
        let (a, b) =
            clip_segment(Point::new(-50.0, 50.0), Point::new(150.0, 50.0), &VIEW).unwrap();
        assert!((a.x - 0.0).abs() < 0.001);
        assert!((b.x - 100.0).abs() < 0.001);
        assert!((a.y - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_clip_exiting() {
        let (a, b) = clip_segment(Point::new(50.0, 50.0), Point::new(50.0, 200.0), &VIEW).unwrap();
        assert_eq!(a, Point::new(50.0, 50.0));
        assert!((b.y - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_clip_parallel_outside() {
        // Horizontal segment above the viewport, parallel to top edge.
        assert!(clip_segment(Point::new(10.0, -5.0), Point::new(90.0, -5.0), &VIEW).is_none());
    }

    #[test]
    fn test_draw_line_paints_endpoints() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::WHITE);
        draw_line(&mut fb, 2, 2, 17, 17, Rgba::BLACK);
        assert_eq!(fb.get_pixel(2, 2), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(17, 17), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_aa_paints_something() {
        let mut fb = Framebuffer::new(50, 50).unwrap();
        fb.clear(Rgba::WHITE);
        draw_line_aa(&mut fb, 5.0, 5.0, 45.0, 40.0, Rgba::BLACK);
        assert!(fb.ink_ratio(Rgba::WHITE) > 0.0);
    }

    #[test]
    fn test_draw_polyline() {
        let mut fb = Framebuffer::new(50, 50).unwrap();
        fb.clear(Rgba::WHITE);
        let points = [
            Point::new(5.0, 45.0),
            Point::new(25.0, 5.0),
            Point::new(45.0, 45.0),
        ];
        draw_polyline_aa(&mut fb, &points, Rgba::TRACE_BLUE);
        assert!(fb.ink_ratio(Rgba::WHITE) > 0.0);
    }

    #[test]
    fn test_draw_polyline_single_point_is_noop() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        draw_polyline_aa(&mut fb, &[Point::new(5.0, 5.0)], Rgba::BLACK);
        assert!(fb.ink_ratio(Rgba::WHITE).abs() < f32::EPSILON);
    }
}
