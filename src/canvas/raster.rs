//! Shape rasterization onto the pixel canvas.

use palette::Srgb;

use super::Canvas;
use crate::scene::frame::Point;
use crate::scene::paint::Dash;

/// Distance between stroke samples, in pixels.
const STROKE_STEP: f32 = 0.5;

/// Stroke a polyline, carrying the dash phase across segments.
pub fn stroke_polyline(
    canvas: &mut Canvas,
    points: &[Point],
    closed: bool,
    width: f32,
    dash: Option<&Dash>,
    color: Srgb<u8>,
) {
    if points.len() < 2 {
        if let Some(p) = points.first() {
            plot(canvas, *p, width, color);
        }
        return;
    }

    let closing = if closed { Some((points[points.len() - 1], points[0])) } else { None };
    let segments = points.windows(2).map(|w| (w[0], w[1])).chain(closing);

    let mut walked = 0.0f32;
    for (a, b) in segments {
        let len = a.distance(b);
        if !len.is_finite() {
            continue;
        }
        let steps = (len / STROKE_STEP).ceil().max(1.0) as usize;
        for k in 0..=steps {
            let t = k as f32 / steps as f32;
            let on = dash.map_or(true, |d| d.is_on(walked + t * len));
            if on {
                let p = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
                plot(canvas, p, width, color);
            }
        }
        walked += len;
    }
}

/// Paint one stroke sample: a single pixel for hairlines, a disc otherwise.
fn plot(canvas: &mut Canvas, p: Point, width: f32, color: Srgb<u8>) {
    if !(p.x.is_finite() && p.y.is_finite()) {
        return;
    }
    if width <= 1.5 {
        canvas.put_pixel(p.x.floor() as i64, p.y.floor() as i64, color);
    } else {
        fill_disc(canvas, p, width / 2.0, color);
    }
}

/// Fill every pixel whose center lies within `radius` of `center`.
pub fn fill_disc(canvas: &mut Canvas, center: Point, radius: f32, color: Srgb<u8>) {
    let r2 = radius * radius;
    let x0 = (center.x - radius).floor() as i64;
    let x1 = (center.x + radius).ceil() as i64;
    let y0 = (center.y - radius).floor() as i64;
    let y1 = (center.y + radius).ceil() as i64;

    for py in y0..=y1 {
        let dy = py as f32 + 0.5 - center.y;
        for px in x0..=x1 {
            let dx = px as f32 + 0.5 - center.x;
            if dx * dx + dy * dy <= r2 {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

/// Even-odd scanline fill of a closed polygon, sampled at pixel centers.
pub fn fill_polygon(canvas: &mut Canvas, points: &[Point], color: Srgb<u8>) {
    if points.len() < 3 || points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return;
    }

    let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    let row_start = (min_y.floor() as i64).max(0);
    let row_end = (max_y.ceil() as i64).min(canvas.height as i64 - 1);

    let mut crossings: Vec<f32> = Vec::with_capacity(8);
    for py in row_start..=row_end {
        let y = py as f32 + 0.5;
        crossings.clear();
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if (a.y <= y && b.y > y) || (b.y <= y && a.y > y) {
                crossings.push(a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(|l, r| l.total_cmp(r));

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil() as i64;
            let end = (span[1] - 0.5).floor() as i64;
            for px in start.max(0)..=end.min(canvas.width as i64 - 1) {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}
