//! Pixel surface for the scene.
//!
//! The scene draws into an owned RGBA pixel buffer (`Canvas`). Shapes are
//! rasterized immediately; text is kept as positioned runs because output
//! backends (the braille terminal) render glyphs natively.

pub mod raster;
pub mod text;

use palette::Srgb;

use crate::scene::frame::{Point, Transform};
use crate::scene::paint::{Paint, PaintStyle};
use crate::scene::path::Path;
use crate::scene::surface::{Rect, Surface, TransformStack};
use raster::{fill_polygon, stroke_polyline};
pub use text::TextRun;

/// Segments used to approximate a full circle of radius `r`.
fn circle_segments(r: f32) -> usize {
    ((r * std::f32::consts::TAU / 2.0).ceil() as usize).clamp(16, 720)
}

/// Owned RGBA pixel buffer.
///
/// Internal format is 4 bytes per pixel in **RGBA** order.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub texts: Vec<TextRun>,
    /// Pixels advanced per text column when laying out text along a path.
    pub glyph_advance: f32,
    transforms: TransformStack,
    contours: Vec<Vec<Point>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
            texts: Vec::new(),
            glyph_advance: 1.0,
            transforms: TransformStack::default(),
            contours: Vec::new(),
        }
    }

    /// Resize the canvas, reallocating only when the buffer is too small.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let needed = width * height * 4;
        if self.data.len() < needed {
            self.data.resize(needed, 0);
        }
    }

    /// Clear pixels and text to fully transparent.
    pub fn clear(&mut self) {
        let len = self.width * self.height * 4;
        self.data[..len].fill(0);
        self.texts.clear();
    }

    /// Write an opaque pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Srgb<u8>) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.data[idx] = color.red;
        self.data[idx + 1] = color.green;
        self.data[idx + 2] = color.blue;
        self.data[idx + 3] = 255;
    }

    /// Read the RGBA values at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        if x < self.width && idx + 3 < self.data.len() {
            (self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3])
        } else {
            (0, 0, 0, 0)
        }
    }

    #[cfg(test)]
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.get_pixel(x, y).3 > 0
    }

    fn transform(&self) -> Transform {
        self.transforms.current()
    }

    /// Stroke width in surface pixels under the current transform.
    fn stroke_width(&self, paint: &Paint) -> f32 {
        paint.stroke_width * self.transform().scale_factor()
    }

    fn draw_polygon(&mut self, points: &[Point], closed: bool, paint: &Paint) {
        match paint.style {
            PaintStyle::Fill => fill_polygon(self, points, paint.color),
            PaintStyle::Stroke => {
                let width = self.stroke_width(paint);
                stroke_polyline(self, points, closed, width, paint.dash.as_ref(), paint.color);
            }
        }
    }
}

impl Surface for Canvas {
    fn push_transform(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn line(&mut self, from: Point, to: Point, paint: &Paint) {
        let t = self.transform();
        let points = [t.apply(from), t.apply(to)];
        let width = self.stroke_width(paint);
        stroke_polyline(self, &points, false, width, paint.dash.as_ref(), paint.color);
    }

    fn circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        let t = self.transform();
        let n = circle_segments(radius * t.scale_factor());
        let points: Vec<Point> = (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                t.apply(Point::new(center.x + radius * a.cos(), center.y + radius * a.sin()))
            })
            .collect();
        self.draw_polygon(&points, true, paint);
    }

    fn rect(&mut self, rect: Rect, paint: &Paint) {
        let t = self.transform();
        let points = [
            t.apply(Point::new(rect.left, rect.top)),
            t.apply(Point::new(rect.right, rect.top)),
            t.apply(Point::new(rect.right, rect.bottom)),
            t.apply(Point::new(rect.left, rect.bottom)),
        ];
        self.draw_polygon(&points, true, paint);
    }

    fn text(&mut self, text: &str, origin: Point, paint: &Paint) {
        let at = self.transform().apply(origin);
        self.texts.push(TextRun::new(text, at, paint));
    }

    fn text_on_path(&mut self, text: &str, path: &Path, h_offset: f32, v_offset: f32, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        let t = self.transform();
        let scale = t.scale_factor();
        self.contours.clear();
        path.flatten_into(&t, &mut self.contours);
        let Some(polyline) = self.contours.first() else {
            return;
        };
        let runs = text::layout_on_path(
            text,
            polyline,
            h_offset * scale,
            v_offset * scale,
            self.glyph_advance,
            paint,
        );
        self.texts.extend(runs);
    }

    fn path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        let t = self.transform();
        let mut contours = std::mem::take(&mut self.contours);
        contours.clear();
        path.flatten_into(&t, &mut contours);
        for contour in &contours {
            self.draw_polygon(contour, false, paint);
        }
        self.contours = contours;
    }
}
