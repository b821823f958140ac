//! Positioned text for the pixel canvas.
//!
//! Glyphs are not rasterized: each run carries its pixel origin and paint so
//! the output backend can place native characters over the pixels.

use palette::Srgb;
use ratatui::text::Span;

use crate::scene::frame::Point;
use crate::scene::paint::{Paint, Typeface};
use crate::scene::path::point_at_length;

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Baseline start, canvas pixels.
    pub origin: Point,
    pub color: Srgb<u8>,
    pub bold: bool,
}

impl TextRun {
    pub fn new(text: &str, origin: Point, paint: &Paint) -> Self {
        Self {
            text: text.to_string(),
            origin,
            color: paint.color,
            bold: paint.typeface == Typeface::Bold,
        }
    }
}

/// Display columns taken by `text` (wide CJK glyphs count two).
pub fn columns(text: &str) -> usize {
    Span::raw(text).width()
}

/// One run per character, following `polyline`.
///
/// Characters start `h_offset` pixels along the path, each advancing
/// `advance` pixels per display column, and sit `v_offset` pixels across the
/// path (negative is to the left of the direction of travel, which is above
/// for a path running left to right). Characters past the end are dropped.
pub fn layout_on_path(
    text: &str,
    polyline: &[Point],
    h_offset: f32,
    v_offset: f32,
    advance: f32,
    paint: &Paint,
) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut column = 0usize;
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        let glyph: &str = ch.encode_utf8(&mut buf);
        let distance = h_offset + column as f32 * advance;
        column += columns(glyph);

        let Some((at, dir)) = point_at_length(polyline, distance) else {
            continue;
        };
        let origin = Point::new(at.x - dir.y * v_offset, at.y + dir.x * v_offset);
        runs.push(TextRun::new(glyph, origin, paint));
    }
    runs
}
