use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::canvas::{Canvas, TextRun};

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// Canvas pixels per terminal cell.
pub const DOTS_X: usize = 2;
pub const DOTS_Y: usize = 4;

/// Canvas size in pixels for a terminal area of `cols` x `rows` cells.
pub fn canvas_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize * DOTS_X, rows as usize * DOTS_Y)
}

/// Encode one cell's 2x4 block. Returns the braille pattern and the color of
/// the brightest lit dot, or `None` if no dot is lit.
pub fn encode_cell(canvas: &Canvas, cx: usize, cy: usize) -> Option<(char, Color)> {
    let mut pattern: u8 = 0;
    let mut brightest: Option<(u16, (u8, u8, u8))> = None;

    for (dx, col) in DOT_MAP.iter().enumerate() {
        for (dy, &bit) in col.iter().enumerate() {
            let gx = cx * DOTS_X + dx;
            let gy = cy * DOTS_Y + dy;
            if gx >= canvas.width || gy >= canvas.height {
                continue;
            }
            let (r, g, b, a) = canvas.get_pixel(gx, gy);
            if a == 0 {
                continue;
            }
            pattern |= bit;
            let luma = r as u16 + g as u16 + b as u16;
            if brightest.map_or(true, |(l, _)| luma > l) {
                brightest = Some((luma, (r, g, b)));
            }
        }
    }

    let (_, (r, g, b)) = brightest?;
    let ch = char::from_u32(0x2800 + pattern as u32).unwrap_or(' ');
    Some((ch, Color::Rgb(r, g, b)))
}

/// Write the canvas pixels as braille characters into `area`.
pub fn render(canvas: &Canvas, buf: &mut Buffer, area: Rect) {
    for cy in 0..area.height as usize {
        for cx in 0..area.width as usize {
            if let Some((ch, color)) = encode_cell(canvas, cx, cy) {
                if let Some(cell) = buf.cell_mut((area.x + cx as u16, area.y + cy as u16)) {
                    cell.set_char(ch);
                    cell.set_fg(color);
                }
            }
        }
    }
}

/// Overlay text runs on top of the braille cells.
pub fn render_text(runs: &[TextRun], buf: &mut Buffer, area: Rect) {
    for run in runs {
        if !(run.origin.x.is_finite() && run.origin.y.is_finite()) {
            continue;
        }
        let cx = (run.origin.x / DOTS_X as f32).floor();
        let cy = (run.origin.y / DOTS_Y as f32).floor();
        if cx < 0.0 || cy < 0.0 || cx >= area.width as f32 || cy >= area.height as f32 {
            continue;
        }

        let mut style = Style::default().fg(Color::Rgb(
            run.color.red,
            run.color.green,
            run.color.blue,
        ));
        if run.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        let x = area.x + cx as u16;
        let max_width = (area.x + area.width - x) as usize;
        buf.set_stringn(x, area.y + cy as u16, &run.text, max_width, style);
    }
}
