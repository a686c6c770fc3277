//! Braille canvas for drawing trees in a terminal.
//!
//! Each terminal cell holds a 2x4 grid of braille dots. The 900x900 logical
//! canvas is scaled uniformly onto the dot grid and centered, so trees keep
//! their shape whatever the terminal size.

use crate::colors::Rgb;
use crate::config::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geometry::{Point, Segment, SegmentSink};
use crate::terminal::{rgb, Terminal};

/// Base Unicode code point for braille patterns (U+2800)
const BRAILLE_BASE: u32 = 0x2800;
/// Braille dots per character horizontally
const BRAILLE_WIDTH: usize = 2;
/// Braille dots per character vertically
const BRAILLE_HEIGHT: usize = 4;

/// What a segment was drawn with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    /// The terminal's default foreground
    Ambient,
    Color(Rgb),
}

impl From<Option<Rgb>> for Ink {
    fn from(color: Option<Rgb>) -> Self {
        match color {
            Some(c) => Ink::Color(c),
            None => Ink::Ambient,
        }
    }
}

/// Visit every pixel on the line from (x0, y0) to (x1, y1), endpoints
/// included (Bresenham).
pub fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        plot(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    dots_w: usize,
    dots_h: usize,
    dots: Vec<Vec<bool>>,
    /// Ink of the last dot drawn in each cell
    inks: Vec<Vec<Option<Ink>>>,
    /// Logical pixels map to dots by `scale_num / scale_den`
    scale_num: f64,
    scale_den: f64,
    offset_x: f64,
    offset_y: f64,
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        let dots_w = cols * BRAILLE_WIDTH;
        let dots_h = rows * BRAILLE_HEIGHT;

        // fit the tighter axis
        let (scale_num, scale_den) = if dots_w * CANVAS_HEIGHT as usize <= dots_h * CANVAS_WIDTH as usize {
            (dots_w as f64, CANVAS_WIDTH as f64)
        } else {
            (dots_h as f64, CANVAS_HEIGHT as f64)
        };
        let offset_x = (dots_w as f64 - CANVAS_WIDTH as f64 * scale_num / scale_den) / 2.0;
        let offset_y = (dots_h as f64 - CANVAS_HEIGHT as f64 * scale_num / scale_den) / 2.0;

        Self {
            cols,
            rows,
            dots_w,
            dots_h,
            dots: vec![vec![false; dots_w]; dots_h],
            inks: vec![vec![None; cols]; rows],
            scale_num,
            scale_den,
            offset_x,
            offset_y,
        }
    }

    /// Erase everything, as the host does before a paint
    pub fn clear(&mut self) {
        for row in &mut self.dots {
            row.fill(false);
        }
        for row in &mut self.inks {
            row.fill(None);
        }
    }

    /// Map a logical canvas point to dot coordinates
    pub fn to_dots(&self, p: Point) -> (i32, i32) {
        (
            (p.x as f64 * self.scale_num / self.scale_den + self.offset_x) as i32,
            (p.y as f64 * self.scale_num / self.scale_den + self.offset_y) as i32,
        )
    }

    #[cfg(test)]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.dots.get(y).and_then(|row| row.get(x)).copied().unwrap_or(false)
    }

    pub fn ink_at(&self, col: usize, row: usize) -> Option<Ink> {
        self.inks.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    fn plot(&mut self, x: i32, y: i32, ink: Ink) {
        if x < 0 || y < 0 || x as usize >= self.dots_w || y as usize >= self.dots_h {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        self.dots[y][x] = true;
        self.inks[y / BRAILLE_HEIGHT][x / BRAILLE_WIDTH] = Some(ink);
    }

    /// Braille pattern for one cell.
    ///
    /// ```text
    /// [0] [3]    bits: 0x01 0x08
    /// [1] [4]          0x02 0x10
    /// [2] [5]          0x04 0x20
    /// [6] [7]          0x40 0x80
    /// ```
    fn encode_cell(&self, col: usize, row: usize) -> u8 {
        const BITS: [[u8; 2]; 4] = [
            [0x01, 0x08],
            [0x02, 0x10],
            [0x04, 0x20],
            [0x40, 0x80],
        ];

        let base_x = col * BRAILLE_WIDTH;
        let base_y = row * BRAILLE_HEIGHT;
        let mut pattern = 0;
        for (dy, bits) in BITS.iter().enumerate() {
            for (dx, bit) in bits.iter().enumerate() {
                if self.dots[base_y + dy][base_x + dx] {
                    pattern |= bit;
                }
            }
        }
        pattern
    }

    /// Braille character for a cell, or `None` when it has no dots
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        match self.encode_cell(col, row) {
            0 => None,
            pattern => char::from_u32(BRAILLE_BASE + pattern as u32),
        }
    }

    /// Copy the canvas into the terminal back buffer
    pub fn blit(&self, term: &mut Terminal) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(ch) = self.glyph(col, row) {
                    let fg = match self.ink_at(col, row) {
                        Some(Ink::Color((r, g, b))) => Some(rgb(r, g, b)),
                        _ => None,
                    };
                    term.set(col as i32, row as i32, ch, fg);
                }
            }
        }
    }
}

impl SegmentSink for BrailleCanvas {
    fn draw_segment(&mut self, segment: Segment) {
        let (x0, y0) = self.to_dots(segment.start);
        let (x1, y1) = self.to_dots(segment.end);
        let ink = Ink::from(segment.color);
        bresenham(x0, y0, x1, y1, |x, y| self.plot(x, y, ink));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        bresenham(x0, y0, x1, y1, |x, y| points.push((x, y)));
        points
    }

    #[test]
    fn bresenham_includes_endpoints() {
        assert_eq!(line(0, 0, 3, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(line(2, 5, 2, 2), vec![(2, 5), (2, 4), (2, 3), (2, 2)]);
        assert_eq!(line(0, 0, 2, 2), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(line(4, 4, 4, 4), vec![(4, 4)]);
    }

    #[test]
    fn bresenham_steep_line_is_connected() {
        let points = line(0, 0, 3, 10);
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(3, 10)));
        for pair in points.windows(2) {
            assert!((pair[0].0 - pair[1].0).abs() <= 1);
            assert!((pair[0].1 - pair[1].1).abs() <= 1);
        }
    }

    #[test]
    fn square_terminal_maps_canvas_center_to_dot_center() {
        // 50x25 cells is a 100x100 dot grid
        let canvas = BrailleCanvas::new(50, 25);
        assert_eq!(canvas.to_dots(Point::new(450, 450)), (50, 50));
        assert_eq!(canvas.to_dots(Point::new(0, 0)), (0, 0));
    }

    #[test]
    fn wide_terminal_centers_horizontally() {
        // 200x100 dots: scale limited by height, 50 dots of margin each side
        let canvas = BrailleCanvas::new(100, 25);
        assert_eq!(canvas.to_dots(Point::new(0, 0)), (50, 0));
        assert_eq!(canvas.to_dots(Point::new(450, 450)), (100, 50));
    }

    #[test]
    fn segment_sets_dots_and_ink() {
        let mut canvas = BrailleCanvas::new(50, 25);
        canvas.draw_segment(Segment {
            start: Point::new(450, 450),
            end: Point::new(450, 350),
            color: Some((191, 0, 0)),
        });

        assert!(canvas.is_set(50, 50));
        assert!(canvas.is_set(50, 39));
        assert!(!canvas.is_set(51, 45));
        assert_eq!(canvas.ink_at(25, 12), Some(Ink::Color((191, 0, 0))));
        assert!(canvas.glyph(25, 12).is_some());
        assert_eq!(canvas.glyph(0, 0), None);
    }

    #[test]
    fn out_of_range_segments_are_clipped() {
        let mut canvas = BrailleCanvas::new(10, 5);
        canvas.draw_segment(Segment {
            start: Point::new(-500, -500),
            end: Point::new(2000, 2000),
            color: None,
        });
        assert_eq!(canvas.ink_at(5, 2), Some(Ink::Ambient));
    }

    #[test]
    fn clear_erases_dots() {
        let mut canvas = BrailleCanvas::new(10, 5);
        canvas.draw_segment(Segment {
            start: Point::new(0, 0),
            end: Point::new(900, 900),
            color: None,
        });
        canvas.clear();
        for row in 0..5 {
            for col in 0..10 {
                assert_eq!(canvas.glyph(col, row), None);
                assert_eq!(canvas.ink_at(col, row), None);
            }
        }
    }

    #[test]
    fn full_dot_cell_is_full_braille_block() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for y in 0..4 {
            for x in 0..2 {
                canvas.plot(x, y, Ink::Ambient);
            }
        }
        assert_eq!(canvas.glyph(0, 0), Some('\u{28FF}'));
    }
}
