use crate::canvas::bresenham;
use crate::colors::Rgb;
use crate::config::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geometry::{Segment, SegmentSink};
use image::{Rgb as Pixel, RgbImage};
use std::io;
use std::path::Path;

/// Light grey panel background
pub const BACKGROUND: Rgb = (238, 238, 238);
/// Line color of plain trees
pub const AMBIENT: Rgb = (0, 0, 0);

/// Full-resolution canvas backed by an image, one pixel per logical pixel
pub struct ImageCanvas {
    image: RgbImage,
}

impl ImageCanvas {
    pub fn new() -> Self {
        let (r, g, b) = BACKGROUND;
        Self {
            image: RgbImage::from_pixel(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32, Pixel([r, g, b])),
        }
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let Pixel([r, g, b]) = *self.image.get_pixel(x, y);
        Some((r, g, b))
    }

    /// Save the canvas; the format follows the file extension
    pub fn save(&self, path: &Path) -> io::Result<()> {
        self.image.save(path).map_err(io::Error::other)
    }
}

impl Default for ImageCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentSink for ImageCanvas {
    fn draw_segment(&mut self, segment: Segment) {
        let (r, g, b) = segment.color.unwrap_or(AMBIENT);
        let (w, h) = self.image.dimensions();
        let image = &mut self.image;

        bresenham(segment.start.x, segment.start.y, segment.end.x, segment.end.y, |x, y| {
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                image.put_pixel(x as u32, y as u32, Pixel([r, g, b]));
            }
        });
    }
}
