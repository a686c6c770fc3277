use crate::config::constants::{BRIGHTNESS, SATURATION};

/// An RGB triple, the same shape the renderer hands to every canvas
pub type Rgb = (u8, u8, u8);

/// Rotating hue counter for colorful trees.
///
/// The cursor advances before it is read, so a freshly reset cursor yields
/// hue 1 first and hue 0 only after wrapping past 359.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HueCursor {
    hue: u16,
}

impl HueCursor {
    pub const HUES: u16 = 360;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.hue = 0;
    }

    #[cfg(test)]
    pub fn current(&self) -> u16 {
        self.hue
    }

    /// Advance by one degree and return the new hue (0-359)
    pub fn next_hue(&mut self) -> u16 {
        self.hue += 1;
        if self.hue >= Self::HUES {
            self.hue = 0;
        }
        self.hue
    }

    /// Advance and return the color of the new hue
    pub fn next_color(&mut self) -> Rgb {
        hue_color(self.next_hue())
    }
}

/// Color of a hue in degrees at the fixed branch saturation and brightness
pub fn hue_color(hue: u16) -> Rgb {
    hsb_to_rgb(hue as f32 / HueCursor::HUES as f32, SATURATION, BRIGHTNESS)
}

/// Convert HSB (all components 0.0-1.0) to RGB.
///
/// The hue wheel is split into six sectors; each channel is rounded to the
/// nearest byte.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb {
    let channel = |v: f32| (v * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let v = channel(brightness);
        return (v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    (channel(r), channel(g), channel(b))
}
