//! Color conversion: hue or palette entry plus alpha into a paintable color

use core::fmt::Write;
use heapless::String;

/// Opaque 8-bit color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xf8fafc` style literal, as written in stylesheets.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// HSL to RGB. `hue` in degrees (wrapped), `saturation` and `lightness`
    /// in [0, 1].
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let mut h = libm::fmodf(hue, 360.0);
        if h < 0.0 {
            h += 360.0;
        }
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - libm::fabsf(2.0 * l - 1.0)) * s;
        let sector = h / 60.0;
        let x = chroma * (1.0 - libm::fabsf(libm::fmodf(sector, 2.0) - 1.0));
        let m = l - chroma / 2.0;

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Self {
            r: channel(r + m),
            g: channel(g + m),
            b: channel(b + m),
        }
    }

    /// Attach an alpha, clamped to [0, 1]. NaN becomes fully transparent.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

fn channel(value: f32) -> u8 {
    libm::roundf(value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Color with straight (non-premultiplied) alpha.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` form for hosts whose canvas takes color strings.
    /// Alpha is written with three decimals.
    pub fn to_css(&self) -> String<32> {
        let mut css = String::new();
        let alpha = libm::roundf(self.a * 1000.0) / 1000.0;
        // 32 bytes always fit "rgba(255, 255, 255, 0.999)"
        let _ = write!(css, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha);
        css
    }

    /// Composite over an opaque backdrop.
    pub fn blend_over(&self, backdrop: Rgb) -> Rgb {
        let mix = |src: u8, dst: u8| -> u8 {
            let value = src as f32 * self.a + dst as f32 * (1.0 - self.a);
            libm::roundf(value).clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }
}

/// Color identity carried by a particle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tint {
    /// Fully saturated, half-lightness hue in degrees.
    Hue(f32),
    /// Fixed palette entry.
    Solid(Rgb),
}

impl Tint {
    pub fn rgb(self) -> Rgb {
        match self {
            Tint::Hue(hue) => Rgb::from_hsl(hue, 1.0, 0.5),
            Tint::Solid(rgb) => rgb,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        self.rgb().with_alpha(alpha)
    }
}
