//! Drawing surface seam
//!
//! The host owns the raster canvas. The animator only needs its size, its
//! device pixel ratio, and a 2D context that may be missing (a canvas not yet
//! attached to a live document has none).

use crate::color::Rgba;

/// The subset of a 2D canvas context the renderer issues calls against.
/// Coordinates are in the current transform's units.
pub trait RenderContext {
    /// Clear the surface and drop any transform.
    fn reset(&mut self);

    fn scale(&mut self, x: f32, y: f32);

    fn reset_transform(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    /// Fill a rectangle with a linear gradient running from `top` at `y` to
    /// `bottom` at `y + height`.
    fn fill_vertical_gradient(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        top: Rgba,
        bottom: Rgba,
    );

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}

pub trait Surface {
    type Context: RenderContext;

    /// Backing buffer width in device pixels.
    fn width(&self) -> u32;

    /// Backing buffer height in device pixels.
    fn height(&self) -> u32;

    fn pixel_ratio(&self) -> f32;

    /// `None` while the host cannot hand out a context; painting is skipped.
    fn context(&mut self) -> Option<&mut Self::Context>;
}

/// Surface size in logical (CSS) pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn of<S: Surface>(surface: &S) -> Self {
        let ratio = effective_ratio(surface.pixel_ratio());
        Self {
            width: surface.width() as f32 / ratio,
            height: surface.height() as f32 / ratio,
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Hosts report 0 (or garbage) when they don't know the ratio; treat that as 1.
pub fn effective_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}
