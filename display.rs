//! embedded-graphics adapter: paint the animator onto any `DrawTarget`
//!
//! Targets have no alpha channel, so every fill is composited here against
//! the last opaque backdrop painted (black after a reset, the sky once it is
//! drawn). That matches what a canvas shows for this scene's layering.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
};

use crate::color::{Rgb, Rgba};
use crate::surface::{RenderContext, Surface};

pub struct GraphicsSurface<T> {
    target: T,
    pixel_ratio: f32,
    scale: f32,
    backdrop: Rgb,
    attached: bool,
}

impl<T> GraphicsSurface<T>
where
    T: DrawTarget<Color = Rgb888>,
{
    /// `target` is sized in device pixels; `pixel_ratio` device pixels make
    /// one logical pixel.
    pub fn new(target: T, pixel_ratio: f32) -> Self {
        Self {
            target,
            pixel_ratio,
            scale: 1.0,
            backdrop: Rgb::BLACK,
            attached: true,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }

    /// While detached the animator keeps simulating but paints nothing.
    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn device(&self, value: f32) -> i32 {
        libm::roundf(value * self.scale) as i32
    }

    fn device_len(&self, value: f32) -> u32 {
        libm::roundf(value * self.scale).max(0.0) as u32
    }

    fn draw<D: Drawable<Color = Rgb888>>(&mut self, item: D) {
        if item.draw(&mut self.target).is_err() {
            log::warn!("draw target rejected a draw call");
        }
    }
}

fn rgb888(color: Rgb) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    libm::roundf(a as f32 + (b as f32 - a as f32) * t) as u8
}

impl<T> RenderContext for GraphicsSurface<T>
where
    T: DrawTarget<Color = Rgb888>,
{
    fn reset(&mut self) {
        self.scale = 1.0;
        self.backdrop = Rgb::BLACK;
        if self.target.clear(Rgb888::BLACK).is_err() {
            log::warn!("draw target rejected clear");
        }
    }

    fn scale(&mut self, x: f32, _y: f32) {
        // Pixel ratios are uniform
        self.scale *= x;
    }

    fn reset_transform(&mut self) {
        self.scale = 1.0;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let fill = color.blend_over(self.backdrop);
        let rect = Rectangle::new(
            Point::new(self.device(x), self.device(y)),
            Size::new(self.device_len(width), self.device_len(height)),
        );
        self.draw(rect.into_styled(PrimitiveStyle::with_fill(rgb888(fill))));
        self.backdrop = fill;
    }

    fn fill_vertical_gradient(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        top: Rgba,
        bottom: Rgba,
    ) {
        let left = self.device(x);
        let first = self.device(y);
        let rows = self.device_len(height);
        let span = self.device_len(width);
        let backdrop = self.backdrop;

        for row in 0..rows {
            let t = if rows > 1 {
                row as f32 / (rows - 1) as f32
            } else {
                0.0
            };
            let stop = Rgba {
                r: lerp(top.r, bottom.r, t),
                g: lerp(top.g, bottom.g, t),
                b: lerp(top.b, bottom.b, t),
                a: top.a + (bottom.a - top.a) * t,
            };
            let line = Rectangle::new(Point::new(left, first + row as i32), Size::new(span, 1));
            self.draw(line.into_styled(PrimitiveStyle::with_fill(rgb888(stop.blend_over(backdrop)))));
        }

        // Stops share one alpha in practice; the middle row stands in
        // for what later circles blend against
        let middle = Rgba {
            r: lerp(top.r, bottom.r, 0.5),
            g: lerp(top.g, bottom.g, 0.5),
            b: lerp(top.b, bottom.b, 0.5),
            a: (top.a + bottom.a) / 2.0,
        };
        self.backdrop = middle.blend_over(backdrop);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        let diameter = self.device_len(radius * 2.0).max(1);
        let circle = Circle::with_center(Point::new(self.device(x), self.device(y)), diameter);
        let fill = color.blend_over(self.backdrop);
        self.draw(circle.into_styled(PrimitiveStyle::with_fill(rgb888(fill))));
    }
}

impl<T> Surface for GraphicsSurface<T>
where
    T: DrawTarget<Color = Rgb888>,
{
    type Context = Self;

    fn width(&self) -> u32 {
        self.target.bounding_box().size.width
    }

    fn height(&self) -> u32 {
        self.target.bounding_box().size.height
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn context(&mut self) -> Option<&mut Self> {
        if self.attached {
            Some(self)
        } else {
            None
        }
    }
}
