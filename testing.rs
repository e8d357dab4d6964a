//! Test doubles for the host seams: a surface that records draw calls and a
//! scheduler that queues refresh requests.

use std::vec::Vec;

use crate::color::Rgba;
use crate::scheduler::FrameScheduler;
use crate::surface::{RenderContext, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Reset,
    Scale(f32, f32),
    ResetTransform,
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    Gradient {
        width: f32,
        height: f32,
        top: Rgba,
        bottom: Rgba,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Rgba,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Reset => "reset",
            Command::Scale(..) => "scale",
            Command::ResetTransform => "reset_transform",
            Command::Rect { .. } => "rect",
            Command::Gradient { .. } => "gradient",
            Command::Circle { .. } => "circle",
        }
    }
}

#[derive(Default)]
pub struct Recorder {
    pub commands: Vec<Command>,
}

impl Recorder {
    pub fn frames(&self) -> usize {
        self.commands.iter().filter(|c| **c == Command::Reset).count()
    }
}

impl RenderContext for Recorder {
    fn reset(&mut self) {
        self.commands.push(Command::Reset);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.commands.push(Command::Scale(x, y));
    }

    fn reset_transform(&mut self) {
        self.commands.push(Command::ResetTransform);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.commands.push(Command::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_vertical_gradient(
        &mut self,
        _x: f32,
        _y: f32,
        width: f32,
        height: f32,
        top: Rgba,
        bottom: Rgba,
    ) {
        self.commands.push(Command::Gradient {
            width,
            height,
            top,
            bottom,
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.commands.push(Command::Circle {
            x,
            y,
            radius,
            color,
        });
    }
}

/// Canvas stand-in; `context` is `None` until attached.
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
    pub context: Option<Recorder>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
            context: Some(Recorder::default()),
        }
    }

    pub fn detached(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            context: None,
            ..Self::new(width, height, pixel_ratio)
        }
    }

    pub fn recorder(&self) -> &Recorder {
        self.context.as_ref().expect("surface has no context")
    }
}

impl Surface for RecordingSurface {
    type Context = Recorder;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn context(&mut self) -> Option<&mut Recorder> {
        self.context.as_mut()
    }
}

/// Refresh requests are numbered from 1; `pending` holds the live ones.
#[derive(Default)]
pub struct QueueScheduler {
    next: u32,
    pub pending: Vec<u32>,
    pub cancelled: Vec<u32>,
}

impl QueueScheduler {
    pub fn requested(&self) -> u32 {
        self.next
    }
}

impl FrameScheduler for QueueScheduler {
    type Handle = u32;

    fn schedule_next(&mut self) -> u32 {
        self.next += 1;
        self.pending.push(self.next);
        self.next
    }

    fn cancel(&mut self, handle: u32) {
        self.pending.retain(|&h| h != handle);
        self.cancelled.push(handle);
    }
}
