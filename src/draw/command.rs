use crate::foundation::core::PixelRect;
use crate::geometry::flatten::{FlattenedContour, contours_bounding_box};
use crate::raster::rasterizer::rasterize;
use crate::render::composite::composite_mask;
use crate::render::target::RenderTarget;
use crate::style::brush::FillRule;
use crate::style::shader::Shader;

/// Whether a command came from a fill or from a stroke outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Fill,
    Stroke,
}

/// One fully resolved drawing operation: device-space contours plus everything needed to
/// rasterize and composite them later.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Command {
    pub(crate) kind: CommandKind,
    pub(crate) contours: Vec<FlattenedContour>,
    pub(crate) rule: FillRule,
    pub(crate) shader: Shader,
    pub(crate) antialias: bool,
    /// Clip in effect when the command was issued.
    pub(crate) clip: Option<PixelRect>,
}

impl Command {
    /// Pixels this command may touch on `target`.
    fn window(&self, target: &RenderTarget) -> PixelRect {
        let Some(bbox) = contours_bounding_box(&self.contours) else {
            return PixelRect::new(0, 0, 0, 0);
        };
        let mut window = PixelRect::covering(bbox).intersect(target.rect());
        if let Some(clip) = self.clip {
            window = window.intersect(clip);
        }
        window
    }

    /// Rasterize and composite onto `target`; returns the damaged rectangle.
    pub(crate) fn execute(&self, target: &mut RenderTarget) -> PixelRect {
        let window = self.window(target);
        if window.is_empty() {
            return window;
        }
        let mask = rasterize(&self.contours, self.rule, window, self.antialias);
        composite_mask(target, &mask, &self.shader)
    }
}

/// Commands recorded since the last flush, in call order.
#[derive(Clone, Debug, Default)]
pub(crate) struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub(crate) fn len(&self) -> usize {
        self.commands.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append every command of one drawing call.
    pub(crate) fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands.extend(commands);
    }

    /// Execute everything in order against `target`, leaving the buffer empty.
    pub(crate) fn replay(&mut self, target: &mut RenderTarget) -> PixelRect {
        let mut damage = PixelRect::new(0, 0, 0, 0);
        for cmd in self.commands.drain(..) {
            damage = damage.union(cmd.execute(target));
        }
        damage
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/command.rs"]
mod tests;
