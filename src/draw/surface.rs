use crate::draw::command::{Command, CommandBuffer, CommandKind};
use crate::draw::opts::DrawOpts;
use crate::draw::pixel::PixelFormat;
use crate::foundation::core::{Affine, PixelRect, Point, Rect};
use crate::foundation::error::{DrawError, DrawResult};
use crate::geometry::flatten::{FlattenedContour, check_range, flatten};
use crate::geometry::path::Path;
use crate::geometry::shapes;
use crate::geometry::transform::{DEGENERATE_DETERMINANT, from_coeffs, is_finite, mean_scale};
use crate::render::target::RenderTarget;
use crate::style::brush::{Brush, FillRule, Paint};
use crate::style::color::Color;
use crate::style::dash::dash;
use crate::style::pen::Pen;
use crate::style::shader::Shader;
use crate::style::stroke::{StrokeStyle, stroke_outline};
use crate::svg::document::SvgDocument;
use crate::svg::pathdata::parse_path_data;
use crate::svg::render::{ShapeSink, SvgRenderStats, render_document};
use crate::text::glyphs::Font;

enum Destination<'buf> {
    Borrowed(&'buf mut [u8]),
    Owned(Vec<u8>),
}

impl Destination<'_> {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Borrowed(b) => b,
            Self::Owned(v) => v,
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Borrowed(b) => b,
            Self::Owned(v) => v,
        }
    }
}

/// Where [`Draw::svg`] places a document: at an origin, or through a full transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SvgPlacement {
    /// Translate document coordinates by this offset.
    Origin(Point),
    /// Map document coordinates through this transform.
    Transform(Affine),
}

impl SvgPlacement {
    /// The placement as a transform.
    pub fn to_affine(self) -> Affine {
        match self {
            Self::Origin(p) => Affine::translate(p.to_vec2()),
            Self::Transform(t) => t,
        }
    }
}

impl From<(f64, f64)> for SvgPlacement {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Origin(Point::new(x, y))
    }
}

impl From<Point> for SvgPlacement {
    fn from(p: Point) -> Self {
        Self::Origin(p)
    }
}

impl From<[f64; 6]> for SvgPlacement {
    fn from(coeffs: [f64; 6]) -> Self {
        Self::Transform(from_coeffs(coeffs))
    }
}

impl From<Affine> for SvgPlacement {
    fn from(t: Affine) -> Self {
        Self::Transform(t)
    }
}

/// Drawing surface over a pixel buffer.
///
/// Drawing calls validate their input, resolve it to device space and queue it; nothing
/// touches the destination until [`Draw::flush`] (or [`Draw::pixels`], or drop). Commands
/// composite strictly in call order. A call that returns an error queues nothing.
pub struct Draw<'buf> {
    dest: Destination<'buf>,
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    target: RenderTarget,
    transforms: Vec<Affine>,
    clip: Option<PixelRect>,
    antialias: bool,
    opts: DrawOpts,
    pending: CommandBuffer,
}

impl std::fmt::Debug for Draw<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draw")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .field("transform", &self.transform())
            .field("clip", &self.clip)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<'buf> Draw<'buf> {
    /// Surface over a tightly packed buffer of exactly `width * height` pixels.
    pub fn new(
        buf: &'buf mut [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> DrawResult<Self> {
        let stride = format.row_bytes(width)?;
        let expected = format.required_len(width, height, stride)?;
        if buf.len() != expected {
            return Err(DrawError::config(format!(
                "{width}x{height} {format:?} needs {expected} bytes, buffer has {}",
                buf.len()
            )));
        }
        Self::from_destination(Destination::Borrowed(buf), width, height, format, stride)
    }

    /// Surface over a buffer whose rows are `stride` bytes apart.
    pub fn with_stride(
        buf: &'buf mut [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: usize,
    ) -> DrawResult<Self> {
        let expected = format.required_len(width, height, stride)?;
        if buf.len() < expected {
            return Err(DrawError::config(format!(
                "{width}x{height} {format:?} with stride {stride} needs {expected} bytes, \
                 buffer has {}",
                buf.len()
            )));
        }
        Self::from_destination(Destination::Borrowed(buf), width, height, format, stride)
    }

    fn from_destination(
        dest: Destination<'buf>,
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: usize,
    ) -> DrawResult<Self> {
        check_size(width, height)?;
        let target = RenderTarget::import(dest.bytes(), width, height, stride, format);
        let opts = DrawOpts::default();
        Ok(Self {
            dest,
            width,
            height,
            stride,
            format,
            target,
            transforms: vec![Affine::IDENTITY],
            clip: None,
            antialias: opts.antialias,
            opts,
            pending: CommandBuffer::default(),
        })
    }

    /// Replace the rendering options; also resets anti-aliasing to `opts.antialias`.
    pub fn with_opts(mut self, opts: DrawOpts) -> DrawResult<Self> {
        opts.validate()?;
        self.antialias = opts.antialias;
        self.opts = opts;
        Ok(self)
    }
}

impl Draw<'static> {
    /// Surface over its own buffer, filled with `background`.
    ///
    /// Formats without alpha get `background` made opaque.
    pub fn new_owned(
        width: u32,
        height: u32,
        format: PixelFormat,
        background: Color,
    ) -> DrawResult<Self> {
        check_size(width, height)?;
        let background = if format.has_alpha() {
            background
        } else {
            Color { a: 255, ..background }
        };
        let stride = format.row_bytes(width)?;
        let len = format.required_len(width, height, stride)?;
        let target = RenderTarget::new(width, height, background.to_premul(1.0));
        let mut bytes = vec![0u8; len];
        target.export(&mut bytes, stride, format, target.rect());
        let opts = DrawOpts::default();
        Ok(Self {
            dest: Destination::Owned(bytes),
            width,
            height,
            stride,
            format,
            target,
            transforms: vec![Affine::IDENTITY],
            clip: None,
            antialias: opts.antialias,
            opts,
            pending: CommandBuffer::default(),
        })
    }
}

fn check_size(width: u32, height: u32) -> DrawResult<()> {
    if width == 0 || height == 0 {
        return Err(DrawError::config(format!("surface size {width}x{height} is empty")));
    }
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(DrawError::config(format!("surface size {width}x{height} is too large")));
    }
    Ok(())
}

impl Draw<'_> {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Destination pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Destination row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Rendering options.
    pub fn opts(&self) -> &DrawOpts {
        &self.opts
    }

    /// Number of queued commands not yet flushed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Return `true` when queued commands have not reached the destination.
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    // --- state -------------------------------------------------------------------------

    /// Current user-to-device transform.
    pub fn transform(&self) -> Affine {
        self.transforms.last().copied().unwrap_or(Affine::IDENTITY)
    }

    /// Enter a local coordinate system: `t` applies before the current transform.
    pub fn push_transform(&mut self, t: impl Into<Affine>) -> DrawResult<()> {
        let t = finite_transform(t.into())?;
        let next = self.transform() * t;
        self.transforms.push(next);
        Ok(())
    }

    /// Leave the innermost coordinate system; fails without a matching push.
    pub fn pop_transform(&mut self) -> DrawResult<()> {
        if self.transforms.len() <= 1 {
            return Err(DrawError::config("pop_transform without a matching push_transform"));
        }
        self.transforms.pop();
        Ok(())
    }

    /// Replace the current transform (the innermost level when transforms are pushed).
    pub fn set_transform(&mut self, t: impl Into<Affine>) -> DrawResult<()> {
        let t = finite_transform(t.into())?;
        if let Some(top) = self.transforms.last_mut() {
            *top = t;
        }
        Ok(())
    }

    /// Restrict later drawing to `clip` (device pixels, snapped outwards); `None` removes it.
    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip.map(|r| PixelRect::covering(r).intersect(self.target.rect()));
    }

    /// Current clip rectangle.
    pub fn clip(&self) -> Option<PixelRect> {
        self.clip
    }

    /// Enable or disable anti-aliasing for later calls.
    pub fn set_antialias(&mut self, antialias: bool) {
        self.antialias = antialias;
    }

    /// Current anti-aliasing state.
    pub fn antialias(&self) -> bool {
        self.antialias
    }

    // --- primitives --------------------------------------------------------------------

    /// Axis-aligned rectangle.
    pub fn rectangle(
        &mut self,
        rect: Rect,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        self.shape(&shapes::rectangle(rect), brush, pen)
    }

    /// Rectangle with circular corners.
    pub fn rounded_rectangle(
        &mut self,
        rect: Rect,
        radius: f64,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        self.shape(&shapes::rounded_rectangle(rect, radius), brush, pen)
    }

    /// Ellipse inscribed in `rect`.
    pub fn ellipse(
        &mut self,
        rect: Rect,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        self.shape(&shapes::ellipse(rect), brush, pen)
    }

    /// Closed polygon.
    pub fn polygon(
        &mut self,
        points: &[Point],
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        self.shape(&shapes::polygon(points), brush, pen)
    }

    /// Open polyline.
    pub fn line(&mut self, points: &[Point], pen: &Pen) -> DrawResult<()> {
        self.shape(&shapes::polyline(points), None, Some(pen))
    }

    /// Elliptical arc of the ellipse inscribed in `rect`, from `start` to `end` degrees
    /// (clockwise from 3 o'clock).
    pub fn arc(&mut self, rect: Rect, start: f64, end: f64, pen: &Pen) -> DrawResult<()> {
        self.shape(&shapes::arc(rect, start, end), None, Some(pen))
    }

    /// Arc closed by its chord.
    pub fn chord(
        &mut self,
        rect: Rect,
        start: f64,
        end: f64,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        self.shape(&shapes::chord(rect, start, end), brush, pen)
    }

    /// Arc closed through the ellipse center.
    pub fn pieslice(
        &mut self,
        rect: Rect,
        start: f64,
        end: f64,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        self.shape(&shapes::pieslice(rect, start, end), brush, pen)
    }

    /// Arbitrary path.
    pub fn path(
        &mut self,
        path: &Path,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        self.shape(path, brush, pen)
    }

    /// SVG path data drawn with its origin at `origin`.
    pub fn symbol(
        &mut self,
        origin: Point,
        data: &str,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
    ) -> DrawResult<()> {
        let path = parse_path_data(data)?;
        let ctm = self.transform() * Affine::translate(origin.to_vec2());
        self.draw_path(&path, ctm, brush, pen, None)
    }

    /// One line of text with the top of its line box at `origin`.
    pub fn text(&mut self, origin: Point, text: &str, font: &Font) -> DrawResult<()> {
        let path = font.outline(origin, text);
        let brush = Brush::new(font.color).with_opacity(font.opacity);
        self.shape(&path, Some(&brush), None)
    }

    /// Width and line height of `text` in user units.
    pub fn text_size(&self, text: &str, font: &Font) -> (f64, f64) {
        font.measure(text)
    }

    /// Render `doc` at `placement` (applied inside the current transform).
    ///
    /// Elements that fail to draw are skipped and reported in the returned stats.
    pub fn svg(
        &mut self,
        placement: impl Into<SvgPlacement>,
        doc: &SvgDocument,
    ) -> DrawResult<SvgRenderStats> {
        let base = finite_transform(self.transform() * placement.into().to_affine())?;
        let mut sink = SurfaceSink { draw: self };
        Ok(render_document(doc, base, &mut sink))
    }

    /// Parse an SVG document under this surface's `max_svg_depth`.
    pub fn parse_svg(&self, src: &str) -> DrawResult<SvgDocument> {
        SvgDocument::parse_with_depth(src, self.opts.max_svg_depth)
    }

    // --- output ------------------------------------------------------------------------

    /// Composite every queued command and write the touched pixels to the destination.
    ///
    /// Calling it again without new drawing is a no-op.
    #[tracing::instrument(skip(self), fields(pending = self.pending.len()))]
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let count = self.pending.len();
        let damage = self.pending.replay(&mut self.target);
        self.target.export(self.dest.bytes_mut(), self.stride, self.format, damage);
        tracing::debug!(commands = count, ?damage, "flushed draw commands");
    }

    /// Destination bytes after an implicit flush.
    pub fn pixels(&mut self) -> &[u8] {
        self.flush();
        self.dest.bytes()
    }

    /// Destination bytes; [`DrawError::StaleBuffer`] while commands are pending.
    pub fn buffer(&self) -> DrawResult<&[u8]> {
        if !self.pending.is_empty() {
            return Err(DrawError::StaleBuffer(self.pending.len()));
        }
        Ok(self.dest.bytes())
    }

    /// Flush and return the buffer of a surface made with [`Draw::new_owned`].
    pub fn into_owned_bytes(mut self) -> DrawResult<Vec<u8>> {
        self.flush();
        match std::mem::replace(&mut self.dest, Destination::Owned(Vec::new())) {
            Destination::Owned(bytes) => Ok(bytes),
            borrowed @ Destination::Borrowed(_) => {
                self.dest = borrowed;
                Err(DrawError::config("surface borrows its buffer; read it through pixels()"))
            }
        }
    }

    /// Flush and copy the surface into a straight-alpha image.
    pub fn to_rgba_image(&mut self) -> image::RgbaImage {
        self.flush();
        self.target.to_rgba_image()
    }

    // --- internals ---------------------------------------------------------------------

    fn shape(&mut self, path: &Path, brush: Option<&Brush>, pen: Option<&Pen>) -> DrawResult<()> {
        let ctm = self.transform();
        self.draw_path(path, ctm, brush, pen, None)
    }

    /// Resolve one call into commands; nothing is queued unless every part succeeds.
    fn draw_path(
        &mut self,
        path: &Path,
        ctm: Affine,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
        stroke_paint: Option<&Paint>,
    ) -> DrawResult<()> {
        if brush.is_none() && pen.is_none() {
            return Ok(());
        }
        finite_transform(ctm)?;
        path.validate()?;
        if let Some(pen) = pen {
            pen.validate()?;
        }
        let mut commands = Vec::with_capacity(2);
        if let Some(brush) = brush {
            commands.extend(self.fill_command(path, ctm, brush)?);
        }
        if let Some(pen) = pen {
            commands.extend(self.stroke_command(path, ctm, pen, stroke_paint)?);
        }
        self.pending.extend(commands);
        Ok(())
    }

    fn fill_command(&self, path: &Path, ctm: Affine, brush: &Brush) -> DrawResult<Option<Command>> {
        let contours = flatten(
            &path.transform(ctm),
            self.opts.flatten_tolerance,
            self.opts.max_flatten_depth,
        )?;
        if contours.is_empty() {
            return Ok(None);
        }
        let shader = Shader::resolve(&brush.paint, brush.opacity, ctm, path.bounding_box())?;
        Ok(self.command(CommandKind::Fill, contours, brush.fill_rule, shader))
    }

    fn stroke_command(
        &self,
        path: &Path,
        ctm: Affine,
        pen: &Pen,
        paint: Option<&Paint>,
    ) -> DrawResult<Option<Command>> {
        let scale = mean_scale(ctm);
        // A collapsed transform leaves nothing to stroke.
        if scale < DEGENERATE_DETERMINANT.sqrt() {
            return Ok(None);
        }
        let tolerance = self.opts.flatten_tolerance;
        let depth = self.opts.max_flatten_depth;
        let outline = if pen.is_hairline() {
            // One device pixel wide regardless of the transform.
            let mut center = flatten(&path.transform(ctm), tolerance, depth)?;
            if let Some(pattern) = &pen.dash {
                center = dash(&center, &pattern.scaled(scale))?;
            }
            stroke_outline(&center, &StrokeStyle::from_pen(pen, 1.0, tolerance))?
        } else {
            let user_tolerance = tolerance / scale;
            let mut center = flatten(path, user_tolerance, depth)?;
            if let Some(pattern) = &pen.dash {
                center = dash(&center, pattern)?;
            }
            let style = StrokeStyle::from_pen(pen, pen.width, user_tolerance);
            let device: Vec<FlattenedContour> = stroke_outline(&center, &style)?
                .iter()
                .map(|c| c.transform(ctm))
                .collect();
            check_range(&device)?;
            device
        };
        if outline.is_empty() {
            return Ok(None);
        }
        let solid = Paint::Solid(pen.color);
        let paint = paint.unwrap_or(&solid);
        let shader = Shader::resolve(paint, pen.opacity, ctm, path.bounding_box())?;
        Ok(self.command(CommandKind::Stroke, outline, FillRule::NonZero, shader))
    }

    fn command(
        &self,
        kind: CommandKind,
        contours: Vec<FlattenedContour>,
        rule: FillRule,
        shader: Shader,
    ) -> Option<Command> {
        if shader.is_empty() {
            return None;
        }
        Some(Command {
            kind,
            contours,
            rule,
            shader,
            antialias: self.antialias,
            clip: self.clip,
        })
    }
}

impl Drop for Draw<'_> {
    fn drop(&mut self) {
        if self.is_dirty() {
            self.flush();
        }
    }
}

fn finite_transform(t: Affine) -> DrawResult<Affine> {
    if !is_finite(t) {
        return Err(DrawError::config(format!(
            "transform {:?} has non-finite coefficients",
            t.as_coeffs()
        )));
    }
    Ok(t)
}

/// Routes SVG shapes into the surface's command queue.
struct SurfaceSink<'a, 'buf> {
    draw: &'a mut Draw<'buf>,
}

impl ShapeSink for SurfaceSink<'_, '_> {
    fn draw(
        &mut self,
        path: &Path,
        transform: Affine,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
        stroke_paint: Option<&Paint>,
    ) -> DrawResult<()> {
        self.draw.draw_path(path, transform, brush, pen, stroke_paint)
    }

    fn default_miter_limit(&self) -> f64 {
        self.draw.opts.miter_limit
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/surface.rs"]
mod tests;
