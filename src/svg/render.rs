use crate::foundation::core::Affine;
use crate::foundation::error::{DrawError, DrawResult};
use crate::geometry::path::Path;
use crate::style::brush::{Brush, FillRule, Paint};
use crate::style::color::Color;
use crate::style::pen::{DEFAULT_MITER_LIMIT, DashPattern, LineCap, LineJoin, Pen};
use crate::svg::attrs::{StyleOverrides, SvgPaint};
use crate::svg::document::{DiagnosticKind, NodeKind, SvgDiagnostic, SvgDocument, SvgNode};

/// Receiver of the shapes an SVG document draws.
pub trait ShapeSink {
    /// Fill and/or stroke `path` (user space) mapped through `transform`.
    ///
    /// One call per element: on error nothing of the element may be drawn.
    /// `stroke_paint` replaces the pen color when the stroke is a gradient.
    fn draw(
        &mut self,
        path: &Path,
        transform: Affine,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
        stroke_paint: Option<&Paint>,
    ) -> DrawResult<()>;

    /// Miter limit of strokes that do not set `stroke-miterlimit`.
    fn default_miter_limit(&self) -> f64 {
        DEFAULT_MITER_LIMIT
    }
}

/// Outcome of [`render_document`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgRenderStats {
    /// Shape elements handed to the sink.
    pub drawn: usize,
    /// Shape elements the sink rejected; the rest of the document still rendered.
    pub skipped: Vec<SvgDiagnostic>,
}

/// Fully inherited style at one node.
#[derive(Clone, Debug, PartialEq)]
struct ComputedStyle {
    fill: Option<SvgPaint>,
    stroke: Option<SvgPaint>,
    stroke_width: f64,
    opacity: f64,
    fill_opacity: f64,
    stroke_opacity: f64,
    fill_rule: FillRule,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f64,
    dash_array: Option<Vec<f64>>,
    dash_offset: f64,
    visible: bool,
    color: Color,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            fill: Some(SvgPaint::Color(Color::BLACK)),
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            fill_rule: FillRule::NonZero,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: DEFAULT_MITER_LIMIT,
            dash_array: None,
            dash_offset: 0.0,
            visible: true,
            color: Color::BLACK,
        }
    }
}

impl ComputedStyle {
    fn child(&self, o: &StyleOverrides) -> Self {
        let mut s = self.clone();
        macro_rules! inherit {
            ($($field:ident),*) => {
                $(if let Some(v) = &o.$field { s.$field = v.clone(); })*
            };
        }
        inherit!(
            stroke_width,
            fill_opacity,
            stroke_opacity,
            fill_rule,
            line_cap,
            line_join,
            miter_limit,
            dash_array,
            dash_offset,
            visible,
            color
        );
        if let Some(fill) = &o.fill {
            s.fill = Some(fill.clone());
        }
        if let Some(stroke) = &o.stroke {
            s.stroke = Some(stroke.clone());
        }
        if let Some(op) = o.opacity {
            s.opacity *= op;
        }
        s
    }

    fn paint(&self, doc: &SvgDocument, paint: &SvgPaint) -> Option<Paint> {
        match paint {
            SvgPaint::None => None,
            SvgPaint::Color(c) => Some(Paint::Solid(*c)),
            SvgPaint::CurrentColor => Some(Paint::Solid(self.color)),
            SvgPaint::Url { id, fallback } => match doc.gradient(id) {
                Some(g) => Some(Paint::Gradient(g.clone())),
                None => fallback.map(Paint::Solid),
            },
        }
    }

    fn brush(&self, doc: &SvgDocument) -> Option<Brush> {
        let paint = self.paint(doc, self.fill.as_ref()?)?;
        Some(
            Brush::new(paint)
                .with_fill_rule(self.fill_rule)
                .with_opacity(self.opacity * self.fill_opacity),
        )
    }

    fn pen(&self, doc: &SvgDocument) -> DrawResult<Option<(Pen, Option<Paint>)>> {
        let Some(paint) = self.stroke.as_ref().and_then(|p| self.paint(doc, p)) else {
            return Ok(None);
        };
        // A zero stroke width disables the stroke in SVG.
        if self.stroke_width <= 0.0 {
            return Ok(None);
        }
        let (color, gradient) = match paint {
            Paint::Solid(c) => (c, None),
            gradient @ Paint::Gradient(_) => (Color::BLACK, Some(gradient)),
        };
        let mut pen = Pen::new(color, self.stroke_width)?
            .with_cap(self.line_cap)
            .with_join(self.line_join)
            .with_miter_limit(self.miter_limit)
            .with_opacity(self.opacity * self.stroke_opacity);
        if let Some(intervals) = &self.dash_array {
            pen = pen.with_dash(DashPattern::new(intervals.iter().copied(), self.dash_offset)?);
        }
        Ok(Some((pen, gradient)))
    }
}

struct Frame {
    transform: Affine,
    style: ComputedStyle,
}

struct Renderer<'a> {
    doc: &'a SvgDocument,
    sink: &'a mut dyn ShapeSink,
    stack: Vec<Frame>,
    stats: SvgRenderStats,
}

impl Renderer<'_> {
    fn top(&self) -> Option<&Frame> {
        self.stack.last()
    }

    fn node(&mut self, node: &SvgNode) {
        if node.common.style.display_none {
            return;
        }
        let Some(parent) = self.top() else { return };
        let frame = Frame {
            transform: parent.transform * node.common.transform,
            style: parent.style.child(&node.common.style),
        };
        match &node.kind {
            NodeKind::Defs(_) | NodeKind::GradientDef(_) => {}
            NodeKind::Group(children) => {
                self.stack.push(frame);
                for child in children {
                    self.node(child);
                }
                self.stack.pop();
            }
            _ => {
                self.stack.push(frame);
                self.shape(node);
                self.stack.pop();
            }
        }
    }

    fn shape(&mut self, node: &SvgNode) {
        let doc = self.doc;
        let (transform, brush, pen, path) = {
            let Some(frame) = self.top() else { return };
            if !frame.style.visible {
                return;
            }
            let Some(path) = node.geometry() else { return };
            if path.is_empty() {
                return;
            }
            // Lines never fill.
            let brush = match node.kind {
                NodeKind::Line { .. } => None,
                _ => frame.style.brush(doc),
            };
            (frame.transform, brush, frame.style.pen(doc), path)
        };
        let sink = &mut *self.sink;
        let result = pen.and_then(|pen| {
            let (pen, paint) = match &pen {
                Some((pen, paint)) => (Some(pen), paint.as_ref()),
                None => (None, None),
            };
            if brush.is_none() && pen.is_none() {
                return Ok(());
            }
            sink.draw(&path, transform, brush.as_ref(), pen, paint)
        });
        match result {
            Ok(()) => self.stats.drawn += 1,
            Err(err) => {
                let element = element_name(node);
                tracing::warn!(element, error = %err, "svg element skipped");
                let kind = match err {
                    DrawError::ResourceExhaustion(_) => DiagnosticKind::ResourceExhaustion,
                    _ => DiagnosticKind::MalformedMarkup,
                };
                self.stats.skipped.push(SvgDiagnostic::new(kind, element, err.to_string()));
            }
        }
    }
}

fn element_name(node: &SvgNode) -> &'static str {
    match node.kind {
        NodeKind::Group(_) => "g",
        NodeKind::Path(_) => "path",
        NodeKind::Rect { .. } => "rect",
        NodeKind::Circle { .. } => "circle",
        NodeKind::Ellipse { .. } => "ellipse",
        NodeKind::Line { .. } => "line",
        NodeKind::Polyline(_) => "polyline",
        NodeKind::Polygon(_) => "polygon",
        NodeKind::Defs(_) => "defs",
        NodeKind::GradientDef(_) => "gradient",
    }
}

/// Draw every visible shape of `doc` into `sink`, with `base` applied after the document's
/// own transforms.
///
/// Style and transform state is kept on an explicit stack; a failing element is recorded in
/// the stats and leaves that stack exactly as its siblings see it.
#[tracing::instrument(skip_all)]
pub fn render_document(
    doc: &SvgDocument,
    base: Affine,
    sink: &mut dyn ShapeSink,
) -> SvgRenderStats {
    let style = ComputedStyle {
        miter_limit: sink.default_miter_limit(),
        ..ComputedStyle::default()
    };
    let mut r = Renderer {
        doc,
        sink,
        stack: vec![Frame {
            transform: base,
            style,
        }],
        stats: SvgRenderStats::default(),
    };
    r.node(doc.root());
    debug_assert_eq!(r.stack.len(), 1);
    tracing::debug!(drawn = r.stats.drawn, skipped = r.stats.skipped.len(), "svg rendered");
    r.stats
}

#[cfg(test)]
#[path = "../../tests/unit/svg/render.rs"]
mod tests;
