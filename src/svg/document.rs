use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{DrawError, DrawResult};
use crate::geometry::path::Path;
use crate::geometry::shapes;
use crate::style::color::Color;
use crate::style::gradient::{
    Gradient, GradientGeometry, GradientStop, GradientUnits, SpreadMethod,
};
use crate::svg::attrs::{
    SvgPaint, StyleOverrides, parse_length, parse_number, parse_number_list, parse_opacity,
    parse_transform, style_declarations,
};
use crate::svg::pathdata::parse_path_data;
use crate::svg::xml::{XmlElement, parse_tree};

/// Default limit on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Viewport assumed when the root element gives no size.
const DEFAULT_VIEWPORT: (f64, f64) = (100.0, 100.0);

/// Class of a non-fatal problem found while parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An element or attribute could not be parsed and was skipped.
    MalformedMarkup,
    /// A nesting ceiling was hit and a subtree was dropped.
    ResourceExhaustion,
}

/// An element-level failure that did not abort the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgDiagnostic {
    /// Failure class.
    pub kind: DiagnosticKind,
    /// Element name (or `"document"`).
    pub element: String,
    /// Human-readable description.
    pub message: String,
}

impl SvgDiagnostic {
    pub(crate) fn new(
        kind: DiagnosticKind,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            element: element.into(),
            message: message.into(),
        }
    }

    fn from_error(element: &str, err: &DrawError) -> Self {
        let kind = match err {
            DrawError::ResourceExhaustion(_) => DiagnosticKind::ResourceExhaustion,
            _ => DiagnosticKind::MalformedMarkup,
        };
        Self::new(kind, element, err.to_string())
    }

    /// The matching [`DrawError`].
    pub fn to_error(&self) -> DrawError {
        let msg = format!("<{}>: {}", self.element, self.message);
        match self.kind {
            DiagnosticKind::MalformedMarkup => DrawError::MalformedMarkup(msg),
            DiagnosticKind::ResourceExhaustion => DrawError::ResourceExhaustion(msg),
        }
    }
}

impl std::fmt::Display for SvgDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>: {}", self.element, self.message)
    }
}

/// Transform and style carried by every node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeCommon {
    /// `id` attribute.
    pub id: Option<String>,
    /// Local transform, applied before the parent's.
    pub transform: Affine,
    /// Style properties set on this element.
    pub style: StyleOverrides,
}

/// Node payload.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// `svg`, `g` or `a`.
    Group(Vec<SvgNode>),
    /// `path`.
    Path(Path),
    /// `rect`, with corner radii resolved.
    Rect {
        /// Rectangle in user units.
        rect: Rect,
        /// Horizontal corner radius.
        rx: f64,
        /// Vertical corner radius.
        ry: f64,
    },
    /// `circle`.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// `ellipse`.
    Ellipse {
        /// Center.
        center: Point,
        /// Radii.
        radii: Vec2,
    },
    /// `line`.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// `polyline`.
    Polyline(Vec<Point>),
    /// `polygon`.
    Polygon(Vec<Point>),
    /// `defs`; its children are never drawn directly.
    Defs(Vec<SvgNode>),
    /// A gradient definition, by id; the gradient itself lives in the document table.
    GradientDef(String),
}

/// One element of the document tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgNode {
    /// Transform and style.
    pub common: NodeCommon,
    /// Element payload.
    pub kind: NodeKind,
}

impl SvgNode {
    /// User-space outline of a shape node; `None` for containers and definitions.
    pub fn geometry(&self) -> Option<Path> {
        Some(match &self.kind {
            // Zero-sized basic shapes are valid but draw nothing.
            NodeKind::Rect { rect, .. } if rect.width() == 0.0 || rect.height() == 0.0 => {
                return None;
            }
            NodeKind::Circle { radius, .. } if *radius == 0.0 => return None,
            NodeKind::Ellipse { radii, .. } if radii.x == 0.0 || radii.y == 0.0 => return None,
            NodeKind::Path(p) => p.clone(),
            NodeKind::Rect { rect, rx, ry } => shapes::rounded_rectangle_xy(*rect, *rx, *ry),
            NodeKind::Circle { center, radius } => shapes::circle(*center, *radius),
            NodeKind::Ellipse { center, radii } => shapes::ellipse(Rect::from_center_size(
                *center,
                (radii.x * 2.0, radii.y * 2.0),
            )),
            NodeKind::Line { from, to } => shapes::polyline(&[*from, *to]),
            NodeKind::Polyline(pts) => shapes::polyline(pts),
            NodeKind::Polygon(pts) => shapes::polygon(pts),
            NodeKind::Group(_) | NodeKind::Defs(_) | NodeKind::GradientDef(_) => return None,
        })
    }

    fn children(&self) -> &[SvgNode] {
        match &self.kind {
            NodeKind::Group(c) | NodeKind::Defs(c) => c,
            _ => &[],
        }
    }
}

/// Parsed, immutable SVG document.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    root: SvgNode,
    gradients: HashMap<String, Arc<Gradient>>,
    bounds: Option<Rect>,
    size: Option<(f64, f64)>,
    view_box: Option<Rect>,
    diagnostics: Vec<SvgDiagnostic>,
}

impl SvgDocument {
    /// Parse with the default nesting limit.
    pub fn parse(src: &str) -> DrawResult<Self> {
        Self::parse_with_depth(src, DEFAULT_MAX_DEPTH)
    }

    /// Parse, dropping elements nested deeper than `max_depth`.
    ///
    /// Only a document without any element fails; malformed elements are skipped and
    /// reported through [`SvgDocument::diagnostics`].
    #[tracing::instrument(skip(src), fields(len = src.len()))]
    pub fn parse_with_depth(src: &str, max_depth: usize) -> DrawResult<Self> {
        let mut diagnostics = Vec::new();
        let roots = parse_tree(src, max_depth.max(1), &mut diagnostics);
        let root_el = match roots.iter().find(|el| el.name == "svg") {
            Some(svg) => svg.clone(),
            None if roots.is_empty() => {
                return Err(DrawError::markup("document contains no elements"));
            }
            None => XmlElement {
                name: "svg".to_owned(),
                attrs: Vec::new(),
                children: roots,
            },
        };

        let size = root_size(&root_el);
        let view_box = root_el.attr("viewBox").and_then(|v| match parse_view_box(v) {
            Ok(vb) => vb,
            Err(err) => {
                diagnostics.push(SvgDiagnostic::from_error("svg", &err));
                None
            }
        });
        let viewport = view_box
            .map(|vb| (vb.width(), vb.height()))
            .or(size)
            .unwrap_or(DEFAULT_VIEWPORT);

        // First pass: the gradient table, so references may point forward.
        let mut raw = HashMap::new();
        collect_gradients(&root_el, &mut raw, &mut diagnostics);
        let gradients = resolve_gradients(&raw, viewport, &mut diagnostics);

        // Second pass: the node tree.
        let mut builder = Builder {
            viewport,
            diagnostics: &mut diagnostics,
        };
        let mut root = match builder.node(&root_el) {
            Some(node) => node,
            None => SvgNode {
                common: NodeCommon::default(),
                kind: NodeKind::Group(Vec::new()),
            },
        };
        if let (Some(vb), Some(size)) = (view_box, size) {
            let aspect = root_el.attr("preserveAspectRatio").unwrap_or("");
            root.common.transform = root.common.transform * view_box_transform(vb, size, aspect);
        }

        check_references(&root, &gradients, &mut diagnostics);
        let bounds = node_bounds(&root, Affine::IDENTITY);

        for d in &diagnostics {
            tracing::warn!(element = %d.element, kind = ?d.kind, "{}", d.message);
        }
        Ok(Self {
            root,
            gradients,
            bounds,
            size,
            view_box,
            diagnostics,
        })
    }

    /// Root node (always a group).
    pub fn root(&self) -> &SvgNode {
        &self.root
    }

    /// Union of the element bounds in document coordinates; `None` when nothing is drawable.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.bounds
    }

    /// Element-level problems found while parsing.
    pub fn diagnostics(&self) -> &[SvgDiagnostic] {
        &self.diagnostics
    }

    /// Gradient by id.
    pub fn gradient(&self, id: &str) -> Option<&Arc<Gradient>> {
        self.gradients.get(id)
    }

    /// `width`/`height` of the root element, when both are given.
    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    /// `viewBox` of the root element.
    pub fn view_box(&self) -> Option<Rect> {
        self.view_box
    }
}

impl std::str::FromStr for SvgDocument {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn root_size(el: &XmlElement) -> Option<(f64, f64)> {
    let w = parse_length(el.attr("width")?, DEFAULT_VIEWPORT.0).ok()?;
    let h = parse_length(el.attr("height")?, DEFAULT_VIEWPORT.1).ok()?;
    (w > 0.0 && h > 0.0).then_some((w, h))
}

fn parse_view_box(v: &str) -> DrawResult<Option<Rect>> {
    match parse_number_list(v)?.as_slice() {
        [x, y, w, h] if *w > 0.0 && *h > 0.0 => Ok(Some(Rect::new(*x, *y, x + w, y + h))),
        // A zero-sized viewBox disables rendering in SVG; here it is just ignored.
        [_, _, _, _] => Ok(None),
        _ => Err(DrawError::markup(format!("viewBox needs four numbers: {v:?}"))),
    }
}

/// Map `vb` into a `size` viewport honoring `preserveAspectRatio`.
fn view_box_transform(vb: Rect, size: (f64, f64), aspect: &str) -> Affine {
    let sx = size.0 / vb.width();
    let sy = size.1 / vb.height();
    let mut parts = aspect.split_whitespace();
    let align = parts.next().unwrap_or("xMidYMid");
    if align == "none" {
        return Affine::new([sx, 0.0, 0.0, sy, -vb.x0 * sx, -vb.y0 * sy]);
    }
    let slice = parts.next() == Some("slice");
    let s = if slice { sx.max(sy) } else { sx.min(sy) };
    let free_x = size.0 - vb.width() * s;
    let free_y = size.1 - vb.height() * s;
    let fx = if align.starts_with("xMin") {
        0.0
    } else if align.starts_with("xMax") {
        1.0
    } else {
        0.5
    };
    let fy = if align.ends_with("YMin") {
        0.0
    } else if align.ends_with("YMax") {
        1.0
    } else {
        0.5
    };
    Affine::new([
        s,
        0.0,
        0.0,
        s,
        free_x * fx - vb.x0 * s,
        free_y * fy - vb.y0 * s,
    ])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GradientKind {
    Linear,
    Radial,
}

#[derive(Clone, Debug)]
struct RawGradient {
    kind: GradientKind,
    attrs: HashMap<String, String>,
    stops: Vec<GradientStop>,
    href: Option<String>,
}

const GRADIENT_ATTRS: &[&str] = &[
    "x1",
    "y1",
    "x2",
    "y2",
    "cx",
    "cy",
    "r",
    "fx",
    "fy",
    "gradientUnits",
    "gradientTransform",
    "spreadMethod",
];

fn collect_gradients(
    el: &XmlElement,
    out: &mut HashMap<String, RawGradient>,
    diagnostics: &mut Vec<SvgDiagnostic>,
) {
    let kind = match el.name.as_str() {
        "linearGradient" => Some(GradientKind::Linear),
        "radialGradient" => Some(GradientKind::Radial),
        _ => None,
    };
    if let (Some(kind), Some(id)) = (kind, el.attr("id")) {
        let attrs = el
            .attrs
            .iter()
            .filter(|(k, _)| GRADIENT_ATTRS.contains(&k.as_str()))
            .cloned()
            .collect();
        let mut stops = Vec::new();
        for stop in el.children.iter().filter(|c| c.name == "stop") {
            match parse_stop(stop) {
                Ok(s) => stops.push(s),
                Err(err) => diagnostics.push(SvgDiagnostic::from_error("stop", &err)),
            }
        }
        let href = el
            .attr("href")
            .and_then(|h| h.trim().strip_prefix('#'))
            .map(str::to_owned);
        // The first definition of an id wins.
        out.entry(id.to_owned()).or_insert(RawGradient {
            kind,
            attrs,
            stops,
            href,
        });
    }
    for child in &el.children {
        collect_gradients(child, out, diagnostics);
    }
}

fn parse_stop(el: &XmlElement) -> Result<GradientStop, DrawError> {
    let mut color = el.attr("stop-color").map(str::to_owned);
    let mut opacity = el.attr("stop-opacity").map(str::to_owned);
    if let Some(style) = el.attr("style") {
        for (k, v) in style_declarations(style) {
            match k {
                "stop-color" => color = Some(v.to_owned()),
                "stop-opacity" => opacity = Some(v.to_owned()),
                _ => {}
            }
        }
    }
    let offset = match el.attr("offset") {
        Some(o) => match o.trim().strip_suffix('%') {
            Some(pct) => parse_number(pct)? / 100.0,
            None => parse_number(o)?,
        },
        None => 0.0,
    };
    let color = match color.as_deref() {
        Some(c) => Color::parse(c)?,
        None => Color::BLACK,
    };
    let opacity = match opacity.as_deref() {
        Some(o) => parse_opacity(o)?,
        None => 1.0,
    };
    Ok(GradientStop {
        offset: offset.clamp(0.0, 1.0),
        color,
        opacity,
    })
}

fn resolve_gradients(
    raw: &HashMap<String, RawGradient>,
    viewport: (f64, f64),
    diagnostics: &mut Vec<SvgDiagnostic>,
) -> HashMap<String, Arc<Gradient>> {
    let mut out = HashMap::new();
    let mut ids: Vec<&String> = raw.keys().collect();
    ids.sort();
    for id in ids {
        match resolve_gradient(id, raw, viewport) {
            Ok(g) => {
                out.insert(id.clone(), Arc::new(g));
            }
            Err(err) => {
                let element = match raw[id].kind {
                    GradientKind::Linear => "linearGradient",
                    GradientKind::Radial => "radialGradient",
                };
                diagnostics.push(SvgDiagnostic::from_error(element, &err));
            }
        }
    }
    out
}

/// The `href` chain of `id`, starting with itself; stops at cycles and dangling links.
fn href_chain<'a>(id: &'a str, raw: &'a HashMap<String, RawGradient>) -> Vec<&'a RawGradient> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut next = Some(id);
    while let Some(cur) = next {
        if !seen.insert(cur) {
            break;
        }
        let Some(g) = raw.get(cur) else { break };
        chain.push(g);
        next = g.href.as_deref();
    }
    chain
}

fn resolve_gradient(
    id: &str,
    raw: &HashMap<String, RawGradient>,
    viewport: (f64, f64),
) -> DrawResult<Gradient> {
    let chain = href_chain(id, raw);
    let Some(own) = chain.first() else {
        return Err(DrawError::markup(format!("gradient #{id} is not defined")));
    };
    let kind = own.kind;
    // Geometry only inherits from gradients of the same kind; the rest from any.
    let common = |name: &str| chain.iter().find_map(|g| g.attrs.get(name).map(String::as_str));
    let geometric = |name: &str| {
        chain
            .iter()
            .filter(|g| g.kind == kind)
            .find_map(|g| g.attrs.get(name).map(String::as_str))
    };

    let units = match common("gradientUnits").map(str::trim) {
        Some("userSpaceOnUse") => GradientUnits::UserSpaceOnUse,
        Some("objectBoundingBox") | None => GradientUnits::ObjectBoundingBox,
        Some(other) => return Err(DrawError::markup(format!("invalid gradientUnits {other:?}"))),
    };
    let spread = match common("spreadMethod").map(str::trim) {
        Some("pad") | None => SpreadMethod::Pad,
        Some("reflect") => SpreadMethod::Reflect,
        Some("repeat") => SpreadMethod::Repeat,
        Some(other) => return Err(DrawError::markup(format!("invalid spreadMethod {other:?}"))),
    };
    let transform = match common("gradientTransform") {
        Some(t) => parse_transform(t)?,
        None => Affine::IDENTITY,
    };

    let (bw, bh) = match units {
        GradientUnits::ObjectBoundingBox => (1.0, 1.0),
        GradientUnits::UserSpaceOnUse => viewport,
    };
    let diag = ((bw * bw + bh * bh) / 2.0).sqrt();
    let coord = |name: &str, default: &str, base: f64| -> DrawResult<f64> {
        let v = geometric(name).unwrap_or(default);
        // Bounding-box fractions are plain numbers; percentages scale the same way.
        parse_length(v, base)
    };
    let pct = |frac: f64| format!("{}%", frac * 100.0);

    let geometry = match kind {
        GradientKind::Linear => GradientGeometry::Linear {
            start: Point::new(coord("x1", "0%", bw)?, coord("y1", "0%", bh)?),
            end: Point::new(coord("x2", &pct(1.0), bw)?, coord("y2", "0%", bh)?),
        },
        GradientKind::Radial => {
            let center = Point::new(coord("cx", "50%", bw)?, coord("cy", "50%", bh)?);
            let radius = coord("r", "50%", diag)?;
            if radius < 0.0 {
                return Err(DrawError::markup(format!("gradient #{id} has a negative radius")));
            }
            let fx = geometric("fx").map(|v| parse_length(v, bw)).transpose()?;
            let fy = geometric("fy").map(|v| parse_length(v, bh)).transpose()?;
            let focal = match (fx, fy) {
                (None, None) => None,
                (fx, fy) => Some(Point::new(fx.unwrap_or(center.x), fy.unwrap_or(center.y))),
            };
            GradientGeometry::Radial {
                center,
                radius,
                focal,
            }
        }
    };

    let stops = chain
        .iter()
        .find(|g| !g.stops.is_empty())
        .map(|g| g.stops.clone())
        .unwrap_or_default();

    Ok(Gradient {
        stops,
        geometry,
        spread,
        units,
        transform,
    })
}

struct Builder<'d> {
    viewport: (f64, f64),
    diagnostics: &'d mut Vec<SvgDiagnostic>,
}

impl Builder<'_> {
    /// Build the node for `el`; `None` when it is unknown or failed to parse.
    fn node(&mut self, el: &XmlElement) -> Option<SvgNode> {
        let known = matches!(
            el.name.as_str(),
            "svg"
                | "g"
                | "a"
                | "defs"
                | "path"
                | "rect"
                | "circle"
                | "ellipse"
                | "line"
                | "polyline"
                | "polygon"
                | "linearGradient"
                | "radialGradient"
        );
        if !known {
            tracing::debug!(element = %el.name, "skipping unsupported svg element");
            return None;
        }
        match self.try_node(el) {
            Ok(node) => node,
            Err(err) => {
                self.diagnostics.push(SvgDiagnostic::from_error(&el.name, &err));
                None
            }
        }
    }

    fn try_node(&mut self, el: &XmlElement) -> DrawResult<Option<SvgNode>> {
        let common = self.common(el)?;
        let (vw, vh) = self.viewport;
        let len = |name: &str, base: f64| -> DrawResult<f64> {
            match el.attr(name) {
                Some(v) => parse_length(v, base),
                None => Ok(0.0),
            }
        };
        let kind = match el.name.as_str() {
            "svg" | "g" | "a" => {
                let mut common = common;
                if el.name == "svg" {
                    let (x, y) = (len("x", vw)?, len("y", vh)?);
                    common.transform = common.transform * Affine::translate((x, y));
                }
                let children = self.children(el);
                return Ok(Some(SvgNode {
                    common,
                    kind: NodeKind::Group(children),
                }));
            }
            "defs" => NodeKind::Defs(self.children(el)),
            "linearGradient" | "radialGradient" => match el.attr("id") {
                Some(id) => NodeKind::GradientDef(id.to_owned()),
                None => return Ok(None),
            },
            "path" => match el.attr("d") {
                Some(d) => NodeKind::Path(parse_path_data(d)?),
                None => NodeKind::Path(Path::new()),
            },
            "rect" => {
                let (x, y) = (len("x", vw)?, len("y", vh)?);
                let (w, h) = (len("width", vw)?, len("height", vh)?);
                if w < 0.0 || h < 0.0 {
                    return Err(DrawError::markup(format!("negative rect size {w}x{h}")));
                }
                let rx = el.attr("rx").map(|v| parse_length(v, vw)).transpose()?;
                let ry = el.attr("ry").map(|v| parse_length(v, vh)).transpose()?;
                let (rx, ry) = match (rx, ry) {
                    (None, None) => (0.0, 0.0),
                    (Some(r), None) | (None, Some(r)) => (r, r),
                    (Some(rx), Some(ry)) => (rx, ry),
                };
                NodeKind::Rect {
                    rect: Rect::new(x, y, x + w, y + h),
                    rx: rx.max(0.0),
                    ry: ry.max(0.0),
                }
            }
            "circle" => {
                let r = len("r", ((vw * vw + vh * vh) / 2.0).sqrt())?;
                if r < 0.0 {
                    return Err(DrawError::markup(format!("negative circle radius {r}")));
                }
                NodeKind::Circle {
                    center: Point::new(len("cx", vw)?, len("cy", vh)?),
                    radius: r,
                }
            }
            "ellipse" => {
                let (rx, ry) = (len("rx", vw)?, len("ry", vh)?);
                if rx < 0.0 || ry < 0.0 {
                    return Err(DrawError::markup(format!("negative ellipse radii {rx}, {ry}")));
                }
                NodeKind::Ellipse {
                    center: Point::new(len("cx", vw)?, len("cy", vh)?),
                    radii: Vec2::new(rx, ry),
                }
            }
            "line" => NodeKind::Line {
                from: Point::new(len("x1", vw)?, len("y1", vh)?),
                to: Point::new(len("x2", vw)?, len("y2", vh)?),
            },
            "polyline" | "polygon" => {
                let nums = parse_number_list(el.attr("points").unwrap_or(""))?;
                if nums.len() % 2 != 0 {
                    return Err(DrawError::markup("points list has an odd number of coordinates"));
                }
                let pts = nums.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect();
                if el.name == "polygon" {
                    NodeKind::Polygon(pts)
                } else {
                    NodeKind::Polyline(pts)
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(SvgNode { common, kind }))
    }

    fn children(&mut self, el: &XmlElement) -> Vec<SvgNode> {
        el.children.iter().filter_map(|c| self.node(c)).collect()
    }

    fn common(&mut self, el: &XmlElement) -> DrawResult<NodeCommon> {
        let mut style = StyleOverrides::default();
        for (k, v) in &el.attrs {
            style.apply(k, v)?;
        }
        // Declarations in `style` take precedence over presentation attributes.
        if let Some(decls) = el.attr("style") {
            for (k, v) in style_declarations(decls) {
                style.apply(k, v)?;
            }
        }
        let transform = match el.attr("transform") {
            Some(t) => parse_transform(t)?,
            None => Affine::IDENTITY,
        };
        Ok(NodeCommon {
            id: el.attr("id").map(str::to_owned),
            transform,
            style,
        })
    }
}

fn check_references(
    node: &SvgNode,
    gradients: &HashMap<String, Arc<Gradient>>,
    diagnostics: &mut Vec<SvgDiagnostic>,
) {
    for paint in [&node.common.style.fill, &node.common.style.stroke].into_iter().flatten() {
        if let SvgPaint::Url { id, fallback } = paint {
            if !gradients.contains_key(id) {
                let what = if fallback.is_some() { "using fallback color" } else { "not painted" };
                diagnostics.push(SvgDiagnostic::new(
                    DiagnosticKind::MalformedMarkup,
                    node.common.id.clone().unwrap_or_else(|| "element".to_owned()),
                    format!("paint reference #{id} does not resolve; {what}"),
                ));
            }
        }
    }
    for child in node.children() {
        check_references(child, gradients, diagnostics);
    }
}

fn node_bounds(node: &SvgNode, parent: Affine) -> Option<Rect> {
    if node.common.style.display_none {
        return None;
    }
    let t = parent * node.common.transform;
    match &node.kind {
        NodeKind::Group(children) => children
            .iter()
            .filter_map(|c| node_bounds(c, t))
            .reduce(|a, b| a.union(b)),
        NodeKind::Defs(_) | NodeKind::GradientDef(_) => None,
        _ => node.geometry()?.transform(t).bounding_box(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/document.rs"]
mod tests;
