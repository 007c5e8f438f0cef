//! vecdraw draws anti-aliased 2D vector graphics into in-memory pixel buffers.
//!
//! A [`Draw`] surface wraps a caller-owned (or surface-owned) buffer in one of the
//! [`PixelFormat`]s. Shapes are described with [`Path`]s or the primitive helpers, styled with
//! a [`Pen`] (stroke) and/or a [`Brush`] (fill, solid or [`Gradient`]), and queued; a flush
//! composites them in call order with premultiplied source-over.
//!
//! - Primitives: rectangles, ellipses, arcs, chords, pie slices, polygons, polylines, paths
//! - Static SVG: [`SvgDocument`] parses a tolerant subset, [`Draw::svg`] renders it
//! - Text: [`Font`] lays out glyph outlines from any [`GlyphSource`]
//!
//! ```
//! use vecdraw::{Brush, Color, Draw, PixelFormat, Rect};
//!
//! let mut buf = vec![0u8; 16 * 16 * 4];
//! let mut draw = Draw::new(&mut buf, 16, 16, PixelFormat::Rgba8)?;
//! let red = Brush::new(Color::rgb(200, 40, 40));
//! draw.ellipse(Rect::new(2.0, 2.0, 14.0, 14.0), Some(&red), None)?;
//! let pixels = draw.pixels();
//! assert_eq!(&pixels[(8 * 16 + 8) * 4..][..4], &[200, 40, 40, 255]);
//! # Ok::<(), vecdraw::DrawError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod draw;
pub(crate) mod geometry;
pub(crate) mod raster;
pub(crate) mod render;
pub(crate) mod style;
pub(crate) mod svg;
pub(crate) mod text;

/// Path builders behind the drawing primitives.
pub mod shapes {
    pub use crate::geometry::shapes::{
        arc, chord, circle, ellipse, pieslice, polygon, polyline, rectangle, rounded_rectangle,
        rounded_rectangle_xy,
    };
}

pub use crate::foundation::core::{Affine, PixelRect, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{DrawError, DrawResult};

pub use crate::draw::opts::DrawOpts;
pub use crate::draw::pixel::PixelFormat;
pub use crate::draw::surface::{Draw, SvgPlacement};

pub use crate::geometry::flatten::{
    FlattenStats, FlattenedContour, MAX_COORDINATE, check_range, contours_bounding_box, flatten,
    flatten_with_stats,
};
pub use crate::geometry::path::{Path, PathSegment};
pub use crate::geometry::transform::{
    DEGENERATE_DETERMINANT, apply, checked_inverse, compose, from_coeffs, is_degenerate,
    is_finite, mean_scale, transform_rect_bbox,
};

pub use crate::raster::mask::{CoverageMask, Span};
pub use crate::raster::rasterizer::{Rasterizer, rasterize};
pub use crate::render::composite::over;

pub use crate::style::brush::{Brush, FillRule, Paint};
pub use crate::style::color::Color;
pub use crate::style::dash::{MAX_DASHES, dash};
pub use crate::style::gradient::{
    Gradient, GradientGeometry, GradientStop, GradientUnits, LUT_SIZE, SpreadMethod,
};
pub use crate::style::pen::{DEFAULT_MITER_LIMIT, DashPattern, LineCap, LineJoin, Pen};
pub use crate::style::stroke::{MAX_OUTLINE_POINTS, StrokeStyle, stroke_outline};

pub use crate::svg::attrs::{StyleOverrides, SvgPaint, parse_paint, parse_transform};
pub use crate::svg::document::{
    DEFAULT_MAX_DEPTH, DiagnosticKind, NodeCommon, NodeKind, SvgDiagnostic, SvgDocument, SvgNode,
};
pub use crate::svg::pathdata::parse_path_data;
pub use crate::svg::render::{ShapeSink, SvgRenderStats, render_document};

pub use crate::text::glyphs::{Font, FontMetrics, GlyphOutline, GlyphSource};
pub use crate::text::skrifa_source::SkrifaGlyphSource;
