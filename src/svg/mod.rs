//! Static SVG subset: a tolerant parser and a renderer over [`render::ShapeSink`].
//!
//! Supported elements are `svg`, `g`, `a`, `defs`, `path`, `rect`, `circle`, `ellipse`,
//! `line`, `polyline`, `polygon`, `linearGradient`, `radialGradient` and `stop`. Everything
//! else (including `use`, `text` and `style`) is skipped with its subtree.

pub(crate) mod attrs;
pub(crate) mod document;
pub(crate) mod pathdata;
pub(crate) mod render;
pub(crate) mod xml;
