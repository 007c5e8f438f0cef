//! Scan conversion of flattened contours into anti-aliased coverage masks.

pub(crate) mod mask;
pub(crate) mod rasterizer;
