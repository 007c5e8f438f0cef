//! Path and transform model: segments, contours, flattening and shape builders.

pub(crate) mod arc;
pub(crate) mod flatten;
pub(crate) mod path;
pub(crate) mod shapes;
pub(crate) mod transform;
