//! Pens, brushes, gradients and the stroke/dash expansion that turns them into fillable
//! geometry.

pub(crate) mod brush;
pub(crate) mod color;
pub(crate) mod dash;
pub(crate) mod gradient;
pub(crate) mod pen;
pub(crate) mod shader;
pub(crate) mod stroke;
