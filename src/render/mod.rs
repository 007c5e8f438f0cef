//! Premultiplied render target and the "over" compositor.

pub(crate) mod composite;
pub(crate) mod target;
