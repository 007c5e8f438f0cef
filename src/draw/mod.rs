//! Drawing surface: destination buffers, rendering options and the queued command list
//! behind [`crate::Draw`].

pub(crate) mod command;
pub(crate) mod opts;
pub(crate) mod pixel;
pub(crate) mod surface;
