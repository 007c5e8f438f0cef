/// Convenience result type used across vecdraw.
pub type DrawResult<T> = Result<T, DrawError>;

/// Top-level error taxonomy used by drawing APIs.
///
/// Every error is reported by the call that introduced it. A failed call leaves the surface
/// state (transform stack, pending commands, pixels) exactly as it was before the call.
#[derive(thiserror::Error, Debug)]
pub enum DrawError {
    /// Geometry that cannot be drawn: a segment without a current point, a negative stroke
    /// width, non-finite or out-of-range coordinates.
    #[error("malformed geometry: {0}")]
    MalformedGeometry(String),

    /// Markup that could not be parsed (SVG documents, path data, transform lists).
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),

    /// Invalid surface or style configuration: buffer size mismatches, unsortable gradient
    /// stops, degenerate transforms where an inverse is required.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A recursion or size ceiling was hit and the affected work was truncated.
    #[error("resource exhausted: {0}")]
    ResourceExhaustion(String),

    /// Raw pixels were requested while drawing commands are still pending.
    #[error("stale buffer: {0} pending command(s) not flushed")]
    StaleBuffer(usize),

    /// Wrapped lower-level error from dependencies or collaborators.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrawError {
    /// Build a [`DrawError::MalformedGeometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::MalformedGeometry(msg.into())
    }

    /// Build a [`DrawError::MalformedMarkup`] value.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::MalformedMarkup(msg.into())
    }

    /// Build a [`DrawError::Configuration`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`DrawError::ResourceExhaustion`] value.
    pub fn exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhaustion(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
