use serde::{Deserialize, Serialize};

use crate::foundation::error::{DrawError, DrawResult};
use crate::style::pen::DEFAULT_MITER_LIMIT;
use crate::svg::document::DEFAULT_MAX_DEPTH;

/// Rendering options of a [`crate::Draw`] surface.
///
/// Limits bound the work any single call can cause: flattening recursion and SVG nesting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOpts {
    /// Maximum deviation of flattened curves from the true curve, in device pixels.
    pub flatten_tolerance: f64,
    /// Subdivision depth ceiling for one cubic segment.
    pub max_flatten_depth: u32,
    /// Element nesting ceiling for SVG documents parsed through the surface.
    pub max_svg_depth: usize,
    /// Initial anti-aliasing state.
    pub antialias: bool,
    /// Miter limit of SVG strokes that do not set `stroke-miterlimit`.
    pub miter_limit: f64,
}

impl Default for DrawOpts {
    fn default() -> Self {
        Self {
            flatten_tolerance: 0.2,
            max_flatten_depth: 16,
            max_svg_depth: DEFAULT_MAX_DEPTH,
            antialias: true,
            miter_limit: DEFAULT_MITER_LIMIT,
        }
    }
}

impl DrawOpts {
    /// Defaults overlaid with `VECDRAW_FLATTEN_TOLERANCE`, `VECDRAW_MAX_FLATTEN_DEPTH` and
    /// `VECDRAW_MAX_SVG_DEPTH`. Unparsable or out-of-range values are ignored.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(tol) = std::env::var("VECDRAW_FLATTEN_TOLERANCE")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|t| t.is_finite() && *t > 0.0)
        {
            opts.flatten_tolerance = tol;
        }
        if let Some(depth) = std::env::var("VECDRAW_MAX_FLATTEN_DEPTH")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            opts.max_flatten_depth = depth;
        }
        if let Some(depth) = std::env::var("VECDRAW_MAX_SVG_DEPTH")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            opts.max_svg_depth = depth;
        }
        opts
    }

    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> DrawResult<Self> {
        let opts: Self = serde_json::from_str(json)
            .map_err(|err| DrawError::config(format!("invalid draw options: {err}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check that every limit is usable.
    pub fn validate(&self) -> DrawResult<()> {
        if !self.flatten_tolerance.is_finite() || self.flatten_tolerance <= 0.0 {
            return Err(DrawError::config(format!(
                "flatten_tolerance must be finite and > 0 (got {})",
                self.flatten_tolerance
            )));
        }
        if self.max_svg_depth == 0 {
            return Err(DrawError::config("max_svg_depth must be at least 1"));
        }
        if !self.miter_limit.is_finite() || self.miter_limit < 1.0 {
            return Err(DrawError::config(format!(
                "miter_limit must be finite and >= 1 (got {})",
                self.miter_limit
            )));
        }
        Ok(())
    }

    /// Set the flattening tolerance.
    pub fn with_flatten_tolerance(mut self, tolerance: f64) -> Self {
        self.flatten_tolerance = tolerance;
        self
    }

    /// Set the flattening depth ceiling.
    pub fn with_max_flatten_depth(mut self, depth: u32) -> Self {
        self.max_flatten_depth = depth;
        self
    }

    /// Set the SVG nesting ceiling.
    pub fn with_max_svg_depth(mut self, depth: usize) -> Self {
        self.max_svg_depth = depth;
        self
    }

    /// Set the initial anti-aliasing state.
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    /// Set the default miter limit.
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/opts.rs"]
mod tests;
