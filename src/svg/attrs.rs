use crate::foundation::core::Affine;
use crate::foundation::error::{DrawError, DrawResult};
use crate::style::brush::FillRule;
use crate::style::color::Color;
use crate::style::pen::{LineCap, LineJoin};

/// Paint value of `fill` / `stroke`.
#[derive(Clone, Debug, PartialEq)]
pub enum SvgPaint {
    /// `none`.
    None,
    /// A color.
    Color(Color),
    /// `currentColor`.
    CurrentColor,
    /// `url(#id)` with an optional fallback color.
    Url {
        /// Referenced element id.
        id: String,
        /// Color used when the reference does not resolve.
        fallback: Option<Color>,
    },
}

/// Style properties set on one element; `None` inherits from the parent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleOverrides {
    /// `fill`.
    pub fill: Option<SvgPaint>,
    /// `stroke`.
    pub stroke: Option<SvgPaint>,
    /// `stroke-width` in user units.
    pub stroke_width: Option<f64>,
    /// Element opacity; multiplies down the tree.
    pub opacity: Option<f64>,
    /// `fill-opacity`.
    pub fill_opacity: Option<f64>,
    /// `stroke-opacity`.
    pub stroke_opacity: Option<f64>,
    /// `fill-rule`.
    pub fill_rule: Option<FillRule>,
    /// `stroke-linecap`.
    pub line_cap: Option<LineCap>,
    /// `stroke-linejoin`.
    pub line_join: Option<LineJoin>,
    /// `stroke-miterlimit`.
    pub miter_limit: Option<f64>,
    /// `stroke-dasharray`; `Some(None)` is an explicit `none`.
    pub dash_array: Option<Option<Vec<f64>>>,
    /// `stroke-dashoffset`.
    pub dash_offset: Option<f64>,
    /// `display="none"`; not inherited but hides the subtree.
    pub display_none: bool,
    /// `visibility`; hidden elements still let visible children draw.
    pub visible: Option<bool>,
    /// `color`, the value of `currentColor`.
    pub color: Option<Color>,
}

impl StyleOverrides {
    /// Apply one presentation attribute or style declaration.
    ///
    /// Unknown properties are ignored; malformed values of known properties are errors.
    pub(crate) fn apply(&mut self, name: &str, value: &str) -> DrawResult<()> {
        let value = value.trim();
        if value == "inherit" {
            return Ok(());
        }
        match name {
            "fill" => self.fill = Some(parse_paint(value)?),
            "stroke" => self.stroke = Some(parse_paint(value)?),
            "stroke-width" => {
                self.stroke_width = Some(non_negative(parse_length(value, 1.0)?, name)?);
            }
            "opacity" => self.opacity = Some(parse_opacity(value)?),
            "fill-opacity" => self.fill_opacity = Some(parse_opacity(value)?),
            "stroke-opacity" => self.stroke_opacity = Some(parse_opacity(value)?),
            "fill-rule" => {
                self.fill_rule = Some(match value {
                    "nonzero" => FillRule::NonZero,
                    "evenodd" => FillRule::EvenOdd,
                    _ => return Err(bad(name, value)),
                })
            }
            "stroke-linecap" => {
                self.line_cap = Some(match value {
                    "butt" => LineCap::Butt,
                    "round" => LineCap::Round,
                    "square" => LineCap::Square,
                    _ => return Err(bad(name, value)),
                })
            }
            "stroke-linejoin" => {
                self.line_join = Some(match value {
                    "miter" | "miter-clip" | "arcs" => LineJoin::Miter,
                    "round" => LineJoin::Round,
                    "bevel" => LineJoin::Bevel,
                    _ => return Err(bad(name, value)),
                })
            }
            "stroke-miterlimit" => {
                let v = parse_number(value)?;
                if v < 1.0 {
                    return Err(bad(name, value));
                }
                self.miter_limit = Some(v);
            }
            "stroke-dasharray" => {
                self.dash_array = Some(if value == "none" {
                    None
                } else {
                    let list = parse_length_list(value)?;
                    if list.iter().any(|v| *v < 0.0) {
                        return Err(bad(name, value));
                    }
                    // An all-zero pattern renders as a solid stroke.
                    if list.iter().sum::<f64>() > 0.0 { Some(list) } else { None }
                })
            }
            "stroke-dashoffset" => self.dash_offset = Some(parse_length(value, 1.0)?),
            "display" => self.display_none = value == "none",
            "visibility" => self.visible = Some(value == "visible"),
            "color" => self.color = Some(Color::parse(value)?),
            _ => {}
        }
        Ok(())
    }
}

fn bad(name: &str, value: &str) -> DrawError {
    DrawError::markup(format!("invalid {name} value {value:?}"))
}

fn non_negative(v: f64, name: &str) -> DrawResult<f64> {
    if v < 0.0 {
        return Err(DrawError::markup(format!("{name} must be >= 0 (got {v})")));
    }
    Ok(v)
}

/// Split a `style` attribute into `(property, value)` pairs.
pub(crate) fn style_declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (k, v) = decl.split_once(':')?;
        let k = k.trim();
        if k.is_empty() {
            return None;
        }
        // Drop `!important`; priority is not modeled.
        let v = v.trim().trim_end_matches("!important").trim_end();
        Some((k, v))
    })
}

/// Parse a paint: `none`, a color, `currentColor` or `url(#id) [fallback]`.
pub fn parse_paint(value: &str) -> DrawResult<SvgPaint> {
    let value = value.trim();
    if value == "none" {
        return Ok(SvgPaint::None);
    }
    if value == "currentColor" {
        return Ok(SvgPaint::CurrentColor);
    }
    if let Some(rest) = value.strip_prefix("url(") {
        let (inner, tail) = rest
            .split_once(')')
            .ok_or_else(|| DrawError::markup(format!("unterminated url() in {value:?}")))?;
        let inner = inner.trim().trim_matches(|c| c == '\'' || c == '"');
        let id = inner.strip_prefix('#').ok_or_else(|| {
            DrawError::markup(format!(
                "only local url(#id) references are supported: {value:?}"
            ))
        })?;
        let tail = tail.trim();
        let fallback = match tail {
            "" | "none" => None,
            "currentColor" => None,
            other => Some(Color::parse(other)?),
        };
        return Ok(SvgPaint::Url {
            id: id.to_owned(),
            fallback,
        });
    }
    Ok(SvgPaint::Color(Color::parse(value)?))
}

/// Parse a plain number.
pub fn parse_number(s: &str) -> DrawResult<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DrawError::markup(format!("invalid number {s:?}"))),
    }
}

/// Parse a length with an optional unit; percentages are taken relative to `percent_base`.
pub fn parse_length(s: &str, percent_base: f64) -> DrawResult<f64> {
    let s = s.trim();
    let mut cur = NumberCursor::new(s);
    let v = cur.number()?;
    let scale = match s[cur.pos..].trim() {
        "" | "px" => 1.0,
        "pt" => 96.0 / 72.0,
        "pc" => 16.0,
        "mm" => 96.0 / 25.4,
        "cm" => 96.0 / 2.54,
        "in" => 96.0,
        "em" => 16.0,
        "ex" => 8.0,
        "%" => percent_base / 100.0,
        other => return Err(DrawError::markup(format!("unknown length unit {other:?} in {s:?}"))),
    };
    Ok(v * scale)
}

/// Parse a list of lengths separated by commas and/or whitespace.
pub fn parse_length_list(s: &str) -> DrawResult<Vec<f64>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| parse_length(t, 1.0))
        .collect()
}

/// Parse an opacity: a number or percentage, clamped to [0, 1].
pub fn parse_opacity(s: &str) -> DrawResult<f64> {
    let s = s.trim();
    let v = match s.strip_suffix('%') {
        Some(p) => parse_number(p)? / 100.0,
        None => parse_number(s)?,
    };
    Ok(v.clamp(0.0, 1.0))
}

/// Parse a list of numbers with SVG's compact syntax (`"1-2.5.5e1,3"`).
pub fn parse_number_list(s: &str) -> DrawResult<Vec<f64>> {
    let mut cur = NumberCursor::new(s);
    let mut out = Vec::new();
    while cur.skip_separators() {
        out.push(cur.number()?);
    }
    Ok(out)
}

/// Cursor over SVG number syntax, shared with path data.
pub(crate) struct NumberCursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pub(crate) pos: usize,
}

impl<'a> NumberCursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')) {
            self.pos += 1;
        }
    }

    /// Skip whitespace and at most one comma; returns `false` at the end of input.
    pub(crate) fn skip_separators(&mut self) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_whitespace();
        }
        self.pos < self.bytes.len()
    }

    pub(crate) fn number(&mut self) -> DrawResult<f64> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut digits = 0;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
            digits += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(self.error(start, "expected a number"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek(), Some(b'0'..=b'9')) {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            } else {
                // Not an exponent ("1em"); leave it for the caller.
                self.pos = mark;
            }
        }
        let text = &self.src[start..self.pos];
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.error(start, "number out of range")),
        }
    }

    /// Single-character arc flag (`0` or `1`), which needs no separator after it.
    pub(crate) fn flag(&mut self) -> DrawResult<bool> {
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.error(self.pos, "expected an arc flag")),
        }
    }

    pub(crate) fn error(&self, at: usize, what: &str) -> DrawError {
        let found = self.src[at.min(self.src.len())..].chars().next();
        match found {
            Some(c) => DrawError::markup(format!("{what} at offset {at}, found {c:?}")),
            None => DrawError::markup(format!("{what} at offset {at}, found end of input")),
        }
    }
}

/// Parse a transform list (`"translate(10) rotate(45 5 5)"`).
pub fn parse_transform(s: &str) -> DrawResult<Affine> {
    let mut out = Affine::IDENTITY;
    let mut rest = s.trim();
    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| DrawError::markup(format!("expected '(' in transform {s:?}")))?;
        let close = rest[open..]
            .find(')')
            .map(|i| i + open)
            .ok_or_else(|| DrawError::markup(format!("unterminated transform {s:?}")))?;
        let name = rest[..open].trim();
        let args = parse_number_list(&rest[open + 1..close])?;
        let t = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Affine::new([*a, *b, *c, *d, *e, *f]),
            ("translate", [tx]) => Affine::translate((*tx, 0.0)),
            ("translate", [tx, ty]) => Affine::translate((*tx, *ty)),
            ("scale", [s]) => Affine::scale(*s),
            ("scale", [sx, sy]) => Affine::scale_non_uniform(*sx, *sy),
            ("rotate", [a]) => Affine::rotate(a.to_radians()),
            ("rotate", [a, cx, cy]) => {
                Affine::translate((*cx, *cy))
                    * Affine::rotate(a.to_radians())
                    * Affine::translate((-cx, -cy))
            }
            ("skewX", [a]) => Affine::skew(a.to_radians().tan(), 0.0),
            ("skewY", [a]) => Affine::skew(0.0, a.to_radians().tan()),
            _ => {
                return Err(DrawError::markup(format!(
                    "invalid transform {name}({})",
                    &rest[open + 1..close]
                )));
            }
        };
        // Later transforms in the list apply first.
        out *= t;
        rest = rest[close + 1..].trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/svg/attrs.rs"]
mod tests;
