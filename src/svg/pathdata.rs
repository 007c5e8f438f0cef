use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{DrawError, DrawResult};
use crate::geometry::arc::append_svg_arc;
use crate::geometry::path::Path;
use crate::svg::attrs::NumberCursor;

/// Parse SVG path data (`d` attribute) into a [`Path`].
///
/// The whole command set is supported, including implicit command repetition and the compact
/// number and flag syntax. Any error rejects the entire string.
pub fn parse_path_data(d: &str) -> DrawResult<Path> {
    let mut cur = NumberCursor::new(d);
    let mut path = Path::new();
    let mut cmd: Option<u8> = None;
    // Second control point of the previous cubic / control point of the previous quadratic,
    // for the smooth variants.
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    loop {
        cur.skip_whitespace();
        let Some(c) = cur.peek() else { break };
        let op = if c.is_ascii_alphabetic() {
            cur.pos += 1;
            c
        } else {
            match cmd {
                // After a moveto, extra coordinate pairs are implicit linetos.
                Some(b'M') => b'L',
                Some(b'm') => b'l',
                Some(b'Z' | b'z') | None => {
                    return Err(cur.error(cur.pos, "expected a path command"));
                }
                Some(prev) => prev,
            }
        };
        if cmd.is_none() && !matches!(op, b'M' | b'm') {
            return Err(DrawError::markup(format!(
                "path data must start with a moveto, found {:?}",
                op as char
            )));
        }

        let rel = op.is_ascii_lowercase();
        let base = if rel {
            path.current_point().unwrap_or(Point::ORIGIN)
        } else {
            Point::ORIGIN
        };
        let cp = path.current_point().unwrap_or(Point::ORIGIN);
        let point = |cur: &mut NumberCursor<'_>| -> DrawResult<Point> {
            let x = number(cur)?;
            let y = number(cur)?;
            Ok(Point::new(base.x + x, base.y + y))
        };

        let mut next_cubic = None;
        let mut next_quad = None;
        match op.to_ascii_uppercase() {
            b'M' => {
                let p = point(&mut cur)?;
                path.move_to(p);
            }
            b'L' => {
                let p = point(&mut cur)?;
                path.line_to(p);
            }
            b'H' => {
                let x = number(&mut cur)?;
                let x = if rel { cp.x + x } else { x };
                path.line_to((x, cp.y));
            }
            b'V' => {
                let y = number(&mut cur)?;
                let y = if rel { cp.y + y } else { y };
                path.line_to((cp.x, y));
            }
            b'C' => {
                let c1 = point(&mut cur)?;
                let c2 = point(&mut cur)?;
                let p = point(&mut cur)?;
                path.curve_to(c1, c2, p);
                next_cubic = Some(c2);
            }
            b'S' => {
                let c1 = reflect(last_cubic_ctrl, cp);
                let c2 = point(&mut cur)?;
                let p = point(&mut cur)?;
                path.curve_to(c1, c2, p);
                next_cubic = Some(c2);
            }
            b'Q' => {
                let c = point(&mut cur)?;
                let p = point(&mut cur)?;
                path.quad_to(c, p);
                next_quad = Some(c);
            }
            b'T' => {
                let c = reflect(last_quad_ctrl, cp);
                let p = point(&mut cur)?;
                path.quad_to(c, p);
                next_quad = Some(c);
            }
            b'A' => {
                let rx = number(&mut cur)?;
                let ry = number(&mut cur)?;
                let rotation = number(&mut cur)?;
                cur.skip_separators();
                let large_arc = cur.flag()?;
                cur.skip_separators();
                let sweep = cur.flag()?;
                let p = point(&mut cur)?;
                append_svg_arc(&mut path, Vec2::new(rx, ry), rotation, large_arc, sweep, p);
            }
            b'Z' => {
                path.close();
            }
            _ => {
                return Err(DrawError::markup(format!(
                    "unknown path command {:?}",
                    op as char
                )));
            }
        }
        last_cubic_ctrl = next_cubic;
        last_quad_ctrl = next_quad;
        cmd = Some(op);
    }
    Ok(path)
}

fn number(cur: &mut NumberCursor<'_>) -> DrawResult<f64> {
    cur.skip_separators();
    cur.number()
}

/// Reflection of the previous control point about the current point, or the current point
/// itself when the previous command was not of the same family.
fn reflect(ctrl: Option<Point>, current: Point) -> Point {
    match ctrl {
        Some(c) => current + (current - c),
        None => current,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/pathdata.rs"]
mod tests;
