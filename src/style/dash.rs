use crate::foundation::core::Point;
use crate::foundation::error::DrawResult;
use crate::geometry::flatten::FlattenedContour;
use crate::style::pen::DashPattern;

/// Upper bound on dash segments produced by one call; the rest of the stroke is dropped.
pub const MAX_DASHES: usize = 1 << 20;

/// Split each contour's centerline into its "on" intervals.
///
/// The pattern (shifted by its offset) restarts at the start of every contour. Closed
/// contours are walked through their closing segment and their first and last dashes stay
/// separate. Zero-length "on" intervals produce two-point dashes at a single location so caps
/// can still draw dots.
pub fn dash(
    contours: &[FlattenedContour],
    pattern: &DashPattern,
) -> DrawResult<Vec<FlattenedContour>> {
    pattern.validate()?;
    let intervals = pattern.normalized_intervals();
    let total: f64 = intervals.iter().sum();

    let mut out = Vec::new();
    for contour in contours {
        if contour.points.len() < 2 {
            continue;
        }
        if !dash_contour(&contour.points, &intervals, total, pattern.offset, &mut out) {
            tracing::warn!(
                max = MAX_DASHES,
                "dash pattern produced too many segments; truncated"
            );
            break;
        }
    }
    Ok(out)
}

/// Returns `false` when the dash ceiling was hit.
fn dash_contour(
    points: &[Point],
    intervals: &[f64],
    total: f64,
    offset: f64,
    out: &mut Vec<FlattenedContour>,
) -> bool {
    let n = intervals.len();
    let mut phase = offset.rem_euclid(total);
    let mut idx = 0;
    while phase > 0.0 && phase >= intervals[idx] {
        phase -= intervals[idx];
        idx = (idx + 1) % n;
    }
    let mut remaining = intervals[idx] - phase;
    let mut on = idx % 2 == 0;
    let mut current: Vec<Point> = if on { vec![points[0]] } else { Vec::new() };

    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let len = a.distance(b);
        let mut pos = 0.0;
        loop {
            let left = len - pos;
            if remaining > left {
                remaining -= left;
                if on && current.last() != Some(&b) {
                    current.push(b);
                }
                break;
            }
            pos += remaining;
            let p = if len > 0.0 { a.lerp(b, pos / len) } else { a };
            if on {
                current.push(p);
                if !emit(std::mem::take(&mut current), out) {
                    return false;
                }
            } else {
                current = vec![p];
            }
            on = !on;
            idx = (idx + 1) % n;
            remaining = intervals[idx];
        }
    }
    if on && current.len() >= 2 {
        return emit(current, out);
    }
    true
}

fn emit(dash: Vec<Point>, out: &mut Vec<FlattenedContour>) -> bool {
    out.push(FlattenedContour {
        points: dash,
        closed: false,
    });
    out.len() < MAX_DASHES
}

#[cfg(test)]
#[path = "../../tests/unit/style/dash.rs"]
mod tests;
