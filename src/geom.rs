use crate::models::Point;
use num_traits::Float;

/// Rotate a point around a center point by a given angle (in radians)
pub fn rotate_point<T>(px: T, py: T, cx: T, cy: T, angle_rad: T) -> (T, T)
where
    T: Float,
{
    let dx = px - cx;
    let dy = py - cy;
    let ca = angle_rad.cos();
    let sa = angle_rad.sin();
    (cx + dx * ca - dy * sa, cy + dx * sa + dy * ca)
}

pub fn distance<T>(a: (T, T), b: (T, T)) -> T
where
    T: Float,
{
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Offset from `origin` by `dist` along `angle_rad` (clockwise from +x in
/// screen space, y growing downward).
pub fn polar<T>(origin: (T, T), angle_rad: T, dist: T) -> (T, T)
where
    T: Float,
{
    (
        origin.0 + dist * angle_rad.cos(),
        origin.1 + dist * angle_rad.sin(),
    )
}

/// Walk the segment [from, to] in alternating drawn strokes and gaps.
/// Degenerate segments and non-positive patterns short-circuit instead of
/// dividing by zero or looping forever.
pub fn dash_segments(from: Point, to: Point, dash_len: f32, gap_len: f32) -> Vec<(Point, Point)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON {
        return vec![];
    }
    if dash_len <= 0.0 || dash_len + gap_len <= 0.0 {
        return vec![(from, to)];
    }

    let ux = dx / length;
    let uy = dy / length;
    let mut segments = Vec::new();
    let mut pos = 0.0;
    while pos < length {
        let end = (pos + dash_len).min(length);
        segments.push((
            Point::new(from.x + ux * pos, from.y + uy * pos),
            Point::new(from.x + ux * end, from.y + uy * end),
        ));
        pos += dash_len + gap_len;
    }
    segments
}
