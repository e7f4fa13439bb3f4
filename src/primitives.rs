use crate::fonts::FontRole;
use crate::geom;
use crate::models::{bounds, pt, ArrowSpec, Bounds, Point, Shape, Text};
use crate::palette::Color;

/// Half-angle of the arrowhead triangle, radians (~23 degrees).
pub const ARROW_HALF_ANGLE: f32 = 0.4;

/// Estimate rendered text width from character count. Good enough for label
/// centering; nothing here does real measurement or wrapping.
pub fn estimate_text_width(content: &str, font: FontRole) -> f32 {
    content.chars().count() as f32 * font.size() * 0.5
}

/// Decompose a rounded rectangle into adapter shapes.
///
/// Fill order matters: vertical strip, horizontal strip, then the four corner
/// disks, so the disks cover the gaps where the strips stop short of the
/// corners. The outline is four quadrant arcs (TL 180-270, TR 270-360,
/// BL 90-180, BR 0-90, clockwise screen space) plus four straight edges.
/// The radius is clamped to half the smaller dimension; a non-positive radius
/// degenerates to a plain rectangle.
pub fn rounded_rect(
    rect: Bounds,
    radius: f32,
    fill: Color,
    outline: Option<Color>,
    stroke_width: f32,
) -> Vec<Shape> {
    let (x1, y1) = (rect.min_x(), rect.min_y());
    let (x2, y2) = (rect.max_x(), rect.max_y());
    let w = rect.size.width;
    let h = rect.size.height;
    let r = radius.min(w / 2.0).min(h / 2.0);

    let mut shapes = Vec::new();
    if r <= 0.0 {
        shapes.push(Shape::Rect { bounds: rect, fill });
    } else {
        shapes.push(Shape::Rect {
            bounds: bounds(x1 + r, y1, w - 2.0 * r, h),
            fill,
        });
        shapes.push(Shape::Rect {
            bounds: bounds(x1, y1 + r, w, h - 2.0 * r),
            fill,
        });
        let d = 2.0 * r;
        for (cx, cy) in [
            (x1, y1),
            (x2 - d, y1),
            (x1, y2 - d),
            (x2 - d, y2 - d),
        ] {
            shapes.push(Shape::Ellipse {
                bounds: bounds(cx, cy, d, d),
                fill,
                outline: None,
            });
        }
    }

    if let Some(color) = outline {
        let d = 2.0 * r;
        for (cx, cy, start_deg) in [
            (x1, y1, 180.0),
            (x2 - d, y1, 270.0),
            (x1, y2 - d, 90.0),
            (x2 - d, y2 - d, 0.0),
        ] {
            shapes.push(Shape::Arc {
                bounds: bounds(cx, cy, d, d),
                start_deg,
                sweep_deg: 90.0,
                color,
                width: stroke_width,
            });
        }
        for (from, to) in [
            (pt(x1 + r, y1), pt(x2 - r, y1)),
            (pt(x1 + r, y2), pt(x2 - r, y2)),
            (pt(x1, y1 + r), pt(x1, y2 - r)),
            (pt(x2, y1 + r), pt(x2, y2 - r)),
        ] {
            shapes.push(Shape::Line {
                from,
                to,
                color,
                width: stroke_width,
            });
        }
    }

    shapes
}

/// Outline a rectangle as four straight edges (the dashed-region frames and
/// queue glyphs use this; filled rects come straight from `Shape::Rect`).
pub fn rect_outline(rect: Bounds, color: Color, stroke_width: f32) -> Vec<Shape> {
    let (x1, y1) = (rect.min_x(), rect.min_y());
    let (x2, y2) = (rect.max_x(), rect.max_y());
    [
        (pt(x1, y1), pt(x2, y1)),
        (pt(x1, y2), pt(x2, y2)),
        (pt(x1, y1), pt(x1, y2)),
        (pt(x2, y1), pt(x2, y2)),
    ]
    .into_iter()
    .map(|(from, to)| Shape::Line {
        from,
        to,
        color,
        width: stroke_width,
    })
    .collect()
}

/// Build a directed connector between two resolved points: shaft (solid or
/// dashed, the dashes stopping one head-length short of the tip), triangular
/// head with its apex at `to`, and an optional midpoint label.
///
/// A zero-length arrow is a degenerate no-op and returns no shapes.
pub fn arrow_shapes(from: Point, to: Point, spec: &ArrowSpec) -> Vec<Shape> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON {
        return vec![];
    }
    let angle = dy.atan2(dx);

    let mut shapes = Vec::new();
    if spec.dashed {
        // Pull the dashed shaft back so dashes never collide with the head.
        let shaft_len = (length - spec.head_size).max(0.0);
        let (ex, ey) = geom::polar((from.x, from.y), angle, shaft_len);
        shapes.push(Shape::DashedLine {
            from,
            to: pt(ex, ey),
            color: spec.color,
            width: spec.width,
            dash_len: spec.dash_len,
            gap_len: spec.gap_len,
        });
    } else {
        shapes.push(Shape::Line {
            from,
            to,
            color: spec.color,
            width: spec.width,
        });
    }

    let (bx1, by1) = geom::polar((to.x, to.y), angle - ARROW_HALF_ANGLE, -spec.head_size);
    let (bx2, by2) = geom::polar((to.x, to.y), angle + ARROW_HALF_ANGLE, -spec.head_size);
    shapes.push(Shape::Polygon {
        points: vec![to, pt(bx1, by1), pt(bx2, by2)],
        fill: spec.color,
    });

    if let Some(ref label) = spec.label {
        let mid_x = (from.x + to.x) / 2.0;
        let mid_y = (from.y + to.y) / 2.0 - spec.head_size;
        let half = estimate_text_width(label, FontRole::Small) / 2.0;
        shapes.push(Shape::Text(Text::new(
            pt(mid_x - half, mid_y),
            label.clone(),
            FontRole::Small,
            spec.color,
        )));
    }

    shapes
}
