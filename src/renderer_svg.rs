use crate::compose::lower;
use crate::fonts::FontRole;
use crate::models::{DiagramModel, Shape};
use crate::palette::format_color;

fn font_family(font: FontRole) -> &'static str {
    if font.monospace() {
        "DejaVu Sans Mono, monospace"
    } else {
        "DejaVu Sans, sans-serif"
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn render_shape(shape: &Shape) -> String {
    match shape {
        Shape::Rect { bounds, fill } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            bounds.min_x(),
            bounds.min_y(),
            bounds.size.width,
            bounds.size.height,
            format_color(fill)
        ),
        Shape::Line {
            from,
            to,
            color,
            width,
        } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            format_color(color),
            width
        ),
        Shape::DashedLine {
            from,
            to,
            color,
            width,
            dash_len,
            gap_len,
        } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{},{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            format_color(color),
            width,
            dash_len,
            gap_len
        ),
        Shape::Ellipse {
            bounds,
            fill,
            outline,
        } => {
            let stroke_attrs = match outline {
                Some((color, width)) => {
                    format!(r#" stroke="{}" stroke-width="{}""#, format_color(color), width)
                }
                None => String::new(),
            };
            format!(
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}"{}/>"#,
                bounds.min_x() + bounds.size.width / 2.0,
                bounds.min_y() + bounds.size.height / 2.0,
                bounds.size.width / 2.0,
                bounds.size.height / 2.0,
                format_color(fill),
                stroke_attrs
            )
        }
        Shape::Arc {
            bounds,
            start_deg,
            sweep_deg,
            color,
            width,
        } => {
            let rx = bounds.size.width / 2.0;
            let ry = bounds.size.height / 2.0;
            let cx = bounds.min_x() + rx;
            let cy = bounds.min_y() + ry;
            let start = start_deg.to_radians();
            let end = (start_deg + sweep_deg).to_radians();
            let (sx, sy) = (cx + rx * start.cos(), cy + ry * start.sin());
            let (ex, ey) = (cx + rx * end.cos(), cy + ry * end.sin());
            let large_arc = i32::from(sweep_deg.abs() > 180.0);
            let sweep_flag = i32::from(*sweep_deg >= 0.0);
            format!(
                r#"<path d="M {sx} {sy} A {rx} {ry} 0 {large_arc} {sweep_flag} {ex} {ey}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                format_color(color),
                width
            )
        }
        Shape::Polygon { points, fill } => {
            let points_str = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<polygon points="{}" fill="{}"/>"#,
                points_str,
                format_color(fill)
            )
        }
        Shape::Text(text) => {
            let size = text.font.size();
            let weight_attr = if text.font.bold() {
                r#" font-weight="bold""#
            } else {
                ""
            };
            // Shape origins are top-left; <text> is baseline-anchored.
            format!(
                r#"<text x="{}" y="{}" font-size="{}" font-family="{}"{} fill="{}">{}</text>"#,
                text.origin.x,
                text.origin.y + size * 0.75,
                size,
                font_family(text.font),
                weight_attr,
                format_color(&text.color),
                escape_xml(&text.content)
            )
        }
    }
}

/// Lower a model and emit it as a standalone SVG document. The legacy output
/// path; rasterized through resvg by the converter.
pub fn generate_svg(model: &DiagramModel) -> String {
    let shapes_svg = lower(model)
        .iter()
        .map(render_shape)
        .collect::<Vec<_>>()
        .join("\n  ");

    format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n  {shapes_svg}\n</svg>",
        w = model.width,
        h = model.height,
    )
}
