use crate::fonts::FontRole;
use crate::models::{
    bounds, pt, ComponentBox, DiagramModel, Endpoint, Legend, Point, Section, Shape, Side, Text,
};
use crate::primitives::{arrow_shapes, estimate_text_width, rounded_rect};

/// Lower a diagram model into an ordered shape sequence.
///
/// The draw order is a hard invariant: canvas background, then sections,
/// then component boxes in model order, then arrows in model order (so
/// connectors stay visible above box fills), then free text and the legend
/// last. Reordering any of these changes visual correctness.
pub fn lower(model: &DiagramModel) -> Vec<Shape> {
    let mut shapes = vec![Shape::Rect {
        bounds: bounds(0.0, 0.0, model.width as f32, model.height as f32),
        fill: model.background,
    }];

    for section in &model.sections {
        section_shapes(section, &mut shapes);
    }
    for component in &model.boxes {
        component_box_shapes(component, &mut shapes);
    }
    for arrow in &model.arrows {
        let (Some(from), Some(to)) = (
            resolve_endpoint(&arrow.from, model),
            resolve_endpoint(&arrow.to, model),
        ) else {
            continue;
        };
        shapes.extend(arrow_shapes(from, to, arrow));
    }
    for text in &model.free_text {
        shapes.push(Shape::Text(text.clone()));
    }
    if let Some(ref legend) = model.legend {
        legend_shapes(legend, &mut shapes);
    }

    shapes
}

/// Resolve an arrow endpoint against the model's boxes. An anchor naming an
/// unknown box is a model bug; it is reported and the arrow skipped rather
/// than drawn somewhere arbitrary.
pub fn resolve_endpoint(endpoint: &Endpoint, model: &DiagramModel) -> Option<Point> {
    match endpoint {
        Endpoint::At(p) => Some(*p),
        Endpoint::Anchor { node, side, offset } => {
            let Some(b) = model.boxes.iter().find(|b| b.id == *node) else {
                eprintln!("Unknown arrow anchor node: {node}");
                return None;
            };
            let r = b.bounds;
            let cx = r.min_x() + r.size.width / 2.0;
            let cy = r.min_y() + r.size.height / 2.0;
            Some(match side {
                Side::Left => pt(r.min_x(), cy + offset),
                Side::Right => pt(r.max_x(), cy + offset),
                Side::Top => pt(cx + offset, r.min_y()),
                Side::Bottom => pt(cx + offset, r.max_y()),
            })
        }
    }
}

/// Border, header bar (or centered label lines), bulleted items, optional
/// badge. One text line per item at a fixed pitch; no wrapping.
pub fn component_box_shapes(component: &ComponentBox, out: &mut Vec<Shape>) {
    let r = component.bounds;
    let (x, y) = (r.min_x(), r.min_y());
    let w = r.size.width;

    out.extend(rounded_rect(
        r,
        component.radius,
        component.fill,
        Some(component.accent),
        component.stroke_width,
    ));

    if component.header {
        let inset = component.stroke_width;
        out.push(Shape::Rect {
            bounds: bounds(x + inset, y + inset, w - 2.0 * inset, component.header_height),
            fill: component.accent,
        });
        let title = match component.icon {
            Some(ref icon) => format!("{icon} {}", component.title),
            None => component.title.clone(),
        };
        out.push(Shape::Text(Text::new(
            pt(x + 15.0, y + 8.0),
            title,
            component.title_font,
            component.title_color,
        )));

        if let Some(ref badge) = component.badge {
            let bx = x + w - 60.0;
            out.push(Shape::Ellipse {
                bounds: bounds(bx, y + 5.0, 50.0, 18.0),
                fill: component.badge_fill,
                outline: Some((component.badge_color, 1.0)),
            });
            out.push(Shape::Text(Text::new(
                pt(bx + 8.0, y + 7.0),
                badge.clone(),
                FontRole::Small,
                component.badge_color,
            )));
        }

        let mut y_off = component.item_start;
        for item in &component.items {
            out.push(Shape::Text(Text::new(
                pt(x + 15.0, y + y_off),
                format!("• {item}"),
                component.item_font,
                component.item_color,
            )));
            y_off += component.item_pitch;
        }
    } else {
        let lines: Vec<&str> = component.title.split('\n').collect();
        let block = component.item_pitch * lines.len() as f32;
        let start_y = y + (r.size.height - block) / 2.0 + 2.0;
        for (i, line) in lines.iter().enumerate() {
            let half = estimate_text_width(line, component.item_font) / 2.0;
            out.push(Shape::Text(Text::new(
                pt(x + w / 2.0 - half, start_y + i as f32 * component.item_pitch),
                (*line).to_string(),
                component.item_font,
                component.item_color,
            )));
        }
    }
}

fn section_shapes(section: &Section, out: &mut Vec<Shape>) {
    let o = section.origin;
    if !section.heading.is_empty() {
        out.push(Shape::Text(Text::new(
            o,
            section.heading.clone(),
            FontRole::Header,
            section.heading_color,
        )));
    }
    if section.underline_len > 0.0 {
        out.push(Shape::Line {
            from: pt(o.x, o.y + 22.0),
            to: pt(o.x + section.underline_len, o.y + 22.0),
            color: section.underline,
            width: 2.0,
        });
    }
    out.extend(section.children.iter().cloned());
}

/// Swatches run three per row; rows advance by the legend's pitch.
fn legend_shapes(legend: &Legend, out: &mut Vec<Shape>) {
    let o = legend.origin;
    out.push(Shape::Text(Text::new(
        o,
        "Legend:",
        FontRole::Header,
        legend.title_color,
    )));
    for (i, entry) in legend.entries.iter().enumerate() {
        let x = o.x + (i % 3) as f32 * legend.col_width;
        let y = o.y + 30.0 + (i / 3) as f32 * legend.row_pitch;
        out.push(Shape::Rect {
            bounds: bounds(x, y, 15.0, 15.0),
            fill: entry.color,
        });
        out.push(Shape::Text(Text::new(
            pt(x + 25.0, y),
            entry.label.clone(),
            FontRole::Body,
            legend.label_color,
        )));
    }
}
