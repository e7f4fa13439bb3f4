use crate::compose::lower;
use crate::error::RenderError;
use crate::fonts::{FontSet, LoadedFont};
use crate::geom;
use crate::models::{Bounds, DiagramModel, Point, Shape, Text};
use crate::output::save_png_with_quality;
use crate::palette::Color as DiagramColor;
use skrifa::{
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlinePen},
    raw::FontRef,
    MetadataProvider,
};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

/// Lower a model and rasterize it straight to a PNG artifact.
pub fn render_to_png(
    model: &DiagramModel,
    output_path: &std::path::Path,
    fonts: &FontSet,
    quality: u8,
) -> Result<(), RenderError> {
    let shapes = lower(model);
    let pixmap = rasterize(&shapes, model.width, model.height, fonts)?;
    save_png_with_quality(&pixmap, output_path, quality)
}

/// Execute an ordered shape sequence against a fresh pixmap. The shapes are
/// drawn exactly in sequence order; all z-ordering decisions were made by the
/// composition engine.
pub fn rasterize(
    shapes: &[Shape],
    width: u32,
    height: u32,
    fonts: &FontSet,
) -> Result<Pixmap, RenderError> {
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::PixmapAlloc { width, height })?;

    for shape in shapes {
        draw_shape(&mut pixmap, shape, fonts);
    }

    Ok(pixmap)
}

fn paint_for(color: DiagramColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red, color.green, color.blue, color.alpha);
    paint
}

fn stroke_of(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Miter,
        ..Default::default()
    }
}

fn draw_shape(pixmap: &mut Pixmap, shape: &Shape, fonts: &FontSet) {
    match shape {
        Shape::Rect { bounds, fill } => fill_rect(pixmap, *bounds, *fill),
        Shape::Line {
            from,
            to,
            color,
            width,
        } => stroke_segment(pixmap, *from, *to, *color, *width),
        Shape::DashedLine {
            from,
            to,
            color,
            width,
            dash_len,
            gap_len,
        } => {
            // Explicit dash segments, matching the walker the engine's length
            // guarantees are stated in terms of.
            for (a, b) in geom::dash_segments(*from, *to, *dash_len, *gap_len) {
                stroke_segment(pixmap, a, b, *color, *width);
            }
        }
        Shape::Ellipse {
            bounds,
            fill,
            outline,
        } => {
            let Some(rect) = skia_rect(*bounds) else {
                return;
            };
            let mut pb = PathBuilder::new();
            pb.push_oval(rect);
            let Some(path) = pb.finish() else { return };
            pixmap.fill_path(
                &path,
                &paint_for(*fill),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
            if let Some((color, width)) = outline {
                pixmap.stroke_path(
                    &path,
                    &paint_for(*color),
                    &stroke_of(*width),
                    Transform::identity(),
                    None,
                );
            }
        }
        Shape::Arc {
            bounds,
            start_deg,
            sweep_deg,
            color,
            width,
        } => {
            if let Some(path) = arc_path(*bounds, *start_deg, *sweep_deg) {
                pixmap.stroke_path(
                    &path,
                    &paint_for(*color),
                    &stroke_of(*width),
                    Transform::identity(),
                    None,
                );
            }
        }
        Shape::Polygon { points, fill } => {
            if points.len() < 3 {
                return;
            }
            let mut pb = PathBuilder::new();
            pb.move_to(points[0].x, points[0].y);
            for p in &points[1..] {
                pb.line_to(p.x, p.y);
            }
            pb.close();
            if let Some(path) = pb.finish() {
                pixmap.fill_path(
                    &path,
                    &paint_for(*fill),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
        Shape::Text(text) => draw_text(pixmap, text, fonts),
    }
}

fn fill_rect(pixmap: &mut Pixmap, bounds: Bounds, fill: DiagramColor) {
    let Some(rect) = skia_rect(bounds) else {
        return;
    };
    pixmap.fill_rect(rect, &paint_for(fill), Transform::identity(), None);
}

fn stroke_segment(pixmap: &mut Pixmap, from: Point, to: Point, color: DiagramColor, width: f32) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &paint_for(color),
            &stroke_of(width),
            Transform::identity(),
            None,
        );
    }
}

fn skia_rect(bounds: Bounds) -> Option<Rect> {
    Rect::from_xywh(
        bounds.min_x(),
        bounds.min_y(),
        bounds.size.width,
        bounds.size.height,
    )
}

/// Elliptical arc on the bounding box, angles in degrees clockwise from +x in
/// screen space. Approximated with one cubic segment per quadrant chunk.
fn arc_path(bounds: Bounds, start_deg: f32, sweep_deg: f32) -> Option<tiny_skia::Path> {
    if sweep_deg.abs() <= f32::EPSILON {
        return None;
    }
    let rx = bounds.size.width / 2.0;
    let ry = bounds.size.height / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let cx = bounds.min_x() + rx;
    let cy = bounds.min_y() + ry;
    let point_at = |theta: f32| (cx + rx * theta.cos(), cy + ry * theta.sin());
    let tangent_at = |theta: f32| (-rx * theta.sin(), ry * theta.cos());

    let segments = (sweep_deg.abs() / 90.0).ceil().max(1.0) as u32;
    let step = sweep_deg.to_radians() / segments as f32;
    let mut theta = start_deg.to_radians();

    let mut pb = PathBuilder::new();
    let (sx, sy) = point_at(theta);
    pb.move_to(sx, sy);
    for _ in 0..segments {
        let next = theta + step;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        let (x0, y0) = point_at(theta);
        let (x1, y1) = point_at(next);
        let (t0x, t0y) = tangent_at(theta);
        let (t1x, t1y) = tangent_at(next);
        pb.cubic_to(
            x0 + k * t0x,
            y0 + k * t0y,
            x1 - k * t1x,
            y1 - k * t1y,
            x1,
            y1,
        );
        theta = next;
    }
    pb.finish()
}

/// Helper struct for rendering glyph outlines with tiny-skia.
struct GlyphPen<'a> {
    pixmap: &'a mut Pixmap,
    x: f32,
    y: f32,
    paint: Paint<'static>,
    open_path: PathBuilder,
}

impl<'a> GlyphPen<'a> {
    fn new(pixmap: &'a mut Pixmap, color: Color) -> GlyphPen<'a> {
        let mut paint = Paint::default();
        paint.set_color(color);
        GlyphPen {
            pixmap,
            x: 0.0,
            y: 0.0,
            paint,
            open_path: PathBuilder::new(),
        }
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn finish_glyph(&mut self) {
        let builder = std::mem::replace(&mut self.open_path, PathBuilder::new());
        if let Some(path) = builder.finish() {
            self.pixmap.fill_path(
                &path,
                &self.paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

impl OutlinePen for GlyphPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.open_path.move_to(self.x + x, self.y - y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.open_path.line_to(self.x + x, self.y - y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.open_path
            .quad_to(self.x + cx0, self.y - cy0, self.x + x, self.y - y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.open_path.cubic_to(
            self.x + cx0,
            self.y - cy0,
            self.x + cx1,
            self.y - cy1,
            self.x + x,
            self.y - y,
        );
    }

    fn close(&mut self) {
        self.open_path.close();
    }
}

/// Render a single-line text run glyph by glyph. `origin` is the top-left
/// corner; the baseline offset comes from the face's ascent. A role with no
/// resolved face renders nothing (the font fallback already did its best).
fn draw_text(pixmap: &mut Pixmap, text: &Text, fonts: &FontSet) {
    if text.content.is_empty() {
        return;
    }
    let Some(font) = fonts.get(text.font) else {
        return;
    };
    render_glyphs(pixmap, text, font);
}

fn render_glyphs(pixmap: &mut Pixmap, text: &Text, font: &LoadedFont) {
    let Ok(font_ref) = FontRef::from_index(font.data.as_slice(), font.index) else {
        return;
    };
    let font_size = text.font.size();
    let outlines = font_ref.outline_glyphs();
    let charmap = font_ref.charmap();
    let glyph_metrics = font_ref.glyph_metrics(Size::new(font_size), LocationRef::default());
    let metrics = font_ref.metrics(Size::new(font_size), LocationRef::default());

    let color = Color::from_rgba8(
        text.color.red,
        text.color.green,
        text.color.blue,
        text.color.alpha,
    );
    let mut pen = GlyphPen::new(pixmap, color);

    let baseline_y = text.origin.y + metrics.ascent;
    let mut cursor_x = text.origin.x;
    for ch in text.content.chars() {
        let Some(glyph_id) = charmap.map(ch) else {
            continue;
        };
        if let Some(glyph_outline) = outlines.get(glyph_id) {
            pen.set_origin(cursor_x, baseline_y);
            let settings = DrawSettings::unhinted(Size::new(font_size), LocationRef::default());
            glyph_outline.draw(settings, &mut pen).ok();
            pen.finish_glyph();
        }
        if let Some(advance) = glyph_metrics.advance_width(glyph_id) {
            cursor_x += advance;
        }
    }
}
