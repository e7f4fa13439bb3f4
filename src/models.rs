use crate::fonts::FontRole;
use crate::palette::{Color, Palette};
use euclid::default::{Point2D, Rect, Size2D};

pub type Point = Point2D<f32>;
pub type Bounds = Rect<f32>;

pub fn pt(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

pub fn bounds(x: f32, y: f32, w: f32, h: f32) -> Bounds {
    Bounds::new(Point::new(x, y), Size2D::new(w, h))
}

/// A positioned run of text. `origin` is the top-left corner, matching the
/// coordinates the reference figures were authored in; the canvas adapters
/// translate to a baseline themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub origin: Point,
    pub content: String,
    pub font: FontRole,
    pub color: Color,
}

impl Text {
    pub fn new(origin: Point, content: impl Into<String>, font: FontRole, color: Color) -> Text {
        Text {
            origin,
            content: content.into(),
            font,
            color,
        }
    }
}

/// The primitive drawable vocabulary. This is the only thing the canvas
/// adapters understand; boxes, arrows, sections and legends all lower to a
/// sequence of these. Arc angles are degrees clockwise from +x in screen
/// space (y down), the convention the quadrant outlines are specified in.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        bounds: Bounds,
        fill: Color,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    DashedLine {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
        dash_len: f32,
        gap_len: f32,
    },
    Ellipse {
        bounds: Bounds,
        fill: Color,
        outline: Option<(Color, f32)>,
    },
    Arc {
        bounds: Bounds,
        start_deg: f32,
        sweep_deg: f32,
        color: Color,
        width: f32,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Text(Text),
}

/// Which edge of a component box an arrow attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// An arrow endpoint: either an absolute point or a reference to a named
/// box edge, offset along that edge from its midpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    At(Point),
    Anchor {
        node: String,
        side: Side,
        offset: f32,
    },
}

impl Endpoint {
    pub fn at(x: f32, y: f32) -> Endpoint {
        Endpoint::At(pt(x, y))
    }

    pub fn anchor(node: impl Into<String>, side: Side) -> Endpoint {
        Endpoint::Anchor {
            node: node.into(),
            side,
            offset: 0.0,
        }
    }

    pub fn anchor_offset(node: impl Into<String>, side: Side, offset: f32) -> Endpoint {
        Endpoint::Anchor {
            node: node.into(),
            side,
            offset,
        }
    }
}

/// A directed connector. Purely geometric once its endpoints are resolved;
/// the head is computed from the direction vector alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowSpec {
    pub from: Endpoint,
    pub to: Endpoint,
    pub color: Color,
    pub label: Option<String>,
    pub dashed: bool,
    pub width: f32,
    pub head_size: f32,
    pub dash_len: f32,
    pub gap_len: f32,
}

impl ArrowSpec {
    pub fn new(from: Endpoint, to: Endpoint, color: Color) -> ArrowSpec {
        ArrowSpec {
            from,
            to,
            color,
            label: None,
            dashed: false,
            width: 2.0,
            head_size: 10.0,
            dash_len: 8.0,
            gap_len: 4.0,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> ArrowSpec {
        self.label = Some(label.into());
        self
    }

    pub fn dashed(mut self) -> ArrowSpec {
        self.dashed = true;
        self
    }

    pub fn head_size(mut self, size: f32) -> ArrowSpec {
        self.head_size = size;
        self
    }

    pub fn dash_pattern(mut self, dash_len: f32, gap_len: f32) -> ArrowSpec {
        self.dash_len = dash_len;
        self.gap_len = gap_len;
        self
    }
}

/// A titled, color-coded panel with a bulleted item list. Items never wrap;
/// callers size the box generously. Header-less boxes render their title as
/// centered label lines instead (the condensed flow figures use these).
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentBox {
    pub id: String,
    pub bounds: Bounds,
    pub title: String,
    pub icon: Option<String>,
    pub items: Vec<String>,
    pub accent: Color,
    pub fill: Color,
    pub title_color: Color,
    pub item_color: Color,
    pub header: bool,
    pub badge: Option<String>,
    pub badge_fill: Color,
    pub badge_color: Color,
    pub radius: f32,
    pub stroke_width: f32,
    pub header_height: f32,
    pub item_start: f32,
    pub item_pitch: f32,
    pub title_font: FontRole,
    pub item_font: FontRole,
}

impl ComponentBox {
    pub fn new(
        id: impl Into<String>,
        bounds: Bounds,
        title: impl Into<String>,
        accent: Color,
        palette: &Palette,
    ) -> ComponentBox {
        ComponentBox {
            id: id.into(),
            bounds,
            title: title.into(),
            icon: None,
            items: Vec::new(),
            accent,
            fill: palette.box_background,
            title_color: palette.foreground,
            item_color: palette.secondary,
            header: true,
            badge: None,
            badge_fill: palette.badge_background,
            badge_color: palette.highlight,
            radius: 8.0,
            stroke_width: 2.0,
            header_height: 33.0,
            item_start: 45.0,
            item_pitch: 22.0,
            title_font: FontRole::Header,
            item_font: FontRole::Body,
        }
    }

    /// A header-less box whose title lines (split on '\n') are centered.
    pub fn label_box(
        id: impl Into<String>,
        bounds: Bounds,
        title: impl Into<String>,
        accent: Color,
        palette: &Palette,
    ) -> ComponentBox {
        let mut b = ComponentBox::new(id, bounds, title, accent, palette);
        b.header = false;
        b.item_color = palette.foreground;
        b.item_pitch = 20.0;
        b
    }

    pub fn items<I, S>(mut self, items: I) -> ComponentBox
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> ComponentBox {
        self.icon = Some(icon.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> ComponentBox {
        self.badge = Some(badge.into());
        self
    }

    /// The tighter metrics the thread-model boxes use.
    pub fn compact(mut self) -> ComponentBox {
        self.radius = 6.0;
        self.header_height = 26.0;
        self.item_start = 35.0;
        self.item_pitch = 18.0;
        self
    }

    pub fn item_font(mut self, font: FontRole) -> ComponentBox {
        self.item_font = font;
        self
    }

    pub fn item_pitch(mut self, pitch: f32) -> ComponentBox {
        self.item_pitch = pitch;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Color,
    pub label: String,
}

impl LegendEntry {
    pub fn new(color: Color, label: impl Into<String>) -> LegendEntry {
        LegendEntry {
            color,
            label: label.into(),
        }
    }
}

/// Legend block: a "Legend:" header plus swatch/label pairs laid out three
/// per row by the composition engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub origin: Point,
    pub title_color: Color,
    pub label_color: Color,
    pub col_width: f32,
    pub row_pitch: f32,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn new(origin: Point, palette: &Palette, entries: Vec<LegendEntry>) -> Legend {
        Legend {
            origin,
            title_color: palette.foreground,
            label_color: palette.secondary,
            col_width: 220.0,
            row_pitch: 25.0,
            entries,
        }
    }
}

/// An annotated region: a heading with an accent underline, plus pre-lowered
/// child shapes (code panels, timelines, queue glyphs and the like that have
/// no generic composer).
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub heading_color: Color,
    pub underline: Color,
    pub origin: Point,
    pub underline_len: f32,
    pub children: Vec<Shape>,
}

impl Section {
    pub fn new(
        origin: Point,
        heading: impl Into<String>,
        underline_len: f32,
        palette: &Palette,
    ) -> Section {
        Section {
            heading: heading.into(),
            heading_color: palette.foreground,
            underline: palette.accent,
            origin,
            underline_len,
            children: Vec::new(),
        }
    }

    pub fn children(mut self, children: Vec<Shape>) -> Section {
        self.children = children;
        self
    }
}

/// Declarative description of one rendered diagram. Immutable once handed to
/// the composition engine; each output image has its own model and they share
/// nothing but the read-only palette and font set.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramModel {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub boxes: Vec<ComponentBox>,
    pub arrows: Vec<ArrowSpec>,
    pub sections: Vec<Section>,
    pub legend: Option<Legend>,
    pub free_text: Vec<Text>,
}

impl DiagramModel {
    pub fn new(width: u32, height: u32, background: Color) -> DiagramModel {
        DiagramModel {
            width,
            height,
            background,
            boxes: Vec::new(),
            arrows: Vec::new(),
            sections: Vec::new(),
            legend: None,
            free_text: Vec::new(),
        }
    }
}
