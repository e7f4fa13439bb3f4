pub mod compose;
pub mod converter;
pub mod diagrams;
pub mod error;
pub mod fonts;
pub mod geom;
pub mod models;
pub mod output;
pub mod palette;
pub mod primitives;
pub mod renderer_skia;
pub mod renderer_svg;

pub use compose::lower;
pub use converter::convert_svg_to_png;
pub use error::RenderError;
pub use fonts::{FontRole, FontSet};
pub use models::{DiagramModel, Shape};
pub use palette::Palette;
pub use renderer_skia::render_to_png;
pub use renderer_svg::generate_svg;

#[cfg(test)]
mod tests;
