use crate::output::save_png_with_quality;
use anyhow::Result;
use resvg::usvg::{self, Tree};
use std::path::Path;
use tiny_skia::Pixmap;

/// Rasterize an SVG document produced by the legacy renderer. resvg resolves
/// text against the system font database, so the legacy path degrades the
/// same way the direct renderer does when preferred faces are missing.
pub fn convert_svg_to_png(svg_content: &str, output_path: &Path, quality: u8) -> Result<()> {
    let options = usvg::Options::default();
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();

    let tree = Tree::from_str(svg_content, &options, &fontdb)?;

    let size = tree.size();
    let width = (size.width().ceil() as u32).max(1);
    let height = (size.height().ceil() as u32).max(1);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to create pixmap"))?;

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    save_png_with_quality(&pixmap, output_path, quality)?;

    Ok(())
}
