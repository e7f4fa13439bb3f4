use crate::error::RenderError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tiny_skia::Pixmap;

/// Create the artifact directory if it does not exist yet. Idempotent; an
/// already-existing directory is success.
pub fn ensure_output_dir(dir: &Path) -> Result<(), RenderError> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Save a pixmap to PNG with compression quality control (0-100).
/// Maps 0-100 to PNG compression types:
/// - 0-25: Fast (fastest encoding, larger files)
/// - 26-75: Default (balanced)
/// - 76-100: Best (slowest encoding, smallest files)
pub fn save_png_with_quality(
    pixmap: &Pixmap,
    output_path: &Path,
    quality: u8,
) -> Result<(), RenderError> {
    let file = File::create(output_path).map_err(|source| RenderError::Create {
        path: output_path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_filter(png::FilterType::Paeth);

    let compression_type = if quality <= 25 {
        png::Compression::Fast
    } else if quality <= 75 {
        png::Compression::Default
    } else {
        png::Compression::Best
    };
    encoder.set_compression(compression_type);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixmap.data())?;

    Ok(())
}
