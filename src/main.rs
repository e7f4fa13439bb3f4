use anyhow::{bail, Context, Result};
use archfig::fonts::FontSet;
use archfig::output::ensure_output_dir;
use archfig::{convert_svg_to_png, diagrams, generate_svg, render_to_png, Palette};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "archfig")]
#[command(about = "Generate the architecture diagram set as PNG images", long_about = None)]
struct Args {
    /// Directory the PNG artifacts are written to
    #[arg(long, value_name = "DIR", default_value = "docs/images")]
    out_dir: PathBuf,

    /// Path to a JSON palette override (hex color per role)
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// PNG compression quality (0-100)
    #[arg(long, default_value_t = 95)]
    quality: u8,

    /// Use legacy SVG renderer rasterized through resvg (default is direct rendering)
    #[arg(long)]
    legacy: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let palette = match args.theme {
        Some(ref path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read theme file: {path:?}"))?;
            Palette::from_json(&json).context("Failed to parse theme JSON")?
        }
        None => Palette::default(),
    };

    ensure_output_dir(&args.out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", args.out_dir))?;

    let fonts = if args.legacy {
        FontSet::empty()
    } else {
        FontSet::load()
    };

    let mut failures = 0usize;
    for (file_name, model) in diagrams::all(&palette) {
        let output_path = args.out_dir.join(file_name);
        let result = if args.legacy {
            let svg_content = generate_svg(&model);
            convert_svg_to_png(&svg_content, &output_path, args.quality)
        } else {
            render_to_png(&model, &output_path, &fonts, args.quality).map_err(Into::into)
        };
        match result {
            Ok(()) => println!("✓ Diagram saved to: {}", output_path.display()),
            Err(err) => {
                eprintln!("Failed to generate {file_name}: {err:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} diagram(s) failed to generate");
    }
    println!("Diagrams generated successfully!");
    Ok(())
}
