use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use svg2ico::{build_icon, SvgRasterizer};

//===========================================================================//

/// Renders an SVG icon at multiple sizes and packs them into one ICO file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path of the SVG source
    #[arg(long, value_name = "PATH", default_value = "assets/favicon.svg")]
    input: PathBuf,

    /// Path of the ICO output (overwritten if present)
    #[arg(long, value_name = "PATH", default_value = "assets/favicon.ico")]
    output: PathBuf,

    /// Pixel sizes to render, comma-separated
    #[arg(long, value_delimiter = ',', default_value = "16,32,48,64,128,256")]
    sizes: Vec<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rasterizer = SvgRasterizer::from_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let icondir = build_icon(&rasterizer, &args.sizes)?;
    let bytes = icondir.to_bytes()?;
    fs::write(&args.output, &bytes).with_context(|| {
        format!("failed to write {}", args.output.display())
    })?;

    println!(
        "Saved: {}  ({} KB, sizes: {:?})",
        args.output.display(),
        bytes.len() / 1024,
        args.sizes
    );
    Ok(())
}

//===========================================================================//
