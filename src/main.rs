//! surf-stats
//!
//! Extracts race metadata (version, season, gamemode, map, finish time)
//! from a shared clip: downloads the clip, pulls its middle frame, OCRs
//! the HUD regions and decodes the compact header string. The result is
//! printed as JSON; partial results are normal and carry a diagnostic
//! message instead of failing.

mod clip;
mod config;
mod decode;
mod ocr;
mod paths;
mod pipeline;
mod video;

use anyhow::Result;
use chrono::Local;
use clap::{ArgGroup, Parser};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Extract race stats from a shared clip.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(group = ArgGroup::new("input").required(true).args(["url", "image"]))]
struct Args {
    /// Shareable clip URL (e.g. https://gfycat.com/<clip-id>)
    url: Option<String>,

    /// Analyze a local frame image instead of downloading a clip
    #[arg(long)]
    image: Option<PathBuf>,

    /// Path to config.json (defaults to the one next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the encoding table resources
    #[arg(long)]
    resources: Option<PathBuf>,
}

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    let log_path = paths::get_logs_dir().join("surf_stats.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    paths::ensure_directories()?;

    if let Err(e) = ocr::ensure_tesseract() {
        log(&format!("Warning: {}", e));
        log("OCR stages will fail until Tesseract is available.");
    }

    let config = config::load_config(args.config.as_deref());

    // A corrupt encoding table invalidates every decode, so this is the
    // one fatal load.
    let resources_dir = args.resources.unwrap_or_else(paths::get_resources_dir);
    let tables = pipeline::DecodeTables::load(&resources_dir)?;
    log(&format!(
        "Loaded {} map encodings, {} mode classes from {}",
        tables.maps.len(),
        tables.modes.len(),
        resources_dir.display()
    ));

    let result = if let Some(path) = &args.image {
        let frame = image::open(path)
            .map_err(|e| anyhow::anyhow!("could not open {}: {e}", path.display()))?
            .to_rgba8();
        pipeline::analyze_frame(&frame, &config, &tables)
    } else {
        // The arg group guarantees a URL when --image is absent.
        let url = args.url.as_deref().unwrap_or_default();
        pipeline::analyze_clip(url, &config, &tables)
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
