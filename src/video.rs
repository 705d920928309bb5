//! Middle-frame extraction from a downloaded clip.
//!
//! Drives ffprobe/ffmpeg as subprocesses: probe the clip duration, seek to
//! the midpoint, decode one frame scaled to the target resolution, and
//! load it with the `image` crate.

use anyhow::{anyhow, Context, Result};
use image::{ImageBuffer, Rgba};
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

use crate::config::AnalyzerConfig;

/// Probes the clip duration in seconds.
fn probe_duration(ffprobe_path: &str, video: &Path) -> Result<f64> {
    let output = Command::new(ffprobe_path)
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(video)
        .output()
        .with_context(|| format!("failed to execute {ffprobe_path}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("ffprobe failed: {}", stderr));
    }

    parse_duration(&String::from_utf8_lossy(&output.stdout))
}

fn parse_duration(stdout: &str) -> Result<f64> {
    let duration: f64 = stdout
        .trim()
        .parse()
        .with_context(|| format!("unexpected ffprobe duration output: {stdout:?}"))?;
    if duration <= 0.0 {
        return Err(anyhow!("clip has no duration"));
    }
    Ok(duration)
}

/// Extracts the frame at the clip's midpoint, scaled to the configured
/// target resolution.
pub fn extract_middle_frame(
    video: &Path,
    config: &AnalyzerConfig,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    let duration = probe_duration(&config.ffprobe_path, video)?;
    let midpoint = duration / 2.0;

    let frame_file = NamedTempFile::with_suffix(".png")?;

    let output = Command::new(&config.ffmpeg_path)
        .arg("-y")
        .arg("-v")
        .arg("error")
        .arg("-ss")
        .arg(format!("{midpoint:.3}"))
        .arg("-i")
        .arg(video)
        .arg("-frames:v")
        .arg("1")
        .arg("-vf")
        .arg(format!(
            "scale={}:{}",
            config.target_width, config.target_height
        ))
        .arg(frame_file.path())
        .output()
        .with_context(|| format!("failed to execute {}", config.ffmpeg_path))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("ffmpeg frame extraction failed: {}", stderr));
    }

    let img = image::open(frame_file.path())
        .context("failed to read extracted frame")?
        .to_rgba8();

    Ok(img)
}
