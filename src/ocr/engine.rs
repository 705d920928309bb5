use anyhow::{anyhow, Result};
use image::{ImageBuffer, Luma};
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};
use crate::decode::TextBound;

/// Runs Tesseract on a preprocessed grayscale image and returns one
/// [`TextBound`] per recognized line. Text is lowercased, matching what
/// the decoders expect.
pub fn recognize_image(img: &ImageBuffer<Luma<u8>, Vec<u8>>) -> Result<Vec<TextBound>> {
    let tesseract_exe = find_tesseract_executable()?;

    // Save image to temporary file
    let temp_input = NamedTempFile::with_suffix(".png")?;
    img.save(temp_input.path())?;

    // Create temporary output file (Tesseract adds .tsv extension)
    let temp_output = NamedTempFile::new()?;
    let output_base = temp_output.path().to_string_lossy().to_string();

    // Run Tesseract with TSV output for structured data
    let mut command = Command::new(&tesseract_exe);
    command
        .arg(temp_input.path())
        .arg(&output_base)
        .arg("-l")
        .arg("eng")
        .arg("--psm")
        .arg("6") // Assume single uniform block of text
        .arg("tsv"); // Output TSV format
    if let Some(tessdata_dir) = find_tessdata_dir() {
        command.arg("--tessdata-dir").arg(tessdata_dir);
    }
    let output = command.output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("Tesseract failed: {}", stderr));
    }

    // Read TSV output
    let tsv_path = format!("{}.tsv", output_base);
    let tsv_content = std::fs::read_to_string(&tsv_path)
        .map_err(|e| anyhow!("Failed to read Tesseract output: {}", e))?;

    // Clean up output file
    let _ = std::fs::remove_file(&tsv_path);

    // Parse TSV output
    parse_tsv_output(&tsv_content)
}

/// Accumulates one line's worth of TSV words.
#[derive(Default)]
struct LineBuilder {
    words: Vec<String>,
    conf_sum: f32,
    word_count: usize,
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl LineBuilder {
    fn push(&mut self, text: &str, left: f32, top: f32, width: f32, height: f32, conf: f32) {
        if self.words.is_empty() {
            self.min_x = left;
            self.min_y = top;
            self.max_x = left + width;
            self.max_y = top + height;
        } else {
            self.min_x = self.min_x.min(left);
            self.min_y = self.min_y.min(top);
            self.max_x = self.max_x.max(left + width);
            self.max_y = self.max_y.max(top + height);
        }
        self.words.push(text.to_lowercase());
        self.conf_sum += conf;
        self.word_count += 1;
    }

    fn finish(self) -> Option<TextBound> {
        if self.words.is_empty() {
            return None;
        }
        let avg_conf = self.conf_sum / self.word_count as f32;
        Some(TextBound {
            text: self.words.join(" "),
            quad: [
                [self.min_x, self.min_y],
                [self.max_x, self.min_y],
                [self.max_x, self.max_y],
                [self.min_x, self.max_y],
            ],
            confidence: avg_conf,
        })
    }
}

/// Parses Tesseract TSV output into per-line text bounds. Word boxes are
/// merged into an axis-aligned quad per line.
fn parse_tsv_output(tsv: &str) -> Result<Vec<TextBound>> {
    let mut bounds: Vec<TextBound> = Vec::new();
    let mut current_line_num: i32 = -1;
    let mut builder = LineBuilder::default();

    for line in tsv.lines().skip(1) {
        // Skip header
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let level: i32 = fields[0].parse().unwrap_or(-1);
        let line_num: i32 = fields[4].parse().unwrap_or(-1);
        let left: f32 = fields[6].parse().unwrap_or(0.0);
        let top: f32 = fields[7].parse().unwrap_or(0.0);
        let width: f32 = fields[8].parse().unwrap_or(0.0);
        let height: f32 = fields[9].parse().unwrap_or(0.0);
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);
        let text = fields[11].trim();

        // Level 5 = word
        if level != 5 {
            continue;
        }

        // Skip empty text
        if text.is_empty() {
            continue;
        }

        // Check if we've moved to a new line
        if line_num != current_line_num && current_line_num >= 0 {
            bounds.extend(std::mem::take(&mut builder).finish());
        }
        current_line_num = line_num;

        if conf >= 0.0 {
            builder.push(text, left, top, width, height, conf);
        }
    }

    // Don't forget the last line
    bounds.extend(builder.finish());

    Ok(bounds)
}
