//! End-to-end orchestration: clip URL → frame → OCR → StatsResult.
//!
//! Collaborator failures (network, frame extraction, OCR) short-circuit
//! into a result whose `message` explains the failure; decode-stage
//! failures accumulate diagnostics without discarding fields recovered
//! earlier. The result record always has its full shape.

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba};
use std::path::Path;
use std::time::Instant;

use crate::config::AnalyzerConfig;
use crate::decode::{self, fields, EncodingTable, StatsResult};
use crate::{clip, log, ocr, video};

/// The two encoding tables the decoders need, loaded once and shared
/// read-only across analyses.
pub struct DecodeTables {
    pub maps: EncodingTable,
    pub modes: EncodingTable,
}

impl DecodeTables {
    /// Loads `map_encodings.txt` and `map_gamemodes.txt` from the
    /// resources directory. A malformed table is fatal: a corrupt table
    /// would invalidate every subsequent decode.
    pub fn load(resources_dir: &Path) -> Result<Self> {
        let maps = EncodingTable::load(&resources_dir.join("map_encodings.txt"))
            .context("failed to load map encoding table")?;
        let modes = EncodingTable::load(&resources_dir.join("map_gamemodes.txt"))
            .context("failed to load map gamemode table")?;
        Ok(Self { maps, modes })
    }
}

/// Analyzes a shared clip URL end to end. Never fails: collaborator
/// errors come back as the `message` of an otherwise-empty result.
pub fn analyze_clip(url: &str, config: &AnalyzerConfig, tables: &DecodeTables) -> StatsResult {
    let client = match clip::build_client() {
        Ok(client) => client,
        Err(e) => return StatsResult::failure(e.to_string()),
    };

    let timer = Instant::now();
    let api_url = match clip::api_url(url) {
        Ok(api_url) => api_url,
        Err(e) => {
            return StatsResult::failure(format!("could not parse clip url {url}: {e}"));
        }
    };
    log(&format!("Timer - api_url: {:.2?}", timer.elapsed()));

    let timer = Instant::now();
    let info = match clip::fetch_clip_info(&client, &api_url) {
        Ok(info) => info,
        Err(e) => {
            return StatsResult::failure(format!("could not fetch clip info from {api_url}: {e}"));
        }
    };
    log(&format!("Timer - fetch_clip_info: {:.2?}", timer.elapsed()));
    if let Some(title) = &info.item.title {
        log(&format!("Clip title: {title}"));
    }

    let timer = Instant::now();
    let mp4 = match clip::download_mp4(&client, &info.item.mp4_url) {
        Ok(mp4) => mp4,
        Err(e) => {
            return StatsResult::failure(format!(
                "could not download clip from {}: {e}",
                info.item.mp4_url
            ));
        }
    };
    log(&format!("Timer - download_mp4: {:.2?}", timer.elapsed()));

    let timer = Instant::now();
    let frame = match video::extract_middle_frame(mp4.path(), config) {
        Ok(frame) => frame,
        Err(e) => {
            return StatsResult::failure(format!("could not extract frame from clip: {e}"));
        }
    };
    log(&format!(
        "Timer - extract_middle_frame: {:.2?}",
        timer.elapsed()
    ));

    analyze_frame(&frame, config, tables)
}

/// Analyzes a single frame: OCRs the header and time regions and decodes
/// them into a result record.
pub fn analyze_frame(
    frame: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    config: &AnalyzerConfig,
    tables: &DecodeTables,
) -> StatsResult {
    let timer = Instant::now();
    let header_bounds = match ocr::scan_region(frame, &config.header_region, config.ocr_threshold)
    {
        Ok(bounds) => bounds,
        Err(e) => {
            return StatsResult::failure(format!("error reading header region: {e}"));
        }
    };
    log(&format!(
        "Timer - header OCR: {:.2?} ({} lines)",
        timer.elapsed(),
        header_bounds.len()
    ));

    // A failed time-region scan degrades to an absent time, it does not
    // abort the header decode.
    let timer = Instant::now();
    let mut time_scan_error = None;
    let time_bounds = match ocr::scan_region(frame, &config.time_region, config.ocr_threshold) {
        Ok(bounds) => Some(bounds),
        Err(e) => {
            time_scan_error = Some(format!("error reading time region: {e}"));
            None
        }
    };
    log(&format!("Timer - time OCR: {:.2?}", timer.elapsed()));

    let mut result = decode::assemble(&header_bounds, time_bounds.as_deref(), &tables.maps);
    if let Some(diagnostic) = time_scan_error {
        result.push_message(&diagnostic);
    }

    if let Some(map) = &result.map {
        match fields::is_deathmatch(&tables.modes, map) {
            Ok(true) => log(&format!("Map {map} is a deathmatch map")),
            Ok(false) => log(&format!("Map {map} is a standard-run map")),
            Err(e) => log(&format!("Mode classification unavailable: {e}")),
        }
    }

    result
}
