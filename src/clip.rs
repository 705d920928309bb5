//! Clip metadata retrieval and mp4 download.
//!
//! A share URL's last path segment is the clip id; the hosting service's
//! API returns a JSON record pointing at the mp4. Both calls are plain
//! blocking HTTP and either succeed fully or surface a single error.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const API_BASE: &str = "https://api.gfycat.com/v1/gfycats/";
const USER_AGENT: &str = "surf-stats";

/// Metadata record returned by the clip API. Only the fields the pipeline
/// consumes are modeled.
#[derive(Debug, Deserialize)]
pub struct ClipInfo {
    #[serde(rename = "gfyItem")]
    pub item: ClipItem,
}

#[derive(Debug, Deserialize)]
pub struct ClipItem {
    #[serde(rename = "mp4Url")]
    pub mp4_url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Builds the blocking HTTP client shared by the metadata fetch and the
/// mp4 download.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(300))
        .build()
        .context("failed to build HTTP client")
}

/// Converts a shareable clip URL to its API metadata URL. The clip id is
/// the last path segment.
pub fn api_url(share_url: &str) -> Result<String> {
    let id = share_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| anyhow!("unsupported clip URL format: {share_url}"))?;
    Ok(format!("{API_BASE}{id}"))
}

/// Fetches the clip metadata record.
pub fn fetch_clip_info(client: &Client, url: &str) -> Result<ClipInfo> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .with_context(|| format!("failed to reach clip api at {url}"))?;

    if !response.status().is_success() {
        return Err(anyhow!("clip api returned HTTP {}", response.status()));
    }

    let body = response.text().context("failed to read clip api response")?;
    serde_json::from_str(&body).context("unexpected clip api response shape")
}

/// Downloads the clip's mp4 into a temporary file.
pub fn download_mp4(client: &Client, url: &str) -> Result<NamedTempFile> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .with_context(|| format!("failed to download clip from {url}"))?;

    if !response.status().is_success() {
        return Err(anyhow!("clip download returned HTTP {}", response.status()));
    }

    let bytes = response.bytes().context("failed to read clip body")?;
    let mut file = NamedTempFile::with_suffix(".mp4")?;
    file.write_all(&bytes)?;

    crate::log(&format!("Downloaded clip ({} bytes)", bytes.len()));
    Ok(file)
}
