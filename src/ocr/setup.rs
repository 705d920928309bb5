use anyhow::{anyhow, Result};
use std::path::PathBuf;

use crate::log;

/// Returns the directory where a user-managed Tesseract install may live:
/// `<local data dir>/surf-stats/tesseract/`.
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("surf-stats")
        .join("tesseract")
}

/// Checks that Tesseract is reachable and logs where it was found.
/// Returns an error with install guidance when it is not.
pub fn ensure_tesseract() -> Result<PathBuf> {
    let exe = find_tesseract_executable()?;
    log(&format!("Tesseract found at: {}", exe.display()));
    Ok(exe)
}

/// Finds the Tesseract executable: the local install dir first, then PATH,
/// then the usual install locations.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    let exe_name = if cfg!(windows) {
        "tesseract.exe"
    } else {
        "tesseract"
    };

    let local_exe = get_tesseract_dir().join(exe_name);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    // Check PATH
    if let Ok(output) = std::process::Command::new("tesseract")
        .arg("--version")
        .output()
    {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    // Check common paths
    let common_paths = [
        r"C:\Program Files\Tesseract-OCR\tesseract.exe",
        r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
        "/usr/bin/tesseract",
        "/usr/local/bin/tesseract",
        "/opt/homebrew/bin/tesseract",
    ];

    for path in &common_paths {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install Tesseract-OCR and make sure it is on PATH, \
         or place it under {}",
        get_tesseract_dir().display()
    ))
}

/// Finds an explicit tessdata directory, if one is needed. System installs
/// usually carry their own, so `None` means let Tesseract use its default.
pub fn find_tessdata_dir() -> Option<PathBuf> {
    let local_tessdata = get_tesseract_dir().join("tessdata");
    if local_tessdata.join("eng.traineddata").exists() {
        return Some(local_tessdata);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join("eng.traineddata").exists() {
            return Some(p);
        }
        let p = PathBuf::from(&prefix).join("tessdata");
        if p.join("eng.traineddata").exists() {
            return Some(p);
        }
    }

    None
}
