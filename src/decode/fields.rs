//! Single-token field decoders for the HUD header.
//!
//! The header encodes season, gamemode and map as 1-2 character tokens.
//! OCR regularly confuses visually similar glyphs, so each decoder carries
//! a small disambiguation table. Tokens outside the known sets decode to
//! `None` - absence is normal control flow here, not an error.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt;

use super::table::EncodingTable;

/// The two race formats. `Display` and `Serialize` both produce the
/// canonical names shown to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Gamemode {
    Gravspeed,
    Standard,
}

impl fmt::Display for Gamemode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gamemode::Gravspeed => write!(f, "Gravspeed"),
            Gamemode::Standard => write!(f, "Standard"),
        }
    }
}

/// Decodes a season token to a season number in 1..=7.
///
/// Purely numeric tokens are parsed directly but only accepted inside the
/// valid season range. Single letters go through the OCR confusion table
/// (the OCR layer lowercases its output, so only lowercase letters appear).
pub fn decode_season(token: &str) -> Option<u32> {
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse::<u32>().ok().filter(|n| (1..=7).contains(n));
    }

    match token {
        "i" | "l" => Some(1),
        "z" => Some(2),
        "e" | "m" | "w" => Some(3),
        "h" | "a" | "y" => Some(4),
        "s" => Some(5),
        "b" | "g" => Some(6),
        "t" | "j" => Some(7),
        _ => None,
    }
}

/// Decodes a gamemode token, case-insensitively.
pub fn decode_gamemode(token: &str) -> Option<Gamemode> {
    match token.to_lowercase().as_str() {
        "g" | "9" | "c" => Some(Gamemode::Gravspeed),
        "s" | "5" => Some(Gamemode::Standard),
        _ => None,
    }
}

/// Decodes a 2-character map token against the map encoding table.
///
/// Substitutes the digit `0` with the letter `o` first (the most common
/// OCR confusion in these tokens). A miss is a reported error carrying
/// the offending token, not a crash.
pub fn decode_map(maps: &EncodingTable, token: &str) -> Result<String> {
    let token = token.replace('0', "o");
    maps.get(&token)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("unknown map token \"{token}\""))
}

/// Classifies a decoded map name via the mode-class table.
///
/// The table maps map display names to a mode class; a map is a
/// deathmatch map when its class is exactly "deathmatch". A missing
/// entry is a reported error carrying the map name.
pub fn is_deathmatch(modes: &EncodingTable, map_name: &str) -> Result<bool> {
    modes
        .get(map_name)
        .map(|class| class == "deathmatch")
        .ok_or_else(|| anyhow!("no mode class entry for map \"{map_name}\""))
}
