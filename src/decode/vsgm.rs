//! Positional parsing of the located header line.
//!
//! After stripping whitespace the header packs its fields at fixed
//! positions: the last four characters are `<season><gamemode><map[0]><map[1]>`
//! and the version runs from the first `v` up to (not including) the last
//! five characters. The character at position -5 separates version from
//! the encoded fields and is discarded.

use super::fields::{self, Gamemode};
use super::table::EncodingTable;

/// Fields recovered from the header line. All independently optional;
/// a partial decode is a common, valid outcome.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedHeader {
    pub version: Option<String>,
    pub season: Option<u32>,
    pub gamemode: Option<Gamemode>,
    pub map: Option<String>,
}

/// Slices the header into version/season/gamemode/map tokens and decodes
/// them. Returns the parsed fields plus an optional diagnostic.
///
/// A header that is too short to slice (fewer than 5 characters once
/// whitespace is stripped) or that contains no `v` is malformed: all four
/// fields come back absent with a diagnostic. This is a distinct condition
/// from the header not being found at all.
pub fn parse_header(header: &str, maps: &EncodingTable) -> (ParsedHeader, Option<String>) {
    let chars: Vec<char> = header.chars().filter(|c| !c.is_whitespace()).collect();
    let n = chars.len();

    let v_pos = match chars.iter().position(|&c| c == 'v') {
        Some(pos) if n >= 5 => pos,
        _ => {
            let diag = format!(
                "malformed header {header:?}: expected `v<version> <season><mode><map>`"
            );
            return (ParsedHeader::default(), Some(diag));
        }
    };

    let season_token: String = chars[n - 4].to_string();
    let mode_token: String = chars[n - 3].to_string();
    let map_token: String = chars[n - 2..].iter().collect();

    let version: String = if v_pos < n - 5 {
        chars[v_pos..n - 5].iter().collect()
    } else {
        String::new()
    };

    let mut parsed = ParsedHeader {
        version: (!version.is_empty()).then_some(version),
        season: fields::decode_season(&season_token),
        gamemode: fields::decode_gamemode(&mode_token),
        map: None,
    };

    let mut diagnostic = None;
    match fields::decode_map(maps, &map_token) {
        Ok(name) => parsed.map = Some(name),
        Err(e) => diagnostic = Some(e.to_string()),
    }

    (parsed, diagnostic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps() -> EncodingTable {
        EncodingTable::parse("Lijiang Tower, lt\nBusan, bu\nOasis, oa\n").unwrap()
    }

    #[test]
    fn test_parse_header_basic() {
        let (parsed, diag) = parse_header("lucio surf v1.23 4glt", &maps());
        assert_eq!(diag, None);
        assert_eq!(parsed.season, Some(4));
        assert_eq!(parsed.gamemode, Some(Gamemode::Gravspeed));
        assert_eq!(parsed.map.as_deref(), Some("Lijiang Tower"));
        // Version runs from 'v' to the -5 boundary of the stripped string;
        // the character at -5 is the separator and is dropped.
        assert_eq!(parsed.version.as_deref(), Some("v1.2"));
    }

    #[test]
    fn test_parse_header_whitespace_stripped() {
        let (spaced, _) = parse_header("lucio surf v1.23 4 g lt", &maps());
        let (packed, _) = parse_header("luciosurfv1.234glt", &maps());
        assert_eq!(spaced, packed);
    }

    #[test]
    fn test_parse_header_season_confusion() {
        // OCR read the season digit 4 as 'h'.
        let (parsed, diag) = parse_header("lucio surf v1.23 hsbu", &maps());
        assert_eq!(diag, None);
        assert_eq!(parsed.season, Some(4));
        assert_eq!(parsed.gamemode, Some(Gamemode::Standard));
        assert_eq!(parsed.map.as_deref(), Some("Busan"));
    }

    #[test]
    fn test_parse_header_unknown_map_keeps_other_fields() {
        let (parsed, diag) = parse_header("lucio surf v1.23 4gzz", &maps());
        assert_eq!(parsed.season, Some(4));
        assert_eq!(parsed.gamemode, Some(Gamemode::Gravspeed));
        assert_eq!(parsed.map, None);
        let diag = diag.expect("unknown map should produce a diagnostic");
        assert!(diag.contains("zz"), "got: {diag}");
    }

    #[test]
    fn test_parse_header_too_short() {
        let (parsed, diag) = parse_header("v4gl", &maps());
        assert_eq!(parsed, ParsedHeader::default());
        assert!(diag.unwrap().contains("malformed header"));
    }

    #[test]
    fn test_parse_header_no_v() {
        let (parsed, diag) = parse_header("lucio surf 1.23 4glt", &maps());
        assert_eq!(parsed, ParsedHeader::default());
        assert!(diag.unwrap().contains("malformed header"));
    }

    #[test]
    fn test_round_trip_all_tables() {
        // Every season char x mode char x map token must decode back to
        // the values used to construct the header.
        let maps = maps();
        let season_chars: [(&str, u32); 14] = [
            ("i", 1),
            ("l", 1),
            ("z", 2),
            ("e", 3),
            ("m", 3),
            ("w", 3),
            ("h", 4),
            ("a", 4),
            ("y", 4),
            ("s", 5),
            ("b", 6),
            ("g", 6),
            ("t", 7),
            ("j", 7),
        ];
        let mode_chars: [(&str, Gamemode); 5] = [
            ("g", Gamemode::Gravspeed),
            ("9", Gamemode::Gravspeed),
            ("c", Gamemode::Gravspeed),
            ("s", Gamemode::Standard),
            ("5", Gamemode::Standard),
        ];

        for (season_char, season) in season_chars {
            for (mode_char, mode) in mode_chars {
                for (token, name) in maps.entries() {
                    let header = format!("v123{season_char}{mode_char}{token}");
                    let (parsed, diag) = parse_header(&header, &maps);
                    assert_eq!(diag, None, "header {header:?}");
                    assert_eq!(parsed.season, Some(season), "header {header:?}");
                    assert_eq!(parsed.gamemode, Some(mode), "header {header:?}");
                    assert_eq!(parsed.map.as_deref(), Some(name), "header {header:?}");
                }
            }
        }

        // Numeric season digits round-trip to themselves.
        for season in 1..=7u32 {
            let header = format!("v123{season}slt");
            let (parsed, _) = parse_header(&header, &maps);
            assert_eq!(parsed.season, Some(season));
            assert_eq!(parsed.gamemode, Some(Gamemode::Standard));
            assert_eq!(parsed.map.as_deref(), Some("Lijiang Tower"));
        }
    }
}
