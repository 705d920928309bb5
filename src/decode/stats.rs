//! Assembly of the final stats record from recognized text.
//!
//! The assembler never aborts on a sub-stage failure: each stage's
//! diagnostic is appended to a cumulative message while fields recovered
//! by earlier stages are kept. Partial results are the expected common
//! case, not an anomaly.

use serde::Serialize;

use super::fields::Gamemode;
use super::table::EncodingTable;
use super::{header, time, vsgm};

/// A recognized text fragment with its quadrilateral bounding box, as
/// produced by the OCR layer. Corners run clockwise from top-left.
#[derive(Debug, Clone)]
pub struct TextBound {
    pub text: String,
    pub quad: [[f32; 2]; 4],
    pub confidence: f32,
}

/// The externally visible result record. Every field is explicitly set
/// (to a value or absent); failures surface in `message`, never as a
/// missing shape.
#[derive(Debug, Default, Clone, Serialize)]
pub struct StatsResult {
    pub version: Option<String>,
    pub season: Option<u32>,
    pub gamemode: Option<Gamemode>,
    pub map: Option<String>,
    pub time: Option<f64>,
    pub message: Option<String>,
}

impl StatsResult {
    /// A result that carries nothing but a diagnostic message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Appends a diagnostic to the cumulative message.
    pub fn push_message(&mut self, diagnostic: &str) {
        match &mut self.message {
            Some(message) => {
                message.push_str("; ");
                message.push_str(diagnostic);
            }
            None => self.message = Some(diagnostic.to_string()),
        }
    }
}

/// Decodes the header region's OCR output (and, when supplied, a second
/// region's output for the elapsed time) into a [`StatsResult`].
pub fn assemble(
    header_bounds: &[TextBound],
    time_bounds: Option<&[TextBound]>,
    maps: &EncodingTable,
) -> StatsResult {
    let mut result = StatsResult::default();

    match header::locate_header(header_bounds) {
        Some(line) => {
            let (parsed, diagnostic) = vsgm::parse_header(line, maps);
            result.version = parsed.version;
            result.season = parsed.season;
            result.gamemode = parsed.gamemode;
            result.map = parsed.map;
            if let Some(diagnostic) = diagnostic {
                result.push_message(&diagnostic);
            }
        }
        None => {
            result.push_message("could not locate version, season, gamemode, map header");
        }
    }

    if let Some(bounds) = time_bounds {
        result.time = bounds.iter().find_map(|b| time::clean_time(&b.text));
        if result.time.is_none() {
            result.push_message("no elapsed time found in time region");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(text: &str) -> TextBound {
        TextBound {
            text: text.to_string(),
            quad: [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            confidence: 90.0,
        }
    }

    fn maps() -> EncodingTable {
        EncodingTable::parse("Lijiang Tower, lt\nBusan, bu\n").unwrap()
    }

    #[test]
    fn test_assemble_empty_input() {
        let result = assemble(&[], None, &maps());
        assert_eq!(result.version, None);
        assert_eq!(result.season, None);
        assert_eq!(result.gamemode, None);
        assert_eq!(result.map, None);
        assert_eq!(result.time, None);
        let message = result.message.expect("missing header must be reported");
        assert!(message.contains("header"), "got: {message}");
    }

    #[test]
    fn test_assemble_happy_path() {
        let header = [bound("lucio surf v1.23 4glt")];
        let times = [bound("1o2.45s")];
        let result = assemble(&header, Some(&times), &maps());
        assert_eq!(result.season, Some(4));
        assert_eq!(result.gamemode, Some(Gamemode::Gravspeed));
        assert_eq!(result.map.as_deref(), Some("Lijiang Tower"));
        assert_eq!(result.time, Some(102.45));
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_assemble_unknown_map_keeps_fields() {
        let header = [bound("lucio surf v1.23 4gzz")];
        let result = assemble(&header, None, &maps());
        assert_eq!(result.season, Some(4));
        assert_eq!(result.gamemode, Some(Gamemode::Gravspeed));
        assert_eq!(result.map, None);
        assert!(result.message.unwrap().contains("zz"));
    }

    #[test]
    fn test_assemble_collects_multiple_diagnostics() {
        let header = [bound("lucio surf v1.23 4gzz")];
        let times = [bound("no digits")];
        let result = assemble(&header, Some(&times), &maps());
        // Header fields survive, and both failures land in one message.
        assert_eq!(result.season, Some(4));
        let message = result.message.unwrap();
        assert!(message.contains("zz"), "got: {message}");
        assert!(message.contains("elapsed time"), "got: {message}");
    }

    #[test]
    fn test_assemble_time_region_not_supplied() {
        let header = [bound("lucio surf v1.23 4glt")];
        let result = assemble(&header, None, &maps());
        assert_eq!(result.time, None);
        // No time region was requested, so its absence is not a failure.
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_assemble_first_time_candidate_wins() {
        let header = [bound("lucio surf v1.23 4glt")];
        let times = [bound("noise"), bound("87.42"), bound("99.99")];
        let result = assemble(&header, Some(&times), &maps());
        assert_eq!(result.time, Some(87.42));
    }

    #[test]
    fn test_failure_and_push_message() {
        let mut result = StatsResult::failure("first");
        result.push_message("second");
        assert_eq!(result.message.as_deref(), Some("first; second"));
    }
}
