//! Fuzzy location of the HUD header line in OCR output.

use super::stats::TextBound;

/// The phrase that identifies the metadata header line on screen.
pub const HEADER_PHRASE: &str = "lucio surf";

/// Maximum `string_difference` for a candidate to count as the header.
const MAX_DIFFERENCE: usize = 2;

/// Counts the characters of `target` that a sequence alignment against
/// `candidate` would have to insert or substitute. Characters present only
/// in `candidate` (pure deletions) are free, so a candidate that contains
/// the target plus trailing junk still scores 0.
///
/// Equivalent to `target.len() - LCS(candidate, target)`.
pub fn string_difference(candidate: &str, target: &str) -> usize {
    let s: Vec<char> = candidate.chars().collect();
    let t: Vec<char> = target.chars().collect();

    let mut prev = vec![0usize; t.len() + 1];
    let mut curr = vec![0usize; t.len() + 1];

    for &sc in &s {
        for (j, &tc) in t.iter().enumerate() {
            curr[j + 1] = if sc == tc {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    t.len() - prev[t.len()]
}

/// Finds the header line among the recognized text fragments.
///
/// Candidates are tried in the order OCR returned them and the first one
/// within `MAX_DIFFERENCE` of [`HEADER_PHRASE`] wins. This is deliberately
/// first-good-enough rather than best-of: downstream behavior depends on
/// the original first-match semantics, so do not change this to a global
/// minimum.
pub fn locate_header(bounds: &[TextBound]) -> Option<&str> {
    bounds
        .iter()
        .map(|b| b.text.as_str())
        .find(|text| string_difference(text, HEADER_PHRASE) <= MAX_DIFFERENCE)
}
