//! Elapsed-time cleanup for OCR output.

use regex::Regex;
use std::sync::OnceLock;

/// First signed or unsigned decimal number, integer or fractional.
fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-+]?(?:\d*\.\d+|\d+)").unwrap())
}

/// Substitutes the letter `o` with the digit `0` wherever it sits inside a
/// digit run ("1o2" -> "102", "1oo2" -> "1002"). Restricting the
/// substitution to digit neighbors keeps ordinary words intact, so text
/// like "no numbers" does not grow a spurious zero.
fn substitute_o_in_digit_runs(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut digit_like: Vec<bool> = chars.iter().map(|c| c.is_ascii_digit()).collect();

    // Grow digit runs across adjacent o's until stable.
    loop {
        let mut changed = false;
        for i in 0..chars.len() {
            if chars[i] == 'o' && !digit_like[i] {
                let before = i > 0 && digit_like[i - 1];
                let after = i + 1 < chars.len() && digit_like[i + 1];
                if before || after {
                    digit_like[i] = true;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    chars
        .iter()
        .zip(&digit_like)
        .map(|(&c, &digit)| if c == 'o' && digit { '0' } else { c })
        .collect()
}

/// Cleans a recognized elapsed-time string into seconds.
///
/// Corrects the `o`/`0` OCR confusion inside digit runs, then extracts the
/// first decimal number and returns its absolute value. Never fails on
/// malformed input - no number means absent.
pub fn clean_time(raw: &str) -> Option<f64> {
    let cleaned = substitute_o_in_digit_runs(raw);
    let matched = number_regex().find(&cleaned)?;
    matched.as_str().parse::<f64>().ok().map(f64::abs)
}
