//! Label matching shared by the closed enums.
//!
//! Canonical labels are the display strings used in seed data ("Don't Buy",
//! "Email List"). Parsing also accepts the same label in any case, with
//! apostrophes dropped and `-`/`_` standing in for spaces, so that
//! `dont-buy` and `email_list` resolve on the command line.

use crate::error::ParseEnumError;

fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Resolve `input` against the labels of `variants`.
pub(crate) fn parse_label<T: Copy>(
    kind: &'static str,
    input: &str,
    variants: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, ParseEnumError> {
    if let Some(v) = variants.iter().copied().find(|v| label(*v) == input) {
        return Ok(v);
    }
    let wanted = normalize(input);
    if wanted.is_empty() {
        return Err(ParseEnumError::new(kind, input));
    }
    variants
        .iter()
        .copied()
        .find(|v| normalize(label(*v)) == wanted)
        .ok_or_else(|| ParseEnumError::new(kind, input))
}
