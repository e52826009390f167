//! Issue creation response parsing.
//!
//! The v2 API answers issue creation with a loosely structured YAML block:
//!
//! ```text
//! ---
//! issue:
//!   number: 12
//!   votes: 0
//!   ...
//! ```
//!
//! Only the issue number is needed, and it is located by scanning for the
//! literal `number: ` marker. This is the only code aware of that format.

use super::ResponseParseError;

/// Marker preceding the issue number.
const NUMBER_MARKER: &str = "number: ";

/// Extracts the issue number from an issue creation response body.
///
/// The number is the text following the first `number: ` up to the next line
/// break or the end of the body, with surrounding whitespace removed.
///
/// # Errors
///
/// Returns [`ResponseParseError`] if the marker is absent or has no value.
pub fn parse_issue_number(body: &str) -> Result<String, ResponseParseError> {
    let start = body
        .find(NUMBER_MARKER)
        .ok_or_else(|| ResponseParseError::MissingMarker {
            body: body.to_string(),
        })?
        + NUMBER_MARKER.len();

    let rest = &body[start..];
    let number = rest.lines().next().unwrap_or_default().trim();

    if number.is_empty() {
        return Err(ResponseParseError::EmptyNumber {
            body: body.to_string(),
        });
    }
    Ok(number.to_string())
}
