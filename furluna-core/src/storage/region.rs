//! Region markers and pure text splicing.
//!
//! A region starts at the first [`OPENING_MARKER`] and ends at the first
//! [`END_MARKER`] after it. One line break directly after the end marker
//! belongs to the region, which makes repeated patches byte-stable.

use crate::config::MissingRegionPolicy;
use crate::storage::PatchAction;

/// Wrapper element that opens the listing region.
pub const OPENING_MARKER: &str = r#"<div id="wrapper">"#;

/// Comment token that closes the listing region.
pub const END_MARKER: &str = "<!-- END OF REPLACEMENT -->";

/// Outcome of searching a page for the listing region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSearch {
    /// Byte range `start..end` covers the whole region, markers included
    Found { start: usize, end: usize },
    /// No opening marker anywhere in the page
    MissingOpening,
    /// Opening marker present, but no end marker follows it
    MissingEnd { opening_end: usize },
}

impl RegionSearch {
    /// Human-readable reason for a missing region.
    pub fn describe(&self) -> Option<String> {
        match self {
            RegionSearch::Found { .. } => None,
            RegionSearch::MissingOpening => Some(format!("opening marker {OPENING_MARKER} not found")),
            RegionSearch::MissingEnd { .. } => Some(format!(
                "end marker {END_MARKER} not found after {OPENING_MARKER}"
            )),
        }
    }
}

/// Finds the listing region in `text`.
pub fn locate_region(text: &str) -> RegionSearch {
    let Some(start) = text.find(OPENING_MARKER) else {
        return RegionSearch::MissingOpening;
    };
    let opening_end = start + OPENING_MARKER.len();

    let Some(offset) = text[opening_end..].find(END_MARKER) else {
        return RegionSearch::MissingEnd { opening_end };
    };
    let mut end = opening_end + offset + END_MARKER.len();

    let rest = &text[end..];
    if rest.starts_with("\r\n") {
        end += 2;
    } else if rest.starts_with('\n') {
        end += 1;
    }

    RegionSearch::Found { start, end }
}

/// Checks that a fragment ends with exactly one end marker.
///
/// # Errors
/// - `String` - Description of the problem
pub fn validate_fragment(fragment: &str) -> Result<(), String> {
    let markers = fragment.matches(END_MARKER).count();
    if markers != 1 {
        return Err(format!(
            "fragment must contain exactly one {END_MARKER}, found {markers}"
        ));
    }
    if !fragment.ends_with(END_MARKER) {
        return Err(format!("fragment must end with {END_MARKER}"));
    }
    Ok(())
}

/// Text that fills a located region.
pub fn region_body(fragment: &str) -> String {
    format!("{OPENING_MARKER}\n{fragment}\n")
}

/// Computes the patched page without touching the filesystem.
///
/// Returns `None` when the region is missing and `policy` is
/// [`MissingRegionPolicy::Fail`]. The fragment must already be validated.
pub fn splice(
    text: &str,
    fragment: &str,
    policy: MissingRegionPolicy,
) -> Option<(String, PatchAction)> {
    match (locate_region(text), policy) {
        (RegionSearch::Found { start, end }, _) => {
            let mut patched = String::with_capacity(text.len() + fragment.len());
            patched.push_str(&text[..start]);
            patched.push_str(&region_body(fragment));
            patched.push_str(&text[end..]);

            let action = if patched == text {
                PatchAction::Unchanged
            } else {
                PatchAction::Replaced
            };
            Some((patched, action))
        }
        (_, MissingRegionPolicy::Fail) => None,
        (RegionSearch::MissingEnd { opening_end }, MissingRegionPolicy::Append) => {
            // Keep the existing wrapper, open the region right inside it
            let start = opening_end - OPENING_MARKER.len();
            let mut patched = String::with_capacity(text.len() + fragment.len() + 2);
            patched.push_str(&text[..start]);
            patched.push_str(&region_body(fragment));
            patched.push_str(&text[opening_end..]);
            Some((patched, PatchAction::Appended))
        }
        (RegionSearch::MissingOpening, MissingRegionPolicy::Append) => {
            let block = format!("{}</div>\n", region_body(fragment));
            let insert_at = text
                .to_ascii_lowercase()
                .rfind("</body>")
                .unwrap_or(text.len());

            let mut patched = String::with_capacity(text.len() + block.len());
            patched.push_str(&text[..insert_at]);
            patched.push_str(&block);
            patched.push_str(&text[insert_at..]);
            Some((patched, PatchAction::Appended))
        }
    }
}
