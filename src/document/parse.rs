//! Document parsing.
//!
//! Parsing is lenient: a section that does not have the expected framing is
//! reported as a [`ParseSkip`] instead of failing the whole document.

use super::{Record, FENCE, HEADING_PREFIX};
use std::fmt;

/// Why a section of the document produced no file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The heading is not followed by an opening fence line
    MissingFence,
    /// The heading line carries no path
    EmptyPath,
    /// The path would resolve outside the restore root
    UnsafePath,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFence => write!(f, "no opening fence after heading"),
            SkipReason::EmptyPath => write!(f, "heading has no path"),
            SkipReason::UnsafePath => write!(f, "path escapes the output directory"),
        }
    }
}

/// A section that was dropped, with the heading text it started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSkip {
    pub heading: String,
    pub reason: SkipReason,
}

impl fmt::Display for ParseSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped '{}': {}", self.heading, self.reason)
    }
}

/// Split a document into records.
///
/// Sections start at every line beginning with `### `; anything before the
/// first heading is discarded. Each outcome is independent, so a malformed
/// section never hides the well-formed ones after it.
pub fn parse_document(document: &[u8]) -> Vec<Result<Record, ParseSkip>> {
    let starts = heading_starts(document);
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let body_start = start + HEADING_PREFIX.len();
            let end = starts.get(i + 1).copied().unwrap_or(document.len());
            parse_section(&document[body_start..end])
        })
        .collect()
}

/// Parse one section (the bytes after `### ` up to the next heading).
pub fn parse_section(section: &[u8]) -> Result<Record, ParseSkip> {
    let Some((fence_at, content_start)) = find_opening_fence(section) else {
        return Err(ParseSkip {
            heading: first_line(section),
            reason: SkipReason::MissingFence,
        });
    };

    let path = String::from_utf8_lossy(&section[..fence_at]).trim().to_string();
    if path.is_empty() {
        return Err(ParseSkip {
            heading: first_line(section),
            reason: SkipReason::EmptyPath,
        });
    }

    let rest = &section[content_start..];
    let content = match find_closing_fence(rest) {
        Some(end) => {
            let body = &rest[..end];
            body.strip_suffix(b"\n").unwrap_or(body)
        }
        None => rest,
    };

    Ok(Record {
        path,
        content: content.to_vec(),
    })
}

/// Offsets of every `### ` that begins a line.
fn heading_starts(document: &[u8]) -> Vec<usize> {
    let prefix = HEADING_PREFIX.as_bytes();
    (0..document.len())
        .filter(|&i| (i == 0 || document[i - 1] == b'\n') && document[i..].starts_with(prefix))
        .collect()
}

/// Locate the first line consisting only of the fence.
///
/// Returns the offset of the newline that ends the path part and the offset
/// where content begins. A trailing `\r` on the fence line is tolerated.
fn find_opening_fence(section: &[u8]) -> Option<(usize, usize)> {
    let fence = FENCE.as_bytes();
    let mut from = 0;
    while let Some(pos) = find(&section[from..], b"\n").map(|p| p + from) {
        let line_start = pos + 1;
        let after = &section[line_start..];
        if after.starts_with(fence) {
            let tail = &after[fence.len()..];
            if tail.starts_with(b"\n") {
                return Some((pos, line_start + fence.len() + 1));
            }
            if tail.starts_with(b"\r\n") {
                return Some((pos, line_start + fence.len() + 2));
            }
        }
        from = line_start;
    }
    None
}

/// Offset of the first fence that begins a line of `content`.
fn find_closing_fence(content: &[u8]) -> Option<usize> {
    let fence = FENCE.as_bytes();
    if content.starts_with(fence) {
        return Some(0);
    }
    let mut marker = Vec::with_capacity(fence.len() + 1);
    marker.push(b'\n');
    marker.extend_from_slice(fence);
    find(content, &marker).map(|p| p + 1)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn first_line(section: &[u8]) -> String {
    let line = section.split(|&b| b == b'\n').next().unwrap_or_default();
    String::from_utf8_lossy(line).trim().to_string()
}
