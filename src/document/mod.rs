//! Document format
//!
//! A document is a flat Markdown file holding one record per file:
//!
//! ````text
//! ### relative/path/to/file
//! ```
//! raw file bytes
//! ```
//!
//! ````
//!
//! Content is written verbatim. Nothing inside it is escaped, so a line in a
//! file that starts with a fence or with `### ` will end that record early when
//! the document is read back.

pub mod parse;

pub use parse::{parse_document, ParseSkip, SkipReason};

use std::io::{self, Write};

/// Prefix of the heading line that starts a record.
pub const HEADING_PREFIX: &str = "### ";

/// Fence line opening and closing a record's content.
pub const FENCE: &str = "```";

/// One file as framed in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// `/`-separated path relative to the snapshot root
    pub path: String,
    pub content: Vec<u8>,
}

impl Record {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Write this record in document framing. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<u64> {
        write_record(writer, &self.path, &self.content)
    }
}

/// Write one framed record. Returns the number of bytes written.
///
/// A newline is always inserted before the closing fence; the parser drops
/// exactly that newline again.
pub fn write_record<W: Write>(writer: &mut W, path: &str, content: &[u8]) -> io::Result<u64> {
    let header = format!("{HEADING_PREFIX}{path}\n{FENCE}\n");
    let trailer = format!("\n{FENCE}\n\n");
    writer.write_all(header.as_bytes())?;
    writer.write_all(content)?;
    writer.write_all(trailer.as_bytes())?;
    Ok((header.len() + content.len() + trailer.len()) as u64)
}

/// Render a whole document in memory.
pub fn render_document<'a, I>(records: I) -> io::Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = Vec::new();
    for record in records {
        record.write_to(&mut out)?;
    }
    Ok(out)
}
