//! Mirror Reader
//!
//! Reads and validates a whole mirror file in one pass.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Result, StockError};
use crate::record::Record;

use super::codec::{decode_line, TRAILER_PREFIX};

/// Reads mirror files
pub struct MirrorReader;

/// Result of reading a mirror file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadSummary {
    /// Number of records decoded
    pub records: usize,

    /// Blank lines that were skipped
    pub blank_lines: usize,

    /// Whether a checksum trailer was present (and matched)
    pub checksum_verified: bool,
}

impl MirrorReader {
    /// Read every record from a mirror file, in file order
    ///
    /// All-or-nothing: any malformed line, duplicate id or checksum mismatch
    /// fails the whole read.
    pub fn read(path: &Path) -> Result<(Vec<Record>, ReadSummary)> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| StockError::Corruption(format!("mirror is not valid UTF-8: {}", e)))?;

        Self::parse(&content)
    }

    /// Check a mirror file without keeping the records
    pub fn verify(path: &Path) -> Result<ReadSummary> {
        Self::read(path).map(|(_, summary)| summary)
    }

    /// Parse mirror content already held in memory
    pub fn parse(content: &str) -> Result<(Vec<Record>, ReadSummary)> {
        let (body, checksum_verified) = split_trailer(content)?;

        let mut summary = ReadSummary {
            checksum_verified,
            ..ReadSummary::default()
        };
        let mut records = Vec::new();
        let mut seen = HashSet::new();

        for (index, line) in body.lines().enumerate() {
            let line_no = index + 1;

            if line.trim().is_empty() {
                summary.blank_lines += 1;
                continue;
            }

            let record = decode_line(line, line_no)?;
            if !seen.insert(record.id().to_string()) {
                return Err(StockError::malformed(
                    line_no,
                    format!("duplicate id {}", record.id()),
                ));
            }

            tracing::trace!(line = line_no, id = record.id(), "decoded mirror line");
            records.push(record);
        }

        summary.records = records.len();
        Ok((records, summary))
    }
}

/// Separate the body from an optional checksum trailer and verify it
///
/// The trailer, when present, is the last non-blank line.
fn split_trailer(content: &str) -> Result<(&str, bool)> {
    let end = content.trim_end().len();
    let last_start = content[..end].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let last_line = &content[last_start..end];

    let Some(hex) = last_line.strip_prefix(TRAILER_PREFIX) else {
        return Ok((content, false));
    };

    let expected = u32::from_str_radix(hex.trim(), 16)
        .map_err(|_| StockError::Corruption(format!("unreadable checksum trailer {:?}", last_line)))?;

    let body = &content[..last_start];
    let actual = crc32fast::hash(body.as_bytes());
    if actual != expected {
        return Err(StockError::Corruption(format!(
            "checksum mismatch: trailer says {:08x}, content hashes to {:08x}",
            expected, actual
        )));
    }

    Ok((body, true))
}
