//! Mirror line codec
//!
//! Encoding and decoding of single mirror lines.
//!
//! ### Line Format
//! ```text
//! <id>,<name>,<quantity>,<price>\n
//! ```
//! `quantity` is a decimal `u32`, `price` uses the shortest round-trip
//! `f64` form, so a decoded value is bit-identical to the encoded one.

use crate::error::{Result, StockError};
use crate::record::Record;

/// Prefix of the checksum trailer line
pub const TRAILER_PREFIX: &str = "#crc32=";

/// Number of comma-separated fields per line
const FIELD_COUNT: usize = 4;

// =============================================================================
// Encoding
// =============================================================================

/// Escape a text field so it survives the line format
pub fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            '#' => out.push_str("\\#"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Encode a record as one line, including the trailing newline
pub fn encode_line(record: &Record) -> String {
    format!(
        "{},{},{},{}\n",
        escape_field(record.id()),
        escape_field(record.name()),
        record.quantity(),
        record.price()
    )
}

/// Build the trailer line for a body with the given checksum
pub fn trailer_line(crc: u32) -> String {
    format!("{}{:08x}\n", TRAILER_PREFIX, crc)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one line (without its line terminator)
///
/// `line_no` is 1-based and only used for error reporting.
pub fn decode_line(line: &str, line_no: usize) -> Result<Record> {
    if line.starts_with('#') {
        return Err(StockError::malformed(line_no, "unexpected comment line"));
    }

    let fields = split_fields(line, line_no)?;
    if fields.len() != FIELD_COUNT {
        return Err(StockError::malformed(
            line_no,
            format!("expected {} fields, got {}", FIELD_COUNT, fields.len()),
        ));
    }

    let quantity = fields[2].trim().parse::<u32>().map_err(|_| {
        StockError::malformed(line_no, format!("invalid quantity {:?}", fields[2]))
    })?;
    let price = fields[3].trim().parse::<f64>().map_err(|_| {
        StockError::malformed(line_no, format!("invalid price {:?}", fields[3]))
    })?;

    Record::new(fields[0].as_str(), fields[1].as_str(), quantity, price)
        .map_err(|e| StockError::malformed(line_no, e.to_string()))
}

/// Split on unescaped commas, resolving escapes as we go
fn split_fields(line: &str, line_no: usize) -> Result<Vec<String>> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = match chars.next() {
                    Some('\\') => '\\',
                    Some(',') => ',',
                    Some('#') => '#',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some(other) => {
                        return Err(StockError::malformed(
                            line_no,
                            format!("unknown escape sequence \\{}", other),
                        ));
                    }
                    None => return Err(StockError::malformed(line_no, "dangling escape")),
                };
                current.push(escaped);
            }
            ',' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    Ok(fields)
}
