//! Mirror File Module
//!
//! Flat-file persistence for the inventory store.
//!
//! ## Responsibilities
//! - Encode records as escaped, comma-separated lines
//! - CRC32 trailer for torn-write and corruption detection
//! - Replace the file atomically (temp file + rename)
//! - Read legacy files that predate escaping and the trailer
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ A1,Widget,10,2.5                           │
//! │ B7,Nuts\, bolts and washers,250,0.05       │
//! │ ...  (one record per line, insertion order)│
//! ├────────────────────────────────────────────┤
//! │ #crc32=1c291ca3                            │
//! │ (CRC32 of every byte above this line)      │
//! └────────────────────────────────────────────┘
//! ```
//!
//! Escapes inside `id` and `name`: `\\`, `\,`, `\#`, `\n`, `\r`.

mod codec;
mod reader;
mod writer;

pub use codec::{decode_line, encode_line, escape_field, trailer_line, TRAILER_PREFIX};
pub use reader::{MirrorReader, ReadSummary};
pub use writer::MirrorWriter;
