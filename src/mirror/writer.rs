//! Mirror Writer
//!
//! Replaces the mirror file in full on every save.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StockError};
use crate::record::Record;

use super::codec::{encode_line, trailer_line};

/// Writes mirror files atomically
///
/// The full content is written to `{path}.tmp`, optionally fsynced, and then
/// renamed over `path`. Readers see either the old file or the new one.
pub struct MirrorWriter {
    path: PathBuf,
    tmp_path: PathBuf,
    fsync: bool,
}

impl MirrorWriter {
    /// Create a writer for the given mirror path
    pub fn new(path: &Path, fsync: bool) -> Result<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            StockError::Config(format!("mirror path has no file name: {}", path.display()))
        })?;

        let mut tmp_name = OsString::from(file_name);
        tmp_name.push(".tmp");

        Ok(Self {
            path: path.to_path_buf(),
            tmp_path: path.with_file_name(tmp_name),
            fsync,
        })
    }

    /// Write every record, in order, followed by the checksum trailer
    ///
    /// Returns the number of records written.
    pub fn write_all<'a, I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut body = String::new();
        let mut count = 0;
        for record in records {
            body.push_str(&encode_line(record));
            count += 1;
        }
        let trailer = trailer_line(crc32fast::hash(body.as_bytes()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if let Err(e) = self.write_tmp(body.as_bytes(), trailer.as_bytes()) {
            let _ = fs::remove_file(&self.tmp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&self.tmp_path, &self.path) {
            let _ = fs::remove_file(&self.tmp_path);
            return Err(e.into());
        }

        Ok(count)
    }

    /// Path of the mirror file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temporary file used during a save
    pub fn tmp_path(&self) -> &Path {
        &self.tmp_path
    }

    fn write_tmp(&self, body: &[u8], trailer: &[u8]) -> Result<()> {
        let mut file = File::create(&self.tmp_path)?;
        file.write_all(body)?;
        file.write_all(trailer)?;
        file.flush()?;
        if self.fsync {
            file.sync_all()?;
        }
        Ok(())
    }
}
