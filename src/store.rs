//! Store Module
//!
//! The inventory store: an ordered list of records mirrored to a flat file.
//!
//! ## Responsibilities
//! - Enforce one record per id
//! - Linear-scan add/remove/update/search/list
//! - Hydrate from the mirror file on open
//! - Save on request, or after every mutation with `autosave`

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::command::{Command, Outcome, UpdateFields};
use crate::config::Config;
use crate::error::{Result, StockError};
use crate::mirror::{MirrorReader, MirrorWriter};
use crate::record::{validate_price, Record};

/// In-memory inventory with a flat-file mirror
///
/// Records keep insertion order. Every lookup is a linear scan; the store is
/// meant for hand-maintained inventories, not bulk data.
pub struct InventoryStore {
    /// Store configuration
    config: Config,

    /// Records in insertion order
    records: Vec<Record>,

    /// Set by mutations, cleared by load/save
    dirty: bool,

    /// The mirror on disk could not be read; back it up before overwriting
    unreadable_mirror: bool,
}

impl InventoryStore {
    /// Open a store and hydrate it from the mirror file
    ///
    /// A missing or unreadable mirror is not an error here: the store starts
    /// empty and the reason is logged. Only an invalid config fails. An
    /// unreadable mirror is copied to `{data_file}.bak` before the first save
    /// overwrites it.
    pub fn open(config: Config) -> Result<Self> {
        let mut store = Self::empty(config)?;

        match store.load() {
            Ok(count) => {
                tracing::info!(
                    "Loaded {} records from {}",
                    count,
                    store.config.data_file.display()
                );
            }
            Err(e) if e.is_missing_file() => {
                tracing::info!(
                    "No mirror at {}, starting with an empty inventory",
                    store.config.data_file.display()
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring mirror {}: {}. Starting with an empty inventory",
                    store.config.data_file.display(),
                    e
                );
            }
        }

        Ok(store)
    }

    /// Open a store, failing if an existing mirror cannot be read
    ///
    /// A missing mirror still yields an empty store.
    pub fn open_strict(config: Config) -> Result<Self> {
        let mut store = Self::empty(config)?;

        match store.load() {
            Ok(_) => Ok(store),
            Err(e) if e.is_missing_file() => Ok(store),
            Err(e) => Err(e),
        }
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified mirror file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    /// Replace the in-memory records with the mirror's content
    ///
    /// All-or-nothing: on error the store is left empty.
    pub fn load(&mut self) -> Result<usize> {
        self.records.clear();
        self.dirty = false;

        let (records, summary) = match MirrorReader::read(&self.config.data_file) {
            Ok(read) => read,
            Err(e) => {
                self.unreadable_mirror = !e.is_missing_file();
                return Err(e);
            }
        };
        self.unreadable_mirror = false;
        if !summary.checksum_verified && !records.is_empty() {
            tracing::debug!("Mirror has no checksum trailer, read as legacy format");
        }

        self.records = records;
        Ok(self.records.len())
    }

    /// Write every record to the mirror file, replacing it
    ///
    /// If the mirror could not be read when last loaded, it is first copied
    /// to `{data_file}.bak`.
    pub fn save(&mut self) -> Result<usize> {
        if self.unreadable_mirror && self.config.data_file.exists() {
            let backup = self.backup_path();
            fs::copy(&self.config.data_file, &backup)?;
            tracing::warn!(
                "Kept unreadable mirror {} as {}",
                self.config.data_file.display(),
                backup.display()
            );
        }
        self.unreadable_mirror = false;

        let writer = MirrorWriter::new(&self.config.data_file, self.config.fsync_on_save)?;
        let count = writer.write_all(&self.records)?;
        self.dirty = false;

        tracing::info!(
            "Saved {} records to {}",
            count,
            self.config.data_file.display()
        );
        Ok(count)
    }

    /// Append a record; fails with `Duplicate` if the id exists
    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.position(record.id()).is_some() {
            return Err(StockError::Duplicate(record.id().to_string()));
        }

        tracing::debug!(id = record.id(), "add");
        self.records.push(record);
        self.mark_dirty()
    }

    /// Remove and return the record with the given id
    pub fn remove(&mut self, id: &str) -> Result<Record> {
        let index = self
            .position(id)
            .ok_or_else(|| StockError::NotFound(id.to_string()))?;

        let removed = self.records.remove(index);
        tracing::debug!(id, "remove");
        self.mark_dirty()?;
        Ok(removed)
    }

    /// Overwrite the supplied fields of the record with the given id
    ///
    /// Validation happens before any field changes, so a rejected price
    /// leaves the quantity untouched too.
    pub fn update(&mut self, id: &str, changes: UpdateFields) -> Result<&Record> {
        let index = self
            .position(id)
            .ok_or_else(|| StockError::NotFound(id.to_string()))?;

        let price = changes.price.map(validate_price).transpose()?;

        let record = &mut self.records[index];
        if let Some(quantity) = changes.quantity {
            record.set_quantity(quantity);
        }
        if let Some(price) = price {
            record.set_price(price)?;
        }

        tracing::debug!(id, ?changes, "update");
        if !changes.is_empty() {
            self.mark_dirty()?;
        }
        Ok(&self.records[index])
    }

    /// Every record whose name contains `term`, ignoring case
    pub fn search_by_name(&self, term: &str) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.name_contains(term))
            .cloned()
            .collect()
    }

    /// Iterate over every record in insertion order
    pub fn list_all(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.position(id).map(|index| &self.records[index])
    }

    /// Execute a command
    ///
    /// Routes commands to the matching operation
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        tracing::trace!(command = command.name(), "execute");

        match command {
            Command::Add(record) => {
                let added = record.clone();
                self.add(record)?;
                Ok(Outcome::Added(added))
            }
            Command::Remove { id } => self.remove(&id).map(Outcome::Removed),
            Command::Update { id, changes } => {
                self.update(&id, changes).map(|r| Outcome::Updated(r.clone()))
            }
            Command::Search { term } => Ok(Outcome::Found(self.search_by_name(&term))),
            Command::List => Ok(Outcome::Listed(self.records.clone())),
            Command::Save => self.save().map(Outcome::Saved),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when there are changes not yet written to the mirror
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sum of quantity × price over every record
    pub fn total_value(&self) -> f64 {
        self.records.iter().map(Record::value).sum()
    }

    /// Get the mirror file path
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Where an unreadable mirror is kept before it is overwritten
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.config.data_file.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn empty(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            records: Vec::new(),
            dirty: false,
            unreadable_mirror: false,
        })
    }

    /// Ids are stored trimmed, so lookups trim too
    fn position(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        self.records.iter().position(|r| r.id() == id)
    }

    fn mark_dirty(&mut self) -> Result<()> {
        self.dirty = true;
        if self.config.autosave {
            self.save()?;
        }
        Ok(())
    }
}
