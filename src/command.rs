//! Command definitions
//!
//! Store operations as values, so every surface (menu, one-shot CLI, tests)
//! routes through `InventoryStore::execute` the same way.

use crate::record::Record;

/// Fields to overwrite on update; `None` leaves the field untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdateFields {
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

impl UpdateFields {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            price: None,
        }
    }

    pub fn price(price: f64) -> Self {
        Self {
            quantity: None,
            price: Some(price),
        }
    }

    /// True when nothing would change
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.price.is_none()
    }
}

/// A store operation
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a new record
    Add(Record),

    /// Remove a record by id
    Remove { id: String },

    /// Overwrite quantity and/or price
    Update { id: String, changes: UpdateFields },

    /// Case-insensitive name search
    Search { term: String },

    /// Snapshot of every record
    List,

    /// Write the mirror file
    Save,
}

impl Command {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add(_) => "add",
            Command::Remove { .. } => "remove",
            Command::Update { .. } => "update",
            Command::Search { .. } => "search",
            Command::List => "list",
            Command::Save => "save",
        }
    }
}

/// Successful result of a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(Record),
    Removed(Record),
    Updated(Record),
    Found(Vec<Record>),
    Listed(Vec<Record>),
    Saved(usize),
}
