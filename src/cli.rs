//! Command-line surface
//!
//! Argument definitions and the dispatcher behind the `stockroom` binary.
//! Output goes to an injected writer so the binary stays a thin shell.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::command::{Command, Outcome, UpdateFields};
use crate::config::Config;
use crate::error::{Result, StockError};
use crate::menu::Session;
use crate::mirror::MirrorReader;
use crate::record::Record;
use crate::store::InventoryStore;

/// Stockroom inventory manager
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(about = "Inventory manager with a flat-file mirror")]
#[command(version)]
pub struct Args {
    /// Mirror file holding the inventory
    #[arg(short, long, default_value = "inventory.txt", global = true)]
    pub data_file: PathBuf,

    /// Save after every change instead of only on request
    #[arg(short, long, global = true)]
    pub autosave: bool,

    /// Skip fsync when saving
    #[arg(long, global = true)]
    pub no_fsync: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Print every product
    List {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Find products whose name contains TERM (case-insensitive)
    Search {
        term: String,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Add a product and save
    Add {
        id: String,
        name: String,
        quantity: u32,
        price: f64,
    },

    /// Remove a product and save
    Remove { id: String },

    /// Change quantity and/or price of a product and save
    Update {
        id: String,

        #[arg(short, long)]
        quantity: Option<u32>,

        #[arg(short, long)]
        price: Option<f64>,
    },

    /// Check the mirror file without modifying it
    Verify,
}

impl Args {
    /// Store configuration for these arguments
    pub fn config(&self) -> Config {
        Config::builder()
            .data_file(&self.data_file)
            .autosave(self.autosave)
            .fsync_on_save(!self.no_fsync)
            .build()
    }
}

/// Run one invocation
///
/// `input` only feeds the menu. One-shot mutations refuse to start from a
/// mirror that cannot be read, so they never overwrite it with a near-empty
/// inventory.
pub fn run<R: BufRead, W: Write>(args: Args, input: R, mut out: W) -> Result<()> {
    let config = args.config();

    let command = match args.command.unwrap_or(Commands::Menu) {
        Commands::Verify => return verify(&config, &mut out),
        Commands::Menu => {
            let mut store = InventoryStore::open(config)?;
            let mut session = Session::new(input, out);
            return session.run(&mut store);
        }
        Commands::List { json } => {
            let store = InventoryStore::open(config)?;
            return print_records(&mut out, store.list_all(), json);
        }
        Commands::Search { term, json } => {
            let store = InventoryStore::open(config)?;
            let found = store.search_by_name(&term);
            return print_records(&mut out, found.iter(), json);
        }
        Commands::Add {
            id,
            name,
            quantity,
            price,
        } => Command::Add(Record::new(id, name, quantity, price)?),
        Commands::Remove { id } => Command::Remove { id },
        Commands::Update {
            id,
            quantity,
            price,
        } => Command::Update {
            id,
            changes: UpdateFields { quantity, price },
        },
    };

    let mut store = InventoryStore::open_strict(config)?;
    match store.execute(command)? {
        Outcome::Added(record) => writeln!(out, "Added {}", record)?,
        Outcome::Removed(record) => writeln!(out, "Removed {}", record)?,
        Outcome::Updated(record) => writeln!(out, "Updated {}", record)?,
        other => tracing::debug!(?other, "unexpected outcome"),
    }

    if store.is_dirty() {
        store.save()?;
    }
    out.flush()?;
    Ok(())
}

fn print_records<'a, W: Write>(
    out: &mut W,
    records: impl Iterator<Item = &'a Record>,
    json: bool,
) -> Result<()> {
    if json {
        let records: Vec<&Record> = records.collect();
        let text = serde_json::to_string_pretty(&records)
            .map_err(|e| StockError::Serialization(e.to_string()))?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    let mut empty = true;
    for record in records {
        writeln!(out, "{}", record)?;
        empty = false;
    }
    if empty {
        writeln!(out, "No products found.")?;
    }
    Ok(())
}

fn verify<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let summary = MirrorReader::verify(&config.data_file)?;
    writeln!(
        out,
        "{}: {} records, {} blank lines, checksum {}",
        config.data_file.display(),
        summary.records,
        summary.blank_lines,
        if summary.checksum_verified {
            "ok"
        } else {
            "absent (legacy file)"
        }
    )?;
    Ok(())
}
