//! # Stockroom
//!
//! A small inventory store with:
//! - Ordered in-memory records with unique ids
//! - Linear-scan add/remove/update/search/list
//! - A flat-file mirror with escaping, a CRC32 trailer and atomic saves
//! - An interactive numbered menu and one-shot CLI commands
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 stockroom binary (clap)                      │
//! │        menu::Session  /  cli one-shot subcommands            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    InventoryStore                            │
//! │             (Vec<Record>, linear scan, dirty flag)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ load / save
//!                       ▼
//!               ┌───────────────┐
//!               │    Mirror     │
//!               │ (line codec,  │
//!               │  crc trailer) │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod mirror;
pub mod command;
pub mod store;
pub mod menu;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StockError, Result};
pub use config::Config;
pub use command::{Command, Outcome, UpdateFields};
pub use record::Record;
pub use store::InventoryStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Stockroom
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
