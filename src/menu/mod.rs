//! Menu Module
//!
//! Interactive text menu over an `InventoryStore`.
//!
//! ## Architecture
//! - The store is built by the caller and handed to `Session::run`
//! - Input and output are injected (`BufRead` / `Write`), stdin/stdout in
//!   the binary and in-memory buffers in tests
//! - Every operation goes through `InventoryStore::execute`; the session only
//!   parses input and renders `Outcome`s and `StockError`s

mod input;
mod session;

pub use input::{parse_optional_price, parse_optional_quantity, parse_price, parse_quantity};
pub use session::{Session, MENU};
