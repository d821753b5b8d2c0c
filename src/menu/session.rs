//! Menu Session
//!
//! Runs the numbered menu loop against one store.

use std::io::{BufRead, Write};

use crate::command::{Command, Outcome, UpdateFields};
use crate::error::{Result, StockError};
use crate::record::Record;
use crate::store::InventoryStore;

use super::input::{parse_optional_price, parse_optional_quantity, parse_price, parse_quantity};

/// The menu shown before every prompt
pub const MENU: &str = "\
1. Add product
2. Remove product
3. Update product
4. Search product
5. Show all products
6. Exit
7. Save changes
";

/// What the loop does after an option
enum Flow {
    Continue,
    Exit,
}

/// A menu session over injected input and output
pub struct Session<R, W> {
    /// Operator input, one answer per line
    reader: R,

    /// Menu, prompts and results
    writer: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Run the menu until the operator exits or input ends
    ///
    /// Store failures are rendered and the loop continues. Only I/O errors on
    /// the session's own reader or writer are returned.
    pub fn run(&mut self, store: &mut InventoryStore) -> Result<()> {
        loop {
            self.writer.write_all(MENU.as_bytes())?;

            let Some(choice) = self.prompt("Select an option: ")? else {
                tracing::debug!("Menu input closed");
                return self.exit(store);
            };

            tracing::debug!(choice = choice.trim(), "menu option");

            let flow = match choice.trim() {
                "1" => self.add_product(store)?,
                "2" => self.remove_product(store)?,
                "3" => self.update_product(store)?,
                "4" => self.search_products(store)?,
                "5" => self.show_all(store)?,
                "6" => Flow::Exit,
                "7" => {
                    let result = store.execute(Command::Save);
                    self.render(store, result)?;
                    Flow::Continue
                }
                _ => {
                    writeln!(self.writer, "Invalid option.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return self.exit(store);
            }
        }
    }

    /// Consume the session and hand back its reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    // =========================================================================
    // Options
    // =========================================================================

    fn add_product(&mut self, store: &mut InventoryStore) -> Result<Flow> {
        let Some(id) = self.prompt("Product ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Product name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Quantity: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt("Price: ")? else {
            return Ok(Flow::Exit);
        };

        let result = parse_quantity(&quantity)
            .and_then(|quantity| Ok((quantity, parse_price(&price)?)))
            .and_then(|(quantity, price)| Record::new(id, name, quantity, price))
            .and_then(|record| store.execute(Command::Add(record)));

        self.render(store, result)?;
        Ok(Flow::Continue)
    }

    fn remove_product(&mut self, store: &mut InventoryStore) -> Result<Flow> {
        let Some(id) = self.prompt("Product ID to remove: ")? else {
            return Ok(Flow::Exit);
        };

        let result = store.execute(Command::Remove {
            id: id.trim().to_string(),
        });
        self.render(store, result)?;
        Ok(Flow::Continue)
    }

    fn update_product(&mut self, store: &mut InventoryStore) -> Result<Flow> {
        let Some(id) = self.prompt("Product ID to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("New quantity (blank to keep): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt("New price (blank to keep): ")? else {
            return Ok(Flow::Exit);
        };

        let result = parse_optional_quantity(&quantity)
            .and_then(|quantity| {
                Ok(UpdateFields {
                    quantity,
                    price: parse_optional_price(&price)?,
                })
            })
            .and_then(|changes| {
                store.execute(Command::Update {
                    id: id.trim().to_string(),
                    changes,
                })
            });

        self.render(store, result)?;
        Ok(Flow::Continue)
    }

    fn search_products(&mut self, store: &mut InventoryStore) -> Result<Flow> {
        let Some(term) = self.prompt("Name to search for: ")? else {
            return Ok(Flow::Exit);
        };

        let result = store.execute(Command::Search { term });
        self.render(store, result)?;
        Ok(Flow::Continue)
    }

    fn show_all(&mut self, store: &mut InventoryStore) -> Result<Flow> {
        let result = store.execute(Command::List);
        self.render(store, result)?;
        Ok(Flow::Continue)
    }

    fn exit(&mut self, store: &InventoryStore) -> Result<()> {
        if store.is_dirty() {
            writeln!(
                self.writer,
                "Warning: unsaved changes are not written to {}.",
                store.path().display()
            )?;
        }
        writeln!(self.writer, "Exiting.")?;
        self.writer.flush()?;
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render(&mut self, store: &InventoryStore, result: Result<Outcome>) -> Result<()> {
        match result {
            Ok(outcome) => self.render_outcome(store, outcome),
            Err(e) => self.render_error(store, e),
        }
    }

    fn render_outcome(&mut self, store: &InventoryStore, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Added(record) => writeln!(self.writer, "Product {} added.", record.id())?,
            Outcome::Removed(record) => writeln!(self.writer, "Product {} removed.", record.id())?,
            Outcome::Updated(record) => writeln!(self.writer, "Product updated: {}", record)?,
            Outcome::Found(records) if records.is_empty() => {
                writeln!(self.writer, "No products found.")?
            }
            Outcome::Found(records) => {
                for record in &records {
                    writeln!(self.writer, "{}", record)?;
                }
            }
            Outcome::Listed(records) if records.is_empty() => {
                writeln!(self.writer, "The inventory is empty.")?
            }
            Outcome::Listed(records) => {
                for record in &records {
                    writeln!(self.writer, "{}", record)?;
                }
                writeln!(self.writer, "Total stock value: {:.2}", store.total_value())?;
            }
            Outcome::Saved(count) => writeln!(
                self.writer,
                "Saved {} products to {}.",
                count,
                store.path().display()
            )?,
        }
        Ok(())
    }

    fn render_error(&mut self, store: &InventoryStore, error: StockError) -> Result<()> {
        tracing::debug!("menu operation failed: {}", error);

        match error {
            StockError::Parse { field, .. } => {
                writeln!(self.writer, "Error: please enter a valid number for {}.", field)?
            }
            StockError::Duplicate(id) => writeln!(self.writer, "Error: ID {} already exists.", id)?,
            StockError::NotFound(id) => writeln!(self.writer, "Error: product {} not found.", id)?,
            StockError::InvalidRecord(reason) => writeln!(self.writer, "Error: {}.", reason)?,
            StockError::Io(e) => writeln!(
                self.writer,
                "Error: could not write {}: {}",
                store.path().display(),
                e
            )?,
            other => writeln!(self.writer, "Error: {}", other)?,
        }
        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Print a prompt and read one answer; `None` at end of input
    ///
    /// Bytes that are not UTF-8 become U+FFFD instead of ending the session.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.writer.write_all(label.as_bytes())?;
        self.writer.flush()?;

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}
