//! Record definitions
//!
//! A `Record` is one stock-keeping unit. Construction validates every field,
//! so a `Record` held by the store is always well-formed.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, StockError};

/// One stock-keeping unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: String,
    name: String,
    quantity: u32,
    price: f64,
}

impl Record {
    /// Create a validated record
    ///
    /// The id is trimmed and must not be blank. The name must not be blank.
    /// Price must be finite and non-negative; quantity is unsigned.
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32, price: f64) -> Result<Self> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(StockError::InvalidRecord("id must not be blank".to_string()));
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(StockError::InvalidRecord(format!(
                "name of {} must not be blank",
                id
            )));
        }

        let price = validate_price(price)?;

        Ok(Self {
            id,
            name,
            quantity,
            price,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Stock value of this record (quantity × price)
    pub fn value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Overwrite the price, rejecting the same values `new` rejects
    pub fn set_price(&mut self, price: f64) -> Result<()> {
        self.price = validate_price(price)?;
        Ok(())
    }

    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Quantity: {}, Price: {:.2}",
            self.id, self.name, self.quantity, self.price
        )
    }
}

/// Check a price for use in a record, returning it with `-0.0` folded to `0.0`
pub fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(StockError::InvalidRecord(format!(
            "price must be a finite number, got {}",
            price
        )));
    }
    if price < 0.0 {
        return Err(StockError::InvalidRecord(format!(
            "price must not be negative, got {}",
            price
        )));
    }
    // -0.0 passes the sign check but would display as "-0.00"
    Ok(price + 0.0)
}
