//! Input parsing for menu prompts

use crate::error::{Result, StockError};

/// Parse a quantity; negative and fractional values are rejected
pub fn parse_quantity(input: &str) -> Result<u32> {
    input.trim().parse().map_err(|_| StockError::Parse {
        field: "quantity",
        input: input.to_string(),
    })
}

/// Parse a price; range checks happen when the record is built
pub fn parse_price(input: &str) -> Result<f64> {
    input.trim().parse().map_err(|_| StockError::Parse {
        field: "price",
        input: input.to_string(),
    })
}

/// Blank input means "keep the current quantity"
pub fn parse_optional_quantity(input: &str) -> Result<Option<u32>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_quantity(input).map(Some)
}

/// Blank input means "keep the current price"
pub fn parse_optional_price(input: &str) -> Result<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_price(input).map(Some)
}
