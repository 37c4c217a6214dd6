//! Input validation helpers for the VENUS platform

use rust_decimal::Decimal;

/// Validate SKU format: 2-5 uppercase letters, a hyphen, then digits
/// (e.g. "VEN-001").
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    let Some((prefix, number)) = sku.split_once('-') else {
        return Err("SKU must be of the form PREFIX-NNN");
    };
    if prefix.len() < 2 || prefix.len() > 5 || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
        return Err("SKU prefix must be 2-5 uppercase letters");
    }
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err("SKU suffix must be numeric");
    }
    Ok(())
}

/// Validate an order/quotation line quantity
pub fn validate_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity == 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a unit price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !validator::validate_email(email) {
        return Err("Invalid email address");
    }
    Ok(())
}
