use crate::error::{DeskError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// The admin price-edit command surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPriceCommand {
    /// Bare `/editprice`: show the current price list.
    ShowPrices,
    /// `/editprice "<service>" <price>`: set a new price.
    Set { service: String, price: Decimal },
}

/// Parses `/editprice` commands: a quoted service name followed by a numeric
/// price with at most two decimal places.
pub fn parse_edit_price(text: &str) -> Result<EditPriceCommand> {
    let invalid = || {
        DeskError::InvalidFormat(
            "expected /editprice \"<service>\" <price>".to_string(),
        )
    };

    let text = text.trim();
    let rest = text.strip_prefix("/editprice").ok_or_else(invalid)?;
    if rest.is_empty() {
        return Ok(EditPriceCommand::ShowPrices);
    }
    // Anything glued to the command name (e.g. /editpriceX) is not ours.
    let rest = rest.strip_prefix(char::is_whitespace).ok_or_else(invalid)?;
    let rest = rest.trim_start();

    let rest = rest.strip_prefix('"').ok_or_else(invalid)?;
    let (service, rest) = rest.split_once('"').ok_or_else(invalid)?;
    if service.is_empty() {
        return Err(invalid());
    }

    let price_text = rest.trim();
    let price = parse_price(price_text).ok_or_else(invalid)?;
    Ok(EditPriceCommand::Set {
        service: service.to_string(),
        price,
    })
}

/// Accepts plain decimal numbers with up to two fractional digits, nothing
/// else (no sign, no exponent, no trailing tokens).
fn parse_price(text: &str) -> Option<Decimal> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if let Some((whole, fraction)) = text.split_once('.') {
        if whole.is_empty() || fraction.is_empty() || fraction.len() > 2 {
            return None;
        }
        // A second dot would land in the fraction after split_once.
        if fraction.contains('.') {
            return None;
        }
    }
    Decimal::from_str(text).ok()
}
