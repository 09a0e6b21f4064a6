// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between raw integer amounts and decimal strings.

use alloy::primitives::U256;

/// Largest precision whose scale factor fits in a `U256`.
pub const MAX_DECIMALS: u8 = 77;

/// Format a raw amount as a decimal string scaled by `decimals`.
///
/// The fractional part is never truncated and always has at least one digit,
/// so `0` renders as `"0.0"` and one whole unit as `"1.0"`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    let fraction = format!(
        "{:0>width$}",
        remainder.to_string(),
        width = decimals as usize
    );
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Format a raw balance the way wallet UIs show it: whole amounts carry no
/// fractional part, so two ether renders as `"2"` and zero as `"0"`.
pub fn format_balance(amount: U256, decimals: u8) -> String {
    let formatted = format_units(amount, decimals);
    match formatted.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

/// Parse a decimal string back into a raw amount.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, UnitsError> {
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UnitsError::InvalidFormat(amount.to_string()));
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UnitsError::InvalidFormat(amount.to_string()));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals(decimals));
    }

    let padded = format!("{:0<width$}", fraction, width = decimals as usize);
    let digits = format!("{whole}{padded}");
    digits
        .parse::<U256>()
        .map_err(|_| UnitsError::Overflow(amount.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitsError {
    #[error("Invalid amount format: {0}")]
    InvalidFormat(String),

    #[error("Too many decimal places (max {0})")]
    TooManyDecimals(u8),

    #[error("Amount does not fit in 256 bits: {0}")]
    Overflow(String),
}
