//! Rounding and formatting applied where results leave the crate.

use rust_decimal::prelude::*;

/// Most decimal places a currency value is shown with.
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Rounds half away from zero. Values outside the decimal range come back
/// unchanged.
pub fn round_currency(value: f64, decimal_places: u32) -> f64 {
    let Some(decimal) = Decimal::from_f64(value) else {
        return value;
    };
    decimal
        .round_dp_with_strategy(
            decimal_places.min(MAX_DECIMAL_PLACES),
            RoundingStrategy::MidpointAwayFromZero,
        )
        .to_f64()
        .unwrap_or(value)
}

/// Rounds and renders with comma thousands separators, e.g. `412,431.83`.
pub fn format_amount(value: f64, decimal_places: u32) -> String {
    let places = decimal_places.min(MAX_DECIMAL_PLACES) as usize;
    let text = format!("{:.*}", places, round_currency(value, decimal_places));
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
