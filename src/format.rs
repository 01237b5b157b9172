//! Presentation-only rendering of money and percentages.
//!
//! Engine figures stay exact; these helpers round (half away from zero) only
//! when a string is produced.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DisplayConfig;

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn group_int_digits(int_part: &str, separator: &str) -> String {
    let len = int_part.chars().count();
    let mut out = String::with_capacity(int_part.len() + (len / 3) * separator.len());
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let remaining = len.saturating_sub(i + 1);
        if remaining > 0 && remaining % 3 == 0 {
            out.push_str(separator);
        }
    }
    out
}

fn pad_fraction_to_dp(s: &str, dp: u32) -> String {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if dp == 0 {
        return int_part.to_string();
    }

    let mut out = String::with_capacity(int_part.len() + 1 + dp as usize);
    out.push_str(int_part);
    out.push('.');
    let frac: String = frac_part.chars().take(dp as usize).collect();
    out.push_str(&frac);
    for _ in frac.len()..dp as usize {
        out.push('0');
    }
    out
}

fn group_number_string(s: &str, separator: &str) -> String {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let grouped = group_int_digits(int_part, separator);
    match frac_part {
        Some(f) if !f.is_empty() => format!("{grouped}.{f}"),
        _ => grouped,
    }
}

/// Magnitude of `value` rounded to `dp`, padded to exactly `dp` places and
/// optionally grouped. The sign is left to the caller.
fn render_magnitude(value: Decimal, dp: u32, grouping: bool, separator: &str) -> String {
    let s = pad_fraction_to_dp(&round(value, dp).abs().normalize().to_string(), dp);
    if grouping {
        group_number_string(&s, separator)
    } else {
        s
    }
}

/// Compact amount: rounded to `dp`, trailing zeros dropped, digits grouped
/// with spaces (`1234.50` → `1 234.5`, `100.00` → `100`).
pub fn format_amount(value: Decimal, dp: u32) -> String {
    let rounded = round(value, dp).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let grouped = group_number_string(&rounded.abs().to_string(), " ");
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Money with fixed decimals and the configured symbol after the amount.
pub fn format_currency(value: Decimal, display: &DisplayConfig) -> String {
    let dp = display.currency_decimals;
    let rounded = round(value, dp);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&render_magnitude(
        rounded,
        dp,
        display.currency_grouping,
        &display.group_separator,
    ));
    if let Some(symbol) = display.currency_symbol.as_deref() {
        out.push(' ');
        out.push_str(symbol);
    }
    out
}

/// Money change with an explicit sign: `+50.00 ₽`, `-5.00 ₽`, `+0.00 ₽`.
pub fn format_change(change: Decimal, display: &DisplayConfig) -> String {
    let rendered = format_currency(change, display);
    if rendered.starts_with('-') {
        rendered
    } else {
        format!("+{rendered}")
    }
}

/// Percentage with two decimals: `0.33%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = round(value, 2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let magnitude = pad_fraction_to_dp(&rounded.abs().normalize().to_string(), 2);
    if negative {
        format!("-{magnitude}%")
    } else {
        format!("{magnitude}%")
    }
}
