//! Presentation formatting. Engine values are never rounded; only these
//! strings are.

use rust_decimal::{Decimal, RoundingStrategy};

/// Two decimals with thousands grouping, e.g. `1,234,567.89`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

pub fn format_percent(percent: Option<Decimal>) -> String {
    match percent {
        Some(value) => format!("{}%", format_amount(value)),
        None => "n/a".to_string(),
    }
}

pub fn format_quantity(qty: Decimal) -> String {
    let s = format!("{:.4}", qty);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
