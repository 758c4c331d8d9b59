//! Display formatting for prices, areas and dates (en-US conventions).

use chrono::NaiveDate;

const COMPACT_UNITS: [(u64, &str); 4] = [
    (1_000, "K"),
    (1_000_000, "M"),
    (1_000_000_000, "B"),
    (1_000_000_000_000, "T"),
];

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole-dollar price, e.g. `"$1,250,000"`.
pub fn format_price(amount: u64) -> String {
    format!("${}", format_thousands(amount))
}

/// Short price for map markers, rounded half-up to a whole unit: `"$850K"`, `"$1M"`.
pub fn format_price_compact(amount: u64) -> String {
    let Some(mut idx) = COMPACT_UNITS.iter().rposition(|(unit, _)| amount >= *unit) else {
        return format!("${}", amount);
    };

    let mut rounded = round_to_unit(amount, COMPACT_UNITS[idx].0);
    if rounded >= 1_000 && idx + 1 < COMPACT_UNITS.len() {
        idx += 1;
        rounded = round_to_unit(amount, COMPACT_UNITS[idx].0);
    }

    format!("${}{}", format_thousands(rounded), COMPACT_UNITS[idx].1)
}

fn round_to_unit(amount: u64, unit: u64) -> u64 {
    amount / unit + u64::from(amount % unit >= unit / 2)
}

/// `2024-01-15` -> `"January 15, 2024"`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
