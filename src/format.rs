use num_format::{Locale, ToFormattedString};

/// Abbreviated dollar amount for table cells: `$1.3M`, `$12.5K`, `$850.00`.
/// Display-only and lossy; never used for arithmetic. Ties round away from
/// zero so `1_250_000` renders as `$1.3M`.
pub fn format_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", round_to(value / 1_000_000.0, 10.0))
    } else if value >= 1_000.0 {
        format!("${:.1}K", round_to(value / 1_000.0, 10.0))
    } else {
        format!("${:.2}", round_to(value, 100.0))
    }
}

/// Plain one-decimal dollar amount, used by the stat cards.
pub fn format_stat_currency(value: f64) -> String {
    format!("${:.1}", round_to(value, 10.0))
}

/// En-locale thousands grouping. Keeps up to three fractional digits, trimmed
/// of trailing zeros: `1234.5` renders as `1,234.5`, `1234.0` as `1,234`.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    // Round first so a fraction like .9996 carries into the integer part.
    let magnitude = round_to(value.abs(), 1_000.0);
    let integer = magnitude.trunc() as u64;
    let mut out = String::new();
    if negative && magnitude > 0.0 {
        out.push('-');
    }
    out.push_str(&integer.to_formatted_string(&Locale::en));

    if magnitude.fract() > 0.0 {
        let digits = format!("{:.3}", magnitude.fract());
        let digits = digits.trim_start_matches("0.").trim_end_matches('0');
        if !digits.is_empty() {
            out.push('.');
            out.push_str(digits);
        }
    }
    out
}

/// `0x1234567890abcdef...` -> `0x1234...cdef`. Strings shorter than 10
/// characters pass through unchanged.
pub fn format_address(address: &str) -> String {
    if address.len() < 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{head}...{tail}"),
        _ => address.to_string(),
    }
}

/// Avatar initials: the two characters after a `0x` prefix, otherwise the
/// first two, upper-cased.
pub fn avatar_text(address: &str) -> String {
    if address.len() < 4 {
        return address.chars().take(2).collect::<String>().to_uppercase();
    }
    let slice = if address.starts_with("0x") {
        address.get(2..4)
    } else {
        address.get(..2)
    };
    slice.unwrap_or(address).to_uppercase()
}

/// `0x`-prefixed, exactly 40 hex characters. Gates the block-explorer action.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
