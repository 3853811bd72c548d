//! Locale-aware numeric conversion for the source format: thousands
//! separated by '.', decimals by ',' (e.g. `"1.234.567,89"`).

/// Parse a single cell in source locale format.
///
/// Whitespace is stripped, thousands dots removed, the decimal comma becomes
/// a decimal point. Empty cells and the textual null tokens the source files
/// use ("nan", "NaN", "None") count as zero. Returns `None` only when the
/// cleaned text still fails to parse; callers degrade that to zero.
pub fn parse_locale_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || matches!(trimmed, "nan" | "NaN" | "None") {
        return Some(0.0);
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Format a value back into the source locale.
///
/// Uses the shortest round-trip representation of the float, with the
/// integer digits grouped by '.' and the decimal separator as ','. This is
/// the exact inverse of [`parse_locale_number`] for any finite value.
pub fn format_locale_number(value: f64) -> String {
    let plain = value.to_string();
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped},{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Coerce a year cell to an integer, in order of preference: plain integer,
/// locale number truncated, then the fixed fallback year. Defaulted years
/// collide with each other, which corrupts the latest-two-years comparison;
/// that degradation is deliberate and the reason loading logs a warning.
pub const FALLBACK_YEAR: i32 = 2024;

pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(y) = trimmed.parse::<i32>() {
        return Some(y);
    }
    parse_locale_number(trimmed).and_then(|v| {
        if v.is_finite() && v != 0.0 {
            Some(v as i32)
        } else {
            None
        }
    })
}
