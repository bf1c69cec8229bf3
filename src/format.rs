//! Display formatting for monetary results
//!
//! Engine values stay unrounded; these helpers only produce strings.

/// Whole-dollar currency with thousands separators, e.g. `$1,307,725` or `-$42`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return if amount.is_nan() {
            "$—".to_string()
        } else if amount > 0.0 {
            "$∞".to_string()
        } else {
            "-$∞".to_string()
        };
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}", sign, grouped)
}

/// Compact currency for chart axes: `$1.2B`, `$3.4M`, `$56.7K`, else whole dollars
pub fn format_currency_compact(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{}${:.1}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}K", sign, abs / 1_000.0)
    } else {
        format_currency(amount)
    }
}

/// Percentage with one decimal, e.g. `3.4%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
