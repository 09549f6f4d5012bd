/// es-ES number formatting, as `Intl.NumberFormat('es-ES')` renders it:
/// `.` groups thousands (only from five integer digits on), `,` separates
/// decimals, at most three fraction digits.
pub(crate) fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "∞".to_string()
        } else {
            "-∞".to_string()
        };
    }

    // Intl rounds ties away from zero; `{:.3}` alone would round to even.
    let rounded = format!("{:.3}", (value.abs() * 1000.0).round() / 1000.0);
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    // es-ES uses minimumGroupingDigits = 2: "1234" stays ungrouped.
    if digits.len() < 5 {
        return digits.to_string();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Byte count as whole-or-fractional mebibytes, e.g. `20` or `1,5`.
pub(crate) fn format_mib(bytes: &u64) -> String {
    format_number(*bytes as f64 / (1024.0 * 1024.0))
}
