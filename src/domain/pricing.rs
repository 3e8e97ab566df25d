//! Total price derivation and Indonesian (`id-ID`) number formatting.

/// Maximum fraction digits kept when formatting totals.
const MAX_FRACTION_DIGITS: usize = 3;

/// Parses the leading numeric part of a field value.
///
/// Blank or unparsable input yields `0.0`; trailing garbage after a numeric
/// prefix is ignored (`"12abc"` → `12.0`).
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return 0.0;
    }
    // Exponent suffix, only when complete.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// `price - price * discount / 100`. No clamping: a discount above 100 gives
/// a negative total.
pub fn compute_total(price: f64, discount_percent: f64) -> f64 {
    price - price * discount_percent / 100.0
}

/// Same as [`compute_total`] but on raw field strings.
pub fn compute_total_from_fields(price: &str, discount_percent: &str) -> f64 {
    compute_total(parse_number(price), parse_number(discount_percent))
}

/// Formats a total with `.` as thousands separator and `,` as decimal mark.
pub fn format_total(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let rendered = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}
