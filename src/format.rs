//! Text formatting for the leaderboard table.

use crate::model::Metric;
use serde_json::Value;

/// Placeholder for values that cannot be shown.
pub const MISSING: &str = "-";

const MAX_FRACTION_DIGITS: usize = 3;

/// Display label for a metric name as echoed by the API. Unknown names are
/// shown as-is.
pub fn metric_label(metric: &str) -> String {
    metric
        .parse::<Metric>()
        .map(|m| m.label().to_string())
        .unwrap_or_else(|_| metric.to_string())
}

/// Format a raw table value with en-US thousands separators.
///
/// Numbers and numeric strings are formatted; anything else (null, empty or
/// non-numeric text, arrays, objects) renders as [`MISSING`].
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                format_integer(i.unsigned_abs(), i < 0)
            } else if let Some(u) = n.as_u64() {
                format_integer(u, false)
            } else {
                n.as_f64().map_or_else(|| MISSING.to_string(), format_float)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                format_integer(i.unsigned_abs(), i < 0)
            } else {
                match trimmed.parse::<f64>() {
                    Ok(f) if f.is_finite() => format_float(f),
                    _ => MISSING.to_string(),
                }
            }
        }
        _ => MISSING.to_string(),
    }
}

fn format_integer(magnitude: u64, negative: bool) -> String {
    let grouped = group_thousands(&magnitude.to_string());
    if negative && magnitude != 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn format_float(value: f64) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    // Rounding may have produced zero
    if value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Style class for the podium ranks.
pub fn rank_class(rank: usize) -> Option<&'static str> {
    match rank {
        1 => Some("rank-1"),
        2 => Some("rank-2"),
        3 => Some("rank-3"),
        _ => None,
    }
}
