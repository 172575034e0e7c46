//! Shared formatting utilities for UI components.

/// Format a number with thousand separators.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a raw record value as it appears in the source data.
pub fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return non_finite(val);
    }
    format!("{}", val)
}

/// Format a tick value compactly (`450k`, `1.2M`).
pub fn format_axis_value(val: f64) -> String {
    if !val.is_finite() {
        return non_finite(val);
    }
    let abs_val = val.abs();
    if abs_val >= 1e6 {
        format!("{}M", trim(val / 1e6))
    } else if abs_val >= 1e3 {
        format!("{}k", trim(val / 1e3))
    } else {
        trim(val)
    }
}

fn trim(val: f64) -> String {
    let s = format!("{:.2}", val);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn non_finite(val: f64) -> String {
    if val.is_nan() {
        "NaN".to_string()
    } else if val.is_sign_positive() {
        "+Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}
