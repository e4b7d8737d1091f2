// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value and label formatting shared by axes, tooltips, and data labels.

/// Default maximum label length before truncation.
pub const DEFAULT_LABEL_LENGTH: usize = 25;

/// Formats a numeric value for display.
///
/// Values of a million or more render as `"2.3M"`, values of a thousand or
/// more as `"45.1K"`, both with one decimal place. Smaller whole numbers
/// render without a decimal point; smaller fractional values keep their
/// natural representation.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return String::from("-");
    }
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Formats a percentage with one decimal place, e.g. `"12.3%"`.
pub fn format_percent(share: f64) -> String {
    format!("{share:.1}%")
}

/// Truncates a label to `max` characters, appending an ellipsis when
/// anything was cut. Labels at or under the limit pass through unchanged.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return String::from(label);
    }
    let mut out: String = label.chars().take(max).collect();
    out.push('…');
    out
}
