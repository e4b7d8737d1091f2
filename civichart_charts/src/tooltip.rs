// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content assembly.
//!
//! Tooltips are built as labeled lines, then serialized once into the text
//! a mark carries. Labels come from the schema catalog so the hover shows
//! "Borough" rather than `borough`.

use crate::format::{format_percent, format_value};

/// The labeled lines of one mark's hover detail.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipContent {
    lines: Vec<(String, String)>,
}

impl TooltipContent {
    /// Creates empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dimension line with a verbatim value.
    pub fn with_dimension(mut self, label: &str, value: &str) -> Self {
        self.lines.push((String::from(label), String::from(value)));
        self
    }

    /// Adds a measure line with an abbreviated numeric value.
    pub fn with_measure(mut self, label: &str, value: f64) -> Self {
        self.lines.push((String::from(label), format_value(value)));
        self
    }

    /// Adds a measure line showing a percentage with its raw value in
    /// parentheses, e.g. `12.3% (4.5K)`.
    pub fn with_percent(mut self, label: &str, share: f64, raw: f64) -> Self {
        self.lines.push((
            String::from(label),
            format!("{} ({})", format_percent(share), format_value(raw)),
        ));
        self
    }

    /// Returns whether no lines were added.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serializes the lines as `label: value` rows.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, (label, value)) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_keep_insertion_order() {
        let tip = TooltipContent::new()
            .with_dimension("Borough", "Queens")
            .with_measure("Requests", 45_120.0);
        assert_eq!(tip.to_text(), "Borough: Queens\nRequests: 45.1K");
    }

    #[test]
    fn percent_lines_show_both_forms() {
        let tip = TooltipContent::new().with_percent("Requests", 12.34, 4_500.0);
        assert_eq!(tip.to_text(), "Requests: 12.3% (4.5K)");
    }

    #[test]
    fn empty_content_serializes_to_nothing() {
        let tip = TooltipContent::new();
        assert!(tip.is_empty());
        assert_eq!(tip.to_text(), "");
    }
}
