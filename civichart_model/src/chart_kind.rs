// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of renderable chart types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A renderable chart type.
///
/// The wire protocol identifies charts by string key; this enum replaces a
/// string-keyed registry so dispatch is exhaustive at compile time. Unknown
/// keys stay representable at the call site as `Option<ChartKind>` — callers
/// render a "not supported" message for `None` rather than failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Plain tabular display; always available.
    Table,
    /// One categorical dimension, one measure.
    SingleBarChart,
    /// Two categorical dimensions, side-by-side bars.
    GroupedBarChart,
    /// Two categorical dimensions, stacked segments.
    StackedBarChart,
    /// Stacked bars normalized to 100% per row.
    #[serde(rename = "stacked_bar_chart_100")]
    StackedBarChart100,
    /// Hierarchical bars: subgroup bars nested inside primary-group bars.
    NestedBarChart,
    /// One time dimension, one measure.
    LineChart,
    /// Time series broken down by a categorical dimension.
    StackedAreaChart,
    /// Stacked area normalized to 100% per time slice.
    #[serde(rename = "stacked_area_chart_100")]
    StackedAreaChart100,
    /// One or two hierarchical dimensions sized by a measure.
    Treemap,
    /// Region boundaries shaded by a measure.
    ChoroplethMap,
    /// Geographic point density weighted by a measure.
    Heatmap,
}

impl ChartKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 12] = [
        Self::Table,
        Self::SingleBarChart,
        Self::GroupedBarChart,
        Self::StackedBarChart,
        Self::StackedBarChart100,
        Self::NestedBarChart,
        Self::LineChart,
        Self::StackedAreaChart,
        Self::StackedAreaChart100,
        Self::Treemap,
        Self::ChoroplethMap,
        Self::Heatmap,
    ];

    /// Parses a wire key; `None` for unrecognized keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }

    /// The wire key for this kind.
    pub fn key(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::SingleBarChart => "single_bar_chart",
            Self::GroupedBarChart => "grouped_bar_chart",
            Self::StackedBarChart => "stacked_bar_chart",
            Self::StackedBarChart100 => "stacked_bar_chart_100",
            Self::NestedBarChart => "nested_bar_chart",
            Self::LineChart => "line_chart",
            Self::StackedAreaChart => "stacked_area_chart",
            Self::StackedAreaChart100 => "stacked_area_chart_100",
            Self::Treemap => "treemap",
            Self::ChoroplethMap => "choropleth_map",
            Self::Heatmap => "heatmap",
        }
    }

    /// A short human-readable label for menus and titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::SingleBarChart => "Bar chart",
            Self::GroupedBarChart => "Grouped bar chart",
            Self::StackedBarChart => "Stacked bar chart",
            Self::StackedBarChart100 => "100% stacked bar chart",
            Self::NestedBarChart => "Nested bar chart",
            Self::LineChart => "Line chart",
            Self::StackedAreaChart => "Stacked area chart",
            Self::StackedAreaChart100 => "100% stacked area chart",
            Self::Treemap => "Treemap",
            Self::ChoroplethMap => "Choropleth map",
            Self::Heatmap => "Heat map",
        }
    }

    /// Whether this kind renders percentages of a row/slice total.
    pub fn is_normalized(self) -> bool {
        matches!(self, Self::StackedBarChart100 | Self::StackedAreaChart100)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
