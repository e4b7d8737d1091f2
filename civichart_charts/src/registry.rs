// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart dispatch: one entry point mapping a chart kind to its renderer.

use civichart_model::{AggregationDefinition, ChartKind, Dataset, MeasureDef, SchemaCatalog};

use crate::geo::GeoBoundaries;
use crate::layout::Size;
use crate::svg::SvgDocument;
use crate::{
    area_chart, bar_chart, choropleth, grouped_bar_chart, heatmap, line_chart, nested_bar_chart,
    stacked_bar_chart, table_chart, treemap,
};

/// Everything a renderer reads: the aggregated rows, the roles that shaped
/// them, field display names, and (for map charts) boundary polygons.
#[derive(Clone, Copy, Debug)]
pub struct ChartContext<'a> {
    /// Aggregated result rows.
    pub dataset: &'a Dataset,
    /// The definition whose roles select grouping keys and measures.
    pub definition: &'a AggregationDefinition,
    /// Field metadata for display names.
    pub schema: &'a SchemaCatalog,
    /// Boundary polygons, when a map chart may be rendered.
    pub boundaries: Option<&'a GeoBoundaries>,
}

impl<'a> ChartContext<'a> {
    /// Creates a context without boundary data.
    pub fn new(
        dataset: &'a Dataset,
        definition: &'a AggregationDefinition,
        schema: &'a SchemaCatalog,
    ) -> Self {
        Self {
            dataset,
            definition,
            schema,
            boundaries: None,
        }
    }

    /// Attaches boundary polygons for the map charts.
    pub fn with_boundaries(mut self, boundaries: Option<&'a GeoBoundaries>) -> Self {
        self.boundaries = boundaries;
        self
    }

    /// The display name for a field, falling back to the raw name.
    pub(crate) fn label<'b>(&'b self, field: &'b str) -> &'b str {
        self.schema.display_name(field)
    }

    /// The primary measure's result field name.
    pub(crate) fn measure_field(&self) -> Option<&str> {
        self.definition.primary_measure().map(MeasureDef::result_field)
    }
}

/// Renders `kind` from the context.
///
/// Renderers never fail: an empty dataset, a definition missing the roles
/// the kind needs, or absent boundary data all produce a message document
/// instead.
pub fn render_chart(kind: ChartKind, ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    if ctx.dataset.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }
    tracing::debug!(kind = %kind, rows = ctx.dataset.len(), "rendering chart");
    match kind {
        ChartKind::Table => table_chart::render(ctx, size),
        ChartKind::SingleBarChart => bar_chart::render(ctx, size),
        ChartKind::GroupedBarChart => grouped_bar_chart::render(ctx, size),
        ChartKind::StackedBarChart | ChartKind::StackedBarChart100 => {
            stacked_bar_chart::render(ctx, size, kind.is_normalized())
        }
        ChartKind::NestedBarChart => nested_bar_chart::render(ctx, size),
        ChartKind::LineChart => line_chart::render(ctx, size),
        ChartKind::StackedAreaChart | ChartKind::StackedAreaChart100 => {
            area_chart::render(ctx, size, kind.is_normalized())
        }
        ChartKind::Treemap => treemap::render(ctx, size),
        ChartKind::ChoroplethMap => choropleth::render(ctx, size),
        ChartKind::Heatmap => heatmap::render(ctx, size),
    }
}

/// Renders from a wire key, falling back to a message for unknown keys.
pub fn render_chart_key(key: &str, ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    match ChartKind::from_key(key) {
        Some(kind) => render_chart(kind, ctx, size),
        None => {
            tracing::warn!(key, "unknown chart key");
            SvgDocument::message(size, &format!("Chart type \"{key}\" is not supported"))
        }
    }
}

#[cfg(test)]
mod tests {
    use civichart_model::{Record, Value};

    use super::*;

    fn sample() -> (Dataset, AggregationDefinition, SchemaCatalog) {
        let mut record = Record::new();
        record
            .set("borough", Value::from("Queens"))
            .set("num_of_requests", Value::from(12.0));
        let dataset = Dataset::from_records(vec![record]);
        let definition: AggregationDefinition = serde_json::from_str(
            r#"{
                "dimensions": ["borough"],
                "measures": [{"field": "unique_key", "alias": "num_of_requests"}],
                "categoricalDimension": ["borough"]
            }"#,
        )
        .unwrap();
        (dataset, definition, SchemaCatalog::new())
    }

    #[test]
    fn empty_dataset_renders_a_message_for_every_kind() {
        let (_, definition, schema) = sample();
        let dataset = Dataset::new();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        for kind in ChartKind::ALL {
            let svg = render_chart(kind, &ctx, Size::default()).to_svg_string();
            assert!(svg.contains("No data to display"), "kind {kind}");
        }
    }

    #[test]
    fn unknown_key_renders_unsupported_message() {
        let (dataset, definition, schema) = sample();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render_chart_key("sankey", &ctx, Size::default()).to_svg_string();
        assert!(svg.contains("not supported"));
    }

    #[test]
    fn known_key_dispatches_to_a_real_renderer() {
        let (dataset, definition, schema) = sample();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render_chart_key("single_bar_chart", &ctx, Size::default()).to_svg_string();
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn every_kind_renders_something_from_minimal_data() {
        let (dataset, definition, schema) = sample();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        for kind in ChartKind::ALL {
            let svg = render_chart(kind, &ctx, Size::default()).to_svg_string();
            assert!(svg.starts_with("<svg"), "kind {kind}");
            assert!(svg.ends_with("</svg>\n"), "kind {kind}");
        }
    }
}
