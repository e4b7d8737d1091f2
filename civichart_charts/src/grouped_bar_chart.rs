// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped bar chart: subgroup bars side by side within each primary band.

use kurbo::Rect;

use civichart_shape::stack_by;

use crate::axis;
use crate::layout::{Frame, Size};
use crate::legend::{self, LEGEND_WIDTH};
use crate::palette;
use crate::registry::ChartContext;
use crate::scale::{measure_scale, ScaleBand};
use crate::svg::SvgDocument;
use crate::tooltip::TooltipContent;

/// Renders side-by-side subgroup bars with a shared measure axis.
///
/// The measure axis tops out above the largest single bar, not the largest
/// row total, since bars never stack here.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let (Some(primary), Some(secondary)) = (
        ctx.definition.primary_dimension(),
        ctx.definition.secondary_dimension(),
    ) else {
        return SvgDocument::message(size, "Two dimensions are required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };

    let table = stack_by(ctx.dataset, primary, secondary, measure);
    if table.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }

    let frame = Frame::with_legend(size, LEGEND_WIDTH);
    let plot = frame.plot();
    let keys: Vec<String> = table.rows.iter().map(|r| r.key.clone()).collect();
    let band = ScaleBand::new(keys, (plot.x0, plot.x1));
    let y = measure_scale(table.max_cell(), (plot.y1, plot.y0));

    let fills = palette::series_fills(table.subgroups.len());
    let mut doc = SvgDocument::new(size);
    let primary_label = ctx.label(primary);
    let secondary_label = ctx.label(secondary);
    let measure_label = ctx.label(measure);
    let sub_count = table.subgroups.len().max(1);
    let sub_width = band.band_width() / sub_count as f64;
    for (row_i, row) in table.rows.iter().enumerate() {
        let x0 = band.x(row_i);
        for (sub_i, cell) in row.cells.iter().enumerate() {
            if cell.raw <= 0.0 {
                continue;
            }
            let left = x0 + sub_width * sub_i as f64;
            let tip = TooltipContent::new()
                .with_dimension(primary_label, &row.key)
                .with_dimension(secondary_label, &table.subgroups[sub_i])
                .with_measure(measure_label, cell.raw);
            doc.push_rect(
                Rect::new(left, y.map(cell.raw), left + sub_width, plot.y1),
                &fills[sub_i],
                Some(&tip.to_text()),
            );
        }
    }
    axis::draw_measure_axis_left(&mut doc, plot, &y);
    axis::draw_band_axis_bottom(&mut doc, plot, &band);
    let items = legend::legend_items(&table.subgroups, &fills);
    legend::draw_legend(&mut doc, frame.legend_area(LEGEND_WIDTH), &items);
    doc
}

#[cfg(test)]
mod tests {
    use civichart_model::{AggregationDefinition, Dataset, Record, SchemaCatalog, Value};

    use super::*;

    fn context_parts() -> (Dataset, AggregationDefinition, SchemaCatalog) {
        let rows = [
            ("Queens", "Noise", 30.0),
            ("Queens", "Heat", 10.0),
            ("Bronx", "Noise", 20.0),
        ];
        let dataset = Dataset::from_records(
            rows.iter()
                .map(|(b, c, v)| {
                    let mut r = Record::new();
                    r.set("borough", Value::from(*b))
                        .set("complaint_type", Value::from(*c))
                        .set("num_of_requests", Value::from(*v));
                    r
                })
                .collect(),
        );
        let definition: AggregationDefinition = serde_json::from_str(
            r#"{
                "dimensions": ["borough", "complaint_type"],
                "measures": [{"field": "unique_key", "alias": "num_of_requests"}],
                "categoricalDimension": ["borough", "complaint_type"]
            }"#,
        )
        .unwrap();
        (dataset, definition, SchemaCatalog::new())
    }

    #[test]
    fn draws_only_nonzero_bars_plus_legend_swatches() {
        let (dataset, definition, schema) = context_parts();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        // Three data bars (Bronx/Heat is a missing combination) and two
        // legend swatches.
        assert_eq!(svg.matches("<title>").count(), 3);
        assert!(svg.contains("Noise"));
        assert!(svg.contains("Heat"));
    }

    #[test]
    fn one_dimension_is_not_enough() {
        let (dataset, _, schema) = context_parts();
        let definition: AggregationDefinition = serde_json::from_str(
            r#"{"dimensions": ["borough"], "categoricalDimension": ["borough"]}"#,
        )
        .unwrap();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        assert!(svg.contains("Two dimensions are required"));
    }
}
