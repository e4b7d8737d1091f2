// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabular display; the fallback every result can render.

use kurbo::Point;
use peniko::color::palette::css;

use civichart_model::MeasureDef;

use crate::format::{format_value, truncate_label};
use crate::layout::{Frame, Size};
use crate::registry::ChartContext;
use crate::svg::{SvgDocument, TextAnchor};

const HEADER_FONT: f64 = 12.0;
const CELL_FONT: f64 = 11.0;
const ROW_HEIGHT: f64 = 20.0;
const CELL_LENGTH: usize = 22;

/// Renders a header row plus one line per record, dimensions first then
/// measures.
///
/// Rows beyond what fits the frame are dropped; the header notes how many
/// of the total are shown.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let mut columns: Vec<String> = ctx.definition.dimensions.iter().cloned().collect();
    for measure in &ctx.definition.measures {
        columns.push(String::from(measure.result_field()));
    }
    if columns.is_empty() {
        // No declared roles: show whatever fields the records carry.
        if let Some(record) = ctx.dataset.iter().next() {
            columns = record.field_names();
            columns.sort();
        }
    }
    if columns.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }

    let measure_fields: Vec<&str> = ctx
        .definition
        .measures
        .iter()
        .map(MeasureDef::result_field)
        .collect();
    let frame = Frame::new(size);
    let plot = frame.plot();
    let col_width = plot.width() / columns.len() as f64;

    let mut doc = SvgDocument::new(size);
    for (i, column) in columns.iter().enumerate() {
        doc.push_text(
            Point::new(plot.x0 + col_width * i as f64 + 4.0, plot.y0 + HEADER_FONT),
            &truncate_label(ctx.label(column), CELL_LENGTH),
            HEADER_FONT,
            TextAnchor::Start,
            css::BLACK,
        );
    }
    let rule_y = plot.y0 + HEADER_FONT + 6.0;
    doc.push_line(
        Point::new(plot.x0, rule_y),
        Point::new(plot.x1, rule_y),
        css::DIM_GRAY,
        1.0,
    );

    let max_rows = ((plot.y1 - rule_y) / ROW_HEIGHT).floor().max(0.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "non-negative row count bounded by the frame height"
    )]
    let max_rows = max_rows as usize;
    for (row_i, record) in ctx.dataset.iter().take(max_rows).enumerate() {
        let y = rule_y + ROW_HEIGHT * (row_i + 1) as f64 - 6.0;
        for (col_i, column) in columns.iter().enumerate() {
            let text = if measure_fields.contains(&column.as_str()) {
                record.number(column).map(format_value).unwrap_or_default()
            } else {
                record
                    .value(column)
                    .map(|v| v.display_key())
                    .unwrap_or_default()
            };
            doc.push_text(
                Point::new(plot.x0 + col_width * col_i as f64 + 4.0, y),
                &truncate_label(&text, CELL_LENGTH),
                CELL_FONT,
                TextAnchor::Start,
                css::BLACK,
            );
        }
    }
    if ctx.dataset.len() > max_rows {
        doc.push_text(
            Point::new(plot.x0, plot.y1 + HEADER_FONT + 6.0),
            &format!("Showing {max_rows} of {} rows", ctx.dataset.len()),
            CELL_FONT,
            TextAnchor::Start,
            css::DIM_GRAY,
        );
    }
    doc
}

#[cfg(test)]
mod tests {
    use civichart_model::{AggregationDefinition, Dataset, Record, SchemaCatalog, Value};

    use super::*;

    fn definition() -> AggregationDefinition {
        serde_json::from_str(
            r#"{
                "dimensions": ["borough"],
                "measures": [{"field": "unique_key", "alias": "num_of_requests"}],
                "categoricalDimension": ["borough"]
            }"#,
        )
        .unwrap()
    }

    fn dataset(n: usize) -> Dataset {
        Dataset::from_records(
            (0..n)
                .map(|i| {
                    let mut r = Record::new();
                    r.set("borough", Value::from(format!("Borough {i}")))
                        .set("num_of_requests", Value::from(1_500.0 * (i + 1) as f64));
                    r
                })
                .collect(),
        )
    }

    #[test]
    fn headers_use_display_names_and_measures_abbreviate() {
        let schema = SchemaCatalog::from_json(
            r#"{
                "dimensions": [{"name": "borough", "display_name": "Borough"}],
                "measures": [{"name": "num_of_requests", "display_name": "Requests"}]
            }"#,
        )
        .unwrap();
        let ds = dataset(2);
        let def = definition();
        let ctx = ChartContext::new(&ds, &def, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        assert!(svg.contains("Borough"));
        assert!(svg.contains("Requests"));
        assert!(svg.contains("1.5K"));
    }

    #[test]
    fn overflow_rows_are_dropped_with_a_note() {
        let ds = dataset(100);
        let def = definition();
        let schema = SchemaCatalog::new();
        let ctx = ChartContext::new(&ds, &def, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        assert!(svg.contains("of 100 rows"));
        assert!(!svg.contains("Borough 99"));
    }

    #[test]
    fn records_without_declared_roles_still_tabulate() {
        let ds = dataset(1);
        let def = AggregationDefinition::default();
        let schema = SchemaCatalog::new();
        let ctx = ChartContext::new(&ds, &def, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        assert!(svg.contains("Borough 0"));
    }
}
