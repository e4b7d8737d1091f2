// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked area chart over a time axis, plain and normalized to 100%.

use kurbo::BezPath;

use civichart_shape::{stack_by, GroupEntry, StackedRow};

use crate::axis;
use crate::layout::{Frame, Size};
use crate::legend::{self, LEGEND_WIDTH};
use crate::palette;
use crate::registry::ChartContext;
use crate::scale::{measure_scale, percentage_scale, ScaleTime};
use crate::svg::SvgDocument;
use crate::time::{self, TimeGrain};
use crate::tooltip::TooltipContent;

/// Renders one stacked band per breakdown subgroup across the time axis.
///
/// Slices are time values in chronological order; within each slice the
/// subgroups stack in their global ranking, so a subgroup keeps its
/// vertical position and color across the whole chart.
pub fn render(ctx: &ChartContext<'_>, size: Size, normalized: bool) -> SvgDocument {
    let Some(time_field) = ctx.definition.time_dimension() else {
        return SvgDocument::message(size, "A time dimension is required for this chart");
    };
    let Some(breakdown) = ctx.definition.breakdown_dimension() else {
        return SvgDocument::message(size, "A breakdown dimension is required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };

    let mut table = stack_by(ctx.dataset, time_field, breakdown, measure);
    if table.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }
    // stack_by ranks rows by total; this axis is chronological.
    sort_rows_by_time(&mut table.rows);

    let grain = TimeGrain::infer(time_field);
    let datepart = time::is_datepart(time_field);
    let slices: Vec<(f64, &StackedRow)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let coord = time::time_coord(&row.key, datepart);
            if coord.is_none() {
                tracing::warn!(key = %row.key, time_field, "unparseable time key skipped");
            }
            coord.map(|c| (c, row))
        })
        .collect();
    if slices.len() < 2 {
        return SvgDocument::message(size, "At least two time values are required for this chart");
    }

    let frame = Frame::with_legend(size, LEGEND_WIDTH);
    let plot = frame.plot();
    let entries: Vec<GroupEntry> = slices
        .iter()
        .map(|(_, row)| GroupEntry {
            key: row.key.clone(),
            total: row.total,
        })
        .collect();
    let Some(x) = ScaleTime::from_series(&entries, grain, datepart, (plot.x0, plot.x1)) else {
        return SvgDocument::message(size, "No data to display");
    };
    let y = if normalized {
        percentage_scale((plot.y1, plot.y0))
    } else {
        measure_scale(table.max_row_total(), (plot.y1, plot.y0))
    };

    // Cumulative extents per slice, bottom of subgroup j = sums[j],
    // top = sums[j + 1].
    let sub_count = table.subgroups.len();
    let cumulative: Vec<Vec<f64>> = slices
        .iter()
        .map(|(_, row)| {
            let mut sums = Vec::with_capacity(sub_count + 1);
            let mut acc = 0.0;
            sums.push(0.0);
            for cell in &row.cells {
                acc += if normalized { cell.share } else { cell.raw };
                sums.push(acc);
            }
            sums
        })
        .collect();

    let fills = palette::series_fills(sub_count);
    let mut doc = SvgDocument::new(size);
    let breakdown_label = ctx.label(breakdown);
    for sub_i in 0..sub_count {
        let mut path = BezPath::new();
        // Top edge forward, bottom edge back.
        for (slice_i, (coord, _)) in slices.iter().enumerate() {
            let p = kurbo::Point::new(x.map(*coord), y.map(cumulative[slice_i][sub_i + 1]));
            if slice_i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        for (slice_i, (coord, _)) in slices.iter().enumerate().rev() {
            path.line_to(kurbo::Point::new(
                x.map(*coord),
                y.map(cumulative[slice_i][sub_i]),
            ));
        }
        path.close_path();
        let tip = TooltipContent::new().with_dimension(breakdown_label, &table.subgroups[sub_i]);
        doc.push_path(&path, Some(&fills[sub_i]), None, Some(&tip.to_text()));
    }

    axis::draw_measure_axis_left(&mut doc, plot, &y);
    let ticks: Vec<(f64, String)> = slices
        .iter()
        .map(|(coord, row)| {
            (
                x.map(*coord),
                time::format_time_key(&row.key, grain, datepart),
            )
        })
        .collect();
    axis::draw_time_axis_bottom(&mut doc, plot, &ticks);
    let items = legend::legend_items(&table.subgroups, &fills);
    legend::draw_legend(&mut doc, frame.legend_area(LEGEND_WIDTH), &items);
    doc
}

fn sort_rows_by_time(rows: &mut [StackedRow]) {
    rows.sort_by(|a, b| match (a.key.parse::<f64>(), b.key.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(core::cmp::Ordering::Equal),
        _ => a.key.cmp(&b.key),
    });
}

#[cfg(test)]
mod tests {
    use civichart_model::{AggregationDefinition, Dataset, Record, SchemaCatalog, Value};

    use super::*;

    fn context_parts() -> (Dataset, AggregationDefinition, SchemaCatalog) {
        let rows = [
            ("2023-02-01", "Noise", 5.0),
            ("2023-01-01", "Noise", 30.0),
            ("2023-01-01", "Heat", 10.0),
            ("2023-02-01", "Heat", 15.0),
        ];
        let dataset = Dataset::from_records(
            rows.iter()
                .map(|(t, c, v)| {
                    let mut r = Record::new();
                    r.set("created_month", Value::from(*t))
                        .set("complaint_type", Value::from(*c))
                        .set("num_of_requests", Value::from(*v));
                    r
                })
                .collect(),
        );
        let definition: AggregationDefinition = serde_json::from_str(
            r#"{
                "dimensions": ["created_month", "complaint_type"],
                "measures": [{"field": "unique_key", "alias": "num_of_requests"}],
                "timeDimension": ["created_month"],
                "categoricalDimension": ["complaint_type"]
            }"#,
        )
        .unwrap();
        (dataset, definition, SchemaCatalog::new())
    }

    #[test]
    fn one_area_band_per_subgroup() {
        let (dataset, definition, schema) = context_parts();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render(&ctx, Size::default(), false).to_svg_string();
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("complaint_type: Noise"));
        assert!(svg.contains("complaint_type: Heat"));
    }

    #[test]
    fn time_labels_are_chronological_month_labels() {
        let (dataset, definition, schema) = context_parts();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render(&ctx, Size::default(), false).to_svg_string();
        let jan = svg.find("Jan 2023").expect("January label");
        let feb = svg.find("Feb 2023").expect("February label");
        assert!(jan < feb);
    }

    #[test]
    fn normalized_mode_pins_the_axis_to_one_hundred() {
        let (dataset, definition, schema) = context_parts();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render(&ctx, Size::default(), true).to_svg_string();
        assert!(svg.contains(">100<"));
    }

    #[test]
    fn a_single_time_value_is_not_enough() {
        let mut record = Record::new();
        record
            .set("created_month", Value::from("2023-01-01"))
            .set("complaint_type", Value::from("Noise"))
            .set("num_of_requests", Value::from(5.0));
        let dataset = Dataset::from_records(vec![record]);
        let (_, definition, schema) = context_parts();
        let ctx = ChartContext::new(&dataset, &definition, &schema);
        let svg = render(&ctx, Size::default(), false).to_svg_string();
        assert!(svg.contains("At least two time values"));
    }
}
