// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked bar chart, plain and normalized to 100%.

use kurbo::Rect;

use civichart_shape::stack_by;

use crate::axis;
use crate::layout::{Frame, Size};
use crate::legend::{self, LEGEND_WIDTH};
use crate::palette;
use crate::registry::ChartContext;
use crate::scale::{measure_scale, percentage_scale, ScaleBand};
use crate::svg::SvgDocument;
use crate::tooltip::TooltipContent;

/// Renders stacked segments per primary group.
///
/// In normalized mode every stack spans the full axis and segments render
/// their share of the row total; tooltips then show both the percentage and
/// the raw value.
pub fn render(ctx: &ChartContext<'_>, size: Size, normalized: bool) -> SvgDocument {
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
    let y = if normalized {
        percentage_scale((plot.y1, plot.y0))
    } else {
        measure_scale(table.max_row_total(), (plot.y1, plot.y0))
    };

    let fills = palette::series_fills(table.subgroups.len());
    let mut doc = SvgDocument::new(size);
    let primary_label = ctx.label(primary);
    let secondary_label = ctx.label(secondary);
    let measure_label = ctx.label(measure);
    for (row_i, row) in table.rows.iter().enumerate() {
        let x0 = band.x(row_i);
        let x1 = x0 + band.band_width();
        let mut cursor = 0.0;
        for (sub_i, cell) in row.cells.iter().enumerate() {
            let extent = if normalized { cell.share } else { cell.raw };
            if extent <= 0.0 {
                continue;
            }
            let tip = if normalized {
                TooltipContent::new()
                    .with_dimension(primary_label, &row.key)
                    .with_dimension(secondary_label, &table.subgroups[sub_i])
                    .with_percent(measure_label, cell.share, cell.raw)
            } else {
                TooltipContent::new()
                    .with_dimension(primary_label, &row.key)
                    .with_dimension(secondary_label, &table.subgroups[sub_i])
                    .with_measure(measure_label, cell.raw)
            };
            doc.push_rect(
                Rect::new(x0, y.map(cursor + extent), x1, y.map(cursor)),
                &fills[sub_i],
                Some(&tip.to_text()),
            );
            cursor += extent;
        }
    }
    axis::draw_measure_axis_left(&mut doc, plot, &y);
    axis::draw_band_axis_bottom(&mut doc, plot, &band);
    let items = legend::legend_items(&table.subgroups, &fills);
    legend::draw_legend(&mut doc, frame.legend_area(LEGEND_WIDTH), &items);
    doc
}
