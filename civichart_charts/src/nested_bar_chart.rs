// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested bar chart: detail bars drawn inside wider context bars.
//!
//! With two dimensions, the outer bar shows the primary-group total and the
//! subgroup bars nest inside it. With one dimension but two measures, the
//! second measure nests inside the first.

use kurbo::Rect;

use civichart_shape::{group_totals, stack_by};

use crate::axis;
use crate::layout::{Frame, Size};
use crate::legend::{self, LEGEND_WIDTH};
use crate::palette;
use crate::registry::ChartContext;
use crate::scale::{measure_scale, ScaleBand};
use crate::svg::SvgDocument;
use crate::tooltip::TooltipContent;

/// Renders nested bars from two dimensions or two measures.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let Some(primary) = ctx.definition.primary_dimension() else {
        return SvgDocument::message(size, "A dimension is required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };
    if let Some(secondary) = ctx.definition.secondary_dimension() {
        return render_dimension_nested(ctx, size, primary, secondary, measure);
    }
    if let Some(second_measure) = ctx.definition.measures.get(1) {
        return render_measure_nested(ctx, size, primary, measure, second_measure.result_field());
    }
    SvgDocument::message(
        size,
        "A second dimension or measure is required for this chart",
    )
}

fn render_dimension_nested(
    ctx: &ChartContext<'_>,
    size: Size,
    primary: &str,
    secondary: &str,
    measure: &str,
) -> SvgDocument {
    let table = stack_by(ctx.dataset, primary, secondary, measure);
    if table.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }

    let frame = Frame::with_legend(size, LEGEND_WIDTH);
    let plot = frame.plot();
    let keys: Vec<String> = table.rows.iter().map(|r| r.key.clone()).collect();
    let band = ScaleBand::new(keys, (plot.x0, plot.x1));
    // Outer bars show row totals, so the axis covers the tallest total.
    let y = measure_scale(table.max_row_total(), (plot.y1, plot.y0));

    let fills = palette::series_fills(table.subgroups.len());
    let mut doc = SvgDocument::new(size);
    let primary_label = ctx.label(primary);
    let secondary_label = ctx.label(secondary);
    let measure_label = ctx.label(measure);
    let sub_count = table.subgroups.len().max(1);
    for (row_i, row) in table.rows.iter().enumerate() {
        let x0 = band.x(row_i);
        let bw = band.band_width();
        let outer_tip = TooltipContent::new()
            .with_dimension(primary_label, &row.key)
            .with_measure(measure_label, row.total);
        doc.push_rect(
            Rect::new(x0, y.map(row.total.max(0.0)), x0 + bw, plot.y1),
            &palette::neutral_fill(),
            Some(&outer_tip.to_text()),
        );

        // Detail bars sit on a narrower inset so the context bar stays
        // visible around them.
        let inset = bw * 0.1;
        let inner_width = (bw - 2.0 * inset) / sub_count as f64;
        for (sub_i, cell) in row.cells.iter().enumerate() {
            if cell.raw <= 0.0 {
                continue;
            }
            let left = x0 + inset + inner_width * sub_i as f64;
            let tip = TooltipContent::new()
                .with_dimension(primary_label, &row.key)
                .with_dimension(secondary_label, &table.subgroups[sub_i])
                .with_measure(measure_label, cell.raw);
            doc.push_rect(
                Rect::new(left, y.map(cell.raw), left + inner_width, plot.y1),
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

fn render_measure_nested(
    ctx: &ChartContext<'_>,
    size: Size,
    dimension: &str,
    outer_measure: &str,
    inner_measure: &str,
) -> SvgDocument {
    let outer = group_totals(ctx.dataset, dimension, outer_measure);
    let inner = group_totals(ctx.dataset, dimension, inner_measure);
    if outer.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }

    let frame = Frame::new(size);
    let plot = frame.plot();
    let keys: Vec<String> = outer.iter().map(|g| g.key.clone()).collect();
    let band = ScaleBand::new(keys, (plot.x0, plot.x1));
    let max = outer.iter().map(|g| g.total).fold(0.0, f64::max);
    let y = measure_scale(max, (plot.y1, plot.y0));

    let mut doc = SvgDocument::new(size);
    let dim_label = ctx.label(dimension);
    let outer_label = ctx.label(outer_measure);
    let inner_label = ctx.label(inner_measure);
    for (i, group) in outer.iter().enumerate() {
        let x0 = band.x(i);
        let bw = band.band_width();
        let outer_tip = TooltipContent::new()
            .with_dimension(dim_label, &group.key)
            .with_measure(outer_label, group.total);
        doc.push_rect(
            Rect::new(x0, y.map(group.total.max(0.0)), x0 + bw, plot.y1),
            &palette::neutral_fill(),
            Some(&outer_tip.to_text()),
        );
        let Some(inner_total) = inner
            .iter()
            .find(|g| g.key == group.key)
            .map(|g| g.total)
            .filter(|t| *t > 0.0)
        else {
            continue;
        };
        let inset = bw * 0.25;
        let tip = TooltipContent::new()
            .with_dimension(dim_label, &group.key)
            .with_measure(inner_label, inner_total);
        doc.push_rect(
            Rect::new(
                x0 + inset,
                y.map(inner_total),
                x0 + bw - inset,
                plot.y1,
            ),
            &palette::series_fill(0),
            Some(&tip.to_text()),
        );
    }
    axis::draw_measure_axis_left(&mut doc, plot, &y);
    axis::draw_band_axis_bottom(&mut doc, plot, &band);
    doc
}
