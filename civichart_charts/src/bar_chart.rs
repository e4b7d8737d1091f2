// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single bar chart: one categorical dimension, one measure.

use kurbo::Rect;

use civichart_shape::group_totals;

use crate::axis;
use crate::layout::{Frame, Size};
use crate::palette;
use crate::registry::ChartContext;
use crate::scale::{measure_scale, ScaleBand};
use crate::svg::SvgDocument;
use crate::tooltip::TooltipContent;

/// Renders ranked bars, tallest first.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let Some(dimension) = ctx.definition.primary_dimension() else {
        return SvgDocument::message(size, "A dimension is required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };

    let groups = group_totals(ctx.dataset, dimension, measure);
    if groups.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }

    let frame = Frame::new(size);
    let plot = frame.plot();
    let keys: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
    let band = ScaleBand::new(keys, (plot.x0, plot.x1));
    let max = groups.iter().map(|g| g.total).fold(0.0, f64::max);
    let y = measure_scale(max, (plot.y1, plot.y0));

    let mut doc = SvgDocument::new(size);
    let fill = palette::series_fill(0);
    let dim_label = ctx.label(dimension);
    let measure_label = ctx.label(measure);
    for (i, group) in groups.iter().enumerate() {
        let top = y.map(group.total.max(0.0));
        let tip = TooltipContent::new()
            .with_dimension(dim_label, &group.key)
            .with_measure(measure_label, group.total);
        doc.push_rect(
            Rect::new(band.x(i), top, band.x(i) + band.band_width(), plot.y1),
            &fill,
            Some(&tip.to_text()),
        );
    }
    axis::draw_measure_axis_left(&mut doc, plot, &y);
    axis::draw_band_axis_bottom(&mut doc, plot, &band);
    doc
}
