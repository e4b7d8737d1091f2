// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line chart: one time dimension, one measure.

use kurbo::{BezPath, Point};
use peniko::color::palette::css;

use civichart_shape::series_totals;

use crate::axis;
use crate::layout::{Frame, Size};
use crate::palette;
use crate::registry::ChartContext;
use crate::scale::{measure_scale, ScaleTime};
use crate::svg::SvgDocument;
use crate::time::{self, TimeGrain};
use crate::tooltip::TooltipContent;

/// Renders a chronological line with a point marker per time value.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let Some(time_field) = ctx.definition.time_dimension() else {
        return SvgDocument::message(size, "A time dimension is required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };

    let series = series_totals(ctx.dataset, time_field, measure);
    if series.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }

    let grain = TimeGrain::infer(time_field);
    let datepart = time::is_datepart(time_field);
    let frame = Frame::new(size);
    let plot = frame.plot();
    let Some(x) = ScaleTime::from_series(&series, grain, datepart, (plot.x0, plot.x1)) else {
        return SvgDocument::message(size, "No data to display");
    };
    let max = series.iter().map(|e| e.total).fold(0.0, f64::max);
    let y = measure_scale(max, (plot.y1, plot.y0));

    let mut points: Vec<(Point, &str, f64)> = Vec::with_capacity(series.len());
    for entry in &series {
        let Some(coord) = time::time_coord(&entry.key, datepart) else {
            tracing::warn!(key = %entry.key, time_field, "unparseable time key skipped");
            continue;
        };
        points.push((
            Point::new(x.map(coord), y.map(entry.total)),
            entry.key.as_str(),
            entry.total,
        ));
    }
    if points.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }

    let mut doc = SvgDocument::new(size);
    let stroke = match palette::series_fill(0) {
        peniko::Brush::Solid(color) => color,
        _ => css::CORNFLOWER_BLUE,
    };
    if points.len() > 1 {
        let mut path = BezPath::new();
        path.move_to(points[0].0);
        for (p, _, _) in &points[1..] {
            path.line_to(*p);
        }
        doc.push_path(&path, None, Some((stroke, 2.0)), None);
    }
    let time_label = ctx.label(time_field);
    let measure_label = ctx.label(measure);
    for (p, key, total) in &points {
        let tip = TooltipContent::new()
            .with_dimension(time_label, &time::format_time_key(key, grain, datepart))
            .with_measure(measure_label, *total);
        doc.push_circle(*p, 3.5, &palette::series_fill(0), Some(&tip.to_text()));
    }

    axis::draw_measure_axis_left(&mut doc, plot, &y);
    let ticks: Vec<(f64, String)> = points
        .iter()
        .map(|(p, key, _)| (p.x, time::format_time_key(key, grain, datepart)))
        .collect();
    axis::draw_time_axis_bottom(&mut doc, plot, &ticks);
    doc
}
