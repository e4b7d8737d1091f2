// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis drawing helpers shared by the cartesian renderers.

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::Color;

use crate::format::{format_value, truncate_label};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::svg::{SvgDocument, TextAnchor};

const TICK_SIZE: f64 = 4.0;
const TICK_PADDING: f64 = 4.0;
const LABEL_FONT: f64 = 11.0;
const BAND_LABEL_LENGTH: usize = 12;
const MAX_BOTTOM_LABELS: usize = 8;

fn axis_color() -> Color {
    css::DIM_GRAY
}

/// Draws the left measure axis: a domain line, ticks, and abbreviated
/// value labels.
///
/// `scale` must already map domain values onto the plot's vertical extent.
pub fn draw_measure_axis_left(doc: &mut SvgDocument, plot: Rect, scale: &ScaleLinear) {
    doc.push_line(
        Point::new(plot.x0, plot.y0),
        Point::new(plot.x0, plot.y1),
        axis_color(),
        1.0,
    );
    for tick in scale.ticks(5) {
        let y = scale.map(tick);
        doc.push_line(
            Point::new(plot.x0 - TICK_SIZE, y),
            Point::new(plot.x0, y),
            axis_color(),
            1.0,
        );
        doc.push_text(
            Point::new(plot.x0 - TICK_SIZE - TICK_PADDING, y + LABEL_FONT * 0.35),
            &format_value(tick),
            LABEL_FONT,
            TextAnchor::End,
            axis_color(),
        );
    }
}

/// Draws the bottom category axis: a domain line plus one truncated label
/// centered under each band.
pub fn draw_band_axis_bottom(doc: &mut SvgDocument, plot: Rect, band: &ScaleBand) {
    doc.push_line(
        Point::new(plot.x0, plot.y1),
        Point::new(plot.x1, plot.y1),
        axis_color(),
        1.0,
    );
    let bw = band.band_width();
    // Wide charts drop every other label rather than overlapping them.
    let stride = (band.count() / MAX_BOTTOM_LABELS).max(1);
    for (i, key) in band.keys().iter().enumerate() {
        if i % stride != 0 {
            continue;
        }
        doc.push_text(
            Point::new(band.x(i) + bw / 2.0, plot.y1 + TICK_SIZE + LABEL_FONT + 2.0),
            &truncate_label(key, BAND_LABEL_LENGTH),
            LABEL_FONT,
            TextAnchor::Middle,
            axis_color(),
        );
    }
}

/// Draws the bottom time axis from pre-positioned `(x, label)` pairs,
/// thinning labels so at most a handful render.
pub fn draw_time_axis_bottom(doc: &mut SvgDocument, plot: Rect, points: &[(f64, String)]) {
    doc.push_line(
        Point::new(plot.x0, plot.y1),
        Point::new(plot.x1, plot.y1),
        axis_color(),
        1.0,
    );
    let stride = (points.len() / MAX_BOTTOM_LABELS).max(1);
    for (i, (x, label)) in points.iter().enumerate() {
        if i % stride != 0 {
            continue;
        }
        doc.push_line(
            Point::new(*x, plot.y1),
            Point::new(*x, plot.y1 + TICK_SIZE),
            axis_color(),
            1.0,
        );
        doc.push_text(
            Point::new(*x, plot.y1 + TICK_SIZE + LABEL_FONT + 2.0),
            label,
            LABEL_FONT,
            TextAnchor::Middle,
            axis_color(),
        );
    }
}
