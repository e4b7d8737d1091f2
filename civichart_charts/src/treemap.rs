// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap: slice-and-dice layout over one or two dimensions.
//!
//! Primary groups slice the plot into vertical columns, widest first; with a
//! second dimension each column dices into horizontal strips. Proportions
//! follow measure totals, so only positive totals get a tile.

use kurbo::{Point, Rect};

use civichart_shape::{group_totals, stack_by};

use crate::format::truncate_label;
use crate::layout::{Frame, Margins, Size};
use crate::palette;
use crate::registry::ChartContext;
use crate::svg::{SvgDocument, TextAnchor};
use crate::tooltip::TooltipContent;

const LABEL_FONT: f64 = 11.0;
const MIN_LABEL_WIDTH: f64 = 56.0;
const MIN_LABEL_HEIGHT: f64 = 18.0;

/// Renders proportional tiles for one or two dimensions.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let Some(primary) = ctx.definition.primary_dimension() else {
        return SvgDocument::message(size, "A dimension is required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };

    let groups: Vec<_> = group_totals(ctx.dataset, primary, measure)
        .into_iter()
        .filter(|g| g.total > 0.0)
        .collect();
    let grand_total: f64 = groups.iter().map(|g| g.total).sum();
    if groups.is_empty() || grand_total <= 0.0 {
        return SvgDocument::message(size, "No data to display");
    }

    let frame = Frame {
        size,
        margins: Margins {
            top: 10.0,
            right: 10.0,
            bottom: 10.0,
            left: 10.0,
        },
    };
    let plot = frame.plot();
    let secondary = ctx.definition.secondary_dimension();
    let table = secondary.map(|s| stack_by(ctx.dataset, primary, s, measure));

    let mut doc = SvgDocument::new(size);
    let primary_label = ctx.label(primary);
    let measure_label = ctx.label(measure);
    let mut x = plot.x0;
    for (i, group) in groups.iter().enumerate() {
        let width = plot.width() * group.total / grand_total;
        let column = Rect::new(x, plot.y0, x + width, plot.y1);
        x += width;

        let row = table
            .as_ref()
            .and_then(|t| t.rows.iter().find(|r| r.key == group.key));
        match (row, &table) {
            (Some(row), Some(table)) if row.total > 0.0 => {
                let secondary_label = secondary.map(|s| ctx.label(s)).unwrap_or_default();
                let mut y = column.y0;
                for (sub_i, cell) in row.cells.iter().enumerate() {
                    if cell.raw <= 0.0 {
                        continue;
                    }
                    let height = column.height() * cell.raw / row.total;
                    let tile = Rect::new(column.x0, y, column.x1, y + height);
                    y += height;
                    let tip = TooltipContent::new()
                        .with_dimension(primary_label, &group.key)
                        .with_dimension(secondary_label, &table.subgroups[sub_i])
                        .with_measure(measure_label, cell.raw);
                    doc.push_rect(tile, &palette::series_fill(sub_i), Some(&tip.to_text()));
                    draw_label(&mut doc, tile, &table.subgroups[sub_i]);
                }
            }
            _ => {
                let tip = TooltipContent::new()
                    .with_dimension(primary_label, &group.key)
                    .with_measure(measure_label, group.total);
                doc.push_rect(column, &palette::series_fill(i), Some(&tip.to_text()));
            }
        }
        draw_label(&mut doc, column, &group.key);
    }
    doc
}

fn draw_label(doc: &mut SvgDocument, tile: Rect, text: &str) {
    if tile.width() < MIN_LABEL_WIDTH || tile.height() < MIN_LABEL_HEIGHT {
        return;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "tile width is non-negative and far below usize::MAX"
    )]
    let fit = (tile.width() / (LABEL_FONT * 0.6)) as usize;
    doc.push_text(
        Point::new(tile.x0 + 4.0, tile.y0 + LABEL_FONT + 3.0),
        &truncate_label(text, fit.max(4)),
        LABEL_FONT,
        TextAnchor::Start,
        peniko::color::palette::css::BLACK,
    );
}
