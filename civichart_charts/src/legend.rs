// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend content and drawing.

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::Brush;

use crate::format::truncate_label;
use crate::svg::{SvgDocument, TextAnchor};

/// Reserved width of the legend column.
pub const LEGEND_WIDTH: f64 = 150.0;

const SWATCH: f64 = 12.0;
const ROW_HEIGHT: f64 = 18.0;
const LABEL_LENGTH: usize = 16;

/// One legend entry: a label and its swatch fill.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Series label.
    pub label: String,
    /// Swatch fill, matching the series marks.
    pub fill: Brush,
}

/// Builds legend items from labels paired with fills by index.
///
/// If the lists have different lengths, the shorter length wins.
pub fn legend_items(labels: &[String], fills: &[Brush]) -> Vec<LegendItem> {
    labels
        .iter()
        .zip(fills.iter())
        .map(|(label, fill)| LegendItem {
            label: label.clone(),
            fill: fill.clone(),
        })
        .collect()
}

/// Draws a vertical legend into `area`, one swatch-and-label row per item.
///
/// Rows that would overflow the area are dropped rather than clipped
/// mid-swatch.
pub fn draw_legend(doc: &mut SvgDocument, area: Rect, items: &[LegendItem]) {
    let max_rows = if ROW_HEIGHT > 0.0 {
        (area.height() / ROW_HEIGHT).floor().max(0.0)
    } else {
        0.0
    };
    for (i, item) in items.iter().enumerate() {
        if (i as f64) >= max_rows {
            break;
        }
        let y = area.y0 + ROW_HEIGHT * i as f64;
        doc.push_rect(
            Rect::new(area.x0, y, area.x0 + SWATCH, y + SWATCH),
            &item.fill,
            None,
        );
        doc.push_text(
            Point::new(area.x0 + SWATCH + 6.0, y + SWATCH - 2.0),
            &truncate_label(&item.label, LABEL_LENGTH),
            12.0,
            TextAnchor::Start,
            css::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::Size;
    use crate::palette::series_fills;

    use super::*;

    #[test]
    fn items_pair_labels_with_fills_by_index() {
        let labels = vec![String::from("Noise"), String::from("Heat")];
        let fills = series_fills(2);
        let items = legend_items(&labels, &fills);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Noise");
        assert_eq!(items[0].fill, fills[0]);
        assert_eq!(items[1].fill, fills[1]);
    }

    #[test]
    fn shorter_list_wins() {
        let labels = vec![String::from("Noise")];
        let items = legend_items(&labels, &series_fills(5));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn overflowing_rows_are_dropped() {
        let labels: Vec<String> = (0..20).map(|i| format!("series {i}")).collect();
        let items = legend_items(&labels, &series_fills(20));
        let mut doc = SvgDocument::new(Size::new(300.0, 100.0));
        // Area fits five 18px rows.
        draw_legend(&mut doc, Rect::new(200.0, 0.0, 300.0, 90.0), &items);
        let svg = doc.to_svg_string();
        assert!(svg.contains("series 4"));
        assert!(!svg.contains("series 5"));
    }
}
