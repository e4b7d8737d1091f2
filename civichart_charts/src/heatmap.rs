// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heat map: geographic point density weighted by a measure.
//!
//! Unlike the choropleth this reads coordinate values directly from the geo
//! dimension, so it needs no boundary file. Weight maps to marker area and
//! the translucent fill lets overlapping markers darken naturally.

use peniko::color::palette::css;
use peniko::Brush;

use crate::layout::{Frame, Margins, Size};
use crate::registry::ChartContext;
use crate::geo::Projector;
use crate::svg::SvgDocument;
use crate::tooltip::TooltipContent;

const MIN_RADIUS: f64 = 2.5;
const MAX_RADIUS: f64 = 14.0;

/// Renders one translucent marker per coordinate-bearing record.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let Some(geo_field) = ctx.definition.geo_dimension() else {
        return SvgDocument::message(size, "A geographic dimension is required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };

    let mut points: Vec<(f64, f64, f64)> = Vec::new();
    let mut skipped = 0_usize;
    for record in ctx.dataset {
        let Some(coord) = record.coord(geo_field) else {
            skipped += 1;
            continue;
        };
        let weight = record.number(measure).filter(|w| w.is_finite() && *w > 0.0);
        points.push((coord.lon, coord.lat, weight.unwrap_or(1.0)));
    }
    if skipped > 0 {
        tracing::warn!(geo_field, skipped, "records without coordinates skipped");
    }
    if points.is_empty() {
        return SvgDocument::message(size, "No location coordinates to display");
    }

    let mut lon = (f64::INFINITY, f64::NEG_INFINITY);
    let mut lat = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y, _) in &points {
        lon.0 = lon.0.min(*x);
        lon.1 = lon.1.max(*x);
        lat.0 = lat.0.min(*y);
        lat.1 = lat.1.max(*y);
    }
    let frame = Frame {
        size,
        margins: Margins {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 20.0,
        },
    };
    let projector = Projector::fit((lon.0, lat.0, lon.1, lat.1), frame.plot());
    let max_weight = points.iter().map(|(_, _, w)| *w).fold(0.0, f64::max);

    let mut doc = SvgDocument::new(size);
    let fill = Brush::Solid(css::CRIMSON.with_alpha(0.35));
    let measure_label = ctx.label(measure);
    for (x, y, weight) in &points {
        let t = if max_weight > 0.0 {
            (weight / max_weight).sqrt()
        } else {
            0.0
        };
        let radius = MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * t;
        let tip = TooltipContent::new()
            .with_dimension("Location", &format!("{y:.4}, {x:.4}"))
            .with_measure(measure_label, *weight);
        doc.push_circle(projector.project(*x, *y), radius, &fill, Some(&tip.to_text()));
    }
    doc
}

#[cfg(test)]
mod tests {
    use civichart_model::{AggregationDefinition, Dataset, Record, SchemaCatalog, Value};
    use civichart_model::Coordinate;

    use super::*;

    fn definition() -> AggregationDefinition {
        serde_json::from_str(
            r#"{
                "dimensions": ["location"],
                "measures": [{"field": "unique_key", "alias": "num_of_requests"}],
                "geoDimension": ["location"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn each_coordinate_record_gets_a_marker() {
        let records = [
            (Coordinate::new(-73.9, 40.7), 10.0),
            (Coordinate::new(-73.8, 40.8), 40.0),
        ];
        let dataset = Dataset::from_records(
            records
                .iter()
                .map(|(coord, w)| {
                    let mut r = Record::new();
                    r.set("location", Value::from(*coord))
                        .set("num_of_requests", Value::from(*w));
                    r
                })
                .collect(),
        );
        let def = definition();
        let schema = SchemaCatalog::new();
        let ctx = ChartContext::new(&dataset, &def, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("fill-opacity"));
        assert!(svg.contains("num_of_requests: 40"));
    }

    #[test]
    fn records_without_coordinates_are_skipped() {
        let mut with_coord = Record::new();
        with_coord
            .set("location", Value::from(Coordinate::new(-73.9, 40.7)))
            .set("num_of_requests", Value::from(5.0));
        let mut without = Record::new();
        without
            .set("location", Value::from("unknown"))
            .set("num_of_requests", Value::from(5.0));
        let dataset = Dataset::from_records(vec![with_coord, without]);
        let def = definition();
        let schema = SchemaCatalog::new();
        let ctx = ChartContext::new(&dataset, &def, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn all_text_coordinates_render_a_message() {
        let mut record = Record::new();
        record
            .set("location", Value::from("nowhere"))
            .set("num_of_requests", Value::from(5.0));
        let dataset = Dataset::from_records(vec![record]);
        let def = definition();
        let schema = SchemaCatalog::new();
        let ctx = ChartContext::new(&dataset, &def, &schema);
        let svg = render(&ctx, Size::default()).to_svg_string();
        assert!(svg.contains("No location coordinates"));
    }
}
