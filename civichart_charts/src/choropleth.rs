// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choropleth map: boundary regions shaded by a measure.

use kurbo::BezPath;
use peniko::color::palette::css;

use civichart_shape::group_totals;

use crate::geo::{Projector, Region};
use crate::layout::{Frame, Margins, Size};
use crate::palette;
use crate::registry::ChartContext;
use crate::svg::SvgDocument;
use crate::tooltip::TooltipContent;

/// Renders boundary polygons shaded on a sequential ramp.
///
/// Dataset keys join to region names case-insensitively; regions with no
/// matching data stay neutral but still draw, so the map keeps its shape.
pub fn render(ctx: &ChartContext<'_>, size: Size) -> SvgDocument {
    let Some(geo_field) = ctx.definition.geo_dimension() else {
        return SvgDocument::message(size, "A geographic dimension is required for this chart");
    };
    let Some(measure) = ctx.measure_field() else {
        return SvgDocument::message(size, "A measure is required for this chart");
    };
    let Some(boundaries) = ctx.boundaries else {
        return SvgDocument::message(size, "Boundary data is unavailable");
    };

    let groups = group_totals(ctx.dataset, geo_field, measure);
    if groups.is_empty() {
        return SvgDocument::message(size, "No data to display");
    }
    let max = groups.iter().map(|g| g.total).fold(0.0, f64::max);

    let frame = Frame {
        size,
        margins: Margins {
            top: 10.0,
            right: 10.0,
            bottom: 10.0,
            left: 10.0,
        },
    };
    let Some(bounds) = boundaries.bounds() else {
        return SvgDocument::message(size, "Boundary data is unavailable");
    };
    let projector = Projector::fit(bounds, frame.plot());

    let mut doc = SvgDocument::new(size);
    let geo_label = ctx.label(geo_field);
    let measure_label = ctx.label(measure);
    let mut matched = 0_usize;
    for region in boundaries.regions() {
        let total = groups
            .iter()
            .find(|g| g.key.eq_ignore_ascii_case(&region.name))
            .map(|g| g.total);
        let fill = match total {
            Some(t) if max > 0.0 => {
                matched += 1;
                palette::sequential_fill(t / max)
            }
            Some(_) => {
                matched += 1;
                palette::sequential_fill(0.0)
            }
            None => palette::neutral_fill(),
        };
        let tip = match total {
            Some(t) => TooltipContent::new()
                .with_dimension(geo_label, &region.name)
                .with_measure(measure_label, t),
            None => TooltipContent::new().with_dimension(geo_label, &region.name),
        };
        doc.push_path(
            &region_path(region, &projector),
            Some(&fill),
            Some((css::WHITE, 1.0)),
            Some(&tip.to_text()),
        );
    }
    if matched == 0 {
        tracing::warn!(geo_field, "no dataset key matched a boundary region");
    }
    doc
}

fn region_path(region: &Region, projector: &Projector) -> BezPath {
    let mut path = BezPath::new();
    for ring in &region.rings {
        for (i, (lon, lat)) in ring.iter().enumerate() {
            let p = projector.project(*lon, *lat);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();
    }
    path
}
