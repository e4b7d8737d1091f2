// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic boundary handling for the map charts.
//!
//! Boundary files are GeoJSON feature collections. Each boundary kind knows
//! which feature property names its regions, since the civic datasets ship
//! with inconsistent property spellings.

use kurbo::{Point, Rect};
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a boundary file.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The file was not valid GeoJSON.
    #[error("failed to parse boundary file: {0}")]
    Parse(#[from] serde_json::Error),
    /// The file parsed but held no polygon with a usable name.
    #[error("boundary file contains no usable regions")]
    Empty,
}

/// The kind of region a boundary file describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Borough outlines.
    Borough,
    /// County outlines.
    County,
    /// Neighborhood tabulation areas.
    Neighborhood,
    /// ZIP code areas.
    Zip,
}

impl BoundaryKind {
    /// Maps a geographic dimension field to the boundary kind that joins
    /// with it. `location` carries point coordinates, not region names, so
    /// it maps to no boundary.
    pub fn for_dimension(field: &str) -> Option<Self> {
        match field {
            "borough" => Some(Self::Borough),
            "county" => Some(Self::County),
            "neighborhood_name" => Some(Self::Neighborhood),
            "incident_zip" => Some(Self::Zip),
            _ => None,
        }
    }

    /// Feature property names tried in order when extracting a region name.
    fn name_keys(self) -> &'static [&'static str] {
        match self {
            Self::Borough => &["boro_name", "BoroName", "borough", "name"],
            Self::County => &["county", "NAME", "name"],
            Self::Neighborhood => &["ntaname", "neighborhood", "name"],
            Self::Zip => &["postalCode", "ZIPCODE", "zipcode", "modzcta", "name"],
        }
    }
}

/// One named region: the exterior rings of its polygons, in `(lon, lat)`
/// pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Region name, used to join against dataset keys.
    pub name: String,
    /// One exterior ring per polygon. Interior holes are dropped.
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// A parsed boundary file: regions of one kind.
#[derive(Clone, Debug)]
pub struct GeoBoundaries {
    kind: BoundaryKind,
    regions: Vec<Region>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

impl GeoBoundaries {
    /// Parses a GeoJSON feature collection, keeping polygon features that
    /// carry a recognizable name for `kind`.
    ///
    /// Features with unsupported geometry or no name property are skipped
    /// with a warning; a file yielding zero regions is an error.
    pub fn from_geojson_str(kind: BoundaryKind, json: &str) -> Result<Self, GeoError> {
        let raw: RawCollection = serde_json::from_str(json)?;
        let mut regions = Vec::new();
        let mut skipped = 0_usize;
        for feature in raw.features {
            let Some(name) = feature_name(kind, &feature.properties) else {
                skipped += 1;
                continue;
            };
            let rings = match feature.geometry {
                Some(RawGeometry::Polygon { coordinates }) => exterior_ring(&coordinates)
                    .map(|ring| vec![ring])
                    .unwrap_or_default(),
                Some(RawGeometry::MultiPolygon { coordinates }) => coordinates
                    .iter()
                    .filter_map(|polygon| exterior_ring(polygon))
                    .collect(),
                _ => Vec::new(),
            };
            if rings.is_empty() {
                skipped += 1;
                continue;
            }
            regions.push(Region { name, rings });
        }
        if skipped > 0 {
            tracing::warn!(?kind, skipped, "skipped unusable boundary features");
        }
        if regions.is_empty() {
            return Err(GeoError::Empty);
        }
        tracing::debug!(?kind, regions = regions.len(), "boundaries loaded");
        Ok(Self { kind, regions })
    }

    /// The boundary kind these regions describe.
    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    /// The parsed regions.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The `(lon_min, lat_min, lon_max, lat_max)` box covering all rings.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut lon = (f64::INFINITY, f64::NEG_INFINITY);
        let mut lat = (f64::INFINITY, f64::NEG_INFINITY);
        for region in &self.regions {
            for ring in &region.rings {
                for (x, y) in ring {
                    lon.0 = lon.0.min(*x);
                    lon.1 = lon.1.max(*x);
                    lat.0 = lat.0.min(*y);
                    lat.1 = lat.1.max(*y);
                }
            }
        }
        (lon.0.is_finite() && lat.0.is_finite()).then_some((lon.0, lat.0, lon.1, lat.1))
    }
}

fn feature_name(kind: BoundaryKind, properties: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    for key in kind.name_keys() {
        match properties.get(*key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn exterior_ring(polygon: &[Vec<Vec<f64>>]) -> Option<Vec<(f64, f64)>> {
    let ring = polygon.first()?;
    let points: Vec<(f64, f64)> = ring
        .iter()
        .filter_map(|position| match position.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some((*lon, *lat)),
            _ => None,
        })
        .collect();
    (points.len() >= 3).then_some(points)
}

/// An equirectangular projection fitted to a plot rectangle.
///
/// Longitudes are compressed by the cosine of the central latitude so
/// mid-latitude regions keep their familiar proportions.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    mid_lon: f64,
    mid_lat: f64,
    lon_stretch: f64,
    scale: f64,
    center: Point,
}

impl Projector {
    /// Fits the `(lon_min, lat_min, lon_max, lat_max)` box into `rect`,
    /// preserving aspect and centering the result.
    pub fn fit(bounds: (f64, f64, f64, f64), rect: Rect) -> Self {
        let (lon0, lat0, lon1, lat1) = bounds;
        let mid_lon = (lon0 + lon1) / 2.0;
        let mid_lat = (lat0 + lat1) / 2.0;
        let lon_stretch = mid_lat.to_radians().cos().max(1e-6);
        let width_deg = ((lon1 - lon0) * lon_stretch).abs().max(1e-9);
        let height_deg = (lat1 - lat0).abs().max(1e-9);
        let scale = (rect.width() / width_deg).min(rect.height() / height_deg);
        Self {
            mid_lon,
            mid_lat,
            lon_stretch,
            scale,
            center: rect.center(),
        }
    }

    /// Projects a `(lon, lat)` pair into plot coordinates. Latitude grows
    /// north, plot y grows down.
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        Point::new(
            self.center.x + (lon - self.mid_lon) * self.lon_stretch * self.scale,
            self.center.y - (lat - self.mid_lat) * self.scale,
        )
    }
}
