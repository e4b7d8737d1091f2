// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tagged record values.

use core::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A longitude/latitude pair carried by geographic point fields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinate {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl Coordinate {
    /// Creates a coordinate from longitude/latitude degrees.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A single record field value.
///
/// Records are untyped maps on the wire; this tagged form lets consumers
/// check the kind they expect (`as_number`, `as_text`) and skip mismatches
/// explicitly rather than propagating `NaN` into labels.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value (category keys, formatted dates, region names).
    Text(String),
    /// A numeric value (measures, datepart dimensions).
    Number(f64),
    /// A geographic point.
    Coord(Coordinate),
}

impl Value {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the coordinate, if this is a geographic point.
    pub fn as_coord(&self) -> Option<Coordinate> {
        match self {
            Self::Coord(c) => Some(*c),
            _ => None,
        }
    }

    /// Renders the value as a grouping/display key.
    ///
    /// Numbers that are whole render without a decimal point so datepart
    /// dimensions (`2023.0`) group under `"2023"`.
    pub fn display_key(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Coord(c) => format!("({}, {})", c.lon, c.lat),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_key())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Coordinate> for Value {
    fn from(c: Coordinate) -> Self {
        Self::Coord(c)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number, a [lon, lat] pair, or a {latitude, longitude} object")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Text(String::new()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let lon: f64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &"a [lon, lat] pair"))?;
        let lat: f64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &"a [lon, lat] pair"))?;
        // Drain any trailing elements so the deserializer stays consistent.
        while seq.next_element::<serde_json::Value>()?.is_some() {}
        Ok(Value::Coord(Coordinate::new(lon, lat)))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut lon = None;
        let mut lat = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "longitude" | "lon" | "lng" => lon = Some(map.next_value::<f64>()?),
                "latitude" | "lat" => lat = Some(map.next_value::<f64>()?),
                _ => {
                    map.next_value::<serde_json::Value>()?;
                }
            }
        }
        match (lon, lat) {
            (Some(lon), Some(lat)) => Ok(Value::Coord(Coordinate::new(lon, lat))),
            _ => Err(de::Error::custom(
                "coordinate object requires longitude and latitude",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_scalars() {
        let v: Value = serde_json::from_str("\"Brooklyn\"").unwrap();
        assert_eq!(v, Value::Text("Brooklyn".to_owned()));

        let v: Value = serde_json::from_str("42").unwrap();
        assert_eq!(v.as_number(), Some(42.0));
    }

    #[test]
    fn deserializes_coordinates_from_pair_and_object() {
        let v: Value = serde_json::from_str("[-73.95, 40.65]").unwrap();
        assert_eq!(v.as_coord(), Some(Coordinate::new(-73.95, 40.65)));

        let v: Value =
            serde_json::from_str(r#"{"latitude": 40.65, "longitude": -73.95}"#).unwrap();
        assert_eq!(v.as_coord(), Some(Coordinate::new(-73.95, 40.65)));
    }

    #[test]
    fn display_key_drops_trailing_zero_fraction() {
        assert_eq!(Value::Number(2023.0).display_key(), "2023");
        assert_eq!(Value::Number(3.5).display_key(), "3.5");
        assert_eq!(Value::from("Queens").display_key(), "Queens");
    }

    #[test]
    fn typed_accessors_reject_mismatches() {
        let v = Value::from("Bronx");
        assert!(v.as_number().is_none());
        assert!(v.as_coord().is_none());
    }
}
