// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical and sequential color assignment.

use peniko::color::palette::css;
use peniko::{Brush, Color};

const SERIES: [Color; 8] = [
    css::CORNFLOWER_BLUE,
    css::ORANGE,
    css::MEDIUM_SEA_GREEN,
    css::CRIMSON,
    css::GOLDENROD,
    css::SLATE_BLUE,
    css::DARK_CYAN,
    css::HOT_PINK,
];

/// Returns a categorical fill palette for `count` series.
///
/// Colors are taken from named CSS colors and repeat if `count` exceeds the
/// palette length. Assignment is by index, so a subgroup's position in the
/// global ranking decides its color in the chart and in the legend.
pub fn series_fills(count: usize) -> Vec<Brush> {
    (0..count)
        .map(|i| Brush::Solid(SERIES[i % SERIES.len()]))
        .collect()
}

/// Returns the fill for a single series index.
pub fn series_fill(index: usize) -> Brush {
    Brush::Solid(SERIES[index % SERIES.len()])
}

/// The neutral fill used for context marks (outer bars, unmatched regions).
pub fn neutral_fill() -> Brush {
    Brush::Solid(css::LIGHT_GRAY)
}

/// Interpolates a sequential ramp from pale to saturated blue.
///
/// `t` is clamped to `0..=1`; choropleth regions map `value / max` through
/// this.
pub fn sequential_fill(t: f64) -> Brush {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let light = (0xdb_u8, 0xe9_u8, 0xf6_u8);
    let dark = (0x08_u8, 0x30_u8, 0x6b_u8);
    let lerp = |a: u8, b: u8| -> u8 {
        let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "interpolation of u8 endpoints stays within 0..=255"
        )]
        {
            v.round().clamp(0.0, 255.0) as u8
        }
    };
    Brush::Solid(Color::from_rgb8(
        lerp(light.0, dark.0),
        lerp(light.1, dark.1),
        lerp(light.2, dark.2),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_repeat_beyond_palette_length() {
        let fills = series_fills(10);
        assert_eq!(fills.len(), 10);
        assert_eq!(fills[0], fills[8]);
        assert_eq!(fills[1], fills[9]);
    }

    #[test]
    fn same_index_always_gets_the_same_color() {
        assert_eq!(series_fill(3), series_fills(8)[3]);
    }

    #[test]
    fn sequential_ramp_endpoints() {
        assert_eq!(
            sequential_fill(0.0),
            Brush::Solid(Color::from_rgb8(0xdb, 0xe9, 0xf6))
        );
        assert_eq!(
            sequential_fill(1.0),
            Brush::Solid(Color::from_rgb8(0x08, 0x30, 0x6b))
        );
    }

    #[test]
    fn sequential_ramp_clamps_out_of_range() {
        assert_eq!(sequential_fill(-2.0), sequential_fill(0.0));
        assert_eq!(sequential_fill(5.0), sequential_fill(1.0));
        assert_eq!(sequential_fill(f64::NAN), sequential_fill(0.0));
    }
}
