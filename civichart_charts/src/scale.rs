// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities shared by every renderer.
//!
//! Measure axes always start at zero and pad the data maximum by a fixed
//! factor, so the tallest mark never touches the plot edge. The padded
//! domain is used as-is; only the tick values are rounded to "nice"
//! numbers, which keeps the axis top within a few percent of the data
//! maximum instead of jumping to the next round number.

use civichart_shape::GroupEntry;

use crate::time::{self, TimeGrain};

/// Headroom applied above the data maximum on measure axes.
pub const MEASURE_PADDING: f64 = 1.05;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the minimum of the configured domain.
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain.
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns nice tick values clipped to the domain.
    ///
    /// Ticks are rounded to 1/2/5 multiples of a power of ten; values the
    /// rounding pushes outside the domain are dropped rather than widening
    /// the axis.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut lo, mut hi) = self.domain;
        if lo > hi {
            core::mem::swap(&mut lo, &mut hi);
        }
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - 1e-9 && *t <= hi + 1e-9)
            .collect()
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count.max(1) as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Builds the standard measure scale: zero-based, padded above the data
/// maximum by [`MEASURE_PADDING`].
///
/// A non-positive maximum (all-zero data) yields a `(0, 1)` domain so the
/// axis still draws.
pub fn measure_scale(data_max: f64, range: (f64, f64)) -> ScaleLinear {
    let max = if data_max.is_finite() && data_max > 0.0 {
        data_max * MEASURE_PADDING
    } else {
        1.0
    };
    ScaleLinear::new((0.0, max), range)
}

/// Builds the fixed `0..100` scale used by normalized (100%) charts.
pub fn percentage_scale(range: (f64, f64)) -> ScaleLinear {
    ScaleLinear::new((0.0, 100.0), range)
}

/// A discrete band scale over an ordered key list.
#[derive(Clone, Debug)]
pub struct ScaleBand {
    keys: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale covering `keys` over `range` with default
    /// padding.
    pub fn new(keys: Vec<String>, range: (f64, f64)) -> Self {
        Self {
            keys,
            range,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the keys in band order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let n = self.keys.len() as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let (r0, r1) = self.range;
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 {
            0.0
        } else {
            span / denom
        }
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }

    /// Returns the start position of a band by key.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.keys.iter().position(|k| k == key).map(|i| self.x(i))
    }
}

/// A time scale over day-based coordinates, padded by half a grain interval
/// on each side.
#[derive(Clone, Copy, Debug)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Builds a time scale covering the coordinates of `series`, padded per
    /// `grain` (numeric dateparts use day-grain padding).
    ///
    /// Returns `None` when no series key maps onto the time axis.
    pub fn from_series(
        series: &[GroupEntry],
        grain: TimeGrain,
        datepart: bool,
        range: (f64, f64),
    ) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for entry in series {
            let Some(coord) = time::time_coord(&entry.key, datepart) else {
                continue;
            };
            min = min.min(coord);
            max = max.max(coord);
        }
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let pad = if datepart {
            TimeGrain::Day.padding_days()
        } else {
            grain.padding_days()
        };
        Some(Self {
            inner: ScaleLinear::new((min - pad, max + pad), range),
        })
    }

    /// Maps a day coordinate into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }
}
