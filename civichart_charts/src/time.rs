// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-grain inference and date handling for time axes.
//!
//! Time dimension values arrive in two shapes: calendar dates formatted as
//! `YYYY-MM-DD` (truncated to the grain, so a month is its first day) and
//! numeric dateparts from fields named `*_datepart` (hour of day, day of
//! week, and similar cyclic parts).

use chrono::NaiveDate;

/// The granularity of a time dimension, inferred from its field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeGrain {
    /// Calendar years.
    Year,
    /// Calendar months.
    Month,
    /// Calendar weeks.
    Week,
    /// Calendar days.
    Day,
}

impl TimeGrain {
    /// Infers the grain from a time dimension field name.
    ///
    /// Matching is by substring with coarsest first, so `created_year` is
    /// yearly even though it also contains no finer marker, and anything
    /// unrecognized falls back to daily.
    pub fn infer(field: &str) -> Self {
        if field.contains("year") {
            Self::Year
        } else if field.contains("month") {
            Self::Month
        } else if field.contains("week") {
            Self::Week
        } else {
            Self::Day
        }
    }

    /// Half an interval of this grain, in days.
    ///
    /// Time scales pad their domain by this much on each side so the first
    /// and last marks sit inside the plot instead of on its edge.
    pub fn padding_days(self) -> f64 {
        match self {
            Self::Year => 182.5,
            Self::Month => 15.2,
            Self::Week => 3.5,
            Self::Day => 0.5,
        }
    }

    /// Formats a date as an axis label at this grain.
    pub fn format_date(self, date: NaiveDate) -> String {
        let pattern = match self {
            Self::Year => "%Y",
            Self::Month => "%b %Y",
            Self::Week | Self::Day => "%b %d",
        };
        date.format(pattern).to_string()
    }
}

/// Returns whether a field holds numeric dateparts rather than dates.
pub fn is_datepart(field: &str) -> bool {
    field.ends_with("_datepart")
}

/// Parses a `YYYY-MM-DD` value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Days between the Unix epoch and `date`.
pub fn days_since_epoch(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as f64
}

/// Maps a time key onto the continuous axis.
///
/// Dates become fractional days since the Unix epoch; datepart keys are
/// plain numbers and pass through. Unparseable keys yield `None` and the
/// caller decides whether to skip the record.
pub fn time_coord(key: &str, datepart: bool) -> Option<f64> {
    if datepart {
        let n: f64 = key.trim().parse().ok()?;
        n.is_finite().then_some(n)
    } else {
        parse_date(key).map(days_since_epoch)
    }
}

/// Formats a time key as an axis label.
///
/// Dates render at the given grain; dateparts and unparseable keys render
/// as-is.
pub fn format_time_key(key: &str, grain: TimeGrain, datepart: bool) -> String {
    if datepart {
        return String::from(key);
    }
    match parse_date(key) {
        Some(date) => grain.format_date(date),
        None => String::from(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grain_inference_prefers_coarser_markers() {
        assert_eq!(TimeGrain::infer("created_year"), TimeGrain::Year);
        assert_eq!(TimeGrain::infer("created_month"), TimeGrain::Month);
        assert_eq!(TimeGrain::infer("created_week"), TimeGrain::Week);
        assert_eq!(TimeGrain::infer("created_date"), TimeGrain::Day);
        assert_eq!(TimeGrain::infer("closed_month_datepart"), TimeGrain::Month);
    }

    #[test]
    fn datepart_fields_are_detected_by_suffix() {
        assert!(is_datepart("created_month_datepart"));
        assert!(!is_datepart("created_month"));
        assert!(!is_datepart("datepart_created"));
    }

    #[test]
    fn dates_map_to_days_since_epoch() {
        assert_eq!(time_coord("1970-01-01", false), Some(0.0));
        assert_eq!(time_coord("1970-02-01", false), Some(31.0));
        assert_eq!(time_coord("1969-12-31", false), Some(-1.0));
    }

    #[test]
    fn dateparts_pass_through_numerically() {
        assert_eq!(time_coord("9", true), Some(9.0));
        assert_eq!(time_coord(" 12 ", true), Some(12.0));
        assert_eq!(time_coord("noon", true), None);
    }

    #[test]
    fn malformed_dates_yield_none() {
        assert_eq!(time_coord("2023-13-01", false), None);
        assert_eq!(time_coord("yesterday", false), None);
    }

    #[test]
    fn labels_follow_the_grain() {
        let date = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
        assert_eq!(TimeGrain::Year.format_date(date), "2023");
        assert_eq!(TimeGrain::Month.format_date(date), "Apr 2023");
        assert_eq!(TimeGrain::Day.format_date(date), "Apr 01");
    }

    #[test]
    fn datepart_labels_render_verbatim() {
        assert_eq!(format_time_key("9", TimeGrain::Month, true), "9");
        assert_eq!(
            format_time_key("2023-04-01", TimeGrain::Month, false),
            "Apr 2023"
        );
    }

    #[test]
    fn padding_scales_with_grain() {
        assert!(TimeGrain::Year.padding_days() > TimeGrain::Month.padding_days());
        assert!(TimeGrain::Month.padding_days() > TimeGrain::Week.padding_days());
        assert!(TimeGrain::Week.padding_days() > TimeGrain::Day.padding_days());
    }
}
