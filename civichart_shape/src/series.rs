// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chronological grouping for time axes.

use hashbrown::HashMap;

use civichart_model::Dataset;

use crate::group::GroupEntry;

/// Groups records by a time field, summing a measure per time value, sorted
/// ascending by key.
///
/// Time keys are either `YYYY-MM-DD`-style strings (which sort correctly
/// lexicographically) or numeric datepart values (compared numerically so
/// `"9"` precedes `"10"`). Line and area charts consume this instead of
/// [`crate::group_totals`] because their axis is chronological, not ranked.
pub fn series_totals(dataset: &Dataset, time_field: &str, measure_field: &str) -> Vec<GroupEntry> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for record in dataset {
        let Some(key) = record.key(time_field) else {
            continue;
        };
        let value = match record.number(measure_field) {
            Some(v) if v.is_finite() => v,
            _ => continue,
        };
        match totals.get_mut(&key) {
            Some(total) => *total += value,
            None => {
                totals.insert(key.clone(), value);
                order.push(key);
            }
        }
    }

    let mut entries: Vec<GroupEntry> = order
        .into_iter()
        .map(|key| {
            let total = totals[&key];
            GroupEntry { key, total }
        })
        .collect();
    entries.sort_by(|a, b| match (a.key.parse::<f64>(), b.key.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(core::cmp::Ordering::Equal),
        _ => a.key.cmp(&b.key),
    });
    entries
}

#[cfg(test)]
mod tests {
    use civichart_model::{Record, Value};

    use super::*;

    fn dataset(rows: &[(&str, f64)]) -> Dataset {
        Dataset::from_records(
            rows.iter()
                .map(|(key, value)| {
                    [
                        ("created_month", Value::from(*key)),
                        ("num_of_requests", Value::from(*value)),
                    ]
                    .into_iter()
                    .collect::<Record>()
                })
                .collect(),
        )
    }

    #[test]
    fn dates_sort_chronologically_not_by_total() {
        let ds = dataset(&[
            ("2023-03-01", 50.0),
            ("2023-01-01", 5.0),
            ("2023-02-01", 500.0),
        ]);
        let series = series_totals(&ds, "created_month", "num_of_requests");
        let keys: Vec<&str> = series.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["2023-01-01", "2023-02-01", "2023-03-01"]);
    }

    #[test]
    fn numeric_dateparts_sort_numerically() {
        let mut records = Vec::new();
        for month in [10.0, 2.0, 1.0] {
            let mut r = Record::new();
            r.set("created_month_datepart", Value::from(month))
                .set("num_of_requests", Value::from(1.0));
            records.push(r);
        }
        let ds = Dataset::from_records(records);
        let series = series_totals(&ds, "created_month_datepart", "num_of_requests");
        let keys: Vec<&str> = series.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "10"]);
    }

    #[test]
    fn repeated_time_values_accumulate() {
        let ds = dataset(&[("2023-01-01", 2.0), ("2023-01-01", 3.0)]);
        let series = series_totals(&ds, "created_month", "num_of_requests");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total, 5.0);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(series_totals(&Dataset::new(), "created_month", "num_of_requests").is_empty());
    }
}
