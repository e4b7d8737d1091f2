// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-key grouping.

use hashbrown::HashMap;

use civichart_model::Dataset;

/// One group produced by summing a measure over records sharing a key.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupEntry {
    /// The grouping key value.
    pub key: String,
    /// Sum of the measure over the group's records.
    pub total: f64,
}

/// Orders groups by total descending; equal totals fall back to key
/// ascending so the result is deterministic regardless of record order.
pub(crate) fn sort_entries(entries: &mut [GroupEntry]) {
    entries.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(core::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
}

/// Groups records by `key_field`, summing `measure_field` per group.
///
/// Groups come back sorted by total descending (ties by key ascending).
/// Records missing the key field or carrying a non-numeric measure are
/// skipped; non-finite measure values are skipped as well. An empty dataset
/// yields an empty vec, never an error.
pub fn group_totals(dataset: &Dataset, key_field: &str, measure_field: &str) -> Vec<GroupEntry> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut skipped = 0_usize;

    for record in dataset {
        let Some(key) = record.key(key_field) else {
            skipped += 1;
            continue;
        };
        let value = match record.number(measure_field) {
            Some(v) if v.is_finite() => v,
            _ => {
                skipped += 1;
                continue;
            }
        };
        match totals.get_mut(&key) {
            Some(total) => *total += value,
            None => {
                totals.insert(key.clone(), value);
                order.push(key);
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(
            key_field,
            measure_field,
            skipped,
            "skipped records while grouping"
        );
    }

    let mut entries: Vec<GroupEntry> = order
        .into_iter()
        .map(|key| {
            let total = totals[&key];
            GroupEntry { key, total }
        })
        .collect();
    sort_entries(&mut entries);
    entries
}
