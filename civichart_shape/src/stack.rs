// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-key grouping and stacking.

use hashbrown::HashMap;

use civichart_model::Dataset;

use crate::group::{sort_entries, GroupEntry};

/// One stacked segment: the summed raw value plus its percentage of the row
/// total.
///
/// Keeping the pair explicit (rather than stashing originals under derived
/// field names) lets tooltips show both forms without string-key
/// conventions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StackCell {
    /// Summed measure value for (row key, subgroup).
    pub raw: f64,
    /// `raw / row total * 100`, or `0.0` when the row total is zero.
    pub share: f64,
}

/// One primary group with a cell per subgroup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackedRow {
    /// Primary grouping key.
    pub key: String,
    /// Sum of all raw cell values in this row.
    pub total: f64,
    /// Cells aligned index-for-index with [`StackedTable::subgroups`].
    ///
    /// Combinations with no matching records are present with `raw = 0`, so
    /// stacked layouts render a zero-size segment rather than skipping.
    pub cells: Vec<StackCell>,
}

/// The result of a two-key grouping: rows by primary key, cells by subgroup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackedTable {
    /// Subgroup keys in a single global ranking (total descending, name
    /// ascending on ties), identical for every row.
    pub subgroups: Vec<String>,
    /// Rows ordered by row total descending (ties by key ascending).
    pub rows: Vec<StackedRow>,
}

impl StackedTable {
    /// Returns whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The largest row total, used as the stack-scale upper bound.
    pub fn max_row_total(&self) -> f64 {
        self.rows.iter().map(|r| r.total).fold(0.0, f64::max)
    }

    /// The largest single cell value across the table.
    pub fn max_cell(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.raw)
            .fold(0.0, f64::max)
    }

    /// The index of a subgroup in the global ranking.
    pub fn subgroup_index(&self, key: &str) -> Option<usize> {
        self.subgroups.iter().position(|s| s == key)
    }
}

/// Groups records by `primary`, then by `secondary` within each primary
/// group, summing `measure` at the leaves.
///
/// Rows are ordered by primary-group total descending; subgroups are ranked
/// once globally by their total across all rows, so the same subgroup
/// occupies a consistent position (and color) in every row. Missing
/// (primary, secondary) combinations become `raw = 0` cells. Shares are
/// computed eagerly: `raw / row total * 100`, left at `0` for zero-total
/// rows so no division artifact appears.
///
/// Empty datasets and absent fields yield `StackedTable::default()`.
pub fn stack_by(
    dataset: &Dataset,
    primary: &str,
    secondary: &str,
    measure: &str,
) -> StackedTable {
    // Leaf sums keyed by (primary, secondary), with first-appearance order
    // tracked per axis.
    let mut leaves: HashMap<(String, String), f64> = HashMap::new();
    let mut primary_totals: HashMap<String, f64> = HashMap::new();
    let mut primary_order: Vec<String> = Vec::new();
    let mut subgroup_totals: HashMap<String, f64> = HashMap::new();
    let mut subgroup_order: Vec<String> = Vec::new();
    let mut skipped = 0_usize;

    for record in dataset {
        let (Some(p), Some(s)) = (record.key(primary), record.key(secondary)) else {
            skipped += 1;
            continue;
        };
        let value = match record.number(measure) {
            Some(v) if v.is_finite() => v,
            _ => {
                skipped += 1;
                continue;
            }
        };

        if !primary_totals.contains_key(&p) {
            primary_order.push(p.clone());
        }
        *primary_totals.entry(p.clone()).or_insert(0.0) += value;

        if !subgroup_totals.contains_key(&s) {
            subgroup_order.push(s.clone());
        }
        *subgroup_totals.entry(s.clone()).or_insert(0.0) += value;

        *leaves.entry((p, s)).or_insert(0.0) += value;
    }

    if skipped > 0 {
        tracing::warn!(primary, secondary, measure, skipped, "skipped records while stacking");
    }
    if primary_order.is_empty() {
        return StackedTable::default();
    }

    // Global subgroup ranking: total descending, name ascending on ties.
    let mut subgroup_entries: Vec<GroupEntry> = subgroup_order
        .into_iter()
        .map(|key| {
            let total = subgroup_totals[&key];
            GroupEntry { key, total }
        })
        .collect();
    sort_entries(&mut subgroup_entries);
    let subgroups: Vec<String> = subgroup_entries.into_iter().map(|e| e.key).collect();

    let mut row_entries: Vec<GroupEntry> = primary_order
        .into_iter()
        .map(|key| {
            let total = primary_totals[&key];
            GroupEntry { key, total }
        })
        .collect();
    sort_entries(&mut row_entries);

    let rows = row_entries
        .into_iter()
        .map(|entry| {
            let cells: Vec<StackCell> = subgroups
                .iter()
                .map(|subgroup| {
                    let raw = leaves
                        .get(&(entry.key.clone(), subgroup.clone()))
                        .copied()
                        .unwrap_or(0.0);
                    let share = if entry.total > 0.0 {
                        raw / entry.total * 100.0
                    } else {
                        0.0
                    };
                    StackCell { raw, share }
                })
                .collect();
            StackedRow {
                key: entry.key,
                total: entry.total,
                cells,
            }
        })
        .collect();

    tracing::debug!(
        primary,
        secondary,
        rows = primary_totals.len(),
        subgroups = subgroups.len(),
        "stacked table built"
    );

    StackedTable { subgroups, rows }
}

#[cfg(test)]
mod tests {
    use civichart_model::{Record, Value};

    use super::*;

    fn dataset(rows: &[(&str, &str, f64)]) -> Dataset {
        Dataset::from_records(
            rows.iter()
                .map(|(p, s, v)| {
                    [
                        ("borough", Value::from(*p)),
                        ("complaint_type", Value::from(*s)),
                        ("num_of_requests", Value::from(*v)),
                    ]
                    .into_iter()
                    .collect::<Record>()
                })
                .collect(),
        )
    }

    fn stack(rows: &[(&str, &str, f64)]) -> StackedTable {
        stack_by(
            &dataset(rows),
            "borough",
            "complaint_type",
            "num_of_requests",
        )
    }

    #[test]
    fn rows_sort_by_total_and_cells_align_with_subgroups() {
        let table = stack(&[
            ("Queens", "Noise", 5.0),
            ("Queens", "Heat", 2.0),
            ("Bronx", "Noise", 20.0),
            ("Bronx", "Heat", 1.0),
        ]);

        let row_keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(row_keys, vec!["Bronx", "Queens"]);
        // Noise (25) outranks Heat (3) globally.
        assert_eq!(table.subgroups, vec!["Noise", "Heat"]);
        assert_eq!(table.rows[0].cells[0].raw, 20.0);
        assert_eq!(table.rows[0].cells[1].raw, 1.0);
    }

    #[test]
    fn subgroup_order_is_identical_across_rows() {
        // "Heat" never appears for Brooklyn; its cell must still exist, and
        // the ranking must not change per row.
        let table = stack(&[
            ("Queens", "Noise", 1.0),
            ("Queens", "Heat", 9.0),
            ("Brooklyn", "Noise", 4.0),
            ("Brooklyn", "Water", 3.0),
        ]);
        assert_eq!(table.subgroups, vec!["Heat", "Noise", "Water"]);
        for row in &table.rows {
            assert_eq!(row.cells.len(), table.subgroups.len());
        }
        let brooklyn = table.rows.iter().find(|r| r.key == "Brooklyn").unwrap();
        assert_eq!(brooklyn.cells[0].raw, 0.0); // Heat: missing combination
        assert_eq!(brooklyn.cells[1].raw, 4.0);
    }

    #[test]
    fn shares_sum_to_one_hundred_for_positive_rows() {
        let table = stack(&[
            ("Queens", "Noise", 3.0),
            ("Queens", "Heat", 1.0),
            ("Queens", "Water", 8.0),
        ]);
        let row = &table.rows[0];
        let share_sum: f64 = row.cells.iter().map(|c| c.share).sum();
        assert!((share_sum - 100.0).abs() < 1e-6);
        // Raw values survive alongside the shares.
        let raw_sum: f64 = row.cells.iter().map(|c| c.raw).sum();
        assert_eq!(raw_sum, row.total);
    }

    #[test]
    fn zero_total_rows_stay_zero_without_artifacts() {
        let table = stack(&[("Queens", "Noise", 0.0), ("Queens", "Heat", 0.0)]);
        let row = &table.rows[0];
        assert_eq!(row.total, 0.0);
        for cell in &row.cells {
            assert_eq!(cell.share, 0.0);
            assert!(cell.share.is_finite());
        }
    }

    #[test]
    fn empty_input_yields_default_table() {
        let table = stack(&[]);
        assert!(table.is_empty());
        assert!(table.subgroups.is_empty());
        assert_eq!(table.max_row_total(), 0.0);
    }

    #[test]
    fn max_row_total_tracks_largest_stack() {
        let table = stack(&[
            ("Queens", "Noise", 5.0),
            ("Queens", "Heat", 2.0),
            ("Bronx", "Noise", 4.0),
        ]);
        assert_eq!(table.max_row_total(), 7.0);
        assert_eq!(table.max_cell(), 5.0);
    }
}
