// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end checks: a backend payload through state, shaping, and
//! rendering.

use civichart_model::{ChartKind, QueryResult, SchemaCatalog};

use crate::layout::Size;
use crate::view::AppState;

fn payload() -> QueryResult {
    serde_json::from_str(
        r#"{
            "dataset": [
                {"borough": "Queens", "complaint_type": "Noise", "num_of_requests": 3000},
                {"borough": "Queens", "complaint_type": "Heat", "num_of_requests": 1000},
                {"borough": "Bronx", "complaint_type": "Noise", "num_of_requests": 2000},
                {"borough": "Bronx", "complaint_type": "Water", "num_of_requests": 500}
            ],
            "aggregationDefinition": {
                "dimensions": ["borough", "complaint_type"],
                "measures": [{"field": "unique_key", "alias": "num_of_requests"}],
                "categoricalDimension": ["borough", "complaint_type"]
            },
            "chartType": "stacked_bar_chart",
            "availableChartTypes": [
                "table",
                "single_bar_chart",
                "grouped_bar_chart",
                "stacked_bar_chart",
                "stacked_bar_chart_100",
                "nested_bar_chart",
                "treemap"
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn every_available_chart_renders_from_the_same_payload() {
    let mut state = AppState::new(payload(), SchemaCatalog::new());
    for kind in state.available_charts() {
        state.set_chart(kind);
        let svg = state.render(Size::default()).to_svg_string();
        assert!(svg.starts_with("<svg"), "kind {kind}");
        assert!(!svg.contains("required"), "kind {kind} lost a role");
    }
}

#[test]
fn stacked_and_normalized_variants_agree_on_segment_order() {
    let mut state = AppState::new(payload(), SchemaCatalog::new());
    let order = |svg: &str| -> Vec<usize> {
        // First appearance of each subgroup name in paint order.
        ["Noise", "Heat", "Water"]
            .iter()
            .map(|name| svg.find(name).expect("subgroup missing"))
            .collect()
    };
    state.set_chart(ChartKind::StackedBarChart);
    let plain = state.render(Size::default()).to_svg_string();
    state.set_chart(ChartKind::StackedBarChart100);
    let normalized = state.render(Size::default()).to_svg_string();

    let plain_order = order(&plain);
    let normalized_order = order(&normalized);
    assert!(plain_order[0] < plain_order[1] && plain_order[1] < plain_order[2]);
    assert!(normalized_order[0] < normalized_order[1]);
    assert!(normalized_order[1] < normalized_order[2]);
}

#[test]
fn normalized_tooltips_carry_raw_values() {
    let mut state = AppState::new(payload(), SchemaCatalog::new());
    state.set_chart(ChartKind::StackedBarChart100);
    let svg = state.render(Size::default()).to_svg_string();
    // Queens: Noise is 3000 of 4000.
    assert!(svg.contains("75.0% (3.0K)"));
}

#[test]
fn double_swap_restores_the_original_rendering() {
    let mut state = AppState::new(payload(), SchemaCatalog::new());
    state.set_chart(ChartKind::StackedBarChart);
    let before = state.render(Size::default()).to_svg_string();
    state.toggle_swap();
    let swapped = state.render(Size::default()).to_svg_string();
    state.toggle_swap();
    let after = state.render(Size::default()).to_svg_string();
    assert_ne!(before, swapped);
    assert_eq!(before, after);
}

#[test]
fn time_payload_renders_a_chronological_line() {
    let result: QueryResult = serde_json::from_str(
        r#"{
            "dataset": [
                {"created_month": "2023-03-01", "num_of_requests": 5},
                {"created_month": "2023-01-01", "num_of_requests": 20},
                {"created_month": "2023-02-01", "num_of_requests": 10}
            ],
            "aggregationDefinition": {
                "dimensions": ["created_month"],
                "measures": [{"field": "unique_key", "alias": "num_of_requests"}],
                "timeDimension": ["created_month"]
            },
            "chartType": "line_chart",
            "availableChartTypes": ["table", "line_chart"]
        }"#,
    )
    .unwrap();
    let state = AppState::new(result, SchemaCatalog::new());
    assert_eq!(state.chart(), ChartKind::LineChart);
    let svg = state.render(Size::default()).to_svg_string();
    let jan = svg.find("Jan 2023").expect("January label");
    let mar = svg.find("Mar 2023").expect("March label");
    assert!(jan < mar);
}

#[test]
fn empty_payload_renders_the_no_data_message() {
    let result: QueryResult = serde_json::from_str(r#"{"chartType": "table"}"#).unwrap();
    let state = AppState::new(result, SchemaCatalog::new());
    let svg = state.render(Size::default()).to_svg_string();
    assert!(svg.contains("No data to display"));
}

#[test]
fn schema_labels_flow_through_to_tooltips() {
    let schema = SchemaCatalog::from_json(
        r#"{
            "dimensions": [
                {"name": "borough", "display_name": "Borough"},
                {"name": "complaint_type", "display_name": "Complaint Type"}
            ],
            "measures": [{"name": "num_of_requests", "display_name": "Requests"}]
        }"#,
    )
    .unwrap();
    let mut state = AppState::new(payload(), schema);
    state.set_chart(ChartKind::SingleBarChart);
    let svg = state.render(Size::default()).to_svg_string();
    assert!(svg.contains("Borough: Queens"));
    assert!(svg.contains("Requests: 4.0K"));
    assert!(!svg.contains("num_of_requests:"));
}
