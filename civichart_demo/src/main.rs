// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a saved query-result payload to an SVG file.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use civichart_charts::geo::{BoundaryKind, GeoBoundaries};
use civichart_charts::{AppState, Size};
use civichart_model::{ChartKind, QueryResult, SchemaCatalog};

struct Args {
    result: PathBuf,
    chart: Option<String>,
    out: PathBuf,
    schema: Option<PathBuf>,
    boundaries: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut positional: Vec<String> = Vec::new();
    let mut schema = None;
    let mut boundaries = None;
    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--schema" => schema = Some(PathBuf::from(argv.next()?)),
            "--boundaries" => boundaries = Some(PathBuf::from(argv.next()?)),
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    let result = PathBuf::from(positional.next()?);
    let chart = positional.next();
    let out = positional
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("chart.svg"));
    Some(Args {
        result,
        chart,
        out,
        schema,
        boundaries,
    })
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let result: QueryResult = serde_json::from_str(&std::fs::read_to_string(&args.result)?)?;
    let schema = match &args.schema {
        Some(path) => SchemaCatalog::from_json(&std::fs::read_to_string(path)?)?,
        None => SchemaCatalog::new(),
    };

    // Boundary data is keyed by the result's geo dimension; a boundary file
    // without a joinable geo dimension is ignored.
    let kind = result
        .aggregation_definition
        .geo_dimension()
        .and_then(BoundaryKind::for_dimension);
    let boundaries = match (&args.boundaries, kind) {
        (Some(path), Some(kind)) => Some(GeoBoundaries::from_geojson_str(
            kind,
            &std::fs::read_to_string(path)?,
        )?),
        (Some(_), None) => {
            tracing::warn!("boundary file given but the result has no joinable geo dimension");
            None
        }
        _ => None,
    };

    let mut state = AppState::new(result, schema).with_boundaries(boundaries);
    if let Some(key) = &args.chart {
        match ChartKind::from_key(key) {
            Some(kind) => state.set_chart(kind),
            None => tracing::warn!(key = %key, "unknown chart key, using the suggested chart"),
        }
    }
    if let Some(text) = state.text_response() {
        println!("{text}");
    }
    let available: Vec<&str> = state.available_charts().iter().map(|k| k.key()).collect();
    if !available.is_empty() {
        println!("available charts: {}", available.join(", "));
    }

    let svg = state.render(Size::default()).to_svg_string();
    std::fs::write(&args.out, svg)?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args() else {
        eprintln!(
            "usage: civichart_demo <result.json> [chart_key] [out.svg] \
             [--schema schema.json] [--boundaries file.geojson]"
        );
        return ExitCode::FAILURE;
    };
    if let Err(err) = run(&args) {
        tracing::error!(error = %err, "rendering failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
