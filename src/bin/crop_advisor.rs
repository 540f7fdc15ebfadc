// Crop advisor CLI
//
// Runs one request against the advisor and prints the result as JSON.
//
// Usage:
//   crop_advisor locations
//   crop_advisor crops
//   crop_advisor requirements <crop>
//   crop_advisor recommend <location> [soil] [season] [top_n]
//   crop_advisor yield <crop> <location> [soil]
//   crop_advisor report <location> [language]
//
// Configuration comes from DATA_DIR, FOREST_TREES, FOREST_MAX_DEPTH,
// FOREST_SEED and TOP_N.

use anyhow::{anyhow, bail, Context, Result};
use crop_advisor::response::{recommendation_views, CropRequirements, FarmReportView, YieldView};
use crop_advisor::{AdvisorConfig, CropAdvisor};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str =
    "usage: crop_advisor <locations|crops|requirements|recommend|yield|report> [args...]";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    let config = AdvisorConfig::from_env()?;
    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", config.data_dir.display());
    tracing::info!("  FOREST_TREES: {}", config.forest.n_trees);
    tracing::info!("  TOP_N: {}", config.default_top_n);

    let advisor = CropAdvisor::new(&config)?;

    match command.as_str() {
        "locations" => print_json(&advisor.location_hierarchy()),
        "crops" => print_json(&advisor.available_crops()),
        "requirements" => {
            let crop = required(rest, 0, "crop")?;
            let profile = advisor
                .crop_requirements(crop)
                .ok_or_else(|| anyhow!("Crop not found: {}", crop))?;
            print_json(&CropRequirements::from(&profile))
        }
        "recommend" => {
            let location = required(rest, 0, "location")?;
            let top_n = rest
                .get(3)
                .map(|raw| raw.parse::<usize>())
                .transpose()
                .context("top_n must be a non-negative integer")?;
            let results = advisor
                .recommend_for_location(location, optional(rest, 1), optional(rest, 2), top_n)
                .ok_or_else(|| anyhow!("Location not found: {}", location))?;
            print_json(&recommendation_views(&results))
        }
        "yield" => {
            let crop = required(rest, 0, "crop")?;
            let location = required(rest, 1, "location")?;
            let report = advisor
                .yield_for_location(crop, location, optional(rest, 2))
                .ok_or_else(|| anyhow!("No yield estimate for {} in {}", crop, location))?;
            print_json(&YieldView::from(&report))
        }
        "report" => {
            let location = required(rest, 0, "location")?;
            let report = advisor
                .farm_report_for_location(location, optional(rest, 1))
                .ok_or_else(|| anyhow!("Location not found: {}", location))?;
            print_json(&FarmReportView::from(&report))
        }
        other => bail!("Unknown command '{}'\n{}", other, USAGE),
    }
}

fn required<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing argument <{}>\n{}", name, USAGE))
}

fn optional(args: &[String], idx: usize) -> Option<&str> {
    args.get(idx).map(String::as_str)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
