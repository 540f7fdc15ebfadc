// Setup check
//
// Reports which required datasets are present in DATA_DIR.
// Exits non-zero when any file is missing.

use crop_advisor::AdvisorConfig;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let config = AdvisorConfig::from_env()?;
    let paths = config.data_paths();

    println!("\n=== CHECKING DATASETS IN {} ===\n", config.data_dir.display());

    for path in paths.all() {
        let status = if path.exists() { "OK     " } else { "MISSING" };
        println!("  [{}] {}", status, path.display());
    }

    let missing = paths.missing();
    if missing.is_empty() {
        println!("\nAll {} dataset files found.", paths.all().len());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("\n{} of {} dataset files missing.", missing.len(), paths.all().len());
        Ok(ExitCode::FAILURE)
    }
}
