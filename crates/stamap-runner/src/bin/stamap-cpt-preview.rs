//! `stamap-cpt-preview`: preview images for a directory of palettes.

use clap::Parser;
use stamap_runner::preview::run_preview;
use stamap_runner::PreviewArgs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = PreviewArgs::parse();
    stamap_runner::init_logging();

    let summary = match run_preview(&args) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    println!(
        "Previews generated: {}/{} palettes ({} swatches, {} maps)",
        summary.succeeded(),
        summary.total,
        summary.swatches,
        summary.maps
    );
    for (path, reason) in &summary.failures {
        eprintln!("  {}: {}", path.display(), reason);
    }

    if summary.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
