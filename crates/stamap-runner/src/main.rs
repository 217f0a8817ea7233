//! `stamap`: draw a station distribution map.

use clap::Parser;
use stamap_runner::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    stamap_runner::init_logging();

    match stamap_runner::run(&args) {
        Ok(path) => {
            println!("Map written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
