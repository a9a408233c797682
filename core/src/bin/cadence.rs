//! Cadence CLI
//!
//! Runs compiled block programs, inspects synthesized continuations and
//! benchmarks the stepper without a host application.

use cadence_core::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_cli().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
