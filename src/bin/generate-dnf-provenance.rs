use std::path::PathBuf;
use std::process;

use clap::Parser;

use rpm_provenance::ir::Provider;
use rpm_provenance::RunOptions;

/// Write in-toto material provenance for every installed package, using
/// the dnf view of the rpm database (SHA1 header checksums).
#[derive(Parser)]
#[command(name = "generate-dnf-provenance", version, author)]
struct Cli {
    /// Write the JSON document to this file instead of stdout
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let options = RunOptions {
        destination: cli.output.into(),
        ..RunOptions::default()
    };

    match rpm_provenance::run(Provider::Dnf, &options) {
        Ok(count) => tracing::info!(packages = count, "provenance written"),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
