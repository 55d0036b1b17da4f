use std::path::PathBuf;
use std::process;

use clap::Parser;

use rpm_provenance::ir::Provider;
use rpm_provenance::RunOptions;

/// Write in-toto material provenance for every installed package, using
/// the checksums yum recorded in its yumdb (sha256).
#[derive(Parser)]
#[command(name = "generate-yum-provenance", version, author)]
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

    match rpm_provenance::run(Provider::Yum, &options) {
        Ok(count) => tracing::info!(packages = count, "provenance written"),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
