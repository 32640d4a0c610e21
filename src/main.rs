//! merkle-cert CLI - build and check Merkle tree certificates
//!
//! Reads a proof file, rebuilds the tree it describes and writes the
//! dependency-ordered certificate. Diagnostics go to stderr; stdout carries
//! JSON only.

use anyhow::Context;
use clap::{Parser, Subcommand};
use merkle_cert::logging::{self, LogLevel};
use merkle_cert::{check_certificate, BuildOptions, Certificate, CertificateBuilder};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "merkle-cert")]
#[command(about = "Rebuild a Merkle tree from membership proofs and emit a certificate")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json", global = true)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a certificate from a proof file
    Build {
        /// Proof file to read
        #[arg(default_value = "proofs.json")]
        input: PathBuf,

        /// Where to write the certificate ("-" for stdout)
        #[arg(short, long, default_value = "certificate.json")]
        output: PathBuf,

        /// Leave out proofs that do not reach the declared root instead of failing
        #[arg(long)]
        allow_root_mismatch: bool,

        /// Do not compare the declared total with the sum of the leaves
        #[arg(long)]
        skip_total_check: bool,
    },

    /// Replay a certificate and verify its ordering and hashes
    Check {
        /// Certificate file to check
        certificate: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::try_init(LogLevel::from_verbosity(cli.verbose)) {
        eprintln!("warning: logging unavailable: {}", e);
    }

    match cli.command {
        Commands::Build {
            input,
            output: out_path,
            allow_root_mismatch,
            skip_total_check,
        } => {
            let options = BuildOptions::default()
                .verify_root(!allow_root_mismatch)
                .verify_total(!skip_total_check);
            let certificate = CertificateBuilder::new()
                .with_options(options)
                .build_from_path(&input)
                .with_context(|| format!("Failed to build certificate from {}", input.display()))?;

            let json = certificate.to_json(cli.format == OutputFormat::Text)?;
            if out_path == Path::new("-") {
                println!("{}", json);
            } else {
                std::fs::write(&out_path, json)
                    .with_context(|| format!("Failed to write {}", out_path.display()))?;
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "root": certificate.root.to_hex(),
                        "output": out_path.display().to_string(),
                        "leafLength": certificate.leaf_length,
                        "nodeLength": certificate.node_length
                    }),
                )?;
            }
        }

        Commands::Check { certificate } => {
            let content = std::fs::read_to_string(&certificate)
                .with_context(|| format!("Failed to read {}", certificate.display()))?;
            let parsed = Certificate::from_json(&content)
                .with_context(|| format!("Failed to parse {}", certificate.display()))?;
            let report = check_certificate(&parsed)
                .with_context(|| format!("{} is not a valid certificate", certificate.display()))?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "root": report.root.to_hex(),
                    "leafLength": report.leaves,
                    "nodeLength": report.nodes
                }),
            )?;
        }
    }

    Ok(())
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
