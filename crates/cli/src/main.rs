//! Hopper Design Suite CLI
//!
//! A command-line tool for running hopper designs against the service,
//! exporting the CSV specification report, and checking service status.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use commands::{design, export, status};

/// Particle shape choices, mirroring the service's closed enum
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    Spherical,
    Angular,
    Irregular,
    Elongated,
}

impl ShapeArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeArg::Spherical => "Spherical",
            ShapeArg::Angular => "Angular",
            ShapeArg::Irregular => "Irregular",
            ShapeArg::Elongated => "Elongated",
        }
    }
}

/// Material-property inputs shared by the design and export commands
#[derive(Debug, Clone, clap::Args)]
pub struct MaterialArgs {
    /// Bulk density in kg/m3 (200-3000)
    #[arg(long)]
    pub bulk_density: f32,

    /// Tapped density in kg/m3 (must be at least the bulk density)
    #[arg(long)]
    pub tapped_density: f32,

    /// Median particle size d50 in micrometers (1-5000)
    #[arg(long)]
    pub d50: f32,

    /// Particle shape category
    #[arg(long, value_enum)]
    pub shape: ShapeArg,
}

/// Hopper Design Suite CLI
#[derive(Parser)]
#[command(name = "hopper")]
#[command(author, version, about = "CLI for the Hopper Design Suite", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via HOPPER_API_URL env var)
    #[arg(long, env = "HOPPER_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a hopper design for the given material properties
    Design {
        #[command(flatten)]
        material: MaterialArgs,
    },

    /// Export the CSV specification report for the given material properties
    Export {
        #[command(flatten)]
        material: MaterialArgs,

        /// Output file path (defaults to the dated report name)
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Show service health and readiness
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Design { material } => {
            design::run_design(&client, &material, cli.format).await?;
        }
        Commands::Export { material, output } => {
            export::export_report(&client, &material, output, cli.format).await?;
        }
        Commands::Status => {
            status::show_status(&client, cli.format).await?;
        }
    }

    Ok(())
}
