//! xrfwet CLI - dry to wet basis conversion of XRF results
//!
//! ```bash
//! xrfwet elemental                         # xrf_wt_percent_dry.csv + element_to_oxide_ratios.csv
//! xrfwet oxide                             # xrf_wt_percent_dry.csv with Oxide column
//! xrfwet oxide --moisture 0.75 --format json --output wet.json
//! ```
//!
//! Table paths can also come from `XRF_DRY_CSV`, `XRF_RATIOS_CSV` and
//! `XRF_OXIDE_CSV` (a `.env` file is read if present).

use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use xrfwet::config::{ENV_DRY_CSV, ENV_OXIDE_CSV, ENV_RATIOS_CSV};
use xrfwet::logs::{log_error, set_quiet};
use xrfwet::{run, OutputFormat, PipelineKind, RunConfig};

#[derive(Parser)]
#[command(name = "xrfwet")]
#[command(about = "Convert dry-basis XRF compositions to wet-basis mass percentages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Elemental wt%: apply element-to-oxide ratios, then add moisture
    Elemental {
        /// Dry elemental table (Element, XRF_wt_percent_dry)
        #[arg(short, long, env = ENV_DRY_CSV)]
        data: Option<PathBuf>,

        /// Ratio table (Element, ElementToOxideRatio)
        #[arg(short, long, env = ENV_RATIOS_CSV)]
        ratios: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Oxide wt%: add moisture and print the total
    Oxide {
        /// Dry oxide table (Oxide, XRF_oxide_percent_dry)
        #[arg(short, long, env = ENV_OXIDE_CSV)]
        data: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Moisture fraction of the wet sample (prompted for if omitted)
    #[arg(short, long, allow_negative_numbers = true)]
    moisture: Option<f64>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file for the report (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only print the report and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let (config, common) = match cli.command {
        Commands::Elemental { data, ratios, common } => (
            RunConfig::new(PipelineKind::Elemental)
                .with_data(data)
                .with_ratios(ratios),
            common,
        ),
        Commands::Oxide { data, common } => {
            (RunConfig::new(PipelineKind::Oxide).with_data(data), common)
        }
    };

    set_quiet(common.quiet);
    let config = config
        .with_moisture(common.moisture)
        .with_format(common.format)
        .with_output(common.output);

    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(e) = run(&config, stdin.lock(), stdout.lock()) {
        // Load failures were already reported on the console
        if e.is_load_failure() {
            return;
        }
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
