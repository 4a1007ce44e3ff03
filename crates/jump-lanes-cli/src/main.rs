//! `jump-lanes` - print a listing with its control-flow arrows.
//!
//! # Usage
//!
//! ```bash
//! jump-lanes listing.json
//! jump-lanes --axis address --ascii disasm.json
//! jump-lanes --format json listing.json > layout.json
//! ```
//!
//! Logging goes to stderr and is configured with the `JUMP_LANES_LOG` environment variable, which
//! takes a `tracing-subscriber` filter directive (default: `warn`):
//!
//! ```bash
//! JUMP_LANES_LOG=jump_lanes=trace jump-lanes listing.json
//! ```

mod error;
mod input;
mod report;

use clap::{Parser, ValueEnum};
use error::CliError;
use input::ListingFile;
use jump_lanes::{Address, LineNumber, PlanOptions};
use jump_lanes_text::{Charset, GutterStyle};
use report::{ReportFormat, ReportOptions, render_report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JUMP_LANES_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Axis {
    /// Positions are source line numbers.
    Line,
    /// Positions are instruction addresses.
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "jump-lanes", version, about = "Lay out control-flow arrows for a listing")]
struct Args {
    /// Listing file (JSON with `rows` and `jumps`).
    input: PathBuf,

    /// Position axis of the listing.
    #[arg(long, value_enum, default_value_t = Axis::Line)]
    axis: Axis,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Draw the gutter with ASCII glyphs.
    #[arg(long)]
    ascii: bool,

    /// Do not insert a detail row below each jump source.
    #[arg(long)]
    no_details: bool,

    /// Insert a detail row below each jump target.
    #[arg(long)]
    into_rows: bool,

    /// Truncate row text to this many cells.
    #[arg(long)]
    max_label_width: Option<usize>,
}

impl Args {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            plan: PlanOptions {
                detail_rows: !self.no_details,
                into_rows: self.into_rows,
            },
            style: GutterStyle {
                charset: if self.ascii {
                    Charset::Ascii
                } else {
                    Charset::Unicode
                },
                max_label_width: self.max_label_width,
                ..GutterStyle::default()
            },
            format: match self.format {
                Format::Text => ReportFormat::Text,
                Format::Json => ReportFormat::Json,
            },
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<String, CliError> {
    let text = std::fs::read_to_string(&args.input)?;
    let file: ListingFile = serde_json::from_str(&text)?;
    let options = args.report_options();

    match args.axis {
        Axis::Line => render_report::<LineNumber>(&file, &options),
        Axis::Address => render_report::<Address>(&file, &options),
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("jump-lanes: {err}");
            ExitCode::FAILURE
        }
    }
}
