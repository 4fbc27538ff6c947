//! fib2tem CLI - Grid Orientation Assistant
//!
//! Tells the operator how to load a FIB-milled grid into the cassette and
//! which notch direction and tilt to expect on the Titan Krios stage.
//!
//! # Design Philosophy
//!
//! - **Form-like input**: the same choices as the bench form, including the
//!   tick-box style flags (`--normal-load`, `--shuttle-45`, ...)
//! - **One selection per field**: conflicting or missing choices are refused
//!   before anything is computed
//! - **Results on stdout, diagnostics on stderr**

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use fib2tem::batch::run_batch;
use fib2tem::formats::{orientation_table, write_result, write_table};
use fib2tem::{
    Config, LamellaeLocation, MillingAngle, NotchDirection, OrientationRequest, OutputFormat,
    ShuttleType,
};

/// FIB2TEM: Grid Orientation Assistant
///
/// Determines the notch direction for loading your grid into the cassette and
/// the Titan Krios stage notch direction and tilt angle.
#[derive(Parser, Debug)]
#[command(name = "fib2tem")]
#[command(version = fib2tem::VERSION)]
#[command(about = "FIB2TEM: Grid Orientation Assistant")]
#[command(after_help = "EXAMPLES:
  # Normal load, 45° shuttle, milled at 10°
  fib2tem calc Up --lamellae bottom-right --shuttle 45 --milling-angle 10

  # Same thing with tick-box flags
  fib2tem calc Up --normal-load --shuttle-45 --milling-angle 10

  # Print the full lookup table for a 35° shuttle at 12°
  fib2tem table --shuttle 35 --milling-angle 12 --format markdown

  # Evaluate JSON lines from a file
  fib2tem batch requests.jsonl
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format [text, markdown, json] (default: from config, else text)
    #[arg(long = "format", value_enum, global = true)]
    format: Option<OutputFormatArg>,

    /// Config file path (default: ./.fib2tem.json, then the user config dir)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate cassette and Krios stage orientation for one grid
    Calc {
        /// Notch direction in the FIB shuttle
        /// [Up, Up-Right, Right, Down-Right, Down, Down-Left, Left, Up-Left]
        #[arg(value_name = "NOTCH")]
        notch: String,

        /// Lamellae location [bottom-right, top-left]
        #[arg(long = "lamellae", value_name = "LOCATION", help_heading = "Lamellae location")]
        lamellae: Option<String>,

        /// Lamellae in bottom-right (Normal Load)
        #[arg(long = "normal-load", help_heading = "Lamellae location")]
        normal_load: bool,

        /// Lamellae in top-left (Reverse Load)
        #[arg(long = "reverse-load", help_heading = "Lamellae location")]
        reverse_load: bool,

        /// Shuttle type [45, 35] (default: from config)
        #[arg(long = "shuttle", value_name = "TYPE", help_heading = "Shuttle type")]
        shuttle: Option<String>,

        /// 45° Shuttle
        #[arg(long = "shuttle-45", help_heading = "Shuttle type")]
        shuttle_45: bool,

        /// 35° Shuttle
        #[arg(long = "shuttle-35", help_heading = "Shuttle type")]
        shuttle_35: bool,

        /// Milling angle in degrees, 0 to 90 (default: from config, else 10)
        #[arg(long = "milling-angle", value_name = "DEGREES", allow_negative_numbers = true)]
        milling_angle: Option<i64>,
    },

    /// Print the lookup table for every notch direction and lamellae location
    Table {
        /// Shuttle type [45, 35] (default: from config, else 45)
        #[arg(long = "shuttle", value_name = "TYPE")]
        shuttle: Option<String>,

        /// Milling angle in degrees, 0 to 90 (default: from config, else 10)
        #[arg(long = "milling-angle", value_name = "DEGREES", allow_negative_numbers = true)]
        milling_angle: Option<i64>,
    },

    /// Evaluate JSON-lines requests from FILE (or stdin when absent or '-')
    Batch {
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Text,
    #[value(alias = "md")]
    Markdown,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Selections gathered from `calc` arguments
struct CalcArgs<'a> {
    notch: &'a str,
    lamellae: Option<&'a str>,
    normal_load: bool,
    reverse_load: bool,
    shuttle: Option<&'a str>,
    shuttle_45: bool,
    shuttle_35: bool,
    milling_angle: Option<i64>,
}

/// Feed every selection into a fresh request builder; the builder decides
/// whether the combination is usable.
fn build_request(args: &CalcArgs<'_>, config: &Config) -> fib2tem::Result<OrientationRequest> {
    let mut builder = OrientationRequest::builder().notch(NotchDirection::parse(args.notch)?);

    if let Some(location) = args.lamellae {
        builder = builder.lamellae(LamellaeLocation::parse(location)?);
    }
    if args.normal_load {
        builder = builder.lamellae(LamellaeLocation::BottomRight);
    }
    if args.reverse_load {
        builder = builder.lamellae(LamellaeLocation::TopLeft);
    }

    if let Some(shuttle) = args.shuttle {
        builder = builder.shuttle(ShuttleType::parse(shuttle)?);
    }
    if args.shuttle_45 {
        builder = builder.shuttle(ShuttleType::Deg45);
    }
    if args.shuttle_35 {
        builder = builder.shuttle(ShuttleType::Deg35);
    }

    let milling_angle = args
        .milling_angle
        .unwrap_or_else(|| i64::from(config.default_milling_angle.degrees()));

    builder
        .shuttle_or(config.default_shuttle)
        .milling_angle(milling_angle)
        .build()
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::discover(cli.config.as_deref())?.with_env();
    let format = cli.format.map(OutputFormat::from).unwrap_or(config.format);
    debug!("config: {:?}, format: {:?}", config, format);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Calc {
            notch,
            lamellae,
            normal_load,
            reverse_load,
            shuttle,
            shuttle_45,
            shuttle_35,
            milling_angle,
        } => {
            let args = CalcArgs {
                notch: &notch,
                lamellae: lamellae.as_deref(),
                normal_load,
                reverse_load,
                shuttle: shuttle.as_deref(),
                shuttle_45,
                shuttle_35,
                milling_angle,
            };
            let request = build_request(&args, &config)?;
            info!("calculating for {:?}", request);
            let result = request.compute();
            write_result(&mut out, &request, &result, format)?;
        }
        Commands::Table { shuttle, milling_angle } => {
            let shuttle = match shuttle {
                Some(s) => ShuttleType::parse(&s)?,
                None => config.default_shuttle.unwrap_or(ShuttleType::Deg45),
            };
            let milling_angle = match milling_angle {
                Some(degrees) => MillingAngle::new(degrees)?,
                None => config.default_milling_angle,
            };
            let rows = orientation_table(shuttle, milling_angle);
            write_table(&mut out, shuttle, milling_angle, &rows, format)?;
        }
        Commands::Batch { input } => {
            let summary = match input {
                Some(path) if path.as_os_str() != "-" => {
                    let file = File::open(&path)
                        .with_context(|| format!("Failed to open batch file {}", path.display()))?;
                    run_batch(BufReader::new(file), &mut out)?
                }
                _ => run_batch(io::stdin().lock(), &mut out)?,
            };
            info!("batch: {} processed, {} failed", summary.processed, summary.failed);
            if summary.failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Fix broken pipe panic when piping to head/tail/etc.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
