//! `patchplan` CLI: reads a project description as JSON, validates it,
//! runs the allocator, and renders the result in the requested format.

use clap::{Parser, Subcommand, ValueEnum};
use patchplan::model::AllocationResult;
use patchplan::render::{render_csv, render_json, render_svg};
use patchplan::{allocate_project, validate, RawProject};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "patchplan", about = "Deterministic patch-cabling planner")]
struct Cli {
    /// Raise the tracing filter to `debug` (pass twice for `trace`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a project description and emit its allocation plan.
    Plan {
        /// Path to a project description in JSON.
        #[arg(short, long)]
        input: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Destination. For `svg`, a directory receiving three files; for
        /// `csv`/`json`, a file path. Omit to write to stdout (csv/json
        /// only).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
    Svg,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "patchplan=info",
        1 => "patchplan=debug",
        _ => "patchplan=trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Plan { input, format, output } => {
            info!(path = %input.display(), "reading project description");
            let raw: RawProject = serde_json::from_str(&fs::read_to_string(&input)?)?;
            let project = validate(raw)?;
            let result = allocate_project(&project);
            info!(
                panels = result.panels.len(),
                modules = result.modules.len(),
                cables = result.cables.len(),
                sessions = result.sessions.len(),
                "allocation complete"
            );
            write_output(&result, format, output.as_deref())
        }
    }
}

fn write_output(
    result: &AllocationResult,
    format: Format,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Csv => {
            let rendered = render_csv(&result.sessions);
            emit(&rendered, output)
        }
        Format::Json => {
            let rendered = render_json(result);
            emit(&rendered, output)
        }
        Format::Svg => {
            let views = render_svg(result);
            let dir = output.ok_or("--output <dir> is required for svg format")?;
            fs::create_dir_all(dir)?;
            fs::write(dir.join("topology.svg"), views.topology)?;
            fs::write(dir.join("panels.svg"), views.panels)?;
            fs::write(dir.join("pair-detail.svg"), views.pair_detail)?;
            Ok(())
        }
    }
}

fn emit(rendered: &str, output: Option<&std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}
