use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use payroll_model::{compare_datasets, Pipeline, PipelineConfig};
use payroll_xlsx::{default_file_name, write_dataset_xlsx, ExportOptions};
use tracing_subscriber::EnvFilter;

use crate::input::{load_dataset, InputFormat, InputSource};
use crate::render;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "payroll_dash",
    about = "Normalize shop payroll exports and report employee and shop efficiency."
)]
pub struct Args {
    /// Pipeline config (header aliases, known employees, thresholds, validation).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (`-v` info, `-vv` debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print per-employee figures, the shop summary and the team summary.
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the `Payment Summary` workbook.
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Destination file (default: `Employee_Payments_<today>.xlsx`).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Compare two periods side by side.
    Compare {
        /// Current period.
        left: PathBuf,

        /// Baseline period; percentage changes are relative to it.
        right: PathBuf,

        #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
        input_format: InputFormat,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Payroll export. `.csv` is read as CSV, anything else as JSON; `-` reads stdin.
    #[arg(required_unless_present = "url_data", conflicts_with = "url_data")]
    input: Option<PathBuf>,

    /// Percent-encoded JSON payload, as carried in a `?data=` URL parameter.
    #[arg(long, value_name = "ENCODED")]
    url_data: Option<String>,

    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    input_format: InputFormat,
}

impl InputArgs {
    fn source(&self) -> InputSource {
        match (&self.url_data, &self.input) {
            (Some(encoded), _) => InputSource::UrlData(encoded.clone()),
            (None, Some(path)) => InputSource::from_arg(path),
            (None, None) => InputSource::Stdin,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when running in-process (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading pipeline config");
            PipelineConfig::from_json_path(path)
                .with_context(|| format!("load config {}", path.display()))
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Write rendered output to stdout; a closed pipe (`| head`) is not an error.
fn emit(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Result<()> {
    let mut buf = Vec::new();
    render(&mut buf)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match handle.write_all(&buf).and_then(|()| handle.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("write to stdout"),
    }
}

fn same_input(left: &Path, right: &Path) -> bool {
    match (left.canonicalize(), right.canonicalize()) {
        (Ok(l), Ok(r)) => l == r,
        _ => left == right,
    }
}

pub fn run_with_args(args: Args) -> Result<()> {
    init_logging(args.verbose);
    let config = load_config(args.config.as_deref())?;
    let pipeline = Pipeline::new(config);
    let config = pipeline.config();

    match args.command {
        Command::Report { input, format } => {
            let dataset = load_dataset(&pipeline, &input.source(), input.input_format)?;
            match format {
                OutputFormat::Text => emit(|out| render::write_text_report(out, &dataset, config)),
                OutputFormat::Json => emit(|out| render::write_json_report(out, &dataset, config)),
            }
        }
        Command::Export { input, out } => {
            let dataset = load_dataset(&pipeline, &input.source(), input.input_format)?;
            let options = ExportOptions {
                currency_symbol: config.currency_symbol,
                thresholds: config.thresholds.employee,
                ..ExportOptions::default()
            };
            let path = out.unwrap_or_else(|| {
                PathBuf::from(default_file_name(options.generated_at.date_naive()))
            });
            write_dataset_xlsx(&path, &dataset, &options)
                .with_context(|| format!("export {}", path.display()))?;
            emit(|buf| {
                writeln!(
                    buf,
                    "Wrote {} ({} employees)",
                    path.display(),
                    dataset.employees.len()
                )
            })
        }
        Command::Compare {
            left,
            right,
            input_format,
            format,
        } => {
            let left_source = InputSource::from_arg(&left);
            let right_source = InputSource::from_arg(&right);
            if left_source == InputSource::Stdin && right_source == InputSource::Stdin {
                anyhow::bail!("only one side of a comparison can be read from stdin");
            }
            if same_input(&left, &right) {
                anyhow::bail!(
                    "cannot compare {} with itself; pass two different periods",
                    left.display()
                );
            }

            let left_data = load_dataset(&pipeline, &left_source, input_format)?;
            let right_data = load_dataset(&pipeline, &right_source, input_format)?;
            let comparison = compare_datasets(&left_data, &right_data);

            let left_label = left_source.label();
            let right_label = right_source.label();
            match format {
                OutputFormat::Text => emit(|out| {
                    render::write_text_comparison(
                        out,
                        &comparison,
                        &left_label,
                        &right_label,
                        config.currency_symbol,
                    )
                }),
                OutputFormat::Json => emit(|out| {
                    render::write_json_comparison(out, &comparison, &left_label, &right_label)
                }),
            }
        }
    }
}
