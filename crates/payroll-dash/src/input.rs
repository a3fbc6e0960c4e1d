use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use payroll_model::{CsvOptions, Dataset, Pipeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// `.csv` files as CSV, everything else as JSON.
    Auto,
    Csv,
    Json,
}

impl InputFormat {
    fn resolve(self, path: Option<&Path>) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_csv = path
                    .and_then(Path::extension)
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if is_csv {
                    InputFormat::Csv
                } else {
                    InputFormat::Json
                }
            }
            other => other,
        }
    }
}

/// Where one payroll payload comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Path(PathBuf),
    /// Percent-encoded JSON from a `?data=` URL parameter.
    UrlData(String),
}

impl InputSource {
    pub fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::Path(path.to_path_buf())
        }
    }

    pub fn label(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::Path(path) => path.display().to_string(),
            InputSource::UrlData(_) => "url data".to_string(),
        }
    }
}

pub fn load_dataset(
    pipeline: &Pipeline,
    source: &InputSource,
    format: InputFormat,
) -> Result<Dataset> {
    tracing::debug!(source = %source.label(), ?format, "loading payroll input");
    match source {
        InputSource::UrlData(encoded) => pipeline
            .ingest_url_param(encoded)
            .context("ingest --url-data payload"),
        InputSource::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("read stdin")?;
            ingest_bytes(pipeline, &bytes, format.resolve(None), "stdin")
        }
        InputSource::Path(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
            ingest_bytes(
                pipeline,
                &bytes,
                format.resolve(Some(path)),
                &path.display().to_string(),
            )
        }
    }
}

fn ingest_bytes(
    pipeline: &Pipeline,
    bytes: &[u8],
    format: InputFormat,
    label: &str,
) -> Result<Dataset> {
    match format {
        InputFormat::Csv => pipeline
            .ingest_csv_reader(bytes, &CsvOptions::default())
            .with_context(|| format!("ingest {label} as CSV")),
        InputFormat::Json | InputFormat::Auto => {
            let text = std::str::from_utf8(bytes)
                .with_context(|| format!("{label} is not valid UTF-8"))?;
            pipeline
                .ingest_json_str(text.trim_start_matches('\u{feff}'))
                .with_context(|| format!("ingest {label} as JSON"))
        }
    }
}
