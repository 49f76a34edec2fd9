//! Parse command - extract metrics from a single note.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use vitalnote_core::{ClinicalNote, HealthMetricParser, HealthMetricResult};

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Note text (read from stdin when neither TEXT nor --file is given)
    text: Option<String>,

    /// Read the note from a file
    #[arg(short = 'i', long = "file", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Reading note from {}", path.display());
            fs::read_to_string(path)?
        }
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let note = ClinicalNote::new(text.trim_end_matches(['\r', '\n']));
    note.validate_with_limit(config.note.max_chars)?;

    let parser = HealthMetricParser::from_config(&config.extraction);
    let metrics = parser.parse(&note.text).inspect_err(|e| {
        warn!("Extraction failed: {}", e);
    })?;

    let output = format_metrics(&metrics, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_metrics(metrics: &HealthMetricResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(metrics)?),
        OutputFormat::Csv => format_csv(metrics),
        OutputFormat::Text => Ok(format_text(metrics)),
    }
}

fn format_csv(metrics: &HealthMetricResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["weight", "height"])?;
    wtr.write_record([&metrics.weight, &metrics.height])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(metrics: &HealthMetricResult) -> String {
    let show = |value: &str| {
        if value.is_empty() {
            "(not found)".to_string()
        } else {
            value.to_string()
        }
    };

    format!("Weight: {}\nHeight: {}", show(&metrics.weight), show(&metrics.height))
}
