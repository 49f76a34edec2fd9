//! Batch processing command for multiple note files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, error, warn};

use vitalnote_core::models::config::VitalNoteConfig;
use vitalnote_core::{ClinicalNote, HealthMetricParser, HealthMetricResult};

use super::load_config;
use super::parse::{format_metrics, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (.txt notes, .jsonl note lists)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each note
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// One note to process.
struct NoteInput {
    /// Human-readable origin, e.g. `visit.txt` or `notes.jsonl:3`.
    label: String,
    /// Stem used for the per-note output file.
    output_stem: String,
    /// Note text, or why the record could not be read.
    text: Result<String, String>,
}

/// Result of processing a single note.
struct ProcessResult {
    label: String,
    output_stem: String,
    metrics: Option<HealthMetricResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

#[derive(Deserialize)]
struct JsonlNote {
    text: String,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| matches!(extension(p).as_str(), "txt" | "jsonl"))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let mut notes = Vec::new();
    for path in &files {
        match read_notes(path) {
            Ok(found) => notes.extend(found),
            Err(e) if args.continue_on_error => {
                warn!("Failed to read {}: {}", path.display(), e);
                notes.push(NoteInput {
                    label: file_label(path),
                    output_stem: file_stem(path),
                    text: Err(e.to_string()),
                });
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                anyhow::bail!("Failed to read {}: {}", path.display(), e);
            }
        }
    }

    println!(
        "{} Found {} notes in {} files",
        style("ℹ").blue(),
        notes.len(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(notes.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} notes")?
            .progress_chars("=>-"),
    );

    let parser = HealthMetricParser::from_config(&config.extraction);
    let mut results = Vec::with_capacity(notes.len());

    for note in notes {
        let note_start = Instant::now();
        let outcome = process_note(&note, &parser, &config);
        let processing_time_ms = note_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(metrics) => results.push(ProcessResult {
                label: note.label,
                output_stem: note.output_stem,
                metrics: Some(metrics),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", note.label, error_msg);
                    results.push(ProcessResult {
                        label: note.label,
                        output_stem: note.output_stem,
                        metrics: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", note.label, error_msg);
                    anyhow::bail!("Processing failed for {}: {}", note.label, error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.metrics.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(metrics) = &result.metrics {
                let output_path = output_dir.join(format!(
                    "{}.{}",
                    result.output_stem,
                    args.format.extension()
                ));
                fs::write(&output_path, format_metrics(metrics, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} notes in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed notes:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.label,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("note")
        .to_string()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("note")
        .to_string()
}

/// Read the notes held by one input file.
///
/// A `.txt` file is a single note; a `.jsonl` file holds one `{"text": ...}`
/// object per non-blank line. A line that is not a valid record is returned
/// as a failed note so the rest of the file is still processed.
fn read_notes(path: &Path) -> anyhow::Result<Vec<NoteInput>> {
    let content = fs::read_to_string(path)?;
    let file_name = file_label(path);
    let stem = file_stem(path);

    if extension(path) != "jsonl" {
        return Ok(vec![NoteInput {
            label: file_name,
            output_stem: stem,
            text: Ok(content.trim_end_matches(['\r', '\n']).to_string()),
        }]);
    }

    let mut notes = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_no = idx + 1;
        let text = serde_json::from_str::<JsonlNote>(line)
            .map(|note| note.text)
            .map_err(|e| format!("invalid note record: {}", e));

        notes.push(NoteInput {
            label: format!("{}:{}", file_name, line_no),
            output_stem: format!("{}-{}", stem, line_no),
            text,
        });
    }

    Ok(notes)
}

fn process_note(
    input: &NoteInput,
    parser: &HealthMetricParser,
    config: &VitalNoteConfig,
) -> anyhow::Result<HealthMetricResult> {
    let text = input.text.as_deref().map_err(|e| anyhow::anyhow!("{}", e))?;
    let note = ClinicalNote::new(text);
    note.validate_with_limit(config.note.max_chars)?;
    Ok(parser.parse(&note.text)?)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "source",
        "status",
        "weight",
        "height",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let time_ms = result.processing_time_ms.to_string();
        match &result.metrics {
            Some(metrics) => wtr.write_record([
                result.label.as_str(),
                "success",
                &metrics.weight,
                &metrics.height,
                &time_ms,
                "",
            ])?,
            None => wtr.write_record([
                result.label.as_str(),
                "error",
                "",
                "",
                &time_ms,
                result.error.as_deref().unwrap_or(""),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_txt_note() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visit.txt");
        fs::write(&path, "weight of 75 kg\n").unwrap();

        let notes = read_notes(&path).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].label, "visit.txt");
        assert_eq!(notes[0].output_stem, "visit");
        assert_eq!(notes[0].text.as_deref(), Ok("weight of 75 kg"));
    }

    #[test]
    fn test_read_jsonl_notes_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ward.jsonl");
        fs::write(
            &path,
            "{\"text\": \"weight of 75 kg\"}\n\n{\"text\": \"height of 100cm\"}\n",
        )
        .unwrap();

        let notes = read_notes(&path).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].label, "ward.jsonl:1");
        assert_eq!(notes[1].label, "ward.jsonl:3");
        assert_eq!(notes[1].output_stem, "ward-3");
        assert_eq!(notes[1].text.as_deref(), Ok("height of 100cm"));
    }

    #[test]
    fn test_read_jsonl_keeps_going_past_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        fs::write(&path, "not json\n{\"text\": \"weight of 75 kg\"}\n").unwrap();

        let notes = read_notes(&path).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].label, "bad.jsonl:1");
        assert!(notes[0].text.as_ref().unwrap_err().starts_with("invalid note record:"));
        assert_eq!(notes[1].text.as_deref(), Ok("weight of 75 kg"));
    }

    #[test]
    fn test_read_non_utf8_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, b"\xff\xfe\x00").unwrap();

        assert!(read_notes(&path).is_err());
    }

    #[test]
    fn test_process_note_reports_unreadable_record() {
        let config = VitalNoteConfig::default();
        let parser = HealthMetricParser::new();
        let input = NoteInput {
            label: "ward.jsonl:2".to_string(),
            output_stem: "ward-2".to_string(),
            text: Err("invalid note record: expected value".to_string()),
        };

        let err = process_note(&input, &parser, &config).unwrap_err();
        assert_eq!(err.to_string(), "invalid note record: expected value");
    }

    #[test]
    fn test_process_note_checks_length_first() {
        let config = VitalNoteConfig::default();
        let parser = HealthMetricParser::new();
        let input = NoteInput {
            label: "empty.txt".to_string(),
            output_stem: "empty".to_string(),
            text: Ok(String::new()),
        };

        let err = process_note(&input, &parser, &config).unwrap_err();
        assert_eq!(err.to_string(), "note text is required");
    }
}
