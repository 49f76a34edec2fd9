//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use vitalnote_core::models::config::VitalNoteConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.weight_range.max")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<VitalNoteConfig> {
    if path.exists() {
        Ok(VitalNoteConfig::from_file(path)?)
    } else {
        Ok(VitalNoteConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    VitalNoteConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// Look up a dotted key in the JSON form of a config.
fn lookup_key<'a>(json: &'a serde_json::Value, key: &str) -> anyhow::Result<&'a serde_json::Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Return a copy of `config` with the dotted `key` set to `value`.
///
/// `value` is parsed as JSON when possible and taken as a string otherwise.
/// The result must still pass config validation.
fn apply_setting(config: &VitalNoteConfig, key: &str, value: &str) -> anyhow::Result<VitalNoteConfig> {
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(config)?;

    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let mut current = &mut json;
    if let Some(parent_key) = parent_key {
        for part in parent_key.split('.') {
            current = current
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let obj = current
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !obj.contains_key(leaf) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    obj.insert(leaf.to_string(), parsed_value);

    let updated: VitalNoteConfig = serde_json::from_value(json)?;
    updated.validate()?;
    Ok(updated)
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let json = serde_json::to_value(&config)?;

    println!("{}", serde_json::to_string_pretty(lookup_key(&json, key)?)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let updated = apply_setting(&config, key, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    updated.save(path)?;

    let json = serde_json::to_value(&updated)?;
    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(lookup_key(&json, key)?)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'vitalnote config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalnote_core::PlausibleRange;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(VitalNoteConfig::default()).unwrap();
        let value = lookup_key(&json, "extraction.weight_range.max").unwrap();
        assert_eq!(value, &serde_json::json!(635.0));
    }

    #[test]
    fn test_lookup_unknown_key() {
        let json = serde_json::to_value(VitalNoteConfig::default()).unwrap();
        assert!(lookup_key(&json, "extraction.bmi_range").is_err());
    }

    #[test]
    fn test_apply_numeric_setting() {
        let updated =
            apply_setting(&VitalNoteConfig::default(), "extraction.height_range.min", "30").unwrap();
        assert_eq!(updated.extraction.height_range, PlausibleRange::new(30.0, 272.0));
    }

    #[test]
    fn test_apply_string_setting() {
        let updated =
            apply_setting(&VitalNoteConfig::default(), "server.required_role", "NURSE").unwrap();
        assert_eq!(updated.server.required_role, "NURSE");
    }

    #[test]
    fn test_apply_rejects_unknown_key() {
        assert!(apply_setting(&VitalNoteConfig::default(), "server.port", "80").is_err());
    }

    #[test]
    fn test_apply_rejects_inverted_range() {
        let err = apply_setting(&VitalNoteConfig::default(), "extraction.weight_range.min", "700")
            .unwrap_err();
        assert!(err.to_string().contains("extraction.weight_range"));
    }

    #[test]
    fn test_apply_rejects_wrong_type() {
        assert!(apply_setting(&VitalNoteConfig::default(), "note.max_chars", "lots").is_err());
    }
}
