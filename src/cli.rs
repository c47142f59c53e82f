//! CLI interface for iss-now.
//!
//! Two commands:
//!
//! - `iss-now fetch`: GET the open-notify endpoint, map the response, print it.
//! - `iss-now map [FILE]`: map a saved response without touching the network.
//!
//! The record goes to stdout; diagnostics go to stderr via `tracing`.

mod format;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use crate::config::Config;
use crate::fetch::{Fetcher, MAX_TIMEOUT_SECS};
use crate::model::PositionRecord;
use crate::{mapper, zone};

use format::render_record;

/// iss-now: where is the International Space Station right now?
#[derive(Debug, Parser)]
#[command(name = "iss-now", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `iss_now=debug`).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r#"Examples:
  iss-now fetch
  iss-now fetch --tz Europe/Dublin --format json
  curl -s http://api.open-notify.org/iss-now.json > now.json
  iss-now map now.json --tz UTC

Time zone:
  The API sends a bare epoch timestamp. It is converted to civil time using
  --tz, then $ISS_NOW_TZ, then `time-zone` in ~/.iss-now/config.toml, and
  finally the system zone. Pin one of these for reproducible output."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current ISS position and print it.
    Fetch {
        /// Endpoint to query. Defaults to the configured or built-in URL.
        #[arg(long)]
        url: Option<String>,

        /// Request deadline in seconds (1 to 3600).
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
        timeout: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Map a saved API response instead of fetching one.
    Map {
        /// File holding the response JSON. Reads stdin when omitted or `-`.
        file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Flags shared by every command that prints a record.
#[derive(Debug, clap::Args)]
pub struct OutputArgs {
    /// Time zone for the observation time (IANA name or `UTC`).
    #[arg(long)]
    tz: Option<String>,

    /// How to print the record.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Run a parsed command line, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    match cli.command {
        Command::Fetch {
            url,
            timeout,
            output,
        } => cmd_fetch(config, url.as_deref(), timeout, &output),
        Command::Map { file, output } => cmd_map(config, file.as_deref(), &output),
    }
}

fn cmd_fetch(
    config: &Config,
    url: Option<&str>,
    timeout: Option<u64>,
    output: &OutputArgs,
) -> Result<(), String> {
    let zone = zone::resolve_zone(output.tz.as_deref(), config.time_zone.as_deref())?;
    let url = url.unwrap_or(&config.url);
    let timeout = timeout.map_or_else(|| config.timeout(), Duration::from_secs);

    let fetcher =
        Fetcher::new(timeout).map_err(|e| format!("failed to build HTTP client: {e}"))?;
    let body = fetcher
        .fetch(url)
        .map_err(|e| format!("failed to fetch {url}: {e}"))?;

    let record = mapper::map(&body, &zone)
        .map_err(|e| format!("failed to map response from {url}: {e}"))?;

    print_record(&record, output.format)
}

fn cmd_map(config: &Config, file: Option<&Path>, output: &OutputArgs) -> Result<(), String> {
    let zone = zone::resolve_zone(output.tz.as_deref(), config.time_zone.as_deref())?;

    let (raw, origin) = match file {
        Some(path) if path != Path::new("-") => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            (raw, path.display().to_string())
        }
        _ => {
            let raw = io::read_to_string(io::stdin())
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            (raw, "stdin".to_string())
        }
    };
    info!(%origin, bytes = raw.len(), "mapping saved response");

    let record =
        mapper::map(&raw, &zone).map_err(|e| format!("failed to map {origin}: {e}"))?;

    print_record(&record, output.format)
}

fn print_record(record: &PositionRecord, format: OutputFormat) -> Result<(), String> {
    debug!(
        observed_at = %record.observed_at(),
        message = record.message(),
        latitude = record.latitude(),
        longitude = record.longitude(),
        "mapped position"
    );
    println!("{}", render_record(record, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fetch_defaults() {
        let cli = Cli::try_parse_from(["iss-now", "fetch"]).unwrap();

        assert_eq!(cli.log_level, "warn");
        let Command::Fetch {
            url,
            timeout,
            output,
        } = cli.command
        else {
            panic!("expected fetch command");
        };
        assert!(url.is_none());
        assert!(timeout.is_none());
        assert!(output.tz.is_none());
        assert_eq!(output.format, OutputFormat::Text);
    }

    #[test]
    fn fetch_with_overrides() {
        let cli = Cli::try_parse_from([
            "iss-now",
            "fetch",
            "--url",
            "http://localhost:9000/iss",
            "--timeout",
            "3",
            "--tz",
            "UTC",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        let Command::Fetch {
            url,
            timeout,
            output,
        } = cli.command
        else {
            panic!("expected fetch command");
        };
        assert_eq!(url.as_deref(), Some("http://localhost:9000/iss"));
        assert_eq!(timeout, Some(3));
        assert_eq!(output.tz.as_deref(), Some("UTC"));
        assert_eq!(output.format, OutputFormat::Json);
    }

    #[test]
    fn timeout_must_be_in_range() {
        assert!(Cli::try_parse_from(["iss-now", "fetch", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["iss-now", "fetch", "--timeout", "3601"]).is_err());
        assert!(
            Cli::try_parse_from(["iss-now", "fetch", "--timeout", "18446744073709551615"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["iss-now", "fetch", "--timeout", "3600"]).is_ok());
    }

    #[test]
    fn map_takes_optional_file() {
        let cli = Cli::try_parse_from(["iss-now", "map", "now.json"]).unwrap();
        let Command::Map { file, .. } = cli.command else {
            panic!("expected map command");
        };
        assert_eq!(file, Some(PathBuf::from("now.json")));

        let cli = Cli::try_parse_from(["iss-now", "map"]).unwrap();
        let Command::Map { file, .. } = cli.command else {
            panic!("expected map command");
        };
        assert!(file.is_none());
    }

    #[test]
    fn map_reports_missing_file() {
        let output = OutputArgs {
            tz: Some("UTC".to_string()),
            format: OutputFormat::Text,
        };

        let err = cmd_map(
            &Config::default(),
            Some(Path::new("/nonexistent/iss-now.json")),
            &output,
        )
        .unwrap_err();

        assert!(err.starts_with("failed to read /nonexistent/iss-now.json"), "{err}");
    }

    #[test]
    fn map_reports_mapping_failure_with_origin() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("now.json");
        fs::write(&path, r#"{"message":"success","timestamp":1709547901}"#).unwrap();
        let output = OutputArgs {
            tz: Some("UTC".to_string()),
            format: OutputFormat::Text,
        };

        let err = cmd_map(&Config::default(), Some(&path), &output).unwrap_err();

        assert!(err.starts_with("failed to map"), "{err}");
        assert!(err.ends_with("missing field: iss_position"), "{err}");
    }
}
