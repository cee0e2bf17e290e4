// payval CLI - validate point-of-sale captured payments against the
// transfer-system ledger.

mod exit_codes;
mod export;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use payval_recon::normalize::{load_ledger_rows, load_reported_rows};
use payval_recon::{ReconConfig, ReconInput};

use exit_codes::{
    EXIT_DISCREPANCY, EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "payval")]
#[command(about = "Validate point-of-sale payments against the transfer ledger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  payval run validation.toml
  payval run validation.toml --json
  payval run validation.toml --output result.json
  payval run validation.toml --detail detail.csv --summary summary.csv
  payval run validation.toml --report")]
    Run {
        /// Path to the config file; CSV paths resolve relative to it
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the detailed comparison table as CSV
        #[arg(long)]
        detail: Option<PathBuf>,

        /// Write the reason-frequency summary as CSV
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Write both CSV tables with timestamped default names
        #[arg(long)]
        report: bool,

        /// Suppress stderr notes (e.g. dropped-row counts)
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a config without running
    #[command(after_help = "\
Examples:
  payval validate validation.toml")]
    Validate {
        /// Path to the config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap renders its own message; --help/--version land here too
            let is_usage_error = e.use_stderr();
            let _ = e.print();
            return ExitCode::from(if is_usage_error { EXIT_USAGE } else { EXIT_SUCCESS });
        }
    };

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            detail,
            summary,
            report,
            quiet,
        } => cmd_run(config, json, output, detail, summary, report, quiet),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_INVALID_CONFIG,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_RUNTIME,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    detail_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
    report: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;
    let config =
        ReconConfig::from_toml(&config_str).map_err(|e| CliError::invalid_config(e.to_string()))?;

    // Resolve CSV paths relative to the config file's directory
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."));

    let ledger_data = read_source(base_dir, &config.ledger.file)?;
    let ledger = load_ledger_rows(&ledger_data, &config.ledger)
        .map_err(|e| CliError::runtime(e.to_string()))?;

    let reported_data = read_source(base_dir, &config.reported.file)?;
    let reported = load_reported_rows(&reported_data, &config.reported)
        .map_err(|e| CliError::runtime(e.to_string()))?;

    if !quiet {
        if ledger.dropped > 0 {
            eprintln!(
                "note: ledger: {} row(s) dropped (unparseable client id or amount)",
                ledger.dropped
            );
        }
        if reported.dropped > 0 {
            eprintln!(
                "note: reported: {} row(s) dropped (unparseable client id or amount)",
                reported.dropped
            );
        }
    }

    let input = ReconInput {
        ledger: ledger.records,
        reported: reported.records,
    };
    let result = payval_recon::run(&config, &input).map_err(|e| {
        CliError::runtime(e.to_string())
            .with_hint("resupply corrected input; partial results are never produced")
    })?;

    // JSON output
    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // CSV report tables
    let (detail_file, summary_file) = if report {
        let (detail_default, summary_default) = export::default_report_paths();
        (
            Some(detail_file.unwrap_or(detail_default)),
            Some(summary_file.unwrap_or(summary_default)),
        )
    } else {
        (detail_file, summary_file)
    };

    if let Some(ref path) = detail_file {
        export::write_detail_csv(path, &result.rows)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(ref path) = summary_file {
        export::write_summary_csv(path, &result.summary)?;
        eprintln!("wrote {}", path.display());
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "{} client(s) compared — {} OK, {} without POS payment, {} duplicate, {} alternate method, {} difference",
        s.total_rows, s.ok, s.no_pos_payment, s.duplicate_payment, s.alternate_method, s.difference,
    );

    if s.total_rows > s.ok {
        return Err(CliError {
            code: EXIT_DISCREPANCY,
            message: "discrepancies found".into(),
            hint: None,
        });
    }

    Ok(())
}

fn read_source(base_dir: &Path, file: &str) -> Result<String, CliError> {
    let path = base_dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", path.display())))
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;

    match ReconConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' — ledger '{}' vs reported '{}', primary method {}",
                config.name,
                config.ledger.file,
                config.reported.file,
                config.reported.primary_method,
            );
            Ok(())
        }
        Err(e) => Err(CliError::invalid_config(e.to_string())),
    }
}
