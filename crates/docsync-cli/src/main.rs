// crates/docsync-cli/src/main.rs
// ============================================================================
// Module: DocSync CLI Entry Point
// Description: Command dispatcher for verification runs and pack verification.
// Purpose: Provide a safe CLI for producing and verifying evidence packs.
// Dependencies: clap, docsync-adapters, docsync-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The DocSync CLI exposes two workflows: `run` evaluates a manifest against
//! a repository and writes an evidence pack, and `verify` checks a pack's
//! hash chain offline. Security posture: manifests, packs, and config files
//! are untrusted inputs and are read through hard size limits.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use docsync_adapters::FsCodebase;
use docsync_adapters::PatternSanitizer;
use docsync_adapters::load_manifest_file;
use docsync_core::Classification;
use docsync_core::DEFAULT_HASH_ALGORITHM;
use docsync_core::EvidencePack;
use docsync_core::PackVerifier;
use docsync_core::RunnerConfig;
use docsync_core::RunnerInfo;
use docsync_core::SanitizationPolicy;
use docsync_core::SyncRunner;
use docsync_core::Timestamp;
use docsync_core::classify;
use docsync_core::interfaces::Sanitizer;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of an evidence pack JSON input.
const MAX_PACK_BYTES: usize = 16 * 1024 * 1024;
/// Maximum size of a CLI config file.
const MAX_CONFIG_BYTES: usize = 1024 * 1024;
/// Default config file name resolved from the working directory.
const DEFAULT_CONFIG_FILE: &str = "docsync.toml";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "docsync", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run manifest verification against a repository and emit a pack.
    Run(RunCommand),
    /// Verify an evidence pack's hash chain offline.
    Verify(VerifyCommand),
}

/// Configuration for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Path to the claims manifest JSON file.
    #[arg(long, value_name = "PATH")]
    manifest: PathBuf,
    /// Repository root the manifest's evidence scopes resolve against.
    #[arg(long, value_name = "PATH")]
    repo: PathBuf,
    /// Output path for the evidence pack (stdout when omitted).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Optional config file path (defaults to docsync.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `verify` command.
#[derive(Args, Debug)]
struct VerifyCommand {
    /// Path to the evidence pack JSON file.
    #[arg(long, value_name = "PATH")]
    pack: PathBuf,
}

// ============================================================================
// SECTION: Config File
// ============================================================================

/// Root of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CliConfig {
    /// Runner tuning settings.
    #[serde(default)]
    runner: RunnerSection,
    /// Sanitization settings.
    #[serde(default)]
    sanitization: SanitizationSection,
}

/// Runner tuning settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunnerSection {
    /// Worker pool size for claim evaluation.
    #[serde(default)]
    workers: Option<usize>,
    /// Per-claim evaluation budget in milliseconds.
    #[serde(default)]
    claim_timeout_ms: Option<u64>,
}

/// Sanitization settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SanitizationSection {
    /// Whether sanitization runs at all.
    #[serde(default = "default_true")]
    enabled: bool,
    /// Whether sanitizer failure aborts the run.
    #[serde(default)]
    fail_closed: bool,
    /// Extra redaction patterns applied after the built-in table.
    #[serde(default)]
    patterns: Vec<String>,
}

impl Default for SanitizationSection {
    fn default() -> Self {
        Self {
            enabled: true,
            fail_closed: false,
            patterns: Vec::new(),
        }
    }
}

/// Serde default helper for boolean fields that default on.
const fn default_true() -> bool {
    true
}

/// Loads the config file, falling back to defaults when absent.
fn load_config(explicit: Option<&Path>) -> CliResult<CliConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(CliConfig::default());
            }
            default
        }
    };
    let bytes = read_bytes_with_limit(&path, MAX_CONFIG_BYTES)
        .map_err(|err| CliError::new(format!("failed to read config {}: {err}", path.display())))?;
    let text = String::from_utf8(bytes)
        .map_err(|err| CliError::new(format!("config {} is not UTF-8: {err}", path.display())))?;
    toml::from_str(&text)
        .map_err(|err| CliError::new(format!("failed to parse config {}: {err}", path.display())))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// File read errors under a size limit.
#[derive(Debug, Error)]
enum ReadLimitError {
    /// File I/O failure.
    #[error("{0}")]
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    #[error("file size {size} exceeds limit of {limit} bytes")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(&command),
        Commands::Verify(command) => command_verify(&command),
    }
}

/// Initializes structured logging to stderr with env-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DOCSYNC_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;

    let manifest = load_manifest_file(&command.manifest)
        .map_err(|err| CliError::new(err.to_string()))?;
    let accessor = FsCodebase::new(command.repo.clone());

    let sanitizer = if config.sanitization.enabled {
        let engine = PatternSanitizer::with_extra_patterns(&config.sanitization.patterns)
            .map_err(|err| CliError::new(err.to_string()))?;
        Some(engine)
    } else {
        None
    };
    let sanitizer_ref: Option<&dyn Sanitizer> =
        sanitizer.as_ref().map(|engine| engine as &dyn Sanitizer);

    let mut runner_config = RunnerConfig::default();
    if let Some(workers) = config.runner.workers {
        runner_config.workers = workers;
    }
    runner_config.claim_timeout = config.runner.claim_timeout_ms.map(Duration::from_millis);
    runner_config.sanitization_policy = if config.sanitization.fail_closed {
        SanitizationPolicy::FailClosed
    } else {
        SanitizationPolicy::FailOpen
    };

    let runner = SyncRunner::new(runner_config);
    let pack = runner
        .run(
            &manifest,
            &accessor,
            sanitizer_ref,
            RunnerInfo {
                name: "docsync".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            now_timestamp(),
        )
        .map_err(|err| CliError::new(err.to_string()))?;
    info!(claims = pack.entries.len(), "verification run complete");

    let bytes = pack.to_canonical_json().map_err(|err| CliError::new(err.to_string()))?;
    match &command.output {
        Some(path) => {
            std::fs::write(path, &bytes).map_err(|err| {
                CliError::new(format!("failed to write pack {}: {err}", path.display()))
            })?;
        }
        None => {
            write_stdout_bytes(&bytes)
                .and_then(|()| write_stdout_line(""))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }

    emit_run_summary(&pack)?;
    Ok(ExitCode::SUCCESS)
}

/// Writes the per-classification summary for a completed run to stderr.
fn emit_run_summary(pack: &EvidencePack) -> CliResult<()> {
    let mut satisfied = 0usize;
    let mut violations = 0usize;
    let mut updates_needed = 0usize;
    let mut unverified = 0usize;
    for entry in &pack.entries {
        match classify(entry.outcome, entry.mode) {
            Classification::Satisfied => satisfied += 1,
            Classification::Violation => violations += 1,
            Classification::UpdateNeeded => updates_needed += 1,
            Classification::Unverified => unverified += 1,
        }
    }
    let summary = format!(
        "{} claims: {satisfied} satisfied, {violations} violations, {updates_needed} update-needed, {unverified} unverified",
        pack.entries.len()
    );
    write_stderr_line(&summary).map_err(|err| CliError::new(output_error("stderr", &err)))
}

/// Captures the current wall clock as a pack timestamp.
fn now_timestamp() -> Timestamp {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0);
    Timestamp::UnixMillis(millis)
}

// ============================================================================
// SECTION: Verify Command
// ============================================================================

/// Executes the `verify` command.
fn command_verify(command: &VerifyCommand) -> CliResult<ExitCode> {
    let bytes = read_bytes_with_limit(&command.pack, MAX_PACK_BYTES).map_err(|err| {
        CliError::new(format!("failed to read pack {}: {err}", command.pack.display()))
    })?;
    let pack = EvidencePack::from_json(&bytes).map_err(|err| CliError::new(err.to_string()))?;

    let verifier = PackVerifier::new(DEFAULT_HASH_ALGORITHM);
    let report = verifier.verify(&pack);
    info!(entries = pack.entries.len(), valid = report.is_valid(), "pack verification complete");

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|err| CliError::new(format!("failed to render report: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if report.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        if let Some(fault) = &report.fault {
            write_stderr_line(&format!("chain diverges at entry {}", fault.index))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        }
        Ok(ExitCode::FAILURE)
    }
}

// ============================================================================
// SECTION: IO Helpers
// ============================================================================

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Writes a line to stdout without using `println!`.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr without using `eprintln!`.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message for a stream write failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
