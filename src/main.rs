// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use sheetwai::app_config::{Config, LogLevel};
use sheetwai::app_controller::Controller;
use sheetwai::language_utils::TargetLanguage;

/// CLI Wrapper for TargetLanguage to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTargetLanguage {
    /// Vietnamese to Japanese
    Ja,
    /// Japanese to Vietnamese
    Vi,
}

impl From<CliTargetLanguage> for TargetLanguage {
    fn from(cli_target: CliTargetLanguage) -> Self {
        match cli_target {
            CliTargetLanguage::Ja => TargetLanguage::Ja,
            CliTargetLanguage::Vi => TargetLanguage::Vi,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for sheetwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// SheetwAI - Spreadsheet translation with AI
///
/// Translates the text of every document in the input directory between
/// Vietnamese and Japanese and writes translated copies to the output directory.
#[derive(Parser, Debug)]
#[command(name = "sheetwai")]
#[command(version)]
#[command(about = "AI-powered spreadsheet translation tool")]
#[command(long_about = "SheetwAI translates the text of spreadsheet documents (.json workbooks and .csv files) with an OpenAI-compatible model.

EXAMPLES:
    sheetwai                                # Vietnamese to Japanese with conf.json
    sheetwai --to vi                        # Japanese to Vietnamese
    sheetwai -i sheets -o translated        # Custom input and output directories
    sheetwai -b 50 --api-delay 4            # Smaller batches, slower pacing
    sheetwai completions bash > sheetwai.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. The API key is read from translation.api_key or,
    when empty, from the GEMINI_API_KEY environment variable (.env supported).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Target language (ja: Vietnamese to Japanese, vi: Japanese to Vietnamese)
    #[arg(long = "to", value_enum)]
    target_language: Option<CliTargetLanguage>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Directory holding the documents to translate
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving the translated documents
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Maximum number of fragments per request
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Minimum delay between requests, in seconds
    #[arg(long)]
    api_delay: Option<f64>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "sheetwai", &mut std::io::stdout());
        return Ok(());
    }

    let start_time = Instant::now();
    let result = run_translate(cli).await;
    info!(
        "⏱️ Total execution time: {}",
        Controller::format_duration(start_time.elapsed())
    );
    result
}

fn apply_overrides(config: &mut Config, options: &CommandLineOptions) {
    if let Some(target) = &options.target_language {
        config.target_language = target.clone().into();
    }
    if let Some(input_dir) = &options.input_dir {
        config.paths.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.paths.output_dir = output_dir.clone();
    }
    if let Some(batch_size) = options.batch_size {
        config.batching.batch_size = batch_size;
    }
    if let Some(api_delay) = options.api_delay {
        config.translation.api_delay_ms = (api_delay.max(0.0) * 1000.0).round() as u64;
    }
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // Environment first, so the API key can come from .env
    let _ = dotenv::dotenv();

    let (mut config, created) = Config::load_or_create(&options.config_path)?;
    if created {
        warn!(
            "Config file not found at {:?}, created default config.",
            options.config_path
        );
    }

    apply_overrides(&mut config, &options);
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let mut controller = Controller::with_config(config)?;
    let summary = controller.run().await?;

    if !summary.all_documents_succeeded() {
        warn!(
            "{} document(s) could not be translated",
            summary.failed_documents.len()
        );
    }

    Ok(())
}
