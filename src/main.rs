// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subscrub::app_config::{self, Config};
use subscrub::app_controller::{Controller, RunOptions};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subscrub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subscrub - remove advertisement cues from SRT subtitles
#[derive(Parser, Debug)]
#[command(name = "subscrub")]
#[command(version)]
#[command(about = "Remove advertisement cues from SRT subtitles")]
#[command(long_about = "subscrub parses SRT subtitle files, resolves their language, removes \
blocks confirmed for deletion and renumbers the rest.

EXAMPLES:
    subscrub movie.en.srt                  # Clean a single file
    subscrub -d 1,2 movie.srt              # Also delete blocks 1 and 2
    subscrub -n /movies/                   # Report without writing files
    subscrub completions bash              # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Language of the subtitles, skipping detection (e.g. 'en')
    #[arg(short, long)]
    language: Option<String>,

    /// 1-based positions of blocks to delete
    #[arg(short, long, value_delimiter = ',')]
    destroy: Vec<usize>,

    /// Base directory used to shorten paths in the output
    #[arg(short, long)]
    relative_base: Option<PathBuf>,

    /// Report changes without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "subscrub.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
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
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subscrub", &mut std::io::stdout());
        return Ok(());
    }

    if cli.paths.is_empty() {
        return Err(anyhow!("At least one PATH is required"));
    }

    let mut config = Config::load_or_default(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    let options = RunOptions {
        language: cli.language,
        destroy_list: cli.destroy,
        relative_base: cli.relative_base,
        dry_run: cli.dry_run,
    };

    let summary = controller.run(&cli.paths, &options)?;
    if summary.failed > 0 {
        return Err(anyhow!("{} file(s) could not be processed", summary.failed));
    }

    Ok(())
}
