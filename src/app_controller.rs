use anyhow::{Result, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::cleaner::{self, PurgeReport};
use crate::file_utils::FileManager;
use crate::language_resolver::{LanguageDetector, LanguageResolver, WhatlangDetector};
use crate::language_utils::IsoLanguageRegistry;
use crate::subtitle::{LoadOptions, Subtitle};

// @module: Application controller for subtitle cleaning

/// Options given for a single invocation, on top of the configuration file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Language to assign to every file
    pub language: Option<String>,
    /// 1-based block positions to delete in every file
    pub destroy_list: Vec<usize>,
    /// Overrides `relative_base` from the configuration
    pub relative_base: Option<PathBuf>,
    /// Report what would be removed without writing files
    pub dry_run: bool,
}

/// Totals over a batch of files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub removed_blocks: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    registry: IsoLanguageRegistry,
    detector: Box<dyn LanguageDetector>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_detector(config, Box::new(WhatlangDetector))
    }

    // @method: Create a controller using a specific language detector
    pub fn with_detector(config: Config, detector: Box<dyn LanguageDetector>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: IsoLanguageRegistry,
            detector,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn resolver(&self) -> LanguageResolver<'_> {
        LanguageResolver::with_settings(
            &self.registry,
            self.detector.as_ref(),
            self.config.language_detection.clone(),
        )
    }

    /// Merge configuration and invocation options into document settings
    pub fn load_options(&self, options: &RunOptions) -> LoadOptions {
        LoadOptions {
            language: options.language.clone(),
            default_language: self.config.default_language.clone(),
            relative_base: options
                .relative_base
                .clone()
                .or_else(|| self.config.relative_base.clone()),
            destroy_list: options.destroy_list.clone(),
        }
    }

    /// Clean a single subtitle file
    pub fn process_file(&self, path: &Path, options: &RunOptions) -> Result<PurgeReport> {
        let mut subtitle = Subtitle::load(path, &self.load_options(options), &self.resolver())?;
        debug!(
            "{}: {} blocks, language '{}'",
            subtitle.short_path().display(),
            subtitle.len(),
            subtitle.language()
        );

        let report = cleaner::purge(&mut subtitle);

        if !report.warning_indexes.is_empty() {
            warn!(
                "{}: blocks to review: {}",
                subtitle.short_path().display(),
                report.warning_indexes.join(", ")
            );
        }

        if report.removed > 0 && !options.dry_run {
            warn!(
                "{}: rewriting without the final cue of the original file",
                subtitle.short_path().display()
            );
            FileManager::write_to_file(subtitle.file(), &subtitle.to_content())?;
        }

        Ok(report)
    }

    /// Clean every file given, recursing into directories for `.srt` files.
    /// A failing file is logged and counted without stopping the batch.
    pub fn run(&self, inputs: &[PathBuf], options: &RunOptions) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for file in self.collect_files(inputs, &mut summary)? {
            match self.process_file(&file, options) {
                Ok(report) => {
                    summary.processed += 1;
                    summary.removed_blocks += report.removed;
                }
                Err(e) => {
                    error!("{:#}", e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Processed {} file(s), {} failed, {} block(s) removed{}",
            summary.processed,
            summary.failed,
            summary.removed_blocks,
            if options.dry_run { " (dry run)" } else { "" }
        );

        Ok(summary)
    }

    fn collect_files(&self, inputs: &[PathBuf], summary: &mut RunSummary) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for input in inputs {
            if FileManager::file_exists(input) {
                files.push(input.clone());
            } else if input.is_dir() {
                files.extend(FileManager::find_files(input, "srt")?);
            } else {
                error!("{:#}", anyhow!("Input path does not exist: {:?}", input));
                summary.failed += 1;
            }
        }
        Ok(files)
    }
}
