use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::document::open_document;
use crate::file_utils::FileManager;
use crate::providers::Provider;
use crate::providers::openai::OpenAI;
use crate::translation::{
    BatchProgress, DocumentReport, PromptTemplate, RunSummary, TranslationClient,
    TranslationPipeline,
};

// @module: Application controller for spreadsheet translation

/// Main application controller: runs every document of the input directory
/// through the translation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Pipeline shared by all documents of the run, so pacing spans files
    pipeline: TranslationPipeline,
    // @field: Draw progress bars on the terminal
    show_progress: bool,
}

impl Controller {
    // @method: Create a controller talking to the configured remote service
    pub fn with_config(config: Config) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let provider = OpenAI::new(
            api_key,
            config.translation.endpoint.clone(),
            config.translation.model.clone(),
            config.translation.timeout_secs,
        );
        Self::with_provider(config, Arc::new(provider))
    }

    // @method: Create a controller around any provider
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let prompt = PromptTemplate::load_or_create(
            &config.paths.system_prompt_file,
            &config.translation.delimiter,
        )?;
        let client = TranslationClient::from_config(provider, prompt, &config.translation);
        let pipeline = TranslationPipeline::from_config(&config, client)?;

        Ok(Self {
            config,
            pipeline,
            show_progress: true,
        })
    }

    /// Enable or disable terminal progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run over the configured input and output directories
    pub async fn run(&mut self) -> Result<RunSummary> {
        let input_dir = self.config.paths.input_dir.clone();
        let output_dir = self.config.paths.output_dir.clone();
        self.run_folder(&input_dir, &output_dir).await
    }

    /// Translate every document directly inside `input_dir` into `output_dir`
    ///
    /// A missing input directory is created and the run ends without work.
    /// A document that fails to open, translate or save is recorded and the
    /// run moves on to the next one.
    pub async fn run_folder(&mut self, input_dir: &Path, output_dir: &Path) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::default();

        if !FileManager::dir_exists(input_dir) {
            FileManager::ensure_dir(input_dir)?;
            warn!(
                "📁 Created input directory {:?}. Add .json or .csv documents to it and run again.",
                input_dir
            );
            return Ok(summary);
        }

        let documents = FileManager::find_documents(input_dir)?;
        if documents.is_empty() {
            warn!("No documents found in {:?}", input_dir);
            return Ok(summary);
        }

        FileManager::ensure_dir(output_dir)?;
        info!(
            "🚀 SheetwAI: {} - {} ({} document(s))",
            self.pipeline.direction(),
            self.config.translation.model,
            documents.len()
        );

        let multi_progress = if self.show_progress {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };
        let folder_pb = multi_progress.add(ProgressBar::new(documents.len() as u64));
        folder_pb.set_style(Self::bar_style("files"));

        for input_file in &documents {
            let file_name = input_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.process_file(input_file, output_dir, &multi_progress).await {
                Ok(report) => {
                    if report.is_saved() {
                        info!("✅ {}", report);
                    }
                    summary.record_document(report);
                }
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.record_failure(&file_name, format!("{:#}", e));
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        summary.duration = start_time.elapsed();
        Self::log_summary(&summary);

        Ok(summary)
    }

    /// Open, translate and save one document
    ///
    /// Failing to open is an error. Failing to save still returns the report,
    /// with `save_error` set.
    pub async fn process_file(
        &mut self,
        input_file: &Path,
        output_dir: &Path,
        multi_progress: &MultiProgress,
    ) -> Result<DocumentReport> {
        info!("🔄 Processing file: {}", input_file.display());
        let mut document = open_document(input_file)
            .with_context(|| format!("Failed to open document: {:?}", input_file))?;

        let total_batches = self.pipeline.planned_batches(document.as_ref());
        let progress_bar = multi_progress.add(ProgressBar::new(total_batches as u64));
        progress_bar.set_style(Self::bar_style("batches"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let on_batch = move |progress: BatchProgress| {
            pb.set_position(progress.completed as u64);
        };

        let mut report = self
            .pipeline
            .process_document(document.as_mut(), Some(&on_batch))
            .await;
        progress_bar.finish_and_clear();

        let output_path = Self::output_path(input_file, output_dir);
        match document.save(&output_path) {
            Ok(()) => info!("💾 Saved: {}", output_path.display()),
            Err(e) => {
                let reason = format!("Failed to save translated document {:?}: {}", output_path, e);
                error!("❌ {} ({})", reason, report);
                report.save_error = Some(reason);
            }
        }

        Ok(report)
    }

    // @returns: Where the translated copy of `input_file` goes
    pub fn output_path(input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::output_path_for(input_file, output_dir)
    }

    fn bar_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
                unit
            ))
            .or_else(|_| {
                ProgressStyle::default_bar()
                    .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            })
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    fn log_summary(summary: &RunSummary) {
        info!(
            "📊 Run complete: {} document(s) translated, {} failed",
            summary.saved_documents(),
            summary.failed_documents.len()
        );
        for (name, reason) in &summary.failed_documents {
            error!("   {}: {}", name, reason);
        }
        info!(
            "   Fragments: {} translated, {} skipped, {} failed, {} retries",
            summary.translated(),
            summary.skipped(),
            summary.failed(),
            summary.retries()
        );
        info!("   Elapsed: {}", Self::format_duration(summary.duration));
    }

    // Format duration in a human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
