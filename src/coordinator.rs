use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::capture::frame_source::FrameSource;
use crate::capture::still_source::StillSource;
use crate::capture::synthetic_source::SyntheticSource;
use crate::config::{Configuration, SourceConfig};
use crate::error::AppError;
use crate::journal::file_journal::FileJournal;
use crate::pipeline::domain::reducer::FrameReducer;
use crate::pipeline::orchestration::frame_context::FrameContext;
use crate::pipeline::orchestration::processing_pipeline::ProcessingPipeline;
use crate::pipeline::orchestration::step::journal_step::JournalStep;
use crate::pipeline::orchestration::step::snapshot_step::SnapshotStep;

/// Owns the capture loop: one cycle per interval, retry after a shorter
/// delay when a cycle fails. The first cycle runs immediately on startup.
pub struct Coordinator {
    cycle_task: tokio::task::JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl Coordinator {
    fn new(
        configuration: Configuration,
        source: Box<dyn FrameSource>,
        pipeline: ProcessingPipeline,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        Self {
            cycle_task: Self::start_cycle_task(configuration, source, pipeline, cancel_token.clone()),
            cancel_token,
        }
    }

    fn start_cycle_task(
        configuration: Configuration,
        mut source: Box<dyn FrameSource>,
        mut pipeline: ProcessingPipeline,
        cancel_token: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let interval = Duration::from_secs(configuration.interval_secs);
            let retry_delay = Duration::from_secs(configuration.retry_delay_secs);
            loop {
                let delay = match Self::run_cycle(source.as_mut(), &mut pipeline).await {
                    Ok(()) => interval,
                    Err(e) => {
                        tracing::error!("Cycle failed: {}", e);
                        tracing::info!("Retrying in {} seconds", retry_delay.as_secs());
                        retry_delay
                    }
                };
                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        })
    }

    async fn run_cycle(
        source: &mut dyn FrameSource,
        pipeline: &mut ProcessingPipeline,
    ) -> Result<(), AppError> {
        let frame = source.next_frame().await?;
        let context = pipeline.process(FrameContext::new(frame)).await?;
        if let Some(record) = context.snapshot() {
            let stats = &record.stats;
            tracing::info!(
                "Average color: {} ({})",
                stats.hex_color,
                stats.dominant_color
            );
            tracing::info!(
                "Mood: {}, Temperature: {}, Time: {}",
                stats.mood,
                stats.temperature_feel,
                stats.time_of_day_feel
            );
            tracing::info!(
                "Greyness: {}% - {}",
                stats.greyness.berlin_grey_index,
                stats.greyness.description
            );
        }
        Ok(())
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
        self.cycle_task.abort();
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    source: Option<Box<dyn FrameSource>>,
    pipeline: Option<ProcessingPipeline>,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            source: None,
            pipeline: None,
        }
    }

    // Sets the capture interval, this will override the configuration.
    pub fn interval_secs(mut self, interval_secs: u64) -> Self {
        self.configuration.interval_secs = interval_secs;
        self
    }

    // Sets the retry delay, this will override the configuration.
    pub fn retry_delay_secs(mut self, retry_delay_secs: u64) -> Self {
        self.configuration.retry_delay_secs = retry_delay_secs;
        self
    }

    // Replaces the frame source the configuration would pick.
    pub fn source(mut self, source: Box<dyn FrameSource>) -> Self {
        self.source = Some(source);
        self
    }

    // Replaces the default reduce-then-journal pipeline.
    pub fn pipeline(mut self, pipeline: ProcessingPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn build(self) -> Result<Coordinator, AppError> {
        let source = match self.source {
            Some(source) => source,
            None => Self::source_from_config(&self.configuration.source),
        };
        let pipeline = match self.pipeline {
            Some(pipeline) => pipeline,
            None => Self::default_pipeline(&self.configuration)?,
        };
        Ok(Coordinator::new(self.configuration, source, pipeline))
    }

    fn source_from_config(source: &SourceConfig) -> Box<dyn FrameSource> {
        match source {
            SourceConfig::Synthetic { width, height } => {
                Box::new(SyntheticSource::new(*width, *height))
            }
            SourceConfig::Still { path } => Box::new(StillSource::new(path.clone())),
        }
    }

    fn default_pipeline(configuration: &Configuration) -> Result<ProcessingPipeline, AppError> {
        let journal = FileJournal::new(&configuration.data_dir).map_err(AppError::Storage)?;
        Ok(ProcessingPipeline::new()
            .add_step(Box::new(SnapshotStep::new(FrameReducer::new(
                configuration.reducer_config(),
            ))))
            .add_step(Box::new(JournalStep::new(Box::new(journal)))))
    }
}
