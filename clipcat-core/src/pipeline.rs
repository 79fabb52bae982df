//! Concatenation pipeline orchestration.
//!
//! This module implements the two-phase run over a sequence snapshot:
//! every clip is stream-copied into a transport-stream intermediate inside
//! a fresh workspace, then a single concat pass writes the final output.
//! Phases run strictly sequentially with one external process in flight at
//! a time; progress crosses to the owning thread only through an mpsc
//! channel. The workspace is removed on every exit path.
//!
//! State machine: Idle -> Transcoding -> Concatenating -> Done, with
//! Failed reachable from both working states. An empty snapshot goes
//! straight from Idle to Done without ever creating a workspace.

use crate::concat;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, SidecarSpawner};
use crate::progress::ProgressEvent;
use crate::sequence::ClipEntry;
use crate::transcode;
use crate::workspace::Workspace;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

/// Share of the progress range allocated to the transcode phase; the
/// remainder belongs to concatenation.
pub const DEFAULT_TRANSCODE_SPAN: u8 = 80;

/// Options for a concatenation run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory the per-run workspace is created under.
    pub workspace_base: PathBuf,

    /// Directory the timestamped output file is written to.
    pub output_dir: PathBuf,

    /// Percent of total progress spanned by transcoding, `1..=99`.
    pub transcode_span: u8,
}

impl PipelineOptions {
    #[must_use]
    pub fn new(workspace_base: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            workspace_base,
            output_dir,
            transcode_span: DEFAULT_TRANSCODE_SPAN,
        }
    }
}

/// Orchestrates one pipeline run.
///
/// `spawn` consumes the pipeline, so a value can only ever drive a single
/// run; starting another run means building another pipeline. Nothing
/// guards two pipelines pointed at the same workspace base — callers own
/// that exclusivity.
pub struct ConcatenationPipeline<S: FfmpegSpawner = SidecarSpawner> {
    spawner: S,
    options: PipelineOptions,
}

impl ConcatenationPipeline<SidecarSpawner> {
    /// Creates a pipeline backed by the real ffmpeg binary.
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self::with_spawner(SidecarSpawner, options)
    }
}

impl<S: FfmpegSpawner> ConcatenationPipeline<S> {
    #[must_use]
    pub fn with_spawner(spawner: S, options: PipelineOptions) -> Self {
        Self { spawner, options }
    }

    /// Runs the whole pipeline on the calling thread, emitting progress
    /// into `progress`. Returns the output path, or `None` for an empty
    /// snapshot.
    pub fn run(
        &self,
        snapshot: &[ClipEntry],
        progress: &Sender<ProgressEvent>,
    ) -> CoreResult<Option<PathBuf>> {
        if snapshot.is_empty() {
            log::info!("Nothing to do: empty clip sequence");
            emit(progress, ProgressEvent::done_empty());
            return Ok(None);
        }

        let workspace = match Workspace::create(&self.options.workspace_base) {
            Ok(workspace) => workspace,
            Err(e) => {
                emit(progress, ProgressEvent::failed(0, e.to_string()));
                return Err(e);
            }
        };

        let mut last_percent = 0u8;
        let outcome = self.execute(&workspace, snapshot, progress, &mut last_percent);

        match outcome {
            Ok(output) => {
                workspace.destroy()?;
                emit(progress, ProgressEvent::done(&output));
                log::info!("Concatenation complete: {}", output.display());
                Ok(Some(output))
            }
            Err(e) => {
                if let Err(cleanup) = workspace.destroy() {
                    log::warn!("Failed to clean up workspace: {}", cleanup);
                }
                emit(progress, ProgressEvent::failed(last_percent, e.to_string()));
                Err(e)
            }
        }
    }

    /// Transcoding and concatenation; everything that needs the workspace
    /// cleaned up behind it regardless of how it ends.
    fn execute(
        &self,
        workspace: &Workspace,
        snapshot: &[ClipEntry],
        progress: &Sender<ProgressEvent>,
        last_percent: &mut u8,
    ) -> CoreResult<PathBuf> {
        let total = snapshot.len();
        let span = usize::from(self.options.transcode_span);

        for (index, clip) in snapshot.iter().enumerate() {
            let percent = (index * span / total) as u8;
            *last_percent = percent;
            emit(
                progress,
                ProgressEvent::clip_started(index, percent, &clip.display_name),
            );
            transcode::remux_clip(&self.spawner, clip, &workspace.intermediate_path(index))?;
        }

        *last_percent = self.options.transcode_span;
        emit(
            progress,
            ProgressEvent::concatenating(self.options.transcode_span),
        );

        // Output name is stamped at concat-phase start.
        let output_path = concat::timestamped_output_path(&self.options.output_dir);
        let intermediates: Vec<PathBuf> = (0..total)
            .map(|index| workspace.intermediate_path(index))
            .collect();
        concat::concat_clips(&self.spawner, &intermediates, &output_path)?;

        Ok(output_path)
    }

    /// Moves the run onto a dedicated background thread and hands back the
    /// progress receiver plus a join handle for the result.
    pub fn spawn(self, snapshot: Vec<ClipEntry>) -> PipelineHandle
    where
        S: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let thread = std::thread::spawn(move || self.run(&snapshot, &tx));
        PipelineHandle { events: rx, thread }
    }
}

/// A running (or finished) background pipeline.
pub struct PipelineHandle {
    events: Receiver<ProgressEvent>,
    thread: JoinHandle<CoreResult<Option<PathBuf>>>,
}

impl PipelineHandle {
    /// Progress events in emission order; the channel closes when the run
    /// ends.
    #[must_use]
    pub fn events(&self) -> &Receiver<ProgressEvent> {
        &self.events
    }

    /// Waits for the run to finish and returns its result.
    pub fn join(self) -> CoreResult<Option<PathBuf>> {
        self.thread
            .join()
            .map_err(|_| CoreError::Other("pipeline thread panicked".to_string()))?
    }
}

/// Progress delivery must never stall the run; a consumer that went away
/// just stops receiving.
fn emit(progress: &Sender<ProgressEvent>, event: ProgressEvent) {
    let _ = progress.send(event);
}
