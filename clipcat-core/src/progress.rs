//! Progress events emitted by a pipeline run.
//!
//! A run produces a finite, ordered sequence of these over an mpsc
//! channel; the consumer (CLI, UI) renders them however it likes. Events
//! carry the pipeline phase, an optional clip index, a percentage in
//! `0..=100` that never decreases within one run, and a human-readable
//! label. They serialize to JSON for machine consumers.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// States of the concatenation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    Idle,
    Transcoding,
    Concatenating,
    Done,
    Failed,
}

/// One progress update from a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub phase: PipelinePhase,
    /// Index of the clip being transcoded; `None` outside the transcode phase.
    pub clip_index: Option<usize>,
    /// Overall progress, `0..=100`.
    pub percent: u8,
    pub message: String,
    /// Final output file; set only on successful completion.
    pub output: Option<PathBuf>,
}

impl ProgressEvent {
    pub(crate) fn clip_started(index: usize, percent: u8, display_name: &str) -> Self {
        Self {
            phase: PipelinePhase::Transcoding,
            clip_index: Some(index),
            percent,
            message: format!("Converting {display_name}"),
            output: None,
        }
    }

    pub(crate) fn concatenating(percent: u8) -> Self {
        Self {
            phase: PipelinePhase::Concatenating,
            clip_index: None,
            percent,
            message: "Concatenating".to_string(),
            output: None,
        }
    }

    pub(crate) fn done(output: &Path) -> Self {
        Self {
            phase: PipelinePhase::Done,
            clip_index: None,
            percent: 100,
            message: format!("Wrote {}", output.display()),
            output: Some(output.to_path_buf()),
        }
    }

    pub(crate) fn done_empty() -> Self {
        Self {
            phase: PipelinePhase::Done,
            clip_index: None,
            percent: 100,
            message: "No clips to concatenate".to_string(),
            output: None,
        }
    }

    pub(crate) fn failed(percent: u8, message: String) -> Self {
        Self {
            phase: PipelinePhase::Failed,
            clip_index: None,
            percent,
            message,
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_phase() {
        let event = ProgressEvent::clip_started(1, 26, "b.mp4");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["phase"], "transcoding");
        assert_eq!(json["clip_index"], 1);
        assert_eq!(json["percent"], 26);
        assert_eq!(json["message"], "Converting b.mp4");
        assert!(json["output"].is_null());
    }

    #[test]
    fn done_event_carries_the_output_path() {
        let event = ProgressEvent::done(Path::new("/out/20240101123000.mp4"));
        assert_eq!(event.percent, 100);
        assert_eq!(event.output.as_deref(), Some(Path::new("/out/20240101123000.mp4")));
    }
}
