// ============================================================================
// clipcat-cli/src/progress.rs
// ============================================================================
//
// PROGRESS RENDERING: terminal and JSON consumers of pipeline events
//
// The pipeline emits a finite, ordered sequence of progress events over a
// channel; this module drains that channel on the calling thread. Two
// renderings exist: an indicatif progress bar for humans, and one JSON
// object per line for machine consumers.

use clipcat_core::{PipelinePhase, ProgressEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc::Receiver;

/// Drains `events` until the pipeline closes the channel.
pub fn render(events: &Receiver<ProgressEvent>, json: bool) {
    if json {
        render_json(events);
    } else {
        render_bar(events);
    }
}

fn render_json(events: &Receiver<ProgressEvent>) {
    for event in events.iter() {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("Failed to serialize progress event: {}", e),
        }
    }
}

fn render_bar(events: &Receiver<ProgressEvent>) {
    let style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(100).with_style(style);

    for event in events.iter() {
        bar.set_position(u64::from(event.percent));
        match event.phase {
            PipelinePhase::Done => bar.finish_with_message(event.message.clone()),
            PipelinePhase::Failed => bar.abandon_with_message(event.message.clone()),
            _ => bar.set_message(event.message.clone()),
        }
    }
}
