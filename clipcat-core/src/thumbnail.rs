//! First-frame extraction for clip list display.
//!
//! Decodes a single representative frame to an RGB24 pixel buffer by
//! piping rawvideo out of ffmpeg. Display-only: the pipeline never
//! consults this, and an unreadable file is `None`, not an error.

use crate::error::CoreResult;
use crate::external::{FfmpegProcess, FfmpegSpawner};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::path::Path;

/// A decoded frame, tightly packed RGB24.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Decodes the first readable frame of `path`.
///
/// Returns `Ok(None)` when the file cannot be opened or decoded; only
/// infrastructure problems (the process failing to spawn or be waited on)
/// are errors.
pub fn first_frame<S: FfmpegSpawner>(spawner: &S, path: &Path) -> CoreResult<Option<Thumbnail>> {
    log::debug!("Extracting thumbnail frame from {}", path.display());

    let mut cmd = FfmpegCommand::new();
    cmd.input(path.to_string_lossy().as_ref());
    cmd.args(["-frames:v", "1", "-f", "rawvideo", "-pix_fmt", "rgb24"]);
    cmd.output("-");

    let mut process = spawner.spawn(cmd)?;
    let mut frame: Option<Thumbnail> = None;
    process.handle_events(|event| {
        if frame.is_none() {
            if let FfmpegEvent::OutputFrame(f) = event {
                frame = Some(Thumbnail {
                    width: f.width,
                    height: f.height,
                    data: f.data,
                });
            }
        }
        Ok(())
    })?;
    let status = process.wait()?;

    if frame.is_none() {
        // Covers both decode failures and zero-frame inputs.
        log::warn!(
            "No decodable frame in {} (ffmpeg {})",
            path.display(),
            status
        );
    }
    Ok(frame)
}
