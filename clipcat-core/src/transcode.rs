//! Per-clip stream-copy remux into the intermediate container.
//!
//! One invocation per clip: `ffmpeg -i <clip> -c copy <workspace>/intermediateN.ts`.
//! No re-encoding happens here; codec data is preserved bit for bit. No
//! compatibility check is performed either — a source that cannot be
//! remuxed into a transport stream surfaces as the external tool's
//! non-zero exit.

use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegProcess, FfmpegSpawner};
use crate::sequence::ClipEntry;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;

/// Remuxes `clip` into a transport-stream intermediate at `output_path`.
///
/// Fatal for the whole run on failure: the caller must not proceed to
/// concatenation after a `CoreError::Transcode`.
pub fn remux_clip<S: FfmpegSpawner>(
    spawner: &S,
    clip: &ClipEntry,
    output_path: &Path,
) -> CoreResult<()> {
    log::info!(
        "Remuxing {} -> {}",
        clip.path.display(),
        output_path.display()
    );

    let mut cmd = FfmpegCommand::new();
    cmd.input(clip.path.to_string_lossy().as_ref());
    cmd.args(["-c", "copy"]);
    cmd.overwrite();
    cmd.output(output_path.to_string_lossy().as_ref());

    let status = spawner.spawn(cmd)?.wait()?;
    if !status.success() {
        log::error!("Remux failed for {}: {}", clip.path.display(), status);
        return Err(CoreError::Transcode {
            clip: clip.path.clone(),
            status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockSpawner;
    use std::path::PathBuf;

    fn clip(path: &str) -> ClipEntry {
        ClipEntry::from_path_unchecked(PathBuf::from(path))
    }

    #[test]
    fn remux_invokes_stream_copy_into_output() {
        let spawner = MockSpawner::new();
        spawner.expect_success("a.mp4");

        remux_clip(&spawner, &clip("/in/a.mp4"), Path::new("/ws/intermediate0.ts")).unwrap();

        let calls = spawner.received_calls();
        assert_eq!(calls.len(), 1);
        let args = &calls[0];
        let copy_at = args.iter().position(|a| a == "-c").unwrap();
        assert_eq!(args[copy_at + 1], "copy");
        assert!(args.contains(&"/in/a.mp4".to_string()));
        assert!(args.contains(&"/ws/intermediate0.ts".to_string()));
    }

    #[test]
    fn non_zero_exit_maps_to_transcode_error_naming_the_clip() {
        let spawner = MockSpawner::new();
        spawner.expect_exit_error("bad.mkv", 1);

        let err = remux_clip(&spawner, &clip("/in/bad.mkv"), Path::new("/ws/intermediate0.ts"))
            .unwrap_err();

        match err {
            CoreError::Transcode { clip, status } => {
                assert_eq!(clip, PathBuf::from("/in/bad.mkv"));
                assert!(!status.success());
            }
            other => panic!("expected Transcode error, got {other:?}"),
        }
    }
}
