//! The single concat pass over the intermediate files.
//!
//! Uses ffmpeg's concat protocol: the intermediates are joined with `|`
//! into one input URL and stream-copied into the final container, so the
//! encoded streams are concatenated without re-encoding. Order of the
//! input paths is the clip order; the caller guarantees every intermediate
//! exists before this step starts.

use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegProcess, FfmpegSpawner};
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::{Path, PathBuf};

/// Container extension of the final output file.
const OUTPUT_EXT: &str = "mp4";

/// Builds the `concat:` protocol input URL for the given intermediates.
fn concat_input(intermediates: &[PathBuf]) -> String {
    let joined = intermediates
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("|");
    format!("concat:{joined}")
}

/// Returns `{output_dir}/{YYYYMMDDhhmmss}.mp4` for the current local time.
///
/// Second resolution is enough to keep repeated runs from colliding, so no
/// existence check is made.
#[must_use]
pub fn timestamped_output_path(output_dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    output_dir.join(format!("{stamp}.{OUTPUT_EXT}"))
}

/// Concatenates the intermediates, in order, into `output_path`.
pub fn concat_clips<S: FfmpegSpawner>(
    spawner: &S,
    intermediates: &[PathBuf],
    output_path: &Path,
) -> CoreResult<()> {
    let input = concat_input(intermediates);
    log::info!(
        "Concatenating {} intermediate(s) -> {}",
        intermediates.len(),
        output_path.display()
    );
    log::debug!("Concat input: {}", input);

    let mut cmd = FfmpegCommand::new();
    cmd.input(&input);
    cmd.args(["-c", "copy"]);
    cmd.overwrite();
    cmd.output(output_path.to_string_lossy().as_ref());

    let status = spawner.spawn(cmd)?.wait()?;
    if !status.success() {
        log::error!("Concatenation failed: {}", status);
        return Err(CoreError::Concat { status });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockSpawner;

    #[test]
    fn concat_input_joins_paths_with_pipes_in_order() {
        let paths = vec![
            PathBuf::from("/ws/intermediate0.ts"),
            PathBuf::from("/ws/intermediate1.ts"),
            PathBuf::from("/ws/intermediate2.ts"),
        ];
        assert_eq!(
            concat_input(&paths),
            "concat:/ws/intermediate0.ts|/ws/intermediate1.ts|/ws/intermediate2.ts"
        );
    }

    #[test]
    fn concat_input_for_single_clip_has_no_separator() {
        let paths = vec![PathBuf::from("/ws/intermediate0.ts")];
        assert_eq!(concat_input(&paths), "concat:/ws/intermediate0.ts");
    }

    #[test]
    fn timestamped_output_path_lands_in_output_dir_as_mp4() {
        let path = timestamped_output_path(Path::new("/out"));
        assert_eq!(path.parent().unwrap(), Path::new("/out"));
        let name = path.file_name().unwrap().to_str().unwrap();
        let stem = name.strip_suffix(".mp4").expect("mp4 extension");
        assert_eq!(stem.len(), 14, "YYYYMMDDhhmmss");
        assert!(stem.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn concat_stream_copies_into_the_output() {
        let spawner = MockSpawner::new();
        spawner.expect_success("concat:");

        let paths = vec![
            PathBuf::from("/ws/intermediate0.ts"),
            PathBuf::from("/ws/intermediate1.ts"),
        ];
        concat_clips(&spawner, &paths, Path::new("/out/20240101000000.mp4")).unwrap();

        let calls = spawner.received_calls();
        assert_eq!(calls.len(), 1);
        let args = &calls[0];
        assert!(
            args.contains(&"concat:/ws/intermediate0.ts|/ws/intermediate1.ts".to_string())
        );
        let copy_at = args.iter().position(|a| a == "-c").unwrap();
        assert_eq!(args[copy_at + 1], "copy");
        assert!(args.contains(&"/out/20240101000000.mp4".to_string()));
    }

    #[test]
    fn non_zero_exit_maps_to_concat_error() {
        let spawner = MockSpawner::new();
        spawner.expect_exit_error("concat:", 1);

        let paths = vec![PathBuf::from("/ws/intermediate0.ts")];
        let err = concat_clips(&spawner, &paths, Path::new("/out/x.mp4")).unwrap_err();
        assert!(matches!(err, CoreError::Concat { .. }));
    }
}
