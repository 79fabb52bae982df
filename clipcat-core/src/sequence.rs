//! The ordered clip sequence and its drag-in boundary.
//!
//! This module holds the mutable model the UI layer edits: an ordered list
//! of clip entries whose order is the intended concatenation order. The
//! sequence performs no I/O; file-type validation happens once, at the
//! boundary where external paths are accepted.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Container extensions accepted at the drag-in boundary (case-insensitive).
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Checks if the given path is a video file the sequence will accept.
#[must_use]
pub fn is_supported_video(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext_str| {
                VIDEO_EXTENSIONS
                    .iter()
                    .any(|known| ext_str.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
}

/// One source video in the sequence.
///
/// `display_name` is the final path segment, used for progress labels and
/// list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipEntry {
    pub path: PathBuf,
    pub display_name: String,
}

impl ClipEntry {
    /// Accepts a dropped path, returning `None` for anything that is not a
    /// recognized video file. This is the only place file types are checked.
    #[must_use]
    pub fn accept(path: PathBuf) -> Option<Self> {
        if is_supported_video(&path) {
            Some(Self::from_path_unchecked(path))
        } else {
            None
        }
    }

    /// Builds an entry without touching the filesystem. The owning layer
    /// uses this when the path has already passed the drag-in filter.
    #[must_use]
    pub fn from_path_unchecked(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, display_name }
    }
}

/// Ordered, mutable collection of clip entries. Insertion order is the
/// concatenation order; indices are dense (`0..len`).
#[derive(Debug, Clone, Default)]
pub struct ClipSequence {
    entries: Vec<ClipEntry>,
}

impl ClipSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[ClipEntry] {
        &self.entries
    }

    /// Adds an entry at the end.
    pub fn append(&mut self, entry: ClipEntry) {
        self.entries.push(entry);
    }

    /// Accepts a batch of dropped paths in drop order, appending the ones
    /// that pass the video-file filter. Rejected paths are logged and
    /// skipped. Returns how many entries were appended.
    pub fn accept_paths<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut accepted = 0;
        for path in paths {
            match ClipEntry::accept(path.clone()) {
                Some(entry) => {
                    log::debug!("Accepted clip: {}", entry.path.display());
                    self.entries.push(entry);
                    accepted += 1;
                }
                None => {
                    log::warn!("Ignoring unsupported file: {}", path.display());
                }
            }
        }
        accepted
    }

    /// Relocates the entry at `from` so it ends up at index `to` of the
    /// resulting list. A single-element move, not a swap; `from == to` is a
    /// no-op. Both indices must be inside `0..len`.
    pub fn move_to(&mut self, from: usize, to: usize) -> CoreResult<()> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(CoreError::IndexOutOfRange { index, len });
            }
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        Ok(())
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an owned, ordered copy for hand-off to a pipeline run.
    /// Later mutations of the sequence cannot affect the copy.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ClipEntry> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn entry(name: &str) -> ClipEntry {
        ClipEntry::from_path_unchecked(PathBuf::from(format!("/videos/{name}")))
    }

    fn names(seq: &ClipSequence) -> Vec<String> {
        seq.entries()
            .iter()
            .map(|e| e.display_name.clone())
            .collect()
    }

    #[test]
    fn append_preserves_order_and_snapshot_copies() {
        let mut seq = ClipSequence::new();
        seq.append(entry("a.mp4"));
        seq.append(entry("b.mp4"));

        let snapshot = seq.snapshot();
        seq.append(entry("c.mp4"));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(seq.len(), 3);
        assert_eq!(snapshot[0].display_name, "a.mp4");
        assert_eq!(snapshot[1].display_name, "b.mp4");
    }

    #[test]
    fn move_to_same_index_is_a_noop() {
        let mut seq = ClipSequence::new();
        seq.append(entry("a.mp4"));
        seq.append(entry("b.mp4"));
        let before = seq.snapshot();

        seq.move_to(1, 1).unwrap();

        assert_eq!(seq.snapshot(), before);
    }

    #[test]
    fn move_first_to_last_preserves_relative_order() {
        let mut seq = ClipSequence::new();
        for name in ["a.mp4", "b.mp4", "c.mp4", "d.mp4"] {
            seq.append(entry(name));
        }

        seq.move_to(0, 3).unwrap();

        assert_eq!(names(&seq), ["b.mp4", "c.mp4", "d.mp4", "a.mp4"]);
    }

    #[test]
    fn move_backwards_relocates_single_entry() {
        let mut seq = ClipSequence::new();
        for name in ["a.mp4", "b.mp4", "c.mp4"] {
            seq.append(entry(name));
        }

        seq.move_to(2, 0).unwrap();

        assert_eq!(names(&seq), ["c.mp4", "a.mp4", "b.mp4"]);
    }

    #[test]
    fn move_to_rejects_out_of_range_indices() {
        let mut seq = ClipSequence::new();
        seq.append(entry("a.mp4"));
        seq.append(entry("b.mp4"));
        let before = seq.snapshot();

        for (from, to) in [(2, 0), (0, 2), (5, 7)] {
            let err = seq.move_to(from, to).unwrap_err();
            assert!(matches!(err, CoreError::IndexOutOfRange { .. }));
            assert_eq!(seq.snapshot(), before, "sequence must stay unmodified");
        }
    }

    #[test]
    fn move_to_on_empty_sequence_fails() {
        let mut seq = ClipSequence::new();
        assert!(matches!(
            seq.move_to(0, 0),
            Err(CoreError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn clear_removes_everything() {
        let mut seq = ClipSequence::new();
        seq.append(entry("a.mp4"));
        seq.clear();
        assert!(seq.is_empty());
        assert!(seq.snapshot().is_empty());
    }

    #[test]
    fn accept_paths_filters_by_extension_case_insensitively() {
        let dir = tempdir().unwrap();
        let make = |name: &str| {
            let path = dir.path().join(name);
            File::create(&path).unwrap();
            path
        };

        let dropped = vec![
            make("one.mp4"),
            make("two.MKV"),
            make("notes.txt"),
            make("three.Mov"),
            make("four.avi"),
            dir.path().join("missing.mp4"), // never created
        ];

        let mut seq = ClipSequence::new();
        let accepted = seq.accept_paths(dropped);

        assert_eq!(accepted, 4);
        assert_eq!(names(&seq), ["one.mp4", "two.MKV", "three.Mov", "four.avi"]);
    }

    #[test]
    fn accept_paths_skips_directories() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("folder.mp4");
        std::fs::create_dir(&sub).unwrap();

        let mut seq = ClipSequence::new();
        assert_eq!(seq.accept_paths(vec![sub]), 0);
        assert!(seq.is_empty());
    }

    #[test]
    fn display_name_is_final_path_segment() {
        let entry = ClipEntry::from_path_unchecked(PathBuf::from("/some/deep/dir/clip one.mov"));
        assert_eq!(entry.display_name, "clip one.mov");
    }
}
