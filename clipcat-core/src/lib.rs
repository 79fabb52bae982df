//! Core library for lossless video clip concatenation using ffmpeg.
//!
//! This crate provides the ordered clip sequence, the per-run workspace,
//! and the two-phase concatenation pipeline: each clip is stream-copied
//! into a transport-stream intermediate, then a single concat pass joins
//! the intermediates into a timestamped output file. No video data is ever
//! re-encoded.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use clipcat_core::{AppConfig, ClipSequence, ConcatenationPipeline, PipelineOptions};
//! use std::path::Path;
//!
//! let config = AppConfig::load(Path::new(".clipcat")).unwrap();
//!
//! let mut sequence = ClipSequence::new();
//! sequence.accept_paths(vec!["intro.mp4".into(), "main.mkv".into()]);
//!
//! let options = PipelineOptions::new(
//!     config.workspace_base().to_path_buf(),
//!     config.output_dir().to_path_buf(),
//! );
//! let handle = ConcatenationPipeline::new(options).spawn(sequence.snapshot());
//! for event in handle.events() {
//!     println!("{:>3}% {}", event.percent, event.message);
//! }
//! let output = handle.join().unwrap();
//! ```

pub mod concat;
pub mod config;
pub mod error;
pub mod external;
pub mod pipeline;
pub mod progress;
pub mod sequence;
pub mod thumbnail;
pub mod transcode;
pub mod utils;
pub mod workspace;

// Re-exports for public API
pub use config::AppConfig;
pub use error::{CoreError, CoreResult};
pub use external::check_dependency;
pub use pipeline::{ConcatenationPipeline, PipelineHandle, PipelineOptions};
pub use progress::{PipelinePhase, ProgressEvent};
pub use sequence::{ClipEntry, ClipSequence, is_supported_video};
pub use thumbnail::Thumbnail;
pub use utils::{format_bytes, format_duration};
pub use workspace::Workspace;
