// clipcat-cli/src/main.rs
//
// Command-line interface for clipcat. Responsibilities:
// - Defining CLI argument structures (`Cli`, `Commands`, argument structs).
// - Setting up logging via env_logger (RUST_LOG, default "info").
// - Loading the explicit configuration object and handing it to the core.
// - Building the clip sequence from the given files (the CLI's argument
//   order plays the role of drop order).
// - Spawning the background concatenation pipeline and rendering its
//   progress events.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use clipcat_core::external::SidecarSpawner;
use clipcat_core::{
    AppConfig, ClipSequence, ConcatenationPipeline, PipelineOptions, Thumbnail, check_dependency,
    format_bytes, format_duration, thumbnail,
};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

mod config;
mod progress;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "clipcat: lossless video clip concatenation",
    long_about = "Joins video clips in order without re-encoding, using ffmpeg \
                  stream-copy remuxing and the concat protocol."
)]
struct Cli {
    /// Directory for saved settings and the transient workspace
    #[arg(long, value_name = "DIR", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Losslessly joins video clips in the given order
    Concat(ConcatArgs),
    /// Saves the default output directory for future runs
    SetOutputDir(SetOutputDirArgs),
    /// Writes the first frame of a clip as a PPM image
    Thumbnail(ThumbnailArgs),
}

#[derive(Parser, Debug)]
struct ConcatArgs {
    /// Video files to join, in order (mp4, avi, mov, mkv)
    #[arg(required = true, value_name = "FILES")]
    inputs: Vec<PathBuf>,

    /// Directory for the output file (overrides the saved choice)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Also persist --output-dir as the new default
    #[arg(long, requires = "output_dir")]
    save_output_dir: bool,

    /// Emit progress as JSON lines instead of a progress bar
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SetOutputDirArgs {
    /// Directory future outputs are written to
    #[arg(value_name = "DIR")]
    dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Video file to extract the first frame from
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Path of the PPM image to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

// --- Command Implementations ---

fn run_concat(config_dir: &Path, args: ConcatArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    check_dependency("ffmpeg")?;

    let mut config = AppConfig::load(config_dir)
        .with_context(|| format!("failed to load config from {}", config_dir.display()))?;
    if let Some(dir) = args.output_dir {
        config.set_output_dir(dir);
        if args.save_output_dir {
            config.persist()?;
        }
    }
    fs::create_dir_all(config.output_dir()).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir().display()
        )
    })?;

    let mut sequence = ClipSequence::new();
    let total = args.inputs.len();
    let accepted = sequence.accept_paths(args.inputs);
    if accepted < total {
        log::warn!("Skipped {} unsupported file(s)", total - accepted);
    }

    let options = PipelineOptions::new(
        config.workspace_base().to_path_buf(),
        config.output_dir().to_path_buf(),
    );
    let handle = ConcatenationPipeline::new(options).spawn(sequence.snapshot());
    progress::render(handle.events(), args.json);

    match handle.join()? {
        Some(output) => {
            let size = fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
            log::info!(
                "Wrote {} ({}) in {}",
                output.display(),
                format_bytes(size),
                format_duration(started.elapsed())
            );
            if !args.json {
                println!("{}", output.display());
            }
        }
        None => log::info!("No files to concatenate"),
    }
    Ok(())
}

fn run_set_output_dir(config_dir: &Path, args: SetOutputDirArgs) -> anyhow::Result<()> {
    if !args.dir.is_dir() {
        bail!("'{}' is not a directory", args.dir.display());
    }
    let mut config = AppConfig::load(config_dir)?;
    config.set_output_dir(args.dir);
    config.persist()?;
    log::info!("Output directory set to {}", config.output_dir().display());
    Ok(())
}

fn run_thumbnail(args: ThumbnailArgs) -> anyhow::Result<()> {
    check_dependency("ffmpeg")?;
    let frame = thumbnail::first_frame(&SidecarSpawner, &args.input)?;
    match frame {
        Some(frame) => {
            write_ppm(&args.output, &frame)
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            log::info!(
                "Wrote {}x{} thumbnail to {}",
                frame.width,
                frame.height,
                args.output.display()
            );
            Ok(())
        }
        None => bail!("could not decode a frame from {}", args.input.display()),
    }
}

fn write_ppm(path: &Path, frame: &Thumbnail) -> std::io::Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    write!(writer, "P6\n{} {}\n255\n", frame.width, frame.height)?;
    writer.write_all(&frame.data)?;
    writer.flush()
}

// --- Main Logic ---

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_dir = cli.config_dir.unwrap_or_else(config::default_config_dir);

    let result = match cli.command {
        Commands::Concat(args) => run_concat(&config_dir, args),
        Commands::SetOutputDir(args) => run_set_output_dir(&config_dir, args),
        Commands::Thumbnail(args) => run_thumbnail(args),
    };

    if let Err(e) = result {
        log::error!("{e:#}");
        process::exit(1);
    }
}
