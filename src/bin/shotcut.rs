use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use shotcut::{
    DEFAULT_HIST_SIZE, DEFAULT_MIN_DURATION, DEFAULT_THRESHOLD, DetectorOptions, ExportReport,
    FfmpegLogLevel, OperationType, ProgressCallback, ProgressInfo, Shot, ShotDetection,
    ShotDetector, VideoFile,
};

const CLI_AFTER_HELP: &str = "Examples:\n  shotcut input.mp4 keyframes\n  shotcut input.mp4 keyframes --min-duration 12 --threshold 1.2 --progress\n  shotcut input.mp4 keyframes --no-export --json\n  shotcut --completions zsh > _shotcut";

#[derive(Debug, Parser)]
#[command(
    name = "shotcut",
    version,
    about = "Detect shot boundaries in a video and export one key frame per shot",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    #[arg(required_unless_present = "completions")]
    video: Option<PathBuf>,

    /// Directory that receives one `frame-<index>` image per shot.
    #[arg(required_unless_present = "completions")]
    output_dir: Option<PathBuf>,

    /// Minimum shot duration, in frames.
    #[arg(long, default_value_t = DEFAULT_MIN_DURATION)]
    min_duration: usize,

    /// Absolute distance threshold for a cut (scores range over 0–6).
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Histogram bins per color channel (1–256).
    #[arg(long, default_value_t = DEFAULT_HIST_SIZE)]
    hist_size: usize,

    /// Key-frame image extension (jpg, png, bmp, tiff, webp).
    #[arg(long, default_value = "jpg")]
    format: String,

    /// Detect shots without writing key frames.
    #[arg(long)]
    no_export: bool,

    /// Print the result as machine-readable JSON.
    #[arg(long)]
    json: bool,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// Show run statistics on stderr.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL", exclusive = true)]
    completions: Option<Shell>,
}

fn parse_image_format(value: &str) -> Option<ImageFormat> {
    let format = ImageFormat::from_extension(value.trim_start_matches('.'))?;
    format.can_write().then_some(format)
}

fn format_shots(shots: &[Shot]) -> String {
    let items: Vec<String> = shots.iter().map(Shot::to_string).collect();
    format!("[{}]", items.join(", "))
}

struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        let label = match info.operation {
            OperationType::FeatureExtraction => "analysing frames",
            OperationType::KeyFrameExport => "writing key frames",
            _ => "working",
        };
        if let Some(total) = info.total {
            self.bar.set_length(total.max(info.current));
        }
        self.bar.set_position(info.current);
        self.bar.set_message(label);
    }
}

fn build_options(
    cli: &Cli,
    output_dir: &Path,
) -> Result<DetectorOptions, Box<dyn std::error::Error>> {
    let image_format =
        parse_image_format(&cli.format).ok_or(format!("unsupported --format: {}", cli.format))?;

    let mut options = DetectorOptions::new()
        .with_min_duration(cli.min_duration)
        .with_threshold(cli.threshold)
        .with_hist_size(cli.hist_size)
        .with_image_format(image_format);

    if !cli.no_export {
        options = options.with_output_dir(output_dir);
    }

    options.validate()?;
    Ok(options)
}

fn print_report(
    cli: &Cli,
    video: &VideoFile,
    detection: &ShotDetection,
    report: Option<&ExportReport>,
    output_dir: &Path,
) {
    if cli.json {
        let payload = json!({
            "video": video.path().display().to_string(),
            "frame_count": detection.frame_count(),
            "frames_per_second": video.metadata().frames_per_second,
            "cut_count": detection.cut_count(),
            "shots": detection.shots().iter().map(|shot| json!({
                "start": shot.start,
                "end": shot.end,
                "start_seconds": video.metadata().frame_timestamp(shot.start).map(|t| t.as_secs_f64()),
            })).collect::<Vec<_>>(),
            "exported": report.map(|report| report.exported().to_vec()),
            "export_failures": report.map(|report| {
                report.failures().iter().map(ToString::to_string).collect::<Vec<_>>()
            }),
        });
        println!("{payload}");
        return;
    }

    println!("{}", format_shots(detection.shots()));

    if let Some(report) = report {
        for failure in report.failures() {
            eprintln!("{} {}", "warning:".yellow().bold(), failure.to_string().yellow());
        }
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "key frames written to {} ({} of {})",
                output_dir.display(),
                report.exported().len(),
                detection.shots().len()
            )
            .green()
        );
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "shotcut", &mut std::io::stdout());
        return Ok(());
    }

    let (Some(video_path), Some(output_dir)) = (&cli.video, &cli.output_dir) else {
        return Err("usage: shotcut <video-path> <output-dir>".into());
    };

    if let Some(level) = &cli.log_level {
        shotcut::set_ffmpeg_log_level(level.parse::<FfmpegLogLevel>()?);
    }

    let mut options = build_options(&cli, output_dir)?;
    let progress = if cli.progress {
        let progress = Arc::new(BarProgress::new()?);
        options = options.with_progress(progress.clone());
        Some(progress)
    } else {
        None
    };

    let detector = ShotDetector::new(options);
    let mut video = VideoFile::open(video_path)?;
    let detection = detector.detect(&mut video)?;
    let report = detector.export(&detection)?;

    if let Some(progress) = progress {
        progress.bar.finish_and_clear();
    }

    if cli.verbose {
        let summary = detection.score_summary();
        let metadata = video.metadata();
        eprintln!(
            "{} {}x{} {} @ {:.3} fps, {} frames decoded",
            "video".cyan().bold(),
            metadata.width,
            metadata.height,
            metadata.codec,
            metadata.frames_per_second,
            detection.frame_count()
        );
        eprintln!(
            "{} max diff: {:.4} min diff: {:.4} mean: {:.4}",
            "scores".cyan().bold(),
            summary.max,
            summary.min,
            summary.mean
        );
        eprintln!(
            "{} {} cut(s) declared, {} shot(s) after merging",
            "shots".cyan().bold(),
            detection.cut_count(),
            detection.shots().len()
        );
    }

    print_report(&cli, &video, &detection, report.as_ref(), output_dir);
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
