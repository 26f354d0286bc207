//! Benchmarks for the detection pipeline.
//!
//! Run with: cargo bench
//! Run with parallel scoring: cargo bench --features rayon
//!
//! The file-based benchmark requires fixtures from
//! `tests/fixtures/generate_fixtures.sh`.

use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use image::{Rgb, RgbImage};
use shotcut::{
    DetectorOptions, FfmpegLogLevel, Shot, ShotDetector, VideoFile, extract_features,
    merge_short_shots, score_sequence,
};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";

fn synthetic_frames(count: usize, width: u32, height: u32) -> Vec<RgbImage> {
    (0..count)
        .map(|index| {
            let shade = ((index / 25) * 37 % 256) as u8;
            RgbImage::from_fn(width, height, |x, y| {
                Rgb([shade, (x % 256) as u8, ((y + index as u32) % 256) as u8])
            })
        })
        .collect()
}

fn benchmark_feature_extraction(criterion: &mut Criterion) {
    let frame = synthetic_frames(1, 640, 360).remove(0);

    criterion.bench_function("histogram features (640x360, 64 bins)", |bencher| {
        bencher.iter(|| extract_features(&frame, 64, 0).unwrap());
    });
}

fn benchmark_scoring(criterion: &mut Criterion) {
    let features: Vec<_> = synthetic_frames(500, 64, 36)
        .iter()
        .enumerate()
        .map(|(index, frame)| extract_features(frame, 64, index).unwrap())
        .collect();

    criterion.bench_function("score 500 frames", |bencher| {
        bencher.iter(|| score_sequence(&features).unwrap());
    });
}

fn benchmark_merging(criterion: &mut Criterion) {
    // Worst case: every shot is too short and collapses one by one.
    let shots: Vec<Shot> = (0..2_000).map(|i| Shot::new(i * 2, i * 2 + 2)).collect();

    criterion.bench_function("merge 2000 two-frame shots", |bencher| {
        bencher.iter(|| merge_short_shots(&shots, 10));
    });
}

fn benchmark_in_memory_detection(criterion: &mut Criterion) {
    let frames = synthetic_frames(300, 160, 90);
    let detector = ShotDetector::new(DetectorOptions::new());

    criterion.bench_function("detect 300 in-memory frames", |bencher| {
        bencher.iter(|| detector.detect_frames(frames.clone()).unwrap());
    });
}

fn benchmark_file_detection(criterion: &mut Criterion) {
    shotcut::set_ffmpeg_log_level(FfmpegLogLevel::Error);

    if !Path::new(SAMPLE_VIDEO).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    let detector = ShotDetector::new(DetectorOptions::new());
    criterion.bench_function("detect shots in sample video", |bencher| {
        bencher.iter(|| {
            let mut video = VideoFile::open(SAMPLE_VIDEO).unwrap();
            detector.detect(&mut video).unwrap()
        });
    });
}

criterion_group!(
    benches,
    benchmark_feature_extraction,
    benchmark_scoring,
    benchmark_merging,
    benchmark_in_memory_detection,
    benchmark_file_detection
);
criterion_main!(benches);
