//! Key-frame export integration tests.

use std::fs;

use image::{ImageFormat, Rgb, RgbImage};
use shotcut::{
    DetectorOptions, ImageDirectorySink, Shot, ShotDetector, ShotcutError, export_key_frames,
};

fn two_shot_video() -> Vec<RgbImage> {
    let mut frames = vec![RgbImage::from_pixel(8, 8, Rgb([240, 10, 10])); 15];
    frames.extend(vec![RgbImage::from_pixel(8, 8, Rgb([10, 10, 240])); 15]);
    frames
}

#[test]
fn writes_one_jpeg_per_shot() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output_dir = temporary_directory.path().join("keyframes");

    let detector = ShotDetector::new(
        DetectorOptions::new()
            .with_min_duration(5)
            .with_output_dir(&output_dir),
    );
    let detection = detector.detect_frames(two_shot_video()).expect("detection failed");
    let report = detector
        .export(&detection)
        .expect("export failed")
        .expect("export was configured");

    assert!(report.is_complete());
    assert_eq!(report.exported(), &[0, 15]);

    let mut names: Vec<String> = fs::read_dir(&output_dir)
        .expect("Failed to list output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["frame-0.jpg", "frame-15.jpg"]);

    let key_frame = image::open(output_dir.join("frame-15.jpg"))
        .expect("Failed to read key frame")
        .to_rgb8();
    assert_eq!(key_frame.dimensions(), (8, 8));
    // JPEG is lossy; blue must still dominate.
    let pixel = key_frame.get_pixel(4, 4);
    assert!(pixel[2] > 200 && pixel[0] < 60);
}

#[test]
fn png_sink_uses_png_extension() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let detector = ShotDetector::new(
        DetectorOptions::new()
            .with_min_duration(5)
            .with_output_dir(temporary_directory.path())
            .with_image_format(ImageFormat::Png),
    );
    let detection = detector.detect_frames(two_shot_video()).expect("detection failed");
    detector.export(&detection).expect("export failed");

    let key_frame = image::open(temporary_directory.path().join("frame-0.png"))
        .expect("Failed to read key frame")
        .to_rgb8();
    assert_eq!(key_frame.get_pixel(0, 0), &Rgb([240, 10, 10]));
}

#[test]
fn failed_write_is_reported_and_others_continue() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    // A directory squatting on the first key frame's file name.
    fs::create_dir(temporary_directory.path().join("frame-0.png"))
        .expect("Failed to create blocker");

    let mut sink = ImageDirectorySink::new(temporary_directory.path(), ImageFormat::Png)
        .expect("Failed to create sink");
    let shots = [Shot::new(0, 15), Shot::new(15, 30)];
    let report = export_key_frames(&shots, &two_shot_video(), &mut sink);

    assert_eq!(report.exported(), &[15]);
    assert_eq!(report.failures().len(), 1);
    assert!(matches!(
        report.failures()[0],
        ShotcutError::ExportFailed { frame_index: 0, .. }
    ));
    assert!(
        report.failures()[0]
            .to_string()
            .contains("Failed to export key frame 0")
    );
    assert!(temporary_directory.path().join("frame-15.png").is_file());
    assert_eq!(sink.written().len(), 1);
}

#[test]
fn detection_alone_writes_nothing() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output_dir = temporary_directory.path().join("never-created");

    let detector = ShotDetector::new(
        DetectorOptions::new()
            .with_min_duration(5)
            .with_output_dir(&output_dir),
    );
    detector.detect_frames(two_shot_video()).expect("detection failed");

    assert!(!output_dir.exists());
}
