//! DetectorOptions builder and validation tests.

use image::ImageFormat;
use shotcut::{DetectorOptions, ShotDetector, ShotcutError};

#[test]
fn options_defaults() {
    let options = DetectorOptions::new();
    assert_eq!(options.min_duration(), 10);
    assert_eq!(options.hist_size(), 64);
    assert_eq!(options.threshold(), 1.5);
    assert!(options.output_dir().is_none());
    assert_eq!(options.image_format(), ImageFormat::Jpeg);
    assert!(options.validate().is_ok());

    let debug = format!("{options:?}");
    assert!(debug.contains("DetectorOptions"));
    assert!(debug.contains("has_cancellation: false"));
    assert!(debug.contains("batch_size: 1"));
}

#[test]
fn builder_sets_values() {
    let options = DetectorOptions::new()
        .with_min_duration(24)
        .with_hist_size(32)
        .with_threshold(0.8)
        .with_output_dir("frames")
        .with_image_format(ImageFormat::Png);

    assert_eq!(options.min_duration(), 24);
    assert_eq!(options.hist_size(), 32);
    assert_eq!(options.threshold(), 0.8);
    assert_eq!(options.output_dir().unwrap().to_str(), Some("frames"));
    assert_eq!(options.image_format(), ImageFormat::Png);
}

#[test]
fn batch_size_clamps_zero() {
    let debug = format!("{:?}", DetectorOptions::new().with_batch_size(0));
    assert!(debug.contains("batch_size: 1"));
}

#[test]
fn validation_rejects_out_of_range_values() {
    let invalid = [
        DetectorOptions::new().with_min_duration(0),
        DetectorOptions::new().with_hist_size(0),
        DetectorOptions::new().with_hist_size(257),
        DetectorOptions::new().with_threshold(-1.0),
        DetectorOptions::new().with_threshold(f64::NAN),
        DetectorOptions::new().with_threshold(f64::INFINITY),
    ];

    for options in invalid {
        let error = options.validate().unwrap_err();
        assert!(matches!(error, ShotcutError::InvalidConfiguration(_)));
        assert!(error.to_string().starts_with("Invalid configuration"));
    }
}

#[test]
fn hist_size_bounds_are_inclusive() {
    assert!(DetectorOptions::new().with_hist_size(1).validate().is_ok());
    assert!(DetectorOptions::new().with_hist_size(256).validate().is_ok());
}

#[test]
fn detector_exposes_its_options() {
    let detector = ShotDetector::new(DetectorOptions::new().with_min_duration(3));
    assert_eq!(detector.options().min_duration(), 3);
    assert_eq!(ShotDetector::default().options().min_duration(), 10);
}
