use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use detect_common::classes::ClassLabels;
use detect_common::draw;
use detect_common::frame_meta::FrameMeta;
use detect_common::frame_times::FrameTimes;
use ort_detect::{preprocess, Detector};

/// Performs detection on a single image file.
pub fn process_image(path: &Path, mut detector: Detector, labels: &ClassLabels) -> anyhow::Result<()> {
    let mut frame_times = FrameTimes::default();

    let start = Instant::now();
    let og_image = image::open(path).with_context(|| format!("Error loading image file {path:?}"))?;
    let mut working = preprocess::resize_to_working(&og_image.to_rgb8())?;
    frame_times.acquire = start.elapsed();

    let detections = detector.detect(&working, &mut frame_times)?;

    let font = draw::load_font();
    let start = Instant::now();
    draw::draw_detections(&mut working, &detections, labels, font.as_ref());
    frame_times.annotate = start.elapsed();

    println!("Detections in {path:?}:");
    for det in &detections {
        println!("  {}", draw::label_text(det, labels));
    }

    // NB! For a single image, ort times are misleading, as the first run
    // does all kinds of lazy init.
    log::debug!("{frame_times:?}");

    // Save output: annotated image & detections.
    let img_output_path = path.with_extension("out.jpg");
    working
        .save(&img_output_path)
        .with_context(|| format!("failed to write {img_output_path:?}"))?;

    let meta_output_path = path.with_extension("out.json");
    let frame_meta = FrameMeta {
        frame_index: 0,
        pts: None,
        detections,
    };
    serde_json::to_writer(std::fs::File::create(&meta_output_path)?, &frame_meta)?;
    log::info!("Wrote {img_output_path:?} and {meta_output_path:?}");

    Ok(())
}
