mod process_image;
mod process_video;

use std::path::PathBuf;

use clap::Parser;
use detect_common::classes::ClassLabels;
use ort_detect::Detector;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to input image (.jpeg/.png) or video file (.mp4/.mkv/.avi/.mov).
    input: PathBuf,
    /// YOLO onnx model file (darknet export) to use.
    #[arg(long, short, default_value = "_models/yolov4-tiny.onnx")]
    model: PathBuf,
    /// Class names file, one label per line.
    #[arg(long, short, default_value = "_models/coco.names")]
    classes: PathBuf,
}

fn main() {
    // Initialize logging.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,ffmpeg_detect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("Error: {err:?}");
        // -1, reported as 255 by the OS.
        std::process::exit(-1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Class labels and session are loaded once, read-only for the run.
    let labels = ClassLabels::from_file(&args.classes)?;
    log::info!("Loaded {} class labels from {:?}", labels.len(), args.classes);

    let detector = Detector::from_file(&args.model)?;
    log::info!("Prepared ort cpu session with model: {:?}", args.model);

    match args.input.extension().and_then(|os_str| os_str.to_str()) {
        Some("mp4" | "mkv" | "avi" | "mov") => {
            process_video::process_video(&args.input, detector, &labels)?
        }
        Some("jpeg" | "jpg" | "png") => {
            process_image::process_image(&args.input, detector, &labels)?
        }
        Some(unk) => log::error!("Unhandled file extension: {unk}"),
        None => log::error!(
            "Input path does not have valid file extension: {:?}",
            args.input
        ),
    }

    Ok(())
}
