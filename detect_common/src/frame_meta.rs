use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bbox::Detection;

/// Detections recorded for a single processed frame.
#[derive(Debug, Serialize, Deserialize)]
pub struct FrameMeta {
    pub frame_index: u64,
    /// Presentation timestamp from the container, when the source has one.
    pub pts: Option<i64>,
    pub detections: Vec<Detection>,
}

/// Metadata corresponding to a processed video.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoMeta {
    /// Path to the original input video file.
    pub input_file: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Directory the annotated frames were written to.
    pub output_dir: Option<PathBuf>,
    /// Per-frame information with timestamps + recognized objects.
    pub frames: Vec<FrameMeta>,
}

impl VideoMeta {
    pub fn new(input_file: PathBuf, output_dir: Option<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            input_file,
            width,
            height,
            output_dir,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: FrameMeta) {
        self.frames.push(frame);
    }
}
