use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use detect_common::bbox::Detection;
use detect_common::frame_times::FrameTimes;
use detect_common::img_dimensions::ImgDimensions;
use detect_common::nms::non_maximum_suppression;
use image::RgbImage;
use ndarray::ArrayView2;
use ort::session::Session;
use ort::value::Tensor;

use crate::{decode, preprocess, session};

/// Score threshold fed into suppression.
pub const SCORE_THRESHOLD: f32 = 0.5;
/// IoU overlap threshold for suppression.
pub const NMS_THRESHOLD: f32 = 0.4;

/// High level YOLO detector over an ort session.
///
/// The session and the model weights are loaded once and read-only for the
/// process lifetime; everything else is per-frame.
pub struct Detector {
    session: Session,
    input_name: String,
}

impl Detector {
    pub fn from_file(model: &Path) -> anyhow::Result<Self> {
        let session = session::build_session(model)?;
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .context("model has no inputs")?;
        Ok(Self {
            session,
            input_name,
        })
    }

    /// Run the network on a frame already at the working resolution and
    /// return suppressed detections in working-frame pixel coordinates.
    ///
    /// The network may expose several output layers (two detection scales
    /// for the tiny models); candidates from all of them are decoded and
    /// suppressed jointly.
    pub fn detect(
        &mut self,
        working: &RgbImage,
        frame_times: &mut FrameTimes,
    ) -> anyhow::Result<Vec<Detection>> {
        let frame_dims = ImgDimensions::new(working.width() as f32, working.height() as f32);

        let start = Instant::now();
        let blob = preprocess::make_blob(working)?;
        let shape = [
            1usize,
            3,
            preprocess::NET_SIZE as usize,
            preprocess::NET_SIZE as usize,
        ];
        let input = Tensor::from_array((shape, blob.into_boxed_slice()))
            .context("failed to build network input tensor")?
            .into_dyn();
        frame_times.preprocess = start.elapsed();

        let start = Instant::now();
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input])?;
        frame_times.inference = start.elapsed();

        let start = Instant::now();
        let mut candidates = Vec::new();
        for (name, value) in outputs.iter() {
            let (shape, data) = value
                .try_extract_tensor::<f32>()
                .with_context(|| format!("output {name} is not an f32 tensor"))?;
            let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
            let Some(&cols) = dims.last() else {
                continue;
            };
            if cols == 0 {
                continue;
            }
            let rows: usize = dims.iter().rev().skip(1).product();
            let view = ArrayView2::from_shape((rows, cols), data)
                .with_context(|| format!("output {name} has unexpected shape {dims:?}"))?;
            candidates.extend(decode::decode_output(view, frame_dims));
        }
        let detections = non_maximum_suppression(candidates, SCORE_THRESHOLD, NMS_THRESHOLD);
        frame_times.postprocess = start.elapsed();

        Ok(detections)
    }
}
