//! Decoder + suppression working together on synthetic network outputs,
//! without touching an actual onnx session.

use detect_common::bbox::BBox;
use detect_common::img_dimensions::ImgDimensions;
use detect_common::nms::non_maximum_suppression;
use ndarray::Array2;
use ort_detect::decode::decode_output;
use ort_detect::detector::{NMS_THRESHOLD, SCORE_THRESHOLD};

fn tensor(rows: Vec<Vec<f32>>) -> Array2<f32> {
    let ncols = rows[0].len();
    let flat: Vec<f32> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((flat.len() / ncols, ncols), flat).unwrap()
}

#[test]
fn cross_class_duplicates_collapse_to_one_detection() {
    // One row where two classes pass the threshold: the decoder emits two
    // candidates with identical geometry, joint suppression keeps one.
    let out = tensor(vec![vec![0.5, 0.5, 0.25, 0.25, 0.9, 0.8, 0.7, 0.1]]);
    let dims = ImgDimensions::new(640.0, 360.0);

    let candidates = decode_output(out.view(), dims);
    assert_eq!(candidates.len(), 2);

    let kept = non_maximum_suppression(candidates, SCORE_THRESHOLD, NMS_THRESHOLD);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].confidence, 0.9);
}

#[test]
fn suppression_is_class_agnostic_across_output_scales() {
    // The same object reported by two output layers under different classes
    // still collapses to a single detection.
    let scale_a = tensor(vec![vec![0.5, 0.5, 0.5, 0.5, 0.9, 0.95, 0.0, 0.0]]);
    let scale_b = tensor(vec![vec![0.5, 0.5, 0.5, 0.5, 0.7, 0.0, 0.9, 0.0]]);
    let dims = ImgDimensions::new(640.0, 360.0);

    let mut candidates = decode_output(scale_a.view(), dims);
    candidates.extend(decode_output(scale_b.view(), dims));
    assert_eq!(candidates.len(), 2);
    assert_ne!(candidates[0].class_id, candidates[1].class_id);

    let kept = non_maximum_suppression(candidates, SCORE_THRESHOLD, NMS_THRESHOLD);
    assert_eq!(kept.len(), 1);
    // highest objectness wins
    assert_eq!(kept[0].class_id, 0);
    assert_eq!(kept[0].confidence, 0.9);
}

#[test]
fn distinct_objects_survive_end_to_end() {
    let out = tensor(vec![
        vec![0.2, 0.2, 0.1, 0.1, 0.9, 0.9, 0.0, 0.0],
        vec![0.8, 0.8, 0.1, 0.1, 0.8, 0.0, 0.8, 0.0],
    ]);
    let dims = ImgDimensions::new(640.0, 360.0);

    let kept = non_maximum_suppression(
        decode_output(out.view(), dims),
        SCORE_THRESHOLD,
        NMS_THRESHOLD,
    );
    assert_eq!(kept.len(), 2);
    let boxes: Vec<BBox> = kept.iter().map(|d| d.bbox).collect();
    assert_ne!(boxes[0], boxes[1]);
}
