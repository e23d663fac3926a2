use detect_common::bbox::{BBox, Detection};
use detect_common::img_dimensions::ImgDimensions;
use ndarray::ArrayView2;

/// Objectness a row must exceed before its class scores are inspected.
pub const OBJECTNESS_THRESHOLD: f32 = 0.5;
/// Per-class score a column must exceed to emit a candidate.
pub const CLASS_THRESHOLD: f32 = 0.5;
/// Columns preceding the class scores: cx, cy, w, h, objectness.
const BOX_ATTRS: usize = 5;

/// Decode one raw output tensor into detection candidates.
///
/// Rows are laid out as `[cx, cy, w, h, objectness, class_0 ..]` with
/// coordinates normalized to [0, 1]. A qualifying row emits one candidate
/// per class column above [`CLASS_THRESHOLD`]; all of them share the row's
/// geometry and carry the row's objectness as confidence. The objectness is
/// deliberately not scaled by the class score, reproducing the darknet demo
/// this pipeline ports. Cross-class duplicates are resolved later by
/// class-agnostic suppression.
pub fn decode_output(out: ArrayView2<'_, f32>, frame_dims: ImgDimensions) -> Vec<Detection> {
    let mut candidates = Vec::new();
    if out.ncols() <= BOX_ATTRS {
        log::warn!(
            "Skipping output tensor with {} columns, expected at least {}",
            out.ncols(),
            BOX_ATTRS + 1
        );
        return candidates;
    }

    for row in out.rows() {
        let objectness = row[4];
        if objectness <= OBJECTNESS_THRESHOLD {
            continue;
        }
        for (col, &score) in row.iter().enumerate().skip(BOX_ATTRS) {
            if score <= CLASS_THRESHOLD {
                continue;
            }
            let center_x = (row[0] * frame_dims.width) as i32;
            let center_y = (row[1] * frame_dims.height) as i32;
            let width = (row[2] * frame_dims.width) as i32;
            let height = (row[3] * frame_dims.height) as i32;
            candidates.push(Detection {
                class_id: col - BOX_ATTRS,
                confidence: objectness,
                bbox: BBox::new(center_x - width / 2, center_y - height / 2, width, height),
            });
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn dims() -> ImgDimensions {
        ImgDimensions::new(640.0, 360.0)
    }

    fn tensor(rows: Vec<Vec<f32>>) -> Array2<f32> {
        let ncols = rows[0].len();
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((flat.len() / ncols, ncols), flat).unwrap()
    }

    #[test]
    fn all_zero_tensor_yields_no_candidates() {
        let out = Array2::<f32>::zeros((16, 85));
        assert!(decode_output(out.view(), dims()).is_empty());
    }

    #[test]
    fn confidence_is_objectness_not_class_score() {
        let out = tensor(vec![vec![0.5, 0.5, 0.5, 0.5, 0.9, 0.9, 0.1, 0.0]]);
        let candidates = decode_output(out.view(), dims());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].class_id, 0);
        // 0.9, never 0.9 * 0.9
        assert_eq!(candidates[0].confidence, 0.9);
    }

    #[test]
    fn identity_box_covers_the_whole_frame() {
        let out = tensor(vec![vec![0.5, 0.5, 1.0, 1.0, 0.9, 0.9, 0.0, 0.0]]);
        let candidates = decode_output(out.view(), dims());
        assert_eq!(candidates[0].bbox, BBox::new(0, 0, 640, 360));
    }

    #[test]
    fn multiple_passing_classes_share_geometry() {
        let out = tensor(vec![vec![0.25, 0.25, 0.2, 0.2, 0.8, 0.9, 0.6, 0.2]]);
        let candidates = decode_output(out.view(), dims());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].class_id, 0);
        assert_eq!(candidates[1].class_id, 1);
        assert_eq!(candidates[0].bbox, candidates[1].bbox);
        assert_eq!(candidates[0].confidence, candidates[1].confidence);
    }

    #[test]
    fn low_objectness_row_is_skipped_despite_high_class_score() {
        let out = tensor(vec![vec![0.5, 0.5, 0.5, 0.5, 0.4, 0.99, 0.0, 0.0]]);
        assert!(decode_output(out.view(), dims()).is_empty());
    }

    #[test]
    fn objectness_exactly_at_threshold_is_skipped() {
        let out = tensor(vec![vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.9, 0.0, 0.0]]);
        assert!(decode_output(out.view(), dims()).is_empty());
    }

    #[test]
    fn tensor_without_class_columns_is_skipped() {
        let out = Array2::<f32>::from_elem((4, 5), 0.9);
        assert!(decode_output(out.view(), dims()).is_empty());
    }
}
