use crate::bbox::Detection;

/// Greedy class-agnostic non-maximum suppression.
///
/// Candidates at or below `score_threshold` are discarded, the rest are
/// sorted by confidence descending, and any box overlapping an already kept
/// box with IoU above `iou_threshold` is dropped regardless of its class.
/// Rows that emitted several classes with identical geometry therefore keep
/// exactly one survivor.
pub fn non_maximum_suppression(
    mut candidates: Vec<Detection>,
    score_threshold: f32,
    iou_threshold: f32,
) -> Vec<Detection> {
    candidates.retain(|det| det.confidence > score_threshold);
    candidates.sort_unstable_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Detection> = Vec::new();
    for cand in candidates {
        if kept.iter().all(|k| k.bbox.iou(&cand.bbox) <= iou_threshold) {
            kept.push(cand);
        }
    }
    kept
}
