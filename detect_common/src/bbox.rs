use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates of the working frame.
///
/// Coordinates are integers because boxes are produced by truncating
/// denormalized network outputs, matching the darknet demo semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl BBox {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Intersection over union with another box.
    pub fn iou(&self, other: &BBox) -> f32 {
        let i_left = self.left.max(other.left);
        let i_top = self.top.max(other.top);
        let i_right = self.right().min(other.right());
        let i_bottom = self.bottom().min(other.bottom());

        let i_area = (i_right - i_left).max(0) as f32 * (i_bottom - i_top).max(0) as f32;
        if i_area == 0.0 {
            return 0.0;
        }
        let union = self.width as f32 * self.height as f32
            + other.width as f32 * other.height as f32
            - i_area;
        i_area / union
    }
}

/// One detected object, ephemeral per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Index into the class label list.
    pub class_id: usize,
    /// Objectness score of the emitting row, in [0, 1].
    pub confidence: f32,
    /// Box in working-frame pixel coordinates.
    pub bbox: BBox,
}
