//! Shared vocabulary for the detection demo: bounding boxes, class labels,
//! suppression, overlay drawing and per-frame bookkeeping.

pub mod bbox;
pub mod classes;
pub mod draw;
pub mod frame_meta;
pub mod frame_times;
pub mod img_dimensions;
pub mod nms;
