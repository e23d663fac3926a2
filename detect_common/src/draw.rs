use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::bbox::Detection;
use crate::classes::ClassLabels;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const LABEL_BG: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_FG: Rgb<u8> = Rgb([0, 0, 0]);
const BOX_THICKNESS: i32 = 3;
const LABEL_SCALE: f32 = 14.0;

/// Candidate label font locations, probed in order at startup.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Try to load a label font from well known system locations.
///
/// Returns `None` when no font is available, in which case boxes are still
/// drawn but labels are skipped.
pub fn load_font() -> Option<FontVec> {
    for path in FONT_PATHS {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => {
                log::debug!("Loaded label font from {path}");
                return Some(font);
            }
            Err(err) => log::warn!("Ignoring unparseable font {path}: {err}"),
        }
    }
    log::warn!("No label font found, drawing boxes without text");
    None
}

/// Label text for a detection: `<class name>: <confidence>` with the
/// confidence printed to two decimal places.
pub fn label_text(det: &Detection, labels: &ClassLabels) -> String {
    format!("{}: {:.2}", labels.name(det.class_id), det.confidence)
}

/// Draw all detections onto the working frame in place.
pub fn draw_detections(
    frame: &mut RgbImage,
    detections: &[Detection],
    labels: &ClassLabels,
    font: Option<&FontVec>,
) {
    for det in detections {
        draw_box(frame, det);
        if let Some(font) = font {
            draw_label(frame, det, labels, font);
        }
    }
}

fn draw_box(frame: &mut RgbImage, det: &Detection) {
    for inset in 0..BOX_THICKNESS {
        let width = det.bbox.width - 2 * inset;
        let height = det.bbox.height - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at(det.bbox.left + inset, det.bbox.top + inset)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(frame, rect, BOX_COLOR);
    }
}

fn draw_label(frame: &mut RgbImage, det: &Detection, labels: &ClassLabels, font: &FontVec) {
    let text = label_text(det, labels);
    let scale = PxScale::from(LABEL_SCALE);
    let (text_w, text_h) = text_size(scale, font, &text);
    if text_w == 0 || text_h == 0 {
        return;
    }

    // Keep the label inside the frame when the box touches the top edge.
    let text_top = det.bbox.top.max(text_h as i32) - text_h as i32;
    let bg = Rect::at(det.bbox.left, text_top).of_size(text_w, text_h);
    draw_filled_rect_mut(frame, bg, LABEL_BG);
    draw_text_mut(frame, LABEL_FG, det.bbox.left, text_top, scale, font, &text);
}
