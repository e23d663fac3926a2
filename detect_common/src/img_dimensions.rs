/// Pixel dimensions of a frame, kept as `f32` for denormalization math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImgDimensions {
    pub width: f32,
    pub height: f32,
}

impl ImgDimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
