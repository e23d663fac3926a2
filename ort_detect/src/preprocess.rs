use anyhow::Context;
use fast_image_resize as fr;
use image::RgbImage;

/// Fixed working resolution every frame is resized to before inference;
/// boxes and overlays live in this coordinate space.
pub const WORKING_WIDTH: u32 = 640;
pub const WORKING_HEIGHT: u32 = 360;
/// Square network input size of the darknet export.
pub const NET_SIZE: u32 = 416;

/// Resize a frame to the fixed working resolution, aspect ratio ignored.
pub fn resize_to_working(frame: &RgbImage) -> anyhow::Result<RgbImage> {
    if frame.width() == WORKING_WIDTH && frame.height() == WORKING_HEIGHT {
        return Ok(frame.clone());
    }
    resize_rgb(frame, WORKING_WIDTH, WORKING_HEIGHT)
}

/// NCHW `[1, 3, NET_SIZE, NET_SIZE]` blob scaled by 1/255, from the
/// working frame. No letterboxing, matching the original demo's
/// `blobFromImage(…, crop=false)` behavior.
pub fn make_blob(working: &RgbImage) -> anyhow::Result<Vec<f32>> {
    let net = resize_rgb(working, NET_SIZE, NET_SIZE)?;
    let size = (NET_SIZE * NET_SIZE) as usize;
    let raw = net.as_raw();

    let mut data = vec![0f32; 3 * size];
    for idx in 0..size {
        data[idx] = raw[idx * 3] as f32 / 255.0;
        data[size + idx] = raw[idx * 3 + 1] as f32 / 255.0;
        data[2 * size + idx] = raw[idx * 3 + 2] as f32 / 255.0;
    }
    Ok(data)
}

fn resize_rgb(frame: &RgbImage, width: u32, height: u32) -> anyhow::Result<RgbImage> {
    let src = fr::images::ImageRef::new(
        frame.width(),
        frame.height(),
        frame.as_raw(),
        fr::PixelType::U8x3,
    )
    .context("failed to wrap source frame for resize")?;

    let mut dst = fr::images::Image::new(width, height, fr::PixelType::U8x3);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear));
    resizer
        .resize(&src, &mut dst, Some(&options))
        .context("frame resize failed")?;

    RgbImage::from_raw(width, height, dst.buffer().to_vec())
        .context("resized buffer has unexpected size")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn working_resize_hits_fixed_dims() {
        let frame = RgbImage::new(1920, 1080);
        let working = resize_to_working(&frame).unwrap();
        assert_eq!(working.dimensions(), (WORKING_WIDTH, WORKING_HEIGHT));
    }

    #[test]
    fn blob_is_scaled_nchw() {
        let mut working = RgbImage::new(WORKING_WIDTH, WORKING_HEIGHT);
        for pixel in working.pixels_mut() {
            *pixel = Rgb([255, 0, 127]);
        }
        let blob = make_blob(&working).unwrap();
        let size = (NET_SIZE * NET_SIZE) as usize;
        assert_eq!(blob.len(), 3 * size);
        // uniform image survives resampling exactly
        assert!((blob[0] - 1.0).abs() < 1e-6);
        assert!((blob[size] - 0.0).abs() < 1e-6);
        assert!((blob[2 * size] - 127.0 / 255.0).abs() < 1e-6);
    }
}
