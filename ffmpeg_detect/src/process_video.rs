use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use detect_common::classes::ClassLabels;
use detect_common::draw;
use detect_common::frame_meta::{FrameMeta, VideoMeta};
use detect_common::frame_times::{AggregatedTimes, FrameTimes};
use ffmpeg_next as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as Scaler, flag::Flags};
use ffmpeg::util::frame::video::Video;
use image::RgbImage;
use ort_detect::{preprocess, Detector};

/// Performs detection on a video file, frame by frame until end of stream
/// or a key press.
pub fn process_video(path: &Path, mut detector: Detector, labels: &ClassLabels) -> anyhow::Result<()> {
    ffmpeg::init()?;

    let mut ictx = input(&path).with_context(|| format!("Error opening video file {path:?}"))?;
    let stream = ictx
        .streams()
        .best(Type::Video)
        .ok_or(ffmpeg::Error::StreamNotFound)?;
    let video_stream_index = stream.index();

    let context_decoder = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
    let mut decoder = context_decoder.decoder().video()?;

    let mut scaler = Scaler::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        Pixel::RGB24,
        decoder.width(),
        decoder.height(),
        Flags::BILINEAR,
    )?;

    let out_dir = path.with_extension("out");
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {out_dir:?}"))?;

    let mut video_meta = VideoMeta::new(
        path.to_path_buf(),
        Some(out_dir.clone()),
        decoder.width(),
        decoder.height(),
    );
    let mut agg_times = AggregatedTimes::default();
    let font = draw::load_font();
    let mut frame_index = 0u64;
    let mut stopped = false;

    // Key presses only arrive unbuffered in raw mode; the guard restores
    // the terminal on every exit path, including errors.
    let raw_mode = RawModeGuard::new();

    let mut receive_and_process =
        |decoder: &mut ffmpeg::decoder::Video, detector: &mut Detector| -> anyhow::Result<bool> {
            let mut decoded = Video::empty();
            while decoder.receive_frame(&mut decoded).is_ok() {
                let mut frame_times = FrameTimes::default();

                let start = Instant::now();
                let mut rgb_frame = Video::empty();
                scaler.run(&decoded, &mut rgb_frame)?;
                let rgb = rgb_to_image(&rgb_frame)?;
                let mut working = preprocess::resize_to_working(&rgb)?;
                frame_times.acquire = start.elapsed();

                let detections = detector.detect(&working, &mut frame_times)?;

                let start = Instant::now();
                draw::draw_detections(&mut working, &detections, labels, font.as_ref());
                let frame_path = out_dir.join(format!("frame{frame_index:05}.jpg"));
                working
                    .save(&frame_path)
                    .with_context(|| format!("failed to write {frame_path:?}"))?;
                frame_times.annotate = start.elapsed();

                log::info!("frame {frame_index}: {} detections", detections.len());
                for det in &detections {
                    log::debug!("  {}", draw::label_text(det, labels));
                }

                video_meta.push(FrameMeta {
                    frame_index,
                    pts: decoded.pts(),
                    detections,
                });
                frame_index += 1;

                log::debug!("{frame_times:?}");
                agg_times.push(frame_times);

                // Cooperative exit point between frames.
                if stop_requested(&raw_mode)? {
                    return Ok(true);
                }
            }
            Ok(false)
        };

    for (stream, packet) in ictx.packets() {
        if stream.index() == video_stream_index {
            decoder.send_packet(&packet)?;
            if receive_and_process(&mut decoder, &mut detector)? {
                stopped = true;
                break;
            }
        }
    }

    // Drain the decoder once the container reports end of stream; no
    // further reads happen after this.
    if !stopped {
        decoder.send_eof()?;
        receive_and_process(&mut decoder, &mut detector)?;
    }

    let meta_output_path = path.with_extension("json");
    log::info!(
        "Writing output json file, {} frames: {meta_output_path:?}",
        video_meta.frames.len()
    );
    serde_json::to_writer(fs::File::create(&meta_output_path)?, &video_meta)?;

    // Print perf stats, ignoring first (outlier) frame.
    if let Some(avg) = agg_times.avg(true) {
        log::info!("Average frame times: {avg:?}");
    }
    if let Some(min) = agg_times.min(true) {
        log::info!("Min frame times: {min:?}");
    }
    if let Some(max) = agg_times.max(true) {
        log::info!("Max frame times: {max:?}");
    }

    Ok(())
}

/// Copy an RGB24 ffmpeg frame into an owned image buffer, honoring the
/// per-row stride padding.
fn rgb_to_image(frame: &Video) -> anyhow::Result<RgbImage> {
    let width = frame.width();
    let height = frame.height();
    let stride = frame.stride(0);
    let data = frame.data(0);
    let row_len = width as usize * 3;

    let mut buf = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        buf.extend_from_slice(&data[start..start + row_len]);
    }
    RgbImage::from_raw(width, height, buf).context("decoded frame has unexpected size")
}

/// Puts the terminal into raw mode so key presses are delivered without a
/// trailing Enter, and restores cooked mode on drop. Inactive when stdin is
/// not a tty, so headless runs never touch terminal state.
struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn new() -> Self {
        if !std::io::stdin().is_terminal() {
            return Self { active: false };
        }
        match enable_raw_mode() {
            Ok(()) => Self { active: true },
            Err(err) => {
                log::warn!("Could not enable raw terminal mode: {err}");
                Self { active: false }
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = disable_raw_mode() {
                log::warn!("Could not restore terminal mode: {err}");
            }
        }
    }
}

/// Drain pending terminal events; `q` or Esc stops processing. A no-op
/// unless the raw-mode guard is active.
fn stop_requested(raw_mode: &RawModeGuard) -> anyhow::Result<bool> {
    if !raw_mode.active {
        return Ok(false);
    }
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            {
                log::info!("Stop requested, finishing up.");
                return Ok(true);
            }
        }
    }
    Ok(false)
}
