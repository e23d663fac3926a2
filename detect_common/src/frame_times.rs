use std::time::Duration;

/// Wall-clock timings of one frame's trip through the pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameTimes {
    /// Fetching the source frame: file read or video decode + working resize.
    pub acquire: Duration,
    /// Network blob preparation.
    pub preprocess: Duration,
    /// Forward pass through the session.
    pub inference: Duration,
    /// Raw tensor decode + suppression.
    pub postprocess: Duration,
    /// Overlay drawing + output writing.
    pub annotate: Duration,
}

/// Accumulated per-frame timings across a run.
#[derive(Debug, Default)]
pub struct AggregatedTimes {
    frames: Vec<FrameTimes>,
}

impl AggregatedTimes {
    pub fn push(&mut self, times: FrameTimes) {
        self.frames.push(times);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn window(&self, skip_first: bool) -> &[FrameTimes] {
        if skip_first && self.frames.len() > 1 {
            &self.frames[1..]
        } else {
            &self.frames
        }
    }

    /// Per-stage average, optionally ignoring the first (warm-up) frame.
    pub fn avg(&self, skip_first: bool) -> Option<FrameTimes> {
        let window = self.window(skip_first);
        if window.is_empty() {
            return None;
        }
        let count = window.len() as u32;
        let sum = window.iter().fold(FrameTimes::default(), |acc, t| FrameTimes {
            acquire: acc.acquire + t.acquire,
            preprocess: acc.preprocess + t.preprocess,
            inference: acc.inference + t.inference,
            postprocess: acc.postprocess + t.postprocess,
            annotate: acc.annotate + t.annotate,
        });
        Some(FrameTimes {
            acquire: sum.acquire / count,
            preprocess: sum.preprocess / count,
            inference: sum.inference / count,
            postprocess: sum.postprocess / count,
            annotate: sum.annotate / count,
        })
    }

    /// Per-stage minimum, optionally ignoring the first (warm-up) frame.
    pub fn min(&self, skip_first: bool) -> Option<FrameTimes> {
        self.fold(skip_first, Duration::min)
    }

    /// Per-stage maximum, optionally ignoring the first (warm-up) frame.
    pub fn max(&self, skip_first: bool) -> Option<FrameTimes> {
        self.fold(skip_first, Duration::max)
    }

    fn fold(&self, skip_first: bool, pick: fn(Duration, Duration) -> Duration) -> Option<FrameTimes> {
        let window = self.window(skip_first);
        let (first, rest) = window.split_first()?;
        Some(rest.iter().fold(*first, |acc, t| FrameTimes {
            acquire: pick(acc.acquire, t.acquire),
            preprocess: pick(acc.preprocess, t.preprocess),
            inference: pick(acc.inference, t.inference),
            postprocess: pick(acc.postprocess, t.postprocess),
            annotate: pick(acc.annotate, t.annotate),
        }))
    }
}
