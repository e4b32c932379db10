use std::time::{Duration, Instant};

/// One FPS measurement window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsReport {
    pub frames: u32,
    pub elapsed: Duration,
    pub fps: f64,
}

/// Counts frames and reports a rate once per `interval` of wall-clock time.
///
/// Each tick counts one frame, then compares the time since the start of the
/// current window against `interval`. When it is reached, a report is returned
/// and a new window starts at that tick.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    /// Counter reporting once per second, with its window starting at `start`.
    pub fn new(start: Instant) -> Self {
        Self::with_interval(start, Duration::from_secs(1))
    }

    pub fn with_interval(start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            window_start: start,
            frames: 0,
        }
    }

    /// Counts a frame presented at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<FpsReport> {
        self.frames = self.frames.saturating_add(1);

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let report = FpsReport {
            frames: self.frames,
            elapsed,
            fps: self.frames as f64 / elapsed.as_secs_f64(),
        };

        self.window_start = now;
        self.frames = 0;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Timestamp of the `k`-th of `n` frames spread evenly over one second.
    fn at(t0: Instant, k: u64, n: u64) -> Instant {
        t0 + Duration::from_nanos(1_000_000_000 * k / n)
    }

    #[test]
    fn reports_once_for_120_frames_in_one_second() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);

        let reports: Vec<FpsReport> = (1..=120).filter_map(|k| fps.tick(at(t0, k, 120))).collect();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].frames, 120);
        assert_eq!(reports[0].elapsed, Duration::from_secs(1));
        assert_eq!(reports[0].fps, 120.0);
    }

    #[test]
    fn window_restarts_after_report() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);

        assert!(fps.tick(t0 + Duration::from_secs(1)).is_some());
        assert!(fps.tick(t0 + Duration::from_millis(1500)).is_none());

        let second = fps.tick(t0 + Duration::from_secs(2)).map(|r| r.frames);
        assert_eq!(second, Some(2));
    }

    #[test]
    fn slow_frames_report_fractional_rate() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);

        let r = fps.tick(t0 + Duration::from_secs(2));
        assert_eq!(r.map(|r| r.fps), Some(0.5));
    }
}
