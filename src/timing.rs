//! Frame pacing and phase timings for UI loops.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use chashmap::CHashMap;

/// Keeps a UI loop at a steady frame rate.
pub struct FrameTimer {
  frame_count: u64,
  last_frame: Instant,

  fps: f64,
  last_measurement: Instant,
  last_measurement_frame: u64,
}

impl Default for FrameTimer {
  fn default() -> Self {
    Self::new()
  }
}

impl FrameTimer {
  /// Creates a new `FrameTimer`, with the first frame starting now.
  pub fn new() -> FrameTimer {
    FrameTimer {
      frame_count: 0,
      last_frame: Instant::now(),
      fps: 0.0,
      last_measurement: Instant::now(),
      last_measurement_frame: 0,
    }
  }

  /// Returns the number of frames ended so far.
  pub fn frame_count(&self) -> u64 {
    self.frame_count
  }

  /// Returns the average frame rate over the last `interval`.
  ///
  /// Call this once per frame; the rate is recomputed each time `interval`
  /// elapses and cached in between.
  pub fn measure_fps(&mut self, interval: Duration) -> f64 {
    let elapsed = self.last_measurement.elapsed();
    if elapsed < interval {
      return self.fps;
    }

    let frames = (self.frame_count - self.last_measurement_frame) as f64;
    self.fps = frames / elapsed.as_secs_f64();
    self.last_measurement = Instant::now();
    self.last_measurement_frame = self.frame_count;
    self.fps
  }

  /// Ends a frame. If `target_fps` is set, blocks until the frame has lasted
  /// at least `1 / target_fps` seconds.
  pub fn end_frame(&mut self, target_fps: Option<u32>) {
    if let Some(fps) = target_fps.filter(|&fps| fps > 0) {
      let frame_time = Duration::from_secs(1) / fps;
      if let Some(left) = frame_time.checked_sub(self.last_frame.elapsed()) {
        thread::sleep(left);
      }
    }
    self.last_frame = Instant::now();
    self.frame_count += 1;
  }
}

/// Accumulates how long each phase of a frame takes, such as rendering or
/// event dispatch.
///
/// Phases are named by `&'static str` tags like `"ui.render"`.
pub struct SystemTimer {
  table: CHashMap<&'static str, Phase>,
  order: Mutex<Vec<&'static str>>,
}

impl Default for SystemTimer {
  fn default() -> Self {
    Self::new()
  }
}

impl SystemTimer {
  /// Creates a timer with no phases.
  pub fn new() -> Self {
    Self {
      table: CHashMap::new(),
      order: Mutex::new(Vec::new()),
    }
  }

  /// Starts timing one run of `phase`. The run ends when the returned guard
  /// is dropped.
  #[must_use]
  pub fn start(&self, phase: &'static str) -> PhaseGuard<'_> {
    let order = &self.order;
    self.table.upsert(
      phase,
      move || {
        if let Ok(mut order) = order.lock() {
          order.push(phase);
        }
        Phase::new()
      },
      |_| {},
    );
    PhaseGuard {
      timer: self,
      phase,
      start: Instant::now(),
    }
  }

  /// Returns the total time spent in `phase`.
  pub fn total_time(&self, phase: &'static str) -> Duration {
    self
      .table
      .get(phase)
      .map(|p| p.total)
      .unwrap_or_default()
  }

  /// Returns the number of completed runs of `phase`.
  pub fn runs(&self, phase: &'static str) -> u64 {
    self.table.get(phase).map(|p| p.runs).unwrap_or_default()
  }

  /// Returns the average time per run of every phase, in the order phases
  /// were first started.
  ///
  /// Averages are taken over windows of `interval`: each is recomputed once
  /// its window has elapsed and cached until then.
  pub fn averages(&self, interval: Duration) -> Vec<(&'static str, Duration)> {
    let now = Instant::now();
    let order = match self.order.lock() {
      Ok(order) => order.clone(),
      Err(_) => return Vec::new(),
    };
    order
      .into_iter()
      .filter_map(|phase| {
        let avg = self.table.get_mut(phase)?.average(interval, now);
        Some((phase, avg))
      })
      .collect()
  }

  fn record(&self, phase: &'static str, elapsed: Duration) {
    if let Some(mut p) = self.table.get_mut(phase) {
      p.total += elapsed;
      p.window += elapsed;
      p.window_runs += 1;
      p.runs += 1;
    }
  }
}

struct Phase {
  total: Duration,
  runs: u64,

  window: Duration,
  window_runs: u32,
  window_start: Instant,
  average: Duration,
}

impl Phase {
  fn new() -> Self {
    Self {
      total: Duration::default(),
      runs: 0,
      window: Duration::default(),
      window_runs: 0,
      window_start: Instant::now(),
      average: Duration::default(),
    }
  }

  fn average(&mut self, interval: Duration, now: Instant) -> Duration {
    if now - self.window_start < interval {
      return self.average;
    }

    self.average = self
      .window
      .checked_div(self.window_runs)
      .unwrap_or_default();
    self.window = Duration::default();
    self.window_runs = 0;
    self.window_start = now;
    self.average
  }
}

/// A run of a phase in progress; see [`SystemTimer::start()`].
pub struct PhaseGuard<'a> {
  timer: &'a SystemTimer,
  phase: &'static str,
  start: Instant,
}

impl PhaseGuard<'_> {
  /// Ends the run early.
  pub fn finish(self) {}
}

impl Drop for PhaseGuard<'_> {
  fn drop(&mut self) {
    self.timer.record(self.phase, self.start.elapsed());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn phases_accumulate() {
    let timer = SystemTimer::new();
    timer.start("a").finish();
    {
      let _t = timer.start("b");
      thread::sleep(Duration::from_millis(2));
    }
    timer.start("a").finish();

    assert_eq!(timer.runs("a"), 2);
    assert_eq!(timer.runs("b"), 1);
    assert_eq!(timer.runs("c"), 0);
    assert!(timer.total_time("b") >= Duration::from_millis(2));

    let phases: Vec<_> =
      timer.averages(Duration::ZERO).into_iter().map(|(p, _)| p).collect();
    assert_eq!(phases, ["a", "b"]);
  }

  #[test]
  fn unpaced_frames_do_not_sleep() {
    let mut frames = FrameTimer::new();
    let start = Instant::now();
    for _ in 0..100 {
      frames.end_frame(None);
    }
    assert_eq!(frames.frame_count(), 100);
    assert!(start.elapsed() < Duration::from_secs(1));
  }
}
