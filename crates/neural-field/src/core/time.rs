/// Maximum simulation steps a single frame may run in fixed mode.
/// Prevents a spiral of death after the tab was hidden.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Converts frame-callback timestamps into simulation step counts.
///
/// In per-frame mode every callback advances the field by exactly one step,
/// so motion speed follows the display refresh rate. Fixed mode accumulates
/// real elapsed time and runs as many fixed steps as fit.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Milliseconds per step, `None` for per-frame mode.
    step_ms: Option<f64>,
    /// Timestamp of the previous callback.
    last: Option<f64>,
    accumulator: f64,
}

impl FrameClock {
    /// One step per frame callback.
    pub fn per_frame() -> Self {
        Self {
            step_ms: None,
            last: None,
            accumulator: 0.0,
        }
    }

    /// Fixed-rate stepping at `hz` steps per second.
    /// A non-positive rate falls back to per-frame stepping.
    pub fn fixed(hz: f32) -> Self {
        let step_ms = (hz > 0.0).then(|| 1000.0 / hz as f64);
        Self {
            step_ms,
            last: None,
            accumulator: 0.0,
        }
    }

    pub fn from_hz(hz: Option<f32>) -> Self {
        match hz {
            Some(hz) => Self::fixed(hz),
            None => Self::per_frame(),
        }
    }

    /// Register a frame callback at `now_ms`. Returns the number of steps to run.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(step_ms) = self.step_ms else {
            return 1;
        };

        let Some(last) = self.last.replace(now_ms) else {
            return 1;
        };

        // Timestamps can go backwards across a remount; treat that as zero elapsed.
        self.accumulator += (now_ms - last).max(0.0);
        let due = (self.accumulator / step_ms) as u32;
        if due > MAX_STEPS_PER_FRAME {
            // Drop the backlog rather than catching up.
            self.accumulator = 0.0;
            return MAX_STEPS_PER_FRAME;
        }
        self.accumulator -= due as f64 * step_ms;
        due
    }

    /// Whether the clock runs one step per callback.
    pub fn is_per_frame(&self) -> bool {
        self.step_ms.is_none()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::per_frame()
    }
}
