use std::time::Duration;

/// Length of each countdown numeral
const COUNTDOWN_STEP: Duration = Duration::from_secs(1);
/// Numerals shown before "Go!"
const COUNTDOWN_FROM: u32 = 3;
/// Countdown numerals plus one second of "Go!"
pub const COUNTDOWN_TOTAL: Duration = Duration::from_secs(COUNTDOWN_FROM as u64 + 1);

/// Fixed tick rate of one session, derived once from the speed setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRate {
    fps: u32,
}

impl TickRate {
    /// `fps = 10 + speed * 20`, truncated; speed is clamped to [0, 1]
    pub fn from_speed(speed: f32) -> Self {
        let speed = if speed.is_nan() { 0.0 } else { speed.clamp(0.0, 1.0) };
        Self {
            fps: (10.0 + speed * 20.0) as u32,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time between two ticks
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

/// Text shown `elapsed` into a countdown: "3", "2", "1", then "Go!"
pub fn countdown_label(elapsed: Duration) -> String {
    let whole = (elapsed.as_millis() / COUNTDOWN_STEP.as_millis()) as u32;
    if whole < COUNTDOWN_FROM {
        (COUNTDOWN_FROM - whole).to_string()
    } else {
        "Go!".to_string()
    }
}
