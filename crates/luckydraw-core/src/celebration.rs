//! Timed confetti sequence shown after a successful draw
//!
//! The sequence is a deadline: every animation frame emits one burst from
//! each lower corner of the viewport and schedules another frame until the
//! deadline has passed. The scheduling primitive belongs to the caller.

use serde::Serialize;

/// Default length of the sequence in milliseconds
pub const DEFAULT_CELEBRATION_MS: u32 = 2_000;

/// Launch point of a burst, as a fraction of the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Origin {
    pub x: f64,
}

/// Options for one particle burst, shaped like the `confetti()` options object
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Burst {
    pub particle_count: u32,
    pub angle: f64,
    pub spread: f64,
    pub origin: Origin,
}

/// Burst fired to the upper right from the lower left corner
pub const LEFT_BURST: Burst = Burst {
    particle_count: 3,
    angle: 60.0,
    spread: 55.0,
    origin: Origin { x: 0.0 },
};

/// Burst fired to the upper left from the lower right corner
pub const RIGHT_BURST: Burst = Burst {
    particle_count: 3,
    angle: 120.0,
    spread: 55.0,
    origin: Origin { x: 1.0 },
};

/// Work for a single animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub bursts: [Burst; 2],
    /// Whether another frame must be requested
    pub reschedule: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    deadline_ms: f64,
}

impl Celebration {
    /// Start a sequence at `now_ms` lasting `duration_ms`
    pub fn start(now_ms: f64, duration_ms: u32) -> Self {
        Self {
            deadline_ms: now_ms + f64::from(duration_ms),
        }
    }

    pub fn deadline_ms(&self) -> f64 {
        self.deadline_ms
    }

    /// Bursts for the frame running at `now_ms`
    ///
    /// A frame always emits; only the reschedule decision depends on time.
    pub fn tick(&self, now_ms: f64) -> Tick {
        Tick {
            bursts: [LEFT_BURST, RIGHT_BURST],
            reschedule: now_ms < self.deadline_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reschedules_until_deadline() {
        let celebration = Celebration::start(1_000.0, DEFAULT_CELEBRATION_MS);
        assert_eq!(celebration.deadline_ms(), 3_000.0);
        assert!(celebration.tick(1_000.0).reschedule);
        assert!(celebration.tick(2_999.9).reschedule);
        assert!(!celebration.tick(3_000.0).reschedule);
        assert!(!celebration.tick(5_000.0).reschedule);
    }

    #[test]
    fn test_final_frame_still_emits() {
        let tick = Celebration::start(0.0, 10).tick(50.0);
        assert!(!tick.reschedule);
        assert_eq!(tick.bursts, [LEFT_BURST, RIGHT_BURST]);
    }

    #[test]
    fn test_burst_serializes_as_confetti_options() {
        let json = serde_json::to_value(RIGHT_BURST).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "particleCount": 3,
                "angle": 120.0,
                "spread": 55.0,
                "origin": {"x": 1.0}
            })
        );
    }
}
