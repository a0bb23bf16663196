//! Simulation statistics collection trait

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trait for collecting simulation statistics
///
/// Rules report what they did through this trait so the host can log or
/// display counters without the core depending on any particular sink.
pub trait SimStats {
    /// A grain's per-frame rule ran
    fn record_grain_processed(&mut self);

    /// A grain moved one cell (every step of a ray counts)
    fn record_grain_moved(&mut self);

    /// A grain was replaced by another material (burning, melting, decay)
    fn record_transition(&mut self);

    /// A grain was removed (corrosion, dissipation, void)
    fn record_destroyed(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_grain_processed(&mut self) {}
    fn record_grain_moved(&mut self) {}
    fn record_transition(&mut self) {}
    fn record_destroyed(&mut self) {}
}

/// Counting implementation, reset by the host between frames or runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub processed: u64,
    pub moved: u64,
    pub transitions: u64,
    pub destroyed: u64,
}

impl FrameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for FrameStats {
    fn record_grain_processed(&mut self) {
        self.processed += 1;
    }

    fn record_grain_moved(&mut self) {
        self.moved += 1;
    }

    fn record_transition(&mut self) {
        self.transitions += 1;
    }

    fn record_destroyed(&mut self) {
        self.destroyed += 1;
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} moved={} transitions={} destroyed={}",
            self.processed, self.moved, self.transitions, self.destroyed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_stats_all_methods() {
        let mut stats = NoopStats;

        for _ in 0..100 {
            stats.record_grain_processed();
            stats.record_grain_moved();
            stats.record_transition();
            stats.record_destroyed();
        }
    }

    #[test]
    fn test_frame_stats_counts() {
        let mut stats = FrameStats::default();

        stats.record_grain_processed();
        stats.record_grain_processed();
        stats.record_grain_moved();
        stats.record_transition();
        stats.record_destroyed();
        stats.record_destroyed();
        stats.record_destroyed();

        assert_eq!(
            stats,
            FrameStats {
                processed: 2,
                moved: 1,
                transitions: 1,
                destroyed: 3,
            }
        );
    }

    #[test]
    fn test_frame_stats_reset_and_display() {
        let mut stats = FrameStats::default();
        stats.record_grain_moved();
        assert_eq!(
            stats.to_string(),
            "processed=0 moved=1 transitions=0 destroyed=0"
        );

        stats.reset();
        assert_eq!(stats, FrameStats::default());
    }
}
