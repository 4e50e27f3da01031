//! Replay statistics
//!
//! Tracks send counts, timing, and overruns for a replay session.

use std::collections::VecDeque;
use std::time::Duration;

/// Size of the rolling window for recent send times
const RECENT_WINDOW_SIZE: usize = 100;

/// Statistics for a replay session
#[derive(Debug, Clone)]
pub struct ReplayStats {
    /// Total frames handed to the transport successfully
    pub frames_sent: u64,
    /// Full passes over the record sequence
    pub cycles_completed: u64,
    /// Frames whose send took at least one full period (no sleep followed)
    pub overruns: u64,
    /// Total send time in microseconds
    pub total_send_time_us: u64,
    /// Last send time in microseconds
    pub last_send_time_us: u64,
    /// Minimum send time observed (microseconds)
    pub min_send_time_us: u64,
    /// Maximum send time observed (microseconds)
    pub max_send_time_us: u64,
    /// Rolling window of recent send times for jitter calculation
    pub recent_send_times: VecDeque<u64>,
    /// Wall-clock time the loop ran for
    pub elapsed: Duration,
}

impl Default for ReplayStats {
    fn default() -> Self {
        Self {
            frames_sent: 0,
            cycles_completed: 0,
            overruns: 0,
            total_send_time_us: 0,
            last_send_time_us: 0,
            min_send_time_us: u64::MAX,
            max_send_time_us: 0,
            recent_send_times: VecDeque::with_capacity(RECENT_WINDOW_SIZE),
            elapsed: Duration::ZERO,
        }
    }
}

impl ReplayStats {
    /// Record a completed send
    pub fn record_send(&mut self, send_time: Duration, overrun: bool) {
        let time_us = send_time.as_micros().min(u64::MAX as u128) as u64;

        self.frames_sent += 1;
        self.total_send_time_us = self.total_send_time_us.saturating_add(time_us);
        self.last_send_time_us = time_us;
        self.min_send_time_us = self.min_send_time_us.min(time_us);
        self.max_send_time_us = self.max_send_time_us.max(time_us);
        if overrun {
            self.overruns += 1;
        }

        self.recent_send_times.push_back(time_us);
        if self.recent_send_times.len() > RECENT_WINDOW_SIZE {
            self.recent_send_times.pop_front();
        }
    }

    /// Calculate average send time in microseconds
    pub fn avg_send_time_us(&self) -> f64 {
        if self.frames_sent == 0 {
            0.0
        } else {
            self.total_send_time_us as f64 / self.frames_sent as f64
        }
    }

    /// Calculate jitter (max - min) over recent window in microseconds
    pub fn jitter_us(&self) -> u64 {
        let min = self.recent_send_times.iter().min().copied().unwrap_or(0);
        let max = self.recent_send_times.iter().max().copied().unwrap_or(0);
        max.saturating_sub(min)
    }

    /// Achieved frames per second over the whole session
    pub fn effective_fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            0.0
        } else {
            self.frames_sent as f64 / secs
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_send() {
        let mut stats = ReplayStats::default();
        stats.record_send(Duration::from_micros(100), false);
        stats.record_send(Duration::from_micros(300), true);

        assert_eq!(stats.frames_sent, 2);
        assert_eq!(stats.overruns, 1);
        assert_eq!(stats.min_send_time_us, 100);
        assert_eq!(stats.max_send_time_us, 300);
        assert_eq!(stats.last_send_time_us, 300);
        assert_eq!(stats.avg_send_time_us(), 200.0);
        assert_eq!(stats.jitter_us(), 200);
    }

    #[test]
    fn test_rolling_window_is_bounded() {
        let mut stats = ReplayStats::default();
        for i in 0..(RECENT_WINDOW_SIZE as u64 + 50) {
            stats.record_send(Duration::from_micros(i), false);
        }
        assert_eq!(stats.recent_send_times.len(), RECENT_WINDOW_SIZE);
        assert_eq!(stats.recent_send_times.front().copied(), Some(50));
    }

    #[test]
    fn test_effective_fps() {
        let mut stats = ReplayStats::default();
        assert_eq!(stats.effective_fps(), 0.0);

        for _ in 0..28 {
            stats.record_send(Duration::ZERO, false);
        }
        stats.elapsed = Duration::from_secs(2);
        assert_eq!(stats.effective_fps(), 14.0);

        stats.reset();
        assert_eq!(stats.frames_sent, 0);
        assert_eq!(stats.min_send_time_us, u64::MAX);
    }
}
