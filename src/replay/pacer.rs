//! Fixed-rate frame pacing
//!
//! [`FramePacer`] drives a [`FrameSource`] into a [`Transport`] at a target
//! frame rate. Per frame it:
//!
//! 1. notes the start time,
//! 2. sends the next record (synchronously),
//! 3. sleeps for `period - send_time` if that is positive.
//!
//! A send that overruns the period is followed immediately by the next one.
//! Lost time is never made up with a burst, so the average rate degrades
//! instead of overshooting.
//!
//! The stop signal is checked once per frame and wakes the sleep early. A
//! send that never returns blocks the loop; there is no transmit timeout.

use std::time::{Duration, Instant};

use super::shutdown::ShutdownSignal;
use super::stats::ReplayStats;
use crate::error::{ReplayError, Result, ResultExt};
use crate::transport::Transport;
use crate::types::Record;

/// How often throughput is logged while running
const REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Replay state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// Sending frames
    Running,
    /// Terminal: cancelled or failed
    Stopped,
}

impl ReplayState {
    /// Check if currently running
    pub fn is_running(&self) -> bool {
        matches!(self, ReplayState::Running)
    }

    /// Display name for the state
    pub fn display_name(&self) -> &'static str {
        match self {
            ReplayState::Running => "Running",
            ReplayState::Stopped => "Stopped",
        }
    }
}

/// Supplies the record for each frame
pub trait FrameSource {
    /// Record to send for the next frame
    fn next_frame(&mut self) -> &Record;

    /// Completed passes over the underlying data, if it is cyclic
    fn cycles_completed(&self) -> u64 {
        0
    }
}

/// Convert a frame rate into a period, rejecting non-finite or non-positive rates
pub fn frame_period(fps: f64) -> Result<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(ReplayError::InvalidFrameRate(fps));
    }
    Duration::try_from_secs_f64(1.0 / fps).map_err(|_| ReplayError::InvalidFrameRate(fps))
}

/// Drift-compensated fixed-rate loop
#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    state: ReplayState,
    stats: ReplayStats,
}

impl FramePacer {
    /// Create a pacer for `fps` frames per second
    pub fn new(fps: f64) -> Result<Self> {
        Ok(Self::with_period(frame_period(fps)?))
    }

    /// Create a pacer with an explicit period
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            state: ReplayState::Stopped,
            stats: ReplayStats::default(),
        }
    }

    /// Target time per frame
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Current state
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Statistics for the last (or current) run
    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Time to sleep after a send that took `send_time`
    ///
    /// Zero when the send used up the whole period.
    pub fn sleep_after(&self, send_time: Duration) -> Duration {
        self.period.saturating_sub(send_time)
    }

    /// Run until `shutdown` is triggered or a send fails
    ///
    /// Returns `Ok(())` on cancellation. A transport error stops the loop
    /// and is returned as-is, with the failing address as context.
    pub fn run<S, T>(
        &mut self,
        source: &mut S,
        transport: &mut T,
        shutdown: &ShutdownSignal,
    ) -> Result<()>
    where
        S: FrameSource + ?Sized,
        T: Transport + ?Sized,
    {
        self.stats.reset();
        self.state = ReplayState::Running;

        let started = Instant::now();
        let mut last_report = started;

        let result = loop {
            if shutdown.is_triggered() {
                break Ok(());
            }

            let t0 = Instant::now();
            let record = source.next_frame();
            if let Err(e) = transport
                .send(&record.address, &record.payload)
                .with_context(|| format!("Failed to send {}", record.address))
            {
                break Err(e);
            }
            let dt = t0.elapsed();

            let sleep = self.sleep_after(dt);
            self.stats.record_send(dt, sleep.is_zero());
            self.stats.cycles_completed = source.cycles_completed();

            if sleep.is_zero() {
                tracing::trace!(
                    "Frame overran period ({:?} >= {:?}), sending next immediately",
                    dt,
                    self.period
                );
            } else if shutdown.wait_timeout(sleep) {
                break Ok(());
            }

            if last_report.elapsed() >= REPORT_INTERVAL {
                self.stats.elapsed = started.elapsed();
                tracing::debug!(
                    "Sent {} frames ({:.2} fps, {} overruns, avg send {:.0}us)",
                    self.stats.frames_sent,
                    self.stats.effective_fps(),
                    self.stats.overruns,
                    self.stats.avg_send_time_us()
                );
                last_report = Instant::now();
            }
        };

        self.stats.elapsed = started.elapsed();
        self.state = ReplayState::Stopped;
        result
    }
}
