//! Rate-limited replay
//!
//! Sends every record of a [`RecordSequence`] in order, wrapping to the first
//! record after the last, forever, at a fixed frame rate. One record is one
//! frame.
//!
//! # Lifecycle
//!
//! A replay session is [`Running`](ReplayState::Running) from the moment
//! [`replay`] is called until either:
//!
//! - the [`ShutdownSignal`] fires (clean stop, returns `Ok(stats)`), or
//! - the transport reports an error (returns `Err`, nothing is retried).
//!
//! Both end in [`Stopped`](ReplayState::Stopped). Nothing survives the call.
//!
//! # Example
//!
//! ```ignore
//! use osc_replay::replay::{replay, shutdown_channel};
//!
//! let (handle, signal) = shutdown_channel();
//! ctrlc::set_handler(move || handle.trigger())?;
//! let stats = replay(&sequence, &mut transport, 14.0, &signal)?;
//! ```

pub mod pacer;
pub mod shutdown;
pub mod stats;

pub use pacer::{frame_period, FramePacer, FrameSource, ReplayState};
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownSignal};
pub use stats::ReplayStats;

use crate::error::Result;
use crate::transport::Transport;
use crate::types::{Record, RecordSequence};

/// Endless in-order traversal of a record sequence
#[derive(Debug, Clone)]
pub struct SequenceCursor<'a> {
    sequence: &'a RecordSequence,
    index: usize,
    cycles: u64,
}

impl<'a> SequenceCursor<'a> {
    /// Start at the first record
    pub fn new(sequence: &'a RecordSequence) -> Self {
        Self {
            sequence,
            index: 0,
            cycles: 0,
        }
    }

    /// Index of the record the next frame will send
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<'a> FrameSource for SequenceCursor<'a> {
    fn next_frame(&mut self) -> &Record {
        let sequence: &'a RecordSequence = self.sequence;
        let records = sequence.as_slice();
        let record = &records[self.index];

        self.index += 1;
        if self.index == records.len() {
            self.index = 0;
            self.cycles += 1;
        }
        record
    }

    fn cycles_completed(&self) -> u64 {
        self.cycles
    }
}

/// Replay `sequence` through `transport` at `fps` until `shutdown` fires
///
/// Fails immediately with [`InvalidFrameRate`](crate::ReplayError::InvalidFrameRate)
/// if `fps` is not a finite positive number.
pub fn replay<T>(
    sequence: &RecordSequence,
    transport: &mut T,
    fps: f64,
    shutdown: &ShutdownSignal,
) -> Result<ReplayStats>
where
    T: Transport + ?Sized,
{
    let mut pacer = FramePacer::new(fps)?;
    let mut cursor = SequenceCursor::new(sequence);

    tracing::info!(
        "Replaying {} records at {} fps (period {:?})",
        sequence.len(),
        fps,
        pacer.period()
    );

    let result = pacer.run(&mut cursor, transport, shutdown);
    let stats = pacer.stats().clone();

    match result {
        Ok(()) => {
            tracing::info!(
                "Replay stopped after {} frames, {} full cycles ({:.2} fps effective, {} overruns)",
                stats.frames_sent,
                stats.cycles_completed,
                stats.effective_fps(),
                stats.overruns
            );
            Ok(stats)
        }
        Err(e) => {
            tracing::error!(
                "Replay aborted after {} frames at record {}: {}",
                stats.frames_sent,
                cursor.position(),
                e
            );
            Err(e)
        }
    }
}
