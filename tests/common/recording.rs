//! Transports that record what they were asked to send

use osc_replay::{Record, Result, ShutdownHandle, Transport};
use std::time::{Duration, Instant};

/// One observed `send` call
#[derive(Debug, Clone)]
pub struct SendEvent {
    pub record: Record,
    pub started: Instant,
    pub finished: Instant,
}

/// Records every send, optionally delays some, and stops replay after a limit
pub struct RecordingTransport {
    pub events: Vec<SendEvent>,
    stop_after: usize,
    shutdown: ShutdownHandle,
    delays: Vec<(usize, Duration)>,
}

impl RecordingTransport {
    /// Trigger `shutdown` once `stop_after` sends have completed
    pub fn new(stop_after: usize, shutdown: ShutdownHandle) -> Self {
        Self {
            events: Vec::new(),
            stop_after,
            shutdown,
            delays: Vec::new(),
        }
    }

    /// Make the send with zero-based index `index` take at least `delay`
    pub fn delay_send(mut self, index: usize, delay: Duration) -> Self {
        self.delays.push((index, delay));
        self
    }

    pub fn addresses(&self) -> Vec<String> {
        self.events.iter().map(|e| e.record.address.clone()).collect()
    }

    /// Gaps between consecutive send start times
    pub fn start_intervals(&self) -> Vec<Duration> {
        self.events
            .windows(2)
            .map(|w| w[1].started.duration_since(w[0].started))
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, address: &str, payload: &[f64]) -> Result<()> {
        let started = Instant::now();
        let index = self.events.len();

        if let Some((_, delay)) = self.delays.iter().find(|(i, _)| *i == index) {
            std::thread::sleep(*delay);
        }

        self.events.push(SendEvent {
            record: Record::new(address, payload.to_vec()),
            started,
            finished: Instant::now(),
        });

        if self.events.len() >= self.stop_after {
            self.shutdown.trigger();
        }
        Ok(())
    }
}
