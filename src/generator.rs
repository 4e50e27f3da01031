//! Synthetic light offset frames
//!
//! Emits `/light/offset` with one random value in `[0, 1)` per axis per
//! light, every frame. Useful for exercising a downstream lighting rig
//! without a capture log.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::replay::{FramePacer, FrameSource, ReplayStats, ShutdownSignal};
use crate::transport::Transport;
use crate::types::Record;

/// OSC address for light offsets
pub const LIGHT_OFFSET_ADDRESS: &str = "/light/offset";

/// Number of lights in the rig
pub const LIGHT_COUNT: usize = 16;

/// Offset axes per light (tilt x/y)
pub const AXES_PER_LIGHT: usize = 2;

/// Default destination port for the generator
pub const DEFAULT_LIGHT_OFFSET_PORT: u16 = 57120;

/// Random `/light/offset` frame source
#[derive(Debug, Clone)]
pub struct LightOffsetGenerator<R = StdRng> {
    rng: R,
    frame: Record,
}

impl LightOffsetGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for LightOffsetGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LightOffsetGenerator<R> {
    /// Generator drawing from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            frame: Record::new(LIGHT_OFFSET_ADDRESS, vec![0.0; LIGHT_COUNT * AXES_PER_LIGHT]),
        }
    }
}

impl<R: Rng> FrameSource for LightOffsetGenerator<R> {
    fn next_frame(&mut self) -> &Record {
        for value in self.frame.payload.iter_mut() {
            *value = self.rng.gen::<f64>();
        }
        &self.frame
    }
}

/// Send random light offsets at `fps` until `shutdown` fires
pub fn run_light_offsets<T>(
    transport: &mut T,
    fps: f64,
    shutdown: &ShutdownSignal,
) -> Result<ReplayStats>
where
    T: Transport + ?Sized,
{
    let mut pacer = FramePacer::new(fps)?;
    let mut generator = LightOffsetGenerator::new();

    tracing::info!("Sending {} at {} fps", LIGHT_OFFSET_ADDRESS, fps);
    pacer.run(&mut generator, transport, shutdown)?;

    let stats = pacer.stats().clone();
    tracing::info!(
        "Light offset test stopped after {} frames ({:.2} fps effective)",
        stats.frames_sent,
        stats.effective_fps()
    );
    Ok(stats)
}
