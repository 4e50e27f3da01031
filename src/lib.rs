//! # osc-replay: Fixed-rate OSC log replayer
//!
//! Replays recorded motion-capture OSC messages over UDP at a fixed frame
//! rate, looping until interrupted. Downstream consumers (lighting,
//! rendering) get deterministic, previously captured traffic without the
//! live source.
//!
//! ## Architecture
//!
//! - **Loader**: Extracts `ADDRESS(...)` / `FLOAT(...)` tokens from `RECEIVE`
//!   log lines into an in-memory [`RecordSequence`], skipping malformed lines
//! - **Replay**: A drift-compensated pacer that sends one record per frame,
//!   wrapping forever, until a [`ShutdownSignal`] fires
//! - **Transport**: The single `send(address, payload)` seam, with an OSC/UDP
//!   implementation
//! - **Generator**: Synthetic `/light/offset` frames through the same pacer
//!
//! ## Example
//!
//! ```ignore
//! use osc_replay::{load_entries_from_path, replay, shutdown_channel, OscUdpTransport};
//!
//! let sequence = load_entries_from_path("log.txt")?;
//! let mut transport = OscUdpTransport::new("127.0.0.1", 9000)?;
//! let (handle, signal) = shutdown_channel();
//! ctrlc::set_handler(move || handle.trigger())?;
//! replay(&sequence, &mut transport, 14.0, &signal)?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod replay;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::ReplayConfig;
pub use error::{ReplayError, Result, ResultExt};
pub use loader::{extract_record, load_entries, load_entries_from_path};
pub use replay::{replay, shutdown_channel, ReplayState, ReplayStats, ShutdownHandle, ShutdownSignal};
pub use transport::{OscUdpTransport, Transport};
pub use types::{Record, RecordSequence};
