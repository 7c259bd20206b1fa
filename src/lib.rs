//! tonequeue-rs — the bounded, blocking tone queue at the heart of a
//! Morse-code audio library.
//!
//! The queue sits between producer code (emitting logical Morse elements —
//! dots, dashes, inter-element and inter-word gaps, arbitrary tones) and a
//! single consumer, the audio generator, which pulls individual tones and
//! renders PCM samples to an audio sink. It preserves strict FIFO order,
//! provides bounded-capacity backpressure, wakes a blocked generator the
//! instant work appears, exposes a low-water-mark notification so clients
//! can refill before underrun, and supports a distinguished "forever" tone
//! whose duration is determined by the arrival of a successor rather than
//! by its own length. It also supports an atomic, in-place "backspace" that
//! removes exactly the trailing character's worth of tones, but only if the
//! entire character is still resident.
//!
//! Sample synthesis, audio back-ends, the iambic keyer, the character
//! table, the receive/decode path, and the public API veneer are out of
//! scope for this crate — it models only the interfaces it consumes or
//! exposes to those collaborators.
//!
//! # Example
//!
//! ```
//! use tonequeue_rs::{DequeueOutcome, QueueConfig, Slope, Tone, ToneQueue};
//!
//! let queue = ToneQueue::new(QueueConfig::new(30, 26).unwrap());
//! let _consumer = queue.consumer_guard();
//!
//! queue.enqueue(Tone::new(60_000, 600, Slope::RaisedCosine)).unwrap();
//! match queue.dequeue() {
//!     DequeueOutcome::Dequeued(tone) => assert_eq!(tone.frequency_hz, 600),
//!     _ => unreachable!(),
//! }
//! ```

mod config;
mod error;
mod invariants;
mod key_sink;
mod metrics;
mod queue;
mod ring;
mod tone;

pub use config::{
    QueueConfig, CAPACITY_MAX, CONTEST_CONFIG, FREQ_MAX, FREQ_MIN, HIGH_WATER_MARK_MAX,
    PRACTICE_CONFIG,
};
pub use error::QueueError;
pub use key_sink::{KeySink, KeyState};
pub use metrics::Metrics;
pub use queue::{ConsumerGuard, DequeueOutcome, ToneQueue};
pub use tone::{Slope, Tone};
