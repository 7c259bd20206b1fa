use thiserror::Error;

/// Error kinds returned by [`ToneQueue`](crate::ToneQueue) operations.
///
/// Mirrors `spec.md` §7: `SUCCESS` is not a variant here — it is the `Ok`
/// path (including the degenerate "zero-duration tone dropped" case, which
/// is `Ok(())`, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// An argument was out of range: frequency, duration, capacity,
    /// high-water mark, or callback level.
    #[error("invalid argument: {reason}")]
    Invalid {
        /// Human-readable reason, stable across calls for a given
        /// violation but not part of any parsing contract.
        reason: &'static str,
    },
    /// Enqueue was attempted on a full queue. Distinct from `Invalid`
    /// because the tone itself was well-formed; the producer should retry.
    #[error("queue is at capacity; retry enqueue later")]
    BusyFull,
    /// A wait was requested while the cancellation gate was closed, i.e.
    /// the consumer cannot currently deliver a wake to this thread.
    #[error("wait would deadlock: consumer cannot currently wake this thread")]
    WouldDeadlock,
}
