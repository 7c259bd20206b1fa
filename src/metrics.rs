/// Point-in-time counters for monitoring queue activity.
///
/// A plain `Copy` struct of counters, updated under the same lock as the
/// queue state (so no separate atomics are needed) and handed out by value
/// via [`ToneQueue::metrics`](crate::ToneQueue::metrics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Tones successfully admitted to the buffer (excludes dropped
    /// zero-duration tones and rejected full/invalid enqueues).
    pub tones_enqueued: u64,
    /// Tones handed to the consumer via `dequeue` (a sticky forever-tone
    /// re-delivery counts each time it is re-dequeued).
    pub tones_dequeued: u64,
    /// `enqueue` calls rejected because the queue was at capacity.
    pub busy_full_rejections: u64,
    /// `enqueue` calls rejected for an out-of-range frequency or duration.
    pub invalid_rejections: u64,
    /// Low-water callback invocations.
    pub low_water_fires: u64,
    /// Successful `backspace` calls that removed a resident character.
    pub backspaces_applied: u64,
    /// `backspace` calls that were a no-op (character already partially
    /// dequeued).
    pub backspaces_blocked: u64,
}
