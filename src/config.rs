use crate::error::QueueError;

/// Upper bound on `capacity`. Storage for the ring is pre-sized to this many
/// slots regardless of the configured `capacity`, so resizing a live queue
/// downward or upward within `[1, CAPACITY_MAX]` never reallocates.
pub const CAPACITY_MAX: usize = 1024;

/// Upper bound on `high_water_mark`. Equal to `CAPACITY_MAX` because the
/// high-water mark is only ever a validity ceiling on configuration, never a
/// live backpressure threshold (`spec.md` glossary).
pub const HIGH_WATER_MARK_MAX: usize = CAPACITY_MAX;

/// Minimum accepted tone frequency, in hertz. Zero is a valid "space".
pub const FREQ_MIN: i32 = 0;

/// Maximum accepted tone frequency, in hertz.
pub const FREQ_MAX: i32 = 10_000;

/// Validated `(capacity, high_water_mark)` pair used to configure a
/// [`ToneQueue`](crate::ToneQueue).
///
/// Construction returns a [`QueueError`] rather than panicking: a queue's
/// capacity can be reconfigured at runtime in response to caller-supplied
/// values, not only at program startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub(crate) capacity: usize,
    pub(crate) high_water_mark: usize,
}

impl QueueConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Invalid`] if either value is zero, if either
    /// exceeds its maximum, or if `high_water_mark > capacity`
    /// (`spec.md` §4.2).
    pub fn new(capacity: usize, high_water_mark: usize) -> Result<Self, QueueError> {
        if capacity == 0 || capacity > CAPACITY_MAX {
            return Err(QueueError::Invalid {
                reason: "capacity must be in [1, CAPACITY_MAX]",
            });
        }
        if high_water_mark == 0 || high_water_mark > HIGH_WATER_MARK_MAX {
            return Err(QueueError::Invalid {
                reason: "high_water_mark must be in [1, HIGH_WATER_MARK_MAX]",
            });
        }
        if high_water_mark > capacity {
            return Err(QueueError::Invalid {
                reason: "high_water_mark must not exceed capacity",
            });
        }
        Ok(Self {
            capacity,
            high_water_mark,
        })
    }

    /// The configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The configured high-water mark.
    #[must_use]
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }
}

impl Default for QueueConfig {
    /// 30 slots, high-water mark 26 — the capacity/high-water pair used by
    /// the fill-and-drain scenario in `spec.md` §8.
    fn default() -> Self {
        Self {
            capacity: 30,
            high_water_mark: 26,
        }
    }
}

/// A small queue suited to an interactive keyer: enough buffering to absorb
/// a burst of iambic paddle input without perceptible lag.
pub const PRACTICE_CONFIG: QueueConfig = QueueConfig {
    capacity: 30,
    high_water_mark: 26,
};

/// A deep queue suited to a contest logger feeding canned messages, where
/// long runs may be queued well ahead of playback.
pub const CONTEST_CONFIG: QueueConfig = QueueConfig {
    capacity: 256,
    high_water_mark: 224,
};
