use std::sync::{Arc, Condvar, Mutex};

use crate::config::{QueueConfig, FREQ_MAX, FREQ_MIN};
use crate::error::QueueError;
use crate::invariants::{
    debug_assert_bounded_len, debug_assert_empty_implies_head_eq_tail,
    debug_assert_idle_implies_empty, debug_assert_low_water_crossing,
};
use crate::key_sink::{KeySink, KeyState};
use crate::metrics::Metrics;
use crate::ring::RingStorage;
use crate::tone::Tone;

/// The three-valued result of [`ToneQueue::dequeue`] (`spec.md` §4.4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DequeueOutcome {
    /// A tone was dequeued and is carried in this variant.
    Dequeued(Tone),
    /// Nothing to return; the queue has *just* transitioned to empty. The
    /// consumer should flush its synthesizer tail state exactly once.
    Emptied,
    /// Nothing to return; the queue was already drained before this call.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Automaton {
    Idle,
    Busy,
}

impl Automaton {
    fn is_idle(self) -> bool {
        matches!(self, Automaton::Idle)
    }
}

struct Inner {
    storage: RingStorage,
    capacity: usize,
    high_water_mark: usize,
    head: usize,
    tail: usize,
    len: usize,
    automaton: Automaton,
    low_water_mark: usize,
    low_water_callback: Option<Arc<dyn Fn() + Send + Sync>>,
    key_sink: Option<KeySink>,
    /// The cancellation gate: whether the consumer can currently deliver a
    /// wake to a waiter (`spec.md` §5). Flipped by [`ConsumerGuard`].
    consumer_can_wake: bool,
    metrics: Metrics,
}

impl Inner {
    fn new(config: QueueConfig) -> Self {
        Self {
            storage: RingStorage::new(),
            capacity: config.capacity,
            high_water_mark: config.high_water_mark,
            head: 0,
            tail: 0,
            len: 0,
            automaton: Automaton::Idle,
            low_water_mark: 0,
            low_water_callback: None,
            key_sink: None,
            // Closed until a consumer actually takes a `ConsumerGuard`
            // (`spec.md` §5): a wait called before any consumer has started
            // must short-circuit with `WouldDeadlock`, not block forever.
            consumer_can_wake: false,
            metrics: Metrics::default(),
        }
    }

    fn notify_key_sink(&self, state: KeyState) {
        if let Some(sink) = &self.key_sink {
            sink(state);
        }
    }
}

struct Shared {
    inner: Mutex<Inner>,
    condvar: Condvar,
}

/// A bounded, blocking FIFO tone queue sitting between a Morse producer and
/// the single audio-rendering consumer.
///
/// Cheap to clone: each clone shares the same underlying buffer and
/// synchronization primitives via an internal `Arc`.
pub struct ToneQueue {
    shared: Arc<Shared>,
}

impl Clone for ToneQueue {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl ToneQueue {
    /// Creates a new, empty queue with the given configuration.
    #[must_use]
    pub fn new(config: QueueConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::new(config)),
                condvar: Condvar::new(),
            }),
        }
    }

    /// Registers the calling thread as the consumer for the lifetime of the
    /// returned guard, opening the cancellation gate. Drop the guard (or let
    /// it fall out of scope) when the consumer thread is torn down; this
    /// closes the gate and wakes any waiters so they observe
    /// [`QueueError::WouldDeadlock`] instead of hanging forever
    /// (`spec.md` §5, "cancellation gate").
    #[must_use]
    pub fn consumer_guard(&self) -> ConsumerGuard {
        {
            let mut inner = self.lock();
            inner.consumer_can_wake = true;
        }
        ConsumerGuard {
            shared: Arc::clone(&self.shared),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    // -------------------------------------------------------------------
    // §4.2 Configuration
    // -------------------------------------------------------------------

    /// Reconfigures capacity and high-water mark. Per `spec.md` §4.2,
    /// resizing a non-empty queue is not supported by this design; callers
    /// configure before enqueueing. `head`, `tail`, and `len` are left
    /// untouched on success.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Invalid`] if either value is zero, either
    /// exceeds its maximum, or `high_water_mark > capacity`.
    pub fn set_capacity(&self, capacity: usize, high_water_mark: usize) -> Result<(), QueueError> {
        let config = QueueConfig::new(capacity, high_water_mark)?;
        let mut inner = self.lock();
        inner.capacity = config.capacity;
        inner.high_water_mark = config.high_water_mark;
        Ok(())
    }

    /// Registers (or clears, with `callback = None`) the low-water
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Invalid`] if `level >= capacity`.
    pub fn register_low_water_callback<F>(
        &self,
        level: usize,
        callback: Option<F>,
    ) -> Result<(), QueueError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        if level >= inner.capacity {
            return Err(QueueError::Invalid {
                reason: "low-water level must be < capacity",
            });
        }
        inner.low_water_mark = level;
        inner.low_water_callback = callback.map(|f| Arc::new(f) as Arc<dyn Fn() + Send + Sync>);
        Ok(())
    }

    /// Registers (or clears) the downstream key-state observer
    /// (`spec.md` §3 `key_sink`).
    pub fn set_key_sink(&self, sink: Option<KeySink>) {
        let mut inner = self.lock();
        inner.key_sink = sink;
    }

    // -------------------------------------------------------------------
    // §4.3 Enqueue
    // -------------------------------------------------------------------

    /// Enqueues a tone. See `spec.md` §4.3 for the exact precondition order.
    ///
    /// # Errors
    ///
    /// - [`QueueError::Invalid`] if the frequency is outside
    ///   `[FREQ_MIN, FREQ_MAX]` or the duration is negative.
    /// - [`QueueError::BusyFull`] if the queue is at capacity.
    ///
    /// A zero-duration tone is accepted and silently dropped (`Ok(())`,
    /// nothing stored) — this is the "degenerate success" case of
    /// `spec.md` §7.
    pub fn enqueue(&self, tone: Tone) -> Result<(), QueueError> {
        if tone.frequency_hz < FREQ_MIN || tone.frequency_hz > FREQ_MAX {
            self.lock().metrics.invalid_rejections += 1;
            return Err(QueueError::Invalid {
                reason: "frequency out of range",
            });
        }
        if tone.duration_us < 0 {
            self.lock().metrics.invalid_rejections += 1;
            return Err(QueueError::Invalid {
                reason: "duration must not be negative",
            });
        }
        if tone.duration_us == 0 {
            tracing::trace!("dropping zero-duration tone");
            return Ok(());
        }

        let mut inner = self.lock();
        if inner.len == inner.capacity {
            inner.metrics.busy_full_rejections += 1;
            tracing::debug!(capacity = inner.capacity, "enqueue rejected: queue full");
            return Err(QueueError::BusyFull);
        }

        let tail = inner.tail;
        let capacity = inner.capacity;
        inner.storage.set(tail, tone);
        inner.tail = RingStorage::next(tail, capacity);
        inner.len += 1;
        inner.metrics.tones_enqueued += 1;
        debug_assert_bounded_len!(inner.len, inner.capacity);

        if inner.automaton.is_idle() {
            inner.automaton = Automaton::Busy;
            // Wake the consumer on the IDLE -> BUSY edge before releasing
            // the lock, so it cannot observe Busy && len > 0 without being
            // woken (`spec.md` §4.3 step 6).
            self.shared.condvar.notify_all();
            tracing::debug!("queue transitioned Idle -> Busy");
        }

        Ok(())
    }

    // -------------------------------------------------------------------
    // §4.4 Dequeue
    // -------------------------------------------------------------------

    /// Dequeues the next tone, or reports the queue's empty/idle transition.
    /// Consumer-side only; see `spec.md` §4.4 for the full algorithm,
    /// including forever-tone stickiness and low-water dispatch.
    pub fn dequeue(&self) -> DequeueOutcome {
        let callback;
        let outcome;

        {
            let mut inner = self.lock();

            if inner.automaton.is_idle() {
                return DequeueOutcome::Idle;
            }

            if inner.len == 0 {
                inner.automaton = Automaton::Idle;
                debug_assert_idle_implies_empty!(inner.automaton, inner.len);
                debug_assert_empty_implies_head_eq_tail!(inner.len, inner.head, inner.tail);
                inner.notify_key_sink(KeyState::Open);
                tracing::debug!("queue transitioned Busy -> Idle");
                self.shared.condvar.notify_all();
                return DequeueOutcome::Emptied;
            }

            let head = inner.head;
            let capacity = inner.capacity;
            let tone = inner.storage.get(head);

            if tone.is_forever && inner.len == 1 {
                // Sticky forever tone: re-deliver without advancing head,
                // decrementing len, or evaluating low-water (`spec.md`
                // §4.4, invariant 4).
                inner.notify_key_sink(KeyState::from_frequency_hz(tone.frequency_hz));
                inner.metrics.tones_dequeued += 1;
                callback = None;
                outcome = DequeueOutcome::Dequeued(tone);
            } else {
                let len_before = inner.len;
                inner.head = RingStorage::next(head, capacity);
                inner.len -= 1;
                debug_assert_bounded_len!(inner.len, inner.capacity);
                if inner.len == 0 {
                    debug_assert_empty_implies_head_eq_tail!(inner.len, inner.head, inner.tail);
                }

                let mark = inner.low_water_mark;
                let should_callback = inner.low_water_callback.is_some()
                    && len_before > mark
                    && inner.len <= mark;
                debug_assert_low_water_crossing!(should_callback, len_before, inner.len, mark);

                inner.notify_key_sink(KeyState::from_frequency_hz(tone.frequency_hz));
                inner.metrics.tones_dequeued += 1;

                callback = if should_callback {
                    inner.metrics.low_water_fires += 1;
                    inner.low_water_callback.clone()
                } else {
                    None
                };
                outcome = DequeueOutcome::Dequeued(tone);
            }

            self.shared.condvar.notify_all();
        }

        // The callback is invoked strictly after the lock is released: it
        // may re-enter the queue's API, notably `enqueue` (`spec.md` §4.4,
        // §9 "callback under/out of lock").
        if let Some(f) = callback {
            tracing::trace!("low-water callback firing");
            f();
        }

        outcome
    }

    // -------------------------------------------------------------------
    // §4.5 Length, capacity, fullness
    // -------------------------------------------------------------------

    /// Current number of resident tones.
    #[must_use]
    pub fn length(&self) -> usize {
        self.lock().len
    }

    /// Configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// `true` if the queue is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        let inner = self.lock();
        inner.len == inner.capacity
    }

    /// `true` if the automaton is not `Idle`.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.lock().automaton.is_idle()
    }

    /// A snapshot of the queue's activity counters.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.lock().metrics
    }

    // -------------------------------------------------------------------
    // §4.6 Flush and reset
    // -------------------------------------------------------------------

    /// Discards all resident tones and forces the automaton to `Idle`.
    ///
    /// Per `spec.md` §4.6 and §9 ("ambiguous source behaviours"), the
    /// post-flush wait for the consumer to observe `Idle` is itself gated
    /// on the cancellation gate, not unconditional: if the gate is closed
    /// (no live consumer), `flush` returns immediately without waiting.
    pub fn flush(&self) {
        let can_wait = {
            let mut inner = self.lock();
            inner.len = 0;
            inner.head = inner.tail;
            inner.automaton = Automaton::Idle;
            tracing::debug!("queue flushed");
            inner.consumer_can_wake
        };
        if can_wait {
            let _ = self.wait_for_empty();
        }
    }

    /// As [`ToneQueue::flush`], but also clears the low-water callback
    /// registration. Never waits.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.len = 0;
        inner.head = inner.tail;
        inner.automaton = Automaton::Idle;
        inner.low_water_callback = None;
        inner.low_water_mark = 0;
        tracing::debug!("queue reset");
    }

    // -------------------------------------------------------------------
    // §4.7 Backspace
    // -------------------------------------------------------------------

    /// Removes the trailing character's tones, in place, but only if the
    /// entire character is still resident — i.e. its `is_first` tone has
    /// not yet been dequeued. A no-op otherwise (`spec.md` §4.7).
    pub fn backspace(&self) {
        let mut inner = self.lock();
        if inner.len == 0 {
            return;
        }

        let capacity = inner.capacity;
        let mut walk = RingStorage::prev(inner.tail, capacity);
        let mut working_len = inner.len;

        loop {
            // `walk` is the slot we are about to fold out of the queue, so
            // it no longer counts toward the resulting length even if it
            // turns out to be the character's first tone.
            working_len -= 1;
            let is_first = inner.storage.get(walk).is_first;
            if is_first {
                inner.tail = walk;
                inner.len = working_len;
                inner.metrics.backspaces_applied += 1;
                tracing::trace!(new_len = inner.len, "backspace removed a character");
                return;
            }
            if working_len == 0 {
                inner.metrics.backspaces_blocked += 1;
                tracing::trace!("backspace is a no-op: character partially dequeued");
                return;
            }
            walk = RingStorage::prev(walk, capacity);
        }
    }

    // -------------------------------------------------------------------
    // §4.8 Wait primitives
    // -------------------------------------------------------------------

    /// Blocks until `head` has advanced since this call began, or the
    /// automaton becomes `Idle`, whichever first.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::WouldDeadlock`] if the cancellation gate is
    /// closed before the predicate is already satisfied.
    pub fn wait_for_tone(&self) -> Result<(), QueueError> {
        let mut inner = self.lock();
        let start_head = inner.head;
        loop {
            if inner.head != start_head || inner.automaton.is_idle() {
                return Ok(());
            }
            if !inner.consumer_can_wake {
                return Err(QueueError::WouldDeadlock);
            }
            inner = self
                .shared
                .condvar
                .wait(inner)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
    }

    /// Blocks until the automaton becomes `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::WouldDeadlock`] if the cancellation gate is
    /// closed before the predicate is already satisfied.
    pub fn wait_for_empty(&self) -> Result<(), QueueError> {
        let mut inner = self.lock();
        loop {
            if inner.automaton.is_idle() {
                return Ok(());
            }
            if !inner.consumer_can_wake {
                return Err(QueueError::WouldDeadlock);
            }
            inner = self
                .shared
                .condvar
                .wait(inner)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
    }

    /// Blocks until `length() <= level`. Returns immediately if already
    /// true on entry.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::WouldDeadlock`] if the cancellation gate is
    /// closed before the predicate is already satisfied.
    pub fn wait_for_level(&self, level: usize) -> Result<(), QueueError> {
        let mut inner = self.lock();
        loop {
            if inner.len <= level {
                return Ok(());
            }
            if !inner.consumer_can_wake {
                return Err(QueueError::WouldDeadlock);
            }
            inner = self
                .shared
                .condvar
                .wait(inner)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
    }
}

/// RAII handle held by the consumer thread for as long as it is able to
/// service wakes. Dropping it closes the cancellation gate and wakes any
/// waiters so they observe [`QueueError::WouldDeadlock`] rather than block
/// forever (`spec.md` §5, §9).
pub struct ConsumerGuard {
    shared: Arc<Shared>,
}

impl Drop for ConsumerGuard {
    fn drop(&mut self) {
        {
            let mut inner = self
                .shared
                .inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            inner.consumer_can_wake = false;
        }
        self.shared.condvar.notify_all();
    }
}
