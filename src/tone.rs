/// Slope shape applied by the consumer when ramping a tone in and out.
///
/// The queue never synthesizes samples — it only carries this tag through to
/// whatever renders the tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    /// No ramp; the tone starts and stops abruptly.
    Rectangular,
    /// Raised-cosine ramp (the default for most CW sidetone generators).
    RaisedCosine,
    /// Linear ramp.
    Linear,
}

impl Default for Slope {
    fn default() -> Self {
        Slope::RaisedCosine
    }
}

/// A single element carried through the tone queue: a mark, a space, or an
/// arbitrary tone, expressed as a duration at a frequency.
///
/// `Tone` is immutable once constructed and `Copy`, so the queue can store it
/// by value in its ring buffer without per-slot heap ownership (`spec.md` §4.1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Duration in microseconds. Signed so that a negative input can be
    /// represented and rejected by `enqueue` (`spec.md` §4.3) rather than
    /// silently wrapping; the queue itself never stores a negative value.
    pub duration_us: i64,
    /// Frequency in hertz. Zero means "space" (sound off); non-zero means
    /// "mark" (sound on) for the purposes of `key_sink` notification.
    pub frequency_hz: i32,
    /// Envelope shape the consumer should apply.
    pub slope: Slope,
    /// Amplitude hint passed through to the consumer, 0-255. `None` means
    /// "use the generator's default".
    pub amplitude: Option<u8>,
    /// Marks a tone whose duration is indeterminate: the consumer keeps
    /// re-dequeuing (and re-rendering) the same tone until a successor is
    /// enqueued. See `spec.md` §4.4 and §9.
    pub is_forever: bool,
    /// Marks the first tone of a logical character. Consumed solely by
    /// `ToneQueue::backspace` to find the start of the trailing character.
    pub is_first: bool,
}

impl Tone {
    /// Creates a new tone. Performs no validation — frequency/duration range
    /// checking happens at `ToneQueue::enqueue`, not here, matching
    /// `spec.md`'s "accepted at the API surface" phrasing for the queue
    /// boundary specifically.
    #[must_use]
    pub fn new(duration_us: i64, frequency_hz: i32, slope: Slope) -> Self {
        Self {
            duration_us,
            frequency_hz,
            slope,
            amplitude: None,
            is_forever: false,
            is_first: false,
        }
    }

    /// Builder-style setter for `is_forever`.
    #[must_use]
    pub fn forever(mut self, is_forever: bool) -> Self {
        self.is_forever = is_forever;
        self
    }

    /// Builder-style setter for `is_first`.
    #[must_use]
    pub fn first(mut self, is_first: bool) -> Self {
        self.is_first = is_first;
        self
    }

    /// Builder-style setter for `amplitude`.
    #[must_use]
    pub fn amplitude(mut self, amplitude: u8) -> Self {
        self.amplitude = Some(amplitude);
        self
    }

    /// `true` if this tone should be rendered as key-down (sound on).
    #[must_use]
    pub fn is_mark(&self) -> bool {
        self.frequency_hz != 0
    }
}

/// A placeholder value used only to pre-size the ring's backing storage.
/// Never observed by a caller: every live slot is overwritten before `len`
/// admits it as readable.
pub(crate) const SILENT: Tone = Tone {
    duration_us: 0,
    frequency_hz: 0,
    slope: Slope::Rectangular,
    amplitude: None,
    is_forever: false,
    is_first: false,
};
