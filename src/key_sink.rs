use std::sync::Arc;

/// Binary level delivered to a [`KeySink`] on each dequeue cycle: `Closed`
/// when the dequeued tone is a mark (non-zero frequency), `Open` when it is
/// a space. Named after the keying line a real CW rig drives, in the spirit
/// of `PttState` in `iu3qez-RemoteCWKeyer-esp32`'s `audio::ptt` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Key up / sound off.
    Open,
    /// Key down / sound on.
    Closed,
}

impl KeyState {
    /// Derives the key state from a tone's frequency, per `spec.md` §3:
    /// "non-zero ⇒ closed, zero ⇒ open".
    #[must_use]
    pub fn from_frequency_hz(frequency_hz: i32) -> Self {
        if frequency_hz == 0 {
            KeyState::Open
        } else {
            KeyState::Closed
        }
    }
}

/// A downstream observer notified with the binary key state derived from
/// each dequeued tone's frequency (`spec.md` §3 `key_sink`, §4.4).
///
/// Implemented as a type alias over a shared closure rather than a trait:
/// the queue only ever needs to call it, never to downcast or enumerate
/// implementors, so a `Fn` is the idiomatic fit.
pub type KeySink = Arc<dyn Fn(KeyState) + Send + Sync>;
