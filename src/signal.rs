use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot stop flag shared by the workers, the range feeder and the
/// Ctrl-C handler. Raising it is permanent for the process lifetime; there
/// is no reset.
///
/// `raise` reports whether the caller was the one that flipped the flag, so
/// the first finder can use it as the mutual-exclusion gate around the
/// report path while later raises stay harmless no-ops.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    raised: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking poll of the flag.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Raise the signal. Returns true for exactly one caller ever, false
    /// for every other; never panics, no matter how often it is called.
    pub fn raise(&self) -> bool {
        !self.raised.swap(true, Ordering::SeqCst)
    }
}
