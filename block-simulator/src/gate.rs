use std::sync::atomic::{AtomicBool, Ordering};

/// Single-slot guard allowing at most one block simulation in flight
///
/// Acquisition is a non-blocking compare-and-set: contenders that find the
/// slot taken are turned away immediately instead of queueing.
#[derive(Debug, Default)]
pub struct ProcessingGate {
    busy: AtomicBool,
}

impl ProcessingGate {
    /// Creates a gate in the free state
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Attempt to take the slot
    ///
    /// # Returns
    ///
    /// * `Some(GatePermit)` - The slot is now held until the permit is dropped
    /// * `None` - Another caller already holds the slot
    pub fn try_acquire(&self) -> Option<GatePermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GatePermit { gate: self })
    }

    /// Whether the slot is currently held
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of holding the gate; releases it on drop
#[derive(Debug)]
pub struct GatePermit<'a> {
    gate: &'a ProcessingGate,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
