//! Per-scope accumulator stack shared by both counters.

/// Stack of integer accumulators, one per currently-open logical unit.
///
/// The depth must stay in lock-step with the traversal's unit nesting:
/// `open` and `close` are called exactly once per unit, in strict LIFO
/// order. A close without a matching open is a traversal-driver bug, not a
/// recoverable condition, and panics.
#[derive(Debug, Default)]
pub struct ScopeStack {
    counters: Vec<u32>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a fresh zero-valued accumulator.
    pub fn open(&mut self) {
        self.counters.push(0);
    }

    /// Pops the innermost accumulator and returns its final value.
    pub fn close(&mut self) -> u32 {
        self.counters
            .pop()
            .expect("scope close without matching open; traversal out of sync")
    }

    /// Adds to the innermost accumulator; no-op when no scope is open.
    pub fn add(&mut self, amount: u32) {
        if let Some(top) = self.counters.last_mut() {
            *top += amount;
        }
    }

    pub fn depth(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
