/// Counted completion barrier.
///
/// Created with the number of outstanding operations. Every completion calls
/// [`CompletionBarrier::arrive`], which returns `true` for exactly one call:
/// the one that brings the count to zero. Arrivals after that are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionBarrier {
    expected: usize,
    arrived: usize,
}

impl CompletionBarrier {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            arrived: 0,
        }
    }

    /// Records one completion. Returns `true` only when this was the last one.
    pub fn arrive(&mut self) -> bool {
        if self.arrived >= self.expected {
            return false;
        }
        self.arrived += 1;
        self.arrived == self.expected
    }

    pub fn remaining(&self) -> usize {
        self.expected - self.arrived
    }

    pub fn is_released(&self) -> bool {
        self.arrived == self.expected
    }
}
