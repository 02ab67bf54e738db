/// Player commands delivered by the shell between ticks.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Inputs recorded as they arrive and applied, in arrival order, during the
/// next tick's player phase.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<Input>,
}

impl InputQueue {
    pub fn push(&mut self, input: Input) {
        self.pending.push_back(input);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Input> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
