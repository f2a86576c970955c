//! Bounded FIFO queue

use super::{random_len, OpError, OpOutcome, Structure, StructureKind, VALUE_RANGE};
use rand::Rng;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    items: VecDeque<i32>,
    capacity: usize,
}

impl Queue {
    pub fn new(capacity: usize) -> Self {
        Queue {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn enqueue(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        if self.items.len() >= self.capacity {
            return Err(OpError::Full {
                reason: "Queue is full",
                capacity: self.capacity,
            });
        }
        self.items.push_back(value);
        Ok(OpOutcome::new(format!("Enqueued {}", value)))
    }

    pub fn dequeue(&mut self) -> Result<OpOutcome, OpError> {
        let value = self.items.pop_front().ok_or(OpError::Empty {
            reason: "Queue is empty",
        })?;
        Ok(OpOutcome::new(format!("Dequeued {}", value)))
    }

    pub fn peek(&self) -> Result<OpOutcome, OpError> {
        let value = self.front().ok_or(OpError::Empty {
            reason: "Queue is empty",
        })?;
        Ok(OpOutcome::new(format!("Front is {}", value)))
    }

    pub fn front(&self) -> Option<i32> {
        self.items.front().copied()
    }

    pub fn rear(&self) -> Option<i32> {
        self.items.back().copied()
    }

    /// Front to rear
    pub fn items(&self) -> impl Iterator<Item = i32> + '_ {
        self.items.iter().copied()
    }
}

impl Structure for Queue {
    fn kind(&self) -> StructureKind {
        StructureKind::Queue
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = random_len(rng, self.capacity);
        self.items = (0..len).map(|_| rng.gen_range(VALUE_RANGE)).collect();
    }

    fn summary(&self) -> String {
        format!("{:?}", self.items().collect::<Vec<_>>())
    }
}
