//! Bounded LIFO stack

use super::{random_len, OpError, OpOutcome, Structure, StructureKind, VALUE_RANGE};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    items: Vec<i32>,
    capacity: usize,
}

impl Stack {
    pub fn new(capacity: usize) -> Self {
        Stack {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        if self.items.len() >= self.capacity {
            return Err(OpError::Full {
                reason: "Stack Overflow",
                capacity: self.capacity,
            });
        }
        self.items.push(value);
        Ok(OpOutcome::new(format!("Pushed {}", value)))
    }

    pub fn pop(&mut self) -> Result<OpOutcome, OpError> {
        let value = self.items.pop().ok_or(OpError::Empty {
            reason: "Stack Underflow",
        })?;
        Ok(OpOutcome::new(format!("Popped {}", value)))
    }

    pub fn peek(&self) -> Result<OpOutcome, OpError> {
        let value = self.top().ok_or(OpError::Empty {
            reason: "Stack is empty",
        })?;
        Ok(OpOutcome::new(format!("Top is {}", value)))
    }

    pub fn top(&self) -> Option<i32> {
        self.items.last().copied()
    }

    /// Bottom to top
    pub fn items(&self) -> &[i32] {
        &self.items
    }
}

impl Structure for Stack {
    fn kind(&self) -> StructureKind {
        StructureKind::Stack
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
        format!("{:?}", self.items)
    }
}
