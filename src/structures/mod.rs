//! Live, user-mutated data structures
//!
//! Each structure is a plain value type: cloning it is a deep copy, which is
//! what the history tape stores after every committed operation.
//! - [`stack::Stack`]: bounded LIFO
//! - [`queue::Queue`]: bounded FIFO
//! - [`linked_list::LinkedList`]: singly or doubly linked nodes in an arena
//! - [`bst::Bst`]: binary search tree without duplicates
//! - [`graph::Graph`]: undirected graph with numbered vertices
//!
//! # Operations
//!
//! Every operation returns `Result<OpOutcome, OpError>`. A failed operation
//! leaves the structure untouched, so callers can run it on a scratch copy
//! or on the live value alike.
//!
//! # Capacity
//!
//! Capacities bound what a screen can show. Exceeding one is an ordinary
//! failed operation ("Stack Overflow", "Queue is full", ...).

pub mod bst;
pub mod graph;
pub mod linked_list;
pub mod queue;
pub mod stack;

use rand::Rng;
use std::ops::RangeInclusive;
use strum::{Display, EnumIter, EnumString};

/// Values the random generators draw from
pub const VALUE_RANGE: RangeInclusive<i32> = 1..=100;

/// Identity of a node or vertex, stable for its lifetime
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum StructureKind {
    Stack,
    Queue,
    #[strum(to_string = "linked-list", serialize = "list")]
    LinkedList,
    #[strum(to_string = "doubly-linked-list", serialize = "dll")]
    DoublyLinkedList,
    #[strum(to_string = "bst", serialize = "tree")]
    Bst,
    Graph,
}

impl StructureKind {
    pub fn title(self) -> &'static str {
        match self {
            StructureKind::Stack => "Stack",
            StructureKind::Queue => "Queue",
            StructureKind::LinkedList => "Linked List",
            StructureKind::DoublyLinkedList => "Doubly Linked List",
            StructureKind::Bst => "Binary Search Tree",
            StructureKind::Graph => "Graph",
        }
    }
}

/// Common surface of every live structure
pub trait Structure: Clone {
    fn kind(&self) -> StructureKind;

    /// Number of values, nodes or vertices
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&mut self);

    /// Replace the contents with random values from [`VALUE_RANGE`]
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// One-line rendering for logs and labels
    fn summary(&self) -> String;
}

/// Result of a successful operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpOutcome {
    pub message: String,
    /// Nodes visited, in order, for renderers to highlight
    pub path: Vec<NodeId>,
}

impl OpOutcome {
    pub fn new(message: impl Into<String>) -> Self {
        OpOutcome {
            message: message.into(),
            path: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: Vec<NodeId>) -> Self {
        self.path = path;
        self
    }
}

/// Why an operation was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("{reason}")]
    Full {
        reason: &'static str,
        capacity: usize,
    },

    #[error("{reason}")]
    Empty { reason: &'static str },

    #[error("Index {index} is out of range for size {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{value} was not found")]
    NotFound { value: i32 },

    #[error("{value} is already in the tree")]
    Duplicate { value: i32 },

    #[error("Vertex {id} does not exist")]
    NoSuchVertex { id: NodeId },

    #[error("Edge {a}-{b} already exists")]
    DuplicateEdge { a: NodeId, b: NodeId },

    #[error("Edge {a}-{b} does not exist")]
    NoSuchEdge { a: NodeId, b: NodeId },

    #[error("A vertex cannot be connected to itself")]
    SelfLoop,

    #[error("{operation} needs a doubly linked list")]
    Unsupported { operation: &'static str },
}

/// Random fill size for a structure of `capacity`, at least one
pub(crate) fn random_len<R: Rng + ?Sized>(rng: &mut R, capacity: usize) -> usize {
    let upper = capacity.clamp(1, 7);
    rng.gen_range(1..=upper).min(capacity)
}
