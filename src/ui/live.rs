//! One live structure session per screen
//!
//! [`LiveStructure`] wraps a [`MutationController`] for whichever structure
//! the user picked and maps operation keys onto structure operations.

use crate::config::LimitsConfig;
use crate::mutation::{Feedback, MutationController, OpMetrics};
use crate::structures::bst::{Bst, TraversalOrder};
use crate::structures::graph::Graph;
use crate::structures::linked_list::LinkedList;
use crate::structures::queue::Queue;
use crate::structures::stack::Stack;
use crate::structures::{NodeId, OpError, OpOutcome, Structure, StructureKind};
use crate::ui::panes::HistoryRow;
use rand::Rng;

pub enum LiveStructure {
    Stack(MutationController<Stack>),
    Queue(MutationController<Queue>),
    List(MutationController<LinkedList>),
    Bst(MutationController<Bst>),
    Graph(MutationController<Graph>),
}

/// What an operation key did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Applied,
    /// The key needs values typed first; carries a usage hint
    MissingArgs(&'static str),
    Unbound,
}

macro_rules! each {
    ($live:expr, $ctl:ident => $body:expr) => {
        match $live {
            LiveStructure::Stack($ctl) => $body,
            LiveStructure::Queue($ctl) => $body,
            LiveStructure::List($ctl) => $body,
            LiveStructure::Bst($ctl) => $body,
            LiveStructure::Graph($ctl) => $body,
        }
    };
}

impl LiveStructure {
    pub fn new(kind: StructureKind, limits: &LimitsConfig) -> Self {
        let cap = limits.capacity(kind);
        match kind {
            StructureKind::Stack => LiveStructure::Stack(session(Stack::new(cap), limits)),
            StructureKind::Queue => LiveStructure::Queue(session(Queue::new(cap), limits)),
            StructureKind::LinkedList => {
                LiveStructure::List(session(LinkedList::singly(cap), limits))
            }
            StructureKind::DoublyLinkedList => {
                LiveStructure::List(session(LinkedList::doubly(cap), limits))
            }
            StructureKind::Bst => LiveStructure::Bst(session(Bst::new(cap), limits)),
            StructureKind::Graph => LiveStructure::Graph(session(Graph::new(cap), limits)),
        }
    }

    pub fn kind(&self) -> StructureKind {
        each!(self, ctl => ctl.live_state().kind())
    }

    pub fn len_and_capacity(&self) -> (usize, usize) {
        each!(self, ctl => (ctl.live_state().len(), ctl.live_state().capacity()))
    }

    pub fn undo(&mut self) -> bool {
        each!(self, ctl => ctl.undo())
    }

    pub fn redo(&mut self) -> bool {
        each!(self, ctl => ctl.redo())
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        each!(self, ctl => {
            ctl.randomize(rng);
        })
    }

    pub fn clear(&mut self) {
        each!(self, ctl => {
            ctl.clear();
        })
    }

    pub fn reset(&mut self) {
        each!(self, ctl => ctl.reset())
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        each!(self, ctl => ctl.last_feedback())
    }

    pub fn metrics(&self) -> OpMetrics {
        each!(self, ctl => ctl.metrics())
    }

    pub fn last_path(&self) -> &[NodeId] {
        each!(self, ctl => ctl.last_path())
    }

    pub fn history_rows(&self) -> (Vec<HistoryRow>, usize) {
        each!(self, ctl => (HistoryRow::from_history(ctl.history()), ctl.history().cursor()))
    }

    /// Run the operation bound to `key` with the typed `args`
    pub fn perform(&mut self, key: char, args: &[i32]) -> KeyResult {
        let one = args.first().copied();
        let two = match args {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        };
        match self {
            LiveStructure::Stack(ctl) => match key {
                'p' => with(one, "Type a value, then p to push", |v| {
                    ctl.apply("push", |s| s.push(v));
                }),
                'o' => applied(ctl.apply("pop", |s| s.pop())),
                'k' => applied(ctl.inspect("peek", |s| s.peek())),
                _ => KeyResult::Unbound,
            },
            LiveStructure::Queue(ctl) => match key {
                'e' => with(one, "Type a value, then e to enqueue", |v| {
                    ctl.apply("enqueue", |q| q.enqueue(v));
                }),
                'd' => applied(ctl.apply("dequeue", |q| q.dequeue())),
                'k' => applied(ctl.inspect("peek", |q| q.peek())),
                _ => KeyResult::Unbound,
            },
            LiveStructure::List(ctl) => match key {
                'h' => with(one, "Type a value, then h to insert at head", |v| {
                    ctl.apply("insert head", |l| l.insert_head(v));
                }),
                't' => with(one, "Type a value, then t to insert at tail", |v| {
                    ctl.apply("insert tail", |l| l.insert_tail(v));
                }),
                'i' => with(two, "Type an index and a value, then i", |(i, v)| {
                    ctl.apply("insert at", |l| l.insert_at(as_index(i), v));
                }),
                'H' => applied(ctl.apply("delete head", |l| l.delete_head())),
                'T' => applied(ctl.apply("delete tail", |l| l.delete_tail())),
                'a' => with(one, "Type an index, then a to delete at it", |i| {
                    ctl.apply("delete at", |l| l.delete_at(as_index(i)));
                }),
                'd' => with(one, "Type a value, then d to delete it", |v| {
                    ctl.apply("delete value", |l| l.delete_value(v));
                }),
                's' => with(one, "Type a value, then s to search", |v| {
                    ctl.inspect("search", |l| l.search(v));
                }),
                'r' => applied(ctl.inspect("reverse traversal", |l| l.traverse_reverse())),
                _ => KeyResult::Unbound,
            },
            LiveStructure::Bst(ctl) => match key {
                'i' => with(one, "Type a value, then i to insert", |v| {
                    ctl.apply("insert", |t| t.insert(v));
                }),
                'd' => with(one, "Type a value, then d to delete", |v| {
                    ctl.apply("delete", |t| t.delete(v));
                }),
                's' => with(one, "Type a value, then s to search", |v| {
                    ctl.inspect("search", |t| t.search(v));
                }),
                'n' | 'p' | 'o' => {
                    let (label, order) = match key {
                        'n' => ("in-order", TraversalOrder::InOrder),
                        'p' => ("pre-order", TraversalOrder::PreOrder),
                        _ => ("post-order", TraversalOrder::PostOrder),
                    };
                    applied(ctl.inspect(label, |t| t.traverse(order)))
                }
                'm' => applied(ctl.inspect("min/max", min_max)),
                _ => KeyResult::Unbound,
            },
            LiveStructure::Graph(ctl) => match key {
                'v' => with(one, "Type a value, then v to add a vertex", |v| {
                    ctl.apply("add vertex", |g| g.add_vertex(v));
                }),
                'V' => with(one, "Type a vertex id, then V to remove it", |id| {
                    ctl.apply("remove vertex", |g| g.remove_vertex(as_index(id)));
                }),
                'e' => with(two, "Type two vertex ids, then e", |(a, b)| {
                    ctl.apply("add edge", |g| g.add_edge(as_index(a), as_index(b)));
                }),
                'E' => with(two, "Type two vertex ids, then E", |(a, b)| {
                    ctl.apply("remove edge", |g| g.remove_edge(as_index(a), as_index(b)));
                }),
                'b' => with(one, "Type a start vertex, then b for BFS", |id| {
                    ctl.inspect("bfs", |g| g.bfs(as_index(id)));
                }),
                'f' => with(one, "Type a start vertex, then f for DFS", |id| {
                    ctl.inspect("dfs", |g| g.dfs(as_index(id)));
                }),
                _ => KeyResult::Unbound,
            },
        }
    }
}

/// Operation keys for a structure, as `(key, description)` pairs
pub fn key_hints(kind: StructureKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        StructureKind::Stack => &[("p", "push"), ("o", "pop"), ("k", "peek")],
        StructureKind::Queue => &[("e", "enqueue"), ("d", "dequeue"), ("k", "peek")],
        StructureKind::LinkedList => &[
            ("h/t", "insert head/tail"),
            ("i", "insert at"),
            ("H/T", "delete head/tail"),
            ("a/d", "delete at/value"),
            ("s", "search"),
        ],
        StructureKind::DoublyLinkedList => &[
            ("h/t", "insert head/tail"),
            ("i", "insert at"),
            ("H/T", "delete head/tail"),
            ("a/d", "delete at/value"),
            ("s", "search"),
            ("r", "reverse"),
        ],
        StructureKind::Bst => &[
            ("i/d", "insert/delete"),
            ("s", "search"),
            ("n/p/o", "in/pre/post-order"),
            ("m", "min/max"),
        ],
        StructureKind::Graph => &[
            ("v/V", "add/remove vertex"),
            ("e/E", "add/remove edge"),
            ("b/f", "bfs/dfs"),
        ],
    }
}

fn with<T>(args: Option<T>, usage: &'static str, run: impl FnOnce(T)) -> KeyResult {
    match args {
        Some(args) => {
            run(args);
            KeyResult::Applied
        }
        None => KeyResult::MissingArgs(usage),
    }
}

fn session<S: Structure>(initial: S, limits: &LimitsConfig) -> MutationController<S> {
    MutationController::with_history_limit(initial, limits.history)
}

fn applied(_: &Feedback) -> KeyResult {
    KeyResult::Applied
}

/// Typed numbers are never negative, anything unrepresentable is out of range
fn as_index(value: i32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn min_max(tree: &Bst) -> Result<OpOutcome, OpError> {
    match (tree.min(), tree.max()) {
        (Some(min), Some(max)) => Ok(OpOutcome::new(format!("Min {}, max {}", min, max))),
        _ => Err(OpError::Empty {
            reason: "Tree is empty",
        }),
    }
}
