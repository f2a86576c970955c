//! Undirected, unweighted graph
//!
//! Vertices carry a value and a stable id. Adjacency is kept in ordered sets
//! so traversals visit neighbours in ascending id order and are repeatable.

use super::{random_len, NodeId, OpError, OpOutcome, Structure, StructureKind, VALUE_RANGE};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    values: BTreeMap<NodeId, i32>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    next_id: NodeId,
    capacity: usize,
}

impl Graph {
    pub fn new(capacity: usize) -> Self {
        Graph {
            values: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            next_id: 0,
            capacity,
        }
    }

    /// `(id, value)` pairs in id order
    pub fn vertices(&self) -> impl Iterator<Item = (NodeId, i32)> + '_ {
        self.values.iter().map(|(&id, &value)| (id, value))
    }

    /// Each undirected edge once, as `(smaller, larger)`
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.adjacency
            .iter()
            .flat_map(|(&a, ns)| ns.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
            .collect()
    }

    pub fn neighbours(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    pub fn value(&self, id: NodeId) -> Option<i32> {
        self.values.get(&id).copied()
    }

    pub fn add_vertex(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        if self.values.len() >= self.capacity {
            return Err(OpError::Full {
                reason: "Graph is full",
                capacity: self.capacity,
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.values.insert(id, value);
        self.adjacency.insert(id, BTreeSet::new());
        Ok(OpOutcome::new(format!("Added vertex {} ({})", id, value)).with_path(vec![id]))
    }

    /// Remove a vertex together with its edges
    pub fn remove_vertex(&mut self, id: NodeId) -> Result<OpOutcome, OpError> {
        self.ensure_not_empty()?;
        let Some(value) = self.values.remove(&id) else {
            return Err(OpError::NoSuchVertex { id });
        };
        let neighbours = self.adjacency.remove(&id).unwrap_or_default();
        for n in &neighbours {
            if let Some(set) = self.adjacency.get_mut(n) {
                set.remove(&id);
            }
        }
        Ok(OpOutcome::new(format!(
            "Removed vertex {} ({}) and {} edge{}",
            id,
            value,
            neighbours.len(),
            if neighbours.len() == 1 { "" } else { "s" }
        )))
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<OpOutcome, OpError> {
        self.ensure_vertex(a)?;
        self.ensure_vertex(b)?;
        if a == b {
            return Err(OpError::SelfLoop);
        }
        if self.has_edge(a, b) {
            return Err(OpError::DuplicateEdge { a, b });
        }
        self.link(a, b);
        Ok(OpOutcome::new(format!("Connected {} and {}", a, b)).with_path(vec![a, b]))
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<OpOutcome, OpError> {
        self.ensure_vertex(a)?;
        self.ensure_vertex(b)?;
        if !self.has_edge(a, b) {
            return Err(OpError::NoSuchEdge { a, b });
        }
        for (from, to) in [(a, b), (b, a)] {
            if let Some(set) = self.adjacency.get_mut(&from) {
                set.remove(&to);
            }
        }
        Ok(OpOutcome::new(format!("Disconnected {} and {}", a, b)))
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Breadth-first visit order from `start`
    pub fn bfs(&self, start: NodeId) -> Result<OpOutcome, OpError> {
        self.ensure_vertex(start)?;
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for n in self.neighbours(id) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        Ok(self.visit_outcome("BFS", order))
    }

    /// Depth-first visit order from `start`, lowest id first
    pub fn dfs(&self, start: NodeId) -> Result<OpOutcome, OpError> {
        self.ensure_vertex(start)?;
        let mut seen = BTreeSet::new();
        let mut stack = vec![start];
        let mut order = Vec::new();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            let mut next: Vec<NodeId> = self.neighbours(id).filter(|n| !seen.contains(n)).collect();
            next.reverse();
            stack.extend(next);
        }
        Ok(self.visit_outcome("DFS", order))
    }

    fn visit_outcome(&self, name: &str, order: Vec<NodeId>) -> OpOutcome {
        let ids: Vec<String> = order.iter().map(|id| id.to_string()).collect();
        OpOutcome::new(format!("{} order: {}", name, ids.join(" -> "))).with_path(order)
    }

    fn link(&mut self, a: NodeId, b: NodeId) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    fn ensure_not_empty(&self) -> Result<(), OpError> {
        if self.values.is_empty() {
            return Err(OpError::Empty {
                reason: "Graph is empty",
            });
        }
        Ok(())
    }

    fn ensure_vertex(&self, id: NodeId) -> Result<(), OpError> {
        if self.values.contains_key(&id) {
            Ok(())
        } else {
            Err(OpError::NoSuchVertex { id })
        }
    }
}

impl Structure for Graph {
    fn kind(&self) -> StructureKind {
        StructureKind::Graph
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.values.clear();
        self.adjacency.clear();
        self.next_id = 0;
    }

    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear();
        let len = random_len(rng, self.capacity);
        for _ in 0..len {
            let _ = self.add_vertex(rng.gen_range(VALUE_RANGE));
        }
        // a random spanning tree keeps it connected, then a few extra edges
        for b in 1..len {
            let a = rng.gen_range(0..b);
            self.link(a, b);
        }
        for _ in 0..len / 2 {
            let (a, b) = (rng.gen_range(0..len), rng.gen_range(0..len));
            if a != b {
                self.link(a, b);
            }
        }
    }

    fn summary(&self) -> String {
        let edges: Vec<String> = self
            .edges()
            .iter()
            .map(|(a, b)| format!("{}-{}", a, b))
            .collect();
        format!("V={} E=[{}]", self.values.len(), edges.join(", "))
    }
}
