//! Binary search tree
//!
//! Smaller values go left, larger values go right, duplicates are refused.
//! Nodes are stored in an arena keyed by [`NodeId`] with child links by id.
//!
//! # Deletion
//!
//! - leaf: removed
//! - one child: the child takes the node's place
//! - two children: the node takes its in-order successor's value, then the
//!   successor (which has no left child) is removed instead

use super::{random_len, NodeId, OpError, OpOutcome, Structure, StructureKind, VALUE_RANGE};
use rand::Rng;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BstNode {
    pub id: NodeId,
    pub value: i32,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TraversalOrder {
    #[strum(to_string = "In-order")]
    InOrder,
    #[strum(to_string = "Pre-order")]
    PreOrder,
    #[strum(to_string = "Post-order")]
    PostOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bst {
    nodes: FxHashMap<NodeId, BstNode>,
    root: Option<NodeId>,
    next_id: NodeId,
    capacity: usize,
}

impl Bst {
    pub fn new(capacity: usize) -> Self {
        Bst {
            nodes: FxHashMap::default(),
            root: None,
            next_id: 0,
            capacity,
        }
    }

    pub fn root(&self) -> Option<&BstNode> {
        self.root.and_then(|id| self.nodes.get(&id))
    }

    pub fn node(&self, id: NodeId) -> Option<&BstNode> {
        self.nodes.get(&id)
    }

    pub fn insert(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        if self.nodes.len() >= self.capacity {
            return Err(OpError::Full {
                reason: "Tree is full",
                capacity: self.capacity,
            });
        }
        let path = self.search_path(value);
        let parent = match path.last() {
            Some(&last) if self.nodes[&last].value == value => {
                return Err(OpError::Duplicate { value });
            }
            last => last.copied(),
        };

        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            BstNode {
                id,
                value,
                left: None,
                right: None,
            },
        );
        match parent {
            None => self.root = Some(id),
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(&p) {
                    if value < node.value {
                        node.left = Some(id);
                    } else {
                        node.right = Some(id);
                    }
                }
            }
        }
        Ok(OpOutcome::new(format!("Inserted {}", value)).with_path(path))
    }

    pub fn delete(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        if self.nodes.is_empty() {
            return Err(OpError::Empty {
                reason: "Tree is empty",
            });
        }
        let path = self.search_path(value);
        let Some(&target) = path.last().filter(|&&id| self.nodes[&id].value == value) else {
            return Err(OpError::NotFound { value });
        };
        let parent = path.len().checked_sub(2).map(|i| path[i]);

        let node = self.nodes[&target].clone();
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                // leftmost node of the right subtree
                let (mut succ_parent, mut succ) = (target, right);
                while let Some(left) = self.nodes[&succ].left {
                    succ_parent = succ;
                    succ = left;
                }
                let successor = self.nodes[&succ].clone();
                self.replace_child(Some(succ_parent), succ, successor.right);
                self.nodes.remove(&succ);
                if let Some(n) = self.nodes.get_mut(&target) {
                    n.value = successor.value;
                }
            }
            (child, None) | (None, child) => {
                self.replace_child(parent, target, child);
                self.nodes.remove(&target);
            }
        }
        Ok(OpOutcome::new(format!("Deleted {}", value)).with_path(path))
    }

    pub fn search(&self, value: i32) -> Result<OpOutcome, OpError> {
        let path = self.search_path(value);
        match path.last() {
            Some(&id) if self.nodes[&id].value == value => Ok(OpOutcome::new(format!(
                "Found {} after {} comparison{}",
                value,
                path.len(),
                if path.len() == 1 { "" } else { "s" }
            ))
            .with_path(path)),
            _ => Err(OpError::NotFound { value }),
        }
    }

    pub fn traverse(&self, order: TraversalOrder) -> Result<OpOutcome, OpError> {
        if self.nodes.is_empty() {
            return Err(OpError::Empty {
                reason: "Tree is empty",
            });
        }
        let path = self.traversal(order);
        let values: Vec<String> = path
            .iter()
            .map(|id| self.nodes[id].value.to_string())
            .collect();
        Ok(OpOutcome::new(format!("{}: {}", order, values.join(", "))).with_path(path))
    }

    /// Node ids in the given order
    pub fn traversal(&self, order: TraversalOrder) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk(self.root, order, &mut out);
        out
    }

    pub fn min(&self) -> Option<i32> {
        let mut node = self.root()?;
        while let Some(left) = node.left.and_then(|id| self.nodes.get(&id)) {
            node = left;
        }
        Some(node.value)
    }

    pub fn max(&self) -> Option<i32> {
        let mut node = self.root()?;
        while let Some(right) = node.right.and_then(|id| self.nodes.get(&id)) {
            node = right;
        }
        Some(node.value)
    }

    /// Edges on the longest root-to-leaf path, 0 for a single node
    pub fn height(&self) -> Option<usize> {
        fn depth(tree: &Bst, id: Option<NodeId>) -> usize {
            match id.and_then(|id| tree.nodes.get(&id)) {
                None => 0,
                Some(node) => 1 + depth(tree, node.left).max(depth(tree, node.right)),
            }
        }
        self.root.map(|_| depth(self, self.root) - 1)
    }

    pub fn values(&self) -> Vec<i32> {
        self.traversal(TraversalOrder::InOrder)
            .iter()
            .map(|id| self.nodes[id].value)
            .collect()
    }

    fn walk(&self, id: Option<NodeId>, order: TraversalOrder, out: &mut Vec<NodeId>) {
        let Some(node) = id.and_then(|id| self.nodes.get(&id)) else {
            return;
        };
        if order == TraversalOrder::PreOrder {
            out.push(node.id);
        }
        self.walk(node.left, order, out);
        if order == TraversalOrder::InOrder {
            out.push(node.id);
        }
        self.walk(node.right, order, out);
        if order == TraversalOrder::PostOrder {
            out.push(node.id);
        }
    }

    /// Nodes visited from the root; ends at the match or at the would-be parent
    fn search_path(&self, value: i32) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.root;
        while let Some(node) = current.and_then(|id| self.nodes.get(&id)) {
            path.push(node.id);
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => break,
            };
        }
        path
    }

    /// Point whichever link of `parent` held `old` at `new` instead
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        let Some(node) = parent.and_then(|p| self.nodes.get_mut(&p)) else {
            self.root = new;
            return;
        };
        if node.left == Some(old) {
            node.left = new;
        } else if node.right == Some(old) {
            node.right = new;
        }
    }
}

impl Structure for Bst {
    fn kind(&self) -> StructureKind {
        StructureKind::Bst
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear();
        let len = random_len(rng, self.capacity);
        // duplicates are refused, so draw until the tree is big enough
        let mut attempts = 0;
        while self.nodes.len() < len && attempts < len * 10 {
            let _ = self.insert(rng.gen_range(VALUE_RANGE));
            attempts += 1;
        }
    }

    fn summary(&self) -> String {
        format!("{:?}", self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(values: &[i32]) -> Bst {
        let mut tree = Bst::new(15);
        for &v in values {
            tree.insert(v).unwrap();
        }
        tree
    }

    #[test]
    fn insert_keeps_in_order_sorted() {
        let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(tree.values(), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.height(), Some(2));
        assert_eq!(tree.min(), Some(20));
        assert_eq!(tree.max(), Some(80));
    }

    #[test]
    fn duplicates_are_refused() {
        let mut tree = tree_of(&[5]);
        assert_eq!(tree.insert(5), Err(OpError::Duplicate { value: 5 }));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn delete_handles_all_three_shapes() {
        let mut tree = tree_of(&[50, 30, 70, 20, 40, 60, 80, 65]);

        tree.delete(20).unwrap(); // leaf
        assert_eq!(tree.values(), vec![30, 40, 50, 60, 65, 70, 80]);

        tree.delete(60).unwrap(); // one child
        assert_eq!(tree.values(), vec![30, 40, 50, 65, 70, 80]);

        tree.delete(50).unwrap(); // two children, root
        assert_eq!(tree.values(), vec![30, 40, 65, 70, 80]);
        assert_eq!(tree.root().map(|n| n.value), Some(65));

        assert_eq!(tree.delete(99), Err(OpError::NotFound { value: 99 }));
    }

    #[test]
    fn delete_last_node_empties_tree() {
        let mut tree = tree_of(&[1]);
        tree.delete(1).unwrap();
        assert!(tree.root().is_none());
        assert_eq!(tree.height(), None);
        assert_eq!(tree.delete(1).unwrap_err().to_string(), "Tree is empty");
    }

    #[test]
    fn traversals_visit_in_expected_order() {
        let tree = tree_of(&[2, 1, 3]);
        let msg = |order| tree.traverse(order).unwrap().message;
        assert_eq!(msg(TraversalOrder::InOrder), "In-order: 1, 2, 3");
        assert_eq!(msg(TraversalOrder::PreOrder), "Pre-order: 2, 1, 3");
        assert_eq!(msg(TraversalOrder::PostOrder), "Post-order: 1, 3, 2");
    }

    #[test]
    fn search_path_follows_comparisons() {
        let tree = tree_of(&[8, 4, 12, 6]);
        let outcome = tree.search(6).unwrap();
        assert_eq!(outcome.path.len(), 3);
        assert_eq!(outcome.message, "Found 6 after 3 comparisons");
        assert!(tree.search(7).is_err());
    }
}
