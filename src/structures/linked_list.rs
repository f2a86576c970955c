//! Singly and doubly linked lists
//!
//! Nodes live in an arena keyed by [`NodeId`] and point at each other by id,
//! so the node-and-pointer shape survives a plain `clone()` into history.
//! A singly linked list simply never fills in `prev`.
//!
//! Node ids are handed out once and never reused within a list, which lets
//! a renderer animate a node across steps.

use super::{random_len, NodeId, OpError, OpOutcome, Structure, StructureKind, VALUE_RANGE};
use rand::Rng;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub id: NodeId,
    pub value: i32,
    pub next: Option<NodeId>,
    pub prev: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedList {
    nodes: FxHashMap<NodeId, ListNode>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    next_id: NodeId,
    capacity: usize,
    doubly: bool,
}

impl LinkedList {
    pub fn singly(capacity: usize) -> Self {
        Self::with_linkage(capacity, false)
    }

    pub fn doubly(capacity: usize) -> Self {
        Self::with_linkage(capacity, true)
    }

    fn with_linkage(capacity: usize, doubly: bool) -> Self {
        LinkedList {
            nodes: FxHashMap::default(),
            head: None,
            tail: None,
            next_id: 0,
            capacity,
            doubly,
        }
    }

    pub fn is_doubly(&self) -> bool {
        self.doubly
    }

    pub fn head(&self) -> Option<&ListNode> {
        self.head.and_then(|id| self.nodes.get(&id))
    }

    pub fn tail(&self) -> Option<&ListNode> {
        self.tail.and_then(|id| self.nodes.get(&id))
    }

    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(&id)
    }

    /// Nodes from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &ListNode> + '_ {
        std::iter::successors(self.head(), move |node| {
            node.next.and_then(|id| self.nodes.get(&id))
        })
    }

    pub fn values(&self) -> Vec<i32> {
        self.iter().map(|n| n.value).collect()
    }

    pub fn insert_head(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        let inserted = self.insert_at(0, value)?;
        Ok(OpOutcome::new(format!("Inserted {} at head", value)).with_path(inserted.path))
    }

    pub fn insert_tail(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        let inserted = self.insert_at(self.nodes.len(), value)?;
        Ok(OpOutcome::new(format!("Inserted {} at tail", value)).with_path(inserted.path))
    }

    /// Insert so the new node ends up at position `index`
    pub fn insert_at(&mut self, index: usize, value: i32) -> Result<OpOutcome, OpError> {
        let len = self.nodes.len();
        if len >= self.capacity {
            return Err(OpError::Full {
                reason: "List is full",
                capacity: self.capacity,
            });
        }
        if index > len {
            return Err(OpError::IndexOutOfRange { index, len });
        }

        let id = self.next_id;
        self.next_id += 1;
        let path = self.path_to(index);
        let prev = index.checked_sub(1).and_then(|i| path.get(i).copied());
        let next = match prev {
            Some(p) => self.nodes[&p].next,
            None => self.head,
        };

        self.nodes.insert(
            id,
            ListNode {
                id,
                value,
                next,
                prev: if self.doubly { prev } else { None },
            },
        );
        match prev {
            Some(p) => self.link_next(p, Some(id)),
            None => self.head = Some(id),
        }
        match next {
            Some(n) => self.link_prev(n, Some(id)),
            None => self.tail = Some(id),
        }
        Ok(OpOutcome::new(format!("Inserted {} at index {}", value, index)).with_path(path))
    }

    pub fn delete_head(&mut self) -> Result<OpOutcome, OpError> {
        self.ensure_not_empty()?;
        self.delete_at(0)
    }

    pub fn delete_tail(&mut self) -> Result<OpOutcome, OpError> {
        self.ensure_not_empty()?;
        self.delete_at(self.nodes.len() - 1)
    }

    pub fn delete_at(&mut self, index: usize) -> Result<OpOutcome, OpError> {
        self.ensure_not_empty()?;
        let len = self.nodes.len();
        if index >= len {
            return Err(OpError::IndexOutOfRange { index, len });
        }
        let path = self.path_to(index + 1);
        let id = path[index];
        let prev = index.checked_sub(1).map(|i| path[i]);
        let value = self.unlink(id, prev);
        Ok(OpOutcome::new(format!("Deleted {} at index {}", value, index)).with_path(path))
    }

    /// Remove the first node holding `value`
    pub fn delete_value(&mut self, value: i32) -> Result<OpOutcome, OpError> {
        self.ensure_not_empty()?;
        let path = self.search_path(value);
        let Some(&id) = path.last().filter(|&&id| self.nodes[&id].value == value) else {
            return Err(OpError::NotFound { value });
        };
        let prev = path.len().checked_sub(2).map(|i| path[i]);
        self.unlink(id, prev);
        Ok(OpOutcome::new(format!("Deleted {}", value)).with_path(path))
    }

    /// Walk from the head until `value` is found
    pub fn search(&self, value: i32) -> Result<OpOutcome, OpError> {
        let path = self.search_path(value);
        match path.last() {
            Some(&id) if self.nodes[&id].value == value => {
                let message = format!("Found {} at index {}", value, path.len() - 1);
                Ok(OpOutcome::new(message).with_path(path))
            }
            _ => Err(OpError::NotFound { value }),
        }
    }

    /// Walk from the tail back to the head, doubly linked lists only
    pub fn traverse_reverse(&self) -> Result<OpOutcome, OpError> {
        if !self.doubly {
            return Err(OpError::Unsupported {
                operation: "Reverse traversal",
            });
        }
        self.ensure_not_empty()?;
        let path: Vec<NodeId> = std::iter::successors(self.tail(), |node| {
            node.prev.and_then(|id| self.nodes.get(&id))
        })
        .map(|n| n.id)
        .collect();
        let values: Vec<String> = path
            .iter()
            .map(|id| self.nodes[id].value.to_string())
            .collect();
        Ok(OpOutcome::new(format!("Tail to head: {}", values.join(" <- "))).with_path(path))
    }

    fn ensure_not_empty(&self) -> Result<(), OpError> {
        if self.nodes.is_empty() {
            return Err(OpError::Empty {
                reason: "List is empty",
            });
        }
        Ok(())
    }

    /// Ids of the first `count` nodes
    fn path_to(&self, count: usize) -> Vec<NodeId> {
        self.iter().take(count).map(|n| n.id).collect()
    }

    /// Ids visited up to and including the first match
    fn search_path(&self, value: i32) -> Vec<NodeId> {
        let mut path = Vec::new();
        for node in self.iter() {
            path.push(node.id);
            if node.value == value {
                break;
            }
        }
        path
    }

    fn link_next(&mut self, id: NodeId, next: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.next = next;
        }
    }

    fn link_prev(&mut self, id: NodeId, prev: Option<NodeId>) {
        if !self.doubly {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.prev = prev;
        }
    }

    /// Detach `id`, whose predecessor is `prev`, and return its value
    fn unlink(&mut self, id: NodeId, prev: Option<NodeId>) -> i32 {
        let Some(node) = self.nodes.remove(&id) else {
            return 0;
        };
        match prev {
            Some(p) => self.link_next(p, node.next),
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.link_prev(n, prev),
            None => self.tail = prev,
        }
        node.value
    }
}

impl Structure for LinkedList {
    fn kind(&self) -> StructureKind {
        if self.doubly {
            StructureKind::DoublyLinkedList
        } else {
            StructureKind::LinkedList
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear();
        let len = random_len(rng, self.capacity);
        for _ in 0..len {
            let value = rng.gen_range(VALUE_RANGE);
            // len never exceeds capacity
            let _ = self.insert_tail(value);
        }
    }

    fn summary(&self) -> String {
        let arrow = if self.doubly { " <-> " } else { " -> " };
        let values: Vec<String> = self.iter().map(|n| n.value.to_string()).collect();
        if values.is_empty() {
            "null".to_string()
        } else {
            format!("{}{}null", values.join(arrow), arrow)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32], doubly: bool) -> LinkedList {
        let mut list = if doubly {
            LinkedList::doubly(10)
        } else {
            LinkedList::singly(10)
        };
        for &v in values {
            list.insert_tail(v).unwrap();
        }
        list
    }

    #[test]
    fn inserts_at_head_tail_and_index() {
        let mut list = list_of(&[2, 4], false);
        list.insert_head(1).unwrap();
        list.insert_at(2, 3).unwrap();
        list.insert_tail(5).unwrap();
        assert_eq!(list.values(), vec![1, 2, 3, 4, 5]);
        assert_eq!(list.head().map(|n| n.value), Some(1));
        assert_eq!(list.tail().map(|n| n.value), Some(5));
        assert!(list.iter().all(|n| n.prev.is_none()));
    }

    #[test]
    fn deletes_keep_links_consistent() {
        let mut list = list_of(&[1, 2, 3, 4], true);
        list.delete_at(1).unwrap();
        list.delete_tail().unwrap();
        assert_eq!(list.values(), vec![1, 3]);
        assert_eq!(list.tail().map(|n| n.value), Some(3));
        let tail_prev = list.tail().and_then(|n| n.prev);
        let tail_prev = tail_prev.and_then(|id| list.node(id));
        assert_eq!(tail_prev.map(|n| n.value), Some(1));

        list.delete_value(1).unwrap();
        assert_eq!(list.values(), vec![3]);
        assert_eq!(list.head().and_then(|n| n.prev), None);
    }

    #[test]
    fn failures_leave_list_untouched() {
        let mut list = list_of(&[1], false);
        let before = list.clone();
        assert_eq!(
            list.delete_at(5),
            Err(OpError::IndexOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(list.delete_value(9), Err(OpError::NotFound { value: 9 }));
        assert_eq!(
            list.insert_at(3, 7),
            Err(OpError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(list, before);

        let mut empty = LinkedList::singly(0);
        let full = empty.insert_head(1).unwrap_err();
        assert_eq!(full.to_string(), "List is full");
        let underflow = empty.delete_head().unwrap_err();
        assert_eq!(underflow.to_string(), "List is empty");
    }

    #[test]
    fn end_inserts_report_the_walked_path() {
        let mut list = list_of(&[2, 4], true);
        let walked: Vec<NodeId> = list.iter().map(|n| n.id).collect();
        let outcome = list.insert_tail(5).unwrap();
        assert_eq!(outcome.message, "Inserted 5 at tail");
        assert_eq!(outcome.path, walked);

        let outcome = list.insert_head(1).unwrap();
        assert_eq!(outcome.message, "Inserted 1 at head");
        assert!(outcome.path.is_empty());
    }

    #[test]
    fn search_reports_visited_path() {
        let list = list_of(&[7, 8, 9], false);
        let outcome = list.search(9).unwrap();
        assert_eq!(outcome.path.len(), 3);
        assert_eq!(outcome.message, "Found 9 at index 2");
        assert!(list.search(1).is_err());
    }

    #[test]
    fn reverse_traversal_needs_prev_links() {
        let singly = list_of(&[1, 2], false);
        assert!(singly.traverse_reverse().is_err());

        let doubly = list_of(&[1, 2, 3], true);
        assert_eq!(
            doubly.traverse_reverse().unwrap().message,
            "Tail to head: 3 <- 2 <- 1"
        );
        assert_eq!(doubly.summary(), "1 <-> 2 <-> 3 <-> null");
    }
}
