//! Linked List Arena
//!
//! Nodes live in a flat Vec and point at their successor by index, so a
//! "rho"-shaped list (a tail leading into a loop) is just an index that
//! points backwards.

use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Index of a node inside a `ListArena`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    pub value: i64,
    pub next: Option<NodeId>,
}

/// Owns every node of one (possibly cyclic) singly linked list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListArena {
    nodes: Vec<ListNode>,
}

impl ListArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Build `values[0] -> values[1] -> ... -> values[n-1]`, then link the
    /// tail back to `values[pos]` when `pos` is set.
    ///
    /// Returns the arena and its head (`None` for empty `values`).
    pub fn from_values_with_pos(values: &[i64], pos: Option<usize>) -> Result<(Self, Option<NodeId>)> {
        if let Some(p) = pos {
            if p >= values.len() {
                return Err(eyre!(
                    "cycle position {} out of range for a list of {} nodes",
                    p,
                    values.len()
                ));
            }
        }

        let mut arena = Self::with_capacity(values.len());
        let mut prev: Option<NodeId> = None;

        for &value in values {
            let id = arena.push(value);
            if let Some(p) = prev {
                arena.link(p, id)?;
            }
            prev = Some(id);
        }

        if let (Some(tail), Some(p)) = (prev, pos) {
            arena.link(tail, NodeId(p))?;
        }

        let head = if arena.is_empty() { None } else { Some(NodeId(0)) };
        debug!(nodes = arena.len(), ?pos, "Built list fixture");

        Ok((arena, head))
    }

    /// Append an unlinked node
    pub fn push(&mut self, value: i64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ListNode { value, next: None });
        id
    }

    /// Point `from` at `to`, replacing any previous successor
    pub fn link(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        if !self.contains(to) {
            return Err(eyre!("link target {} is not in the arena ({} nodes)", to, self.len()));
        }
        let node = self
            .nodes
            .get_mut(from.0)
            .ok_or_else(|| eyre!("link source {} is not in the arena", from))?;
        node.next = Some(to);
        Ok(())
    }

    /// Clear the successor of `from`, returning the old one
    pub fn unlink(&mut self, from: NodeId) -> Result<Option<NodeId>> {
        let node = self
            .nodes
            .get_mut(from.0)
            .ok_or_else(|| eyre!("node {} is not in the arena", from))?;
        Ok(node.next.take())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id.0)
    }

    pub fn value(&self, id: NodeId) -> Option<i64> {
        self.node(id).map(|n| n.value)
    }

    /// Successor of `id`; `None` for the last node or an unknown id
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.next)
    }

    pub fn nodes(&self) -> &[ListNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Render the list from `head` as `1 → 2 → 3 ↺ 2`.
///
/// Stops at the first repeated node, so cyclic lists terminate.
pub fn format_path(list: &ListArena, head: Option<NodeId>) -> String {
    let Some(head) = head else {
        return "∅".to_string();
    };

    let mut seen = vec![false; list.len()];
    let mut parts = Vec::new();
    let mut current = Some(head);

    while let Some(id) = current {
        let Some(value) = list.value(id) else {
            break;
        };
        if seen[id.0] {
            return format!("{} ↺ {}", parts.join(" → "), value);
        }
        seen[id.0] = true;
        parts.push(value.to_string());
        current = list.next(id);
    }

    parts.join(" → ")
}
