//! Floyd Cycle Detector
//!
//! Two phases:
//! 1. Detection: slow moves one node, fast moves two. They either meet inside
//!    the loop or fast runs off the end of the list.
//! 2. Localization: restart one pointer from head and step both one node at a
//!    time. head→entry equals meeting→entry (mod loop length), so they meet at
//!    the entry.
//!
//! The detector only ever borrows the arena immutably, and it never
//! allocates.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{ListArena, NodeId};

/// Where the detector is in its two-phase search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Searching,
    Met(NodeId),
    Exhausted,
    Localizing,
    Found(NodeId),
    NoCycle,
}

impl DetectorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DetectorState::Found(_) | DetectorState::NoCycle)
    }
}

/// Shape of a "rho" list: `tail_len` nodes before the loop, `cycle_len` in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    pub entry: NodeId,
    pub meeting: NodeId,
    pub tail_len: usize,
    pub cycle_len: usize,
}

impl CycleInfo {
    /// Distinct nodes reachable from head
    pub fn reachable_nodes(&self) -> usize {
        self.tail_len + self.cycle_len
    }
}

pub struct CycleDetector<'a> {
    list: &'a ListArena,
}

impl<'a> CycleDetector<'a> {
    pub fn new(list: &'a ListArena) -> Self {
        Self { list }
    }

    /// Entry node of the cycle reachable from `head`, or `None`
    pub fn detect(&self, head: Option<NodeId>) -> Option<NodeId> {
        let head = head?;
        let meeting = self.find_meeting(head)?;
        Some(self.localize(head, meeting).0)
    }

    /// Like `detect`, but also measures the tail and loop lengths
    pub fn analyze(&self, head: Option<NodeId>) -> Option<CycleInfo> {
        let head = head?;
        let meeting = self.find_meeting(head)?;
        let (entry, tail_len) = self.localize(head, meeting);
        let cycle_len = self.loop_length(entry);

        Some(CycleInfo {
            entry,
            meeting,
            tail_len,
            cycle_len,
        })
    }

    /// Phase 1. Returns the node where slow and fast coincide.
    fn find_meeting(&self, head: NodeId) -> Option<NodeId> {
        let mut state = DetectorState::Searching;
        trace!(?state, %head, "Starting detection");

        // Empty tail: nothing to chase
        if self.list.next(head).is_none() {
            state = DetectorState::NoCycle;
            trace!(?state, terminal = state.is_terminal(), "Single node without successor");
            return None;
        }

        let mut slow = head;
        let mut fast = head;

        let meeting = loop {
            let Some(step) = self.list.next(fast) else {
                break None;
            };
            let Some(jump) = self.list.next(step) else {
                break None;
            };
            let Some(s) = self.list.next(slow) else {
                break None;
            };
            fast = jump;
            slow = s;

            if slow == fast {
                break Some(slow);
            }
        };

        state = match meeting {
            Some(node) => DetectorState::Met(node),
            None => DetectorState::Exhausted,
        };
        trace!(?state, terminal = state.is_terminal(), "Detection finished");

        if meeting.is_none() {
            state = DetectorState::NoCycle;
            trace!(?state, terminal = state.is_terminal(), "No cycle");
        }
        meeting
    }

    /// Phase 2. Returns the entry node and its distance from head.
    fn localize(&self, head: NodeId, meeting: NodeId) -> (NodeId, usize) {
        trace!(state = ?DetectorState::Localizing, %meeting, "Localizing entry");

        let mut from_head = head;
        let mut from_meeting = meeting;
        let mut steps = 0;

        // Both pointers stay on the cycle path, so successors always exist
        while from_head != from_meeting {
            match (self.list.next(from_head), self.list.next(from_meeting)) {
                (Some(a), Some(b)) => {
                    from_head = a;
                    from_meeting = b;
                    steps += 1;
                }
                _ => break,
            }
        }

        let state = DetectorState::Found(from_head);
        trace!(?state, terminal = state.is_terminal(), steps, "Entry located");
        (from_head, steps)
    }

    fn loop_length(&self, entry: NodeId) -> usize {
        let mut len = 1;
        let mut current = self.list.next(entry);
        while let Some(id) = current {
            if id == entry {
                break;
            }
            len += 1;
            current = self.list.next(id);
        }
        len
    }
}

/// Entry node of the cycle reachable from `head`, or `None` when the list
/// ends.
pub fn detect_cycle(list: &ListArena, head: Option<NodeId>) -> Option<NodeId> {
    CycleDetector::new(list).detect(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ListArena, Option<NodeId>) {
        // 1 → 2 → 3 → 4 → 5 → back to 2
        ListArena::from_values_with_pos(&[1, 2, 3, 4, 5], Some(1)).unwrap()
    }

    #[test]
    fn test_cycle_entry_is_found() {
        let (list, head) = fixture();
        let entry = detect_cycle(&list, head).unwrap();
        assert_eq!(entry, NodeId(1));
        assert_eq!(list.value(entry), Some(2));
    }

    #[test]
    fn test_cycle_shape() {
        let (list, head) = fixture();
        let info = CycleDetector::new(&list).analyze(head).unwrap();
        assert_eq!(info.entry, NodeId(1));
        assert_eq!(info.tail_len, 1);
        assert_eq!(info.cycle_len, 4);
        assert_eq!(info.reachable_nodes(), 5);
    }

    #[test]
    fn test_no_cycle() {
        let (list, head) = ListArena::from_values_with_pos(&[1, 2, 3, 4, 5], None).unwrap();
        let before = list.clone();

        assert_eq!(detect_cycle(&list, head), None);
        assert!(CycleDetector::new(&list).analyze(head).is_none());
        assert_eq!(list, before);
    }

    #[test]
    fn test_empty_and_single_node() {
        let empty = ListArena::new();
        assert_eq!(detect_cycle(&empty, None), None);

        let (single, head) = ListArena::from_values_with_pos(&[1], None).unwrap();
        assert_eq!(detect_cycle(&single, head), None);
    }

    #[test]
    fn test_self_loop() {
        let (list, head) = ListArena::from_values_with_pos(&[1], Some(0)).unwrap();
        let info = CycleDetector::new(&list).analyze(head).unwrap();
        assert_eq!(info.entry, NodeId(0));
        assert_eq!(info.tail_len, 0);
        assert_eq!(info.cycle_len, 1);
    }

    #[test]
    fn test_whole_list_is_cycle() {
        let (list, head) = ListArena::from_values_with_pos(&[1, 2], Some(0)).unwrap();
        assert_eq!(detect_cycle(&list, head), Some(NodeId(0)));

        let (list, head) = ListArena::from_values_with_pos(&[3, 2, 0, -4], Some(1)).unwrap();
        assert_eq!(detect_cycle(&list, head), Some(NodeId(1)));
    }

    #[test]
    fn test_tail_points_at_itself() {
        let (list, head) = ListArena::from_values_with_pos(&[1, 2, 3, 4], Some(3)).unwrap();
        let info = CycleDetector::new(&list).analyze(head).unwrap();
        assert_eq!(info.entry, NodeId(3));
        assert_eq!(info.tail_len, 3);
        assert_eq!(info.cycle_len, 1);
    }

    #[test]
    fn test_head_in_middle_of_arena() {
        let (list, _) = fixture();
        // Starting at node 3 lands straight on the loop
        assert_eq!(detect_cycle(&list, Some(NodeId(3))), Some(NodeId(3)));
    }

    #[test]
    fn test_idempotent_and_non_mutating() {
        let (list, head) = fixture();
        let before = list.clone();

        let first = detect_cycle(&list, head);
        let second = detect_cycle(&list, head);

        assert_eq!(first, second);
        assert_eq!(list, before);
    }

    #[test]
    fn test_terminal_states() {
        assert!(DetectorState::NoCycle.is_terminal());
        assert!(DetectorState::Found(NodeId(0)).is_terminal());
        assert!(!DetectorState::Searching.is_terminal());
        assert!(!DetectorState::Met(NodeId(0)).is_terminal());
    }
}
