//! Linked list cycle detection
//!
//! Responsible for:
//! - Holding (possibly cyclic) singly linked lists in an index arena
//! - Finding the node where a cycle begins with Floyd's two pointers
//! - Cross-checking that answer against a petgraph SCC pass

mod arena;
mod detector;
mod graph;

pub use arena::{format_path, ListArena, ListNode, NodeId};
pub use detector::{detect_cycle, CycleDetector, CycleInfo, DetectorState};
pub use graph::{reference_entry, to_digraph};
