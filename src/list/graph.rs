//! Graph view of a list
//!
//! Exports the arena as a petgraph `DiGraph` and answers the cycle-entry
//! question a second way (strongly connected components) so the Floyd
//! detector can be cross-checked.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use super::{ListArena, NodeId};

/// Node `i` of the graph is `NodeId(i)` of the arena
pub fn to_digraph(list: &ListArena) -> DiGraph<i64, ()> {
    let mut graph = DiGraph::with_capacity(list.len(), list.len());

    for node in list.nodes() {
        graph.add_node(node.value);
    }

    for (i, node) in list.nodes().iter().enumerate() {
        if let Some(next) = node.next {
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(next.index()), ());
        }
    }

    graph
}

/// Cycle entry found via Tarjan SCC: the first node on the walk from `head`
/// that belongs to a non-trivial component.
pub fn reference_entry(list: &ListArena, head: Option<NodeId>) -> Option<NodeId> {
    let head = head?;
    let graph = to_digraph(list);

    let mut on_cycle = vec![false; list.len()];
    for component in tarjan_scc(&graph) {
        let cyclic = component.len() > 1
            || component
                .first()
                .is_some_and(|&n| graph.contains_edge(n, n));
        if cyclic {
            for n in component {
                on_cycle[n.index()] = true;
            }
        }
    }

    debug!(
        cyclic_nodes = on_cycle.iter().filter(|&&c| c).count(),
        "SCC pass complete"
    );

    // A walk of `len` steps visits every reachable node at least once
    let mut current = Some(head);
    for _ in 0..list.len() {
        let id = current?;
        if *on_cycle.get(id.index())? {
            return Some(id);
        }
        current = list.next(id);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::detect_cycle;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_digraph_mirrors_arena() {
        let (list, _) = ListArena::from_values_with_pos(&[1, 2, 3, 4, 5], Some(1)).unwrap();
        let graph = to_digraph(&list);

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.contains_edge(NodeIndex::new(4), NodeIndex::new(1)));
        assert_eq!(graph[NodeIndex::new(1)], 2);
    }

    #[test]
    fn test_reference_entry_on_fixture() {
        let (list, head) = ListArena::from_values_with_pos(&[1, 2, 3, 4, 5], Some(1)).unwrap();
        assert_eq!(reference_entry(&list, head), Some(NodeId(1)));

        let (list, head) = ListArena::from_values_with_pos(&[1, 2, 3], None).unwrap();
        assert_eq!(reference_entry(&list, head), None);

        let (list, head) = ListArena::from_values_with_pos(&[9], Some(0)).unwrap();
        assert_eq!(reference_entry(&list, head), Some(NodeId(0)));
    }

    #[test]
    fn test_floyd_agrees_with_scc_on_random_lists() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1_000 {
            let len = rng.gen_range(0..30);
            let values: Vec<i64> = (0..len).map(|_| rng.gen_range(-50..50)).collect();
            let pos = if len > 0 && rng.gen_bool(0.6) {
                Some(rng.gen_range(0..len))
            } else {
                None
            };

            let (list, head) = ListArena::from_values_with_pos(&values, pos).unwrap();
            let expected = pos.map(NodeId);

            assert_eq!(detect_cycle(&list, head), expected, "len={} pos={:?}", len, pos);
            assert_eq!(reference_entry(&list, head), expected, "len={} pos={:?}", len, pos);
        }
    }

    #[test]
    fn test_floyd_agrees_with_scc_on_arbitrary_links() {
        // Random successor per node, not just the tail-to-pos shape
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let len = rng.gen_range(1..25);
            let mut list = ListArena::new();
            for v in 0..len {
                list.push(v as i64);
            }
            for i in 0..len {
                if rng.gen_bool(0.8) {
                    let target = rng.gen_range(0..len);
                    list.link(NodeId(i), NodeId(target)).unwrap();
                }
            }
            let head = Some(NodeId(rng.gen_range(0..len)));

            assert_eq!(detect_cycle(&list, head), reference_entry(&list, head));
        }
    }
}
