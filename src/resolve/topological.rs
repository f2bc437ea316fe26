//! Kahn's algorithm with lexicographic tie-breaking and cycle diagnosis.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::{CyclicDependencyError, OrderResolver, ResolveResult};
use crate::graph::{CycleInfo, DependencyGraph};

/// Resolves emission order by repeatedly emitting every ready node.
///
/// Each round collects the unprocessed nodes with no pending dependencies,
/// sorts them by path and appends them all. When no node is ready but some
/// remain, a depth-first search over the remainder extracts one cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalResolver;

impl TopologicalResolver {
    /// Creates a new resolver.
    pub fn new() -> Self {
        Self
    }
}

impl OrderResolver for TopologicalResolver {
    fn resolve_graph(&self, graph: &DependencyGraph) -> ResolveResult<Vec<String>> {
        let g = graph.as_petgraph();
        let total = graph.node_count();

        // Outgoing edges point at dependencies, parallel edges counted.
        let mut in_degree: Vec<usize> = g
            .node_indices()
            .map(|idx| g.edges_directed(idx, Direction::Outgoing).count())
            .collect();
        let mut processed = vec![false; total];
        let mut order = Vec::with_capacity(total);

        while order.len() < total {
            let mut ready: Vec<NodeIndex> = g
                .node_indices()
                .filter(|idx| !processed[idx.index()] && in_degree[idx.index()] == 0)
                .collect();

            if ready.is_empty() {
                return Err(CyclicDependencyError::new(find_cycle(g, &processed)));
            }

            ready.sort_by(|a, b| g[*a].cmp(&g[*b]));

            for idx in ready {
                processed[idx.index()] = true;
                order.push(g[idx].clone());
                for edge in g.edges_directed(idx, Direction::Incoming) {
                    in_degree[edge.source().index()] -= 1;
                }
            }
        }

        Ok(order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Done,
}

/// One entry of the explicit DFS stack.
struct Frame {
    node: NodeIndex,
    neighbors: Vec<NodeIndex>,
    cursor: usize,
}

impl Frame {
    fn new(g: &DiGraph<String, ()>, node: NodeIndex, processed: &[bool]) -> Self {
        let mut neighbors: Vec<NodeIndex> = g
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| edge.target())
            .filter(|target| !processed[target.index()])
            .collect();
        neighbors.sort_by(|a, b| g[*a].cmp(&g[*b]));
        neighbors.dedup();

        Self {
            node,
            neighbors,
            cursor: 0,
        }
    }

    fn next_neighbor(&mut self) -> Option<NodeIndex> {
        let next = self.neighbors.get(self.cursor).copied();
        self.cursor += 1;
        next
    }
}

/// Finds a cycle among the unprocessed nodes.
///
/// Starts from the lexicographically smallest unprocessed node and follows
/// dependent -> dependency edges. Every unprocessed node still waits on an
/// unprocessed dependency, so the walk always closes a loop.
fn find_cycle(g: &DiGraph<String, ()>, processed: &[bool]) -> CycleInfo {
    let Some(start) = g
        .node_indices()
        .filter(|idx| !processed[idx.index()])
        .min_by(|a, b| g[*a].cmp(&g[*b]))
    else {
        return CycleInfo::default();
    };

    let mut state = vec![VisitState::Unvisited; g.node_count()];
    let mut stack = vec![Frame::new(g, start, processed)];
    state[start.index()] = VisitState::Visiting;

    loop {
        let Some(frame) = stack.last_mut() else {
            break;
        };
        let node = frame.node;

        match frame.next_neighbor() {
            None => {
                state[node.index()] = VisitState::Done;
                stack.pop();
            }
            Some(next) => match state[next.index()] {
                VisitState::Visiting => {
                    let from = stack
                        .iter()
                        .position(|frame| frame.node == next)
                        .unwrap_or_default();
                    let nodes = stack[from..]
                        .iter()
                        .map(|frame| g[frame.node].clone())
                        .collect();
                    return CycleInfo { nodes };
                }
                VisitState::Unvisited => {
                    state[next.index()] = VisitState::Visiting;
                    stack.push(Frame::new(g, next, processed));
                }
                VisitState::Done => {}
            },
        }
    }

    CycleInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyPair;
    use proptest::prelude::*;

    fn pairs(edges: &[(&str, &str)]) -> Vec<DependencyPair> {
        edges
            .iter()
            .map(|(dependent, dependency)| DependencyPair::new(*dependent, *dependency))
            .collect()
    }

    fn resolve(edges: &[(&str, &str)]) -> ResolveResult<Vec<String>> {
        TopologicalResolver::new().resolve(&pairs(edges))
    }

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_dependency() {
        let order = resolve(&[("b.txt", "a.txt")]).unwrap();
        assert_eq!(order, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_task_example() {
        let order = resolve(&[
            ("Folder1/File1-1.txt", "Folder2/File2-1.txt"),
            ("Folder2/File2-2.txt", "Folder1/File1-1.txt"),
            ("Folder2/File2-2.txt", "Folder2/File2-1.txt"),
        ])
        .unwrap();

        assert_eq!(
            order,
            vec![
                "Folder2/File2-1.txt",
                "Folder1/File1-1.txt",
                "Folder2/File2-2.txt"
            ]
        );
    }

    #[test]
    fn test_chain() {
        let order = resolve(&[("A", "B"), ("B", "C"), ("C", "D")]).unwrap();
        assert_eq!(order, vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_diamond() {
        let order = resolve(&[
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "D"),
            ("D", "E"),
        ])
        .unwrap();

        assert_eq!(order, vec!["E", "D", "B", "C", "A"]);
        assert!(position(&order, "E") < position(&order, "D"));
        assert!(position(&order, "D") < position(&order, "B"));
        assert!(position(&order, "D") < position(&order, "C"));
        assert!(position(&order, "C") < position(&order, "A"));
    }

    #[test]
    fn test_ready_nodes_sorted_each_round() {
        let order = resolve(&[("z", "y"), ("c", "b"), ("x", "a")]).unwrap();
        assert_eq!(order, vec!["a", "b", "y", "c", "x", "z"]);
    }

    #[test]
    fn test_duplicate_edges() {
        let order = resolve(&[("b", "a"), ("b", "a"), ("c", "b")]).unwrap();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_standalone_nodes_in_lexicographic_order() {
        let mut graph = DependencyGraph::new();
        graph.add_node("gamma.txt");
        graph.add_node("alpha.txt");
        graph.add_node("beta.txt");

        let order = TopologicalResolver::new().resolve_graph(&graph).unwrap();
        assert_eq!(order, vec!["alpha.txt", "beta.txt", "gamma.txt"]);
    }

    #[test]
    fn test_two_node_cycle() {
        let err = resolve(&[("file1.txt", "file2.txt"), ("file2.txt", "file1.txt")]).unwrap_err();

        assert_eq!(err.cycle.nodes, vec!["file1.txt", "file2.txt"]);
        let message = err.to_string();
        assert!(message.contains("file1.txt"));
        assert!(message.contains("file2.txt"));
        assert!(message.contains("file1.txt -> file2.txt -> file1.txt"));
    }

    #[test]
    fn test_self_loop() {
        let err = resolve(&[("self.txt", "self.txt")]).unwrap_err();

        assert_eq!(err.cycle.nodes, vec!["self.txt"]);
        assert_eq!(err.to_string(), "found cyclic dependency: self.txt -> self.txt");
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        // "a" waits on the loop but is not part of it
        let err = resolve(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "d"),
            ("d", "b"),
            ("ok", "root"),
        ])
        .unwrap_err();

        assert_eq!(err.cycle.nodes, vec!["b", "c", "d"]);
        assert_eq!(err.cycle.cycle_path(), "b -> c -> d -> b");
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let names: Vec<String> = (0..5_000).map(|i| format!("n{i:05}")).collect();
        let mut edges: Vec<DependencyPair> = names
            .windows(2)
            .map(|w| DependencyPair::new(w[0].clone(), w[1].clone()))
            .collect();
        edges.push(DependencyPair::new(names[4_999].clone(), names[0].clone()));

        let err = TopologicalResolver::new().resolve(&edges).unwrap_err();
        assert_eq!(err.cycle.nodes.len(), 5_000);
    }

    fn arb_acyclic_edges() -> impl Strategy<Value = Vec<(usize, usize)>> {
        // Edges always point from a higher index to a lower one
        prop::collection::vec((1usize..20, 0usize..20), 0..40).prop_map(|raw| {
            raw.into_iter()
                .filter_map(|(a, b)| if b < a { Some((a, b)) } else { None })
                .collect()
        })
    }

    fn to_pairs(edges: &[(usize, usize)]) -> Vec<DependencyPair> {
        edges
            .iter()
            .map(|(a, b)| DependencyPair::new(format!("f{a:02}.txt"), format!("f{b:02}.txt")))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_dependencies_come_first(edges in arb_acyclic_edges()) {
            let pairs = to_pairs(&edges);
            let order = TopologicalResolver::new().resolve(&pairs).unwrap();

            let graph = DependencyGraph::from_pairs(&pairs);
            prop_assert_eq!(order.len(), graph.node_count());
            for pair in &pairs {
                prop_assert!(position(&order, &pair.dependency) < position(&order, &pair.dependent));
            }
        }

        #[test]
        fn prop_order_independent_of_input_order(edges in arb_acyclic_edges()) {
            let pairs = to_pairs(&edges);
            let mut reversed = pairs.clone();
            reversed.reverse();

            let first = TopologicalResolver::new().resolve(&pairs).unwrap();
            let second = TopologicalResolver::new().resolve(&reversed).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_cycle_always_reported(len in 1usize..12) {
            let mut pairs: Vec<DependencyPair> = (0..len)
                .map(|i| DependencyPair::new(format!("c{i}"), format!("c{}", (i + 1) % len)))
                .collect();
            pairs.push(DependencyPair::new("leaf", "c0"));

            let err = TopologicalResolver::new().resolve(&pairs).unwrap_err();
            prop_assert_eq!(err.cycle.nodes.len(), len);
            prop_assert!(!err.cycle.nodes.contains(&"leaf".to_string()));
        }
    }
}
