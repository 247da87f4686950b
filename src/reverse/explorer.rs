//! Bounded breadth-first exploration of the reverse-transition tree

use super::tree::{LeafRef, Node, SearchTree};
use rayon::prelude::*;
use std::fmt;

/// Level-by-level builder of the reverse-transition tree.
///
/// Borrows the alphabet, the caller's transition/acceptance callbacks and
/// the boundary states for the duration of one search.
pub(crate) struct Explorer<'a, S, R, C, A> {
    symbols: &'a [String],
    reversed_hash: &'a R,
    check: &'a C,
    accept: &'a A,
    terminal_state: &'a S,
    initial_state: &'a S,
    max_string_length: usize,
}

/// Everything one search produced: the tree, the solution leaves and the
/// counters accumulated along the way.
pub(crate) struct Exploration<S> {
    pub tree: SearchTree<S>,
    pub leaves: Vec<LeafRef>,
    pub statistics: SearchStatistics,
}

/// Counters describing a completed search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Number of frontiers that were expanded.
    pub levels_explored: usize,
    /// Number of nodes created across all levels past the root.
    pub nodes_created: usize,
    /// Number of (node, symbol) steps rejected by the acceptance test.
    pub steps_rejected: usize,
    /// Number of solution leaves collected.
    pub solutions_found: usize,
    /// Whether the search stopped before the depth cap (empty frontier or
    /// monotonicity pruning).
    pub stopped_early: bool,
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Levels explored: {}", self.levels_explored)?;
        writeln!(f, "  Nodes created: {}", self.nodes_created)?;
        writeln!(f, "  Steps rejected: {}", self.steps_rejected)?;
        writeln!(f, "  Solutions found: {}", self.solutions_found)?;
        write!(
            f,
            "  Stopped early: {}",
            if self.stopped_early { "yes" } else { "no" }
        )
    }
}

impl<'a, S, R, C, A> Explorer<'a, S, R, C, A>
where
    S: Clone + Ord + Send + Sync,
    R: Fn(&str, &S) -> S + Sync,
    C: Fn(&str, &S) -> S + Sync,
    A: Fn(&S) -> bool + Sync,
{
    pub fn new(
        symbols: &'a [String],
        reversed_hash: &'a R,
        check: &'a C,
        accept: &'a A,
        terminal_state: &'a S,
        initial_state: &'a S,
        max_string_length: usize,
    ) -> Self {
        Self {
            symbols,
            reversed_hash,
            check,
            accept,
            terminal_state,
            initial_state,
            max_string_length,
        }
    }

    /// Run the bounded search, returning the tree, the solution leaves and
    /// the accumulated statistics.
    pub fn run(&self) -> Exploration<S> {
        let mut tree = SearchTree::with_root(self.terminal_state.clone());
        let mut leaves = Vec::new();
        let mut statistics = SearchStatistics::default();

        let mut depth = 0;
        while self.should_continue(tree.level(depth), depth) {
            let children = self.expand(tree.level(depth));

            statistics.levels_explored += 1;
            statistics.steps_rejected +=
                tree.level(depth).len() * self.symbols.len() - children.len();

            // Leaves are decided at node-creation time: a node whose state
            // already equals the initial state is a complete solution path.
            for (index, child) in children.iter().enumerate() {
                if child.state == *self.initial_state {
                    leaves.push(LeafRef {
                        level: depth + 1,
                        index,
                    });
                }
            }

            tree.push_level(children);
            depth += 1;
        }

        statistics.stopped_early = depth < self.max_string_length;
        statistics.nodes_created = tree.node_count() - 1;
        statistics.solutions_found = leaves.len();

        Exploration {
            tree,
            leaves,
            statistics,
        }
    }

    /// Expand one frontier into the next level.
    ///
    /// Every (node, symbol) pair is independent, so expansion runs as a
    /// parallel map over the frontier; per-worker buffers are merged into a
    /// single `Vec` at the level boundary.
    fn expand(&self, frontier: &[Node<S>]) -> Vec<Node<S>> {
        frontier
            .par_iter()
            .enumerate()
            .flat_map_iter(|(parent, node)| {
                self.symbols
                    .iter()
                    .enumerate()
                    .filter_map(move |(symbol_index, symbol)| {
                        let probe = (self.check)(symbol.as_str(), &node.state);
                        if (self.accept)(&probe) && probe >= *self.initial_state {
                            Some(Node {
                                symbol: Some(symbol_index),
                                state: (self.reversed_hash)(symbol.as_str(), &node.state),
                                parent: Some(parent),
                            })
                        } else {
                            None
                        }
                    })
            })
            .collect()
    }

    /// Whether the frontier at `depth` should be expanded at all.
    ///
    /// Expansion stops on an empty frontier, at the depth cap, or as soon
    /// as any frontier node's state has fallen below the initial state
    /// under the caller's ordering (the monotonicity pruning rule).
    fn should_continue(&self, frontier: &[Node<S>], depth: usize) -> bool {
        !frontier.is_empty()
            && depth < self.max_string_length
            && frontier
                .iter()
                .all(|node| node.state >= *self.initial_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_value(token: &str) -> i64 {
        match token {
            "a" => 1,
            _ => 2,
        }
    }

    fn toy_reverse(token: &str, state: &i64) -> i64 {
        (*state / 5 - toy_value(token)) / 3
    }

    fn toy_check(token: &str, state: &i64) -> i64 {
        if *state % 5 == 0 {
            *state / 5 - toy_value(token)
        } else {
            -1
        }
    }

    fn toy_accept(state: &i64) -> bool {
        *state % 3 == 0
    }

    fn alphabet() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    fn explore(terminal: i64, max_string_length: usize) -> Exploration<i64> {
        let symbols = alphabet();
        let initial = 0i64;
        Explorer::new(
            &symbols,
            &toy_reverse,
            &toy_check,
            &toy_accept,
            &terminal,
            &initial,
            max_string_length,
        )
        .run()
    }

    #[test]
    fn test_single_solution_leaf() {
        // 1205 is the digest of "aaa" under the toy hash.
        let exploration = explore(1205, 3);

        assert_eq!(exploration.leaves.len(), 1);
        let leaf = exploration.leaves[0];
        assert_eq!(leaf.level, 3);
        assert_eq!(exploration.tree.symbol_path(leaf), vec![0, 0, 0]);
        assert_eq!(exploration.statistics.solutions_found, 1);
    }

    #[test]
    fn test_unreachable_terminal_stops_on_empty_frontier() {
        // 7 is not divisible by the toy scale, so no reverse step exists.
        let exploration = explore(7, 5);

        assert!(exploration.leaves.is_empty());
        assert_eq!(exploration.statistics.levels_explored, 1);
        assert_eq!(exploration.statistics.nodes_created, 0);
        assert!(exploration.statistics.stopped_early);
    }

    #[test]
    fn test_depth_cap_reached_without_solutions() {
        // Large enough that three levels never reach the initial state.
        let exploration = explore(1205, 2);

        assert!(exploration.leaves.is_empty());
        assert_eq!(exploration.statistics.levels_explored, 2);
        assert!(!exploration.statistics.stopped_early);
    }

    #[test]
    fn test_monotonicity_pruning_stops_expansion() {
        // The check state mirrors the current state, so admission never
        // rejects, while each committed transition subtracts 10. The
        // frontier is abandoned once its states drop below the initial
        // state.
        let symbols = alphabet();
        let terminal = 15i64;
        let initial = 0i64;
        let reverse = |_: &str, state: &i64| *state - 10;
        let check = |_: &str, state: &i64| *state;
        let accept = |_: &i64| true;

        let exploration =
            Explorer::new(&symbols, &reverse, &check, &accept, &terminal, &initial, 5).run();

        // Level 1 holds states of 5, level 2 states of -5; level 2 is
        // materialized but never expanded.
        assert_eq!(exploration.statistics.levels_explored, 2);
        assert_eq!(exploration.tree.depth(), 3);
        assert!(exploration.statistics.stopped_early);
        assert!(exploration.leaves.is_empty());
    }

    #[test]
    fn test_leaf_frontier_keeps_expanding() {
        // 5 is the digest of "a"; the solution leaf sits at level 1 and the
        // search still tries to extend it before running dry.
        let exploration = explore(5, 3);

        assert_eq!(exploration.leaves.len(), 1);
        assert_eq!(exploration.leaves[0].level, 1);
        assert_eq!(exploration.statistics.levels_explored, 2);
        assert!(exploration.statistics.stopped_early);
    }

    #[test]
    fn test_rejected_steps_are_counted() {
        let exploration = explore(1205, 3);

        // Level 0: "b" rejected. Level 1 (state 80): "b" rejected.
        // Level 2 (state 5): "b" rejected. Level 3 is the leaf frontier and
        // is never expanded because the depth cap is reached.
        assert_eq!(exploration.statistics.nodes_created, 3);
        assert_eq!(exploration.statistics.steps_rejected, 3);
    }
}
