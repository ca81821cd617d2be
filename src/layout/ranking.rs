// src/layout/ranking.rs

use std::collections::VecDeque;

use crate::dag::TaskGraph;

/// Longest-path layering over node indices.
///
/// Tasks with no dependencies get rank 0. Every other task gets
/// `1 + max(rank of its dependencies)`, so along every edge
/// (dependency -> dependent) the rank strictly increases.
///
/// One pass over a Kahn topological order; the graph is validated acyclic
/// before it ever reaches the layout engine.
pub(super) fn assign_ranks(graph: &TaskGraph) -> Vec<usize> {
    let n = graph.len();
    let mut unresolved: Vec<usize> = (0..n).map(|idx| graph.dep_indices(idx).len()).collect();
    let mut ready: VecDeque<usize> = (0..n).filter(|&idx| unresolved[idx] == 0).collect();
    let mut ranks = vec![0usize; n];
    let mut visited = 0usize;

    while let Some(u) = ready.pop_front() {
        visited += 1;
        for &v in graph.dependent_indices(u) {
            ranks[v] = ranks[v].max(ranks[u] + 1);
            unresolved[v] -= 1;
            if unresolved[v] == 0 {
                ready.push_back(v);
            }
        }
    }

    debug_assert_eq!(visited, n, "layout received a graph with a cycle");
    ranks
}

/// Group node indices by rank, keeping input order inside each rank.
pub(super) fn rank_buckets(ranks: &[usize]) -> Vec<Vec<usize>> {
    let Some(max_rank) = ranks.iter().copied().max() else {
        return Vec::new();
    };
    let mut buckets = vec![Vec::new(); max_rank + 1];
    for (idx, &rank) in ranks.iter().enumerate() {
        buckets[rank].push(idx);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::RawTask;
    use crate::identifier::RawIdentifier;

    fn graph(tasks: &[(&str, &[&str])]) -> TaskGraph {
        let raw: Vec<RawTask> = tasks
            .iter()
            .map(|(name, deps)| RawTask {
                identifier: RawIdentifier::new(".", *name),
                deps: deps.iter().map(|d| RawIdentifier::new(".", *d)).collect(),
                task_type: "run_command".to_string(),
            })
            .collect();
        TaskGraph::build(&[], &raw).unwrap()
    }

    #[test]
    fn longest_path_wins() {
        // a <- b <- c, and a <- c directly: c must sit above b.
        let g = graph(&[("a", &[]), ("b", &["a"]), ("c", &["a", "b"])]);
        assert_eq!(assign_ranks(&g), vec![0, 1, 2]);
    }

    #[test]
    fn independent_nodes_share_rank_zero() {
        let g = graph(&[("x", &[]), ("y", &[]), ("z", &[])]);
        assert_eq!(assign_ranks(&g), vec![0, 0, 0]);
        assert_eq!(rank_buckets(&assign_ranks(&g)), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn buckets_of_nothing_are_empty() {
        assert!(rank_buckets(&[]).is_empty());
    }
}
