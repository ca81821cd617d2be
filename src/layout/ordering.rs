// src/layout/ordering.rs

use std::cmp::Ordering;

use crate::dag::TaskGraph;

/// Reorder the nodes of each rank to reduce edge crossings.
///
/// Iterated median heuristic: every pass sweeps upward (rank 1..=max, keyed
/// on dependencies) and then downward (max-1..=0, keyed on dependents). A
/// node is keyed by the median position of its neighbours; nodes without
/// neighbours on the swept side keep their current slot as the key. Ties
/// fall back to the current slot, so the result is deterministic.
///
/// The pass count is capped by the caller; this is a heuristic, not an
/// optimal crossing minimiser.
pub(super) fn order_ranks(graph: &TaskGraph, rank_nodes: &mut [Vec<usize>], passes: usize) {
    if rank_nodes.len() <= 1 {
        return;
    }

    let mut positions = vec![0usize; graph.len()];
    for bucket in rank_nodes.iter() {
        record_positions(bucket, &mut positions);
    }

    for _ in 0..passes.max(1) {
        for rank in 1..rank_nodes.len() {
            sort_bucket(
                &mut rank_nodes[rank],
                |v| graph.dep_indices(v),
                &mut positions,
            );
        }
        for rank in (0..rank_nodes.len() - 1).rev() {
            sort_bucket(
                &mut rank_nodes[rank],
                |v| graph.dependent_indices(v),
                &mut positions,
            );
        }
    }
}

fn record_positions(bucket: &[usize], positions: &mut [usize]) {
    for (slot, &node) in bucket.iter().enumerate() {
        positions[node] = slot;
    }
}

fn sort_bucket<'g, F>(bucket: &mut Vec<usize>, neighbors: F, positions: &mut [usize])
where
    F: Fn(usize) -> &'g [usize],
{
    if bucket.len() <= 1 {
        return;
    }

    let mut keyed: Vec<(f64, usize, usize)> = bucket
        .iter()
        .enumerate()
        .map(|(slot, &node)| {
            let key = median_position(neighbors(node), positions).unwrap_or(slot as f64);
            (key, slot, node)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });

    bucket.clear();
    bucket.extend(keyed.into_iter().map(|(_, _, node)| node));
    record_positions(bucket, positions);
}

fn median_position(neighbors: &[usize], positions: &[usize]) -> Option<f64> {
    if neighbors.is_empty() {
        return None;
    }
    let mut values: Vec<usize> = neighbors.iter().map(|&n| positions[n]).collect();
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid] as f64)
    } else {
        Some((values[mid - 1] + values[mid]) as f64 * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::RawTask;
    use crate::identifier::RawIdentifier;
    use crate::layout::ranking::{assign_ranks, rank_buckets};

    fn graph(tasks: &[(&str, &[&str])]) -> TaskGraph {
        let raw: Vec<RawTask> = tasks
            .iter()
            .map(|(name, deps)| RawTask {
                identifier: RawIdentifier::new(".", *name),
                deps: deps.iter().map(|d| RawIdentifier::new(".", *d)).collect(),
                task_type: "group".to_string(),
            })
            .collect();
        TaskGraph::build(&[], &raw).unwrap()
    }

    #[test]
    fn median_of_even_count_is_midpoint() {
        assert_eq!(median_position(&[0, 1], &[0, 3]), Some(1.5));
        assert_eq!(median_position(&[], &[]), None);
    }

    #[test]
    fn crossing_pair_is_untangled() {
        // Rank 0: a, b. Rank 1 in input order: x (on b), y (on a).
        // Keeping that order crosses the two edges; the sweep swaps x and y.
        let g = graph(&[("a", &[]), ("b", &[]), ("x", &["b"]), ("y", &["a"])]);
        let mut buckets = rank_buckets(&assign_ranks(&g));
        order_ranks(&g, &mut buckets, 4);

        let names: Vec<Vec<&str>> = buckets
            .iter()
            .map(|b| b.iter().map(|&i| g.node_at(i).id.name()).collect())
            .collect();

        let top = &names[1];
        let bottom = &names[0];
        let pos = |row: &Vec<&str>, n: &str| row.iter().position(|x| *x == n).unwrap();
        // x sits over b and y sits over a: same relative order on both ranks.
        assert_eq!(
            pos(top, "y") < pos(top, "x"),
            pos(bottom, "a") < pos(bottom, "b")
        );
    }

    #[test]
    fn single_rank_is_left_untouched() {
        let g = graph(&[("c", &[]), ("a", &[]), ("b", &[])]);
        let mut buckets = rank_buckets(&assign_ranks(&g));
        order_ranks(&g, &mut buckets, 4);
        assert_eq!(buckets, vec![vec![0, 1, 2]]);
    }
}
