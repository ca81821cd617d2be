// src/layout/coords.rs

use crate::dag::TaskGraph;
use crate::layout::{EdgeRoute, LayoutConfig};
use crate::types::{LayoutDirection, NodeDimension, Point};

/// Place every node (top-left corner) given its rank and its slot in the rank.
///
/// Each rank is a horizontal band as tall as its tallest node; bands are
/// stacked with `rank_sep` between them and nodes are centered vertically in
/// their band. Inside a band, nodes are packed left to right with `node_gap`
/// between them and the packed row is centered on `x = 0`.
pub(super) fn assign_coordinates(
    rank_nodes: &[Vec<usize>],
    sizes: &[NodeDimension],
    config: &LayoutConfig,
) -> Vec<Point> {
    let mut points = vec![Point::default(); sizes.len()];
    if rank_nodes.is_empty() {
        return points;
    }

    let band_heights: Vec<f64> = rank_nodes
        .iter()
        .map(|bucket| {
            bucket
                .iter()
                .map(|&node| sizes[node].height)
                .fold(0.0_f64, f64::max)
        })
        .collect();

    let screen_order: Vec<usize> = match config.direction {
        LayoutDirection::BottomToTop => (0..rank_nodes.len()).rev().collect(),
        LayoutDirection::TopToBottom => (0..rank_nodes.len()).collect(),
    };

    let mut band_tops = vec![0.0_f64; rank_nodes.len()];
    let mut cursor = 0.0_f64;
    for (i, &rank) in screen_order.iter().enumerate() {
        if i > 0 {
            cursor += config.rank_sep;
        }
        band_tops[rank] = cursor;
        cursor += band_heights[rank];
    }

    for (rank, bucket) in rank_nodes.iter().enumerate() {
        let row_width: f64 = bucket.iter().map(|&node| sizes[node].width).sum::<f64>()
            + bucket.len().saturating_sub(1) as f64 * config.node_gap;

        let mut x = -row_width / 2.0;
        for &node in bucket {
            let size = sizes[node];
            let y = band_tops[rank] + (band_heights[rank] - size.height) / 2.0;
            points[node] = Point::new(x, y);
            x += size.width + config.node_gap;
        }
    }

    points
}

/// One straight connector per (dependency -> dependent) pair, in node input
/// order and then dependency order.
///
/// The connector leaves the side of the dependency that faces its dependent
/// and enters the facing side of the dependent. With the default
/// bottom-to-top direction that is top-center to bottom-center.
pub(super) fn route_edges(
    graph: &TaskGraph,
    points: &[Point],
    sizes: &[NodeDimension],
    direction: LayoutDirection,
) -> Vec<EdgeRoute> {
    let mut edges = Vec::new();

    for dependent in 0..graph.len() {
        for &dependency in graph.dep_indices(dependent) {
            let (source, target) = match direction {
                LayoutDirection::BottomToTop => (
                    top_center(points[dependency], sizes[dependency]),
                    bottom_center(points[dependent], sizes[dependent]),
                ),
                LayoutDirection::TopToBottom => (
                    bottom_center(points[dependency], sizes[dependency]),
                    top_center(points[dependent], sizes[dependent]),
                ),
            };

            edges.push(EdgeRoute {
                from: graph.node_at(dependency).id.clone(),
                to: graph.node_at(dependent).id.clone(),
                source,
                target,
            });
        }
    }

    edges
}

fn top_center(p: Point, size: NodeDimension) -> Point {
    Point::new(p.x + size.width / 2.0, p.y)
}

fn bottom_center(p: Point, size: NodeDimension) -> Point {
    Point::new(p.x + size.width / 2.0, p.y + size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(direction: LayoutDirection) -> LayoutConfig {
        LayoutConfig {
            direction,
            rank_sep: 10.0,
            node_gap: 5.0,
            ordering_passes: 1,
        }
    }

    #[test]
    fn row_is_centered_on_origin() {
        let sizes = vec![NodeDimension::new(20.0, 10.0), NodeDimension::new(40.0, 10.0)];
        let points = assign_coordinates(&[vec![0, 1]], &sizes, &config(LayoutDirection::BottomToTop));

        // 20 + 5 + 40 = 65 wide, so the row starts at -32.5.
        assert_eq!(points[0], Point::new(-32.5, 0.0));
        assert_eq!(points[1], Point::new(-7.5, 0.0));
    }

    #[test]
    fn bands_stack_by_tallest_node() {
        let sizes = vec![
            NodeDimension::new(10.0, 20.0),
            NodeDimension::new(10.0, 40.0),
            NodeDimension::new(10.0, 30.0),
        ];
        let ranks = vec![vec![0, 1], vec![2]];

        let bt = assign_coordinates(&ranks, &sizes, &config(LayoutDirection::BottomToTop));
        // Rank 1 band on top (height 30), then 10 gap, then rank 0 band (height 40).
        assert_eq!(bt[2].y, 0.0);
        assert_eq!(bt[1].y, 40.0);
        assert_eq!(bt[0].y, 50.0);

        let tb = assign_coordinates(&ranks, &sizes, &config(LayoutDirection::TopToBottom));
        assert_eq!(tb[1].y, 0.0);
        assert_eq!(tb[0].y, 10.0);
        assert_eq!(tb[2].y, 50.0);
    }

    #[test]
    fn zero_sized_nodes_stay_separated_by_gap() {
        let sizes = vec![NodeDimension::ZERO; 3];
        let points = assign_coordinates(&[vec![0, 1, 2]], &sizes, &config(LayoutDirection::BottomToTop));
        assert_eq!(points[0].x, -5.0);
        assert_eq!(points[1].x, 0.0);
        assert_eq!(points[2].x, 5.0);
    }
}
