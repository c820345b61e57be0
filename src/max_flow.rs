use std::collections::HashSet;

use pathfinding::prelude::{bfs, bfs_reach};
use petgraph::graph::NodeIndex;
use tracing::{debug, trace};

use crate::network::FlowNetwork;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct MaxFlow {
    pub value: i64,
    pub augmentations: usize,
}

/// Edmonds-Karp: keep augmenting along a shortest residual path until the sink is cut off.
/// Every path carries at least one unit, and the total is bounded by the source capacities.
pub fn edmonds_karp(network: &mut FlowNetwork) -> MaxFlow {
    let (source, sink) = (network.source(), network.sink());
    let mut value = 0;
    let mut augmentations = 0;
    while let Some(path) = bfs(
        &source,
        |&node| network.residual_successors(node).collect::<Vec<_>>(),
        |&node| node == sink,
    ) {
        let edges: Vec<_> = path
            .windows(2)
            .filter_map(|pair| network.residual_edge(pair[0], pair[1]))
            .collect();
        assert_eq!(edges.len() + 1, path.len(), "augmenting path lost an arc");
        let Some(bottleneck) = edges.iter().map(|&edge| network.edge(edge).residual()).min() else {
            // source == sink, nothing to push
            break;
        };
        assert!(bottleneck > 0);
        debug_assert!(bottleneck < network.unbounded());
        for &edge in &edges {
            network.push(edge, bottleneck);
        }
        value += bottleneck;
        augmentations += 1;
        trace!(bottleneck, hops = edges.len(), "augmented");
    }
    debug!(value, augmentations, demand = network.demand(), "max flow");
    MaxFlow {
        value,
        augmentations,
    }
}

// nodes reachable from the source over arcs with residual capacity, i.e. the source side of a
// minimum cut once the flow is maximal
pub fn source_side(network: &FlowNetwork) -> HashSet<NodeIndex> {
    bfs_reach(network.source(), |&node| {
        network.residual_successors(node).collect::<Vec<_>>()
    })
    .collect()
}
