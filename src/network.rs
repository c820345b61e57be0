use std::collections::HashMap;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::standings::Standings;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum FlowNode {
    Source,
    Sink,
    // remaining games between two teams, first < second
    Game(usize, usize),
    Team(usize),
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct FlowEdge {
    pub capacity: i64,
    // negative on residual twins
    pub flow: i64,
}

impl FlowEdge {
    pub fn residual(&self) -> i64 {
        self.capacity - self.flow
    }
}

/// Network asking whether every remaining game can be played out without any team finishing
/// ahead of the candidate. Each arc is stored next to its residual twin, so arc `2k` is a real
/// edge and `2k + 1` runs the other way with zero capacity.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    graph: DiGraph<FlowNode, FlowEdge>,
    source: NodeIndex,
    sink: NodeIndex,
    team_nodes: HashMap<usize, NodeIndex>,
    game_nodes: HashMap<NodeIndex, (usize, usize)>,
    // sum of the source capacities, i.e. the number of games left among the other teams
    demand: i64,
    unbounded: i64,
}

impl FlowNetwork {
    /// Builds the network for `candidate`, which must already have passed the trivial check:
    /// no other team may have more wins than the candidate can still reach.
    pub fn build(standings: &Standings, candidate: usize) -> Self {
        let n = standings.number_of_teams();
        let record = standings.record_at(candidate);
        let best = i64::from(record.wins) + i64::from(record.remaining);
        let pairs: Vec<(usize, usize, i64)> = (0..n)
            .filter(|&i| i != candidate)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(_, j)| j != candidate)
            .map(|(i, j)| (i, j, i64::from(standings.games_between(i, j))))
            .filter(|&(_, _, games)| games > 0)
            .collect();
        let demand: i64 = pairs.iter().map(|&(_, _, games)| games).sum();

        let mut graph = DiGraph::with_capacity(pairs.len() + n + 1, 2 * (3 * pairs.len() + n));
        let source = graph.add_node(FlowNode::Source);
        let sink = graph.add_node(FlowNode::Sink);
        let mut network = FlowNetwork {
            graph,
            source,
            sink,
            team_nodes: HashMap::with_capacity(n),
            game_nodes: HashMap::with_capacity(pairs.len()),
            demand,
            unbounded: demand + 1,
        };

        for team in (0..n).filter(|&i| i != candidate) {
            let node = network.graph.add_node(FlowNode::Team(team));
            network.team_nodes.insert(team, node);
            let wins = i64::from(standings.record_at(team).wins);
            assert!(
                wins <= best,
                "team {} is trivially eliminated by {}",
                standings.name(candidate),
                standings.name(team)
            );
            network.add_edge(node, sink, best - wins);
        }
        for (i, j, games) in pairs {
            let node = network.graph.add_node(FlowNode::Game(i, j));
            network.game_nodes.insert(node, (i, j));
            network.add_edge(source, node, games);
            let (first, second) = (network.team_nodes[&i], network.team_nodes[&j]);
            network.add_edge(node, first, network.unbounded);
            network.add_edge(node, second, network.unbounded);
        }
        network
    }
    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, capacity: i64) -> EdgeIndex {
        assert!(capacity >= 0, "negative capacity {}", capacity);
        let edge = self.graph.add_edge(from, to, FlowEdge { capacity, flow: 0 });
        self.graph.add_edge(to, from, FlowEdge { capacity: 0, flow: 0 });
        edge
    }
    pub fn source(&self) -> NodeIndex {
        self.source
    }
    pub fn sink(&self) -> NodeIndex {
        self.sink
    }
    pub fn demand(&self) -> i64 {
        self.demand
    }
    // stands in for infinity on game -> team arcs; strictly larger than any feasible flow
    pub fn unbounded(&self) -> i64 {
        self.unbounded
    }
    /// What a node of the network stands for.
    pub fn node(&self, node: NodeIndex) -> FlowNode {
        self.graph[node]
    }
    /// Source, sink, one node per other team and one per pair with games left.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
    pub fn team_node(&self, team: usize) -> Option<NodeIndex> {
        self.team_nodes.get(&team).copied()
    }
    pub fn team_nodes(&self) -> impl Iterator<Item = (usize, NodeIndex)> + '_ {
        self.team_nodes.iter().map(|(&team, &node)| (team, node))
    }
    pub fn game_nodes(&self) -> impl Iterator<Item = (NodeIndex, (usize, usize))> + '_ {
        self.game_nodes.iter().map(|(&node, &pair)| (node, pair))
    }
    pub fn edge(&self, edge: EdgeIndex) -> FlowEdge {
        self.graph[edge]
    }
    pub fn residual_successors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges(node)
            .filter(|edge| edge.weight().residual() > 0)
            .map(|edge| edge.target())
    }
    pub fn residual_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
        self.graph
            .edges_connecting(from, to)
            .find(|edge| edge.weight().residual() > 0)
            .map(|edge| edge.id())
    }
    pub fn push(&mut self, edge: EdgeIndex, amount: i64) {
        let twin = EdgeIndex::new(edge.index() ^ 1);
        let arc = &mut self.graph[edge];
        assert!(
            amount <= arc.residual(),
            "pushing {} over an arc with residual {}",
            amount,
            arc.residual()
        );
        arc.flow += amount;
        self.graph[twin].flow -= amount;
    }
    // net flow on the real arcs leaving `node`
    pub fn outflow(&self, node: NodeIndex) -> i64 {
        self.real_edges(node, Direction::Outgoing)
            .map(|edge| edge.flow)
            .sum()
    }
    pub fn inflow(&self, node: NodeIndex) -> i64 {
        self.real_edges(node, Direction::Incoming)
            .map(|edge| edge.flow)
            .sum()
    }
    fn real_edges(
        &self,
        node: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = FlowEdge> + '_ {
        self.graph
            .edges_directed(node, direction)
            .filter(|edge| edge.id().index() % 2 == 0)
            .map(|edge| *edge.weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams4() -> Standings {
        "4
        Atlanta       83 71  8  0 1 6 1
        Philadelphia  80 79  3  1 0 0 2
        New_York      78 78  6  6 0 0 0
        Montreal      77 82  3  1 2 0 0"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_build_topology() {
        let standings = teams4();
        // Atlanta: only Philadelphia-Montreal games remain among the others
        let network = FlowNetwork::build(&standings, 0);
        assert_eq!(network.demand(), 2);
        assert_eq!(network.unbounded(), 3);
        assert_eq!(network.game_nodes().count(), 1);
        assert_eq!(network.team_nodes().count(), 3);
        assert_eq!(network.node_count(), 2 + 1 + 3);
        assert_eq!(network.team_node(0), None);
        let (game, pair) = network.game_nodes().next().unwrap();
        assert_eq!(pair, (1, 3));
        assert_eq!(network.node(game), FlowNode::Game(1, 3));
    }

    #[test]
    fn test_sink_capacities() {
        let standings = teams4();
        // New_York can still reach 84 wins
        let network = FlowNetwork::build(&standings, 2);
        let mut capacities: Vec<(usize, i64)> = network
            .team_nodes()
            .map(|(team, node)| {
                let edge = network.residual_edge(node, network.sink()).unwrap();
                (team, network.edge(edge).capacity)
            })
            .collect();
        capacities.sort();
        assert_eq!(capacities, [(0, 1), (1, 4), (3, 7)]);
        assert_eq!(network.demand(), 1 + 1 + 2);
    }

    #[test]
    fn test_push_updates_twin() {
        let standings = teams4();
        let mut network = FlowNetwork::build(&standings, 0);
        let (game, _) = network.game_nodes().next().unwrap();
        let edge = network.residual_edge(network.source(), game).unwrap();
        network.push(edge, 1);
        assert_eq!(network.edge(edge).residual(), 1);
        let back = network.residual_edge(game, network.source()).unwrap();
        assert_eq!(network.edge(back).residual(), 1);
        assert_eq!(network.outflow(network.source()), 1);
    }

    #[test]
    #[should_panic]
    fn test_trivially_eliminated_candidate_panics() {
        // Montreal cannot pass Atlanta's 83 wins
        let standings: Standings = "2 Atlanta 83 71 8 0 0 Montreal 77 82 3 0 0".parse().unwrap();
        FlowNetwork::build(&standings, 1);
    }
}
