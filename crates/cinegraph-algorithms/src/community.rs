//! Community detection algorithms
//!
//! Louvain method: greedy modularity optimization in two repeated phases,
//! local node moves followed by graph aggregation.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Result of Louvain community detection
pub struct LouvainResult {
    /// Map of Community ID -> List of NodeIds
    pub communities: HashMap<usize, Vec<NodeId>>,
    /// Map of NodeId -> Community ID
    pub node_community: HashMap<NodeId, usize>,
}

/// Working graph for one aggregation level.
///
/// Inter-node links are stored in both endpoint lists; `selfw` holds the
/// self-loop weight accumulated by collapsing a community (counted twice in
/// the weighted degree, per the usual modularity convention).
struct LevelGraph {
    links: Vec<Vec<(usize, f64)>>,
    selfw: Vec<f64>,
}

impl LevelGraph {
    fn node_count(&self) -> usize {
        self.links.len()
    }

    fn degree(&self, i: usize) -> f64 {
        self.links[i].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * self.selfw[i]
    }

    fn total_degree(&self) -> f64 {
        (0..self.node_count()).map(|i| self.degree(i)).sum()
    }
}

/// One pass of local moving. Returns the community of each node and whether
/// any node changed community.
fn local_moving(graph: &LevelGraph) -> (Vec<usize>, bool) {
    let n = graph.node_count();
    let m2 = graph.total_degree();
    let mut community: Vec<usize> = (0..n).collect();

    if m2 == 0.0 {
        // No edges: every node is its own community.
        return (community, false);
    }

    let k: Vec<f64> = (0..n).map(|i| graph.degree(i)).collect();
    let mut sum_tot: Vec<f64> = k.clone();
    let mut improved = false;

    loop {
        let mut moved = false;

        for i in 0..n {
            let own = community[i];

            // 1. Weight from i to each neighboring community (self-loops excluded)
            let mut neigh_weight: HashMap<usize, f64> = HashMap::new();
            for &(j, w) in &graph.links[i] {
                *neigh_weight.entry(community[j]).or_insert(0.0) += w;
            }

            // 2. Remove i from its community
            sum_tot[own] -= k[i];

            // 3. Pick the community with the best modularity gain.
            // Candidates are visited in community-id order so ties resolve
            // deterministically.
            let mut candidates: Vec<(usize, f64)> =
                neigh_weight.iter().map(|(&c, &w)| (c, w)).collect();
            candidates.sort_by_key(|&(c, _)| c);

            let own_weight = neigh_weight.get(&own).copied().unwrap_or(0.0);
            let mut best = own;
            let mut best_gain = own_weight - sum_tot[own] * k[i] / m2;

            for (c, w) in candidates {
                let gain = w - sum_tot[c] * k[i] / m2;
                if gain > best_gain {
                    best = c;
                    best_gain = gain;
                }
            }

            // 4. Reinsert into the chosen community
            sum_tot[best] += k[i];
            if best != own {
                community[i] = best;
                moved = true;
                improved = true;
            }
        }

        if !moved {
            break;
        }
    }

    (community, improved)
}

/// Renumber community labels densely (0..C) in order of first appearance.
fn renumber(community: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let mut dense = Vec::with_capacity(community.len());
    for &c in community {
        let next = mapping.len();
        let id = *mapping.entry(c).or_insert(next);
        dense.push(id);
    }
    (dense, mapping.len())
}

/// Collapse communities into a smaller graph for the next level.
fn aggregate(graph: &LevelGraph, community: &[usize], count: usize) -> LevelGraph {
    let mut links_map: Vec<HashMap<usize, f64>> = vec![HashMap::new(); count];
    let mut selfw = vec![0.0; count];

    for (i, s) in graph.selfw.iter().enumerate() {
        selfw[community[i]] += s;
    }

    for i in 0..graph.node_count() {
        let ci = community[i];
        for &(j, w) in &graph.links[i] {
            let cj = community[j];
            if ci == cj {
                // Both endpoints stored the link, so halve to count it once.
                selfw[ci] += w / 2.0;
            } else {
                *links_map[ci].entry(cj).or_insert(0.0) += w;
            }
        }
    }

    let links = links_map
        .into_iter()
        .map(|m| {
            let mut v: Vec<(usize, f64)> = m.into_iter().collect();
            v.sort_by_key(|&(c, _)| c);
            v
        })
        .collect();

    LevelGraph { links, selfw }
}

/// Louvain community detection over an undirected weighted view.
///
/// Repeats local moving and aggregation until a full level yields no
/// improvement. Community ids are dense and assigned in order of first
/// appearance over the view's node order; isolated nodes end up in
/// singleton communities.
pub fn louvain(view: &GraphView) -> LouvainResult {
    let n = view.node_count;
    let mut graph = LevelGraph {
        links: view.neighbors.clone(),
        selfw: vec![0.0; n],
    };

    // assignment[original_index] -> node index in the current level graph
    let mut assignment: Vec<usize> = (0..n).collect();

    loop {
        let (community, improved) = local_moving(&graph);
        if !improved {
            break;
        }

        let prev = graph.node_count();
        let (dense, count) = renumber(&community);
        for a in assignment.iter_mut() {
            *a = dense[*a];
        }
        graph = aggregate(&graph, &dense, count);

        // No communities merged: another level cannot improve further.
        if count == prev {
            break;
        }
    }

    let (final_assignment, _) = renumber(&assignment);

    let mut communities: HashMap<usize, Vec<NodeId>> = HashMap::new();
    let mut node_community = HashMap::new();
    for (idx, &c) in final_assignment.iter().enumerate() {
        let node_id = view.index_to_node[idx];
        communities.entry(c).or_insert_with(Vec::new).push(node_id);
        node_community.insert(node_id, c);
    }

    LouvainResult {
        communities,
        node_community,
    }
}
