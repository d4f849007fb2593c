//! Actor community detection
//!
//! Bridges the movie graph to the optional `cinegraph-algorithms` crate:
//! projects actors into an undirected co-appearance graph (one unit of
//! weight per shared film) and runs Louvain on it. Deployments built
//! without the `graph-algorithms` feature report the capability as missing
//! instead of failing to compile callers.

use serde::Serialize;

/// An actor's community assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorCommunity {
    pub actor: String,
    pub community: usize,
}

#[cfg(feature = "graph-algorithms")]
mod detect {
    use super::ActorCommunity;
    use crate::error::EngineResult;
    use crate::graph::{GraphStore, Label, NodeId, EDGE_ACTED_IN, LABEL_ACTOR, LABEL_FILM};
    use cinegraph_algorithms::{louvain, GraphView};
    use tracing::info;

    /// Project the actor co-appearance graph.
    ///
    /// Every pair of actors billed on the same film gets one unit of edge
    /// weight per shared film, so frequent collaborators bind tighter.
    fn project_actors(store: &GraphStore) -> GraphView {
        let actors: Vec<u64> = store
            .get_nodes_by_label(&Label::new(LABEL_ACTOR))
            .iter()
            .map(|n| n.id.as_u64())
            .collect();
        let mut view = GraphView::with_nodes(actors);

        for film in store.get_nodes_by_label(&Label::new(LABEL_FILM)) {
            let mut cast: Vec<NodeId> = store
                .get_incoming_edges(film.id)
                .into_iter()
                .filter(|e| e.edge_type.as_str() == EDGE_ACTED_IN)
                .map(|e| e.source)
                .collect();
            cast.sort_unstable();
            cast.dedup();
            for (i, &a) in cast.iter().enumerate() {
                for &b in &cast[i + 1..] {
                    view.add_undirected_edge(a.as_u64(), b.as_u64(), 1.0);
                }
            }
        }
        view
    }

    /// Louvain communities over the actor co-appearance projection.
    ///
    /// Sorted by community id, then actor name, so output order is stable.
    pub fn detect_actor_communities(store: &GraphStore) -> EngineResult<Vec<ActorCommunity>> {
        let view = project_actors(store);
        let result = louvain(&view);

        let mut rows: Vec<ActorCommunity> = result
            .node_community
            .iter()
            .filter_map(|(&node, &community)| {
                let name = store.get_node(NodeId::new(node))?.display_name()?;
                Some(ActorCommunity {
                    actor: name.to_string(),
                    community,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.community.cmp(&b.community).then(a.actor.cmp(&b.actor)));

        info!(
            actors = rows.len(),
            communities = result.communities.len(),
            "detected actor communities"
        );
        Ok(rows)
    }
}

#[cfg(feature = "graph-algorithms")]
pub use detect::detect_actor_communities;

/// Without the `graph-algorithms` feature there is no Louvain backend; the
/// operation degrades to a capability error rather than an absent symbol.
#[cfg(not(feature = "graph-algorithms"))]
pub fn detect_actor_communities(
    _store: &crate::graph::GraphStore,
) -> crate::error::EngineResult<Vec<ActorCommunity>> {
    Err(crate::error::EngineError::Unsupported(
        "community detection requires the graph-algorithms feature",
    ))
}
