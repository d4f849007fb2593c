//! Graph query engine
//!
//! The exploratory questions asked of the movie graph: actor filmographies
//! and collaborations, genre and director rollups, the director-influence
//! mutation, and shortest collaboration paths. Every read borrows the store
//! immutably; only the influence derivation takes `&mut`.
//!
//! Determinism: wherever a ranking can tie, the larger count wins first and
//! the lexicographically smaller name breaks the tie, so repeated runs over
//! the same dataset print the same answers.

use super::store::GraphStore;
use super::types::{EdgeType, Label, NodeId};
use super::{EDGE_ACTED_IN, EDGE_DIRECTED, EDGE_HAS_GENRE, EDGE_INFLUENCED_BY};
use super::{LABEL_ACTOR, LABEL_DIRECTOR, LABEL_FILM, LABEL_GENRE};
use crate::error::EngineResult;
use crate::stats::Mean;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::info;

/// An actor ranked by how many films they appear in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorFilmCount {
    pub actor: String,
    pub films: usize,
}

/// An actor ranked by the summed revenue of their films.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorRevenue {
    pub actor: String,
    pub revenue: f64,
}

/// A genre ranked by how many distinct films carry it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub films: usize,
}

/// A director ranked by how many distinct actors they have directed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorActorCount {
    pub director: String,
    pub actors: usize,
}

/// A film ranked by how many other films it shares an actor with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmConnections {
    pub title: String,
    pub connections: usize,
}

/// An actor ranked by how many distinct directors they have worked with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorDirectorCount {
    pub actor: String,
    pub directors: usize,
}

/// One hop of a collaboration path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub from: String,
    pub relation: String,
    pub to: String,
}

fn actor_label() -> Label {
    Label::new(LABEL_ACTOR)
}

/// Look up an entity node by its `name` property under a label.
fn find_by_name(store: &GraphStore, label: &str, name: &str) -> Option<NodeId> {
    store
        .get_nodes_by_label(&Label::new(label))
        .into_iter()
        .find(|n| n.get_property("name").and_then(|v| v.as_string()) == Some(name))
        .map(|n| n.id)
}

/// Films an actor (or director) points at through an edge type.
fn films_via(store: &GraphStore, person: NodeId, edge_type: &str) -> Vec<NodeId> {
    store
        .get_outgoing_edges(person)
        .into_iter()
        .filter(|e| e.edge_type.as_str() == edge_type)
        .map(|e| e.target)
        .collect()
}

/// Actors billed on a film, via incoming `A_JOUE` edges.
fn cast_of(store: &GraphStore, film: NodeId) -> Vec<NodeId> {
    store
        .get_incoming_edges(film)
        .into_iter()
        .filter(|e| e.edge_type.as_str() == EDGE_ACTED_IN)
        .map(|e| e.source)
        .collect()
}

fn name_of(store: &GraphStore, id: NodeId) -> Option<String> {
    store
        .get_node(id)?
        .display_name()
        .map(|s| s.to_string())
}

/// Pick the (count, name) pair with the highest count, smallest name on ties.
fn max_by_count<T: From<(String, usize)>>(counts: FxHashMap<String, usize>) -> Option<T> {
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(name, count)| T::from((name, count)))
}

impl From<(String, usize)> for ActorFilmCount {
    fn from((actor, films): (String, usize)) -> Self {
        ActorFilmCount { actor, films }
    }
}

impl From<(String, usize)> for GenreCount {
    fn from((genre, films): (String, usize)) -> Self {
        GenreCount { genre, films }
    }
}

impl From<(String, usize)> for DirectorActorCount {
    fn from((director, actors): (String, usize)) -> Self {
        DirectorActorCount { director, actors }
    }
}

/// The actor who appears in the most films.
pub fn top_actor_by_films(store: &GraphStore) -> Option<ActorFilmCount> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for actor in store.get_nodes_by_label(&actor_label()) {
        if let Some(name) = actor.display_name() {
            counts.insert(name.to_string(), films_via(store, actor.id, EDGE_ACTED_IN).len());
        }
    }
    max_by_count(counts)
}

/// Everyone who shared at least one film with the named actor.
///
/// Unknown actors yield an empty list, the same as an actor with no
/// collaborators. Results are deduplicated and sorted by name.
pub fn co_actors(store: &GraphStore, name: &str) -> Vec<String> {
    let Some(actor) = find_by_name(store, LABEL_ACTOR, name) else {
        return Vec::new();
    };
    let mut result: BTreeSet<String> = BTreeSet::new();
    for film in films_via(store, actor, EDGE_ACTED_IN) {
        for co in cast_of(store, film) {
            if co != actor {
                if let Some(co_name) = name_of(store, co) {
                    result.insert(co_name);
                }
            }
        }
    }
    result.into_iter().collect()
}

/// The actor whose films gross the most in total.
///
/// Revenue lives on the film node in whatever form the dataset held it;
/// films whose revenue does not coerce to a number contribute nothing.
pub fn top_actor_by_revenue(store: &GraphStore) -> Option<ActorRevenue> {
    let mut best: Option<ActorRevenue> = None;
    for actor in store.get_nodes_by_label(&actor_label()) {
        let Some(name) = actor.display_name() else {
            continue;
        };
        let revenue: f64 = films_via(store, actor.id, EDGE_ACTED_IN)
            .into_iter()
            .filter_map(|film| {
                store
                    .get_node(film)?
                    .get_property(crate::document::FIELD_REVENUE)?
                    .coerce_f64()
            })
            .sum();
        let better = match &best {
            None => true,
            Some(b) => revenue > b.revenue || (revenue == b.revenue && name < b.actor.as_str()),
        };
        if better {
            best = Some(ActorRevenue {
                actor: name.to_string(),
                revenue,
            });
        }
    }
    best
}

/// Average of a numeric film property across all films that carry it.
///
/// `None` when no film has a coercible value for the field.
pub fn average_film_field(store: &GraphStore, field: &str) -> Option<f64> {
    let mut mean = Mean::default();
    for film in store.get_nodes_by_label(&Label::new(LABEL_FILM)) {
        if let Some(v) = film.get_property(field).and_then(|p| p.coerce_f64()) {
            mean.push(v);
        }
    }
    mean.value()
}

/// The genre attached to the most distinct films.
pub fn top_genre(store: &GraphStore) -> Option<GenreCount> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for genre in store.get_nodes_by_label(&Label::new(LABEL_GENRE)) {
        let Some(name) = genre.display_name() else {
            continue;
        };
        let films: FxHashSet<NodeId> = store
            .get_incoming_edges(genre.id)
            .into_iter()
            .filter(|e| e.edge_type.as_str() == EDGE_HAS_GENRE)
            .map(|e| e.source)
            .collect();
        counts.insert(name.to_string(), films.len());
    }
    max_by_count(counts)
}

/// Titles of films the named actor's co-actors appear in.
///
/// Two hops out and one hop back: the shared films themselves qualify, since
/// the co-actor does appear in them. Deduplicated, sorted by title.
pub fn films_of_coworkers(store: &GraphStore, name: &str) -> Vec<String> {
    let Some(actor) = find_by_name(store, LABEL_ACTOR, name) else {
        return Vec::new();
    };
    let mut titles: BTreeSet<String> = BTreeSet::new();
    for film in films_via(store, actor, EDGE_ACTED_IN) {
        for co in cast_of(store, film) {
            if co == actor {
                continue;
            }
            for other in films_via(store, co, EDGE_ACTED_IN) {
                if let Some(title) = name_of(store, other) {
                    titles.insert(title);
                }
            }
        }
    }
    titles.into_iter().collect()
}

/// The director who has worked with the most distinct actors.
pub fn top_director_by_distinct_actors(store: &GraphStore) -> Option<DirectorActorCount> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for director in store.get_nodes_by_label(&Label::new(LABEL_DIRECTOR)) {
        let Some(name) = director.display_name() else {
            continue;
        };
        let mut actors: FxHashSet<NodeId> = FxHashSet::default();
        for film in films_via(store, director.id, EDGE_DIRECTED) {
            actors.extend(cast_of(store, film));
        }
        counts.insert(name.to_string(), actors.len());
    }
    max_by_count(counts)
}

/// The film sharing at least one actor with the most other films.
///
/// Counts distinct neighbouring films; a film never counts itself even when
/// an actor is billed twice.
pub fn most_connected_film(store: &GraphStore) -> Option<FilmConnections> {
    let mut best: Option<FilmConnections> = None;
    for film in store.get_nodes_by_label(&Label::new(LABEL_FILM)) {
        let Some(title) = film.display_name() else {
            continue;
        };
        let mut neighbours: FxHashSet<NodeId> = FxHashSet::default();
        for actor in cast_of(store, film.id) {
            for other in films_via(store, actor, EDGE_ACTED_IN) {
                if other != film.id {
                    neighbours.insert(other);
                }
            }
        }
        let connections = neighbours.len();
        let better = match &best {
            None => true,
            Some(b) => {
                connections > b.connections
                    || (connections == b.connections && title < b.title.as_str())
            }
        };
        if better {
            best = Some(FilmConnections {
                title: title.to_string(),
                connections,
            });
        }
    }
    best
}

/// The actors who have worked under the most distinct directors.
pub fn top_actors_by_directors(store: &GraphStore, limit: usize) -> Vec<ActorDirectorCount> {
    let mut rows: Vec<ActorDirectorCount> = store
        .get_nodes_by_label(&actor_label())
        .into_iter()
        .filter_map(|actor| {
            let name = actor.display_name()?;
            let mut directors: FxHashSet<NodeId> = FxHashSet::default();
            for film in films_via(store, actor.id, EDGE_ACTED_IN) {
                directors.extend(
                    store
                        .get_incoming_edges(film)
                        .into_iter()
                        .filter(|e| e.edge_type.as_str() == EDGE_DIRECTED)
                        .map(|e| e.source),
                );
            }
            Some(ActorDirectorCount {
                actor: name.to_string(),
                directors: directors.len(),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.directors.cmp(&a.directors).then(a.actor.cmp(&b.actor)));
    rows.truncate(limit);
    rows
}

/// Film recommendations for an actor, by shared genre with their own films.
///
/// Candidate films carry a genre the actor has already played in but do not
/// feature the actor. Ranked by how many of the actor's genres they share,
/// then by title.
pub fn recommend_by_genres(store: &GraphStore, name: &str, limit: usize) -> Vec<String> {
    let Some(actor) = find_by_name(store, LABEL_ACTOR, name) else {
        return Vec::new();
    };
    let own_films: FxHashSet<NodeId> =
        films_via(store, actor, EDGE_ACTED_IN).into_iter().collect();
    let mut genres: FxHashSet<NodeId> = FxHashSet::default();
    for &film in &own_films {
        genres.extend(films_via(store, film, EDGE_HAS_GENRE));
    }

    // Title-keyed so that equal-count candidates rank alphabetically.
    let mut shared: BTreeMap<String, usize> = BTreeMap::new();
    for &genre in &genres {
        for edge in store.get_incoming_edges(genre) {
            if edge.edge_type.as_str() != EDGE_HAS_GENRE {
                continue;
            }
            let candidate = edge.source;
            if own_films.contains(&candidate) {
                continue;
            }
            if let Some(title) = name_of(store, candidate) {
                *shared.entry(title).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = shared.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(t, _)| t).collect()
}

/// Derive `INFLUENCE_PAR` between every pair of directors sharing a genre.
///
/// Merge semantics: re-running the derivation never duplicates an edge.
/// Both directions are created, matching the symmetric genre overlap.
/// Returns how many edges this run actually added.
pub fn create_director_influence_relations(store: &mut GraphStore) -> EngineResult<usize> {
    let directors: Vec<NodeId> = store
        .get_nodes_by_label(&Label::new(LABEL_DIRECTOR))
        .into_iter()
        .map(|n| n.id)
        .collect();

    let mut genres_of: FxHashMap<NodeId, FxHashSet<NodeId>> = FxHashMap::default();
    for &director in &directors {
        let mut genres = FxHashSet::default();
        for film in films_via(store, director, EDGE_DIRECTED) {
            genres.extend(films_via(store, film, EDGE_HAS_GENRE));
        }
        genres_of.insert(director, genres);
    }

    let mut created = 0usize;
    for &a in &directors {
        for &b in &directors {
            if a == b {
                continue;
            }
            let overlap = genres_of[&a].intersection(&genres_of[&b]).next().is_some();
            if overlap {
                let (_, was_new) = store.merge_edge(a, b, EDGE_INFLUENCED_BY)?;
                if was_new {
                    created += 1;
                }
            }
        }
    }
    info!(created, "derived director influence relations");
    Ok(created)
}

/// Shortest collaboration path between two actors.
///
/// Breadth-first search over `A_JOUE` edges in both directions, so the path
/// alternates actors and films. `None` when either actor is unknown or no
/// path exists. Each hop is reported with its relationship type.
pub fn shortest_path_between_actors(
    store: &GraphStore,
    from: &str,
    to: &str,
) -> Option<Vec<PathStep>> {
    let start = find_by_name(store, LABEL_ACTOR, from)?;
    let goal = find_by_name(store, LABEL_ACTOR, to)?;
    if start == goal {
        return Some(Vec::new());
    }

    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    parent.insert(start, start);
    queue.push_back(start);

    'search: while let Some(current) = queue.pop_front() {
        for edge in store.get_edges_of(current) {
            if edge.edge_type.as_str() != EDGE_ACTED_IN {
                continue;
            }
            let Some(next) = edge.other_endpoint(current) else {
                continue;
            };
            if parent.contains_key(&next) {
                continue;
            }
            parent.insert(next, current);
            if next == goal {
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !parent.contains_key(&goal) {
        return None;
    }

    let mut nodes = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        cursor = parent[&cursor];
        nodes.push(cursor);
    }
    nodes.reverse();

    let steps = nodes
        .windows(2)
        .map(|pair| PathStep {
            from: name_of(store, pair[0]).unwrap_or_default(),
            relation: EDGE_ACTED_IN.to_string(),
            to: name_of(store, pair[1]).unwrap_or_default(),
        })
        .collect();
    Some(steps)
}

/// Render a collaboration path as a single arrow-joined line.
pub fn format_path(steps: &[PathStep]) -> String {
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        if i == 0 {
            out.push_str(&step.from);
        }
        out.push_str(&format!(" --[{}]--> {}", step.relation, step.to));
    }
    out
}

/// Every `INFLUENCE_PAR` edge currently in the graph, as name pairs.
pub fn influence_pairs(store: &GraphStore) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = store
        .get_edges_by_type(&EdgeType::new(EDGE_INFLUENCED_BY))
        .into_iter()
        .filter_map(|e| {
            Some((name_of(store, e.source)?, name_of(store, e.target)?))
        })
        .collect();
    pairs.sort();
    pairs
}
