//! End-to-end graph tests: load a dataset, then ask the graph questions.

use cinegraph::document::{DocValue, Document};
use cinegraph::graph::engine::*;
use cinegraph::graph::load_graph;
use cinegraph::GraphStore;

fn film(title: &str, actors: &str, director: &str, genre: &str, revenue: DocValue) -> Document {
    let mut doc = Document::new();
    doc.insert("title".to_string(), DocValue::from(title));
    doc.insert("Actors".to_string(), DocValue::from(actors));
    doc.insert("Director".to_string(), DocValue::from(director));
    doc.insert("genre".to_string(), DocValue::from(genre));
    doc.insert("Revenue (Millions)".to_string(), revenue);
    doc
}

fn movie_store() -> GraphStore {
    let docs = vec![
        film(
            "Interstellar",
            "Matthew McConaughey, Anne Hathaway",
            "Christopher Nolan",
            "Adventure, Drama, Sci-Fi",
            DocValue::from(187.99),
        ),
        film(
            "The Dark Knight Rises",
            "Christian Bale, Anne Hathaway",
            "Christopher Nolan",
            "Action, Thriller",
            DocValue::from("448.13"),
        ),
        film(
            "Mud",
            "Matthew McConaughey, Reese Witherspoon",
            "Jeff Nichols",
            "Drama",
            DocValue::from(21.59),
        ),
        film(
            "Colossal",
            "Anne Hathaway, Jason Sudeikis",
            "Nacho Vigalondo",
            "Action, Comedy, Drama",
            DocValue::from("N/A"),
        ),
        film(
            "La La Land",
            "Ryan Gosling, Emma Stone",
            "Damien Chazelle",
            "Comedy, Drama, Music",
            DocValue::from(151.06),
        ),
    ];
    load_graph(&docs).unwrap()
}

#[test]
fn actor_rankings() {
    let store = movie_store();

    let top = top_actor_by_films(&store).unwrap();
    assert_eq!(top.actor, "Anne Hathaway");
    assert_eq!(top.films, 3);

    // 187.99 + 448.13; Colossal's "N/A" adds nothing.
    let richest = top_actor_by_revenue(&store).unwrap();
    assert_eq!(richest.actor, "Anne Hathaway");
    assert!((richest.revenue - 636.12).abs() < 1e-9);
}

#[test]
fn co_actor_queries() {
    let store = movie_store();

    assert_eq!(
        co_actors(&store, "Anne Hathaway"),
        vec!["Christian Bale", "Jason Sudeikis", "Matthew McConaughey"]
    );
    assert_eq!(co_actors(&store, "Unknown Person"), Vec::<String>::new());

    // Reese only shares a film with Matthew, whose films include Mud itself.
    assert_eq!(
        films_of_coworkers(&store, "Reese Witherspoon"),
        vec!["Interstellar", "Mud"]
    );
}

#[test]
fn genre_and_director_rollups() {
    let store = movie_store();

    let genre = top_genre(&store).unwrap();
    assert_eq!(genre.genre, "Drama");
    assert_eq!(genre.films, 4);

    let director = top_director_by_distinct_actors(&store).unwrap();
    assert_eq!(director.director, "Christopher Nolan");
    assert_eq!(director.actors, 3);

    // Anne and Matthew both count two distinct directors; Anne wins the
    // name tie-break.
    let rows = top_actors_by_directors(&store, 3);
    assert_eq!(rows[0].actor, "Anne Hathaway");
    assert_eq!(rows[0].directors, 2);
    assert_eq!(rows[1].actor, "Matthew McConaughey");
}

#[test]
fn recommendations_exclude_own_films() {
    let store = movie_store();

    // Matthew's genres: Adventure, Drama, Sci-Fi. Candidates sharing them:
    // Colossal and La La Land (Drama). His own films never appear.
    let recs = recommend_by_genres(&store, "Matthew McConaughey", 5);
    assert_eq!(recs, vec!["Colossal", "La La Land"]);

    let capped = recommend_by_genres(&store, "Matthew McConaughey", 1);
    assert_eq!(capped.len(), 1);
}

#[test]
fn influence_derivation_merges_on_rerun() {
    let mut store = movie_store();

    let first = create_director_influence_relations(&mut store).unwrap();
    assert!(first > 0);
    let before = influence_pairs(&store);

    let second = create_director_influence_relations(&mut store).unwrap();
    assert_eq!(second, 0);
    assert_eq!(influence_pairs(&store), before);

    // Nolan/Vigalondo share Action; Nichols/Chazelle/Vigalondo share Drama
    // with each other and with Nolan. Both directions exist for each pair.
    assert!(before.contains(&(
        "Christopher Nolan".to_string(),
        "Nacho Vigalondo".to_string()
    )));
    assert!(before.contains(&(
        "Nacho Vigalondo".to_string(),
        "Christopher Nolan".to_string()
    )));
}

#[test]
fn shortest_path_found_and_rendered() {
    let store = movie_store();

    let steps =
        shortest_path_between_actors(&store, "Anne Hathaway", "Matthew McConaughey").unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(
        format_path(&steps),
        "Anne Hathaway --[A_JOUE]--> Interstellar --[A_JOUE]--> Matthew McConaughey"
    );
}

#[test]
fn shortest_path_none_for_disconnected_or_unknown() {
    let store = movie_store();

    // La La Land's cast shares no film with the Hathaway component.
    assert_eq!(
        shortest_path_between_actors(&store, "Anne Hathaway", "Ryan Gosling"),
        None
    );
    assert_eq!(
        shortest_path_between_actors(&store, "Anne Hathaway", "Nobody"),
        None
    );
}

#[test]
fn average_film_property_coerces_strings() {
    let store = movie_store();

    // (187.99 + 448.13 + 21.59 + 151.06) / 4; "N/A" leaves the denominator.
    let avg = average_film_field(&store, "Revenue (Millions)").unwrap();
    assert!((avg - 808.77 / 4.0).abs() < 1e-9);
}

#[test]
fn most_connected_film_counts_distinct_neighbours() {
    let store = movie_store();

    // Interstellar: Dark Knight Rises + Colossal (Anne), Mud (Matthew) = 3.
    let top = most_connected_film(&store).unwrap();
    assert_eq!(top.title, "Interstellar");
    assert_eq!(top.connections, 3);
}
