//! CineGraph dashboard runner
//!
//! Loads the film dataset, answers the fixed document-store questions, then
//! derives the movie graph and answers the graph questions. A connection
//! failure on a store skips that store's remaining questions; a missing
//! optional capability skips only the one question that needs it.

use cinegraph::document::engine as docs;
use cinegraph::document::{load_collection, FIELD_RATING, FIELD_REVENUE, FIELD_TITLE};
use cinegraph::graph::engine as movies;
use cinegraph::graph::load_graph;
use cinegraph::{detect_actor_communities, DashboardConfig, EngineError};
use tracing::{error, warn};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = DashboardConfig::from_env()?;
    let collection = load_collection(&config.collection, &config.dataset)?;

    println!("CineGraph v{}", cinegraph::version());
    println!();

    if let Err(e) = document_questions(&collection, &config) {
        if e.is_connection() {
            error!(%e, "document store unreachable, skipping its questions");
        } else {
            return Err(e.into());
        }
    }

    graph_questions(&collection, &config)?;
    Ok(())
}

fn document_questions(
    collection: &cinegraph::Collection,
    config: &DashboardConfig,
) -> Result<(), EngineError> {
    println!("== Document store ==");

    if let Some(top) = docs::year_with_most_films(collection)? {
        println!("Year with the most films: {} ({} films)", top.year, top.count);
    }

    println!(
        "Films released after 1999: {}",
        docs::films_after(collection, 1999)?
    );

    match docs::average_for_year(collection, FIELD_RATING, 2016)? {
        Some(avg) => println!("Average rating in 2016: {:.2}", avg),
        None => println!("Average rating in 2016: no rated films"),
    }

    println!("Films per year:");
    for row in docs::films_per_year(collection)? {
        println!("  {}: {}", row.year, row.count);
    }

    println!("Genres: {}", docs::distinct_genres(collection)?.join(", "));

    if let Some(film) = docs::highest_revenue_film(collection)? {
        let title = film.get(FIELD_TITLE).map(|v| v.to_string()).unwrap_or_default();
        let revenue = film.get(FIELD_REVENUE).map(|v| v.to_string()).unwrap_or_default();
        println!("Highest-grossing film: {} ({}M)", title, revenue);
    }

    println!(
        "Directors with more than {} films:",
        config.min_films_per_director
    );
    for row in docs::directors_with_more_than(collection, config.min_films_per_director)? {
        println!("  {}: {}", row.director, row.films);
    }

    println!("Average revenue by genre:");
    for row in docs::average_revenue_by_genre(collection)? {
        println!("  {}: {:.2}M", row.genre, row.average);
    }

    println!("Top {} rated films per decade:", config.top_per_decade);
    for (decade, films) in docs::top_rated_by_decade(collection, config.top_per_decade)? {
        println!("  {}s:", decade);
        for film in films {
            println!("    {} ({}) — {:.1}", film.title, film.year, film.rating);
        }
    }

    println!("Longest film per genre:");
    for (genre, film) in docs::longest_film_by_genre(collection)? {
        let title = film.get(FIELD_TITLE).map(|v| v.to_string()).unwrap_or_default();
        println!("  {}: {}", genre, title);
    }

    println!(
        "Metascore > {} and revenue > {}M:",
        config.metascore_threshold, config.revenue_threshold
    );
    for film in docs::high_score_high_revenue(
        collection,
        config.metascore_threshold,
        config.revenue_threshold,
    )? {
        println!(
            "  {} (metascore {}, {:.2}M)",
            film.title, film.metascore, film.revenue
        );
    }

    match docs::runtime_revenue_correlation(collection)? {
        Some(r) => println!("Runtime/revenue correlation: {:.4}", r),
        None => println!("Runtime/revenue correlation: not enough data"),
    }

    println!("Average runtime by decade:");
    for row in docs::average_runtime_by_decade(collection)? {
        match row.average {
            Some(avg) => println!("  {}s: {:.1} min", row.decade, avg),
            None => println!("  {}s: no runtimes recorded", row.decade),
        }
    }

    println!();
    Ok(())
}

fn graph_questions(
    collection: &cinegraph::Collection,
    config: &DashboardConfig,
) -> anyhow::Result<()> {
    use cinegraph::document::DocumentSource;

    println!("== Movie graph ==");
    let mut store = load_graph(&collection.scan().map_err(EngineError::from)?)?;

    if let Some(top) = movies::top_actor_by_films(&store) {
        println!("Actor with the most films: {} ({})", top.actor, top.films);
    }

    let featured = &config.featured_actor;
    println!(
        "Co-stars of {}: {}",
        featured,
        movies::co_actors(&store, featured).join(", ")
    );

    if let Some(top) = movies::top_actor_by_revenue(&store) {
        println!(
            "Actor with the highest total revenue: {} ({:.2}M)",
            top.actor, top.revenue
        );
    }

    match movies::average_film_field(&store, FIELD_RATING) {
        Some(avg) => println!("Average film rating: {:.2}", avg),
        None => println!("Average film rating: no rated films"),
    }

    if let Some(top) = movies::top_genre(&store) {
        println!("Most common genre: {} ({} films)", top.genre, top.films);
    }

    println!(
        "Films featuring co-stars of {}: {}",
        featured,
        movies::films_of_coworkers(&store, featured).join(", ")
    );

    if let Some(top) = movies::top_director_by_distinct_actors(&store) {
        println!(
            "Director with the most distinct actors: {} ({})",
            top.director, top.actors
        );
    }

    if let Some(top) = movies::most_connected_film(&store) {
        println!(
            "Most connected film: {} ({} shared-actor links)",
            top.title, top.connections
        );
    }

    println!("Actors with the most distinct directors:");
    for row in movies::top_actors_by_directors(&store, 5) {
        println!("  {}: {}", row.actor, row.directors);
    }

    println!(
        "Recommendations for {}: {}",
        featured,
        movies::recommend_by_genres(&store, featured, config.recommendation_limit).join(", ")
    );

    let created = movies::create_director_influence_relations(&mut store)?;
    println!("Director influence relations created: {}", created);

    match movies::shortest_path_between_actors(&store, &config.path_from, &config.path_to) {
        Some(steps) => println!(
            "Shortest path from {} to {}: {}",
            config.path_from,
            config.path_to,
            movies::format_path(&steps)
        ),
        None => println!(
            "No collaboration path between {} and {}",
            config.path_from, config.path_to
        ),
    }

    match detect_actor_communities(&store) {
        Ok(rows) => {
            println!("Actor communities:");
            for row in rows {
                println!("  [{}] {}", row.community, row.actor);
            }
        }
        Err(e) if e.is_unsupported() => {
            warn!(%e, "skipping community detection");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
