//! End-to-end aggregation tests over an in-memory film collection.

use cinegraph::document::engine::*;
use cinegraph::document::{Collection, DocValue, Document};

fn film(pairs: &[(&str, DocValue)]) -> Document {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn collection(docs: Vec<Document>) -> Collection {
    Collection::new("films", docs)
}

#[test]
fn year_counts_and_top_year() {
    let source = collection(vec![
        film(&[("title", "A".into()), ("year", 1995i64.into())]),
        film(&[("title", "B".into()), ("year", 2001i64.into())]),
        film(&[("title", "C".into()), ("year", 2001i64.into())]),
        film(&[("title", "D".into()), ("year", 1995i64.into())]),
        film(&[("title", "E".into()), ("year", 2001i64.into())]),
        film(&[("title", "no year".into())]),
    ]);

    let rows = films_per_year(&source).unwrap();
    let pairs: Vec<(i64, u64)> = rows.iter().map(|r| (r.year, r.count)).collect();
    assert_eq!(pairs, vec![(1995, 2), (2001, 3)]);

    let top = year_with_most_films(&source).unwrap().unwrap();
    assert_eq!((top.year, top.count), (2001, 3));

    assert_eq!(films_after(&source, 1995).unwrap(), 3);
    assert_eq!(films_after(&source, 2001).unwrap(), 0);
}

#[test]
fn revenue_average_excludes_na_strings() {
    let source = collection(vec![
        film(&[
            ("title", "A".into()),
            ("genre", "Action".into()),
            ("Revenue (Millions)", 10.0.into()),
        ]),
        film(&[
            ("title", "B".into()),
            ("genre", "Action".into()),
            ("Revenue (Millions)", "20".into()),
        ]),
        film(&[
            ("title", "C".into()),
            ("genre", "Drama".into()),
            ("Revenue (Millions)", 10.0.into()),
        ]),
        film(&[
            ("title", "D".into()),
            ("genre", "Drama".into()),
            ("Revenue (Millions)", "N/A".into()),
        ]),
    ]);

    let rows = average_revenue_by_genre(&source).unwrap();
    assert_eq!(rows.len(), 2);
    // Action averages numeric and numeric-string together; the "N/A" film
    // is excluded from Drama's denominator, not counted as zero.
    assert_eq!(rows[0].genre, "Action");
    assert!((rows[0].average - 15.0).abs() < 1e-9);
    assert_eq!(rows[1].genre, "Drama");
    assert!((rows[1].average - 10.0).abs() < 1e-9);
}

#[test]
fn multi_genre_films_count_toward_each_genre() {
    let source = collection(vec![film(&[
        ("title", "A".into()),
        ("genre", "Action, Drama , ,Sci-Fi".into()),
        ("Revenue (Millions)", 30.0.into()),
    ])]);

    let genres = distinct_genres(&source).unwrap();
    assert_eq!(genres, vec!["Action", "Drama", "Sci-Fi"]);

    let rows = average_revenue_by_genre(&source).unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert!((row.average - 30.0).abs() < 1e-9);
    }
}

#[test]
fn highest_revenue_handles_mixed_types() {
    let source = collection(vec![
        film(&[("title", "A".into()), ("Revenue (Millions)", 100.0.into())]),
        film(&[("title", "B".into()), ("Revenue (Millions)", "292.57".into())]),
        film(&[("title", "C".into()), ("Revenue (Millions)", "N/A".into())]),
    ]);

    let best = highest_revenue_film(&source).unwrap().unwrap();
    assert_eq!(best["title"], DocValue::from("B"));
}

#[test]
fn prolific_directors_threshold_is_strict() {
    let mut docs = Vec::new();
    for i in 0..3 {
        docs.push(film(&[
            ("title", format!("A{}", i).into()),
            ("Director", "Three".into()),
        ]));
    }
    for i in 0..2 {
        docs.push(film(&[
            ("title", format!("B{}", i).into()),
            ("Director", "Two".into()),
        ]));
    }
    let source = collection(docs);

    let rows = directors_with_more_than(&source, 2).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].director, "Three");
    assert_eq!(rows[0].films, 3);
}

#[test]
fn top_rated_by_decade_keeps_n_per_bucket() {
    let source = collection(vec![
        film(&[("title", "90a".into()), ("year", 1994i64.into()), ("rating", 8.0.into())]),
        film(&[("title", "90b".into()), ("year", 1997i64.into()), ("rating", 9.0.into())]),
        film(&[("title", "90c".into()), ("year", 1999i64.into()), ("rating", 7.0.into())]),
        film(&[("title", "00a".into()), ("year", 2005i64.into()), ("rating", 6.5.into())]),
        film(&[("title", "unrated".into()), ("year", 2005i64.into())]),
    ]);

    let top = top_rated_by_decade(&source, 2).unwrap();
    assert_eq!(top.len(), 2);

    let nineties: Vec<&str> = top[&1990].iter().map(|f| f.title.as_str()).collect();
    assert_eq!(nineties, vec!["90b", "90a"]);
    assert_eq!(top[&2000].len(), 1);
}

#[test]
fn correlation_degenerate_cases_yield_none() {
    // Fewer than two complete pairs.
    let single = collection(vec![film(&[
        ("title", "A".into()),
        ("Runtime (Minutes)", 120i64.into()),
        ("Revenue (Millions)", 10.0.into()),
    ])]);
    assert_eq!(runtime_revenue_correlation(&single).unwrap(), None);

    // Constant runtime: zero variance denominator.
    let constant = collection(vec![
        film(&[
            ("title", "A".into()),
            ("Runtime (Minutes)", 120i64.into()),
            ("Revenue (Millions)", 10.0.into()),
        ]),
        film(&[
            ("title", "B".into()),
            ("Runtime (Minutes)", 120i64.into()),
            ("Revenue (Millions)", 20.0.into()),
        ]),
    ]);
    assert_eq!(runtime_revenue_correlation(&constant).unwrap(), None);
}

#[test]
fn correlation_perfect_positive() {
    let source = collection(vec![
        film(&[
            ("title", "A".into()),
            ("Runtime (Minutes)", 100i64.into()),
            ("Revenue (Millions)", 10.0.into()),
        ]),
        film(&[
            ("title", "B".into()),
            ("Runtime (Minutes)", 120i64.into()),
            ("Revenue (Millions)", 20.0.into()),
        ]),
        film(&[
            ("title", "C".into()),
            ("Runtime (Minutes)", 140i64.into()),
            ("Revenue (Millions)", 30.0.into()),
        ]),
        // Incomplete pair, must not poison the sample.
        film(&[("title", "D".into()), ("Runtime (Minutes)", 90i64.into())]),
    ]);

    let r = runtime_revenue_correlation(&source).unwrap().unwrap();
    assert!((r - 1.0).abs() < 1e-9);
}

#[test]
fn decade_runtime_average_reports_empty_buckets() {
    let source = collection(vec![
        film(&[
            ("title", "A".into()),
            ("year", 1992i64.into()),
            ("Runtime (Minutes)", 100i64.into()),
        ]),
        film(&[
            ("title", "B".into()),
            ("year", 1998i64.into()),
            ("Runtime (Minutes)", 140i64.into()),
        ]),
        film(&[("title", "C".into()), ("year", 2003i64.into())]),
    ]);

    let rows = average_runtime_by_decade(&source).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].decade, 1990);
    assert_eq!(rows[0].average, Some(120.0));
    // The 2000s have a film but no runtime: None, not zero.
    assert_eq!(rows[1].decade, 2000);
    assert_eq!(rows[1].average, None);
}

#[test]
fn average_for_year_only_that_year() {
    let source = collection(vec![
        film(&[("title", "A".into()), ("year", 2016i64.into()), ("rating", 8.0.into())]),
        film(&[("title", "B".into()), ("year", 2016i64.into()), ("rating", 6.0.into())]),
        film(&[("title", "C".into()), ("year", 2015i64.into()), ("rating", 1.0.into())]),
    ]);

    assert_eq!(average_for_year(&source, "rating", 2016).unwrap(), Some(7.0));
    assert_eq!(average_for_year(&source, "rating", 1990).unwrap(), None);
}

#[test]
fn score_revenue_intersection_requires_both_fields() {
    let source = collection(vec![
        film(&[
            ("title", "keeper".into()),
            ("Metascore", 90.0.into()),
            ("Revenue (Millions)", 100.0.into()),
        ]),
        film(&[
            ("title", "low score".into()),
            ("Metascore", 40.0.into()),
            ("Revenue (Millions)", 100.0.into()),
        ]),
        film(&[("title", "no revenue".into()), ("Metascore", 95.0.into())]),
    ]);

    let rows = high_score_high_revenue(&source, 80.0, 50.0).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "keeper");
}

#[test]
fn longest_film_per_genre() {
    let source = collection(vec![
        film(&[
            ("title", "short".into()),
            ("genre", "Action".into()),
            ("Runtime (Minutes)", 90i64.into()),
        ]),
        film(&[
            ("title", "long".into()),
            ("genre", "Action, Drama".into()),
            ("Runtime (Minutes)", 180i64.into()),
        ]),
    ]);

    let best = longest_film_by_genre(&source).unwrap();
    assert_eq!(best["Action"]["title"], DocValue::from("long"));
    assert_eq!(best["Drama"]["title"], DocValue::from("long"));
}
