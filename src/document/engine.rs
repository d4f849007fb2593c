//! Document aggregation engine
//!
//! The fixed analytical questions over the film collection. Each operation
//! borrows a [`DocumentSource`] handle, folds the record stream into an
//! explicit accumulator, and returns a fully materialized result. Documents
//! with missing or malformed values are excluded from aggregates, never
//! counted as zero.
//!
//! Tie-break for every "top-1" question: highest count (or value) first,
//! then the smallest group key. The stores this engine mirrors leave that
//! secondary order unspecified; pinning it keeps results deterministic.

use super::collection::DocumentSource;
use super::value::{split_genres, Document, NumericField};
use super::{
    FIELD_DIRECTOR, FIELD_GENRE, FIELD_METASCORE, FIELD_RATING, FIELD_REVENUE, FIELD_RUNTIME,
    FIELD_TITLE, FIELD_YEAR,
};
use crate::error::EngineResult;
use crate::stats::{decade_of, pearson, Mean};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use tracing::debug;

/// Films counted for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i64,
    pub count: u64,
}

/// Films counted for one director
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorCount {
    pub director: String,
    pub films: u64,
}

/// Mean of a numeric field for one genre
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreAverage {
    pub genre: String,
    pub average: f64,
}

/// Mean of a numeric field for one decade. `None` when the decade has
/// films but none carries the field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeAverage {
    pub decade: i64,
    pub average: Option<f64>,
}

/// A film projected for the per-decade rating ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedFilm {
    pub title: String,
    pub year: i64,
    pub rating: f64,
}

/// A film passing the score/revenue intersection filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFilm {
    pub title: String,
    pub metascore: f64,
    pub revenue: f64,
}

fn year_of(doc: &Document) -> Option<i64> {
    doc.get(FIELD_YEAR).and_then(|v| v.as_i64())
}

fn title_of(doc: &Document) -> Option<&str> {
    doc.get(FIELD_TITLE).and_then(|v| v.as_str())
}

fn count_by_year<S: DocumentSource>(source: &S) -> EngineResult<FxHashMap<i64, u64>> {
    let mut counts: FxHashMap<i64, u64> = FxHashMap::default();
    for doc in source.scan()? {
        if let Some(year) = year_of(&doc) {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Year with the most films. Ties go to the earliest year; empty
/// collection yields `None`.
pub fn year_with_most_films<S: DocumentSource>(source: &S) -> EngineResult<Option<YearCount>> {
    let counts = count_by_year(source)?;
    let best = counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(year, count)| YearCount { year, count });
    Ok(best)
}

/// Number of films released strictly after `year`.
pub fn films_after<S: DocumentSource>(source: &S, year: i64) -> EngineResult<u64> {
    let count = source
        .scan()?
        .iter()
        .filter(|doc| year_of(doc).is_some_and(|y| y > year))
        .count() as u64;
    Ok(count)
}

/// Mean of a numeric field over the films of one exact year.
///
/// `None` when no film of that year carries the field; callers must not
/// read that as an average of zero.
pub fn average_for_year<S: DocumentSource>(
    source: &S,
    field: &str,
    year: i64,
) -> EngineResult<Option<f64>> {
    let mut mean = Mean::default();
    for doc in source.scan()? {
        if year_of(&doc) != Some(year) {
            continue;
        }
        if let Some(v) = NumericField::of(&doc, field).value() {
            mean.push(v);
        }
    }
    Ok(mean.value())
}

/// Film counts per year, ascending by year.
pub fn films_per_year<S: DocumentSource>(source: &S) -> EngineResult<Vec<YearCount>> {
    let counts = count_by_year(source)?;
    let mut rows: Vec<YearCount> = counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();
    rows.sort_by_key(|r| r.year);
    Ok(rows)
}

/// Sorted union of every trimmed genre token across the collection.
pub fn distinct_genres<S: DocumentSource>(source: &S) -> EngineResult<Vec<String>> {
    let mut genres = BTreeSet::new();
    for value in source.distinct(FIELD_GENRE)? {
        if let Some(raw) = value.as_str() {
            genres.extend(split_genres(raw));
        }
    }
    Ok(genres.into_iter().collect())
}

/// The film with the largest coercible revenue. First-encountered wins
/// ties; `None` when no film carries a usable revenue.
pub fn highest_revenue_film<S: DocumentSource>(source: &S) -> EngineResult<Option<Document>> {
    let mut best: Option<(f64, Document)> = None;
    for doc in source.scan()? {
        let Some(revenue) = NumericField::of(&doc, FIELD_REVENUE).value() else {
            continue;
        };
        match &best {
            Some((max, _)) if revenue <= *max => {}
            _ => best = Some((revenue, doc)),
        }
    }
    Ok(best.map(|(_, doc)| doc))
}

/// Directors with strictly more than `threshold` films, most prolific
/// first (ties by name).
pub fn directors_with_more_than<S: DocumentSource>(
    source: &S,
    threshold: u64,
) -> EngineResult<Vec<DirectorCount>> {
    let mut counts: FxHashMap<String, u64> = FxHashMap::default();
    for doc in source.scan()? {
        if let Some(director) = doc.get(FIELD_DIRECTOR).and_then(|v| v.as_str()) {
            *counts.entry(director.to_string()).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<DirectorCount> = counts
        .into_iter()
        .filter(|&(_, count)| count > threshold)
        .map(|(director, films)| DirectorCount { director, films })
        .collect();
    rows.sort_by(|a, b| b.films.cmp(&a.films).then_with(|| a.director.cmp(&b.director)));
    Ok(rows)
}

/// Mean revenue per genre, highest first.
///
/// A multi-genre film contributes its revenue to every one of its genres
/// independently; films with absent or malformed revenue are skipped
/// silently.
pub fn average_revenue_by_genre<S: DocumentSource>(source: &S) -> EngineResult<Vec<GenreAverage>> {
    let mut by_genre: FxHashMap<String, Mean> = FxHashMap::default();
    let mut skipped = 0usize;

    for doc in source.scan()? {
        let revenue = match NumericField::of(&doc, FIELD_REVENUE) {
            NumericField::Present(v) => v,
            NumericField::Malformed => {
                skipped += 1;
                continue;
            }
            NumericField::Absent => continue,
        };
        let Some(raw) = doc.get(FIELD_GENRE).and_then(|v| v.as_str()) else {
            continue;
        };
        for genre in split_genres(raw) {
            by_genre.entry(genre).or_default().push(revenue);
        }
    }

    if skipped > 0 {
        debug!(skipped, "dropped films with malformed revenue");
    }

    let mut rows: Vec<GenreAverage> = by_genre
        .into_iter()
        .filter_map(|(genre, mean)| mean.value().map(|average| GenreAverage { genre, average }))
        .collect();
    rows.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    Ok(rows)
}

/// The `n` best-rated films of each decade, rating descending, decades
/// ascending. Decades with fewer than `n` rated films return what exists.
pub fn top_rated_by_decade<S: DocumentSource>(
    source: &S,
    n: usize,
) -> EngineResult<BTreeMap<i64, Vec<RatedFilm>>> {
    let mut films: Vec<(i64, RatedFilm)> = Vec::new();
    for doc in source.scan()? {
        let (Some(year), Some(rating)) = (year_of(&doc), NumericField::of(&doc, FIELD_RATING).value())
        else {
            continue;
        };
        let title = title_of(&doc).unwrap_or_default().to_string();
        films.push((decade_of(year), RatedFilm { title, year, rating }));
    }

    films.sort_by(|a, b| {
        a.0.cmp(&b.0).then_with(|| {
            b.1.rating
                .partial_cmp(&a.1.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    let mut top: BTreeMap<i64, Vec<RatedFilm>> = BTreeMap::new();
    for (decade, film) in films {
        let entry = top.entry(decade).or_default();
        if entry.len() < n {
            entry.push(film);
        }
    }
    Ok(top)
}

/// Per genre, the film with the largest runtime.
///
/// Films without a genre field are skipped entirely, not merely left
/// ungrouped; the first film seen wins runtime ties.
pub fn longest_film_by_genre<S: DocumentSource>(
    source: &S,
) -> EngineResult<BTreeMap<String, Document>> {
    let mut best: BTreeMap<String, (f64, Document)> = BTreeMap::new();
    for doc in source.scan()? {
        let Some(runtime) = NumericField::of(&doc, FIELD_RUNTIME).value() else {
            continue;
        };
        let Some(raw) = doc.get(FIELD_GENRE).and_then(|v| v.as_str()) else {
            continue;
        };
        for genre in split_genres(raw) {
            match best.get(&genre) {
                Some((max, _)) if runtime <= *max => {}
                _ => {
                    best.insert(genre, (runtime, doc.clone()));
                }
            }
        }
    }
    Ok(best.into_iter().map(|(g, (_, doc))| (g, doc)).collect())
}

/// Films clearing both the metascore and the revenue threshold, projected
/// to title, metascore and revenue.
pub fn high_score_high_revenue<S: DocumentSource>(
    source: &S,
    metascore_min: f64,
    revenue_min: f64,
) -> EngineResult<Vec<ScoredFilm>> {
    let mut rows = Vec::new();
    for doc in source.scan()? {
        let (Some(metascore), Some(revenue)) = (
            NumericField::of(&doc, FIELD_METASCORE).value(),
            NumericField::of(&doc, FIELD_REVENUE).value(),
        ) else {
            continue;
        };
        if metascore > metascore_min && revenue > revenue_min {
            rows.push(ScoredFilm {
                title: title_of(&doc).unwrap_or_default().to_string(),
                metascore,
                revenue,
            });
        }
    }
    Ok(rows)
}

/// Pearson correlation between runtime and revenue.
///
/// A film joins the sample only when both fields coerce; fewer than two
/// valid pairs (or zero variance) yields `None`, never NaN.
pub fn runtime_revenue_correlation<S: DocumentSource>(source: &S) -> EngineResult<Option<f64>> {
    let mut runtimes = Vec::new();
    let mut revenues = Vec::new();
    for doc in source.scan()? {
        let (Some(runtime), Some(revenue)) = (
            NumericField::of(&doc, FIELD_RUNTIME).value(),
            NumericField::of(&doc, FIELD_REVENUE).value(),
        ) else {
            continue;
        };
        runtimes.push(runtime);
        revenues.push(revenue);
    }
    Ok(pearson(&runtimes, &revenues))
}

/// Mean runtime per decade, ascending by decade.
///
/// Every film with a year lands in a decade bucket; a bucket whose films
/// all lack a runtime reports `average: None`.
pub fn average_runtime_by_decade<S: DocumentSource>(source: &S) -> EngineResult<Vec<DecadeAverage>> {
    let mut by_decade: BTreeMap<i64, Mean> = BTreeMap::new();
    for doc in source.scan()? {
        let Some(year) = year_of(&doc) else {
            continue;
        };
        let mean = by_decade.entry(decade_of(year)).or_default();
        if let Some(runtime) = NumericField::of(&doc, FIELD_RUNTIME).value() {
            mean.push(runtime);
        }
    }
    Ok(by_decade
        .into_iter()
        .map(|(decade, mean)| DecadeAverage {
            decade,
            average: mean.value(),
        })
        .collect())
}
