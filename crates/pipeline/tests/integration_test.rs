//! Integration tests for the query pipeline.
//!
//! These tests run whole queries against small datasets and check the
//! properties every result list must have, whatever the axis.

use data_loader::{Dataset, MovieRecord, TextColumn};
use pipeline::{Axis, DEFAULT_RESULT_LIMIT, FilterRequest, QueryEngine, query};
use std::collections::HashSet;

fn record(title: &str, rating: f64, genre: &str, cast: &str, language: &str) -> MovieRecord {
    MovieRecord::new(title, rating, genre, cast, language)
}

/// One row per (title, cast member), as the real export is shaped
fn create_test_dataset() -> Dataset {
    Dataset::from_records(vec![
        record("The Dark Knight", 9.0, "Action", "Christian Bale", "English"),
        record("The Dark Knight", 9.0, "Action", "Heath Ledger", "English"),
        record("Inception", 8.8, "Sci-Fi", "Leonardo DiCaprio", "English"),
        record("Inception", 8.8, "Sci-Fi", "Elliot Page", "English"),
        record("Parasite", 8.5, "Thriller", "Song Kang-ho", "Korean"),
        record("Oldboy", 8.4, "Thriller", "Choi Min-sik", "Korean"),
        record("Amélie", 8.3, "Romance", "Audrey Tautou", "French"),
        record("The Revenant", 8.0, "Adventure", "Leonardo DiCaprio", "English"),
        record("Shutter Island", 8.2, "Thriller", "Leonardo DiCaprio", "English"),
        record("Tenet", 7.5, "Sci-Fi", "John David Washington", "English"),
        record("Memories of Murder", 8.1, "Thriller", "Song Kang-ho", "Korean"),
        record("The Host", 7.1, "Sci-Fi", "Song Kang-ho", "Korean"),
        record("Interstellar", 8.7, "Sci-Fi", "Matthew McConaughey", "English"),
        record("Dunkirk", 7.8, "War", "Fionn Whitehead", "English"),
        record("Memento", 8.4, "Mystery", "Guy Pearce", "English"),
        MovieRecord {
            title: "Lost Reel".to_string(),
            rating: None,
            genre: None,
            cast_member: None,
            language: Some("English".to_string()),
        },
    ])
}

fn assert_result_invariants(rows: &[pipeline::MovieRow]) {
    assert!(rows.len() <= DEFAULT_RESULT_LIMIT, "at most eight titles");

    let titles: HashSet<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles.len(), rows.len(), "no duplicate titles");

    for pair in rows.windows(2) {
        let (a, b) = (pair[0].rating, pair[1].rating);
        match (a, b) {
            (Some(a), Some(b)) => assert!(a >= b, "sorted by rating descending"),
            (None, Some(_)) => panic!("missing rating ranked above a real one"),
            _ => {}
        }
    }
}

#[test]
fn test_minimum_rating_properties() {
    let dataset = create_test_dataset();

    for threshold in [0.0, 5.0, 7.5, 8.3, 8.8, 9.0, 9.5] {
        let rows = query(&dataset, &FilterRequest::MinimumRating(threshold));

        assert_result_invariants(&rows);
        assert!(
            rows.iter().all(|r| r.rating.is_some_and(|x| x >= threshold)),
            "every row rated >= {}",
            threshold
        );
    }
}

#[test]
fn test_exact_match_axes() {
    let dataset = create_test_dataset();

    for axis in [Axis::Genre, Axis::Cast, Axis::Language] {
        let column = axis.column().unwrap();
        for value in dataset.distinct_values(column) {
            let request = FilterRequest::from_axis(axis, value).unwrap();
            let rows = query(&dataset, &request);

            assert_result_invariants(&rows);
            assert!(!rows.is_empty(), "every picker value matches something");

            // Rows are projected, so check the source rows for the title
            for row in &rows {
                assert!(dataset.records().iter().any(|r| {
                    r.title == row.title && column.value_of(r) == Some(value.as_str())
                }));
            }
        }
    }
}

#[test]
fn test_cast_query_deduplicates_and_ranks() {
    let dataset = create_test_dataset();

    let rows = query(&dataset, &FilterRequest::CastMember("Leonardo DiCaprio".into()));

    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Inception", "Shutter Island", "The Revenant"]);
}

#[test]
fn test_language_query_truncates_to_eight() {
    let dataset = create_test_dataset();

    let rows = query(&dataset, &FilterRequest::Language("English".into()));

    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].title, "The Dark Knight");
    assert!(rows.iter().all(|r| r.title != "Lost Reel"), "unrated title falls off the end");
}

#[test]
fn test_query_is_deterministic() {
    let dataset = create_test_dataset();
    let request = FilterRequest::Genre("Thriller".into());

    let first = query(&dataset, &request);
    let second = query(&dataset, &request);

    assert_eq!(first, second);
}

#[test]
fn test_threshold_above_max_rating_is_empty() {
    let dataset = Dataset::from_records(vec![
        record("Almost", 7.9, "Drama", "A", "English"),
        record("Nearly", 7.2, "Drama", "B", "English"),
    ]);

    let rows = query(&dataset, &FilterRequest::MinimumRating(8.0));

    assert!(rows.is_empty());
}

#[test]
fn test_inception_tenet_scenario() {
    let dataset = Dataset::from_records(vec![
        record("Inception", 8.8, "Sci-Fi", "Elliot Page", "English"),
        record("Inception", 8.8, "Adventure", "Tom Hardy", "English"),
        record("Tenet", 7.5, "Sci-Fi", "John David Washington", "English"),
    ]);

    let rows = query(&dataset, &FilterRequest::MinimumRating(7.0));

    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Inception", "Tenet"]);
    // First occurrence wins the dedup
    assert_eq!(rows[0].genre.as_deref(), Some("Sci-Fi"));
}

#[test]
fn test_genre_enumeration_scenario() {
    let genres = [Some("Drama"), None, Some("Comedy"), Some("Drama")];
    let dataset = Dataset::from_records(
        genres
            .iter()
            .enumerate()
            .map(|(i, genre)| MovieRecord {
                title: format!("Movie {i}"),
                rating: Some(6.0),
                genre: genre.map(str::to_string),
                cast_member: None,
                language: None,
            })
            .collect(),
    );

    assert_eq!(dataset.distinct_values(TextColumn::Genre), ["Comedy", "Drama"]);
}

#[test]
fn test_unknown_value_returns_empty() {
    let dataset = create_test_dataset();

    let rows = query(&dataset, &FilterRequest::Genre("Documentary".into()));

    assert!(rows.is_empty());
}

#[test]
fn test_custom_limit() {
    let dataset = create_test_dataset();

    let rows = QueryEngine::new(3).run(&dataset, &FilterRequest::MinimumRating(1.0));

    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["The Dark Knight", "Inception", "Interstellar"]);
}

#[test]
fn test_nan_rating_from_csv_ranks_last() {
    let payload = "primaryTitle,averageRating,genres,primaryName,language_name\n\
                   Blank,NaN,Drama,X,English\n\
                   Good,9.0,Drama,Y,English\n\
                   Gap,NA,Drama,Z,English\n";
    let dataset = Dataset::from_records(data_loader::parser::parse_bytes(payload.as_bytes()).unwrap());

    let rows = query(&dataset, &FilterRequest::Genre("Drama".into()));

    let ranked: Vec<_> = rows.iter().map(|r| (r.title.as_str(), r.rating)).collect();
    assert_eq!(ranked, [("Good", Some(9.0)), ("Blank", None), ("Gap", None)]);
}
