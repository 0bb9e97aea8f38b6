//! Parser for the movie CSV export.
//!
//! Expected header (extra columns are ignored, order does not matter):
//! `primaryTitle,averageRating,genres,primaryName,language_name`
//!
//! Empty cells and the usual missing-value markers (`NA`, `N/A`, `NaN`,
//! `null`, ...) become `None`. Any other rating cell that is not a number
//! fails the whole load; there is no partial table.

use crate::error::{LoadError, Result};
use crate::types::{MovieRecord, REQUIRED_COLUMNS};
use std::io::Read;

/// Parse a CSV payload into dataset rows, in source order.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<MovieRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: MovieRecord = row?;
        records.push(record);
    }

    Ok(records)
}

/// Parse an in-memory payload (the body of the HTTP response)
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<MovieRecord>> {
    parse_csv(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "primaryTitle,averageRating,genres,primaryName,language_name\n";

    #[test]
    fn test_parse_rows_in_order() {
        let payload = format!(
            "{HEADER}Inception,8.8,Sci-Fi,Leonardo DiCaprio,English\n\
             Tenet,7.5,Sci-Fi,John David Washington,English\n"
        );

        let records = parse_bytes(payload.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Inception");
        assert_eq!(records[0].rating, Some(8.8));
        assert_eq!(records[0].cast_member.as_deref(), Some("Leonardo DiCaprio"));
        assert_eq!(records[1].title, "Tenet");
        assert_eq!(records[1].language.as_deref(), Some("English"));
    }

    #[test]
    fn test_empty_cells_become_none() {
        let payload = format!("{HEADER}Untitled,,,,\n");

        let records = parse_bytes(payload.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, None);
        assert_eq!(records[0].genre, None);
        assert_eq!(records[0].cast_member, None);
        assert_eq!(records[0].language, None);
    }

    #[test]
    fn test_quoted_title_with_comma() {
        let payload = format!("{HEADER}\"Crouching Tiger, Hidden Dragon\",7.9,Action,Chow Yun-Fat,Mandarin\n");

        let records = parse_bytes(payload.as_bytes()).unwrap();

        assert_eq!(records[0].title, "Crouching Tiger, Hidden Dragon");
        assert_eq!(records[0].language.as_deref(), Some("Mandarin"));
    }

    #[test]
    fn test_extra_columns_and_column_order_ignored() {
        let payload = "tconst,language_name,primaryName,genres,averageRating,primaryTitle,numVotes\n\
                       tt1375666,English,Elliot Page,Action,8.8,Inception,2400000\n";

        let records = parse_bytes(payload.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Inception");
        assert_eq!(records[0].genre.as_deref(), Some("Action"));
        assert_eq!(records[0].rating, Some(8.8));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let payload = "primaryTitle,rating,genres,primaryName,language_name\nInception,8.8,Sci-Fi,X,English\n";

        let err = parse_bytes(payload.as_bytes()).unwrap_err();

        assert!(matches!(err, LoadError::MissingColumn { column: "averageRating" }));
    }

    #[test]
    fn test_empty_payload_is_an_error() {
        let err = parse_bytes(b"").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }

    #[test]
    fn test_non_numeric_rating_is_an_error() {
        let payload = format!("{HEADER}Inception,great,Sci-Fi,X,English\n");

        let err = parse_bytes(payload.as_bytes()).unwrap_err();

        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_nan_rating_is_missing() {
        let payload = format!("{HEADER}Good,9.0,Drama,X,English\nBlank,NaN,Drama,Y,English\nLower,nan,Drama,Z,English\n");

        let records = parse_bytes(payload.as_bytes()).unwrap();

        assert_eq!(records[0].rating, Some(9.0));
        assert_eq!(records[1].rating, None);
        assert_eq!(records[2].rating, None);
    }

    #[test]
    fn test_missing_markers_become_none() {
        let payload = format!("{HEADER}Blank,NA,NA,N/A,null\nOther,N/A,Drama,None,English\n");

        let records = parse_bytes(payload.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Blank");
        assert_eq!(records[0].rating, None);
        assert_eq!(records[0].genre, None);
        assert_eq!(records[0].cast_member, None);
        assert_eq!(records[0].language, None);
        assert_eq!(records[1].rating, None);
        assert_eq!(records[1].genre.as_deref(), Some("Drama"));
        assert_eq!(records[1].cast_member, None);
    }

    #[test]
    fn test_header_only_payload_is_an_empty_table() {
        let records = parse_bytes(HEADER.as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
