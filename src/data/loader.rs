//! CSV Dataset Loader Module
//! Reads the district equity CSV into typed records using Polars.

use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use super::record::{DistrictRecord, Zone, SCORE_MAX, SCORE_MIN};

/// Columns the input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "state",
    "district",
    "zone",
    "dei",
    "access_health",
    "update_load",
    "stability",
];

const SCORE_COLUMNS: [&str; 4] = ["dei", "access_health", "update_load", "stability"];

#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("required column missing: {0}")]
    MissingColumn(&'static str),
    #[error("row {row}: {column} value {value:?} is not numeric")]
    InvalidScore {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: {column} value {value} is outside {SCORE_MIN}..={SCORE_MAX}")]
    ScoreOutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
    },
    #[error("row {row}: unrecognized zone {value:?}")]
    UnknownZone { row: usize, value: String },
    #[error("duplicate district key: {district} ({state})")]
    DuplicateDistrict { state: String, district: String },
}

/// Parsed dataset plus the number of rows dropped for missing values.
/// The drop count is part of the contract so callers can surface
/// data-quality loss instead of silently swallowing it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<DistrictRecord>,
    pub dropped_rows: usize,
}

/// Load the district equity CSV at `path`.
///
/// Every cell is read as a string (schema inference disabled) and parsed
/// explicitly: rows with an empty required cell are dropped and counted,
/// while present-but-invalid values abort the load with a
/// [`DataFormatError`]. Row order is preserved.
pub fn load_dataset(path: &Path) -> Result<LoadOutcome, DataFormatError> {
    if !path.is_file() {
        return Err(DataFormatError::FileNotFound(path.display().to_string()));
    }
    let path_str = path.to_string_lossy();

    // infer_schema_length 0 keeps every column as String; numeric
    // validation below stays in our hands rather than the reader's.
    let df = LazyCsvReader::new(path_str.as_ref())
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    let outcome = extract_records(&df)?;
    info!(
        records = outcome.records.len(),
        dropped = outcome.dropped_rows,
        "loaded district equity dataset"
    );
    Ok(outcome)
}

fn required_column<'a>(
    df: &'a DataFrame,
    name: &'static str,
) -> Result<&'a StringChunked, DataFormatError> {
    let column = df
        .column(name)
        .map_err(|_| DataFormatError::MissingColumn(name))?;
    Ok(column.str()?)
}

fn parse_score(row: usize, column: &'static str, raw: &str) -> Result<f64, DataFormatError> {
    let value: f64 = raw.parse().map_err(|_| DataFormatError::InvalidScore {
        row,
        column,
        value: raw.to_string(),
    })?;
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(DataFormatError::ScoreOutOfRange { row, column, value });
    }
    Ok(value)
}

fn extract_records(df: &DataFrame) -> Result<LoadOutcome, DataFormatError> {
    let state_col = required_column(df, "state")?;
    let district_col = required_column(df, "district")?;
    let zone_col = required_column(df, "zone")?;
    let score_cols = [
        required_column(df, SCORE_COLUMNS[0])?,
        required_column(df, SCORE_COLUMNS[1])?,
        required_column(df, SCORE_COLUMNS[2])?,
        required_column(df, SCORE_COLUMNS[3])?,
    ];

    let mut records = Vec::with_capacity(df.height());
    let mut dropped_rows = 0usize;
    let mut seen_keys: HashSet<(String, String)> = HashSet::new();

    for i in 0..df.height() {
        // Data rows sit below the header, so row 1 of data is line 2.
        let row = i + 2;

        let cell = |ca: &StringChunked| -> Option<String> {
            ca.get(i)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let (state, district, zone_raw) =
            match (cell(state_col), cell(district_col), cell(zone_col)) {
                (Some(s), Some(d), Some(z)) => (s, d, z),
                _ => {
                    dropped_rows += 1;
                    continue;
                }
            };
        let raw_scores = [
            cell(score_cols[0]),
            cell(score_cols[1]),
            cell(score_cols[2]),
            cell(score_cols[3]),
        ];
        if raw_scores.iter().any(Option::is_none) {
            dropped_rows += 1;
            continue;
        }

        let zone: Zone = zone_raw
            .parse()
            .map_err(|_| DataFormatError::UnknownZone {
                row,
                value: zone_raw.clone(),
            })?;
        let mut scores = [0.0f64; 4];
        for (slot, (column, raw)) in scores
            .iter_mut()
            .zip(SCORE_COLUMNS.iter().copied().zip(raw_scores.iter()))
        {
            *slot = parse_score(row, column, raw.as_deref().unwrap_or_default())?;
        }

        let key = (state.to_ascii_lowercase(), district.to_ascii_lowercase());
        if !seen_keys.insert(key) {
            return Err(DataFormatError::DuplicateDistrict { state, district });
        }

        records.push(DistrictRecord {
            state,
            district,
            zone,
            dei: scores[0],
            access_health: scores[1],
            update_load: scores[2],
            stability: scores[3],
        });
    }

    if dropped_rows > 0 {
        warn!(dropped_rows, "dropped rows with missing required values");
    }

    Ok(LoadOutcome {
        records,
        dropped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "state,district,zone,dei,access_health,update_load,stability";

    fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("districts.csv");
        fs::write(&path, body).expect("write csv fixture");
        path
    }

    #[test]
    fn loads_valid_rows_in_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER}\n\
                 Punjab,Ludhiana,North,47.0,66.0,58.0,72.0\n\
                 Punjab,Amritsar,North,81.0,88.0,22.0,18.0\n"
            ),
        );

        let outcome = load_dataset(&path).unwrap();
        assert_eq!(outcome.dropped_rows, 0);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].district, "Ludhiana");
        assert_eq!(outcome.records[1].district, "Amritsar");
        assert_eq!(outcome.records[0].zone, Zone::North);
        assert_eq!(outcome.records[0].stability, 72.0);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER},literacy\n\
                 Punjab,Amritsar,North,81.0,88.0,22.0,18.0,76.6\n"
            ),
        );

        let outcome = load_dataset(&path).unwrap();
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn rows_with_missing_values_are_dropped_and_counted() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER}\n\
                 Punjab,Amritsar,North,81.0,88.0,22.0,18.0\n\
                 ,Nowhere,North,50.0,50.0,50.0,50.0\n\
                 Punjab,Ludhiana,North,47.0,,58.0,72.0\n"
            ),
        );

        let outcome = load_dataset(&path).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.dropped_rows, 2);
    }

    #[test]
    fn missing_required_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "state,district,zone,dei,access_health,update_load\n\
             Punjab,Amritsar,North,81.0,88.0,22.0\n",
        );

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DataFormatError::MissingColumn("stability")));
    }

    #[test]
    fn non_numeric_score_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!("{HEADER}\nPunjab,Amritsar,North,eighty,88.0,22.0,18.0\n"),
        );

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(
            err,
            DataFormatError::InvalidScore { column: "dei", .. }
        ));
    }

    #[test]
    fn out_of_range_score_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!("{HEADER}\nPunjab,Amritsar,North,81.0,108.0,22.0,18.0\n"),
        );

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(
            err,
            DataFormatError::ScoreOutOfRange {
                column: "access_health",
                ..
            }
        ));
    }

    #[test]
    fn unknown_zone_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!("{HEADER}\nPunjab,Amritsar,Central,81.0,88.0,22.0,18.0\n"),
        );

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DataFormatError::UnknownZone { row: 2, .. }));
    }

    #[test]
    fn duplicate_district_key_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER}\n\
                 Punjab,Amritsar,North,81.0,88.0,22.0,18.0\n\
                 Punjab,AMRITSAR,North,47.0,66.0,58.0,72.0\n"
            ),
        );

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DataFormatError::DuplicateDistrict { .. }));
    }

    #[test]
    fn missing_file_fails_before_parsing() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataFormatError::FileNotFound(_)));
    }
}
