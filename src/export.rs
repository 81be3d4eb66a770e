//! CSV export of the last rendered result set
//!
//! The column set follows the first cached row: the three core columns are
//! always present, optional columns appear only when the first row carries
//! them. A legacy result set therefore exports exactly
//! `candidate_id,rank,similarity_score`.

use chrono::Local;
use std::path::PathBuf;

use crate::error::AppError;
use crate::results::ResultRow;

struct Column {
    name: &'static str,
    get: fn(&ResultRow) -> String,
}

fn columns_for(first: &ResultRow) -> Vec<Column> {
    let mut columns = vec![Column {
        name: "candidate_id",
        get: |row| row.candidate_id.clone(),
    }];
    if first.name.is_some() {
        columns.push(Column {
            name: "name",
            get: |row| row.name.clone().unwrap_or_default(),
        });
    }
    columns.push(Column {
        name: "rank",
        get: |row| row.rank.to_string(),
    });
    columns.push(Column {
        name: "similarity_score",
        get: |row| row.similarity_score.to_string(),
    });
    if first.match_percentage.is_some() {
        columns.push(Column {
            name: "match_percentage",
            get: |row| {
                row.match_percentage
                    .map(|p| p.to_string())
                    .unwrap_or_default()
            },
        });
    }
    if first.summary.is_some() {
        columns.push(Column {
            name: "summary",
            get: |row| row.summary.clone().unwrap_or_default(),
        });
    }
    if first.job_id.is_some() {
        columns.push(Column {
            name: "job_id",
            get: |row| row.job_id.clone().unwrap_or_default(),
        });
    }
    if first.job_title.is_some() {
        columns.push(Column {
            name: "job_title",
            get: |row| row.job_title.clone().unwrap_or_default(),
        });
    }
    columns
}

/// Serialize the cached rows. Fails on an empty cache.
pub fn build_csv(rows: &[ResultRow]) -> Result<Vec<u8>, AppError> {
    let first = rows.first().ok_or(AppError::EmptyExport)?;
    let columns = columns_for(first);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(columns.iter().map(|column| column.name))
        .map_err(|e| AppError::Export(e.to_string()))?;
    for row in rows {
        writer
            .write_record(columns.iter().map(|column| (column.get)(row)))
            .map_err(|e| AppError::Export(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))
}

/// `recommendations_<YYYY-MM-DD>.csv` in the download directory, falling
/// back to the current directory.
pub fn default_export_path() -> PathBuf {
    let dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!(
        "recommendations_{}.csv",
        Local::now().format("%Y-%m-%d")
    ))
}

/// Write the cached rows to the default export path.
pub fn export_rows(rows: &[ResultRow]) -> Result<PathBuf, AppError> {
    let bytes = build_csv(rows)?;
    let path = default_export_path();
    std::fs::write(&path, bytes).map_err(|e| AppError::Export(e.to_string()))?;
    tracing::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, rank: u32, score: f64) -> ResultRow {
        ResultRow {
            candidate_id: id.to_string(),
            name: None,
            rank,
            similarity_score: score,
            match_percentage: None,
            summary: None,
            job_id: None,
            job_title: None,
        }
    }

    #[test]
    fn legacy_rows_export_the_three_core_columns() {
        let rows = vec![row("C1", 1, 0.5)];
        let csv = String::from_utf8(build_csv(&rows).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("candidate_id,rank,similarity_score"));
        assert_eq!(lines.next(), Some("C1,1,0.5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn optional_columns_follow_the_first_row() {
        let mut first = row("C1", 1, 0.8);
        first.name = Some("Ada".to_string());
        first.job_id = Some("J1".to_string());
        first.job_title = Some("Eng".to_string());
        let rows = vec![first, row("C2", 2, 0.6)];

        let csv = String::from_utf8(build_csv(&rows).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("candidate_id,name,rank,similarity_score,job_id,job_title")
        );
        assert_eq!(lines.next(), Some("C1,Ada,1,0.8,J1,Eng"));
        // Later rows without the optional values emit empty cells.
        assert_eq!(lines.next(), Some("C2,,2,0.6,,"));
    }

    #[test]
    fn values_containing_commas_are_quoted() {
        let mut only = row("C1", 1, 0.9);
        only.summary = Some("Strong in Python, Rust".to_string());
        let csv = String::from_utf8(build_csv(&[only]).unwrap()).unwrap();
        assert!(csv.contains("\"Strong in Python, Rust\""));
    }

    #[test]
    fn empty_cache_is_an_error() {
        assert_eq!(build_csv(&[]), Err(AppError::EmptyExport));
    }

    #[test]
    fn export_filename_carries_the_current_date() {
        let name = default_export_path();
        let name = name.file_name().unwrap().to_string_lossy().into_owned();
        let expected = format!("recommendations_{}.csv", Local::now().format("%Y-%m-%d"));
        assert_eq!(name, expected);
    }
}
