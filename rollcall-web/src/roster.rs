//! Roster importer
//!
//! Replaces the entire student roster from a delimited roster file. Rows
//! are streamed in order; the first occurrence of a registration number
//! wins and later repeats are reported back as skipped duplicates. There
//! is no wrapping transaction: a stream error mid-import leaves the rows
//! inserted before the error committed.

use rollcall_common::db::models::Student;
use rollcall_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Header label of the registration number column
pub const ROLL_NO_COLUMN: &str = "RegdNo";

/// Header label of the student name column
pub const NAME_COLUMN: &str = "NameoftheStudent";

/// A roster row whose registration number repeated an earlier row
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateRow {
    pub roll_no: String,
    pub name: String,
}

/// Outcome of a roster import, for caller-side reporting
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    /// Number of students inserted
    pub inserted: usize,
    /// Rows skipped because their registration number repeated
    pub duplicates: Vec<DuplicateRow>,
    /// The roster after import, ordered by registration number
    pub students: Vec<Student>,
}

/// Import a roster, replacing all currently enrolled students
pub async fn import_roster<R: Read>(pool: &SqlitePool, source: R) -> Result<ImportSummary> {
    // Full replace semantics: clear the roster before streaming the new one
    sqlx::query("DELETE FROM students").execute(pool).await?;

    let mut reader = csv::Reader::from_reader(source);
    let headers = reader
        .headers()
        .map_err(|e| Error::Import(e.to_string()))?
        .clone();
    let roll_idx = headers.iter().position(|h| h == ROLL_NO_COLUMN);
    let name_idx = headers.iter().position(|h| h == NAME_COLUMN);

    let mut inserted = 0usize;
    let mut duplicates = Vec::new();
    let mut seen = HashSet::new();

    for record in reader.records() {
        let record = record.map_err(|e| Error::Import(e.to_string()))?;
        let roll_no = roll_idx.and_then(|i| record.get(i)).unwrap_or("").trim();
        let name = name_idx.and_then(|i| record.get(i)).unwrap_or("").trim();

        // Rows missing either field are skipped, not treated as errors
        if roll_no.is_empty() || name.is_empty() {
            continue;
        }

        // First occurrence wins; repeats are reported, not merged
        if !seen.insert(roll_no.to_string()) {
            duplicates.push(DuplicateRow {
                roll_no: roll_no.to_string(),
                name: name.to_string(),
            });
            continue;
        }

        sqlx::query("INSERT INTO students (roll_no, name) VALUES (?, ?)")
            .bind(roll_no)
            .bind(name)
            .execute(pool)
            .await?;
        inserted += 1;
    }

    // Verify the data after loading: re-read in registration number order
    let students = list_students(pool).await?;

    info!("Loaded {} students from roster", inserted);
    if !duplicates.is_empty() {
        warn!("Found {} duplicate roll numbers in roster:", duplicates.len());
        for dup in &duplicates {
            warn!("Roll No {}: {} (skipped)", dup.roll_no, dup.name);
        }
    }
    for student in students.iter().take(5) {
        info!("{}: {}", student.roll_no, student.name);
    }

    Ok(ImportSummary {
        inserted,
        duplicates,
        students,
    })
}

/// Import a roster from a file on disk
pub async fn import_roster_file(pool: &SqlitePool, path: &Path) -> Result<ImportSummary> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Import(format!("cannot read roster {}: {}", path.display(), e)))?;
    import_roster(pool, file).await
}

/// Current roster ordered by registration number ascending
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>> {
    let students =
        sqlx::query_as::<_, Student>("SELECT id, roll_no, name FROM students ORDER BY roll_no")
            .fetch_all(pool)
            .await?;
    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        rollcall_common::db::create_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_import_basic_roster() {
        let pool = memory_pool().await;
        let csv = "RegdNo,NameoftheStudent\nR002,Binh\nR001,Asha\n";

        let summary = import_roster(&pool, csv.as_bytes()).await.unwrap();

        assert_eq!(summary.inserted, 2);
        assert!(summary.duplicates.is_empty());
        // Summary roster comes back ordered by roll number
        assert_eq!(summary.students[0].roll_no, "R001");
        assert_eq!(summary.students[1].roll_no, "R002");
    }

    #[tokio::test]
    async fn test_duplicate_roll_numbers_first_occurrence_wins() {
        let pool = memory_pool().await;
        let csv = "RegdNo,NameoftheStudent\nR001,Asha\nR001,Impostor\nR002,Binh\n";

        let summary = import_roster(&pool, csv.as_bytes()).await.unwrap();

        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.duplicates.len(), 1);
        assert_eq!(summary.duplicates[0].roll_no, "R001");
        assert_eq!(summary.duplicates[0].name, "Impostor");

        let kept: String =
            sqlx::query_scalar("SELECT name FROM students WHERE roll_no = 'R001'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(kept, "Asha");
    }

    #[tokio::test]
    async fn test_import_replaces_previous_roster() {
        let pool = memory_pool().await;

        import_roster(&pool, "RegdNo,NameoftheStudent\nR001,Asha\n".as_bytes())
            .await
            .unwrap();
        let summary = import_roster(&pool, "RegdNo,NameoftheStudent\nR002,Binh\n".as_bytes())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.students.len(), 1);
        assert_eq!(summary.students[0].roll_no, "R002");
    }

    #[tokio::test]
    async fn test_rows_missing_fields_are_skipped() {
        let pool = memory_pool().await;
        let csv = "RegdNo,NameoftheStudent\nR001,\n,Nameless\nR002,Binh\n";

        let summary = import_roster(&pool, csv.as_bytes()).await.unwrap();

        assert_eq!(summary.inserted, 1);
        assert!(summary.duplicates.is_empty());
        assert_eq!(summary.students[0].roll_no, "R002");
    }

    #[tokio::test]
    async fn test_unreadable_roster_file_is_an_import_error() {
        let pool = memory_pool().await;

        let result = import_roster_file(&pool, Path::new("/nonexistent/roster.csv")).await;

        match result {
            Err(Error::Import(_)) => {}
            other => panic!("Expected import error, got {:?}", other),
        }
    }
}
