//! Attendance recording and report aggregation
//!
//! Recording is append-only: every call writes one row per enrolled
//! student for the given (date, type) session, with no dedup across
//! repeated submissions and no enclosing transaction.

use rollcall_common::db::models::AttendanceStatus;
use rollcall_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Which polarity the submitted id list carries.
///
/// The caller submits whichever of the present/absent lists is smaller;
/// the other side is implied for every remaining enrolled student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkingMode {
    Present,
    Absent,
}

/// Record one attendance row per enrolled student for a session.
///
/// Marked ids arrive as strings and are matched against the student id
/// rendered as a string; ids that match no student are ignored. Returns
/// the number of rows written.
pub async fn record_attendance(
    pool: &SqlitePool,
    date: &str,
    session_type: &str,
    marked_ids: &[String],
    mode: MarkingMode,
) -> Result<usize> {
    let marked: HashSet<&str> = marked_ids.iter().map(String::as_str).collect();

    let student_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM students")
        .fetch_all(pool)
        .await?;

    for id in &student_ids {
        let is_marked = marked.contains(id.to_string().as_str());
        let status = match mode {
            MarkingMode::Present if is_marked => AttendanceStatus::Present,
            MarkingMode::Present => AttendanceStatus::Absent,
            MarkingMode::Absent if is_marked => AttendanceStatus::Absent,
            MarkingMode::Absent => AttendanceStatus::Present,
        };

        sqlx::query(
            "INSERT INTO attendance (student_id, date, type, status, hours) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(date)
        .bind(session_type)
        .bind(status.as_str())
        .bind(status.hours())
        .execute(pool)
        .await?;
    }

    Ok(student_ids.len())
}

/// One line of the attendance report
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub roll_no: String,
    pub name: String,
    pub present_days: i64,
    pub total_hours: i64,
    pub total_days: i64,
    /// present_days / total_days x 100, rounded to 2 decimal places
    pub percentage: f64,
}

/// Aggregate attendance per student, ordered by registration number
pub async fn generate_report(pool: &SqlitePool) -> Result<Vec<ReportRow>> {
    let rows = sqlx::query_as::<_, (String, String, i64, i64, i64)>(
        "SELECT
            s.roll_no,
            s.name,
            COUNT(CASE WHEN a.status = 'present' THEN 1 END) AS present_days,
            COALESCE(SUM(CASE WHEN a.status = 'present' THEN a.hours ELSE 0 END), 0) AS total_hours,
            COUNT(DISTINCT a.date) AS total_days
         FROM students s
         LEFT JOIN attendance a ON s.id = a.student_id
         GROUP BY s.id
         ORDER BY s.roll_no",
    )
    .fetch_all(pool)
    .await?;

    let report = rows
        .into_iter()
        .map(|(roll_no, name, present_days, total_hours, total_days)| {
            // total_days is 0 for students with no records; report 0 instead
            // of dividing by zero
            let percentage = if total_days > 0 {
                (present_days as f64 / total_days as f64 * 100.0 * 100.0).round() / 100.0
            } else {
                0.0
            };
            ReportRow {
                roll_no,
                name,
                present_days,
                total_hours,
                total_days,
                percentage,
            }
        })
        .collect();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_common::db::models::AttendanceRecord;
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

    async fn enroll(pool: &SqlitePool, roll_no: &str, name: &str) -> i64 {
        sqlx::query("INSERT INTO students (roll_no, name) VALUES (?, ?)")
            .bind(roll_no)
            .bind(name)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    async fn status_and_hours(pool: &SqlitePool, student_id: i64) -> (String, i64) {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, student_id, date, type, status, hours FROM attendance WHERE student_id = ?",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await
        .unwrap();
        (record.status, record.hours)
    }

    #[tokio::test]
    async fn test_present_mode_marks_listed_students_present() {
        let pool = memory_pool().await;
        let a = enroll(&pool, "R001", "Asha").await;
        let b = enroll(&pool, "R002", "Binh").await;
        let c = enroll(&pool, "R003", "Chandra").await;

        let marked = vec![a.to_string(), b.to_string()];
        let written = record_attendance(&pool, "2026-08-30", "lecture", &marked, MarkingMode::Present)
            .await
            .unwrap();

        assert_eq!(written, 3);
        assert_eq!(status_and_hours(&pool, a).await, ("present".to_string(), 4));
        assert_eq!(status_and_hours(&pool, b).await, ("present".to_string(), 4));
        assert_eq!(status_and_hours(&pool, c).await, ("absent".to_string(), 0));
    }

    #[tokio::test]
    async fn test_absent_mode_inverts_polarity() {
        let pool = memory_pool().await;
        let a = enroll(&pool, "R001", "Asha").await;
        let b = enroll(&pool, "R002", "Binh").await;
        let c = enroll(&pool, "R003", "Chandra").await;

        let marked = vec![a.to_string()];
        record_attendance(&pool, "2026-08-30", "lecture", &marked, MarkingMode::Absent)
            .await
            .unwrap();

        assert_eq!(status_and_hours(&pool, a).await, ("absent".to_string(), 0));
        assert_eq!(status_and_hours(&pool, b).await, ("present".to_string(), 4));
        assert_eq!(status_and_hours(&pool, c).await, ("present".to_string(), 4));
    }

    #[tokio::test]
    async fn test_repeated_submission_duplicates_rows() {
        let pool = memory_pool().await;
        enroll(&pool, "R001", "Asha").await;
        enroll(&pool, "R002", "Binh").await;

        let marked = vec!["1".to_string()];
        record_attendance(&pool, "2026-08-30", "lecture", &marked, MarkingMode::Present)
            .await
            .unwrap();
        record_attendance(&pool, "2026-08-30", "lecture", &marked, MarkingMode::Present)
            .await
            .unwrap();

        // Same (date, type) submitted twice: full row set inserted both times
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 4);
    }

    #[tokio::test]
    async fn test_report_aggregation() {
        let pool = memory_pool().await;
        let a = enroll(&pool, "R001", "Asha").await;

        // 3 present sessions and 1 absent session across 4 distinct dates
        for date in ["2026-08-25", "2026-08-26", "2026-08-27"] {
            record_attendance(&pool, date, "lecture", &[a.to_string()], MarkingMode::Present)
                .await
                .unwrap();
        }
        record_attendance(&pool, "2026-08-28", "lecture", &[], MarkingMode::Present)
            .await
            .unwrap();

        let report = generate_report(&pool).await.unwrap();
        assert_eq!(report.len(), 1);

        let row = &report[0];
        assert_eq!(row.present_days, 3);
        assert_eq!(row.total_hours, 12);
        assert_eq!(row.total_days, 4);
        assert_eq!(row.percentage, 75.00);
    }

    #[tokio::test]
    async fn test_report_zero_records_guards_division() {
        let pool = memory_pool().await;
        enroll(&pool, "R001", "Asha").await;

        let report = generate_report(&pool).await.unwrap();

        let row = &report[0];
        assert_eq!(row.present_days, 0);
        assert_eq!(row.total_hours, 0);
        assert_eq!(row.total_days, 0);
        assert_eq!(row.percentage, 0.0);
    }

    #[tokio::test]
    async fn test_report_ordered_by_roll_no() {
        let pool = memory_pool().await;
        enroll(&pool, "R002", "Binh").await;
        enroll(&pool, "R001", "Asha").await;

        let report = generate_report(&pool).await.unwrap();

        assert_eq!(report[0].roll_no, "R001");
        assert_eq!(report[1].roll_no, "R002");
    }
}
