//! Database models

use crate::HOURS_PER_SESSION;
use serde::{Deserialize, Serialize};

/// An enrolled student. The full set is replaced on every roster import.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub roll_no: String,
    pub name: String,
}

/// One attendance row, written per enrolled student per recording session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub date: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub session_type: String,
    pub status: String,
    pub hours: i64,
}

/// Attendance status, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    /// Hour credit for this status: fixed allotment when present, 0 otherwise
    pub fn hours(&self) -> i64 {
        match self {
            AttendanceStatus::Present => HOURS_PER_SESSION,
            AttendanceStatus::Absent => 0,
        }
    }
}
