//! Student entities.

use crate::domain::entities::DepartmentType;

/// A student resolved together with its organizational context. This is the
/// reference-student shape the leaderboard scope is derived from.
/// A student belongs to exactly one center, one department and one batch
/// at a time.
#[derive(Debug, Clone)]
pub struct StudentContext {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub enrollment_number: String,
    pub semester_no: i32,
    pub center_id: i64,
    pub center_name: String,
    pub center_location: String,
    pub department_id: i64,
    pub department: DepartmentType,
    pub batch_id: i64,
    pub batch_name: String,
}

/// Roster row for center-wide student listings.
#[derive(Debug, Clone)]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub enrollment_number: String,
    pub semester_no: i32,
    pub center_name: String,
    pub department: DepartmentType,
    pub batch_name: String,
}
