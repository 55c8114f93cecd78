//! Course entity: a graded offering within one semester of a batch.

/// A course offered in a specific semester. The human code is unique per
/// semester offering.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: i64,
    pub semester_id: i64,
    pub name: String,
    pub code: String,
    pub credits: i32,
}
