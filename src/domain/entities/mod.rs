//! Core business entities.

pub mod course;
pub mod org;
pub mod principal;
pub mod score;
pub mod student;

pub use course::Course;
pub use org::DepartmentType;
pub use principal::{Credentials, Principal, Role, Session};
pub use score::{
    CourseScore, ScorePatch, ScorePoint, ScoreType, ScoreUpsert, StudentScoreRecord,
};
pub use student::{StudentContext, StudentSummary};
