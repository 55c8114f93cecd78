//! Application services orchestrating domain logic over the repositories.

pub mod auth_service;
pub mod leaderboard_service;
pub mod marks_service;
pub mod student_service;

pub use auth_service::AuthService;
pub use leaderboard_service::{
    BatchLeaderboard, CourseGraph, CourseRef, DepartmentLeaderboard, LeaderboardFilters,
    LeaderboardService,
};
pub use marks_service::{ImportOutcome, MarkRow, MarksService, SkippedRow};
pub use student_service::{AcademicDetails, CenterRoster, StudentProfile, StudentService};
