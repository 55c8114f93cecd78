//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer and by
//! in-memory fakes in the integration tests.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for unit testing
//!
//! # Available Repositories
//!
//! - [`StudentRepository`] - Student lookup and rosters
//! - [`CourseRepository`] - Course resolution
//! - [`ScoreRepository`] - Score aggregation and score-record writes
//! - [`PrincipalRepository`] - Credentials and identity resolution
//! - [`SessionRepository`] - Bearer session storage

pub mod course_repository;
pub mod principal_repository;
pub mod score_repository;
pub mod session_repository;
pub mod student_repository;

pub use course_repository::CourseRepository;
pub use principal_repository::PrincipalRepository;
pub use score_repository::{ScoreFilter, ScoreRepository};
pub use session_repository::SessionRepository;
pub use student_repository::StudentRepository;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use principal_repository::MockPrincipalRepository;
#[cfg(test)]
pub use score_repository::MockScoreRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
