//! PostgreSQL repository implementations.

pub mod pg_course_repository;
pub mod pg_principal_repository;
pub mod pg_score_repository;
pub mod pg_session_repository;
pub mod pg_student_repository;

pub use pg_course_repository::PgCourseRepository;
pub use pg_principal_repository::PgPrincipalRepository;
pub use pg_score_repository::PgScoreRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_student_repository::PgStudentRepository;
