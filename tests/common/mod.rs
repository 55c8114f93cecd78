#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use campus_records::api::middleware::auth;
use campus_records::api::routes;
use campus_records::application::services::{
    AuthService, LeaderboardService, MarksService, StudentService,
};
use campus_records::domain::entities::{
    Course, CourseScore, Credentials, DepartmentType, Principal, Role, ScorePatch, ScorePoint,
    ScoreType, ScoreUpsert, Session, StudentContext, StudentScoreRecord, StudentSummary,
};
use campus_records::domain::ranking::ScoreEntry;
use campus_records::domain::repositories::{
    CourseRepository, PrincipalRepository, ScoreFilter, ScoreRepository, SessionRepository,
    StudentRepository,
};
use campus_records::error::AppError;
use campus_records::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";

/// A course offered to a batch in a specific semester.
pub struct Offering {
    pub batch_id: i64,
    pub semester_no: i32,
    pub course: Course,
}

/// In-memory stand-in for the Postgres repositories, honoring the same
/// filter semantics.
#[derive(Default)]
pub struct Fixture {
    students: Mutex<Vec<StudentContext>>,
    offerings: Mutex<Vec<Offering>>,
    enrollments: Mutex<Vec<(i64, i64)>>,
    scores: Mutex<Vec<CourseScore>>,
    next_score_id: AtomicI64,
}

impl Fixture {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_score_id: AtomicI64::new(1),
            ..Self::default()
        })
    }

    pub async fn add_student(&self, student: StudentContext) {
        self.students.lock().await.push(student);
    }

    pub async fn add_offering(&self, batch_id: i64, semester_no: i32, course: Course) {
        self.offerings.lock().await.push(Offering {
            batch_id,
            semester_no,
            course,
        });
    }

    pub async fn enroll(&self, student_id: i64, course_id: i64) {
        self.enrollments.lock().await.push((student_id, course_id));
    }

    pub async fn add_score(
        &self,
        student_id: i64,
        course_id: i64,
        score_type: ScoreType,
        marks: f64,
        date_of_exam: DateTime<Utc>,
    ) {
        let id = self.next_score_id.fetch_add(1, Ordering::SeqCst);
        self.scores.lock().await.push(CourseScore {
            id,
            student_id,
            course_id,
            score_type,
            marks_obtained: marks,
            total_obtained: 100.0,
            date_of_exam,
            graded_at: Utc::now(),
            updated_at: Utc::now(),
        });
    }
}

fn matches_filter(score: &CourseScore, filter: &ScoreFilter) -> bool {
    filter.course_id.is_none_or(|c| score.course_id == c)
        && filter.score_type.is_none_or(|t| score.score_type == t)
}

impl Fixture {
    async fn totals_for(&self, peers: Vec<StudentContext>, filter: &ScoreFilter) -> Vec<ScoreEntry> {
        let scores = self.scores.lock().await;
        peers
            .into_iter()
            .filter(|s| filter.min_semester.is_none_or(|m| s.semester_no >= m))
            .map(|s| {
                let total: f64 = scores
                    .iter()
                    .filter(|score| score.student_id == s.id && matches_filter(score, filter))
                    .map(|score| score.marks_obtained)
                    .sum();
                ScoreEntry {
                    student_id: s.id,
                    name: s.name,
                    email: s.email,
                    enrollment_number: s.enrollment_number,
                    total_marks: total,
                }
            })
            .collect()
    }
}

#[async_trait]
impl StudentRepository for Fixture {
    async fn find_context(&self, id: i64) -> Result<Option<StudentContext>, AppError> {
        Ok(self
            .students
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_id_by_enrollment(
        &self,
        enrollment_number: &str,
    ) -> Result<Option<i64>, AppError> {
        Ok(self
            .students
            .lock()
            .await
            .iter()
            .find(|s| s.enrollment_number == enrollment_number)
            .map(|s| s.id))
    }

    async fn list_by_center(&self, center_id: i64) -> Result<Vec<StudentSummary>, AppError> {
        Ok(self
            .students
            .lock()
            .await
            .iter()
            .filter(|s| s.center_id == center_id)
            .map(|s| StudentSummary {
                id: s.id,
                name: s.name.clone(),
                email: s.email.clone(),
                enrollment_number: s.enrollment_number.clone(),
                semester_no: s.semester_no,
                center_name: s.center_name.clone(),
                department: s.department,
                batch_name: s.batch_name.clone(),
            })
            .collect())
    }

    async fn count_by_center(&self, center_id: i64) -> Result<i64, AppError> {
        Ok(self
            .students
            .lock()
            .await
            .iter()
            .filter(|s| s.center_id == center_id)
            .count() as i64)
    }

    async fn course_count(&self, student_id: i64) -> Result<i64, AppError> {
        Ok(self
            .enrollments
            .lock()
            .await
            .iter()
            .filter(|(s, _)| *s == student_id)
            .count() as i64)
    }
}

#[async_trait]
impl CourseRepository for Fixture {
    async fn find_in_batch_semester(
        &self,
        batch_id: i64,
        semester_no: i32,
        code: &str,
    ) -> Result<Option<Course>, AppError> {
        Ok(self
            .offerings
            .lock()
            .await
            .iter()
            .find(|o| o.batch_id == batch_id && o.semester_no == semester_no && o.course.code == code)
            .map(|o| o.course.clone()))
    }

    async fn find_enrolled_by_code(
        &self,
        student_id: i64,
        code: &str,
    ) -> Result<Option<Course>, AppError> {
        let enrollments = self.enrollments.lock().await;
        let offerings = self.offerings.lock().await;
        Ok(offerings
            .iter()
            .find(|o| {
                o.course.code == code
                    && enrollments
                        .iter()
                        .any(|(s, c)| *s == student_id && *c == o.course.id)
            })
            .map(|o| o.course.clone()))
    }

    async fn list_for_student(&self, student_id: i64) -> Result<Vec<Course>, AppError> {
        let enrollments = self.enrollments.lock().await;
        let offerings = self.offerings.lock().await;
        Ok(offerings
            .iter()
            .filter(|o| {
                enrollments
                    .iter()
                    .any(|(s, c)| *s == student_id && *c == o.course.id)
            })
            .map(|o| o.course.clone())
            .collect())
    }
}

#[async_trait]
impl ScoreRepository for Fixture {
    async fn batch_totals(
        &self,
        center_id: i64,
        batch_id: i64,
        filter: &ScoreFilter,
    ) -> Result<Vec<ScoreEntry>, AppError> {
        let peers: Vec<StudentContext> = self
            .students
            .lock()
            .await
            .iter()
            .filter(|s| s.center_id == center_id && s.batch_id == batch_id)
            .cloned()
            .collect();
        Ok(self.totals_for(peers, filter).await)
    }

    async fn department_totals(
        &self,
        department: DepartmentType,
        filter: &ScoreFilter,
    ) -> Result<Vec<ScoreEntry>, AppError> {
        let peers: Vec<StudentContext> = self
            .students
            .lock()
            .await
            .iter()
            .filter(|s| s.department == department)
            .cloned()
            .collect();
        Ok(self.totals_for(peers, filter).await)
    }

    async fn series(
        &self,
        student_id: i64,
        course_id: i64,
        score_type: ScoreType,
    ) -> Result<Vec<ScorePoint>, AppError> {
        let mut points: Vec<ScorePoint> = self
            .scores
            .lock()
            .await
            .iter()
            .filter(|s| {
                s.student_id == student_id && s.course_id == course_id && s.score_type == score_type
            })
            .map(|s| ScorePoint {
                marks_obtained: s.marks_obtained,
                total_obtained: s.total_obtained,
                date_of_exam: s.date_of_exam,
                graded_at: s.graded_at,
            })
            .collect();
        points.sort_by_key(|p| p.date_of_exam);
        Ok(points)
    }

    async fn list_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<StudentScoreRecord>, AppError> {
        let offerings = self.offerings.lock().await;
        Ok(self
            .scores
            .lock()
            .await
            .iter()
            .filter(|s| s.student_id == student_id)
            .filter_map(|s| {
                offerings
                    .iter()
                    .find(|o| o.course.id == s.course_id)
                    .map(|o| StudentScoreRecord {
                        id: s.id,
                        course_code: o.course.code.clone(),
                        course_name: o.course.name.clone(),
                        score_type: s.score_type,
                        marks_obtained: s.marks_obtained,
                        total_obtained: s.total_obtained,
                        date_of_exam: s.date_of_exam,
                    })
            })
            .collect())
    }

    async fn upsert(&self, upsert: ScoreUpsert) -> Result<CourseScore, AppError> {
        let mut scores = self.scores.lock().await;
        if let Some(existing) = scores.iter_mut().find(|s| {
            s.student_id == upsert.student_id
                && s.course_id == upsert.course_id
                && s.score_type == upsert.score_type
        }) {
            existing.marks_obtained = upsert.marks_obtained;
            existing.total_obtained = upsert.total_obtained;
            existing.date_of_exam = upsert.date_of_exam;
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }

        let id = self.next_score_id.fetch_add(1, Ordering::SeqCst);
        let score = CourseScore {
            id,
            student_id: upsert.student_id,
            course_id: upsert.course_id,
            score_type: upsert.score_type,
            marks_obtained: upsert.marks_obtained,
            total_obtained: upsert.total_obtained,
            date_of_exam: upsert.date_of_exam,
            graded_at: Utc::now(),
            updated_at: Utc::now(),
        };
        scores.push(score.clone());
        Ok(score)
    }

    async fn update(&self, id: i64, patch: ScorePatch) -> Result<Option<CourseScore>, AppError> {
        let mut scores = self.scores.lock().await;
        let Some(score) = scores.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        if let Some(score_type) = patch.score_type {
            score.score_type = score_type;
        }
        if let Some(marks) = patch.marks_obtained {
            score.marks_obtained = marks;
        }
        if let Some(total) = patch.total_obtained {
            score.total_obtained = total;
        }
        if let Some(date) = patch.date_of_exam {
            score.date_of_exam = date;
        }
        score.updated_at = Utc::now();

        Ok(Some(score.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut scores = self.scores.lock().await;
        let before = scores.len();
        scores.retain(|s| s.id != id);
        Ok(scores.len() < before)
    }
}

/// A seeded login identity.
pub struct Account {
    pub role: Role,
    pub email: String,
    pub password_hash: String,
    pub principal: Principal,
}

/// In-memory stand-in for the principal and session repositories.
#[derive(Default)]
pub struct FakeAuth {
    accounts: Mutex<Vec<Account>>,
    sessions: Mutex<Vec<(String, Session)>>,
    next_session_id: AtomicI64,
}

impl FakeAuth {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_session_id: AtomicI64::new(1),
            ..Self::default()
        })
    }

    pub async fn seed(&self, role: Role, email: &str, password_hash: String, principal: Principal) {
        self.accounts.lock().await.push(Account {
            role,
            email: email.to_string(),
            password_hash,
            principal,
        });
    }
}

#[async_trait]
impl PrincipalRepository for FakeAuth {
    async fn find_credentials(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<Credentials>, AppError> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|a| a.role == role && a.email == email)
            .map(|a| Credentials {
                id: a.principal.id(),
                password_hash: a.password_hash.clone(),
            }))
    }

    async fn resolve(&self, role: Role, id: i64) -> Result<Option<Principal>, AppError> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|a| a.role == role && a.principal.id() == id)
            .map(|a| a.principal))
    }

    async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        center_id: Option<i64>,
    ) -> Result<i64, AppError> {
        let _ = name;
        let id = 1000 + self.accounts.lock().await.len() as i64;
        let principal = match role {
            Role::SuperAdmin => Principal::SuperAdmin { id },
            _ => Principal::Admin {
                id,
                center_id: center_id.unwrap_or(0),
            },
        };
        self.seed(role, email, password_hash.to_string(), principal)
            .await;
        Ok(id)
    }
}

#[async_trait]
impl SessionRepository for FakeAuth {
    async fn create(
        &self,
        token_hash: &str,
        role: Role,
        principal_id: i64,
    ) -> Result<Session, AppError> {
        let id = self.next_session_id.fetch_add(1, Ordering::SeqCst);
        let session = Session {
            id,
            role,
            principal_id,
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        self.sessions
            .lock()
            .await
            .push((token_hash.to_string(), session.clone()));
        Ok(session)
    }

    async fn find_active(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        Ok(self
            .sessions
            .lock()
            .await
            .iter()
            .find(|(hash, s)| hash == token_hash && s.revoked_at.is_none())
            .map(|(_, s)| s.clone()))
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        if let Some((_, session)) = self
            .sessions
            .lock()
            .await
            .iter_mut()
            .find(|(hash, _)| hash == token_hash)
        {
            session.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Session>, AppError> {
        Ok(self
            .sessions
            .lock()
            .await
            .iter()
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn revoke(&self, id: i64) -> Result<(), AppError> {
        if let Some((_, session)) = self
            .sessions
            .lock()
            .await
            .iter_mut()
            .find(|(_, s)| s.id == id)
        {
            session.revoked_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        Ok(self
            .sessions
            .lock()
            .await
            .iter()
            .filter(|(_, s)| s.revoked_at.is_none())
            .count() as i64)
    }
}

/// Builds an [`AppState`] over the in-memory fakes.
pub fn test_state(fixture: Arc<Fixture>, auth: Arc<FakeAuth>) -> AppState {
    let auth_service = Arc::new(AuthService::new(
        auth.clone(),
        auth.clone(),
        TEST_SECRET.to_string(),
    ));

    AppState {
        auth_service,
        leaderboard_service: Arc::new(LeaderboardService::new(
            fixture.clone(),
            fixture.clone(),
            fixture.clone(),
        )),
        student_service: Arc::new(StudentService::new(
            fixture.clone(),
            fixture.clone(),
            fixture.clone(),
        )),
        marks_service: Arc::new(MarksService::new(
            fixture.clone(),
            fixture.clone(),
            fixture,
        )),
        sessions: auth,
    }
}

/// Full router wired like production, minus rate limiting and path
/// normalization.
pub fn test_server(state: AppState) -> TestServer {
    let student_router = routes::student_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_student,
    ));

    let staff_layer = middleware::from_fn_with_state(state.clone(), auth::require_staff);
    let admin_router = routes::admin_routes().route_layer(staff_layer.clone());
    let marks_router = routes::marks_routes().route_layer(staff_layer);

    let app = Router::new()
        .route(
            "/health",
            get(campus_records::api::handlers::health::health_handler),
        )
        .nest("/auth", routes::auth_routes())
        .nest("/student", student_router)
        .nest("/admin", admin_router)
        .nest("/marks", marks_router)
        .with_state(state);

    TestServer::new(app).unwrap()
}

/// Seeds one student account and returns a bearer token for it.
pub async fn login(server: &TestServer, role: Role, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&serde_json::json!({
            "role": role.as_str(),
            "email": email,
            "password": password,
        }))
        .await;

    response.assert_status_ok();
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// HMAC password hash matching the auth service's scheme under
/// [`TEST_SECRET`].
pub fn password_hash(password: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(TEST_SECRET.as_bytes()).expect("any key length works");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// A student context with sensible defaults for tests.
pub fn student(
    id: i64,
    enrollment: &str,
    center_id: i64,
    batch_id: i64,
    department: DepartmentType,
    semester_no: i32,
) -> StudentContext {
    StudentContext {
        id,
        name: format!("Student {id}"),
        email: format!("student{id}@example.edu"),
        gender: None,
        phone_number: None,
        enrollment_number: enrollment.to_string(),
        semester_no,
        center_id,
        center_name: format!("Center {center_id}"),
        center_location: "Test Town".to_string(),
        department_id: 1,
        department,
        batch_id,
        batch_name: format!("Batch {batch_id}"),
    }
}

pub fn course(id: i64, code: &str, name: &str) -> Course {
    Course {
        id,
        semester_id: id,
        name: name.to_string(),
        code: code.to_string(),
        credits: 4,
    }
}
