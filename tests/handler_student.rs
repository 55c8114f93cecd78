mod common;

use chrono::Utc;

use campus_records::domain::entities::{DepartmentType, Principal, Role, ScoreType};
use common::{FakeAuth, Fixture};

#[tokio::test]
async fn test_profile_returns_context_and_course_count() {
    let fixture = Fixture::new();
    let auth = FakeAuth::new();

    fixture
        .add_student(common::student(1, "EN001", 10, 30, DepartmentType::Soh, 2))
        .await;
    fixture
        .add_offering(30, 2, common::course(77, "HU201", "Ethics"))
        .await;
    fixture
        .add_offering(30, 2, common::course(78, "HU202", "History"))
        .await;
    fixture.enroll(1, 77).await;
    fixture.enroll(1, 78).await;

    auth.seed(
        Role::Student,
        "student1@example.edu",
        common::password_hash("pw"),
        Principal::Student { id: 1 },
    )
    .await;

    let server = common::test_server(common::test_state(fixture, auth));
    let token = common::login(&server, Role::Student, "student1@example.edu", "pw").await;

    let response = server.get("/student/me").authorization_bearer(&token).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["enrollment_number"], "EN001");
    assert_eq!(json["department"], "SOH");
    assert_eq!(json["semester_no"], 2);
    assert_eq!(json["course_count"], 2);
    assert_eq!(json["center_name"], "Center 10");
}

#[tokio::test]
async fn test_academic_details_lists_courses_and_scores() {
    let fixture = Fixture::new();
    let auth = FakeAuth::new();

    fixture
        .add_student(common::student(1, "EN001", 10, 30, DepartmentType::Sot, 1))
        .await;
    fixture
        .add_offering(30, 1, common::course(77, "CS101", "Programming"))
        .await;
    fixture.enroll(1, 77).await;
    fixture
        .add_score(1, 77, ScoreType::Assignment, 18.0, Utc::now())
        .await;
    fixture
        .add_score(1, 77, ScoreType::MidSem, 55.0, Utc::now())
        .await;

    auth.seed(
        Role::Student,
        "student1@example.edu",
        common::password_hash("pw"),
        Principal::Student { id: 1 },
    )
    .await;

    let server = common::test_server(common::test_state(fixture, auth));
    let token = common::login(&server, Role::Student, "student1@example.edu", "pw").await;

    let response = server
        .get("/student/academic-details")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["courses"].as_array().unwrap().len(), 1);
    assert_eq!(json["courses"][0]["code"], "CS101");

    let scores = json["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| s["course_code"] == "CS101"));
}

#[tokio::test]
async fn test_admin_roster_defaults_to_own_center() {
    let fixture = Fixture::new();
    let auth = FakeAuth::new();

    fixture
        .add_student(common::student(1, "EN001", 10, 30, DepartmentType::Sot, 1))
        .await;
    fixture
        .add_student(common::student(2, "EN002", 10, 30, DepartmentType::Som, 1))
        .await;
    fixture
        .add_student(common::student(3, "EN003", 99, 31, DepartmentType::Sot, 1))
        .await;

    auth.seed(
        Role::Admin,
        "admin@example.edu",
        common::password_hash("pw"),
        Principal::Admin { id: 7, center_id: 10 },
    )
    .await;

    let server = common::test_server(common::test_state(fixture, auth));
    let token = common::login(&server, Role::Admin, "admin@example.edu", "pw").await;

    let response = server
        .get("/admin/students")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total_count"], 2);
    let students = json["students"].as_array().unwrap();
    assert!(students.iter().all(|s| s["center_name"] == "Center 10"));
}

#[tokio::test]
async fn test_admin_cannot_read_foreign_center() {
    let fixture = Fixture::new();
    let auth = FakeAuth::new();

    auth.seed(
        Role::Admin,
        "admin@example.edu",
        common::password_hash("pw"),
        Principal::Admin { id: 7, center_id: 10 },
    )
    .await;

    let server = common::test_server(common::test_state(fixture, auth));
    let token = common::login(&server, Role::Admin, "admin@example.edu", "pw").await;

    let response = server
        .get("/admin/students")
        .add_query_param("center", "99")
        .authorization_bearer(&token)
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn test_super_admin_picks_center_explicitly() {
    let fixture = Fixture::new();
    let auth = FakeAuth::new();

    fixture
        .add_student(common::student(3, "EN003", 99, 31, DepartmentType::Sot, 1))
        .await;

    auth.seed(
        Role::SuperAdmin,
        "root@example.edu",
        common::password_hash("pw"),
        Principal::SuperAdmin { id: 1 },
    )
    .await;

    let server = common::test_server(common::test_state(fixture, auth));
    let token = common::login(&server, Role::SuperAdmin, "root@example.edu", "pw").await;

    // Without a center the request is invalid.
    let response = server
        .get("/admin/students")
        .authorization_bearer(&token)
        .await;
    response.assert_status_bad_request();

    let response = server
        .get("/admin/students")
        .add_query_param("center", "99")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["students"][0]["enrollment_number"], "EN003");
}
