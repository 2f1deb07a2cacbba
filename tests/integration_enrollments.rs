mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_course, create_test_user, generate_unique_email, json_body, login, setup_test_app,
};
use learnhub::modules::users::model::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_browse_lists_published_without_enrollment_set(pool: PgPool) {
    let educator_email = generate_unique_email();
    let student_email = generate_unique_email();
    let educator =
        create_test_user(&pool, &educator_email, "password123", UserRole::Educator).await;
    create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    create_test_course(&pool, educator.id, "Published course").await;

    let app = setup_test_app(pool).await;
    let token = login(&app, &student_email, "password123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/students/courses")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Published course");
    assert_eq!(courses[0]["isPublished"], true);
    assert_eq!(courses[0]["educator"]["email"], educator_email);
    // The browse view never exposes the enrollment set.
    assert!(courses[0].get("studentsEnrolled").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_browse_excludes_unpublished(pool: PgPool) {
    let educator_email = generate_unique_email();
    let student_email = generate_unique_email();
    let educator =
        create_test_user(&pool, &educator_email, "password123", UserRole::Educator).await;
    create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    let course_id = create_test_course(&pool, educator.id, "Hidden course").await;

    sqlx::query("UPDATE courses SET is_published = FALSE WHERE id = $1")
        .bind(course_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool).await;
    let token = login(&app, &student_email, "password123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/students/courses")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_routes_reject_educators(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", UserRole::Educator).await;
    let app = setup_test_app(pool).await;
    let token = login(&app, &email, "password123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/students/courses")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_updates_both_sides(pool: PgPool) {
    let educator_email = generate_unique_email();
    let student_email = generate_unique_email();
    let educator =
        create_test_user(&pool, &educator_email, "password123", UserRole::Educator).await;
    let student = create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    let course_id = create_test_course(&pool, educator.id, "Intro").await;

    let app = setup_test_app(pool).await;
    let student_token = login(&app, &student_email, "password123").await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/students/enroll/{course_id}"))
        .header("authorization", format!("Bearer {student_token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Successfully enrolled in course");

    // Student side: the enrolled list contains exactly this course.
    let request = Request::builder()
        .method("GET")
        .uri("/api/students/enrolled")
        .header("authorization", format!("Bearer {student_token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let enrolled = body.as_array().unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0]["id"], course_id.to_string());
    assert_eq!(enrolled[0]["educator"]["email"], educator_email);

    // Course side: the owner's listing shows the student.
    let educator_token = login(&app, &educator_email, "password123").await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/educators/courses")
        .header("authorization", format!("Bearer {educator_token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    let students = courses[0]["studentsEnrolled"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], student.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_twice_fails_and_stays_single(pool: PgPool) {
    let educator_email = generate_unique_email();
    let student_email = generate_unique_email();
    let educator =
        create_test_user(&pool, &educator_email, "password123", UserRole::Educator).await;
    create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    let course_id = create_test_course(&pool, educator.id, "Intro").await;

    let app = setup_test_app(pool).await;
    let token = login(&app, &student_email, "password123").await;

    for (attempt, expected) in [(1, StatusCode::OK), (2, StatusCode::BAD_REQUEST)] {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/students/enroll/{course_id}"))
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected, "attempt {attempt}");
    }

    let request = Request::builder()
        .method("GET")
        .uri("/api/students/enrolled")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_nonexistent_course(pool: PgPool) {
    let student_email = generate_unique_email();
    create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    let app = setup_test_app(pool).await;
    let token = login(&app, &student_email, "password123").await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/students/enroll/{}", Uuid::new_v4()))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_details_reports_enrollment_status(pool: PgPool) {
    let educator_email = generate_unique_email();
    let student_email = generate_unique_email();
    let educator =
        create_test_user(&pool, &educator_email, "password123", UserRole::Educator).await;
    create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    let course_id = create_test_course(&pool, educator.id, "Intro").await;

    let app = setup_test_app(pool).await;
    let token = login(&app, &student_email, "password123").await;

    let detail = |token: String| {
        Request::builder()
            .method("GET")
            .uri(format!("/api/students/course/{course_id}"))
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(detail(token.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["isEnrolled"], false);

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/students/enroll/{course_id}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(detail(token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["isEnrolled"], true);
    assert_eq!(body["educator"]["email"], educator_email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_details_not_found(pool: PgPool) {
    let student_email = generate_unique_email();
    create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    let app = setup_test_app(pool).await;
    let token = login(&app, &student_email, "password123").await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/students/course/{}", Uuid::new_v4()))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_deletion_cascades_to_enrollments(pool: PgPool) {
    let educator_email = generate_unique_email();
    let student_email = generate_unique_email();
    let educator =
        create_test_user(&pool, &educator_email, "password123", UserRole::Educator).await;
    create_test_user(&pool, &student_email, "password123", UserRole::Student).await;
    let course_id = create_test_course(&pool, educator.id, "Short-lived").await;

    let app = setup_test_app(pool).await;
    let student_token = login(&app, &student_email, "password123").await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/students/enroll/{course_id}"))
        .header("authorization", format!("Bearer {student_token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let educator_token = login(&app, &educator_email, "password123").await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/educators/delete-course/{course_id}"))
        .header("authorization", format!("Bearer {educator_token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // No dangling reference survives in the student's enrolled list.
    let request = Request::builder()
        .method("GET")
        .uri("/api/students/enrolled")
        .header("authorization", format!("Bearer {student_token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body.as_array().unwrap().is_empty());
}
