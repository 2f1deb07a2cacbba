use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::courses::model::{CourseDetail, CourseResponse};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::service::EnrollmentService;

/// Browse all published courses
#[utoipa::path(
    get,
    path = "/api/students/courses",
    responses(
        (status = 200, description = "All published courses, enrollment sets omitted", body = [CourseResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_available_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = CourseService::list_published(&state.db).await?;
    Ok(Json(courses))
}

/// List the authenticated student's enrolled courses
#[utoipa::path(
    get,
    path = "/api/students/enrolled",
    responses(
        (status = 200, description = "The student's enrolled courses", body = [CourseResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_enrolled_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let student_id = auth_user.user_id()?;
    let courses = EnrollmentService::list_enrolled(&state.db, student_id).await?;
    Ok(Json(courses))
}

/// Enroll in a course
#[utoipa::path(
    post,
    path = "/api/students/enroll/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrolled successfully", body = MessageResponse),
        (status = 400, description = "Already enrolled in this course", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user))]
pub async fn enroll_in_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let student_id = auth_user.user_id()?;
    EnrollmentService::enroll(&state.db, student_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Successfully enrolled in course".to_string(),
    }))
}

/// Get course details with the student's enrollment status
#[utoipa::path(
    get,
    path = "/api/students/course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details with isEnrolled flag", body = CourseDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_course_details(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetail>, AppError> {
    let student_id = auth_user.user_id()?;
    let course = EnrollmentService::get_for_student(&state.db, id, student_id).await?;
    Ok(Json(course))
}
