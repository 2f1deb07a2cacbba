use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CourseResponse, CourseWithStudents, CreateCourseRequest, UpdateCourseRequest};
use super::service::CourseService;

/// List the authenticated educator's courses with enrolled students
#[utoipa::path(
    get,
    path = "/api/educators/courses",
    responses(
        (status = 200, description = "The educator's courses", body = [CourseWithStudents]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - educators only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Educators"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_educator_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<CourseWithStudents>>, AppError> {
    let educator_id = auth_user.user_id()?;
    let courses = CourseService::list_for_educator(&state.db, educator_id).await?;
    Ok(Json(courses))
}

/// Create a new course owned by the authenticated educator
#[utoipa::path(
    post,
    path = "/api/educators/add-course",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created successfully", body = CourseResponse),
        (status = 400, description = "Bad request - blank field or invalid YouTube URL", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - educators only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Educators"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn add_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let educator_id = auth_user.user_id()?;
    let course = CourseService::create_course(&state.db, educator_id, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Edit an owned course (partial update)
#[utoipa::path(
    put,
    path = "/api/educators/edit-course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated successfully", body = CourseResponse),
        (status = 400, description = "Bad request - invalid YouTube URL", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Educators"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn edit_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let educator_id = auth_user.user_id()?;
    let course = CourseService::update_course(&state.db, id, educator_id, dto).await?;
    Ok(Json(course))
}

/// Delete an owned course
#[utoipa::path(
    delete,
    path = "/api/educators/delete-course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Educators"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let educator_id = auth_user.user_id()?;
    CourseService::delete_course(&state.db, id, educator_id).await?;
    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}

/// Get one owned course with its enrolled students
#[utoipa::path(
    get,
    path = "/api/educators/course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseWithStudents),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Educators"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseWithStudents>, AppError> {
    let educator_id = auth_user.user_id()?;
    let course = CourseService::get_owned(&state.db, id, educator_id).await?;
    Ok(Json(course))
}
