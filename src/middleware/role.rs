//! Role-based authorization middleware.
//!
//! Route groups are gated by layering [`require_educator`] or
//! [`require_student`] via `axum::middleware::from_fn_with_state`. Both are
//! pure gates: a failed token check rejects with 401, a role mismatch with
//! 403, and the wrapped handler never runs.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Checks that the authenticated user holds one of the allowed roles before
/// letting the request through.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !allowed_roles.contains(&auth_user.role()) {
        return Err(AppError::forbidden("Access denied"));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Gate for educator-only route groups.
pub async fn require_educator(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Educator]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for student-only route groups.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
