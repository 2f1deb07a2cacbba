use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    enroll_in_course, get_available_courses, get_course_details, get_enrolled_courses,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(get_available_courses))
        .route("/enrolled", get(get_enrolled_courses))
        .route("/enroll/{id}", post(enroll_in_course))
        .route("/course/{id}", get(get_course_details))
}
