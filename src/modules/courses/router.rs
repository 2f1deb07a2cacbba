use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{add_course, delete_course, edit_course, get_course, get_educator_courses};

pub fn init_educators_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(get_educator_courses))
        .route("/add-course", post(add_course))
        .route("/edit-course/{id}", put(edit_course))
        .route("/delete-course/{id}", delete(delete_course))
        .route("/course/{id}", get(get_course))
}
