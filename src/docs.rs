use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use crate::modules::courses::model::{
    Course, CourseDetail, CourseResponse, CourseWithStudents, CreateCourseRequest,
    UpdateCourseRequest,
};
use crate::modules::users::model::{PublicUser, User, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::courses::controller::get_educator_courses,
        crate::modules::courses::controller::add_course,
        crate::modules::courses::controller::edit_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::get_course,
        crate::modules::enrollments::controller::get_available_courses,
        crate::modules::enrollments::controller::get_enrolled_courses,
        crate::modules::enrollments::controller::enroll_in_course,
        crate::modules::enrollments::controller::get_course_details,
    ),
    components(
        schemas(
            User,
            PublicUser,
            UserRole,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            ErrorResponse,
            Course,
            CourseResponse,
            CourseWithStudents,
            CourseDetail,
            CreateCourseRequest,
            UpdateCourseRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Educators", description = "Owner-scoped course management"),
        (name = "Students", description = "Course browsing and enrollment")
    ),
    info(
        title = "LearnHub API",
        version = "0.1.0",
        description = "Course catalog backend built with Rust, Axum, and PostgreSQL: educators publish courses, students browse and enroll.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
