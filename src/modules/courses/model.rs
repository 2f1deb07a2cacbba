//! Course entity, request DTOs and response shapes.
//!
//! Course payloads use camelCase on the wire (`videoUrl`, `isPublished`,
//! `studentsEnrolled`) to match the public API contract. The browse view
//! for students deliberately omits the enrollment set; only the owning
//! educator's listing carries it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::PublicUser;

/// Video links must point at YouTube: either a watch URL or a short link.
pub static YOUTUBE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com/watch\?v=|youtu\.be/)[\w-]+")
        .expect("YouTube URL regex is valid")
});

/// A course row as stored. `educator_id` is set once at creation from the
/// authenticated educator and never reassigned.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub category: String,
    pub educator_id: Uuid,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A course joined with its owning educator's public fields.
#[derive(FromRow, Debug, Clone)]
pub struct CourseEducatorRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub category: String,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub educator_id: Uuid,
    pub educator_name: String,
    pub educator_email: String,
}

impl CourseEducatorRow {
    pub fn into_response(self) -> CourseResponse {
        CourseResponse {
            id: self.id,
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            category: self.category,
            educator: PublicUser {
                id: self.educator_id,
                name: self.educator_name,
                email: self.educator_email,
            },
            is_published: self.is_published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Course payload with the owner populated, without the enrollment set.
/// This is what students see when browsing.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub category: String,
    pub educator: PublicUser,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Course payload with both the owner and the enrolled students populated.
/// Only the owning educator ever receives this shape.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithStudents {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub students_enrolled: Vec<PublicUser>,
}

/// Course detail for a student, with the derived enrollment flag.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub is_enrolled: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(regex(path = *YOUTUBE_URL_RE, message = "Please provide a valid YouTube URL"))]
    pub video_url: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

/// Partial update: omitted fields keep their prior values, and the
/// published flag only changes when an explicit boolean is supplied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "Title must not be blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: Option<String>,
    #[validate(regex(path = *YOUTUBE_URL_RE, message = "Please provide a valid YouTube URL"))]
    pub video_url: Option<String>,
    #[validate(length(min = 1, message = "Category must not be blank"))]
    pub category: Option<String>,
    pub is_published: Option<bool>,
}
