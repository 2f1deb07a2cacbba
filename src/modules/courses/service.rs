use std::collections::HashMap;

use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::PublicUser;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

use super::model::{
    Course, CourseEducatorRow, CourseResponse, CourseWithStudents, CreateCourseRequest,
    UpdateCourseRequest,
};

const COURSE_WITH_EDUCATOR: &str = "SELECT c.id, c.title, c.description, c.video_url, \
     c.category, c.is_published, c.created_at, c.updated_at, \
     u.id AS educator_id, u.name AS educator_name, u.email AS educator_email \
     FROM courses c JOIN users u ON u.id = c.educator_id";

pub struct CourseService;

impl CourseService {
    /// All published courses with the owner populated. The enrollment set is
    /// never part of this view.
    #[instrument(skip(db))]
    pub async fn list_published(db: &PgPool) -> Result<Vec<CourseResponse>, AppError> {
        let rows = sqlx::query_as::<_, CourseEducatorRow>(&format!(
            "{COURSE_WITH_EDUCATOR} WHERE c.is_published = TRUE ORDER BY c.created_at DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch published courses")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(CourseEducatorRow::into_response).collect())
    }

    /// The educator's own courses, each with its enrolled students populated.
    #[instrument(skip(db))]
    pub async fn list_for_educator(
        db: &PgPool,
        educator_id: Uuid,
    ) -> Result<Vec<CourseWithStudents>, AppError> {
        let rows = sqlx::query_as::<_, CourseEducatorRow>(&format!(
            "{COURSE_WITH_EDUCATOR} WHERE c.educator_id = $1 ORDER BY c.created_at DESC"
        ))
        .bind(educator_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch educator courses")
        .map_err(AppError::database)?;

        let course_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut students = Self::students_by_course(db, &course_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let enrolled = students.remove(&row.id).unwrap_or_default();
                CourseWithStudents {
                    course: row.into_response(),
                    students_enrolled: enrolled,
                }
            })
            .collect())
    }

    /// Fetches a course for its owner, with students populated.
    ///
    /// Existence is checked before ownership: a missing course is 404, a
    /// course owned by another educator is 403.
    #[instrument(skip(db))]
    pub async fn get_owned(
        db: &PgPool,
        course_id: Uuid,
        educator_id: Uuid,
    ) -> Result<CourseWithStudents, AppError> {
        let row = sqlx::query_as::<_, CourseEducatorRow>(&format!(
            "{COURSE_WITH_EDUCATOR} WHERE c.id = $1"
        ))
        .bind(course_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch course")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

        if row.educator_id != educator_id {
            return Err(AppError::forbidden("Access denied"));
        }

        let mut students = Self::students_by_course(db, &[course_id]).await?;

        Ok(CourseWithStudents {
            course: row.into_response(),
            students_enrolled: students.remove(&course_id).unwrap_or_default(),
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_course(
        db: &PgPool,
        educator_id: Uuid,
        dto: CreateCourseRequest,
    ) -> Result<CourseResponse, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (title, description, video_url, category, educator_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, title, description, video_url, category, educator_id,
                       is_published, created_at, updated_at",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.video_url)
        .bind(&dto.category)
        .bind(educator_id)
        .fetch_one(db)
        .await
        .context("Failed to create course")
        .map_err(AppError::database)?;

        Self::with_educator(db, course).await
    }

    /// Partial update: only supplied fields change, and the published flag
    /// is only touched when an explicit boolean was provided.
    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        course_id: Uuid,
        educator_id: Uuid,
        dto: UpdateCourseRequest,
    ) -> Result<CourseResponse, AppError> {
        Self::ensure_owned(db, course_id, educator_id).await?;

        let course = sqlx::query_as::<_, Course>(
            "UPDATE courses SET
                 title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 video_url = COALESCE($3, video_url),
                 category = COALESCE($4, category),
                 is_published = COALESCE($5, is_published),
                 updated_at = NOW()
             WHERE id = $6
             RETURNING id, title, description, video_url, category, educator_id,
                       is_published, created_at, updated_at",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.video_url)
        .bind(&dto.category)
        .bind(dto.is_published)
        .bind(course_id)
        .fetch_one(db)
        .await
        .context("Failed to update course")
        .map_err(AppError::database)?;

        Self::with_educator(db, course).await
    }

    /// Deletes an owned course. The enrollments table cascades, so no
    /// student keeps a dangling reference to the deleted course.
    #[instrument(skip(db))]
    pub async fn delete_course(
        db: &PgPool,
        course_id: Uuid,
        educator_id: Uuid,
    ) -> Result<(), AppError> {
        Self::ensure_owned(db, course_id, educator_id).await?;

        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(db)
            .await
            .context("Failed to delete course")
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Existence check strictly before ownership check, so callers can tell
    /// "never existed" (404) apart from "not yours" (403).
    async fn ensure_owned(
        db: &PgPool,
        course_id: Uuid,
        educator_id: Uuid,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, title, description, video_url, category, educator_id,
                    is_published, created_at, updated_at
             FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch course")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.educator_id != educator_id {
            return Err(AppError::forbidden("Access denied"));
        }

        Ok(course)
    }

    async fn with_educator(db: &PgPool, course: Course) -> Result<CourseResponse, AppError> {
        let educator = UserService::get_public_user(db, course.educator_id).await?;

        Ok(CourseResponse {
            id: course.id,
            title: course.title,
            description: course.description,
            video_url: course.video_url,
            category: course.category,
            educator,
            is_published: course.is_published,
            created_at: course.created_at,
            updated_at: course.updated_at,
        })
    }

    async fn students_by_course(
        db: &PgPool,
        course_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<PublicUser>>, AppError> {
        #[derive(sqlx::FromRow)]
        struct EnrolledRow {
            course_id: Uuid,
            id: Uuid,
            name: String,
            email: String,
        }

        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, EnrolledRow>(
            "SELECT e.course_id, u.id, u.name, u.email
             FROM enrollments e
             JOIN users u ON u.id = e.user_id
             WHERE e.course_id = ANY($1)
             ORDER BY e.enrolled_at",
        )
        .bind(course_ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch enrolled students")
        .map_err(AppError::database)?;

        let mut by_course: HashMap<Uuid, Vec<PublicUser>> = HashMap::new();
        for row in rows {
            by_course.entry(row.course_id).or_default().push(PublicUser {
                id: row.id,
                name: row.name,
                email: row.email,
            });
        }

        Ok(by_course)
    }
}
