//! Enrollment coordination.
//!
//! This service is the only writer of the enrollment relation. The relation
//! lives in a single join table, so a student's enrolled-course list and a
//! course's enrolled-student set are two reads of the same rows and can
//! never disagree. The duplicate guard and the write are one statement:
//! `INSERT .. ON CONFLICT DO NOTHING` is atomic per the store's own
//! guarantees, so concurrent enroll attempts cannot double-credit.

use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::{CourseDetail, CourseEducatorRow, CourseResponse};
use crate::utils::errors::AppError;

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db))]
    pub async fn enroll(db: &PgPool, student_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)",
        )
        .bind(course_id)
        .fetch_one(db)
        .await
        .context("Failed to check course existence")
        .map_err(AppError::database)?;

        if !exists {
            return Err(AppError::not_found("Course not found"));
        }

        let result = sqlx::query(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(student_id)
        .bind(course_id)
        .execute(db)
        .await
        .context("Failed to enroll in course")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::bad_request("Already enrolled in this course"));
        }

        Ok(())
    }

    /// The student's enrolled courses, owner populated, newest enrollment
    /// first.
    #[instrument(skip(db))]
    pub async fn list_enrolled(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<CourseResponse>, AppError> {
        let rows = sqlx::query_as::<_, CourseEducatorRow>(
            "SELECT c.id, c.title, c.description, c.video_url, c.category,
                    c.is_published, c.created_at, c.updated_at,
                    u.id AS educator_id, u.name AS educator_name, u.email AS educator_email
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             JOIN users u ON u.id = c.educator_id
             WHERE e.user_id = $1
             ORDER BY e.enrolled_at DESC",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch enrolled courses")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(CourseEducatorRow::into_response).collect())
    }

    /// Course detail for a student, with the derived `isEnrolled` flag.
    #[instrument(skip(db))]
    pub async fn get_for_student(
        db: &PgPool,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<CourseDetail, AppError> {
        let row = sqlx::query_as::<_, CourseEducatorRow>(
            "SELECT c.id, c.title, c.description, c.video_url, c.category,
                    c.is_published, c.created_at, c.updated_at,
                    u.id AS educator_id, u.name AS educator_name, u.email AS educator_email
             FROM courses c
             JOIN users u ON u.id = c.educator_id
             WHERE c.id = $1",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch course")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

        let is_enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .context("Failed to check enrollment")
        .map_err(AppError::database)?;

        Ok(CourseDetail {
            course: row.into_response(),
            is_enrolled,
        })
    }
}
