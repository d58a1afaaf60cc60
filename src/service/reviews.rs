use super::{CrudService, RequestValidator};
use crate::error::AppError;
use crate::models::{NewReview, Page, Review, ReviewUpdate, ReviewWithAuthor};
use sqlx::PgPool;

pub struct ReviewService;

impl ReviewService {
    pub async fn create(pool: &PgPool, payload: NewReview) -> Result<Review, AppError> {
        RequestValidator::rating(payload.rating)?;
        RequestValidator::non_negative("helpful_count", payload.helpful_count)?;
        let review: Review = CrudService::create(pool, payload).await?;
        tracing::info!(review_id = review.review_id, car_id = review.car_id, "review created");
        Ok(review)
    }

    pub async fn update(pool: &PgPool, review_id: i32, payload: ReviewUpdate) -> Result<Review, AppError> {
        if let Some(rating) = payload.rating {
            RequestValidator::rating(rating)?;
        }
        if let Some(count) = payload.helpful_count {
            RequestValidator::non_negative("helpful_count", count)?;
        }
        CrudService::update(pool, review_id, payload).await
    }

    /// Visible reviews of a car, newest first, with the author's username.
    pub async fn visible_for_car(pool: &PgPool, car_id: i32, page: Page) -> Result<Vec<ReviewWithAuthor>, AppError> {
        let rows = sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT r.*, u.username FROM reviews r \
             LEFT JOIN users u ON u.user_id = r.user_id \
             WHERE r.car_id = $1 AND r.is_visible \
             ORDER BY r.created_at DESC, r.review_id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(car_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
