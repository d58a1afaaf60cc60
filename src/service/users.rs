//! Registration, login and per-user views.

use super::{CrudService, RequestValidator};
use crate::error::AppError;
use crate::models::{
    LoginRequest, LoginResponse, NewUser, Purchase, PurchaseForCar, PurchaseSummary, Review, ReviewSummary, User,
    UserActivity, UserDetails, UserIdentity, STATUS_PAID,
};
use crate::password::{hash_password, verify_password};
use crate::sql::insert;
use sqlx::PgPool;

const EMAIL_TAKEN: &str = "Email already registered";
const USERNAME_TAKEN: &str = "Username already taken";

/// Map a unique violation on `users.email` / `users.username` to the registration 400.
fn duplicate_as_bad_request(err: AppError) -> AppError {
    if let AppError::Db(sqlx::Error::Database(db)) = &err {
        if db.is_unique_violation() {
            match db.constraint() {
                Some("users_email_key") => return AppError::BadRequest(EMAIL_TAKEN.into()),
                Some("users_username_key") => return AppError::BadRequest(USERNAME_TAKEN.into()),
                _ => {}
            }
        }
    }
    err
}

pub struct UserService;

impl UserService {
    /// Register a user. Duplicate email or username is a 400 and nothing is written.
    pub async fn register(pool: &PgPool, payload: NewUser) -> Result<User, AppError> {
        RequestValidator::email("email", &payload.email)?;
        RequestValidator::not_blank("username", &payload.username)?;
        RequestValidator::not_blank("password", &payload.password)?;

        let email_taken: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(&payload.email)
            .fetch_one(pool)
            .await?;
        if email_taken {
            return Err(AppError::BadRequest(EMAIL_TAKEN.into()));
        }
        let username_taken: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(&payload.username)
            .fetch_one(pool)
            .await?;
        if username_taken {
            return Err(AppError::BadRequest(USERNAME_TAKEN.into()));
        }

        // A concurrent registration can still win the race to the unique index.
        let user = Self::insert_hashed(pool, payload).await.map_err(duplicate_as_bad_request)?;
        tracing::info!(user_id = user.user_id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Insert without the duplicate pre-checks; the unique constraints still apply (409).
    pub async fn insert_hashed(pool: &PgPool, payload: NewUser) -> Result<User, AppError> {
        let hash = hash_password(&payload.password).await?;
        let mut q = insert("users", payload.into_changeset_with_hash(hash));
        let user = q.build_query_as::<User>().fetch_one(pool).await?;
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password give the same 401.
    pub async fn login(pool: &PgPool, payload: LoginRequest) -> Result<LoginResponse, AppError> {
        let row: Option<(i32, String, String)> =
            sqlx::query_as("SELECT user_id, username, password FROM users WHERE email = $1")
                .bind(&payload.email)
                .fetch_optional(pool)
                .await?;
        let invalid = || AppError::Unauthorized("Invalid email or password".into());
        let (user_id, username, stored) = row.ok_or_else(invalid)?;
        if !verify_password(&payload.password, &stored).await? {
            tracing::info!(user_id, "login rejected");
            return Err(invalid());
        }
        tracing::info!(user_id, "login");
        Ok(LoginResponse {
            message: "Login successful".into(),
            user_id,
            username,
        })
    }

    pub async fn activity(pool: &PgPool, user_id: i32) -> Result<UserActivity, AppError> {
        let user: User = CrudService::get(pool, user_id).await?;
        let reviews = sqlx::query_as::<_, ReviewSummary>(
            "SELECT review_id, car_id, rating, review_text, created_at FROM reviews \
             WHERE user_id = $1 ORDER BY created_at DESC, review_id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        let purchases = sqlx::query_as::<_, PurchaseSummary>(
            "SELECT purchase_id, amount, status, invoice_number FROM purchase \
             WHERE user_id = $1 ORDER BY purchase_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(UserActivity {
            user,
            reviews,
            purchases,
        })
    }

    pub async fn details(pool: &PgPool, user_id: i32) -> Result<UserDetails, AppError> {
        let user: User = CrudService::get(pool, user_id).await?;
        let purchases = sqlx::query_as::<_, Purchase>("SELECT * FROM purchase WHERE user_id = $1 ORDER BY purchase_id")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE user_id = $1 ORDER BY review_id")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(UserDetails {
            user,
            purchases,
            reviews,
        })
    }

    /// A paid purchase of this user whose orders contain the car, if any.
    pub async fn purchase_for_car(pool: &PgPool, user_id: i32, car_id: i32) -> Result<PurchaseForCar, AppError> {
        let purchase_id: Option<i32> = sqlx::query_scalar(
            "SELECT p.purchase_id FROM purchase p \
             JOIN orders o ON o.purchase_id = p.purchase_id \
             JOIN order_item oi ON oi.order_id = o.order_id \
             WHERE p.user_id = $1 AND oi.car_id = $2 AND p.status = $3 \
             ORDER BY p.purchase_id LIMIT 1",
        )
        .bind(user_id)
        .bind(car_id)
        .bind(STATUS_PAID)
        .fetch_optional(pool)
        .await?;
        Ok(PurchaseForCar { purchase_id })
    }

    pub async fn delete_by_email(pool: &PgPool, email: &str) -> Result<UserIdentity, AppError> {
        let row = sqlx::query_as::<_, UserIdentity>(
            "DELETE FROM users WHERE email = $1 RETURNING user_id, username, email",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
        tracing::info!(user_id = row.user_id, "user deleted by email");
        Ok(row)
    }
}
