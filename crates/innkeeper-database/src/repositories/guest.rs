//! Guest repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use innkeeper_core::error::{AppError, ErrorKind};
use innkeeper_core::result::AppResult;
use innkeeper_core::types::pagination::{PageRequest, PageResponse};
use innkeeper_entity::guest::{CreateGuest, Guest, UpdateGuest};

/// Repository for the guest directory.
#[derive(Debug, Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Create a new guest repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a guest by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find guest", e))
    }

    /// Find a guest by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find guest by email", e)
            })
    }

    /// List guests, optionally matching a name/email search term.
    pub async fn find_all(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Guest>> {
        let pattern = search.map(|s| format!("%{s}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM guests \
             WHERE $1::text IS NULL \
                OR first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count guests", e))?;

        let guests = sqlx::query_as::<_, Guest>(
            "SELECT * FROM guests \
             WHERE $1::text IS NULL \
                OR first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1 \
             ORDER BY last_name ASC, first_name ASC LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list guests", e))?;

        Ok(PageResponse::new(
            guests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a guest record.
    pub async fn create(&self, data: &CreateGuest) -> AppResult<Guest> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (first_name, last_name, email, phone, notes, preferences) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.notes)
        .bind(&data.preferences)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("guests_email_key") => {
                AppError::conflict(format!("A guest with email '{}' already exists", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create guest", e),
        })
    }

    /// Update a guest record.
    pub async fn update(&self, id: Uuid, data: &UpdateGuest) -> AppResult<Guest> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET first_name = COALESCE($2, first_name), \
                               last_name = COALESCE($3, last_name), \
                               email = COALESCE($4, email), \
                               phone = COALESCE($5, phone), \
                               notes = COALESCE($6, notes), \
                               preferences = COALESCE($7, preferences), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.notes)
        .bind(&data.preferences)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("guests_email_key") => {
                AppError::conflict("Email is already in use by another guest")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update guest", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Guest {id} not found")))
    }

    /// Delete a guest record.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete guest", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Guest {id} not found")));
        }
        Ok(())
    }

    /// Total number of guest records.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM guests")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count guests", e))
    }
}
