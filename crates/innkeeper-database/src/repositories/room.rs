//! Room repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};

use innkeeper_core::error::{AppError, ErrorKind};
use innkeeper_core::result::AppResult;
use innkeeper_core::types::pagination::{PageRequest, PageResponse};
use innkeeper_entity::room::{CreateRoom, Room, RoomFilters, RoomStatus, UpdateRoom};

/// Repository for room CRUD and query operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by its business-key number.
    pub async fn find_by_number(&self, number: i32) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE number = $1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find room by number", e)
            })
    }

    /// List rooms matching the given filters, with pagination.
    pub async fn find_all(
        &self,
        filters: &RoomFilters,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Room>> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM rooms WHERE 1=1");
        push_filters(&mut count_query, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rooms", e))?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM rooms WHERE 1=1");
        push_filters(&mut query, filters);
        query.push(" ORDER BY number ASC LIMIT ");
        query.push_bind(page.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(page.offset() as i64);

        let rooms = query
            .build_query_as::<Room>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Rooms whose static status allows new bookings (`available` or
    /// `cleaning`), matching the filters, ordered by type, price, number.
    pub async fn find_bookable(&self, filters: &RoomFilters) -> AppResult<Vec<Room>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT * FROM rooms WHERE status IN ('available', 'cleaning')",
        );
        push_filters(&mut query, filters);
        query.push(" ORDER BY room_type ASC, price ASC, number ASC");

        query
            .build_query_as::<Room>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list bookable rooms", e)
            })
    }

    /// Create a new room.
    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (number, room_type, price, floor, capacity, amenities, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'available') \
             RETURNING *",
        )
        .bind(data.number)
        .bind(data.room_type)
        .bind(data.price)
        .bind(data.floor)
        .bind(data.capacity)
        .bind(&data.amenities)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("rooms_number_key") => {
                AppError::conflict(format!("Room number {} already exists", data.number))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create room", e),
        })
    }

    /// Update a room's static attributes.
    pub async fn update(&self, number: i32, data: &UpdateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET room_type = COALESCE($2, room_type), \
                              price = COALESCE($3, price), \
                              floor = COALESCE($4, floor), \
                              capacity = COALESCE($5, capacity), \
                              amenities = COALESCE($6, amenities), \
                              updated_at = NOW() \
             WHERE number = $1 RETURNING *",
        )
        .bind(number)
        .bind(data.room_type)
        .bind(data.price)
        .bind(data.floor)
        .bind(data.capacity)
        .bind(&data.amenities)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update room", e))?
        .ok_or_else(|| AppError::not_found(format!("Room {number} not found")))
    }

    /// Update only a room's status.
    pub async fn update_status(&self, number: i32, status: RoomStatus) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET status = $2, updated_at = NOW() WHERE number = $1 RETURNING *",
        )
        .bind(number)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update room status", e))?
        .ok_or_else(|| AppError::not_found(format!("Room {number} not found")))
    }

    /// Delete a room by number.
    pub async fn delete(&self, number: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE number = $1")
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete room", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Room {number} not found")));
        }
        Ok(())
    }

    /// Count rooms grouped by status.
    pub async fn status_counts(&self) -> AppResult<Vec<(RoomStatus, i64)>> {
        sqlx::query_as::<_, (RoomStatus, i64)>(
            "SELECT status, COUNT(*) FROM rooms GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count room statuses", e))
    }

    /// Count rooms still in inventory (everything except out-of-service).
    pub async fn count_in_inventory(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status <> 'out_of_service'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rooms", e))
    }
}

/// Append the optional room filters as `AND` clauses.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &RoomFilters) {
    if let Some(room_type) = filters.room_type {
        query.push(" AND room_type = ");
        query.push_bind(room_type);
    }
    if let Some(floor) = filters.floor {
        query.push(" AND floor = ");
        query.push_bind(floor);
    }
    if let Some(min_price) = filters.min_price {
        query.push(" AND price >= ");
        query.push_bind(min_price);
    }
    if let Some(max_price) = filters.max_price {
        query.push(" AND price <= ");
        query.push_bind(max_price);
    }
    if let Some(min_capacity) = filters.min_capacity {
        query.push(" AND capacity >= ");
        query.push_bind(min_capacity);
    }
}
