//! Reservation repository implementation.
//!
//! The write path is transactional: the conflict check and the insert (or
//! update) run inside one transaction holding a row lock on the booked
//! room, so two concurrent bookings for overlapping ranges on the same room
//! cannot both succeed. The `reservations_no_overlap` exclusion constraint
//! is the storage-level backstop; a violation surfaces as a conflict error.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use innkeeper_core::error::{AppError, ErrorKind};
use innkeeper_core::result::AppResult;
use innkeeper_core::types::pagination::{PageRequest, PageResponse};
use innkeeper_core::types::StayRange;
use innkeeper_entity::reservation::{
    CreateReservation, Reservation, ReservationFilters, ReservationStatus,
};
use innkeeper_entity::room::RoomStatus;

/// Overlap predicate over active reservations, with an optional exclusion
/// for the reservation being edited. Half-open interval semantics.
const CONFLICT_COUNT_SQL: &str = "SELECT COUNT(*) FROM reservations \
     WHERE room_number = $1 \
       AND status IN ('reserved', 'occupied') \
       AND check_in < $3 AND check_out > $2 \
       AND ($4::uuid IS NULL OR id <> $4)";

/// Name of the exclusion constraint guarding overlapping active stays.
const NO_OVERLAP_CONSTRAINT: &str = "reservations_no_overlap";

/// Repository for reservation persistence and transactional transitions.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a reservation by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation", e)
            })
    }

    /// List reservations matching the filters, newest check-in first.
    pub async fn find_all(
        &self,
        filters: &ReservationFilters,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM reservations WHERE 1=1");
        push_filters(&mut count_query, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM reservations WHERE 1=1");
        push_filters(&mut query, filters);
        query.push(" ORDER BY check_in DESC, created_at DESC LIMIT ");
        query.push_bind(page.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(page.offset() as i64);

        let reservations = query
            .build_query_as::<Reservation>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list reservations", e)
            })?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Active (reserved or occupied) reservations for one room, ordered by
    /// check-in date.
    pub async fn find_active_for_room(&self, room_number: i32) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations \
             WHERE room_number = $1 AND status IN ('reserved', 'occupied') \
             ORDER BY check_in ASC",
        )
        .bind(room_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active reservations", e)
        })
    }

    /// Count active reservations for the room whose stay overlaps the range.
    ///
    /// Pure read; used by the availability engine outside any transaction.
    pub async fn count_conflicts(
        &self,
        room_number: i32,
        stay: &StayRange,
        exclude: Option<Uuid>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(CONFLICT_COUNT_SQL)
            .bind(room_number)
            .bind(stay.check_in)
            .bind(stay.check_out)
            .bind(exclude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count conflicts", e)
            })
    }

    /// Room numbers held by an active reservation overlapping the range.
    pub async fn occupied_room_numbers(&self, stay: &StayRange) -> AppResult<Vec<i32>> {
        sqlx::query_scalar(
            "SELECT DISTINCT room_number FROM reservations \
             WHERE status IN ('reserved', 'occupied') \
               AND check_in < $2 AND check_out > $1",
        )
        .bind(stay.check_in)
        .bind(stay.check_out)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list occupied rooms", e)
        })
    }

    /// Create a reservation with the conflict check and insert in one
    /// transaction.
    ///
    /// Takes a `FOR UPDATE` lock on the room row, so concurrent creates for
    /// the same room serialize; the second sees the first's insert when it
    /// re-runs the conflict count.
    pub async fn create_checked(&self, data: &CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        let room_status: Option<RoomStatus> =
            sqlx::query_scalar("SELECT status FROM rooms WHERE number = $1 FOR UPDATE")
                .bind(data.room_number)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock room", e))?;

        let room_status = room_status
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", data.room_number)))?;
        if matches!(room_status, RoomStatus::Maintenance | RoomStatus::OutOfService) {
            return Err(AppError::room_unavailable(format!(
                "Room {} is {} and cannot be booked",
                data.room_number, room_status
            )));
        }

        let conflicts: i64 = sqlx::query_scalar(CONFLICT_COUNT_SQL)
            .bind(data.room_number)
            .bind(data.stay.check_in)
            .bind(data.stay.check_out)
            .bind(Option::<Uuid>::None)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count conflicts", e)
            })?;
        if conflicts > 0 {
            return Err(AppError::room_unavailable(format!(
                "Room {} is not available from {}",
                data.room_number, data.stay
            )));
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations \
                 (first_name, last_name, email, phone, room_number, guests, \
                  check_in, check_out, status, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'reserved', $9) \
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.room_number)
        .bind(data.guests)
        .bind(data.stay.check_in)
        .bind(data.stay.check_out)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_overlap_constraint(e, data.room_number))?;

        tx.commit().await.map_err(commit_error)?;
        Ok(reservation)
    }

    /// Rewrite a reservation's mutable fields, optionally re-running the
    /// conflict check (excluding the reservation itself) under the room lock.
    pub async fn update_checked(
        &self,
        merged: &Reservation,
        recheck_availability: bool,
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        if recheck_availability {
            let locked: Option<i32> =
                sqlx::query_scalar("SELECT number FROM rooms WHERE number = $1 FOR UPDATE")
                    .bind(merged.room_number)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to lock room", e)
                    })?;
            locked.ok_or_else(|| {
                AppError::not_found(format!("Room {} not found", merged.room_number))
            })?;

            let conflicts: i64 = sqlx::query_scalar(CONFLICT_COUNT_SQL)
                .bind(merged.room_number)
                .bind(merged.check_in)
                .bind(merged.check_out)
                .bind(Some(merged.id))
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count conflicts", e)
                })?;
            if conflicts > 0 {
                return Err(AppError::room_unavailable(format!(
                    "Room {} is not available from {} to {}",
                    merged.room_number, merged.check_in, merged.check_out
                )));
            }
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET \
                 first_name = $2, last_name = $3, email = $4, phone = $5, \
                 room_number = $6, guests = $7, check_in = $8, check_out = $9, \
                 notes = $10, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(merged.id)
        .bind(&merged.first_name)
        .bind(&merged.last_name)
        .bind(&merged.email)
        .bind(&merged.phone)
        .bind(merged.room_number)
        .bind(merged.guests)
        .bind(merged.check_in)
        .bind(merged.check_out)
        .bind(&merged.notes)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_overlap_constraint(e, merged.room_number))?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", merged.id)))?;

        tx.commit().await.map_err(commit_error)?;
        Ok(reservation)
    }

    /// Compare-and-swap status transition, updating the room status in the
    /// same transaction when the transition demands it.
    ///
    /// Returns `None` when the reservation no longer holds `from` (a
    /// concurrent transition won); the caller decides how to report that.
    pub async fn transition(
        &self,
        id: Uuid,
        from: ReservationStatus,
        to: ReservationStatus,
        new_room_status: Option<RoomStatus>,
    ) -> AppResult<Option<Reservation>> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        let updated = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition reservation", e)
        })?;

        let Some(reservation) = updated else {
            return Ok(None);
        };

        if let Some(room_status) = new_room_status {
            sqlx::query("UPDATE rooms SET status = $2, updated_at = NOW() WHERE number = $1")
                .bind(reservation.room_number)
                .bind(room_status)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update room status", e)
                })?;
        }

        tx.commit().await.map_err(commit_error)?;
        Ok(Some(reservation))
    }

    /// Cancel a reservation, recording reason and fee, releasing the room to
    /// cleaning when it was occupied. Same compare-and-swap contract as
    /// [`Self::transition`].
    pub async fn cancel(
        &self,
        id: Uuid,
        from: ReservationStatus,
        reason: Option<&str>,
        fee_fraction: f64,
        release_room_to_cleaning: bool,
    ) -> AppResult<Option<Reservation>> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        let updated = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'cancelled', cancellation_reason = $3, \
                 cancellation_fee = $4, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(reason)
        .bind(fee_fraction)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cancel reservation", e)
        })?;

        let Some(reservation) = updated else {
            return Ok(None);
        };

        if release_room_to_cleaning {
            sqlx::query("UPDATE rooms SET status = 'cleaning', updated_at = NOW() WHERE number = $1")
                .bind(reservation.room_number)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to release room", e)
                })?;
        }

        tx.commit().await.map_err(commit_error)?;
        Ok(Some(reservation))
    }

    /// Count reservations grouped by status, restricted to check-ins on or
    /// after the cutoff.
    pub async fn status_counts_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<(ReservationStatus, i64)>> {
        sqlx::query_as::<_, (ReservationStatus, i64)>(
            "SELECT status, COUNT(*) FROM reservations \
             WHERE check_in >= $1::date GROUP BY status",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count reservation statuses", e)
        })
    }
}

/// Append the optional reservation filters as `AND` clauses.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &ReservationFilters) {
    if let Some(status) = filters.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(room_number) = filters.room_number {
        query.push(" AND room_number = ");
        query.push_bind(room_number);
    }
    if let Some(from) = filters.from {
        query.push(" AND check_in >= ");
        query.push_bind(from);
    }
    if let Some(to) = filters.to {
        query.push(" AND check_in <= ");
        query.push_bind(to);
    }
}

/// Map an exclusion-constraint violation to a conflict error; everything
/// else is a database error.
fn map_overlap_constraint(e: sqlx::Error, room_number: i32) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(NO_OVERLAP_CONSTRAINT) => {
            AppError::conflict(format!(
                "Room {room_number} was booked concurrently for an overlapping range"
            ))
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to write reservation", e),
    }
}

fn begin_error(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
}

fn commit_error(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
}
