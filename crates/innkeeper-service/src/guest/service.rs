//! Guest directory service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use innkeeper_core::error::AppError;
use innkeeper_core::result::AppResult;
use innkeeper_core::types::pagination::{PageRequest, PageResponse};
use innkeeper_database::repositories::guest::GuestRepository;
use innkeeper_entity::guest::{CreateGuest, Guest, UpdateGuest};
use innkeeper_entity::user::UserRole;

use crate::context::RequestContext;

/// Manages the guest directory used by the front desk.
#[derive(Debug, Clone)]
pub struct GuestService {
    guests: Arc<GuestRepository>,
}

impl GuestService {
    /// Creates a new guest service.
    pub fn new(guests: Arc<GuestRepository>) -> Self {
        Self { guests }
    }

    /// Get a guest by id.
    pub async fn get_guest(&self, id: Uuid) -> AppResult<Guest> {
        self.guests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {id} not found")))
    }

    /// List guests, optionally filtered by a name/email search term.
    pub async fn list_guests(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Guest>> {
        self.guests.find_all(search, page).await
    }

    /// Create a guest record. Email must be unique in the directory.
    pub async fn create_guest(&self, ctx: &RequestContext, data: CreateGuest) -> AppResult<Guest> {
        ctx.require_at_least(UserRole::Receptionist)?;
        validate_guest(&data.first_name, &data.last_name, &data.email)?;

        let guest = self.guests.create(&data).await?;
        info!(guest_id = %guest.id, by = %ctx.email, "Guest record created");
        Ok(guest)
    }

    /// Update a guest record.
    pub async fn update_guest(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateGuest,
    ) -> AppResult<Guest> {
        ctx.require_at_least(UserRole::Receptionist)?;

        if let Some(email) = &data.email {
            if !email.contains('@') {
                return Err(AppError::validation(format!("Invalid email address: '{email}'")));
            }
        }
        if data.first_name.as_deref().is_some_and(|n| n.trim().is_empty())
            || data.last_name.as_deref().is_some_and(|n| n.trim().is_empty())
        {
            return Err(AppError::validation("Guest name cannot be blank"));
        }

        let guest = self.guests.update(id, &data).await?;
        info!(guest_id = %id, by = %ctx.email, "Guest record updated");
        Ok(guest)
    }

    /// Delete a guest record. Past reservations keep their own copy of the
    /// contact data, so deletion never touches reservation history.
    pub async fn delete_guest(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_at_least(UserRole::Manager)?;
        self.guests.delete(id).await?;
        info!(guest_id = %id, by = %ctx.email, "Guest record deleted");
        Ok(())
    }
}

fn validate_guest(first_name: &str, last_name: &str, email: &str) -> AppResult<()> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(AppError::validation("Guest first and last name are required"));
    }
    if !email.contains('@') {
        return Err(AppError::validation(format!("Invalid email address: '{email}'")));
    }
    Ok(())
}
