//! Request DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use innkeeper_core::error::AppError;
use innkeeper_core::types::pagination::PageRequest;
use innkeeper_core::types::StayRange;
use innkeeper_entity::guest::{CreateGuest, UpdateGuest};
use innkeeper_entity::reservation::{
    CreateReservation, ReservationFilters, ReservationStatus, UpdateReservation,
};
use innkeeper_entity::room::{CreateRoom, RoomFilters, RoomStatus, RoomType, UpdateRoom};
use innkeeper_entity::user::{UserRole, UserStatus};

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Token refresh request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token from a previous login.
    #[validate(length(min = 1, message = "is required"))]
    pub refresh_token: String,
}

/// Staff user creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Plaintext password; hashed before storage.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Role change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role.
    pub role: UserRole,
}

/// Account status change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserStatusRequest {
    /// New status.
    pub status: UserStatus,
}

/// Room creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    /// Unique room number.
    #[validate(range(min = 1, message = "must be positive"))]
    pub number: i32,
    /// Room category.
    pub room_type: RoomType,
    /// Nightly price.
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub price: f64,
    /// Floor the room is on.
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub floor: i32,
    /// Maximum number of guests.
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub capacity: i32,
    /// Amenity labels.
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(req: CreateRoomRequest) -> Self {
        Self {
            number: req.number,
            room_type: req.room_type,
            price: req.price,
            floor: req.floor,
            capacity: req.capacity,
            amenities: req.amenities,
        }
    }
}

/// Room update request; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    /// New room category.
    pub room_type: Option<RoomType>,
    /// New nightly price.
    pub price: Option<f64>,
    /// New floor.
    pub floor: Option<i32>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New amenity labels.
    pub amenities: Option<Vec<String>>,
}

impl From<UpdateRoomRequest> for UpdateRoom {
    fn from(req: UpdateRoomRequest) -> Self {
        Self {
            room_type: req.room_type,
            price: req.price,
            floor: req.floor,
            capacity: req.capacity,
            amenities: req.amenities,
        }
    }
}

/// Manual room status change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoomStatusRequest {
    /// New status.
    pub status: RoomStatus,
}

/// Reservation creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReservationRequest {
    /// Guest first name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: String,
    /// Guest last name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub last_name: String,
    /// Guest email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Guest phone number.
    pub phone: Option<String>,
    /// Room number to book.
    pub room_number: i32,
    /// Number of guests in the party.
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub guests: i32,
    /// Check-in date (inclusive).
    pub check_in: NaiveDate,
    /// Check-out date (exclusive).
    pub check_out: NaiveDate,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl TryFrom<CreateReservationRequest> for CreateReservation {
    type Error = AppError;

    fn try_from(req: CreateReservationRequest) -> Result<Self, Self::Error> {
        let stay = StayRange::new(req.check_in, req.check_out)?;
        Ok(Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            room_number: req.room_number,
            guests: req.guests,
            stay,
            notes: req.notes,
        })
    }
}

/// Reservation update request; omitted fields stay unchanged. Dates move
/// together: either both or neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    /// New guest first name.
    pub first_name: Option<String>,
    /// New guest last name.
    pub last_name: Option<String>,
    /// New guest email.
    pub email: Option<String>,
    /// New guest phone.
    pub phone: Option<String>,
    /// Move to a different room.
    pub room_number: Option<i32>,
    /// New party size.
    pub guests: Option<i32>,
    /// New check-in date.
    pub check_in: Option<NaiveDate>,
    /// New check-out date.
    pub check_out: Option<NaiveDate>,
    /// New notes.
    pub notes: Option<String>,
}

impl TryFrom<UpdateReservationRequest> for UpdateReservation {
    type Error = AppError;

    fn try_from(req: UpdateReservationRequest) -> Result<Self, Self::Error> {
        let stay = match (req.check_in, req.check_out) {
            (Some(check_in), Some(check_out)) => Some(StayRange::new(check_in, check_out)?),
            (None, None) => None,
            _ => {
                return Err(AppError::validation(
                    "check_in and check_out must be changed together",
                ))
            }
        };
        Ok(Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            room_number: req.room_number,
            guests: req.guests,
            stay,
            notes: req.notes,
        })
    }
}

/// Cancellation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelReservationRequest {
    /// Stated reason, recorded on the reservation.
    pub reason: Option<String>,
}

/// Guest record creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGuestRequest {
    /// First name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub last_name: String,
    /// Unique email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Stay preferences.
    pub preferences: Option<String>,
}

impl From<CreateGuestRequest> for CreateGuest {
    fn from(req: CreateGuestRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            notes: req.notes,
            preferences: req.preferences,
        }
    }
}

/// Update an existing guest record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateGuestRequest {
    /// New first name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: Option<String>,
    /// New last name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub last_name: Option<String>,
    /// New email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// New preferences.
    pub preferences: Option<String>,
}

impl From<UpdateGuestRequest> for UpdateGuest {
    fn from(req: UpdateGuestRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            notes: req.notes,
            preferences: req.preferences,
        }
    }
}

/// Query parameters shared by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageQuery {
    /// Clamp into a valid [`PageRequest`].
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    25
}

/// Query parameters for room listings.
///
/// Pagination fields are inlined rather than flattened; `serde(flatten)`
/// does not round-trip numeric fields through the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomListQuery {
    /// Restrict to one room category.
    pub room_type: Option<RoomType>,
    /// Restrict to one floor.
    pub floor: Option<i32>,
    /// Minimum nightly price.
    pub min_price: Option<f64>,
    /// Maximum nightly price.
    pub max_price: Option<f64>,
    /// Minimum guest capacity.
    pub min_capacity: Option<i32>,
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl RoomListQuery {
    /// The room filters carried by this query.
    pub fn filters(&self) -> RoomFilters {
        RoomFilters {
            room_type: self.room_type,
            floor: self.floor,
            min_price: self.min_price,
            max_price: self.max_price,
            min_capacity: self.min_capacity,
        }
    }

    /// Clamp into a valid [`PageRequest`].
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Query parameters for the availability search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Check-in date (inclusive).
    pub check_in: NaiveDate,
    /// Check-out date (exclusive).
    pub check_out: NaiveDate,
    /// Restrict to one room category.
    pub room_type: Option<RoomType>,
    /// Restrict to one floor.
    pub floor: Option<i32>,
    /// Minimum nightly price.
    pub min_price: Option<f64>,
    /// Maximum nightly price.
    pub max_price: Option<f64>,
    /// Minimum guest capacity.
    pub min_capacity: Option<i32>,
}

impl AvailabilityQuery {
    /// The requested stay interval.
    pub fn stay(&self) -> Result<StayRange, AppError> {
        StayRange::new(self.check_in, self.check_out)
    }

    /// The room filters carried by this query.
    pub fn filters(&self) -> RoomFilters {
        RoomFilters {
            room_type: self.room_type,
            floor: self.floor,
            min_price: self.min_price,
            max_price: self.max_price,
            min_capacity: self.min_capacity,
        }
    }
}

/// Query parameters for reservation listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationListQuery {
    /// Restrict to one status.
    pub status: Option<ReservationStatus>,
    /// Restrict to one room.
    pub room_number: Option<i32>,
    /// Earliest check-in date.
    pub from: Option<NaiveDate>,
    /// Latest check-in date.
    pub to: Option<NaiveDate>,
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl ReservationListQuery {
    /// The reservation filters carried by this query.
    pub fn filters(&self) -> ReservationFilters {
        ReservationFilters {
            status: self.status,
            room_number: self.room_number,
            from: self.from,
            to: self.to,
        }
    }

    /// Clamp into a valid [`PageRequest`].
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Query parameters for guest listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestListQuery {
    /// Name/email search term.
    pub search: Option<String>,
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl GuestListQuery {
    /// Clamp into a valid [`PageRequest`].
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Query parameters for the occupancy report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyQuery {
    /// First night of the range (inclusive).
    pub start: NaiveDate,
    /// Exclusive end of the range.
    pub end: NaiveDate,
}

impl OccupancyQuery {
    /// The requested range as a stay interval.
    pub fn range(&self) -> Result<StayRange, AppError> {
        StayRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_guest_request_validates_present_fields() {
        let empty = UpdateGuestRequest {
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            notes: None,
            preferences: None,
        };
        assert!(empty.validate().is_ok());

        let bad_email = UpdateGuestRequest {
            email: Some("not-an-email".to_string()),
            ..empty.clone()
        };
        assert!(bad_email.validate().is_err());

        let renamed = UpdateGuestRequest {
            last_name: Some("Curie".to_string()),
            ..empty
        };
        assert!(renamed.validate().is_ok());
    }
}
