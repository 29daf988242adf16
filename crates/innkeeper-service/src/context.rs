//! Request context carrying the authenticated staff user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use innkeeper_core::error::AppError;
use innkeeper_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the JWT by the API layer and passed into service methods
/// so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// Login email (convenience field from JWT claims).
    pub email: String,
    /// Display name (convenience field from JWT claims).
    pub name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, email: String, name: String) -> Self {
        Self {
            user_id,
            role,
            email,
            name,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fail with an authorization error unless the user holds at least the
    /// given role.
    pub fn require_at_least(&self, role: UserRole) -> Result<(), AppError> {
        if self.role.has_at_least(&role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Requires {role} privileges, current role is {}",
                self.role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_at_least() {
        let ctx = RequestContext::new(
            Uuid::new_v4(),
            UserRole::Receptionist,
            "desk@example.com".to_string(),
            "Front Desk".to_string(),
        );
        assert!(ctx.require_at_least(UserRole::Receptionist).is_ok());
        assert!(ctx.require_at_least(UserRole::Housekeeping).is_ok());
        assert!(ctx.require_at_least(UserRole::Manager).is_err());
    }
}
