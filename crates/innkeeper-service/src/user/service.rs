//! Staff user and authentication service.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use innkeeper_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use innkeeper_auth::password::PasswordHasher;
use innkeeper_core::config::AuthConfig;
use innkeeper_core::error::AppError;
use innkeeper_core::result::AppResult;
use innkeeper_core::types::pagination::{PageRequest, PageResponse};
use innkeeper_database::repositories::user::UserRepository;
use innkeeper_entity::user::{CreateUser, User, UserRole, UserStatus};

use crate::context::RequestContext;

/// Manages staff accounts and issues JWTs for them.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    min_password_length: usize,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<UserRepository>, auth: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(auth),
            decoder: JwtDecoder::new(auth),
            min_password_length: auth.min_password_length,
        }
    }

    /// Authenticate with email and password, returning the user and a fresh
    /// token pair.
    ///
    /// Failures are deliberately indistinguishable: a wrong password and an
    /// unknown email both produce the same authentication error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!(email, "Login attempt for unknown email");
                return Err(invalid_credentials());
            }
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }
        if !user.can_login() {
            return Err(AppError::authentication("Account is deactivated"));
        }

        self.users.record_login(user.id).await?;
        let tokens = self.encoder.generate_token_pair(&user)?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok((user, tokens))
    }

    /// Exchange a valid refresh token for a fresh token pair.
    ///
    /// The user's current role and status are re-read so a demotion or
    /// deactivation takes effect at the next refresh.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;
        if !user.can_login() {
            return Err(AppError::authentication("Account is deactivated"));
        }

        let tokens = self.encoder.generate_token_pair(&user)?;
        Ok((user, tokens))
    }

    /// The account behind the current request.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }

    /// Create a staff account. Admin only.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<User> {
        ctx.require_at_least(UserRole::Admin)?;

        if name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if !email.contains('@') {
            return Err(AppError::validation(format!("Invalid email address: '{email}'")));
        }
        if password.len() < self.min_password_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, role = %role, by = %ctx.email, "Staff user created");
        Ok(user)
    }

    /// List staff accounts. Admin only.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        ctx.require_at_least(UserRole::Admin)?;
        self.users.find_all(page).await
    }

    /// Change a user's role. Admin only; admins cannot change their own
    /// role, so a system always keeps at least the acting admin.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: UserRole,
    ) -> AppResult<User> {
        ctx.require_at_least(UserRole::Admin)?;
        if user_id == ctx.user_id {
            return Err(AppError::validation("You cannot change your own role"));
        }

        let user = self.users.update_role(user_id, role).await?;
        info!(user_id = %user_id, role = %role, by = %ctx.email, "Role changed");
        Ok(user)
    }

    /// Activate or deactivate an account. Admin only; self-deactivation is
    /// refused.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        status: UserStatus,
    ) -> AppResult<User> {
        ctx.require_at_least(UserRole::Admin)?;
        if user_id == ctx.user_id && status == UserStatus::Inactive {
            return Err(AppError::validation("You cannot deactivate your own account"));
        }

        let user = self.users.update_status(user_id, status).await?;
        info!(user_id = %user_id, status = %status, by = %ctx.email, "Account status changed");
        Ok(user)
    }
}

fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid email or password")
}
