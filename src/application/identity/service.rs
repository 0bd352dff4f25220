//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;
use validator::ValidateEmail;

use crate::config::AdminConfig;
use crate::domain::user::{CreateUserDto, GetUserDto, UpdateUserDto};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::{is_valid_phone_number, PaginatedResult};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Registration or admin-created account
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Defaults to the email when absent
    pub username: Option<String>,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub role: UserRole,
}

/// Self-service profile changes
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate user by username/email + password and return a JWT.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let users = self.repos.users();
        let user = match users.get_user_by_username(username_or_email).await? {
            Some(user) => Some(user),
            None => users.get_user_by_email(username_or_email).await?,
        };

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(user.id, &user.username, user.role, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        users.touch_last_login(user.id).await?;
        info!(user_id = user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in_secs(),
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Public sign-up. Always creates a `USER` account.
    pub async fn register(&self, account: NewAccount) -> DomainResult<User> {
        let user = self
            .create_account(NewAccount {
                role: UserRole::User,
                ..account
            })
            .await?;
        info!(user_id = user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    async fn create_account(&self, account: NewAccount) -> DomainResult<User> {
        validate_password(&account.password)?;
        validate_email(&account.email)?;
        if let Some(ref phone) = account.phone_number {
            validate_phone(phone)?;
        }

        let username = account
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| account.email.clone());

        let users = self.repos.users();
        if users.get_user_by_username(&username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if users.get_user_by_email(&account.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let password_hash = hash_password(&account.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        users
            .create_user(CreateUserDto {
                username,
                email: account.email,
                full_name: account.full_name,
                phone_number: account.phone_number,
                password_hash,
                role: account.role,
            })
            .await
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        self.repos.users().list_users(dto).await
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update the caller's own profile. A new password needs a matching confirmation.
    pub async fn update_profile(&self, id: i32, update: ProfileUpdate) -> DomainResult<User> {
        if let Some(ref password) = update.password {
            validate_password(password)?;
            if update.confirm_password.as_deref() != Some(password.as_str()) {
                return Err(DomainError::Validation("Passwords do not match".into()));
            }
        }
        if let Some(ref email) = update.email {
            validate_email(email)?;
        }
        if let Some(ref phone) = update.phone_number {
            validate_phone(phone)?;
        }

        let dto = UpdateUserDto {
            full_name: update.full_name,
            email: update.email,
            phone_number: update.phone_number,
            ..Default::default()
        };
        let user = self
            .repos
            .users()
            .update_user(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        if let Some(password) = update.password {
            self.set_password(id, &password).await?;
        }
        Ok(user)
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        validate_password(new_password)?;

        let user = self.get_user(user_id).await?;
        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        self.set_password(user_id, new_password).await?;
        info!(user_id, "Password changed");
        Ok(())
    }

    async fn set_password(&self, user_id: i32, password: &str) -> DomainResult<()> {
        let new_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;
        self.repos
            .users()
            .update_user_password(user_id, &new_hash)
            .await
    }

    // ── Admin ───────────────────────────────────────────────────

    /// Create an account with any role.
    pub async fn create_user(&self, account: NewAccount) -> DomainResult<User> {
        let user = self.create_account(account).await?;
        info!(user_id = user.id, role = %user.role, "User created by admin");
        Ok(user)
    }

    /// Admin update of profile fields, role and activation; optionally resets the password.
    pub async fn update_user(
        &self,
        id: i32,
        dto: UpdateUserDto,
        password: Option<String>,
    ) -> DomainResult<User> {
        if let Some(ref email) = dto.email {
            validate_email(email)?;
        }
        if let Some(ref phone) = dto.phone_number {
            validate_phone(phone)?;
        }
        if let Some(ref password) = password {
            validate_password(password)?;
        }

        let user = self
            .repos
            .users()
            .update_user(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        if let Some(password) = password {
            self.set_password(id, &password).await?;
        }
        Ok(user)
    }

    pub async fn delete_user(&self, id: i32) -> DomainResult<()> {
        if !self.repos.users().delete_user(id).await? {
            return Err(DomainError::not_found("User", id));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Seed an admin account when there are no users at all.
    /// Returns the created admin, or `None` if users already exist.
    pub async fn ensure_default_admin(&self, admin: &AdminConfig) -> DomainResult<Option<User>> {
        if self.repos.users().count_users().await? > 0 {
            return Ok(None);
        }

        info!("Creating default admin user...");
        let user = self
            .create_account(NewAccount {
                username: Some(admin.username.clone()),
                email: admin.email.clone(),
                full_name: "Administrator".into(),
                phone_number: None,
                password: admin.password.clone(),
                role: UserRole::Admin,
            })
            .await?;

        info!("Default admin created: {}", user.email);
        info!("Please change the admin password immediately!");
        Ok(Some(user))
    }
}

// ── Validation helpers ──────────────────────────────────────────

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    if !email.to_string().validate_email() {
        return Err(DomainError::Validation("Invalid email address".into()));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> DomainResult<()> {
    if !is_valid_phone_number(phone) {
        return Err(DomainError::Validation("Invalid phone number".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{in_memory_repos, test_jwt_config};
    use crate::infrastructure::crypto::jwt::verify_token;

    fn service() -> UserService {
        UserService::new(in_memory_repos(), test_jwt_config())
    }

    fn account(email: &str) -> NewAccount {
        NewAccount {
            username: None,
            email: email.into(),
            full_name: "Trần Thị Bình".into(),
            phone_number: Some("+84912345678".into()),
            password: "password123".into(),
            role: UserRole::Admin,
        }
    }

    #[tokio::test]
    async fn register_defaults_username_to_email_and_role_to_user() {
        let svc = service();
        let user = svc.register(account("binh@example.com")).await.unwrap();
        assert_eq!(user.username, "binh@example.com");
        assert_eq!(user.role, UserRole::User);
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn register_rejects_short_password_and_bad_phone() {
        let svc = service();
        let short = NewAccount {
            password: "short".into(),
            ..account("a@example.com")
        };
        assert!(matches!(
            svc.register(short).await,
            Err(DomainError::Validation(_))
        ));

        let bad_phone = NewAccount {
            phone_number: Some("0123".into()),
            ..account("b@example.com")
        };
        assert!(matches!(
            svc.register(bad_phone).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let svc = service();
        svc.register(account("dup@example.com")).await.unwrap();
        let err = svc
            .register(NewAccount {
                username: Some("other".into()),
                ..account("dup@example.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let svc = service();
        let user = svc.register(account("login@example.com")).await.unwrap();

        let auth = svc.login("login@example.com", "password123").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 3600);

        let claims = verify_token(&auth.token, svc.jwt_config()).unwrap();
        assert_eq!(claims.user_id(), Some(user.id));
        assert!(!claims.is_admin());

        let reloaded = svc.get_user(user.id).await.unwrap();
        assert!(reloaded.last_login_at.is_some());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_inactive_accounts() {
        let svc = service();
        let user = svc.register(account("x@example.com")).await.unwrap();

        assert!(matches!(
            svc.login("x@example.com", "wrong-password").await,
            Err(DomainError::Unauthorized(_))
        ));

        svc.update_user(
            user.id,
            UpdateUserDto {
                is_active: Some(false),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
        assert!(matches!(
            svc.login("x@example.com", "password123").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn profile_password_needs_confirmation() {
        let svc = service();
        let user = svc.register(account("p@example.com")).await.unwrap();

        let mismatch = ProfileUpdate {
            password: Some("newpassword1".into()),
            confirm_password: Some("newpassword2".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update_profile(user.id, mismatch).await,
            Err(DomainError::Validation(_))
        ));

        let ok = ProfileUpdate {
            full_name: Some("Bình Trần".into()),
            password: Some("newpassword1".into()),
            confirm_password: Some("newpassword1".into()),
            ..Default::default()
        };
        let updated = svc.update_profile(user.id, ok).await.unwrap();
        assert_eq!(updated.full_name, "Bình Trần");
        assert!(svc.login("p@example.com", "newpassword1").await.is_ok());
    }

    #[tokio::test]
    async fn change_password_checks_current() {
        let svc = service();
        let user = svc.register(account("c@example.com")).await.unwrap();
        assert!(matches!(
            svc.change_password(user.id, "not-it-at-all", "brandnew123").await,
            Err(DomainError::Unauthorized(_))
        ));
        svc.change_password(user.id, "password123", "brandnew123")
            .await
            .unwrap();
        assert!(svc.login("c@example.com", "brandnew123").await.is_ok());
    }

    #[tokio::test]
    async fn default_admin_only_seeded_once() {
        let svc = service();
        let cfg = AdminConfig::default();
        let admin = svc.ensure_default_admin(&cfg).await.unwrap().unwrap();
        assert!(admin.is_admin());
        assert!(svc.ensure_default_admin(&cfg).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.delete_user(99).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
