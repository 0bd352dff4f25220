use super::UserRole;

/// New account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}
