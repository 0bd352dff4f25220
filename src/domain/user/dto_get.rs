use super::UserRole;
use crate::shared::PageRequest;

#[derive(Debug, Clone, Default)]
pub struct GetUserDto {
    /// Matches username, email or full name
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub page: PageRequest,
    /// `username`, `email`, `full_name` or `created_at` (default)
    pub sort_by: Option<String>,
}
