pub mod identity;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use identity::{AuthResult, NewAccount, ProfileUpdate, UserService};
pub use services::{
    BillingItem, BillingService, BookingOutcome, BookingRequest, BookingService, PaymentService,
    RentalService, ReviewService, VehicleService,
};

use crate::domain::{DomainError, DomainResult, UserRole};

/// Authenticated caller, as seen by the services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Admins may act on anything; others only on what they own.
    pub fn ensure_can_access(&self, owner_id: i32) -> DomainResult<()> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "Not allowed to access another user's data".into(),
            ))
        }
    }

    pub fn ensure_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Admin access required".into()))
        }
    }
}
