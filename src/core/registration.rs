//! Registration rule engine
//!
//! Admission is decided from the event row and the current registration count
//! only. The storage layer runs the check and the insert in one transaction and
//! maps a unique-index violation on `(event_id, email)` to
//! [`RegistrationError::DuplicateRegistration`].

use crate::core::models::{Event, NewRegistration};
use crate::utils::error::ClubError;
use crate::utils::validation::FieldValidator;
use thiserror::Error;

/// Reasons a registration attempt is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Event not found")]
    EventNotFound,

    #[error("Event is full")]
    EventFull,

    #[error("Event restricts registrations but no allowed domain is configured")]
    DomainMisconfigured,

    #[error("Registrations are restricted to @{domain} email addresses")]
    DomainNotAllowed { domain: String },

    #[error("You have already registered for this event")]
    DuplicateRegistration,
}

impl From<RegistrationError> for ClubError {
    fn from(err: RegistrationError) -> Self {
        let message = err.to_string();
        match err {
            RegistrationError::EventNotFound => ClubError::NotFound(message),
            RegistrationError::DuplicateRegistration => ClubError::Conflict(message),
            RegistrationError::EventFull
            | RegistrationError::DomainMisconfigured
            | RegistrationError::DomainNotAllowed { .. } => ClubError::Validation(message),
        }
    }
}

/// Validate and normalise the registrant's submitted fields
pub fn prepare(
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> crate::utils::error::Result<NewRegistration> {
    let name = FieldValidator::required("name", name)?;
    let email = FieldValidator::required("email", email)?;
    let email = FieldValidator::normalize_email(&email)?;

    Ok(NewRegistration {
        name,
        email,
        phone: FieldValidator::optional(phone),
    })
}

/// Capacity and domain checks, in that order
///
/// `existing` is the number of registrations already stored for `event`;
/// `email` must already be normalised.
pub fn check_admission(event: &Event, existing: u64, email: &str) -> Result<(), RegistrationError> {
    if let Some(capacity) = event.capacity {
        if existing >= u64::try_from(capacity).unwrap_or(0) {
            return Err(RegistrationError::EventFull);
        }
    }

    if event.restrict_email_domain {
        let allowed = FieldValidator::normalize_domain(event.allowed_email_domain.as_deref())
            .ok_or(RegistrationError::DomainMisconfigured)?;

        if FieldValidator::email_domain(email) != Some(allowed.as_str()) {
            return Err(RegistrationError::DomainNotAllowed { domain: allowed });
        }
    }

    Ok(())
}
