//! Validation for the forms the dashboard submits: login, booking and
//! support ticket. Views only render the result; the rules live here.

use chrono::{DateTime, Utc};
use shared::{CreateBookingRequest, CreateTicketRequest, LoginRequest};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_BOOKING_MINUTES: u32 = 15;
pub const MAX_BOOKING_MINUTES: u32 = 180;
pub const BOOKING_SLOT_MINUTES: u32 = 15;
pub const MAX_BOOKING_NOTES_LENGTH: usize = 500;
pub const TICKET_SUBJECT_LENGTH: (usize, usize) = (5, 120);
pub const TICKET_DESCRIPTION_LENGTH: (usize, usize) = (20, 2000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Email is required")]
    EmptyEmail,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Choose a child")]
    MissingChild,
    #[error("Subject is required")]
    EmptySubject,
    #[error("Subject must be between {min} and {max} characters (got {actual})")]
    SubjectLength { min: usize, max: usize, actual: usize },
    #[error("Description must be between {min} and {max} characters (got {actual})")]
    DescriptionLength { min: usize, max: usize, actual: usize },
    #[error("Sessions must start in the future")]
    StartInPast,
    #[error("Duration must be between {min} and {max} minutes")]
    DurationOutOfRange { min: u32, max: u32 },
    #[error("Duration must be a multiple of {0} minutes")]
    DurationNotInSlots(u32),
    #[error("Notes must be at most {0} characters")]
    NotesTooLong(usize),
}

/// Outcome of validating one form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: Vec<FormError>,
}

impl FormValidation {
    fn from_errors(errors: Vec<FormError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Error messages ready to render under the form
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

pub fn validate_login(request: &LoginRequest) -> FormValidation {
    let mut errors = Vec::new();

    let email = request.email.trim();
    if email.is_empty() {
        errors.push(FormError::EmptyEmail);
    } else if !looks_like_email(email) {
        errors.push(FormError::InvalidEmail);
    }

    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FormError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    FormValidation::from_errors(errors)
}

pub fn validate_booking(request: &CreateBookingRequest, now: DateTime<Utc>) -> FormValidation {
    let mut errors = Vec::new();

    if request.child_id.trim().is_empty() {
        errors.push(FormError::MissingChild);
    }
    if request.subject.trim().is_empty() {
        errors.push(FormError::EmptySubject);
    }
    if request.starts_at <= now {
        errors.push(FormError::StartInPast);
    }

    if !(MIN_BOOKING_MINUTES..=MAX_BOOKING_MINUTES).contains(&request.duration_minutes) {
        errors.push(FormError::DurationOutOfRange {
            min: MIN_BOOKING_MINUTES,
            max: MAX_BOOKING_MINUTES,
        });
    } else if request.duration_minutes % BOOKING_SLOT_MINUTES != 0 {
        errors.push(FormError::DurationNotInSlots(BOOKING_SLOT_MINUTES));
    }

    if let Some(notes) = &request.notes {
        if notes.chars().count() > MAX_BOOKING_NOTES_LENGTH {
            errors.push(FormError::NotesTooLong(MAX_BOOKING_NOTES_LENGTH));
        }
    }

    FormValidation::from_errors(errors)
}

pub fn validate_ticket(request: &CreateTicketRequest) -> FormValidation {
    let mut errors = Vec::new();

    let (min, max) = TICKET_SUBJECT_LENGTH;
    let subject_len = request.subject.trim().chars().count();
    if subject_len == 0 {
        errors.push(FormError::EmptySubject);
    } else if subject_len < min || subject_len > max {
        errors.push(FormError::SubjectLength {
            min,
            max,
            actual: subject_len,
        });
    }

    let (min, max) = TICKET_DESCRIPTION_LENGTH;
    let description_len = request.description.trim().chars().count();
    if description_len < min || description_len > max {
        errors.push(FormError::DescriptionLength {
            min,
            max,
            actual: description_len,
        });
    }

    FormValidation::from_errors(errors)
}

/// local@domain.tld with no whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
                    .unwrap_or(false)
        }
        None => false,
    }
}
