//! Field-level validation for every form that submits to the backend.
//!
//! Forms show these errors inline next to the offending field. Stores and the
//! session manager run the same checks before issuing a request, so invalid
//! input never reaches the network.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{
    CustomerRequest, LoginRequest, RegisterRequest, TaskCreateRequest, TaskStatus,
    TaskUpdateRequest,
};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_LEN: usize = 10;
pub const TITLE_LEN: (usize, usize) = (3, 100);
pub const DESCRIPTION_LEN: (usize, usize) = (10, 500);

/// Validation errors that can occur on a single field.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ValidationError {
    /// Field is required but empty
    #[error("This field is required")]
    Required,
    /// Text is shorter than the allowed minimum
    #[error("Must be at least {0} characters")]
    TooShort(usize),
    /// Text is longer than the allowed maximum
    #[error("Must be at most {0} characters")]
    TooLong(usize),
    /// Email address is malformed
    #[error("Enter a valid email address")]
    InvalidEmail,
    /// Phone number contains characters other than digits and `-+()`
    #[error("Invalid phone number format")]
    InvalidPhone,
    /// Due date lies in the past
    #[error("Due date cannot be in the past")]
    PastDate,
    /// Status is not selectable from a form
    #[error("Invalid status")]
    InvalidStatus,
}

/// Errors keyed by the wire name of the field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one field check. The first error per field wins.
    pub fn check(&mut self, field: &'static str, outcome: Result<(), ValidationError>) {
        if let Err(error) = outcome {
            self.0.entry(field).or_insert(error);
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// `Ok(())` when no field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Required text whose trimmed length lies within `min..=max`.
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    validate_required(value)?;
    let length = value.trim().chars().count();
    if length < min {
        return Err(ValidationError::TooShort(min));
    }
    if length > max {
        return Err(ValidationError::TooLong(max));
    }
    Ok(())
}

/// Validates an email address.
///
/// # Validation rules
/// - Email must not be empty
/// - Exactly one `@` with a non-empty local part
/// - The domain contains a dot that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    validate_required(trimmed)?;

    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let domain_ok = !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// Digits and `-+()` only, at least ten characters.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let trimmed = phone.trim();
    validate_required(trimmed)?;
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '(' | ')'))
    {
        return Err(ValidationError::InvalidPhone);
    }
    if trimmed.chars().count() < MIN_PHONE_LEN {
        return Err(ValidationError::TooShort(MIN_PHONE_LEN));
    }
    Ok(())
}

pub fn validate_reference(id: i64) -> Result<(), ValidationError> {
    if id > 0 {
        Ok(())
    } else {
        Err(ValidationError::Required)
    }
}

/// Forms may only pick statuses from the status cycle.
pub fn validate_status(status: TaskStatus) -> Result<(), ValidationError> {
    match status {
        TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Completed => Ok(()),
        TaskStatus::Cancelled => Err(ValidationError::InvalidStatus),
    }
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("email", validate_email(&request.email));
    errors.check("password", validate_password(&request.password));
    errors.into_result()
}

pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("email", validate_email(&request.email));
    errors.check("password", validate_password(&request.password));
    errors.check(
        "fullName",
        validate_length(&request.display_name, MIN_NAME_LEN, usize::MAX),
    );
    errors.into_result()
}

pub fn validate_customer(request: &CustomerRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(
        "name",
        validate_length(&request.name, MIN_NAME_LEN, usize::MAX),
    );
    errors.check("email", validate_email(&request.email));
    errors.check("phone", validate_phone(&request.phone));
    errors.into_result()
}

/// `now` is injected so the past-date rule is deterministic under test.
pub fn validate_task_create(
    request: &TaskCreateRequest,
    now: NaiveDateTime,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(
        "title",
        validate_length(&request.title, TITLE_LEN.0, TITLE_LEN.1),
    );
    errors.check(
        "description",
        validate_length(&request.description, DESCRIPTION_LEN.0, DESCRIPTION_LEN.1),
    );
    errors.check("customerId", validate_reference(request.customer_id));
    errors.check("assignedUserId", validate_reference(request.assigned_user_id));
    if request.due_date.0 < now {
        errors.check("dueDate", Err(ValidationError::PastDate));
    }
    errors.into_result()
}

/// Only the fields present in the update are checked. A due date is not
/// re-validated against the clock, since existing tasks may already be late.
pub fn validate_task_update(request: &TaskUpdateRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(title) = &request.title {
        errors.check("title", validate_length(title, TITLE_LEN.0, TITLE_LEN.1));
    }
    if let Some(description) = &request.description {
        errors.check(
            "description",
            validate_length(description, DESCRIPTION_LEN.0, DESCRIPTION_LEN.1),
        );
    }
    if let Some(customer_id) = request.customer_id {
        errors.check("customerId", validate_reference(customer_id));
    }
    if let Some(assigned_user_id) = request.assigned_user_id {
        errors.check("assignedUserId", validate_reference(assigned_user_id));
    }
    if let Some(status) = request.status {
        errors.check("status", validate_status(status));
    }
    errors.into_result()
}
