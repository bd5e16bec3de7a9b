//! Shared mapping from storage failures to classified domain errors.

use userbase_core::{DomainError, ErrorContext, User};
use uuid::Uuid;

use crate::error::{ConstraintTarget, StorageError};

pub(crate) fn map_create_error(error: StorageError, user: &User) -> DomainError {
    match error.unique_violation() {
        Some(ConstraintTarget::Identifier) => DomainError::wrap(
            error,
            ErrorContext::Conflict,
            format!("user with ID '{}' already exists", user.id),
        ),
        Some(ConstraintTarget::Email) => DomainError::wrap(
            error,
            ErrorContext::Conflict,
            format!("email '{}' is already in use", user.email),
        ),
        Some(ConstraintTarget::Unknown) => DomainError::wrap(
            error,
            ErrorContext::Conflict,
            "duplicate value violates unique constraint",
        ),
        None => {
            tracing::error!(error = %error, user_id = %user.id, "failed to create user");
            DomainError::wrap(error, ErrorContext::Internal, "unexpected error while creating new user")
        },
    }
}

pub(crate) fn map_retrieve_error(error: StorageError, id: Uuid) -> DomainError {
    if error.is_not_found() {
        return DomainError::wrap(
            error,
            ErrorContext::NotFound,
            format!("user with '{id}' ID does not exist"),
        );
    }
    tracing::error!(error = %error, user_id = %id, "failed to retrieve user");
    DomainError::wrap(
        error,
        ErrorContext::Internal,
        format!("unexpected error while searching user with '{id}' ID"),
    )
}

pub(crate) fn map_close_error(error: StorageError) -> DomainError {
    DomainError::wrap(error, ErrorContext::Internal, "failed to close storage")
}
