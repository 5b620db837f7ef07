use crate::types::DbId;

/// Closed set of domain error kinds.
///
/// Each variant carries a human-readable message; [`CoreError::code`] gives
/// the stable machine-readable kind that the HTTP layer switches on.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by something other than a primary key came back empty.
    #[error("{0}")]
    Missing(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidTransition(String),

    /// The entity exists but its own status forbids the operation.
    #[error("{0}")]
    InvalidState(String),

    /// A linked entity (BOQ, quotation) has not reached the required status.
    #[error("{0}")]
    DependencyNotApproved(String),

    #[error("{0}")]
    MissingPriceInformation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Machine-readable error code exposed in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } | CoreError::Missing(_) => "NOT_FOUND",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::InvalidTransition(_) => "INVALID_TRANSITION",
            CoreError::InvalidState(_) => "INVALID_STATE",
            CoreError::DependencyNotApproved(_) => "DEPENDENCY_NOT_APPROVED",
            CoreError::MissingPriceInformation(_) => "MISSING_PRICE_INFORMATION",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_missing_share_a_code() {
        let a = CoreError::NotFound {
            entity: "Project",
            id: DbId::nil(),
        };
        let b = CoreError::Missing("no draft quotation found to approve".into());
        assert_eq!(a.code(), b.code());
    }

    #[test]
    fn state_messages_are_not_prefixed() {
        let err = CoreError::InvalidState("cannot change status from approved to draft".into());
        assert_eq!(err.to_string(), "cannot change status from approved to draft");
    }
}
