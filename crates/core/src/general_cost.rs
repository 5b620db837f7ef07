//! Rules for editing general (overhead) costs attached to a BOQ.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::money::validate_non_negative;
use crate::status::{ensure_boq_editable, DocumentStatus, ProjectStatus};

/// Maximum length of a general-cost type name.
pub const MAX_TYPE_NAME_LENGTH: usize = 100;

/// Validate a new type name for the catalog.
pub fn validate_type_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("type name must not be empty".to_string()));
    }
    if trimmed.len() > MAX_TYPE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "type name exceeds maximum length of {MAX_TYPE_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Estimated costs are planning figures: only while the BOQ is still draft.
pub fn validate_estimated_update(value: Decimal, boq: DocumentStatus) -> Result<(), CoreError> {
    validate_non_negative(value, "estimated_cost")?;
    ensure_boq_editable(boq)
}

/// Actual costs are recorded during execution: BOQ and quotation approved,
/// project not yet completed.
pub fn validate_actual_update(
    value: Decimal,
    project: ProjectStatus,
    boq: DocumentStatus,
    quotation: Option<DocumentStatus>,
) -> Result<(), CoreError> {
    validate_non_negative(value, "actual_cost")?;

    if project == ProjectStatus::Completed {
        return Err(CoreError::InvalidState(
            "cannot update actual cost of a completed project".to_string(),
        ));
    }
    if !boq.is_approved() {
        return Err(CoreError::InvalidState(
            "boq must be approved before recording actual costs".to_string(),
        ));
    }
    if quotation != Some(DocumentStatus::Approved) {
        return Err(CoreError::InvalidState(
            "quotation must be approved before recording actual costs".to_string(),
        ));
    }
    Ok(())
}
