//! Invoice generation and approval rules.

use crate::error::CoreError;
use crate::status::{validate_invoice_transition, DocumentStatus, ProjectStatus};
use crate::types::{Date, DbId};

/// Maximum length of a payment term description.
pub const MAX_PAYMENT_TERM_LENGTH: usize = 255;

/// Facts checked before a batch of invoices is generated.
#[derive(Debug, Clone, Copy)]
pub struct BatchPreconditions {
    pub project: ProjectStatus,
    pub boq: Option<DocumentStatus>,
    pub quotation: Option<DocumentStatus>,
    /// ID of the contract stored for the project, if any.
    pub stored_contract_id: Option<DbId>,
    pub requested_contract_id: DbId,
    pub period_count: usize,
}

/// Check batch preconditions in order; the first failure wins.
pub fn validate_batch_preconditions(p: &BatchPreconditions) -> Result<(), CoreError> {
    if p.project == ProjectStatus::Completed {
        return Err(CoreError::InvalidState(
            "cannot create invoices for a completed project".to_string(),
        ));
    }
    if p.boq != Some(DocumentStatus::Approved) {
        return Err(CoreError::DependencyNotApproved("boq is not approved".to_string()));
    }
    if p.quotation != Some(DocumentStatus::Approved) {
        return Err(CoreError::DependencyNotApproved(
            "quotation is not approved".to_string(),
        ));
    }
    match p.stored_contract_id {
        None => {
            return Err(CoreError::Missing(
                "contract not found for project".to_string(),
            ))
        }
        Some(id) if id != p.requested_contract_id => {
            return Err(CoreError::Validation(
                "contract does not belong to project".to_string(),
            ))
        }
        Some(_) => {}
    }
    if p.period_count == 0 {
        return Err(CoreError::Missing(
            "no periods found for contract".to_string(),
        ));
    }
    Ok(())
}

/// Keep only the periods that have no invoice yet.
///
/// Fails when every period is already invoiced.
pub fn periods_to_invoice(
    periods: &[DbId],
    invoiced: &[DbId],
) -> Result<Vec<DbId>, CoreError> {
    let available: Vec<DbId> = periods
        .iter()
        .copied()
        .filter(|id| !invoiced.contains(id))
        .collect();
    if available.is_empty() {
        return Err(CoreError::InvalidState(
            "no available periods found for invoicing".to_string(),
        ));
    }
    Ok(available)
}

/// The fields an invoice must carry before it can be approved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovalFields<'a> {
    pub invoice_date: Option<Date>,
    pub payment_due_date: Option<Date>,
    pub payment_term: Option<&'a str>,
}

impl ApprovalFields<'_> {
    fn is_complete(&self) -> bool {
        self.invoice_date.is_some()
            && self.payment_due_date.is_some()
            && self
                .payment_term
                .is_some_and(|term| !term.trim().is_empty())
    }
}

/// Validate an invoice status change, including the completeness check on
/// approval.
pub fn validate_status_change(
    current: DocumentStatus,
    target: DocumentStatus,
    fields: ApprovalFields<'_>,
) -> Result<(), CoreError> {
    validate_invoice_transition(current, target)?;
    if current == DocumentStatus::Draft
        && target == DocumentStatus::Approved
        && !fields.is_complete()
    {
        return Err(CoreError::Validation("required fields are missing".to_string()));
    }
    Ok(())
}

pub fn validate_payment_term(term: &str) -> Result<(), CoreError> {
    if term.len() > MAX_PAYMENT_TERM_LENGTH {
        return Err(CoreError::Validation(format!(
            "payment_term exceeds maximum length of {MAX_PAYMENT_TERM_LENGTH} characters"
        )));
    }
    Ok(())
}

/// A due date before the invoice date is always a data-entry mistake.
pub fn validate_dates(invoice_date: Option<Date>, due_date: Option<Date>) -> Result<(), CoreError> {
    if let (Some(issued), Some(due)) = (invoice_date, due_date) {
        if due < issued {
            return Err(CoreError::Validation(
                "payment_due_date must not be before invoice_date".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn ready(contract: DbId) -> BatchPreconditions {
        BatchPreconditions {
            project: ProjectStatus::InProgress,
            boq: Some(DocumentStatus::Approved),
            quotation: Some(DocumentStatus::Approved),
            stored_contract_id: Some(contract),
            requested_contract_id: contract,
            period_count: 3,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn batch_ready_passes() {
        assert!(validate_batch_preconditions(&ready(DbId::new_v4())).is_ok());
    }

    #[test]
    fn completed_project_fails_first() {
        let mut p = ready(DbId::new_v4());
        p.project = ProjectStatus::Completed;
        p.boq = None;
        assert_matches!(
            validate_batch_preconditions(&p),
            Err(CoreError::InvalidState(msg)) if msg.contains("completed")
        );
    }

    #[test]
    fn boq_checked_before_quotation() {
        let mut p = ready(DbId::new_v4());
        p.boq = Some(DocumentStatus::Draft);
        p.quotation = None;
        assert_matches!(
            validate_batch_preconditions(&p),
            Err(CoreError::DependencyNotApproved(msg)) if msg.contains("boq")
        );
    }

    #[test]
    fn contract_must_match() {
        let mut p = ready(DbId::new_v4());
        p.requested_contract_id = DbId::new_v4();
        assert_matches!(validate_batch_preconditions(&p), Err(CoreError::Validation(_)));

        p.stored_contract_id = None;
        assert_matches!(validate_batch_preconditions(&p), Err(CoreError::Missing(_)));
    }

    #[test]
    fn periods_required() {
        let mut p = ready(DbId::new_v4());
        p.period_count = 0;
        assert_matches!(validate_batch_preconditions(&p), Err(CoreError::Missing(_)));
    }

    #[test]
    fn invoiced_periods_are_skipped() {
        let periods = [DbId::new_v4(), DbId::new_v4(), DbId::new_v4()];
        let left = periods_to_invoice(&periods, &[periods[1]]).unwrap();
        assert_eq!(left, vec![periods[0], periods[2]]);
    }

    #[test]
    fn fully_invoiced_contract_fails() {
        let periods = [DbId::new_v4()];
        let err = periods_to_invoice(&periods, &periods).unwrap_err();
        assert_eq!(err.to_string(), "no available periods found for invoicing");
    }

    #[test]
    fn approval_requires_all_fields() {
        let partial = ApprovalFields {
            invoice_date: None,
            payment_due_date: Some(date(2026, 2, 1)),
            payment_term: Some("30 days"),
        };
        let err = validate_status_change(DocumentStatus::Draft, DocumentStatus::Approved, partial)
            .unwrap_err();
        assert!(err.to_string().contains("required fields are missing"));

        let blank_term = ApprovalFields {
            invoice_date: Some(date(2026, 1, 1)),
            payment_due_date: Some(date(2026, 2, 1)),
            payment_term: Some("  "),
        };
        assert!(
            validate_status_change(DocumentStatus::Draft, DocumentStatus::Approved, blank_term)
                .is_err()
        );

        let complete = ApprovalFields {
            payment_term: Some("30 days"),
            ..blank_term
        };
        assert!(
            validate_status_change(DocumentStatus::Draft, DocumentStatus::Approved, complete)
                .is_ok()
        );
    }

    #[test]
    fn approved_to_draft_rejected_regardless_of_fields() {
        assert_matches!(
            validate_status_change(
                DocumentStatus::Approved,
                DocumentStatus::Draft,
                ApprovalFields::default()
            ),
            Err(CoreError::InvalidTransition(_))
        );
    }

    #[test]
    fn due_date_not_before_invoice_date() {
        assert!(validate_dates(Some(date(2026, 1, 10)), Some(date(2026, 1, 9))).is_err());
        assert!(validate_dates(Some(date(2026, 1, 10)), Some(date(2026, 1, 10))).is_ok());
        assert!(validate_dates(None, Some(date(2026, 1, 9))).is_ok());
    }
}
