//! Status enums and transition rules for projects and workflow documents.
//!
//! Statuses are stored as lowercase `TEXT` in the database. Each enum maps
//! to and from that text form, so the repository layer decodes rows with
//! `#[sqlx(try_from = "String")]` and binds `status.as_str()`.

use crate::error::CoreError;

macro_rules! define_text_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The text stored in the database and sent over the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_status! {
    /// Project lifecycle status.
    ProjectStatus {
        Planning = "planning",
        InProgress = "in_progress",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_text_status! {
    /// Status shared by BOQs, quotations and invoices.
    DocumentStatus {
        Draft = "draft",
        Approved = "approved",
    }
}

impl ProjectStatus {
    /// Completed and cancelled projects accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }
}

impl DocumentStatus {
    pub fn is_approved(self) -> bool {
        self == DocumentStatus::Approved
    }
}

// ---------------------------------------------------------------------------
// Project transitions
// ---------------------------------------------------------------------------

/// Status of the documents a project transition depends on.
///
/// `None` means the document has not been created yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectDependencies {
    pub boq: Option<DocumentStatus>,
    pub quotation: Option<DocumentStatus>,
}

/// Statuses that `from` may move to, ignoring dependency checks.
///
/// - `planning`    -> `in_progress`, `cancelled`
/// - `in_progress` -> `completed`, `cancelled`
/// - `completed`, `cancelled` -> nothing
pub fn project_transitions(from: ProjectStatus) -> &'static [ProjectStatus] {
    match from {
        ProjectStatus::Planning => &[ProjectStatus::InProgress, ProjectStatus::Cancelled],
        ProjectStatus::InProgress => &[ProjectStatus::Completed, ProjectStatus::Cancelled],
        ProjectStatus::Completed | ProjectStatus::Cancelled => &[],
    }
}

/// Validate a project status change against the transition table and the
/// status of the project's BOQ and quotation.
pub fn validate_project_transition(
    current: ProjectStatus,
    target: ProjectStatus,
    deps: ProjectDependencies,
) -> Result<(), CoreError> {
    if current.is_terminal() {
        return Err(CoreError::InvalidTransition(format!(
            "project is {current}; no further status changes are allowed"
        )));
    }

    if !project_transitions(current).contains(&target) {
        return Err(CoreError::InvalidTransition(format!(
            "cannot change project status from {current} to {target}"
        )));
    }

    if current == ProjectStatus::Planning && target == ProjectStatus::InProgress {
        if deps.boq != Some(DocumentStatus::Approved) {
            return Err(CoreError::DependencyNotApproved(
                "boq must be approved before the project can start".to_string(),
            ));
        }
        if deps.quotation != Some(DocumentStatus::Approved) {
            return Err(CoreError::DependencyNotApproved(
                "quotation must be approved before the project can start".to_string(),
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Document transitions
// ---------------------------------------------------------------------------

/// BOQ edits (lines, costs, selling general cost) are only legal while draft.
pub fn ensure_boq_editable(status: DocumentStatus) -> Result<(), CoreError> {
    match status {
        DocumentStatus::Draft => Ok(()),
        DocumentStatus::Approved => Err(CoreError::InvalidState(
            "boq is approved and can no longer be modified".to_string(),
        )),
    }
}

/// Approving a BOQ is the only forward move and happens exactly once.
pub fn validate_boq_approval(status: DocumentStatus) -> Result<(), CoreError> {
    match status {
        DocumentStatus::Draft => Ok(()),
        DocumentStatus::Approved => Err(CoreError::InvalidTransition(
            "boq is already approved".to_string(),
        )),
    }
}

/// A quotation can only be created or approved on top of an approved BOQ.
pub fn ensure_boq_approved(status: DocumentStatus) -> Result<(), CoreError> {
    if status.is_approved() {
        Ok(())
    } else {
        Err(CoreError::InvalidState("boq is not approved".to_string()))
    }
}

/// Quotation fields (validity, tax) are only editable while draft.
pub fn ensure_quotation_editable(status: DocumentStatus) -> Result<(), CoreError> {
    match status {
        DocumentStatus::Draft => Ok(()),
        DocumentStatus::Approved => Err(CoreError::InvalidState(
            "quotation is approved and can no longer be modified".to_string(),
        )),
    }
}

/// Invoices move forward only. Setting the current status again is a no-op.
pub fn validate_invoice_transition(
    current: DocumentStatus,
    target: DocumentStatus,
) -> Result<(), CoreError> {
    match (current, target) {
        (DocumentStatus::Approved, DocumentStatus::Draft) => Err(CoreError::InvalidTransition(
            "cannot change status from approved to draft".to_string(),
        )),
        _ => Ok(()),
    }
}
