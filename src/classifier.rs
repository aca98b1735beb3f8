use crate::error::{ConvertError, Result};
use crate::models::SourceRow;

/// Payee used for interest rows when none is configured.
pub const DEFAULT_INSTITUTION: &str = "Bank Zero";

pub const TYPE_COLUMN: &str = "Type";
pub const DESCRIPTION_1_COLUMN: &str = "Description 1";
pub const DESCRIPTION_2_COLUMN: &str = "Description 2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    TransferOut,
    TransferIn,
    InterestReceived,
}

const ALL_KINDS: &[TransactionKind] = &[
    TransactionKind::TransferOut,
    TransactionKind::TransferIn,
    TransactionKind::InterestReceived,
];

impl TransactionKind {
    /// The statement's `Type` value for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TransferOut => "Transfer out",
            Self::TransferIn => "Transfer in",
            Self::InterestReceived => "Interest received",
        }
    }

    /// Exact, case-sensitive match. Unknown labels are an error, never skipped:
    /// dropping a row would leave the ledger incomplete.
    pub fn from_label(label: &str) -> Result<Self> {
        ALL_KINDS
            .iter()
            .find(|k| k.label() == label)
            .copied()
            .ok_or_else(|| ConvertError::InvalidState(label.to_string()))
    }
}

/// Payee, description and reference derived for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub payee: String,
    pub description: String,
    pub reference: String,
}

pub fn classify(row: &SourceRow, institution: &str) -> Result<Narrative> {
    let kind = TransactionKind::from_label(&row.text(TYPE_COLUMN))?;
    let counterparty = row.text(DESCRIPTION_1_COLUMN);
    let reference = row.text(DESCRIPTION_2_COLUMN);

    let narrative = match kind {
        TransactionKind::TransferOut => Narrative {
            description: format!("Bank Transfer to {counterparty}"),
            payee: counterparty,
            reference,
        },
        TransactionKind::TransferIn => Narrative {
            description: format!("Bank Transfer from {counterparty}"),
            payee: counterparty,
            reference,
        },
        TransactionKind::InterestReceived => Narrative {
            payee: institution.to_string(),
            description: counterparty,
            reference,
        },
    };
    Ok(narrative)
}
