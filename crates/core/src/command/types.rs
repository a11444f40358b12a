//! Command intake wire types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::TransactionKind;

/// What the extraction service decided the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandAction {
    /// Record a plain transaction.
    AddTransaction,
    /// Record a credit-card purchase.
    AddCreditTransaction,
    /// Create a calendar event (outside the ledger core).
    AddEvent,
    /// A question about the ledger; nothing to apply.
    Query,
    /// Could not be interpreted.
    Unknown,
}

/// A transaction as extracted from free text, before confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount.
    pub value: Decimal,
    /// Category label.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Purchase / receipt date.
    pub date: NaiveDate,
    /// Card name mentioned by the user, for credit purchases.
    #[serde(default)]
    pub card_name: Option<String>,
    /// Installment count mentioned by the user.
    #[serde(default)]
    pub installments: Option<u32>,
}

/// A calendar event as extracted from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Event title.
    pub title: String,
    /// Event date.
    pub date: NaiveDate,
}

/// The full extraction result for one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCommand {
    /// The interpreted action.
    pub action: CommandAction,
    /// Present for transaction actions.
    #[serde(default)]
    pub transaction: Option<TransactionDraft>,
    /// Present for `AddEvent`.
    #[serde(default)]
    pub event: Option<EventDraft>,
    /// The reply shown to the user.
    pub response_message: String,
}

/// Lifecycle of an extracted command awaiting user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    /// Waiting for the user.
    Pending,
    /// Approved; may be applied.
    Confirmed,
    /// Rejected; never applied.
    Cancelled,
}

/// An extracted command together with its confirmation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// The extracted command.
    pub command: ExtractedCommand,
    /// Confirmation state.
    pub status: ProposalStatus,
}

impl Proposal {
    /// Wraps a fresh extraction, pending confirmation.
    #[must_use]
    pub fn new(command: ExtractedCommand) -> Self {
        Self {
            command,
            status: ProposalStatus::Pending,
        }
    }

    /// Marks the proposal confirmed.
    pub fn confirm(&mut self) {
        self.status = ProposalStatus::Confirmed;
    }

    /// Marks the proposal cancelled.
    pub fn cancel(&mut self) {
        self.status = ProposalStatus::Cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extracted_command_wire_format() {
        let json = r#"{
            "action": "ADD_CREDIT_TRANSACTION",
            "transaction": {
                "kind": "EXPENSE",
                "value": "250.00",
                "category": "Mercado",
                "description": "Compras da semana",
                "date": "2024-03-15",
                "cardName": "Visa",
                "installments": 2
            },
            "responseMessage": "Anotei a compra de R$ 250,00 no Visa em 2x."
        }"#;

        let command: ExtractedCommand = serde_json::from_str(json).unwrap();
        assert_eq!(command.action, CommandAction::AddCreditTransaction);
        let draft = command.transaction.unwrap();
        assert_eq!(draft.value, dec!(250.00));
        assert_eq!(draft.card_name.as_deref(), Some("Visa"));
        assert_eq!(draft.installments, Some(2));
        assert!(command.event.is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"action": "QUERY", "responseMessage": "Seu saldo projetado e R$ 120,00."}"#;
        let command: ExtractedCommand = serde_json::from_str(json).unwrap();
        assert_eq!(command.action, CommandAction::Query);
        assert!(command.transaction.is_none());
    }

    #[test]
    fn test_proposal_lifecycle() {
        let command = ExtractedCommand {
            action: CommandAction::Unknown,
            transaction: None,
            event: None,
            response_message: "Nao entendi.".to_string(),
        };
        let mut proposal = Proposal::new(command);
        assert_eq!(proposal.status, ProposalStatus::Pending);
        proposal.confirm();
        assert_eq!(proposal.status, ProposalStatus::Confirmed);
        proposal.cancel();
        assert_eq!(proposal.status, ProposalStatus::Cancelled);
    }
}
