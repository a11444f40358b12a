//! Applying confirmed commands to the engine.

use lyvo_shared::types::TransactionId;
use lyvo_shared::{AppError, AppResult};
use tracing::debug;

use super::types::{CommandAction, ExtractedCommand, Proposal, ProposalStatus, TransactionDraft};
use crate::engine::LedgerEngine;
use crate::store::{CardCharge, CreateTransactionInput};

/// The external extraction service, seen from the core.
///
/// Implementations call out to whatever NLU backend the product uses;
/// the core only depends on this contract.
pub trait CommandExtractor {
    /// Interprets one user message (optionally with an attached image)
    /// into a command.
    ///
    /// # Errors
    ///
    /// Backend failures surface as `AppError::ExternalService`.
    fn extract(&self, text: &str, image: Option<&[u8]>) -> AppResult<ExtractedCommand>;
}

/// Applies a confirmed proposal to the engine.
///
/// # Errors
///
/// Returns `AppError::StateConflict` unless the proposal is confirmed;
/// otherwise propagates whatever the mutation returns.
pub fn apply_proposal(
    engine: &mut LedgerEngine,
    proposal: &Proposal,
) -> AppResult<Option<TransactionId>> {
    if proposal.status != ProposalStatus::Confirmed {
        return Err(AppError::StateConflict(format!(
            "Proposal is {:?}, only confirmed proposals can be applied",
            proposal.status
        )));
    }
    apply_command(engine, &proposal.command)
}

/// Maps an extracted command onto engine mutations.
///
/// Transaction actions create a transaction and return its id; `Query`,
/// `Unknown` and `AddEvent` apply nothing (events live outside the
/// ledger core).
///
/// # Errors
///
/// Returns `AppError::Validation` when a transaction action carries no
/// draft or names no card, `AppError::NotFound` when the named card
/// does not exist, and propagates store validation failures.
pub fn apply_command(
    engine: &mut LedgerEngine,
    command: &ExtractedCommand,
) -> AppResult<Option<TransactionId>> {
    match command.action {
        CommandAction::AddTransaction => {
            let draft = require_draft(command)?;
            let id = engine.add_transaction(CreateTransactionInput {
                kind: draft.kind,
                value: draft.value,
                category: draft.category.clone(),
                description: draft.description.clone(),
                date: draft.date,
                card: None,
            })?;
            debug!(%id, "command applied as transaction");
            Ok(Some(id))
        }
        CommandAction::AddCreditTransaction => {
            let draft = require_draft(command)?;
            let card_name = draft.card_name.as_deref().ok_or_else(|| {
                AppError::Validation("Credit transaction names no card".to_string())
            })?;
            let card_id = engine
                .store()
                .cards()
                .find(|card| card.name.eq_ignore_ascii_case(card_name))
                .map(|card| card.id)
                .ok_or_else(|| {
                    AppError::NotFound(format!("No credit card named {card_name:?}"))
                })?;
            let id = engine.add_transaction(CreateTransactionInput {
                kind: draft.kind,
                value: draft.value,
                category: draft.category.clone(),
                description: draft.description.clone(),
                date: draft.date,
                card: Some(CardCharge {
                    card_id,
                    installments: draft.installments.unwrap_or(1),
                }),
            })?;
            debug!(%id, "command applied as credit transaction");
            Ok(Some(id))
        }
        CommandAction::AddEvent | CommandAction::Query | CommandAction::Unknown => Ok(None),
    }
}

fn require_draft(command: &ExtractedCommand) -> AppResult<&TransactionDraft> {
    command.transaction.as_ref().ok_or_else(|| {
        AppError::Validation("Transaction action carries no transaction draft".to_string())
    })
}
