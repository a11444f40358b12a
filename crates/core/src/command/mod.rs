//! Command intake: the typed contract between the engine and the chat
//! extraction service, plus the confirmation workflow.
//!
//! Extraction itself (NLU, image analysis) lives outside the core; this
//! module only defines the wire types, the extractor trait, and the
//! mapping from a confirmed command onto engine mutations.

pub mod service;
pub mod types;

pub use service::{CommandExtractor, apply_command, apply_proposal};
pub use types::{
    CommandAction, EventDraft, ExtractedCommand, Proposal, ProposalStatus, TransactionDraft,
};
