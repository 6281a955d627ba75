//! `orchestration-core` — identifiers and errors shared by every contract crate.
//!
//! This crate contains **pure data** primitives (no transport, no storage).

pub mod error;
pub mod id;

pub use error::{ContractError, ContractResult};
pub use id::{ActorId, CausationId, CommandId, CorrelationId, EventId, TenantId, TraceId};
