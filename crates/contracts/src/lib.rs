//! `orchestration-contracts` — the shared message vocabulary.
//!
//! Modules agree on wire formats through these types: module ids, command and
//! event names, actor references, and the two envelope shapes. Nothing here
//! delivers, stores or retries messages.
//!
//! A command envelope can only carry a [`CommandName`] and an event envelope
//! only an [`EventName`]; the name is derived from the typed payload.

#[macro_use]
mod macros;

pub mod actor;
pub mod causality;
pub mod command;
pub mod envelope;
pub mod event;
pub mod module;
pub mod names;
pub mod payload;
pub mod tenant;
pub mod version;
pub mod wire;

pub use actor::{ActorRef, ActorType, Channel};
pub use command::CommandEnvelope;
pub use envelope::{Envelope, TraceContext};
pub use event::EventEnvelope;
pub use module::ModuleId;
pub use names::{CommandName, EventName, EventStatus, MessageKind, MessageName};
pub use payload::{CommandPayload, EventPayload, OpenPayload};
pub use tenant::TenantScoped;
pub use version::SchemaVersion;

pub use orchestration_core::{
    ActorId, CausationId, CommandId, ContractError, ContractResult, CorrelationId, EventId,
    TenantId, TraceId,
};
