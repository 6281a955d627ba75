//! Either kind of envelope, plus the lineage shared between them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use orchestration_core::{
    CausationId, ContractError, ContractResult, CorrelationId, TenantId, TraceId,
};

use crate::command::CommandEnvelope;
use crate::event::EventEnvelope;
use crate::module::ModuleId;
use crate::names::{MessageKind, MessageName};

/// Tenant, correlation and trace ids that follow one business transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceContext {
    pub tenant_id: TenantId,
    pub correlation_id: CorrelationId,
    pub trace_id: TraceId,
}

impl TraceContext {
    /// Start a new transaction for `tenant_id` with fresh correlation and trace ids.
    pub fn new(tenant_id: impl Into<TenantId>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            correlation_id: CorrelationId::new(),
            trace_id: TraceId::new(),
        }
    }
}

/// A command or an event, discriminated by `kind` on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Command(CommandEnvelope),
    Event(EventEnvelope),
}

impl Envelope {
    pub fn kind(&self) -> MessageKind {
        match self {
            Envelope::Command(_) => MessageKind::Command,
            Envelope::Event(_) => MessageKind::Event,
        }
    }

    /// `command_id` or `event_id`.
    pub fn id(&self) -> &str {
        match self {
            Envelope::Command(c) => c.command_id().as_str(),
            Envelope::Event(e) => e.event_id().as_str(),
        }
    }

    pub fn name(&self) -> MessageName {
        match self {
            Envelope::Command(c) => c.name().into(),
            Envelope::Event(e) => e.name().into(),
        }
    }

    pub fn tenant_id(&self) -> &TenantId {
        match self {
            Envelope::Command(c) => c.tenant_id(),
            Envelope::Event(e) => e.tenant_id(),
        }
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        match self {
            Envelope::Command(c) => c.correlation_id(),
            Envelope::Event(e) => e.correlation_id(),
        }
    }

    pub fn causation_id(&self) -> Option<&CausationId> {
        match self {
            Envelope::Command(c) => c.causation_id(),
            Envelope::Event(e) => e.causation_id(),
        }
    }

    pub fn trace_id(&self) -> &TraceId {
        match self {
            Envelope::Command(c) => c.trace_id(),
            Envelope::Event(e) => e.trace_id(),
        }
    }

    pub fn source_module(&self) -> ModuleId {
        match self {
            Envelope::Command(c) => c.source_module(),
            Envelope::Event(e) => e.source_module(),
        }
    }

    pub fn target_module(&self) -> ModuleId {
        match self {
            Envelope::Command(c) => c.target_module(),
            Envelope::Event(e) => e.target_module(),
        }
    }

    pub fn as_command(&self) -> Option<&CommandEnvelope> {
        match self {
            Envelope::Command(c) => Some(c),
            Envelope::Event(_) => None,
        }
    }

    pub fn as_event(&self) -> Option<&EventEnvelope> {
        match self {
            Envelope::Event(e) => Some(e),
            Envelope::Command(_) => None,
        }
    }

    /// True when `self` was directly caused by `other`.
    pub fn is_caused_by(&self, other: &Envelope) -> bool {
        self.causation_id()
            .is_some_and(|causation| causation.refers_to(other.id()))
    }

    /// Read an envelope from a JSON value, dispatching on `kind`.
    pub fn from_value(value: JsonValue) -> ContractResult<Self> {
        match kind_field(&value)?.parse::<MessageKind>()? {
            MessageKind::Command => CommandEnvelope::from_value(value).map(Envelope::Command),
            MessageKind::Event => EventEnvelope::from_value(value).map(Envelope::Event),
        }
    }
}

fn kind_field(value: &JsonValue) -> ContractResult<&str> {
    value
        .get("kind")
        .ok_or(ContractError::MissingField("kind"))?
        .as_str()
        .ok_or_else(|| ContractError::malformed("kind must be a string"))
}

/// Check the raw `kind` before the rest of the record is read.
pub(crate) fn expect_kind(value: &JsonValue, expected: MessageKind) -> ContractResult<()> {
    let found = kind_field(value)?;
    if found != expected.as_str() {
        return Err(ContractError::kind_mismatch(expected.as_str(), found));
    }
    Ok(())
}

impl From<CommandEnvelope> for Envelope {
    fn from(value: CommandEnvelope) -> Self {
        Envelope::Command(value)
    }
}

impl From<EventEnvelope> for Envelope {
    fn from(value: EventEnvelope) -> Self {
        Envelope::Event(value)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Command(c) => c.serialize(serializer),
            Envelope::Event(e) => e.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Envelope::from_value(value).map_err(serde::de::Error::custom)
    }
}
