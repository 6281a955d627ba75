//! Event envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use orchestration_core::{
    CausationId, ContractError, ContractResult, CorrelationId, EventId, TenantId, TraceId,
};

use crate::command::CommandEnvelope;
use crate::envelope::{TraceContext, expect_kind};
use crate::module::ModuleId;
use crate::names::{EventName, EventStatus, MessageKind};
use crate::payload::EventPayload;
use crate::version::SchemaVersion;

/// Envelope for an event: a fact emitted by a module.
///
/// Events carry no actor; they are attributed to `source_module`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    schema_version: SchemaVersion,
    event_id: EventId,
    tenant_id: TenantId,
    source_module: ModuleId,
    target_module: ModuleId,
    emitted_at: DateTime<Utc>,
    correlation_id: CorrelationId,
    causation_id: Option<CausationId>,
    trace_id: TraceId,
    status: Option<EventStatus>,
    payload: EventPayload,
}

impl EventEnvelope {
    /// New event with a fresh id and `emitted_at = now`.
    ///
    /// `status` starts at the event name's conventional status.
    pub fn new(
        context: TraceContext,
        source_module: ModuleId,
        target_module: ModuleId,
        payload: EventPayload,
    ) -> Self {
        let TraceContext {
            tenant_id,
            correlation_id,
            trace_id,
        } = context;
        let status = payload.name().conventional_status();

        Self {
            schema_version: SchemaVersion::default(),
            event_id: EventId::new(),
            tenant_id,
            source_module,
            target_module,
            emitted_at: Utc::now(),
            correlation_id,
            causation_id: None,
            trace_id,
            status,
            payload,
        }
    }

    /// Event produced while handling `command`: same tenant, correlation and
    /// trace, caused by the command.
    pub fn in_response_to(
        command: &CommandEnvelope,
        source_module: ModuleId,
        target_module: ModuleId,
        payload: EventPayload,
    ) -> Self {
        Self::new(command.trace_context(), source_module, target_module, payload)
            .caused_by(command.command_id())
    }

    pub fn with_event_id(mut self, event_id: EventId) -> Self {
        self.event_id = event_id;
        self
    }

    pub fn with_emitted_at(mut self, emitted_at: DateTime<Utc>) -> Self {
        self.emitted_at = emitted_at;
        self
    }

    pub fn with_schema_version(mut self, schema_version: SchemaVersion) -> Self {
        self.schema_version = schema_version;
        self
    }

    pub fn with_status(mut self, status: Option<EventStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn caused_by(mut self, causation: impl Into<CausationId>) -> Self {
        self.causation_id = Some(causation.into());
        self
    }

    pub fn with_causation_id(mut self, causation_id: Option<CausationId>) -> Self {
        self.causation_id = causation_id;
        self
    }

    pub fn kind(&self) -> MessageKind {
        MessageKind::Event
    }

    pub fn name(&self) -> EventName {
        self.payload.name()
    }

    pub fn schema_version(&self) -> &SchemaVersion {
        &self.schema_version
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn source_module(&self) -> ModuleId {
        self.source_module
    }

    pub fn target_module(&self) -> ModuleId {
        self.target_module
    }

    pub fn emitted_at(&self) -> DateTime<Utc> {
        self.emitted_at
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn causation_id(&self) -> Option<&CausationId> {
        self.causation_id.as_ref()
    }

    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    pub fn status(&self) -> Option<EventStatus> {
        self.status
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn into_payload(self) -> EventPayload {
        self.payload
    }

    pub fn trace_context(&self) -> TraceContext {
        TraceContext {
            tenant_id: self.tenant_id.clone(),
            correlation_id: self.correlation_id.clone(),
            trace_id: self.trace_id.clone(),
        }
    }

    /// Read an event from JSON. `kind` is checked first, then the record, name and payload.
    pub fn from_value(value: JsonValue) -> ContractResult<Self> {
        expect_kind(&value, MessageKind::Event)?;
        let record: EventRecord = serde_json::from_value(value)?;
        Self::from_record(record)
    }
}

#[derive(Serialize)]
struct EventWire<'a> {
    schema_version: &'a SchemaVersion,
    kind: MessageKind,
    event_id: &'a EventId,
    name: EventName,
    tenant_id: &'a TenantId,
    source_module: ModuleId,
    target_module: ModuleId,
    emitted_at: &'a DateTime<Utc>,
    correlation_id: &'a CorrelationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    causation_id: Option<&'a CausationId>,
    trace_id: &'a TraceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<EventStatus>,
    payload: &'a EventPayload,
}

impl Serialize for EventEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EventWire {
            schema_version: &self.schema_version,
            kind: MessageKind::Event,
            event_id: &self.event_id,
            name: self.name(),
            tenant_id: &self.tenant_id,
            source_module: self.source_module,
            target_module: self.target_module,
            emitted_at: &self.emitted_at,
            correlation_id: &self.correlation_id,
            causation_id: self.causation_id.as_ref(),
            trace_id: &self.trace_id,
            status: self.status,
            payload: &self.payload,
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
struct EventRecord {
    schema_version: SchemaVersion,
    kind: String,
    event_id: EventId,
    name: String,
    tenant_id: TenantId,
    source_module: ModuleId,
    target_module: ModuleId,
    emitted_at: DateTime<Utc>,
    correlation_id: CorrelationId,
    #[serde(default)]
    causation_id: Option<CausationId>,
    trace_id: TraceId,
    #[serde(default)]
    status: Option<EventStatus>,
    payload: JsonValue,
}

impl EventEnvelope {
    fn from_record(record: EventRecord) -> ContractResult<Self> {
        if record.kind != MessageKind::Event.as_str() {
            return Err(ContractError::kind_mismatch(
                MessageKind::Event.as_str(),
                record.kind,
            ));
        }
        let name: EventName = record.name.parse()?;
        let payload = EventPayload::from_parts(name, record.payload)?;

        Ok(Self {
            schema_version: record.schema_version,
            event_id: record.event_id,
            tenant_id: record.tenant_id,
            source_module: record.source_module,
            target_module: record.target_module,
            emitted_at: record.emitted_at,
            correlation_id: record.correlation_id,
            causation_id: record.causation_id,
            trace_id: record.trace_id,
            status: record.status,
            payload,
        })
    }
}

impl<'de> Deserialize<'de> for EventEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        EventEnvelope::from_value(value).map_err(serde::de::Error::custom)
    }
}
