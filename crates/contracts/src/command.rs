//! Command envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use orchestration_core::{
    CausationId, CommandId, ContractError, ContractResult, CorrelationId, TenantId, TraceId,
};

use crate::actor::ActorRef;
use crate::envelope::{TraceContext, expect_kind};
use crate::module::ModuleId;
use crate::names::{CommandName, MessageKind};
use crate::payload::CommandPayload;
use crate::version::SchemaVersion;

/// Envelope for a command: an imperative request addressed to a module.
///
/// The `name` is derived from the payload variant, so a command can only ever
/// carry a [`CommandName`].
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEnvelope {
    schema_version: SchemaVersion,
    command_id: CommandId,
    tenant_id: TenantId,
    source_module: ModuleId,
    target_module: ModuleId,
    created_at: DateTime<Utc>,
    correlation_id: CorrelationId,
    causation_id: Option<CausationId>,
    trace_id: TraceId,
    actor: ActorRef,
    payload: CommandPayload,
}

impl CommandEnvelope {
    /// New command with a fresh id, the current schema version and `created_at = now`.
    pub fn new(
        context: TraceContext,
        source_module: ModuleId,
        target_module: ModuleId,
        actor: ActorRef,
        payload: impl Into<CommandPayload>,
    ) -> Self {
        let TraceContext {
            tenant_id,
            correlation_id,
            trace_id,
        } = context;

        Self {
            schema_version: SchemaVersion::default(),
            command_id: CommandId::new(),
            tenant_id,
            source_module,
            target_module,
            created_at: Utc::now(),
            correlation_id,
            causation_id: None,
            trace_id,
            actor,
            payload: payload.into(),
        }
    }

    pub fn with_command_id(mut self, command_id: CommandId) -> Self {
        self.command_id = command_id;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_schema_version(mut self, schema_version: SchemaVersion) -> Self {
        self.schema_version = schema_version;
        self
    }

    /// Link this command to the envelope that caused it.
    pub fn caused_by(mut self, causation: impl Into<CausationId>) -> Self {
        self.causation_id = Some(causation.into());
        self
    }

    pub fn with_causation_id(mut self, causation_id: Option<CausationId>) -> Self {
        self.causation_id = causation_id;
        self
    }

    pub fn kind(&self) -> MessageKind {
        MessageKind::Command
    }

    pub fn name(&self) -> CommandName {
        self.payload.name()
    }

    pub fn schema_version(&self) -> &SchemaVersion {
        &self.schema_version
    }

    pub fn command_id(&self) -> &CommandId {
        &self.command_id
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

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
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

    pub fn actor(&self) -> &ActorRef {
        &self.actor
    }

    pub fn payload(&self) -> &CommandPayload {
        &self.payload
    }

    pub fn into_payload(self) -> CommandPayload {
        self.payload
    }

    /// Tenant, correlation and trace to carry into follow-up envelopes.
    pub fn trace_context(&self) -> TraceContext {
        TraceContext {
            tenant_id: self.tenant_id.clone(),
            correlation_id: self.correlation_id.clone(),
            trace_id: self.trace_id.clone(),
        }
    }

    /// Read a command from JSON. `kind` is checked first, then the record, name and payload.
    pub fn from_value(value: JsonValue) -> ContractResult<Self> {
        expect_kind(&value, MessageKind::Command)?;
        let record: CommandRecord = serde_json::from_value(value)?;
        Self::from_record(record)
    }
}

/// Borrowed wire view; field order follows the published contract.
#[derive(Serialize)]
struct CommandWire<'a> {
    schema_version: &'a SchemaVersion,
    kind: MessageKind,
    command_id: &'a CommandId,
    name: CommandName,
    tenant_id: &'a TenantId,
    source_module: ModuleId,
    target_module: ModuleId,
    created_at: &'a DateTime<Utc>,
    correlation_id: &'a CorrelationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    causation_id: Option<&'a CausationId>,
    trace_id: &'a TraceId,
    actor: &'a ActorRef,
    payload: &'a CommandPayload,
}

impl Serialize for CommandEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CommandWire {
            schema_version: &self.schema_version,
            kind: MessageKind::Command,
            command_id: &self.command_id,
            name: self.name(),
            tenant_id: &self.tenant_id,
            source_module: self.source_module,
            target_module: self.target_module,
            created_at: &self.created_at,
            correlation_id: &self.correlation_id,
            causation_id: self.causation_id.as_ref(),
            trace_id: &self.trace_id,
            actor: &self.actor,
            payload: &self.payload,
        }
        .serialize(serializer)
    }
}

/// Decoded shape before `kind`, `name` and `payload` are checked against each other.
#[derive(Deserialize)]
struct CommandRecord {
    schema_version: SchemaVersion,
    kind: String,
    command_id: CommandId,
    name: String,
    tenant_id: TenantId,
    source_module: ModuleId,
    target_module: ModuleId,
    created_at: DateTime<Utc>,
    correlation_id: CorrelationId,
    #[serde(default)]
    causation_id: Option<CausationId>,
    trace_id: TraceId,
    actor: ActorRef,
    payload: JsonValue,
}

impl CommandEnvelope {
    fn from_record(record: CommandRecord) -> ContractResult<Self> {
        if record.kind != MessageKind::Command.as_str() {
            return Err(ContractError::kind_mismatch(
                MessageKind::Command.as_str(),
                record.kind,
            ));
        }
        let name: CommandName = record.name.parse()?;
        let payload = CommandPayload::from_parts(name, record.payload)?;

        Ok(Self {
            schema_version: record.schema_version,
            command_id: record.command_id,
            tenant_id: record.tenant_id,
            source_module: record.source_module,
            target_module: record.target_module,
            created_at: record.created_at,
            correlation_id: record.correlation_id,
            causation_id: record.causation_id,
            trace_id: record.trace_id,
            actor: record.actor,
            payload,
        })
    }
}

impl<'de> Deserialize<'de> for CommandEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        CommandEnvelope::from_value(value).map_err(serde::de::Error::custom)
    }
}
