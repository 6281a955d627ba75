//! Command payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::OpenPayload;
use crate::names::CommandName;

/// Whether an owner request is handled once or keeps the session open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandMode {
    OneShot,
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Audio,
    Image,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub attachment_type: AttachmentType,
    pub uri: String,
}

/// Per-request prompt overrides for the concierge personas.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_concierge_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_agent_prompt: Option<String>,
}

/// `owner.command.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnerCommandCreate {
    pub owner_command_id: String,
    pub text: String,
    pub mode: CommandMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_overrides: Option<PersonaOverrides>,
}

/// Kind of work a module task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "crm.followup.send")]
    CrmFollowupSend,
    #[serde(rename = "crm.lead.capture")]
    CrmLeadCapture,
    #[serde(rename = "customer.upsert")]
    CustomerUpsert,
    #[serde(rename = "agenda.commitment.schedule")]
    AgendaCommitmentSchedule,
    #[serde(rename = "billing.charge.create")]
    BillingChargeCreate,
    #[serde(rename = "billing.collection.request")]
    BillingCollectionRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Normal,
    High,
}

/// `module.task.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleTaskCreate {
    pub task_id: String,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Planner-provided input; shape depends on `task_type`.
    pub input: Map<String, Value>,
}

/// `agenda.reminder.dispatch.request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgendaReminderDispatch {
    pub reminder_id: String,
    pub appointment_id: String,
    pub schedule_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_e164: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerSource {
    Manual,
    LeadConversion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerUpsertMetadata {
    /// Always present on the wire, `null` when unknown.
    pub external_key: Option<String>,
    pub origin: String,
    pub status: String,
    /// Lead snapshot for lead conversions, `null` otherwise.
    pub lead: Option<Value>,
}

/// `customer.record.upsert`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerRecordUpsert {
    pub customer_id: String,
    pub source: CustomerSource,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_e164: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub metadata: CustomerUpsertMetadata,
}

payload_union! {
    /// Payload of a command envelope, keyed by [`CommandName`].
    pub enum CommandPayload keyed by CommandName {
        OwnerCommandCreate(OwnerCommandCreate),
        ModuleTaskCreate(ModuleTaskCreate),
        CrmWhatsappSend(OpenPayload),
        AgendaReminderSchedule(OpenPayload),
        AgendaReminderDispatchRequest(AgendaReminderDispatch),
        BillingCollectionRequest(OpenPayload),
        CustomerRecordUpsert(CustomerRecordUpsert),
    }
}

impl From<OwnerCommandCreate> for CommandPayload {
    fn from(value: OwnerCommandCreate) -> Self {
        Self::OwnerCommandCreate(value)
    }
}

impl From<ModuleTaskCreate> for CommandPayload {
    fn from(value: ModuleTaskCreate) -> Self {
        Self::ModuleTaskCreate(value)
    }
}

impl From<AgendaReminderDispatch> for CommandPayload {
    fn from(value: AgendaReminderDispatch) -> Self {
        Self::AgendaReminderDispatchRequest(value)
    }
}

impl From<CustomerRecordUpsert> for CommandPayload {
    fn from(value: CustomerRecordUpsert) -> Self {
        Self::CustomerRecordUpsert(value)
    }
}
