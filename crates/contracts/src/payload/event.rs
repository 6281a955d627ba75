//! Event payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orchestration_core::CommandId;

use super::command::{CommandMode, TaskType};
use super::OpenPayload;
use crate::module::ModuleId;
use crate::names::EventName;

/// `owner.command.created`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnerCommandCreated {
    pub owner_command_id: String,
    pub mode: CommandMode,
}

/// `module.task.created`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleTaskCreated {
    pub task_id: String,
    pub task_type: TaskType,
    pub target_module: ModuleId,
}

/// `module.task.accepted`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleTaskAccepted {
    pub task_id: String,
    pub accepted_by: String,
}

/// `module.task.completed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleTaskCompleted {
    pub task_id: String,
    pub result_summary: String,
    pub output_ref: String,
}

/// `module.task.failed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleTaskFailed {
    pub task_id: String,
    pub error_code: String,
    pub error_message: String,
    pub retryable: bool,
}

/// `crm.lead.created`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrmLeadCreated {
    pub lead_id: String,
    pub source_channel: String,
    pub phone_e164: String,
    /// Public funnel stage.
    pub stage: String,
}

/// `customer.created` and `customer.updated`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerLifecycle {
    pub customer_id: String,
    pub origin: String,
    pub status: String,
    /// Always present on the wire, `null` when unknown.
    pub external_key: Option<String>,
    /// Module that requested the upsert.
    pub source_module: ModuleId,
}

/// Shared by every `agenda.reminder.*` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReminderLifecycle {
    pub reminder_id: String,
    pub appointment_id: String,
    pub target_channel: String,
    /// Set on `agenda.reminder.scheduled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<DateTime<Utc>>,
    /// `Some(None)` keeps an explicit `null` from producers that had no dispatch yet.
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub dispatch_command_id: Option<Option<CommandId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// `billing.charge.created`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillingChargeCreated {
    pub charge_id: String,
    pub customer_id: String,
    pub amount: f64,
    pub currency: String,
}

/// Collection is only ever requested over WhatsApp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionChannel {
    Whatsapp,
}

/// `billing.collection.requested`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillingCollectionRequested {
    pub charge_id: String,
    pub channel: CollectionChannel,
}

/// `billing.collection.sent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillingCollectionSent {
    pub charge_id: String,
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
}

/// `billing.collection.failed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillingCollectionFailed {
    pub charge_id: String,
    pub error_code: String,
    pub retryable: bool,
}

payload_union! {
    /// Payload of an event envelope, keyed by [`EventName`].
    pub enum EventPayload keyed by EventName {
        OwnerCommandCreated(OwnerCommandCreated),
        ModuleTaskCreated(ModuleTaskCreated),
        ModuleTaskAccepted(ModuleTaskAccepted),
        ModuleTaskCompleted(ModuleTaskCompleted),
        ModuleTaskFailed(ModuleTaskFailed),
        CrmLeadCreated(CrmLeadCreated),
        CrmLeadConverted(OpenPayload),
        CustomerCreated(CustomerLifecycle),
        CustomerUpdated(CustomerLifecycle),
        AgendaReminderScheduled(ReminderLifecycle),
        AgendaReminderSent(ReminderLifecycle),
        AgendaReminderFailed(ReminderLifecycle),
        AgendaReminderCanceled(ReminderLifecycle),
        BillingChargeCreated(BillingChargeCreated),
        BillingCollectionRequested(BillingCollectionRequested),
        BillingCollectionSent(BillingCollectionSent),
        BillingCollectionFailed(BillingCollectionFailed),
    }
}

impl EventPayload {
    /// Task this event reports on, for `module.task.*` events.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            EventPayload::ModuleTaskCreated(p) => Some(&p.task_id),
            EventPayload::ModuleTaskAccepted(p) => Some(&p.task_id),
            EventPayload::ModuleTaskCompleted(p) => Some(&p.task_id),
            EventPayload::ModuleTaskFailed(p) => Some(&p.task_id),
            _ => None,
        }
    }

    /// Charge this event reports on, for `billing.*` events.
    pub fn charge_id(&self) -> Option<&str> {
        match self {
            EventPayload::BillingChargeCreated(p) => Some(&p.charge_id),
            EventPayload::BillingCollectionRequested(p) => Some(&p.charge_id),
            EventPayload::BillingCollectionSent(p) => Some(&p.charge_id),
            EventPayload::BillingCollectionFailed(p) => Some(&p.charge_id),
            _ => None,
        }
    }
}
