//! Typed payloads, one union per envelope kind.
//!
//! The union variant decides the envelope `name`, so a payload can never travel
//! under a name registered for a different shape. Names whose payload no
//! producer has pinned down yet carry an [`OpenPayload`].

pub mod command;
pub mod event;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use command::{
    AgendaReminderDispatch, Attachment, AttachmentType, CommandMode, CommandPayload,
    CustomerRecordUpsert, CustomerSource, CustomerUpsertMetadata, ModuleTaskCreate,
    OwnerCommandCreate, PersonaOverrides, TaskPriority, TaskType,
};
pub use event::{
    BillingChargeCreated, BillingCollectionFailed, BillingCollectionRequested,
    BillingCollectionSent, CollectionChannel, CrmLeadCreated, CustomerLifecycle, EventPayload,
    ModuleTaskAccepted, ModuleTaskCompleted, ModuleTaskCreated, ModuleTaskFailed,
    OwnerCommandCreated, ReminderLifecycle,
};

/// Free-form JSON object payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenPayload(pub Map<String, Value>);

impl OpenPayload {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for OpenPayload {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Field deserializer that tells an explicit `null` (`Some(None)`) from an
/// absent field (`None`, via `#[serde(default)]`).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
