use orchestration_core::TenantId;

use crate::{CommandEnvelope, Envelope, EventEnvelope};

/// Helper trait for tenant-scoped messages.
///
/// Every envelope belongs to exactly one tenant. Consumers use this to filter
/// or pin processing to a tenant without caring about the envelope kind.
///
/// ## Example Usage
///
/// ```ignore
/// let mine: Vec<_> = inbox
///     .iter()
///     .filter(|envelope| envelope.belongs_to(&tenant_id))
///     .collect();
/// ```
pub trait TenantScoped {
    fn tenant_id(&self) -> &TenantId;

    fn belongs_to(&self, tenant_id: &TenantId) -> bool {
        self.tenant_id() == tenant_id
    }
}

impl TenantScoped for CommandEnvelope {
    fn tenant_id(&self) -> &TenantId {
        CommandEnvelope::tenant_id(self)
    }
}

impl TenantScoped for EventEnvelope {
    fn tenant_id(&self) -> &TenantId {
        EventEnvelope::tenant_id(self)
    }
}

impl TenantScoped for Envelope {
    fn tenant_id(&self) -> &TenantId {
        Envelope::tenant_id(self)
    }
}
