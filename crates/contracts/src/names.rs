//! Message name vocabularies.
//!
//! Commands are imperative requests, events are facts that already happened.
//! The two sets never overlap, and an envelope type only accepts its own set.

wire_enum! {
    /// Discriminant stamped on every envelope as `kind`.
    pub enum MessageKind ("message kind") {
        Command => "command",
        Event => "event",
    }
}

wire_enum! {
    /// Names of imperative requests.
    pub enum CommandName ("command name") {
        OwnerCommandCreate => "owner.command.create",
        ModuleTaskCreate => "module.task.create",
        CrmWhatsappSend => "crm.whatsapp.send",
        AgendaReminderSchedule => "agenda.reminder.schedule",
        AgendaReminderDispatchRequest => "agenda.reminder.dispatch.request",
        BillingCollectionRequest => "billing.collection.request",
        CustomerRecordUpsert => "customer.record.upsert",
    }
}

wire_enum! {
    /// Names of facts that occurred.
    pub enum EventName ("event name") {
        OwnerCommandCreated => "owner.command.created",
        ModuleTaskCreated => "module.task.created",
        ModuleTaskAccepted => "module.task.accepted",
        ModuleTaskCompleted => "module.task.completed",
        ModuleTaskFailed => "module.task.failed",
        CrmLeadCreated => "crm.lead.created",
        CrmLeadConverted => "crm.lead.converted",
        CustomerCreated => "customer.created",
        CustomerUpdated => "customer.updated",
        AgendaReminderScheduled => "agenda.reminder.scheduled",
        AgendaReminderSent => "agenda.reminder.sent",
        AgendaReminderFailed => "agenda.reminder.failed",
        AgendaReminderCanceled => "agenda.reminder.canceled",
        BillingChargeCreated => "billing.charge.created",
        BillingCollectionRequested => "billing.collection.requested",
        BillingCollectionSent => "billing.collection.sent",
        BillingCollectionFailed => "billing.collection.failed",
    }
}

wire_enum! {
    /// Outcome marker an event may carry.
    pub enum EventStatus ("event status") {
        Accepted => "accepted",
        Completed => "completed",
        Failed => "failed",
        Info => "info",
    }
}

impl EventName {
    /// Status producers attach to this event by convention, if any.
    pub const fn conventional_status(&self) -> Option<EventStatus> {
        use EventName::*;

        match self {
            OwnerCommandCreated
            | CrmLeadCreated
            | CustomerCreated
            | CustomerUpdated
            | AgendaReminderScheduled
            | AgendaReminderCanceled
            | BillingChargeCreated
            | BillingCollectionRequested => Some(EventStatus::Info),
            ModuleTaskAccepted => Some(EventStatus::Accepted),
            ModuleTaskCompleted | AgendaReminderSent => Some(EventStatus::Completed),
            ModuleTaskFailed | AgendaReminderFailed | BillingCollectionFailed => {
                Some(EventStatus::Failed)
            }
            ModuleTaskCreated | CrmLeadConverted | BillingCollectionSent => None,
        }
    }
}

/// The name of either kind of message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MessageName {
    Command(CommandName),
    Event(EventName),
}

impl MessageName {
    pub const fn kind(&self) -> MessageKind {
        match self {
            MessageName::Command(_) => MessageKind::Command,
            MessageName::Event(_) => MessageKind::Event,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            MessageName::Command(name) => name.as_str(),
            MessageName::Event(name) => name.as_str(),
        }
    }
}

impl core::fmt::Display for MessageName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CommandName> for MessageName {
    fn from(value: CommandName) -> Self {
        MessageName::Command(value)
    }
}

impl From<EventName> for MessageName {
    fn from(value: EventName) -> Self {
        MessageName::Event(value)
    }
}

impl PartialEq<CommandName> for MessageName {
    fn eq(&self, other: &CommandName) -> bool {
        matches!(self, MessageName::Command(name) if name == other)
    }
}

impl PartialEq<EventName> for MessageName {
    fn eq(&self, other: &EventName) -> bool {
        matches!(self, MessageName::Event(name) if name == other)
    }
}
