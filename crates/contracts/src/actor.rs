//! Actor references attached to commands.

use serde::{Deserialize, Serialize};

use orchestration_core::ActorId;

wire_enum! {
    /// What kind of party issued a command.
    pub enum ActorType ("actor type") {
        Owner => "owner",
        Agent => "agent",
        System => "system",
        Customer => "customer",
    }
}

wire_enum! {
    /// Surface a command arrived through.
    pub enum Channel ("channel") {
        UiChat => "ui-chat",
        UiAvatar => "ui-avatar",
        Whatsapp => "whatsapp",
        Api => "api",
        Scheduler => "scheduler",
        Billing => "billing",
    }
}

/// Who (or what) issued a command, and through which channel.
///
/// `actor_type` and `channel` are independent: every combination is accepted,
/// including odd ones such as a customer on the billing channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorRef {
    pub actor_id: ActorId,
    pub actor_type: ActorType,
    pub channel: Channel,
}

impl ActorRef {
    pub fn new(actor_id: impl Into<ActorId>, actor_type: ActorType, channel: Channel) -> Self {
        Self {
            actor_id: actor_id.into(),
            actor_type,
            channel,
        }
    }
}
