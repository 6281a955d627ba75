//! Strongly-typed identifiers carried on envelopes.
//!
//! Identifiers travel as plain strings on the wire. Producers are free to use
//! any scheme (tenants are usually slugs, actors may be session ids), so the
//! newtypes only guarantee a non-blank value when parsed.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ContractError;

/// Identifier of a tenant (multi-tenant boundary).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

/// Identifier of whoever issued a command (session, reminder, charge, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

/// Identifier of a command envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

/// Identifier of an event envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

/// Shared by every envelope of one business transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

/// Distributed trace identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

/// Points at the command or event that directly caused an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CausationId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = ContractError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(ContractError::invalid_id(format!("{}: must not be blank", $name)));
                }
                Ok(Self(s.to_owned()))
            }
        }
    };
}

macro_rules! impl_generated_id {
    ($t:ty) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

impl_string_newtype!(TenantId, "TenantId");
impl_string_newtype!(ActorId, "ActorId");
impl_string_newtype!(CommandId, "CommandId");
impl_string_newtype!(EventId, "EventId");
impl_string_newtype!(CorrelationId, "CorrelationId");
impl_string_newtype!(TraceId, "TraceId");
impl_string_newtype!(CausationId, "CausationId");

impl_generated_id!(CommandId);
impl_generated_id!(EventId);
impl_generated_id!(CorrelationId);
impl_generated_id!(TraceId);

impl From<&CommandId> for CausationId {
    fn from(value: &CommandId) -> Self {
        Self(value.0.clone())
    }
}

impl From<&EventId> for CausationId {
    fn from(value: &EventId) -> Self {
        Self(value.0.clone())
    }
}

impl CausationId {
    /// True when this link points at `id` (a command or event id).
    pub fn refers_to(&self, id: &str) -> bool {
        self.0 == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_uuids() {
        let a = CommandId::new();
        let b = CommandId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn parse_rejects_blank() {
        let err = "   ".parse::<TenantId>().unwrap_err();
        match err {
            ContractError::InvalidId(msg) => assert!(msg.starts_with("TenantId")),
            _ => panic!("Expected InvalidId error"),
        }
    }

    #[test]
    fn parse_keeps_non_uuid_values() {
        let tenant: TenantId = "tenant_automania".parse().unwrap();
        assert_eq!(tenant.as_str(), "tenant_automania");
        assert_eq!(tenant.to_string(), "tenant_automania");
    }

    #[test]
    fn causation_links_from_command_and_event_ids() {
        let command_id = CommandId::from("cmd-1");
        let event_id = EventId::from("evt-1");

        assert!(CausationId::from(&command_id).refers_to("cmd-1"));
        assert!(CausationId::from(&event_id).refers_to("evt-1"));
        assert!(!CausationId::from(&event_id).refers_to("cmd-1"));
    }

    #[test]
    fn serializes_transparently() {
        let id = CorrelationId::from("corr-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"corr-42\"");
        let back: CorrelationId = serde_json::from_str("\"corr-42\"").unwrap();
        assert_eq!(back, id);
    }
}
