//! JSON encoding of envelopes.
//!
//! Decoding goes through the contract checks (kind, name, payload shape) and
//! reports failures as [`ContractError`] rather than bare JSON errors.

use serde_json::Value as JsonValue;

use orchestration_core::{ContractError, ContractResult};

use crate::command::CommandEnvelope;
use crate::envelope::Envelope;
use crate::event::EventEnvelope;

pub fn encode(envelope: &Envelope) -> ContractResult<String> {
    Ok(serde_json::to_string(envelope)?)
}

pub fn encode_command(command: &CommandEnvelope) -> ContractResult<String> {
    Ok(serde_json::to_string(command)?)
}

pub fn encode_event(event: &EventEnvelope) -> ContractResult<String> {
    Ok(serde_json::to_string(event)?)
}

/// Decode either kind of envelope.
pub fn decode(input: &str) -> ContractResult<Envelope> {
    let value: JsonValue = serde_json::from_str(input).inspect_err(log_rejection)?;
    decode_value(value)
}

pub fn decode_value(value: JsonValue) -> ContractResult<Envelope> {
    Envelope::from_value(value).inspect_err(log_rejection)
}

/// Decode a command envelope.
///
/// `kind` is checked before anything else: any other kind is `KindMismatch`,
/// no kind at all is `MissingField("kind")`.
pub fn decode_command(input: &str) -> ContractResult<CommandEnvelope> {
    let value: JsonValue = serde_json::from_str(input).inspect_err(log_rejection)?;
    CommandEnvelope::from_value(value).inspect_err(log_rejection)
}

/// Decode an event envelope; `kind` is checked first, as in [`decode_command`].
pub fn decode_event(input: &str) -> ContractResult<EventEnvelope> {
    let value: JsonValue = serde_json::from_str(input).inspect_err(log_rejection)?;
    EventEnvelope::from_value(value).inspect_err(log_rejection)
}

fn log_rejection(err: &impl core::fmt::Display) {
    tracing::debug!(error = %err, "envelope rejected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_command() -> JsonValue {
        json!({
            "schema_version": "1.0.0",
            "kind": "command",
            "command_id": "cmd-1",
            "name": "crm.whatsapp.send",
            "tenant_id": "tenant_automania",
            "source_module": "mod-02-whatsapp-crm",
            "target_module": "mod-02-whatsapp-crm",
            "created_at": "2026-03-01T12:00:00.000Z",
            "correlation_id": "corr-1",
            "trace_id": "trace-1",
            "actor": {"actor_id": "agent-1", "actor_type": "agent", "channel": "whatsapp"},
            "payload": {"phone_e164": "+5511999990000", "text": "Oi!"}
        })
    }

    #[test]
    fn decode_command_accepts_producer_json() {
        let command = decode_command(&raw_command().to_string()).unwrap();
        assert_eq!(command.name().as_str(), "crm.whatsapp.send");
        assert_eq!(command.causation_id(), None);
    }

    #[test]
    fn decode_command_rejects_event_kind() {
        let mut raw = raw_command();
        raw["kind"] = json!("event");

        assert_eq!(
            decode_command(&raw.to_string()).unwrap_err(),
            ContractError::kind_mismatch("command", "event")
        );
    }

    #[test]
    fn decode_command_rejects_unknown_name() {
        let mut raw = raw_command();
        raw["name"] = json!("crm.whatsapp.broadcast");

        assert_eq!(
            decode_command(&raw.to_string()).unwrap_err(),
            ContractError::unknown_value("command name", "crm.whatsapp.broadcast")
        );
    }

    #[test]
    fn decode_event_rejects_command() {
        assert_eq!(
            decode_event(&raw_command().to_string()).unwrap_err(),
            ContractError::kind_mismatch("event", "command")
        );
    }

    #[test]
    fn missing_kind_is_reported_by_typed_decoders() {
        let mut raw = raw_command();
        raw.as_object_mut().unwrap().remove("kind");

        assert_eq!(
            decode_command(&raw.to_string()).unwrap_err(),
            ContractError::MissingField("kind")
        );
        assert_eq!(
            decode_event(&raw.to_string()).unwrap_err(),
            ContractError::MissingField("kind")
        );
    }

    #[test]
    fn kind_mismatch_wins_over_other_shape_errors() {
        let mut raw = raw_command();
        raw["kind"] = json!("query");
        raw.as_object_mut().unwrap().remove("trace_id");

        assert_eq!(
            decode_command(&raw.to_string()).unwrap_err(),
            ContractError::kind_mismatch("command", "query")
        );
    }

    #[test]
    fn bad_json_is_malformed() {
        match decode("{\"kind\": ").unwrap_err() {
            ContractError::Malformed(_) => {}
            other => panic!("Expected Malformed error, got {other:?}"),
        }
    }

    #[test]
    fn encode_decode_keeps_envelope() {
        let envelope = decode(&raw_command().to_string()).unwrap();
        let again = decode(&encode(&envelope).unwrap()).unwrap();
        assert_eq!(again, envelope);
    }

    mod proptest_tests {
        use super::*;
        use crate::actor::{ActorRef, ActorType, Channel};
        use crate::envelope::TraceContext;
        use crate::module::ModuleId;
        use crate::names::{CommandName, EventName, EventStatus};
        use crate::payload::{
            AgendaReminderDispatch, Attachment, AttachmentType, BillingChargeCreated,
            BillingCollectionFailed, BillingCollectionRequested, BillingCollectionSent,
            CollectionChannel, CommandMode, CommandPayload, CrmLeadCreated, CustomerLifecycle,
            CustomerRecordUpsert, CustomerSource, CustomerUpsertMetadata, EventPayload,
            ModuleTaskAccepted, ModuleTaskCompleted, ModuleTaskCreate, ModuleTaskCreated,
            ModuleTaskFailed, OpenPayload, OwnerCommandCreate, OwnerCommandCreated,
            PersonaOverrides, ReminderLifecycle, TaskPriority, TaskType,
        };
        use chrono::{DateTime, TimeZone, Utc};
        use orchestration_core::{
            CausationId, CommandId, CorrelationId, EventId, TenantId, TraceId,
        };
        use proptest::prelude::*;
        use serde_json::{json, Map, Value as JsonValue};

        fn context(tenant: &str, correlation: &str, trace: &str) -> TraceContext {
            TraceContext {
                tenant_id: TenantId::from(tenant),
                correlation_id: CorrelationId::from(correlation),
                trace_id: TraceId::from(trace),
            }
        }

        fn open_payload(fields: Vec<(String, String)>) -> OpenPayload {
            fields
                .into_iter()
                .fold(OpenPayload::new(), |payload, (k, v)| payload.with(k, v))
        }

        /// Values shared by the typed payload builders below.
        #[derive(Debug, Clone)]
        struct Sample {
            text: String,
            at: DateTime<Utc>,
            amount: f64,
            flag: bool,
            key: Option<String>,
        }

        prop_compose! {
            fn sample()(
                text in "[a-z0-9-]{1,16}",
                secs in 0i64..4_000_000_000i64,
                nanos in 0u32..1_000_000_000u32,
                cents in 0u64..100_000_000u64,
                flag in any::<bool>(),
                key in proptest::option::of("[A-Z0-9_]{1,12}"),
            ) -> Sample {
                Sample {
                    text,
                    at: Utc.timestamp_opt(secs, nanos).unwrap(),
                    amount: cents as f64 / 100.0,
                    flag,
                    key,
                }
            }
        }

        fn command_payload(name: CommandName, s: &Sample) -> CommandPayload {
            match name {
                CommandName::OwnerCommandCreate => CommandPayload::OwnerCommandCreate(OwnerCommandCreate {
                    owner_command_id: s.text.clone(),
                    text: format!("cobrar {}", s.text),
                    mode: if s.flag { CommandMode::OneShot } else { CommandMode::Continuous },
                    attachments: s.flag.then(|| {
                        vec![Attachment {
                            attachment_type: AttachmentType::Image,
                            uri: format!("s3://uploads/{}.png", s.text),
                        }]
                    }),
                    persona_overrides: s.key.clone().map(|prompt| PersonaOverrides {
                        owner_concierge_prompt: Some(prompt),
                        whatsapp_agent_prompt: None,
                    }),
                }),
                CommandName::ModuleTaskCreate => CommandPayload::ModuleTaskCreate(ModuleTaskCreate {
                    task_id: s.text.clone(),
                    task_type: TaskType::BillingChargeCreate,
                    priority: if s.flag { TaskPriority::High } else { TaskPriority::Normal },
                    due_at: s.flag.then_some(s.at),
                    input: Map::from_iter([
                        ("amount".to_string(), json!(s.amount)),
                        ("customer_id".to_string(), json!(s.text)),
                    ]),
                }),
                CommandName::CrmWhatsappSend => CommandPayload::CrmWhatsappSend(
                    OpenPayload::new().with("phone_e164", "+5511999990000").with("text", s.text.as_str()),
                ),
                CommandName::AgendaReminderSchedule => CommandPayload::AgendaReminderSchedule(
                    OpenPayload::new().with("reminder_id", s.text.as_str()),
                ),
                CommandName::AgendaReminderDispatchRequest => {
                    CommandPayload::AgendaReminderDispatchRequest(AgendaReminderDispatch {
                        reminder_id: s.text.clone(),
                        appointment_id: format!("apt-{}", s.text),
                        schedule_at: s.at,
                        phone_e164: s.key.as_ref().map(|_| "+5511988887777".to_string()),
                        message: "Lembrete de consulta".to_string(),
                    })
                }
                CommandName::BillingCollectionRequest => CommandPayload::BillingCollectionRequest(
                    OpenPayload::new().with("charge_id", s.text.as_str()).with("amount", s.amount),
                ),
                CommandName::CustomerRecordUpsert => CommandPayload::CustomerRecordUpsert(CustomerRecordUpsert {
                    customer_id: s.text.clone(),
                    source: if s.flag { CustomerSource::Manual } else { CustomerSource::LeadConversion },
                    full_name: "Maria Souza".to_string(),
                    phone_e164: None,
                    email: s.key.as_ref().map(|k| format!("{}@example.com", k.to_lowercase())),
                    metadata: CustomerUpsertMetadata {
                        external_key: s.key.clone(),
                        origin: "manual".to_string(),
                        status: "active".to_string(),
                        lead: (!s.flag).then(|| json!({"lead_id": s.text})),
                    },
                }),
            }
        }

        fn reminder(name: EventName, s: &Sample) -> ReminderLifecycle {
            ReminderLifecycle {
                reminder_id: s.text.clone(),
                appointment_id: format!("apt-{}", s.text),
                target_channel: if s.flag { "whatsapp" } else { "email" }.to_string(),
                schedule_at: (name == EventName::AgendaReminderScheduled).then_some(s.at),
                dispatch_command_id: s.flag.then(|| s.key.clone().map(CommandId::from)),
                error_code: (name == EventName::AgendaReminderFailed)
                    .then(|| "PROVIDER_SEND_ERROR".to_string()),
            }
        }

        fn customer(s: &Sample) -> CustomerLifecycle {
            CustomerLifecycle {
                customer_id: s.text.clone(),
                origin: "lead-conversion".to_string(),
                status: "active".to_string(),
                external_key: s.key.clone(),
                source_module: ModuleId::WhatsappCrm,
            }
        }

        fn event_payload(name: EventName, s: &Sample) -> EventPayload {
            match name {
                EventName::OwnerCommandCreated => EventPayload::OwnerCommandCreated(OwnerCommandCreated {
                    owner_command_id: s.text.clone(),
                    mode: if s.flag { CommandMode::OneShot } else { CommandMode::Continuous },
                }),
                EventName::ModuleTaskCreated => EventPayload::ModuleTaskCreated(ModuleTaskCreated {
                    task_id: s.text.clone(),
                    task_type: TaskType::CustomerUpsert,
                    target_module: ModuleId::Customers,
                }),
                EventName::ModuleTaskAccepted => EventPayload::ModuleTaskAccepted(ModuleTaskAccepted {
                    task_id: s.text.clone(),
                    accepted_by: ModuleId::Customers.to_string(),
                }),
                EventName::ModuleTaskCompleted => EventPayload::ModuleTaskCompleted(ModuleTaskCompleted {
                    task_id: s.text.clone(),
                    result_summary: "done".to_string(),
                    output_ref: format!("memory://task/{}", s.text),
                }),
                EventName::ModuleTaskFailed => EventPayload::ModuleTaskFailed(ModuleTaskFailed {
                    task_id: s.text.clone(),
                    error_code: "SIMULATED_FAILURE".to_string(),
                    error_message: "downstream failure".to_string(),
                    retryable: s.flag,
                }),
                EventName::CrmLeadCreated => EventPayload::CrmLeadCreated(CrmLeadCreated {
                    lead_id: s.text.clone(),
                    source_channel: "whatsapp".to_string(),
                    phone_e164: "+5511999990000".to_string(),
                    stage: "new".to_string(),
                }),
                EventName::CrmLeadConverted => EventPayload::CrmLeadConverted(
                    OpenPayload::new().with("lead_id", s.text.as_str()),
                ),
                EventName::CustomerCreated => EventPayload::CustomerCreated(customer(s)),
                EventName::CustomerUpdated => EventPayload::CustomerUpdated(customer(s)),
                EventName::AgendaReminderScheduled => {
                    EventPayload::AgendaReminderScheduled(reminder(name, s))
                }
                EventName::AgendaReminderSent => EventPayload::AgendaReminderSent(reminder(name, s)),
                EventName::AgendaReminderFailed => EventPayload::AgendaReminderFailed(reminder(name, s)),
                EventName::AgendaReminderCanceled => {
                    EventPayload::AgendaReminderCanceled(reminder(name, s))
                }
                EventName::BillingChargeCreated => EventPayload::BillingChargeCreated(BillingChargeCreated {
                    charge_id: s.text.clone(),
                    customer_id: format!("cus-{}", s.text),
                    amount: s.amount,
                    currency: "BRL".to_string(),
                }),
                EventName::BillingCollectionRequested => {
                    EventPayload::BillingCollectionRequested(BillingCollectionRequested {
                        charge_id: s.text.clone(),
                        channel: CollectionChannel::Whatsapp,
                    })
                }
                EventName::BillingCollectionSent => EventPayload::BillingCollectionSent(BillingCollectionSent {
                    charge_id: s.text.clone(),
                    message_id: format!("wamid.{}", s.text),
                    sent_at: s.at,
                }),
                EventName::BillingCollectionFailed => {
                    EventPayload::BillingCollectionFailed(BillingCollectionFailed {
                        charge_id: s.text.clone(),
                        error_code: "PROVIDER_SEND_ERROR".to_string(),
                        retryable: s.flag,
                    })
                }
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: encode then decode reproduces the command, optionals included.
            #[test]
            fn command_round_trip(
                id in "[a-z0-9-]{1,24}",
                tenant in "[a-z_]{1,16}",
                correlation in "[a-z0-9-]{1,24}",
                trace in "[a-z0-9-]{1,24}",
                source in prop::sample::select(ModuleId::ALL),
                target in prop::sample::select(ModuleId::ALL),
                actor_type in prop::sample::select(ActorType::ALL),
                channel in prop::sample::select(Channel::ALL),
                causation in proptest::option::of("[a-z0-9-]{1,24}"),
                secs in 0i64..4_000_000_000i64,
                fields in prop::collection::vec(("[a-z_]{1,8}", ".{0,16}"), 0..4),
            ) {
                let command = CommandEnvelope::new(
                    context(&tenant, &correlation, &trace),
                    source,
                    target,
                    ActorRef::new(id.as_str(), actor_type, channel),
                    CommandPayload::CrmWhatsappSend(open_payload(fields)),
                )
                .with_command_id(CommandId::from(id.as_str()))
                .with_created_at(Utc.timestamp_opt(secs, 0).unwrap())
                .with_causation_id(causation.map(CausationId::from));

                let json = encode_command(&command).unwrap();
                let back = decode_command(&json).unwrap();

                prop_assert_eq!(back.name(), CommandName::CrmWhatsappSend);
                prop_assert_eq!(&back, &command);
            }

            /// Property: status and causation survive exactly, absent stays absent.
            #[test]
            fn event_round_trip(
                id in "[a-z0-9-]{1,24}",
                source in prop::sample::select(ModuleId::ALL),
                target in prop::sample::select(ModuleId::ALL),
                status in proptest::option::of(prop::sample::select(EventStatus::ALL)),
                causation in proptest::option::of("[a-z0-9-]{1,24}"),
            ) {
                let event = EventEnvelope::new(
                    context("tenant_automania", "corr-1", "trace-1"),
                    source,
                    target,
                    EventPayload::CrmLeadConverted(OpenPayload::new().with("lead_id", id.as_str())),
                )
                .with_event_id(EventId::from(id.as_str()))
                .with_status(status)
                .with_causation_id(causation.clone().map(CausationId::from));

                let json = encode(&event.clone().into()).unwrap();
                let value: JsonValue = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(value.get("status").is_some(), status.is_some());
                prop_assert_eq!(value.get("causation_id").is_some(), causation.is_some());

                let back = decode_event(&json).unwrap();
                prop_assert_eq!(back.name(), EventName::CrmLeadConverted);
                prop_assert_eq!(&back, &event);
            }

            /// Property: every command name round-trips with its typed payload.
            #[test]
            fn typed_command_payloads_round_trip(
                name in prop::sample::select(CommandName::ALL),
                s in sample(),
            ) {
                let command = CommandEnvelope::new(
                    context("tenant_automania", "corr-1", "trace-1"),
                    ModuleId::OwnerConcierge,
                    ModuleId::Billing,
                    ActorRef::new("agent-1", ActorType::Agent, Channel::Api),
                    command_payload(name, &s),
                )
                .with_created_at(s.at);

                let back = decode_command(&encode_command(&command).unwrap()).unwrap();
                prop_assert_eq!(back.name(), name);
                prop_assert_eq!(&back, &command);
            }

            /// Property: every event name round-trips with its typed payload.
            #[test]
            fn typed_event_payloads_round_trip(
                name in prop::sample::select(EventName::ALL),
                s in sample(),
            ) {
                let event = EventEnvelope::new(
                    context("tenant_automania", "corr-1", "trace-1"),
                    ModuleId::Agenda,
                    ModuleId::OwnerConcierge,
                    event_payload(name, &s),
                )
                .with_emitted_at(s.at);

                let back = decode_event(&encode_event(&event).unwrap()).unwrap();
                prop_assert_eq!(back.name(), name);
                prop_assert_eq!(&back, &event);
            }

            /// Property: any name outside the command set is rejected.
            #[test]
            fn foreign_command_names_rejected(name in "[a-z]{1,8}\\.[a-z]{1,8}\\.[a-z]{1,8}") {
                prop_assume!(name.parse::<CommandName>().is_err());

                let mut raw = raw_command();
                raw["name"] = json!(name.clone());
                prop_assert_eq!(
                    decode_command(&raw.to_string()).unwrap_err(),
                    ContractError::unknown_value("command name", name)
                );
            }
        }
    }
}
