//! Causal-chain reconstruction over a set of envelopes.
//!
//! `correlation_id` groups a transaction; `causation_id` orders it. Walking
//! causation links back from any envelope yields the path that led to it.

use std::collections::{HashMap, HashSet};

use orchestration_core::{CorrelationId, TenantId};

use crate::envelope::Envelope;

/// Envelopes belonging to one tenant's transaction, in input order.
pub fn correlated<'a>(
    envelopes: &'a [Envelope],
    tenant_id: &'a TenantId,
    correlation_id: &'a CorrelationId,
) -> impl Iterator<Item = &'a Envelope> + 'a {
    envelopes
        .iter()
        .filter(move |e| e.tenant_id() == tenant_id && e.correlation_id() == correlation_id)
}

/// Chain of envelopes that led to `leaf`, root first and `leaf` last.
///
/// Only predecessors in the leaf's tenant and correlation are followed. The
/// walk stops at the first missing predecessor or at a cycle.
pub fn causal_chain<'a>(envelopes: &'a [Envelope], leaf: &'a Envelope) -> Vec<&'a Envelope> {
    let by_id: HashMap<&str, &Envelope> =
        correlated(envelopes, leaf.tenant_id(), leaf.correlation_id())
            .map(|e| (e.id(), e))
            .collect();

    let mut chain = vec![leaf];
    let mut seen: HashSet<&str> = HashSet::from([leaf.id()]);
    let mut current = leaf;

    while let Some(causation) = current.causation_id() {
        let Some(parent) = by_id.get(causation.as_str()).copied() else {
            tracing::debug!(
                envelope_id = current.id(),
                causation_id = causation.as_str(),
                "causal predecessor not found"
            );
            break;
        };
        if !seen.insert(parent.id()) {
            tracing::debug!(envelope_id = parent.id(), "causal cycle detected");
            break;
        }
        chain.push(parent);
        current = parent;
    }

    chain.reverse();
    chain
}
