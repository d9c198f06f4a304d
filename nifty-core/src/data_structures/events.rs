use serde::{Deserialize, Serialize};

use crate::crypto::{
    chain_digest, digest_with_domain, DOM_APPROVAL, DOM_LOG, DOM_MINTER, DOM_OPERATOR, DOM_TRANSFER,
};
use crate::types::*;

/// State change emitted by a collection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectionEvent {
    /// Ownership change; `from` is null on mint, `to` is null on burn
    Transfer {
        from: Address,
        to: Address,
        token_id: TokenId,
    },

    /// Single-token approval; `approved` is null when cleared
    Approval {
        owner: Address,
        approved: Address,
        token_id: TokenId,
    },

    /// Operator approval over all of an owner's tokens
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },

    /// Minter whitelist change made by the deployer
    MinterUpdated { account: Address, allowed: bool },
}

impl CollectionEvent {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            CollectionEvent::Transfer { from, .. } if from.is_zero() => TransactionType::Mint,
            CollectionEvent::Transfer { to, .. } if to.is_zero() => TransactionType::Burn,
            CollectionEvent::Transfer { .. } => TransactionType::Transfer,
            CollectionEvent::Approval { .. } => TransactionType::Approval,
            CollectionEvent::ApprovalForAll { .. } => TransactionType::ApprovalForAll,
            CollectionEvent::MinterUpdated { .. } => TransactionType::MinterUpdate,
        }
    }

    /// Token this event concerns, if any
    pub fn token_id(&self) -> Option<TokenId> {
        match self {
            CollectionEvent::Transfer { token_id, .. } => Some(*token_id),
            CollectionEvent::Approval { token_id, .. } => Some(*token_id),
            CollectionEvent::ApprovalForAll { .. } | CollectionEvent::MinterUpdated { .. } => None,
        }
    }

    /// Compute hash of this event
    pub fn hash(&self) -> Digest {
        let mut input = Vec::with_capacity(48);
        match self {
            CollectionEvent::Transfer { from, to, token_id } => {
                input.extend_from_slice(from.as_bytes());
                input.extend_from_slice(to.as_bytes());
                input.extend_from_slice(&token_id.to_le_bytes());
                digest_with_domain(DOM_TRANSFER, &input)
            }
            CollectionEvent::Approval { owner, approved, token_id } => {
                input.extend_from_slice(owner.as_bytes());
                input.extend_from_slice(approved.as_bytes());
                input.extend_from_slice(&token_id.to_le_bytes());
                digest_with_domain(DOM_APPROVAL, &input)
            }
            CollectionEvent::ApprovalForAll { owner, operator, approved } => {
                input.extend_from_slice(owner.as_bytes());
                input.extend_from_slice(operator.as_bytes());
                input.push(*approved as u8);
                digest_with_domain(DOM_OPERATOR, &input)
            }
            CollectionEvent::MinterUpdated { account, allowed } => {
                input.extend_from_slice(account.as_bytes());
                input.push(*allowed as u8);
                digest_with_domain(DOM_MINTER, &input)
            }
        }
    }
}

/// Append-only event log with a running digest
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<CollectionEvent>,
    digest: Digest,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CollectionEvent) {
        self.digest = chain_digest(DOM_LOG, &self.digest, &event.hash());
        self.events.push(event);
    }

    /// Running digest; all zeroes for an empty log
    pub fn digest(&self) -> Digest {
        self.digest
    }

    pub fn events(&self) -> &[CollectionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn for_token(&self, token_id: TokenId) -> Vec<&CollectionEvent> {
        self.events
            .iter()
            .filter(|e| e.token_id() == Some(token_id))
            .collect()
    }
}
