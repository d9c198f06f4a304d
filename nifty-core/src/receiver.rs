use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::types::*;

/// Hook run when a token is safely transferred or minted to a contract
/// address. Returning `false` rejects the token and reverts the operation.
pub trait TokenReceiver: Send + Sync {
    fn on_received(&self, operator: Address, from: Address, token_id: TokenId, data: &[u8]) -> bool;
}

/// Accepts every token
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl TokenReceiver for AcceptAll {
    fn on_received(&self, _operator: Address, _from: Address, _token_id: TokenId, _data: &[u8]) -> bool {
        true
    }
}

/// Rejects every token
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectAll;

impl TokenReceiver for RejectAll {
    fn on_received(&self, _operator: Address, _from: Address, _token_id: TokenId, _data: &[u8]) -> bool {
        false
    }
}

/// Single hook invocation seen by a `RecordingReceiver`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivedToken {
    pub operator: Address,
    pub from: Address,
    pub token_id: TokenId,
    pub data: Vec<u8>,
}

/// Accepts tokens and remembers every call
#[derive(Debug, Default)]
pub struct RecordingReceiver {
    received: Mutex<Vec<ReceivedToken>>,
}

impl RecordingReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<ReceivedToken> {
        match self.received.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TokenReceiver for RecordingReceiver {
    fn on_received(&self, operator: Address, from: Address, token_id: TokenId, data: &[u8]) -> bool {
        let entry = ReceivedToken {
            operator,
            from,
            token_id,
            data: data.to_vec(),
        };
        match self.received.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
        true
    }
}

/// Addresses registered as contracts, each with its receiver hook
#[derive(Clone, Default)]
pub struct ReceiverRegistry {
    hooks: HashMap<Address, Arc<dyn TokenReceiver>>,
}

impl ReceiverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, address: Address, hook: Arc<dyn TokenReceiver>) {
        self.hooks.insert(address, hook);
    }

    pub fn unregister(&mut self, address: &Address) -> bool {
        self.hooks.remove(address).is_some()
    }

    pub fn is_contract(&self, address: &Address) -> bool {
        self.hooks.contains_key(address)
    }

    /// Run the hook for `to`. Plain accounts always accept.
    pub fn check(
        &self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
        data: &[u8],
    ) -> bool {
        match self.hooks.get(&to) {
            Some(hook) => hook.on_received(operator, from, token_id, data),
            None => true,
        }
    }
}

impl fmt::Debug for ReceiverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverRegistry")
            .field("contracts", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}
