/// Domain separator for transfer events (mint and burn included)
pub const DOM_TRANSFER: &[u8; 32] = b"NIFTY_TRANSFER_EVENT____________";

/// Domain separator for single-token approval events
pub const DOM_APPROVAL: &[u8; 32] = b"NIFTY_APPROVAL_EVENT____________";

/// Domain separator for operator approval events
pub const DOM_OPERATOR: &[u8; 32] = b"NIFTY_OPERATOR_EVENT____________";

/// Domain separator for minter whitelist events
pub const DOM_MINTER: &[u8; 32] = b"NIFTY_MINTER_EVENT______________";

/// Domain separator for chaining the event log digest
pub const DOM_LOG: &[u8; 32] = b"NIFTY_EVENT_LOG_________________";

/// Domain separator for deterministic development accounts
pub const DOM_DEV_ACCOUNT: &[u8; 32] = b"NIFTY_DEV_ACCOUNT_______________";
