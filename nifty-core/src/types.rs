pub mod address_wrapper;
pub use address_wrapper::Address;

/// Token identifier within a collection
pub type TokenId = u64;

/// Number of tokens held by an account
pub type Balance = u64;

/// 32-byte digest over the event log
pub type Digest = [u8; 32];

/// Operation kinds recorded by the collection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionType {
    Mint,
    Burn,
    Transfer,
    Approval,
    ApprovalForAll,
    MinterUpdate,
}

/// Result type for Nifty operations
pub type NiftyResult<T> = Result<T, NiftyError>;

/// Error types for Nifty
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NiftyError {
    #[error("Invalid owner: {0}")]
    InvalidOwner(Address),

    #[error("Nonexistent token: {0}")]
    NonexistentToken(TokenId),

    #[error("Invalid receiver: {0}")]
    InvalidReceiver(Address),

    #[error("Insufficient approval: {caller} may not move token {token_id}")]
    InsufficientApproval { caller: Address, token_id: TokenId },

    #[error("Incorrect owner: {from} does not own token {token_id} (owner is {owner})")]
    IncorrectOwner {
        from: Address,
        token_id: TokenId,
        owner: Address,
    },

    #[error("Invalid approver: {0}")]
    InvalidApprover(Address),

    #[error("Approval to current owner of token {0}")]
    ApprovalToCurrentOwner(TokenId),

    #[error("Invalid operator: {0}")]
    InvalidOperator(Address),

    #[error("Index {index} out of bounds (length {len})")]
    OutOfBoundsIndex { index: usize, len: usize },

    #[error("Token id counter overflow")]
    CounterOverflow,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Not authorized to mint: {0}")]
    UnauthorizedMinter(Address),

    #[error("Only the deployer may manage minters, not {0}")]
    NotDeployer(Address),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NiftyError::NonexistentToken(7);
        assert_eq!(err.to_string(), "Nonexistent token: 7");

        let err = NiftyError::OutOfBoundsIndex { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Index 3 out of bounds (length 2)");

        let err = NiftyError::UnauthorizedMinter(Address::zero());
        assert_eq!(
            err.to_string(),
            "Not authorized to mint: 0x0000000000000000000000000000000000000000"
        );
    }
}
