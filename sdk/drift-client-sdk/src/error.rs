use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// SDK-specific error types for drift client operations
#[derive(Debug, Error)]
pub enum DriftSdkError {
    /// The clearing house client has no live account subscription
    #[error("Clearing house client must be subscribed")]
    NotSubscribed,

    /// Account not found on-chain
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// No nonce produced an off-curve address for the seed path
    #[error("Address derivation exhausted for program {program_id}")]
    DerivationExhausted { program_id: Pubkey },

    /// The ledger rejected the submitted transaction
    #[error("Remote invocation rejected: {0}")]
    RemoteInvocationRejected(String),

    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Market index not present in the subscribed markets table
    #[error("Market {0} not found")]
    MarketNotFound(u64),

    /// Assembled invocation is internally inconsistent
    #[error("Invalid invocation: {0}")]
    InvalidInvocation(String),

    /// Signer refused or failed to sign
    #[error("Signing error: {0}")]
    Signing(String),

    /// Client configuration could not be parsed
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),
}

impl From<drift_client_interface::AccountDataError> for DriftSdkError {
    fn from(e: drift_client_interface::AccountDataError) -> Self {
        DriftSdkError::InvalidAccountData(e.to_string())
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, DriftSdkError>;
