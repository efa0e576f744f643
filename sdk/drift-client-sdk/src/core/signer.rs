use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

/// Abstraction for the identity that pays for and signs every invocation.
/// This allows the SDK to work with:
/// 1. Local Keypairs (Backend/CLI)
/// 2. Remote or hardware signers that only expose message signing
#[async_trait]
pub trait ClientSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign a serialized transaction message.
    /// Returns Err if the signer refuses or fails.
    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String>;
}

#[async_trait]
impl ClientSigner for Keypair {
    fn pubkey(&self) -> Pubkey {
        Signer::pubkey(self)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String> {
        Signer::try_sign_message(self, message).map_err(|e| e.to_string())
    }
}
