use async_trait::async_trait;
use solana_client::client_error::ClientErrorKind;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::error::Error;
use thiserror::Error;

/// The transaction never reached the ledger.
///
/// `send_transaction` implementations return this (boxed) for transport
/// failures. Any other error is read as a rejection by the ledger.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Ledger transport the client reads accounts from and submits through.
///
/// `send_transaction` resolves once the ledger has accepted or rejected the
/// transaction; failures come back as `Err` and are not retried.
#[async_trait]
pub trait RpcConnection: Send + Sync {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>>;
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>>;
    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>>;
}

#[async_trait]
impl RpcConnection for RpcClient {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>> {
        self.send_and_confirm_transaction(tx)
            .await
            .map_err(|e| -> Box<dyn Error + Send + Sync> {
                match e.kind() {
                    ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
                        Box::new(TransportError(e.to_string()))
                    },
                    _ => Box::new(e),
                }
            })
    }

    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        Ok(self
            .get_account_with_commitment(pubkey, self.commitment())
            .await?
            .value)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>> {
        Ok(RpcClient::get_latest_blockhash(self).await?)
    }
}
