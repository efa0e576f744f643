use crate::core::addresses::{
    derive_clearing_house_state_address, derive_user_account_address, ProgramAddress,
};
use crate::core::connection::RpcConnection;
use crate::error::{DriftSdkError, Result};
use crate::types::{ClearingHouseState, Market, Markets, UserAccount, UserPositionsAccount};
use crate::utils;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::{debug, info};

/// Read access to the upstream clearing house.
///
/// Program-wide state and markets come from a subscription snapshot;
/// per-user accounts are always read fresh from the ledger.
#[async_trait]
pub trait ClearingHouse: Send + Sync {
    fn is_subscribed(&self) -> bool;

    fn program_id(&self) -> Pubkey;

    fn state_public_key(&self) -> Result<Pubkey> {
        Ok(derive_clearing_house_state_address(&self.program_id())?.address)
    }

    fn state_account(&self) -> Result<&ClearingHouseState>;

    /// Fails with `MarketNotFound` for indexes outside the markets table
    fn market(&self, market_index: u64) -> Result<&Market>;

    fn user_account_public_key_and_nonce(&self, authority: &Pubkey) -> Result<ProgramAddress> {
        derive_user_account_address(&self.program_id(), authority)
    }

    async fn fetch_user_account(&self, address: &Pubkey) -> Result<UserAccount>;

    async fn fetch_user_positions_account(&self, address: &Pubkey) -> Result<UserPositionsAccount>;
}

#[derive(Debug, Clone)]
struct Snapshot {
    state_public_key: Pubkey,
    state: ClearingHouseState,
    markets: Markets,
}

/// `ClearingHouse` backed by an `RpcConnection`, snapshotting state and
/// markets on `subscribe`.
pub struct SubscribedClearingHouse<C: ?Sized> {
    connection: Arc<C>,
    program_id: Pubkey,
    snapshot: Option<Snapshot>,
}

impl<C: RpcConnection + ?Sized> SubscribedClearingHouse<C> {
    pub fn new(connection: Arc<C>, program_id: Pubkey) -> Self {
        Self {
            connection,
            program_id,
            snapshot: None,
        }
    }

    pub async fn subscribe(&mut self) -> Result<()> {
        let state_public_key = derive_clearing_house_state_address(&self.program_id)?.address;
        let state: ClearingHouseState =
            utils::fetch_account(&*self.connection, &state_public_key).await?;
        let markets: Markets = utils::fetch_account(&*self.connection, &state.markets).await?;

        info!(
            program_id = %self.program_id,
            state = %state_public_key,
            initialized_markets = markets.markets.iter().filter(|m| m.is_initialized()).count(),
            "subscribed to clearing house"
        );

        self.snapshot = Some(Snapshot {
            state_public_key,
            state,
            markets,
        });
        Ok(())
    }

    /// Re-read state and markets; requires an active subscription
    pub async fn refresh(&mut self) -> Result<()> {
        if self.snapshot.is_none() {
            return Err(DriftSdkError::NotSubscribed);
        }
        self.subscribe().await
    }

    pub fn unsubscribe(&mut self) {
        if self.snapshot.take().is_some() {
            info!(program_id = %self.program_id, "unsubscribed from clearing house");
        }
    }

    pub fn markets(&self) -> Result<&Markets> {
        Ok(&self.snapshot()?.markets)
    }

    fn snapshot(&self) -> Result<&Snapshot> {
        self.snapshot.as_ref().ok_or(DriftSdkError::NotSubscribed)
    }
}

#[async_trait]
impl<C: RpcConnection + ?Sized> ClearingHouse for SubscribedClearingHouse<C> {
    fn is_subscribed(&self) -> bool {
        self.snapshot.is_some()
    }

    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn state_public_key(&self) -> Result<Pubkey> {
        match &self.snapshot {
            Some(snapshot) => Ok(snapshot.state_public_key),
            None => Ok(derive_clearing_house_state_address(&self.program_id)?.address),
        }
    }

    fn state_account(&self) -> Result<&ClearingHouseState> {
        Ok(&self.snapshot()?.state)
    }

    fn market(&self, market_index: u64) -> Result<&Market> {
        self.snapshot()?
            .markets
            .get(market_index)
            .ok_or(DriftSdkError::MarketNotFound(market_index))
    }

    async fn fetch_user_account(&self, address: &Pubkey) -> Result<UserAccount> {
        debug!(user = %address, "fetching clearing house user");
        utils::fetch_account(&*self.connection, address).await
    }

    async fn fetch_user_positions_account(&self, address: &Pubkey) -> Result<UserPositionsAccount> {
        debug!(positions = %address, "fetching clearing house user positions");
        utils::fetch_account(&*self.connection, address).await
    }
}
