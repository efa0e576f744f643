use crate::advanced::builders::OptionalAccountsBuilder;
use crate::advanced::descriptor::InvocationDescriptor;
use crate::advanced::instructions;
use crate::basic::clearing_house::ClearingHouse;
use crate::core::addresses::{DerivedAddresses, ProgramAddress};
use crate::core::config::ClientConfig;
use crate::core::connection::{RpcConnection, TransportError};
use crate::core::constants::POSITION_SLOT;
use crate::core::signer::ClientSigner;
use crate::error::{DriftSdkError, Result};
use crate::types::{Config, MarketPosition, PositionDirection, UserAccount, UserPositionsAccount};
use crate::utils;
use drift_client_interface::accounts::{DepositCollateral, ManagePosition, WithdrawCollateral};
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use std::sync::Arc;
use tracing::{debug, info};

/// Facade over the drift client program.
///
/// Holds the transport, the paying signer and a subscribed clearing house,
/// and derives the drift client's own addresses once at construction.
pub struct DriftClient<C: ?Sized, S: ?Sized, H: ?Sized> {
    program_id: Pubkey,
    connection: Arc<C>,
    signer: Arc<S>,
    clearing_house: Arc<H>,
    addresses: DerivedAddresses,
}

impl<C: ?Sized, S: ?Sized, H: ?Sized> std::fmt::Debug for DriftClient<C, S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriftClient")
            .field("program_id", &self.program_id)
            .field("addresses", &self.addresses)
            .finish_non_exhaustive()
    }
}

impl<C, S, H> DriftClient<C, S, H>
where
    C: RpcConnection + ?Sized,
    S: ClientSigner + ?Sized,
    H: ClearingHouse + ?Sized,
{
    /// Fails with `NotSubscribed` before deriving anything if the clearing
    /// house has no live subscription.
    pub fn new(
        config: ClientConfig,
        connection: Arc<C>,
        signer: Arc<S>,
        clearing_house: Arc<H>,
    ) -> Result<Self> {
        if !clearing_house.is_subscribed() {
            return Err(DriftSdkError::NotSubscribed);
        }

        let addresses = DerivedAddresses::derive(&config.program_id, &clearing_house.program_id())?;
        debug!(
            program_id = %config.program_id,
            config = %addresses.config.address,
            collateral_vault = %addresses.collateral_vault.address,
            authority = %addresses.authority.address,
            "drift client addresses derived"
        );

        Ok(Self {
            program_id: config.program_id,
            connection,
            signer,
            clearing_house,
            addresses,
        })
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn addresses(&self) -> &DerivedAddresses {
        &self.addresses
    }

    pub fn clearing_house(&self) -> &Arc<H> {
        &self.clearing_house
    }

    //=========================================================================
    // Addresses
    //=========================================================================

    pub fn config_public_key(&self) -> Pubkey {
        self.addresses.config.address
    }

    pub fn collateral_vault_public_key(&self) -> Pubkey {
        self.addresses.collateral_vault.address
    }

    pub fn collateral_vault_authority_public_key(&self) -> Pubkey {
        self.addresses.collateral_vault_authority.address
    }

    pub fn authority_public_key(&self) -> Pubkey {
        self.addresses.authority.address
    }

    /// Clearing house user registered under the delegated authority
    pub fn user_account_public_key(&self) -> Result<Pubkey> {
        Ok(self.user_account_public_key_and_nonce()?.address)
    }

    fn user_account_public_key_and_nonce(&self) -> Result<ProgramAddress> {
        self.clearing_house
            .user_account_public_key_and_nonce(&self.addresses.authority.address)
    }

    //=========================================================================
    // Account readers (always read from the ledger)
    //=========================================================================

    pub async fn get_config(&self) -> Result<Config> {
        utils::fetch_account(&*self.connection, &self.addresses.config.address).await
    }

    pub async fn get_user_account(&self) -> Result<UserAccount> {
        let user = self.user_account_public_key()?;
        self.clearing_house.fetch_user_account(&user).await
    }

    pub async fn get_user_positions_account(&self) -> Result<UserPositionsAccount> {
        let user = self.get_user_account().await?;
        self.clearing_house
            .fetch_user_positions_account(&user.positions)
            .await
    }

    /// Position in the slot single-position flows trade through
    pub async fn get_position(&self) -> Result<MarketPosition> {
        let positions = self.get_user_positions_account().await?;
        Ok(positions.positions[POSITION_SLOT])
    }

    /// Balance of an SPL token account
    pub async fn get_token_balance(&self, token_account: &Pubkey) -> Result<u64> {
        utils::fetch_token_balance(&*self.connection, token_account).await
    }

    //=========================================================================
    // Operations
    //=========================================================================

    /// Create the config singleton and collateral vault. Not idempotent.
    pub async fn initialize(&self) -> Result<Signature> {
        let clearing_house_state = self.clearing_house.state_public_key()?;
        let collateral_mint = self.clearing_house.state_account()?.collateral_mint;

        debug!(
            config = %self.addresses.config.address,
            config_nonce = self.addresses.config.nonce,
            collateral_vault = %self.addresses.collateral_vault.address,
            collateral_vault_nonce = self.addresses.collateral_vault.nonce,
            %collateral_mint,
            "initializing drift client"
        );

        let descriptor = instructions::initialize(
            &self.program_id,
            &self.signer.pubkey(),
            &self.addresses,
            &clearing_house_state,
            &collateral_mint,
        );
        self.submit(descriptor, &[]).await
    }

    /// Create the clearing house user with a fresh positions table.
    pub async fn initialize_user(&self) -> Result<Signature> {
        let user = self.user_account_public_key_and_nonce()?;
        let positions = Keypair::new();

        debug!(
            user = %user.address,
            user_nonce = user.nonce,
            positions = %Signer::pubkey(&positions),
            "initializing clearing house user"
        );

        let descriptor = instructions::initialize_user(
            &self.program_id,
            &self.signer.pubkey(),
            &self.addresses,
            &self.clearing_house.state_public_key()?,
            &user,
            &Signer::pubkey(&positions),
            &self.clearing_house.program_id(),
        );
        self.submit(descriptor, &[&positions]).await
    }

    /// Move `amount` from `collateral_account` into the clearing house.
    pub async fn deposit_collateral(
        &self,
        amount: u64,
        collateral_account: &Pubkey,
    ) -> Result<Signature> {
        let accounts = self.collateral_accounts(collateral_account).await?;
        debug!(amount, source = %collateral_account, "depositing collateral");

        let descriptor = instructions::deposit_collateral(&self.program_id, amount, &accounts);
        self.submit(descriptor, &[]).await
    }

    /// Move `amount` out of the clearing house into `collateral_account`.
    pub async fn withdraw_collateral(
        &self,
        amount: u64,
        collateral_account: &Pubkey,
    ) -> Result<Signature> {
        let deposit = self.collateral_accounts(collateral_account).await?;
        let state = self.clearing_house.state_account()?;
        let accounts = WithdrawCollateral {
            deposit,
            clearing_house_collateral_vault_authority: state.collateral_vault_authority,
            clearing_house_insurance_vault: state.insurance_vault,
            clearing_house_insurance_vault_authority: state.insurance_vault_authority,
        };
        debug!(amount, destination = %collateral_account, "withdrawing collateral");

        let descriptor = instructions::withdraw_collateral(&self.program_id, amount, &accounts);
        self.submit(descriptor, &[]).await
    }

    pub async fn open_position(
        &self,
        direction: PositionDirection,
        quote_asset_amount: u128,
        market_index: u64,
        limit_price: Option<u128>,
        discount_token: Option<Pubkey>,
        referrer: Option<Pubkey>,
    ) -> Result<Signature> {
        let accounts = self.position_accounts(market_index).await?;
        let optional = OptionalAccountsBuilder::new()
            .with_discount_token(discount_token)
            .with_referrer(referrer)
            .build();

        debug!(
            ?direction,
            %quote_asset_amount,
            market_index,
            ?limit_price,
            oracle = %accounts.oracle,
            optional_accounts = optional.tail.len(),
            "opening position"
        );

        let descriptor = instructions::open_position(
            &self.program_id,
            direction,
            quote_asset_amount,
            market_index,
            limit_price,
            &accounts,
            optional,
        );
        self.submit(descriptor, &[]).await
    }

    pub async fn close_position(
        &self,
        market_index: u64,
        discount_token: Option<Pubkey>,
        referrer: Option<Pubkey>,
    ) -> Result<Signature> {
        let accounts = self.position_accounts(market_index).await?;
        let optional = OptionalAccountsBuilder::new()
            .with_discount_token(discount_token)
            .with_referrer(referrer)
            .build();

        debug!(
            market_index,
            optional_accounts = optional.tail.len(),
            "closing position"
        );

        let descriptor =
            instructions::close_position(&self.program_id, market_index, &accounts, optional);
        self.submit(descriptor, &[]).await
    }

    //=========================================================================
    // Internals
    //=========================================================================

    async fn collateral_accounts(&self, collateral_account: &Pubkey) -> Result<DepositCollateral> {
        let user_address = self.user_account_public_key()?;
        let user = self.clearing_house.fetch_user_account(&user_address).await?;
        let state = self.clearing_house.state_account()?;

        Ok(DepositCollateral {
            admin: self.signer.pubkey(),
            admin_collateral_account: *collateral_account,
            config: self.addresses.config.address,
            collateral_vault: self.addresses.collateral_vault.address,
            authority: self.addresses.authority.address,
            clearing_house_state: self.clearing_house.state_public_key()?,
            clearing_house_user: user_address,
            clearing_house_collateral_vault: state.collateral_vault,
            clearing_house_markets: state.markets,
            clearing_house_user_positions: user.positions,
            clearing_house_funding_payment_history: state.funding_payment_history,
            clearing_house_deposit_history: state.deposit_history,
            clearing_house_program: self.clearing_house.program_id(),
        })
    }

    async fn position_accounts(&self, market_index: u64) -> Result<ManagePosition> {
        let oracle = self.clearing_house.market(market_index)?.oracle();
        let user_address = self.user_account_public_key()?;
        let user = self.clearing_house.fetch_user_account(&user_address).await?;
        let state = self.clearing_house.state_account()?;

        Ok(ManagePosition {
            admin: self.signer.pubkey(),
            config: self.addresses.config.address,
            authority: self.addresses.authority.address,
            clearing_house_state: self.clearing_house.state_public_key()?,
            clearing_house_user: user_address,
            clearing_house_markets: state.markets,
            oracle,
            clearing_house_user_positions: user.positions,
            clearing_house_funding_payment_history: state.funding_payment_history,
            clearing_house_funding_rate_history: state.funding_rate_history,
            clearing_house_trade_history: state.trade_history,
            clearing_house_program: self.clearing_house.program_id(),
        })
    }

    /// Wrap the descriptor in a transaction paid for by the signer, collect
    /// co-signatures, and submit. Ledger rejections are surfaced verbatim as
    /// `RemoteInvocationRejected`; a `TransportError` from the connection
    /// becomes `Connection`.
    async fn submit(
        &self,
        descriptor: InvocationDescriptor,
        co_signers: &[&Keypair],
    ) -> Result<Signature> {
        let method = descriptor.method();
        let instruction = descriptor.into_instruction()?;
        let payer = self.signer.pubkey();

        let blockhash = self
            .connection
            .get_latest_blockhash()
            .await
            .map_err(|e| DriftSdkError::Connection(e.to_string()))?;

        let message = Message::new_with_blockhash(&[instruction], Some(&payer), &blockhash);
        let mut tx = Transaction::new_unsigned(message);

        if !co_signers.is_empty() {
            tx.try_partial_sign(co_signers, blockhash)
                .map_err(|e| DriftSdkError::Signing(e.to_string()))?;
        }

        let payer_signature = self
            .signer
            .sign_message(&tx.message_data())
            .await
            .map_err(DriftSdkError::Signing)?;
        let payer_index = tx
            .get_signing_keypair_positions(&[payer])
            .map_err(|e| DriftSdkError::Signing(e.to_string()))?
            .first()
            .copied()
            .flatten()
            .ok_or_else(|| DriftSdkError::Signing(format!("{} is not a signer", payer)))?;
        tx.signatures[payer_index] = payer_signature;

        let signature = self
            .connection
            .send_transaction(&tx)
            .await
            .map_err(|e| match e.downcast_ref::<TransportError>() {
                Some(transport) => DriftSdkError::Connection(transport.to_string()),
                None => DriftSdkError::RemoteInvocationRejected(e.to_string()),
            })?;

        info!(method, %signature, "invocation submitted");
        Ok(signature)
    }
}
