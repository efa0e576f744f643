use async_trait::async_trait;
use drift_client_interface::clearing_house::{
    Amm, Market, MarketPosition, Markets, State, User, UserPositions,
};
use drift_client_interface::{
    AccountData, Config, DriftClientInstruction, PositionDirection, CLEARING_HOUSE_ID,
    TOKEN_PROGRAM_ID,
};
use drift_client_sdk::core::addresses::derive_clearing_house_state_address;
use drift_client_sdk::{
    ClientConfig, DriftClient, RpcConnection, SubscribedClearingHouse, TransportError,
};
use solana_sdk::{
    account::Account,
    hash::Hash,
    instruction::CompiledInstruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type Accounts = HashMap<Pubkey, Account>;

pub const TOKEN_ACCOUNT_LEN: usize = 165;
pub const MARKET_INDEX: u64 = 0;
pub const UNINITIALIZED_MARKET_INDEX: u64 = 1;

const ALREADY_IN_USE: &str = "already in use";
const INVALID_AUTHORITY: &str = "custom program error: 0x1770";
const HAS_ONE_VIOLATION: &str = "custom program error: 0x7d1";
const INSUFFICIENT_FUNDS: &str = "custom program error: 0x1";

/// In-memory ledger emulating the drift client program's observable
/// effects on the accounts it touches. Transactions apply atomically.
pub struct MockLedger {
    program_id: Pubkey,
    blockhash: Hash,
    accounts: Mutex<Accounts>,
    submitted: Mutex<Vec<Transaction>>,
    drop_next_send: AtomicBool,
}

impl MockLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            blockhash: Hash::new_unique(),
            accounts: Mutex::new(HashMap::new()),
            submitted: Mutex::new(Vec::new()),
            drop_next_send: AtomicBool::new(false),
        }
    }

    /// Lose the next transaction in transit, before the ledger sees it
    pub fn drop_next_send(&self) {
        self.drop_next_send.store(true, Ordering::SeqCst);
    }

    pub async fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().await.insert(address, account);
    }

    pub async fn account(&self, address: &Pubkey) -> Option<Account> {
        self.accounts.lock().await.get(address).cloned()
    }

    /// Every transaction handed to `send_transaction`, rejected ones included
    pub async fn submitted(&self) -> Vec<Transaction> {
        self.submitted.lock().await.clone()
    }

    pub async fn last_submitted(&self) -> Transaction {
        self.submitted
            .lock()
            .await
            .last()
            .cloned()
            .expect("no transaction submitted")
    }

    pub async fn create_token_account(&self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Pubkey {
        let address = Pubkey::new_unique();
        self.set_account(address, token_account(mint, owner, amount))
            .await;
        address
    }

    pub async fn token_balance(&self, address: &Pubkey) -> u64 {
        let account = self.account(address).await.expect("token account missing");
        token_amount(&account.data).expect("not a token account")
    }

    fn process(
        &self,
        accounts: &mut Accounts,
        instruction: DriftClientInstruction,
        keys: &[Pubkey],
        signed: &[bool],
    ) -> Result<(), String> {
        if !signed.first().copied().unwrap_or(false) {
            return Err("missing required signature for instruction".to_string());
        }

        match instruction {
            DriftClientInstruction::Initialize(args) => {
                let expected_config =
                    Pubkey::create_program_address(&[b"drift_client", &[args.config_nonce]], &self.program_id)
                        .map_err(|e| e.to_string())?;
                if keys[1] != expected_config {
                    return Err("invalid config seeds".to_string());
                }
                if accounts.contains_key(&keys[1]) {
                    return Err(format!("account {} {}", keys[1], ALREADY_IN_USE));
                }

                let (authority, authority_nonce) =
                    Pubkey::find_program_address(&[CLEARING_HOUSE_ID.as_ref()], &self.program_id);
                if keys[4] != authority {
                    return Err(INVALID_AUTHORITY.to_string());
                }

                let state: State = read(accounts, &keys[5])?;
                if keys[2] != state.collateral_mint {
                    return Err("collateral mint mismatch".to_string());
                }

                let (vault_authority, _) =
                    Pubkey::find_program_address(&[keys[3].as_ref()], &self.program_id);
                accounts.insert(keys[3], token_account(&keys[2], &vault_authority, 0));

                let config = Config {
                    admin: keys[0],
                    collateral_vault: keys[3],
                    authority,
                    authority_nonce,
                    ..Config::default()
                };
                write(accounts, &keys[1], &self.program_id, &config)
            },

            DriftClientInstruction::InitializeUser(args) => {
                if !signed[4] {
                    return Err("missing required signature for instruction".to_string());
                }

                let mut config: Config = read(accounts, &keys[1])?;
                if config.admin != keys[0] {
                    return Err(HAS_ONE_VIOLATION.to_string());
                }

                let expected_user = Pubkey::create_program_address(
                    &[b"user", keys[5].as_ref(), &[args.user_nonce]],
                    &CLEARING_HOUSE_ID,
                )
                .map_err(|e| e.to_string())?;
                if keys[3] != expected_user {
                    return Err("invalid user seeds".to_string());
                }
                for key in [&keys[3], &keys[4]] {
                    if accounts.contains_key(key) {
                        return Err(format!("account {} {}", key, ALREADY_IN_USE));
                    }
                }

                let user = User {
                    authority: keys[5],
                    positions: keys[4],
                    ..User::default()
                };
                let positions = UserPositions {
                    user: keys[3],
                    ..UserPositions::default()
                };
                write(accounts, &keys[3], &CLEARING_HOUSE_ID, &user)?;
                write(accounts, &keys[4], &CLEARING_HOUSE_ID, &positions)?;

                config.clearing_house_user = keys[3];
                config.clearing_house_user_positions = keys[4];
                write(accounts, &keys[1], &self.program_id, &config)
            },

            DriftClientInstruction::DepositCollateral(args) => {
                let mut user = self.check_collateral_accounts(accounts, keys, 10)?;
                transfer(accounts, &keys[1], &keys[7], args.amount)?;

                user.collateral += args.amount as u128;
                user.cumulative_deposits += args.amount as i128;
                write(accounts, &keys[6], &CLEARING_HOUSE_ID, &user)
            },

            DriftClientInstruction::WithdrawCollateral(args) => {
                let mut user = self.check_collateral_accounts(accounts, keys, 13)?;
                let state: State = read(accounts, &keys[5])?;
                if keys[8] != state.collateral_vault_authority
                    || keys[9] != state.insurance_vault
                    || keys[10] != state.insurance_vault_authority
                {
                    return Err("vault accounts mismatch".to_string());
                }
                if user.collateral < args.amount as u128 {
                    return Err("insufficient collateral".to_string());
                }
                transfer(accounts, &keys[7], &keys[1], args.amount)?;

                user.collateral -= args.amount as u128;
                user.cumulative_deposits -= args.amount as i128;
                write(accounts, &keys[6], &CLEARING_HOUSE_ID, &user)
            },

            DriftClientInstruction::OpenPosition(args) => {
                let mut positions = self.check_position_accounts(
                    accounts,
                    keys,
                    args.market_index,
                    args.optional_accounts.enabled_count(),
                )?;

                let slot = &mut positions.positions[0];
                if slot.is_open() && slot.market_index() != args.market_index {
                    return Err("position slot occupied".to_string());
                }
                let size = args.quote_asset_amount as i128;
                slot.market_index = args.market_index;
                slot.quote_asset_amount = slot.quote_asset_amount() + args.quote_asset_amount;
                slot.base_asset_amount = slot.base_asset_amount()
                    + match args.direction {
                        PositionDirection::Long => size,
                        PositionDirection::Short => -size,
                    };
                write(accounts, &keys[7], &CLEARING_HOUSE_ID, &positions)
            },

            DriftClientInstruction::ClosePosition(args) => {
                let mut positions = self.check_position_accounts(
                    accounts,
                    keys,
                    args.market_index,
                    args.optional_accounts.enabled_count(),
                )?;

                let slot = &mut positions.positions[0];
                if !slot.is_open() || slot.market_index() != args.market_index {
                    return Err("no open position for market".to_string());
                }
                *slot = MarketPosition::default();
                write(accounts, &keys[7], &CLEARING_HOUSE_ID, &positions)
            },
        }
    }

    /// Shared deposit/withdraw constraints; returns the user to update
    fn check_collateral_accounts(
        &self,
        accounts: &Accounts,
        keys: &[Pubkey],
        positions_index: usize,
    ) -> Result<User, String> {
        let config: Config = read(accounts, &keys[2])?;
        if config.admin != keys[0] || config.clearing_house_user != keys[6] {
            return Err(HAS_ONE_VIOLATION.to_string());
        }

        let state: State = read(accounts, &keys[5])?;
        if keys[7] != state.collateral_vault {
            return Err("clearing house vault mismatch".to_string());
        }

        let user: User = read(accounts, &keys[6])?;
        if user.positions != keys[positions_index] {
            return Err("user positions mismatch".to_string());
        }
        Ok(user)
    }

    fn check_position_accounts(
        &self,
        accounts: &Accounts,
        keys: &[Pubkey],
        market_index: u64,
        optional_accounts: usize,
    ) -> Result<UserPositions, String> {
        if keys.len() != 12 + optional_accounts {
            return Err(format!(
                "expected {} optional accounts, got {}",
                optional_accounts,
                keys.len().saturating_sub(12)
            ));
        }

        let config: Config = read(accounts, &keys[1])?;
        if config.admin != keys[0] || config.clearing_house_user != keys[4] {
            return Err(HAS_ONE_VIOLATION.to_string());
        }

        let markets: Markets = read(accounts, &keys[5])?;
        let market = markets
            .get(market_index)
            .ok_or_else(|| format!("market {} not initialized", market_index))?;
        if market.oracle() != keys[6] {
            return Err("invalid oracle".to_string());
        }

        let user: User = read(accounts, &keys[4])?;
        if user.positions != keys[7] {
            return Err("user positions mismatch".to_string());
        }
        read(accounts, &keys[7])
    }
}

#[async_trait]
impl RpcConnection for MockLedger {
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, BoxError> {
        if self.drop_next_send.swap(false, Ordering::SeqCst) {
            return Err(Box::new(TransportError("connection reset by peer".to_string())));
        }
        self.submitted.lock().await.push(tx.clone());

        if tx.message.recent_blockhash != self.blockhash {
            return Err("Blockhash not found".into());
        }
        tx.verify()
            .map_err(|e| format!("signature verification failed: {}", e))?;

        let mut accounts = self.accounts.lock().await;
        let mut staged = accounts.clone();
        for compiled in &tx.message.instructions {
            let program_id = tx.message.account_keys[compiled.program_id_index as usize];
            if program_id != self.program_id {
                return Err(format!("unknown program {}", program_id).into());
            }

            let (keys, signed) = resolve_accounts(tx, compiled);
            let instruction =
                DriftClientInstruction::unpack(&compiled.data).map_err(|e| e.to_string())?;
            self.process(&mut staged, instruction, &keys, &signed)?;
        }
        *accounts = staged;

        Ok(tx.signatures[0])
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, BoxError> {
        Ok(self.account(pubkey).await)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, BoxError> {
        Ok(self.blockhash)
    }
}

/// Account keys and signer flags of a compiled instruction, in instruction order
pub fn resolve_accounts(tx: &Transaction, compiled: &CompiledInstruction) -> (Vec<Pubkey>, Vec<bool>) {
    compiled
        .accounts
        .iter()
        .map(|index| {
            let index = *index as usize;
            (tx.message.account_keys[index], tx.message.is_signer(index))
        })
        .unzip()
}

/// Decoded drift client instruction and its account keys
pub fn decode_single(tx: &Transaction) -> (DriftClientInstruction, Vec<Pubkey>) {
    let compiled = &tx.message.instructions[0];
    let (keys, _) = resolve_accounts(tx, compiled);
    (
        DriftClientInstruction::unpack(&compiled.data).expect("undecodable instruction"),
        keys,
    )
}

fn read<T: AccountData>(accounts: &Accounts, address: &Pubkey) -> Result<T, String> {
    let account = accounts
        .get(address)
        .ok_or_else(|| format!("account {} not found", address))?;
    T::try_from_account_data(&account.data).map_err(|e| e.to_string())
}

fn write<T: AccountData>(
    accounts: &mut Accounts,
    address: &Pubkey,
    owner: &Pubkey,
    value: &T,
) -> Result<(), String> {
    let data = value.to_account_data().map_err(|e| e.to_string())?;
    accounts.insert(*address, program_account(owner, data));
    Ok(())
}

fn transfer(accounts: &mut Accounts, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), String> {
    let source = token_amount_of(accounts, from)?;
    if source < amount {
        return Err(INSUFFICIENT_FUNDS.to_string());
    }
    let destination = token_amount_of(accounts, to)?;

    set_token_amount(accounts, from, source - amount);
    set_token_amount(accounts, to, destination + amount);
    Ok(())
}

fn token_amount_of(accounts: &Accounts, address: &Pubkey) -> Result<u64, String> {
    accounts
        .get(address)
        .and_then(|account| token_amount(&account.data))
        .ok_or_else(|| format!("token account {} not found", address))
}

fn set_token_amount(accounts: &mut Accounts, address: &Pubkey, amount: u64) {
    if let Some(account) = accounts.get_mut(address) {
        account.data[64..72].copy_from_slice(&amount.to_le_bytes());
    }
}

fn token_amount(data: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = data.get(64..72)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

pub fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    Account {
        lamports: 2_039_280,
        data,
        owner: TOKEN_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    }
}

fn program_account(owner: &Pubkey, mut data: Vec<u8>) -> Account {
    // Anchor allocations are padded past the body
    data.resize(data.len() + 64, 0);
    Account {
        lamports: 1_000_000,
        data,
        owner: *owner,
        executable: false,
        rent_epoch: 0,
    }
}

//=============================================================================
// Fixture
//=============================================================================

pub type TestClient = DriftClient<MockLedger, Keypair, SubscribedClearingHouse<MockLedger>>;

pub struct TestContext {
    pub ledger: Arc<MockLedger>,
    pub admin: Arc<Keypair>,
    pub state_public_key: Pubkey,
    pub state: State,
    pub oracle: Pubkey,
}

impl TestContext {
    pub async fn new() -> Self {
        let ledger = Arc::new(MockLedger::new(ClientConfig::default().program_id));
        let oracle = Pubkey::new_unique();

        let state = State {
            admin: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            collateral_vault: Pubkey::new_unique(),
            collateral_vault_authority: Pubkey::new_unique(),
            collateral_vault_nonce: 255,
            deposit_history: Pubkey::new_unique(),
            trade_history: Pubkey::new_unique(),
            funding_payment_history: Pubkey::new_unique(),
            funding_rate_history: Pubkey::new_unique(),
            liquidation_history: Pubkey::new_unique(),
            curve_history: Pubkey::new_unique(),
            insurance_vault: Pubkey::new_unique(),
            insurance_vault_authority: Pubkey::new_unique(),
            insurance_vault_nonce: 255,
            markets: Pubkey::new_unique(),
            ..State::default()
        };
        // Only MARKET_INDEX is listed; every other slot stays zeroed
        let mut markets = Markets::default();
        markets.markets[MARKET_INDEX as usize] = Market {
            initialized: 1,
            amm: Amm {
                oracle,
                base_asset_reserve: 1_000_000_000,
                quote_asset_reserve: 1_000_000_000,
                peg_multiplier: 1_000,
                ..Amm::default()
            },
            ..Market::default()
        };

        let state_public_key = derive_clearing_house_state_address(&CLEARING_HOUSE_ID)
            .unwrap()
            .address;
        {
            let mut accounts = ledger.accounts.lock().await;
            write(&mut accounts, &state_public_key, &CLEARING_HOUSE_ID, &state).unwrap();
            write(&mut accounts, &state.markets, &CLEARING_HOUSE_ID, &markets).unwrap();
            accounts.insert(
                state.collateral_vault,
                token_account(&state.collateral_mint, &state.collateral_vault_authority, 0),
            );
            accounts.insert(
                state.insurance_vault,
                token_account(&state.collateral_mint, &state.insurance_vault_authority, 0),
            );
        }

        Self {
            ledger,
            admin: Arc::new(Keypair::new()),
            state_public_key,
            state,
            oracle,
        }
    }

    pub fn admin_pubkey(&self) -> Pubkey {
        self.admin.pubkey()
    }

    pub async fn subscribed_clearing_house(&self) -> SubscribedClearingHouse<MockLedger> {
        let mut clearing_house = SubscribedClearingHouse::new(self.ledger.clone(), CLEARING_HOUSE_ID);
        clearing_house.subscribe().await.unwrap();
        clearing_house
    }

    pub async fn client(&self) -> TestClient {
        let clearing_house = self.subscribed_clearing_house().await;
        DriftClient::new(
            ClientConfig::default(),
            self.ledger.clone(),
            self.admin.clone(),
            Arc::new(clearing_house),
        )
        .unwrap()
    }

    /// Client with `initialize` and `initialize_user` already applied
    pub async fn initialized_client(&self) -> TestClient {
        let client = self.client().await;
        client.initialize().await.unwrap();
        client.initialize_user().await.unwrap();
        client
    }

    /// Admin-owned collateral token account
    pub async fn funded_collateral_account(&self, amount: u64) -> Pubkey {
        self.ledger
            .create_token_account(&self.state.collateral_mint, &self.admin_pubkey(), amount)
            .await
    }
}

pub async fn setup_test_context() -> TestContext {
    TestContext::new().await
}
