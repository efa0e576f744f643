//! Clearing house account layouts.
//!
//! `State` and `User` are borsh accounts. `State` is mirrored as an in-order
//! prefix up to `markets`; the risk parameters after it are not read.
//! `Markets` and `UserPositions` are zero-copy accounts: the discriminator
//! is followed by the packed struct bytes, so every field is mirrored.
//!
//! Packed fields cannot be borrowed. Read them through the accessors or copy
//! them out first.

use crate::discriminator::{
    decode_borsh, decode_zero_copy, encode_borsh, encode_zero_copy, AccountData,
};
use crate::error::AccountDataError;
use crate::instruction::PositionDirection;
use borsh::{BorshDeserialize, BorshSerialize};
use bytemuck::{Pod, Zeroable};
use solana_program::pubkey::Pubkey;

/// Number of slots in the `Markets` table
pub const MARKETS_LEN: usize = 64;

/// Number of position slots in a `UserPositions` table
pub const USER_POSITIONS_LEN: usize = 5;

/// Program-wide clearing house state.
///
/// PDA Seeds: ["clearing_house"]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    pub admin: Pubkey,
    pub exchange_paused: bool,
    pub funding_paused: bool,
    pub admin_controls_prices: bool,
    pub collateral_mint: Pubkey,
    pub collateral_vault: Pubkey,
    pub collateral_vault_authority: Pubkey,
    pub collateral_vault_nonce: u8,
    pub deposit_history: Pubkey,
    pub trade_history: Pubkey,
    pub funding_payment_history: Pubkey,
    pub funding_rate_history: Pubkey,
    pub liquidation_history: Pubkey,
    pub curve_history: Pubkey,
    pub insurance_vault: Pubkey,
    pub insurance_vault_authority: Pubkey,
    pub insurance_vault_nonce: u8,
    pub markets: Pubkey,
}

impl AccountData for State {
    const NAME: &'static str = "State";

    fn decode_body(body: &[u8]) -> Result<Self, AccountDataError> {
        decode_borsh(Self::NAME, body)
    }

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
        encode_borsh(self, out)
    }
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Amm {
    /// Price oracle the market marks against
    pub oracle: Pubkey,
    /// 0 = Pyth, 1 = Switchboard
    pub oracle_source: u8,
    pub base_asset_reserve: u128,
    pub quote_asset_reserve: u128,
    pub cumulative_repeg_rebate_long: u128,
    pub cumulative_repeg_rebate_short: u128,
    pub cumulative_funding_rate_long: i128,
    pub cumulative_funding_rate_short: i128,
    pub last_funding_rate: i128,
    pub last_funding_rate_ts: i64,
    pub funding_period: i64,
    pub last_oracle_price_twap: i128,
    pub last_mark_price_twap: u128,
    pub last_mark_price_twap_ts: i64,
    pub sqrt_k: u128,
    pub peg_multiplier: u128,
    pub total_fee: u128,
    pub total_fee_minus_distributions: u128,
    pub total_fee_withdrawn: u128,
    pub minimum_quote_asset_trade_size: u128,
    pub last_oracle_price_twap_ts: i64,
    pub last_oracle_price: i128,
    pub minimum_base_asset_trade_size: u128,
    pub padding1: u64,
    pub padding2: u128,
    pub padding3: u128,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Market {
    /// Non-zero once the admin has listed the market
    pub initialized: u8,
    pub base_asset_amount_long: i128,
    pub base_asset_amount_short: i128,
    /// Net market bias
    pub base_asset_amount: i128,
    pub open_interest: u128,
    pub amm: Amm,
    pub margin_ratio_initial: u32,
    pub margin_ratio_partial: u32,
    pub margin_ratio_maintenance: u32,
    pub padding0: u32,
    pub padding1: u128,
    pub padding2: u128,
    pub padding3: u128,
    pub padding4: u128,
}

impl Market {
    pub fn is_initialized(&self) -> bool {
        self.initialized != 0
    }

    pub fn oracle(&self) -> Pubkey {
        self.amm.oracle
    }
}

/// Markets table, indexed by market index.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Markets {
    pub markets: [Market; MARKETS_LEN],
}

impl Default for Markets {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Markets {
    pub fn get(&self, market_index: u64) -> Option<&Market> {
        usize::try_from(market_index)
            .ok()
            .and_then(|index| self.markets.get(index))
            .filter(|market| market.is_initialized())
    }
}

impl AccountData for Markets {
    const NAME: &'static str = "Markets";

    fn decode_body(body: &[u8]) -> Result<Self, AccountDataError> {
        decode_zero_copy(Self::NAME, body)
    }

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
        encode_zero_copy(self, out)
    }
}

/// Per-authority clearing house user.
///
/// PDA Seeds: ["user", authority]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct User {
    pub authority: Pubkey,
    pub collateral: u128,
    pub cumulative_deposits: i128,
    pub total_fee_paid: u128,
    pub total_token_discount: u128,
    pub total_referral_reward: u128,
    pub total_referee_discount: u128,
    /// Positions table created alongside the user
    pub positions: Pubkey,
    pub padding: [u128; 4],
}

impl AccountData for User {
    const NAME: &'static str = "User";

    fn decode_body(body: &[u8]) -> Result<Self, AccountDataError> {
        decode_borsh(Self::NAME, body)
    }

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
        encode_borsh(self, out)
    }
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct MarketPosition {
    pub market_index: u64,
    /// Signed: positive is long, negative is short
    pub base_asset_amount: i128,
    pub quote_asset_amount: u128,
    pub last_cumulative_funding_rate: i128,
    pub last_cumulative_repeg_rebate: u128,
    pub last_funding_rate_ts: i64,
    pub open_orders: u128,
    pub padding: [u128; 7],
}

impl MarketPosition {
    pub fn market_index(&self) -> u64 {
        self.market_index
    }

    pub fn base_asset_amount(&self) -> i128 {
        self.base_asset_amount
    }

    pub fn quote_asset_amount(&self) -> u128 {
        self.quote_asset_amount
    }

    pub fn is_open(&self) -> bool {
        self.base_asset_amount() != 0
    }

    pub fn direction(&self) -> Option<PositionDirection> {
        match self.base_asset_amount() {
            0 => None,
            amount if amount > 0 => Some(PositionDirection::Long),
            _ => Some(PositionDirection::Short),
        }
    }
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct UserPositions {
    pub user: Pubkey,
    pub positions: [MarketPosition; USER_POSITIONS_LEN],
}

impl UserPositions {
    pub fn position_for_market(&self, market_index: u64) -> Option<&MarketPosition> {
        self.positions
            .iter()
            .find(|position| position.is_open() && position.market_index() == market_index)
    }
}

impl AccountData for UserPositions {
    const NAME: &'static str = "UserPositions";

    fn decode_body(body: &[u8]) -> Result<Self, AccountDataError> {
        decode_zero_copy(Self::NAME, body)
    }

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
        encode_zero_copy(self, out)
    }
}
