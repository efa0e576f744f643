//! Account lists for each drift client instruction.
//!
//! Each list is emitted in the order the program declares its accounts,
//! paired with the role name the program uses for that slot.

use crate::TOKEN_PROGRAM_ID;
use solana_program::instruction::AccountMeta;
use solana_program::pubkey::Pubkey;
use solana_program::{system_program, sysvar};

/// Role name and meta for one fixed account slot
pub type AccountRole = (&'static str, AccountMeta);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Initialize {
    pub admin: Pubkey,
    pub config: Pubkey,
    pub collateral_mint: Pubkey,
    pub collateral_vault: Pubkey,
    pub authority: Pubkey,
    pub clearing_house_state: Pubkey,
}

impl Initialize {
    pub fn to_account_roles(&self) -> Vec<AccountRole> {
        vec![
            ("admin", AccountMeta::new(self.admin, true)),
            ("config", AccountMeta::new(self.config, false)),
            (
                "collateral_mint",
                AccountMeta::new_readonly(self.collateral_mint, false),
            ),
            (
                "collateral_vault",
                AccountMeta::new(self.collateral_vault, false),
            ),
            ("authority", AccountMeta::new_readonly(self.authority, false)),
            (
                "clearing_house_state",
                AccountMeta::new_readonly(self.clearing_house_state, false),
            ),
            ("rent", AccountMeta::new_readonly(sysvar::rent::id(), false)),
            (
                "system_program",
                AccountMeta::new_readonly(system_program::id(), false),
            ),
            (
                "token_program",
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeUser {
    pub admin: Pubkey,
    pub config: Pubkey,
    pub clearing_house_state: Pubkey,
    pub clearing_house_user: Pubkey,
    /// Freshly generated; must sign
    pub clearing_house_user_positions: Pubkey,
    pub authority: Pubkey,
    pub clearing_house_program: Pubkey,
}

impl InitializeUser {
    pub fn to_account_roles(&self) -> Vec<AccountRole> {
        vec![
            ("admin", AccountMeta::new(self.admin, true)),
            ("config", AccountMeta::new(self.config, false)),
            (
                "clearing_house_state",
                AccountMeta::new_readonly(self.clearing_house_state, false),
            ),
            (
                "clearing_house_user",
                AccountMeta::new(self.clearing_house_user, false),
            ),
            (
                "clearing_house_user_positions",
                AccountMeta::new(self.clearing_house_user_positions, true),
            ),
            ("authority", AccountMeta::new_readonly(self.authority, false)),
            ("rent", AccountMeta::new_readonly(sysvar::rent::id(), false)),
            (
                "system_program",
                AccountMeta::new_readonly(system_program::id(), false),
            ),
            (
                "clearing_house_program",
                AccountMeta::new_readonly(self.clearing_house_program, false),
            ),
        ]
    }
}

/// Accounts shared by deposits and withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositCollateral {
    pub admin: Pubkey,
    pub admin_collateral_account: Pubkey,
    pub config: Pubkey,
    pub collateral_vault: Pubkey,
    pub authority: Pubkey,
    pub clearing_house_state: Pubkey,
    pub clearing_house_user: Pubkey,
    pub clearing_house_collateral_vault: Pubkey,
    pub clearing_house_markets: Pubkey,
    pub clearing_house_user_positions: Pubkey,
    pub clearing_house_funding_payment_history: Pubkey,
    pub clearing_house_deposit_history: Pubkey,
    pub clearing_house_program: Pubkey,
}

impl DepositCollateral {
    pub fn to_account_roles(&self) -> Vec<AccountRole> {
        let mut roles = self.head();
        roles.extend(self.tail());
        roles
    }

    fn head(&self) -> Vec<AccountRole> {
        vec![
            ("admin", AccountMeta::new_readonly(self.admin, true)),
            (
                "admin_collateral_account",
                AccountMeta::new(self.admin_collateral_account, false),
            ),
            ("config", AccountMeta::new_readonly(self.config, false)),
            (
                "collateral_vault",
                AccountMeta::new(self.collateral_vault, false),
            ),
            ("authority", AccountMeta::new_readonly(self.authority, false)),
            (
                "clearing_house_state",
                AccountMeta::new(self.clearing_house_state, false),
            ),
            (
                "clearing_house_user",
                AccountMeta::new(self.clearing_house_user, false),
            ),
            (
                "clearing_house_collateral_vault",
                AccountMeta::new(self.clearing_house_collateral_vault, false),
            ),
        ]
    }

    fn tail(&self) -> Vec<AccountRole> {
        vec![
            (
                "token_program",
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ),
            (
                "clearing_house_markets",
                AccountMeta::new_readonly(self.clearing_house_markets, false),
            ),
            (
                "clearing_house_user_positions",
                AccountMeta::new(self.clearing_house_user_positions, false),
            ),
            (
                "clearing_house_funding_payment_history",
                AccountMeta::new(self.clearing_house_funding_payment_history, false),
            ),
            (
                "clearing_house_deposit_history",
                AccountMeta::new(self.clearing_house_deposit_history, false),
            ),
            (
                "clearing_house_program",
                AccountMeta::new_readonly(self.clearing_house_program, false),
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawCollateral {
    pub deposit: DepositCollateral,
    pub clearing_house_collateral_vault_authority: Pubkey,
    pub clearing_house_insurance_vault: Pubkey,
    pub clearing_house_insurance_vault_authority: Pubkey,
}

impl WithdrawCollateral {
    pub fn to_account_roles(&self) -> Vec<AccountRole> {
        let mut roles = self.deposit.head();
        roles.extend([
            (
                "clearing_house_collateral_vault_authority",
                AccountMeta::new_readonly(self.clearing_house_collateral_vault_authority, false),
            ),
            (
                "clearing_house_insurance_vault",
                AccountMeta::new(self.clearing_house_insurance_vault, false),
            ),
            (
                "clearing_house_insurance_vault_authority",
                AccountMeta::new_readonly(self.clearing_house_insurance_vault_authority, false),
            ),
        ]);
        roles.extend(self.deposit.tail());
        roles
    }
}

/// Accounts shared by `open_position` and `close_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagePosition {
    pub admin: Pubkey,
    pub config: Pubkey,
    pub authority: Pubkey,
    pub clearing_house_state: Pubkey,
    pub clearing_house_user: Pubkey,
    pub clearing_house_markets: Pubkey,
    pub oracle: Pubkey,
    pub clearing_house_user_positions: Pubkey,
    pub clearing_house_funding_payment_history: Pubkey,
    pub clearing_house_funding_rate_history: Pubkey,
    pub clearing_house_trade_history: Pubkey,
    pub clearing_house_program: Pubkey,
}

impl ManagePosition {
    pub fn to_account_roles(&self) -> Vec<AccountRole> {
        vec![
            ("admin", AccountMeta::new_readonly(self.admin, true)),
            ("config", AccountMeta::new_readonly(self.config, false)),
            ("authority", AccountMeta::new_readonly(self.authority, false)),
            (
                "clearing_house_state",
                AccountMeta::new(self.clearing_house_state, false),
            ),
            (
                "clearing_house_user",
                AccountMeta::new(self.clearing_house_user, false),
            ),
            (
                "clearing_house_markets",
                AccountMeta::new(self.clearing_house_markets, false),
            ),
            ("oracle", AccountMeta::new_readonly(self.oracle, false)),
            (
                "clearing_house_user_positions",
                AccountMeta::new(self.clearing_house_user_positions, false),
            ),
            (
                "clearing_house_funding_payment_history",
                AccountMeta::new(self.clearing_house_funding_payment_history, false),
            ),
            (
                "clearing_house_funding_rate_history",
                AccountMeta::new(self.clearing_house_funding_rate_history, false),
            ),
            (
                "clearing_house_trade_history",
                AccountMeta::new(self.clearing_house_trade_history, false),
            ),
            (
                "clearing_house_program",
                AccountMeta::new_readonly(self.clearing_house_program, false),
            ),
        ]
    }
}
