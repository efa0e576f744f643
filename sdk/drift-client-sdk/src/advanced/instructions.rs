//! Pure assemblers: resolved addresses in, `InvocationDescriptor` out.

use crate::advanced::builders::OptionalAccounts;
use crate::advanced::descriptor::InvocationDescriptor;
use crate::core::addresses::{DerivedAddresses, ProgramAddress};
use crate::core::constants::NO_LIMIT_PRICE;
use drift_client_interface::accounts::{
    self, DepositCollateral, ManagePosition, WithdrawCollateral,
};
use drift_client_interface::instruction::{
    ClosePositionArgs, CollateralArgs, InitializeArgs, InitializeUserArgs, OpenPositionArgs,
};
use drift_client_interface::{DriftClientInstruction, PositionDirection};
use solana_sdk::pubkey::Pubkey;

pub fn initialize(
    program_id: &Pubkey,
    admin: &Pubkey,
    addresses: &DerivedAddresses,
    clearing_house_state: &Pubkey,
    collateral_mint: &Pubkey,
) -> InvocationDescriptor {
    let instruction = DriftClientInstruction::Initialize(InitializeArgs {
        config_nonce: addresses.config.nonce,
        collateral_vault_nonce: addresses.collateral_vault.nonce,
    });

    let accounts = accounts::Initialize {
        admin: *admin,
        config: addresses.config.address,
        collateral_mint: *collateral_mint,
        collateral_vault: addresses.collateral_vault.address,
        authority: addresses.authority.address,
        clearing_house_state: *clearing_house_state,
    };

    InvocationDescriptor::new(*program_id, instruction, accounts.to_account_roles())
}

pub fn initialize_user(
    program_id: &Pubkey,
    admin: &Pubkey,
    addresses: &DerivedAddresses,
    clearing_house_state: &Pubkey,
    clearing_house_user: &ProgramAddress,
    clearing_house_user_positions: &Pubkey,
    clearing_house_program: &Pubkey,
) -> InvocationDescriptor {
    let instruction = DriftClientInstruction::InitializeUser(InitializeUserArgs {
        user_nonce: clearing_house_user.nonce,
    });

    let accounts = accounts::InitializeUser {
        admin: *admin,
        config: addresses.config.address,
        clearing_house_state: *clearing_house_state,
        clearing_house_user: clearing_house_user.address,
        clearing_house_user_positions: *clearing_house_user_positions,
        authority: addresses.authority.address,
        clearing_house_program: *clearing_house_program,
    };

    InvocationDescriptor::new(*program_id, instruction, accounts.to_account_roles())
}

pub fn deposit_collateral(
    program_id: &Pubkey,
    amount: u64,
    accounts: &DepositCollateral,
) -> InvocationDescriptor {
    InvocationDescriptor::new(
        *program_id,
        DriftClientInstruction::DepositCollateral(CollateralArgs { amount }),
        accounts.to_account_roles(),
    )
}

pub fn withdraw_collateral(
    program_id: &Pubkey,
    amount: u64,
    accounts: &WithdrawCollateral,
) -> InvocationDescriptor {
    InvocationDescriptor::new(
        *program_id,
        DriftClientInstruction::WithdrawCollateral(CollateralArgs { amount }),
        accounts.to_account_roles(),
    )
}

/// `limit_price` of `None` is sent as `NO_LIMIT_PRICE`.
pub fn open_position(
    program_id: &Pubkey,
    direction: PositionDirection,
    quote_asset_amount: u128,
    market_index: u64,
    limit_price: Option<u128>,
    accounts: &ManagePosition,
    optional: OptionalAccounts,
) -> InvocationDescriptor {
    let instruction = DriftClientInstruction::OpenPosition(OpenPositionArgs {
        direction,
        quote_asset_amount,
        market_index,
        limit_price: limit_price.unwrap_or(NO_LIMIT_PRICE),
        optional_accounts: optional.toggles,
    });

    InvocationDescriptor::new(*program_id, instruction, accounts.to_account_roles())
        .with_remaining_accounts(optional.tail)
}

pub fn close_position(
    program_id: &Pubkey,
    market_index: u64,
    accounts: &ManagePosition,
    optional: OptionalAccounts,
) -> InvocationDescriptor {
    let instruction = DriftClientInstruction::ClosePosition(ClosePositionArgs {
        market_index,
        optional_accounts: optional.toggles,
    });

    InvocationDescriptor::new(*program_id, instruction, accounts.to_account_roles())
        .with_remaining_accounts(optional.tail)
}
