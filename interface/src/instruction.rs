//! Drift Client Instruction Definitions
//!
//! Instruction data is Anchor-encoded: an 8-byte method discriminator
//! followed by the borsh-encoded positional arguments.

use crate::discriminator::{instruction_discriminator, DISCRIMINATOR_LEN};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::program_error::ProgramError;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionDirection {
    #[default]
    Long,
    Short,
}

/// Toggle record telling the program which optional accounts trail the
/// fixed account list, in field order.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManagePositionOptionalAccounts {
    pub discount_token: bool,
    pub referrer: bool,
}

impl ManagePositionOptionalAccounts {
    /// Number of trailing accounts the program will read
    pub fn enabled_count(&self) -> usize {
        [self.discount_token, self.referrer]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeArgs {
    pub config_nonce: u8,
    pub collateral_vault_nonce: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeUserArgs {
    pub user_nonce: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollateralArgs {
    pub amount: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPositionArgs {
    pub direction: PositionDirection,
    pub quote_asset_amount: u128,
    pub market_index: u64,
    /// Zero means no limit
    pub limit_price: u128,
    pub optional_accounts: ManagePositionOptionalAccounts,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosePositionArgs {
    pub market_index: u64,
    pub optional_accounts: ManagePositionOptionalAccounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftClientInstruction {
    /// Create the config singleton and the collateral vault
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Admin (payer)
    /// 1. `[writable]` Config (PDA: ["drift_client"])
    /// 2. `[]` Collateral mint (must match the clearing house's)
    /// 3. `[writable]` Collateral vault (PDA: ["collateral_vault"])
    /// 4. `[]` Authority (PDA: [clearing_house_program_id])
    /// 5. `[]` Clearing house state
    /// 6. `[]` Rent sysvar
    /// 7. `[]` System program
    /// 8. `[]` Token program
    Initialize(InitializeArgs),

    /// Create the clearing house user owned by the delegated authority
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Admin (payer)
    /// 1. `[writable]` Config
    /// 2. `[]` Clearing house state
    /// 3. `[writable]` Clearing house user (PDA: ["user", authority])
    /// 4. `[writable, signer]` Clearing house user positions (fresh keypair)
    /// 5. `[]` Authority
    /// 6. `[]` Rent sysvar
    /// 7. `[]` System program
    /// 8. `[]` Clearing house program
    InitializeUser(InitializeUserArgs),

    /// Move collateral from the admin's token account into the clearing house
    ///
    /// Accounts:
    /// 0. `[signer]` Admin
    /// 1. `[writable]` Admin collateral account
    /// 2. `[]` Config
    /// 3. `[writable]` Collateral vault
    /// 4. `[]` Authority
    /// 5. `[writable]` Clearing house state
    /// 6. `[writable]` Clearing house user
    /// 7. `[writable]` Clearing house collateral vault
    /// 8. `[]` Token program
    /// 9. `[]` Clearing house markets
    /// 10. `[writable]` Clearing house user positions
    /// 11. `[writable]` Clearing house funding payment history
    /// 12. `[writable]` Clearing house deposit history
    /// 13. `[]` Clearing house program
    DepositCollateral(CollateralArgs),

    /// Move collateral out of the clearing house back to the admin
    ///
    /// Accounts: as `DepositCollateral`, with the clearing house collateral
    /// vault authority, insurance vault `[writable]` and insurance vault
    /// authority inserted after the clearing house collateral vault.
    WithdrawCollateral(CollateralArgs),

    /// Accounts:
    /// 0. `[signer]` Admin
    /// 1. `[]` Config
    /// 2. `[]` Authority
    /// 3. `[writable]` Clearing house state
    /// 4. `[writable]` Clearing house user
    /// 5. `[writable]` Clearing house markets
    /// 6. `[]` Market price oracle
    /// 7. `[writable]` Clearing house user positions
    /// 8. `[writable]` Clearing house funding payment history
    /// 9. `[writable]` Clearing house funding rate history
    /// 10. `[writable]` Clearing house trade history
    /// 11. `[]` Clearing house program
    /// 12+ Optional accounts enabled in `optional_accounts`
    OpenPosition(OpenPositionArgs),

    /// Accounts: as `OpenPosition`.
    ClosePosition(ClosePositionArgs),
}

impl DriftClientInstruction {
    pub const METHODS: [&'static str; 6] = [
        "initialize",
        "initialize_user",
        "deposit_collateral",
        "withdraw_collateral",
        "open_position",
        "close_position",
    ];

    /// Program method this instruction invokes
    pub fn method(&self) -> &'static str {
        match self {
            Self::Initialize(_) => "initialize",
            Self::InitializeUser(_) => "initialize_user",
            Self::DepositCollateral(_) => "deposit_collateral",
            Self::WithdrawCollateral(_) => "withdraw_collateral",
            Self::OpenPosition(_) => "open_position",
            Self::ClosePosition(_) => "close_position",
        }
    }

    /// Borsh-encoded positional arguments, without the discriminator
    pub fn args(&self) -> Result<Vec<u8>, std::io::Error> {
        match self {
            Self::Initialize(args) => borsh::to_vec(args),
            Self::InitializeUser(args) => borsh::to_vec(args),
            Self::DepositCollateral(args) | Self::WithdrawCollateral(args) => borsh::to_vec(args),
            Self::OpenPosition(args) => borsh::to_vec(args),
            Self::ClosePosition(args) => borsh::to_vec(args),
        }
    }

    pub fn pack(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = instruction_discriminator(self.method()).to_vec();
        data.extend(self.args()?);
        Ok(data)
    }

    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < DISCRIMINATOR_LEN {
            return Err(ProgramError::InvalidInstructionData);
        }
        let (discriminator, args) = input.split_at(DISCRIMINATOR_LEN);

        let method = Self::METHODS
            .iter()
            .find(|method| instruction_discriminator(method) == discriminator)
            .ok_or(ProgramError::InvalidInstructionData)?;

        let decoded = match *method {
            "initialize" => InitializeArgs::try_from_slice(args).map(Self::Initialize),
            "initialize_user" => InitializeUserArgs::try_from_slice(args).map(Self::InitializeUser),
            "deposit_collateral" => {
                CollateralArgs::try_from_slice(args).map(Self::DepositCollateral)
            },
            "withdraw_collateral" => {
                CollateralArgs::try_from_slice(args).map(Self::WithdrawCollateral)
            },
            "open_position" => OpenPositionArgs::try_from_slice(args).map(Self::OpenPosition),
            _ => ClosePositionArgs::try_from_slice(args).map(Self::ClosePosition),
        };

        decoded.map_err(|_| ProgramError::InvalidInstructionData)
    }
}
