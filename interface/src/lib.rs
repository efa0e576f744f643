//! Drift Client Interface
//!
//! Wire surface shared by the drift client program and its off-chain callers:
//! program ids, Anchor-style instruction encoding, the ordered account lists
//! each instruction expects, and the account layouts callers decode.

pub mod accounts;
pub mod clearing_house;
pub mod discriminator;
pub mod error;
pub mod instruction;
pub mod state;

use solana_program::pubkey;
use solana_program::pubkey::Pubkey;

pub use discriminator::{AccountData, DISCRIMINATOR_LEN};
pub use error::{AccountDataError, DriftClientError};
pub use instruction::{DriftClientInstruction, ManagePositionOptionalAccounts, PositionDirection};
pub use state::Config;

/// Drift client program
pub const ID: Pubkey = pubkey!("EGovrRumVsvCzcvHSAYZxzsiUiMTTsMSRjuwUVSxYkXt");

/// Clearing house program the drift client forwards into
pub const CLEARING_HOUSE_ID: Pubkey = pubkey!("AsW7LnXB9UA1uec9wi9MctYTgTz7YH9snhxd16GsFaGX");

/// SPL Token program
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub fn id() -> Pubkey {
    ID
}
