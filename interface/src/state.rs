use crate::discriminator::{decode_borsh, encode_borsh, AccountData};
use crate::error::AccountDataError;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Program-wide singleton written by `initialize`.
///
/// PDA Seeds: ["drift_client"]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Signer allowed to drive every instruction
    pub admin: Pubkey,

    /// Token account holding collateral in transit (PDA: ["collateral_vault"])
    pub collateral_vault: Pubkey,

    /// Delegated authority the clearing house user is registered under
    pub authority: Pubkey,

    pub authority_nonce: u8,

    pub clearing_house_user: Pubkey,

    pub clearing_house_user_positions: Pubkey,
}

impl AccountData for Config {
    const NAME: &'static str = "Config";

    fn decode_body(body: &[u8]) -> Result<Self, AccountDataError> {
        decode_borsh(Self::NAME, body)
    }

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
        encode_borsh(self, out)
    }
}
