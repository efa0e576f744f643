//! Program-derived address resolution.
//!
//! Every address this client needs is a pure function of a program id and
//! an ordered seed path. Seed paths compose: a seed may be a static label
//! or the raw bytes of another (possibly derived) address.

use crate::error::{DriftSdkError, Result};
use solana_sdk::pubkey::Pubkey;

pub const CONFIG_SEED: &[u8] = b"drift_client";
pub const COLLATERAL_VAULT_SEED: &[u8] = b"collateral_vault";
pub const CLEARING_HOUSE_STATE_SEED: &[u8] = b"clearing_house";
pub const USER_SEED: &[u8] = b"user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seed {
    Label(&'static [u8]),
    Address(Pubkey),
}

impl Seed {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Seed::Label(label) => label,
            Seed::Address(address) => address.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SeedPath {
    seeds: Vec<Seed>,
}

impl SeedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: &'static [u8]) -> Self {
        self.seeds.push(Seed::Label(label));
        self
    }

    pub fn address(mut self, address: &Pubkey) -> Self {
        self.seeds.push(Seed::Address(*address));
        self
    }

    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    /// Drift client config singleton
    pub fn config() -> Self {
        Self::new().label(CONFIG_SEED)
    }

    /// Token account the drift client stages collateral in
    pub fn collateral_vault() -> Self {
        Self::new().label(COLLATERAL_VAULT_SEED)
    }

    /// Signer over the collateral vault, seeded by the vault itself
    pub fn collateral_vault_authority(collateral_vault: &Pubkey) -> Self {
        Self::new().address(collateral_vault)
    }

    /// Delegated authority the drift client acts as inside another program
    pub fn authority(clearing_house_program_id: &Pubkey) -> Self {
        Self::new().address(clearing_house_program_id)
    }

    /// Clearing house state, derived under the clearing house program
    pub fn clearing_house_state() -> Self {
        Self::new().label(CLEARING_HOUSE_STATE_SEED)
    }

    /// Clearing house user for `authority`, derived under the clearing house program
    pub fn user_account(authority: &Pubkey) -> Self {
        Self::new().label(USER_SEED).address(authority)
    }
}

/// A derived address together with the nonce that pushed it off the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramAddress {
    pub address: Pubkey,
    pub nonce: u8,
}

/// Derive the canonical address for `path` under `program_id`.
///
/// Searches nonces from 255 downward. Fails with `DerivationExhausted` when
/// no nonce yields a valid address, which also covers seed paths the
/// runtime would refuse (seed longer than 32 bytes, too many seeds).
pub fn derive(program_id: &Pubkey, path: &SeedPath) -> Result<ProgramAddress> {
    let seeds: Vec<&[u8]> = path.seeds().iter().map(Seed::as_bytes).collect();
    Pubkey::try_find_program_address(&seeds, program_id)
        .map(|(address, nonce)| ProgramAddress { address, nonce })
        .ok_or(DriftSdkError::DerivationExhausted {
            program_id: *program_id,
        })
}

pub fn derive_config_address(program_id: &Pubkey) -> Result<ProgramAddress> {
    derive(program_id, &SeedPath::config())
}

pub fn derive_collateral_vault_address(program_id: &Pubkey) -> Result<ProgramAddress> {
    derive(program_id, &SeedPath::collateral_vault())
}

pub fn derive_collateral_vault_authority_address(program_id: &Pubkey) -> Result<ProgramAddress> {
    let collateral_vault = derive_collateral_vault_address(program_id)?;
    derive(
        program_id,
        &SeedPath::collateral_vault_authority(&collateral_vault.address),
    )
}

pub fn derive_authority_address(
    program_id: &Pubkey,
    clearing_house_program_id: &Pubkey,
) -> Result<ProgramAddress> {
    derive(program_id, &SeedPath::authority(clearing_house_program_id))
}

pub fn derive_clearing_house_state_address(
    clearing_house_program_id: &Pubkey,
) -> Result<ProgramAddress> {
    derive(clearing_house_program_id, &SeedPath::clearing_house_state())
}

pub fn derive_user_account_address(
    clearing_house_program_id: &Pubkey,
    authority: &Pubkey,
) -> Result<ProgramAddress> {
    derive(clearing_house_program_id, &SeedPath::user_account(authority))
}

/// The drift client's own addresses, derived once and reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAddresses {
    pub config: ProgramAddress,
    pub collateral_vault: ProgramAddress,
    pub collateral_vault_authority: ProgramAddress,
    pub authority: ProgramAddress,
}

impl DerivedAddresses {
    pub fn derive(program_id: &Pubkey, clearing_house_program_id: &Pubkey) -> Result<Self> {
        let collateral_vault = derive_collateral_vault_address(program_id)?;
        Ok(Self {
            config: derive_config_address(program_id)?,
            collateral_vault,
            collateral_vault_authority: derive(
                program_id,
                &SeedPath::collateral_vault_authority(&collateral_vault.address),
            )?,
            authority: derive_authority_address(program_id, clearing_house_program_id)?,
        })
    }
}
