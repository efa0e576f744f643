//! Drift Client Error Types

use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Errors raised by the drift client program itself.
///
/// Anchor numbers user errors from 6000.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum DriftClientError {
    #[error("Invalid authority")]
    InvalidAuthority = 6000,

    #[error("Clearing house not collateral account authority")]
    InvalidCollateralAccountAuthority = 6001,
}

impl DriftClientError {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            6000 => Some(Self::InvalidAuthority),
            6001 => Some(Self::InvalidCollateralAccountAuthority),
            _ => None,
        }
    }
}

impl From<DriftClientError> for ProgramError {
    fn from(e: DriftClientError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

/// Failure to decode an account body.
#[derive(Error, Debug)]
pub enum AccountDataError {
    #[error("{name} account data too small ({len} bytes)")]
    TooSmall { name: &'static str, len: usize },

    #[error("{name} account discriminator mismatch")]
    DiscriminatorMismatch { name: &'static str },

    #[error("{name} account body malformed: {source}")]
    Malformed {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}
