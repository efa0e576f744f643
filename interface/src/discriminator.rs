//! Anchor discriminators.
//!
//! Instructions are prefixed with `sha256("global:<method>")[..8]` and
//! accounts with `sha256("account:<TypeName>")[..8]`.

use crate::error::AccountDataError;
use borsh::{BorshDeserialize, BorshSerialize};
use bytemuck::Pod;
use solana_program::hash::hash;
use std::mem::size_of;

pub const DISCRIMINATOR_LEN: usize = 8;

pub fn instruction_discriminator(method: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("global", method)
}

pub fn account_discriminator(type_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("account", type_name)
}

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("{}:{}", namespace, name);
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..DISCRIMINATOR_LEN]);
    out
}

/// An account stored as `[discriminator][body]`.
///
/// Borsh accounts carry a serialized body followed by allocation padding.
/// Zero-copy accounts carry the raw `repr(packed)` bytes of the struct with
/// no length prefix. Implementors pick the body codec with [`decode_borsh`]
/// or [`decode_zero_copy`] and their encoding counterparts.
pub trait AccountData: Sized {
    /// Type name the owning program registered the account under
    const NAME: &'static str;

    fn decode_body(body: &[u8]) -> Result<Self, AccountDataError>;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<(), std::io::Error>;

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        account_discriminator(Self::NAME)
    }

    fn try_from_account_data(data: &[u8]) -> Result<Self, AccountDataError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(AccountDataError::TooSmall {
                name: Self::NAME,
                len: data.len(),
            });
        }

        let (discriminator, body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != Self::discriminator() {
            return Err(AccountDataError::DiscriminatorMismatch { name: Self::NAME });
        }

        Self::decode_body(body)
    }

    fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = Self::discriminator().to_vec();
        self.encode_body(&mut data)?;
        Ok(data)
    }
}

/// Decode a borsh body. Trailing allocation padding is not part of the body.
pub fn decode_borsh<T: BorshDeserialize>(
    name: &'static str,
    mut body: &[u8],
) -> Result<T, AccountDataError> {
    T::deserialize(&mut body).map_err(|source| AccountDataError::Malformed { name, source })
}

pub fn encode_borsh<T: BorshSerialize>(value: &T, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
    value.serialize(out)
}

/// Read a zero-copy body. Bytes past `size_of::<T>()` are ignored.
pub fn decode_zero_copy<T: Pod>(name: &'static str, body: &[u8]) -> Result<T, AccountDataError> {
    body.get(..size_of::<T>())
        .and_then(|bytes| bytemuck::try_pod_read_unaligned(bytes).ok())
        .ok_or(AccountDataError::TooSmall {
            name,
            len: DISCRIMINATOR_LEN + body.len(),
        })
}

pub fn encode_zero_copy<T: Pod>(value: &T, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
    out.extend_from_slice(bytemuck::bytes_of(value));
    Ok(())
}
