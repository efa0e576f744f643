use crate::core::connection::RpcConnection;
use crate::error::{DriftSdkError, Result};
use drift_client_interface::AccountData;
use solana_sdk::pubkey::Pubkey;

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Fetch raw account data from the ledger
pub async fn fetch_account_data<C: RpcConnection + ?Sized>(
    connection: &C,
    address: &Pubkey,
) -> Result<Vec<u8>> {
    let account = connection
        .get_account(address)
        .await
        .map_err(|e| DriftSdkError::Connection(e.to_string()))?
        .ok_or(DriftSdkError::AccountNotFound(*address))?;

    Ok(account.data)
}

/// Fetch and decode a discriminated program account
pub async fn fetch_account<T: AccountData, C: RpcConnection + ?Sized>(
    connection: &C,
    address: &Pubkey,
) -> Result<T> {
    let data = fetch_account_data(connection, address).await?;
    Ok(T::try_from_account_data(&data)?)
}

//=============================================================================
// SPL Token Helpers
//=============================================================================

/// Byte range of `amount` in an SPL token account:
/// mint (32) | owner (32) | amount (u64 LE) | ...
const TOKEN_AMOUNT_RANGE: std::ops::Range<usize> = 64..72;

/// Read the balance out of SPL token account data
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    let bytes = data.get(TOKEN_AMOUNT_RANGE).ok_or_else(|| {
        DriftSdkError::InvalidAccountData(format!(
            "Token account data too small: {} bytes",
            data.len()
        ))
    })?;

    let mut amount = [0u8; 8];
    amount.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(amount))
}

pub async fn fetch_token_balance<C: RpcConnection + ?Sized>(
    connection: &C,
    token_account: &Pubkey,
) -> Result<u64> {
    let data = fetch_account_data(connection, token_account).await?;
    parse_token_amount(&data)
}
