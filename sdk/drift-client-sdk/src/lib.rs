pub mod advanced;
pub mod basic;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;

pub use crate::basic::clearing_house::{ClearingHouse, SubscribedClearingHouse};
pub use crate::basic::client::DriftClient;
pub use crate::core::addresses::{derive, DerivedAddresses, ProgramAddress, Seed, SeedPath};
pub use crate::core::config::ClientConfig;
pub use crate::core::connection::{RpcConnection, TransportError};
pub use crate::core::constants::{DEFAULT_PROGRAM_ID, NO_LIMIT_PRICE, POSITION_SLOT};
pub use crate::core::signer::ClientSigner;
pub use crate::error::{DriftSdkError, Result};
pub use crate::types::{
    ClearingHouseState, Config, Market, MarketPosition, Markets, PositionDirection, UserAccount,
    UserPositionsAccount,
};
pub use crate::utils::{fetch_account, fetch_account_data, fetch_token_balance, parse_token_amount};

pub mod interface {
    pub use drift_client_interface::*;
}
