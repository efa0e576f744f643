//! Typed views of the accounts this client reads.
//!
//! Layouts are owned by the remote programs and mirrored in
//! `drift_client_interface`.

pub use drift_client_interface::clearing_house::{Amm, Market, MarketPosition, Markets};
pub use drift_client_interface::instruction::{ManagePositionOptionalAccounts, PositionDirection};
pub use drift_client_interface::state::Config;

/// Clearing house user owned by the delegated authority
pub type UserAccount = drift_client_interface::clearing_house::User;

/// Positions table referenced by a `UserAccount`
pub type UserPositionsAccount = drift_client_interface::clearing_house::UserPositions;

pub type ClearingHouseState = drift_client_interface::clearing_house::State;
