pub mod clearing_house;
pub mod client;

pub use clearing_house::{ClearingHouse, SubscribedClearingHouse};
pub use client::DriftClient;
