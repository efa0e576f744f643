pub mod addresses;
pub mod config;
pub mod connection;
pub mod constants;
pub mod signer;
