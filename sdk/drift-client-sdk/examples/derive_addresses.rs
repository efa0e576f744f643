// Example: Resolving the drift client's program addresses
//
// This example demonstrates how to:
// 1. Load a client config (defaults to the deployed program)
// 2. Derive the drift client's own addresses
// 3. Derive the clearing house accounts they point at

use drift_client_sdk::core::addresses::{
    derive_clearing_house_state_address, derive_user_account_address,
};
use drift_client_sdk::interface::CLEARING_HOUSE_ID;
use drift_client_sdk::{ClientConfig, DerivedAddresses};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Config, overridable with a JSON argument
    let config = match std::env::args().nth(1) {
        Some(json) => ClientConfig::from_json(&json)?,
        None => ClientConfig::default(),
    };
    println!("Drift client program: {}", config.program_id);

    // 2. Drift client addresses
    let addresses = DerivedAddresses::derive(&config.program_id, &CLEARING_HOUSE_ID)?;
    println!("  Config:                     {}", addresses.config.address);
    println!("  Collateral vault:           {}", addresses.collateral_vault.address);
    println!(
        "  Collateral vault authority: {}",
        addresses.collateral_vault_authority.address
    );
    println!("  Authority:                  {}", addresses.authority.address);

    // 3. Clearing house accounts
    let state = derive_clearing_house_state_address(&CLEARING_HOUSE_ID)?;
    let user = derive_user_account_address(&CLEARING_HOUSE_ID, &addresses.authority.address)?;
    println!("\nClearing house program: {}", CLEARING_HOUSE_ID);
    println!("  State:         {}", state.address);
    println!("  User (nonce {}): {}", user.nonce, user.address);

    // With a live cluster, subscribe and build the client:
    // let connection = Arc::new(RpcClient::new("https://api.devnet.solana.com".into()));
    // let mut clearing_house = SubscribedClearingHouse::new(connection.clone(), CLEARING_HOUSE_ID);
    // clearing_house.subscribe().await?;
    // let client = DriftClient::new(config, connection, Arc::new(admin), Arc::new(clearing_house))?;

    Ok(())
}
