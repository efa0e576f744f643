use solana_sdk::pubkey::Pubkey;

// Deployed drift client program
pub const DEFAULT_PROGRAM_ID: Pubkey = drift_client_interface::ID;

/// Limit price sent when the caller sets none. The clearing house reads
/// zero as "no limit".
pub const NO_LIMIT_PRICE: u128 = 0;

/// Slot single-position flows read from the positions table. Slot
/// allocation belongs to the clearing house.
pub const POSITION_SLOT: usize = 0;
