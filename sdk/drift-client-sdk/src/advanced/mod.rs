//! Low-level building blocks: invocation descriptors, the optional-account
//! builder and pure assemblers that turn resolved addresses into
//! descriptors. Nothing here touches the network.

pub mod builders;
pub mod descriptor;
pub mod instructions;

pub use builders::{OptionalAccounts, OptionalAccountsBuilder};
pub use descriptor::InvocationDescriptor;
