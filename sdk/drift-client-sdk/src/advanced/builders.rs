use drift_client_interface::ManagePositionOptionalAccounts;
use solana_sdk::instruction::AccountMeta;
use solana_sdk::pubkey::Pubkey;

/// Toggle record plus the matching account tail, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalAccounts {
    pub toggles: ManagePositionOptionalAccounts,
    pub tail: Vec<AccountMeta>,
}

/// Builds the optional-account toggles and tail for position instructions.
///
/// Each slot sets its flag and its tail entry together; the tail is always
/// emitted as discount token (read-only) then referrer (writable),
/// whatever order the slots were supplied in.
#[derive(Debug, Clone, Default)]
pub struct OptionalAccountsBuilder {
    discount_token: Option<Pubkey>,
    referrer: Option<Pubkey>,
}

impl OptionalAccountsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discount_token(mut self, discount_token: Option<Pubkey>) -> Self {
        self.discount_token = discount_token;
        self
    }

    pub fn with_referrer(mut self, referrer: Option<Pubkey>) -> Self {
        self.referrer = referrer;
        self
    }

    /// Flags and tail are pushed together, so they always agree. The
    /// descriptor still checks the pair before any instruction is encoded.
    pub fn build(self) -> OptionalAccounts {
        let mut optional = OptionalAccounts::default();

        if let Some(discount_token) = self.discount_token {
            optional.toggles.discount_token = true;
            optional
                .tail
                .push(AccountMeta::new_readonly(discount_token, false));
        }

        if let Some(referrer) = self.referrer {
            optional.toggles.referrer = true;
            optional.tail.push(AccountMeta::new(referrer, false));
        }

        optional
    }
}
