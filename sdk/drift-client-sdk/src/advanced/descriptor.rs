use crate::error::{DriftSdkError, Result};
use drift_client_interface::accounts::AccountRole;
use drift_client_interface::DriftClientInstruction;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

/// Everything needed to invoke one drift client method: the method and its
/// positional arguments, the fixed account list with role names, and the
/// optional-account tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationDescriptor {
    program_id: Pubkey,
    instruction: DriftClientInstruction,
    accounts: Vec<AccountRole>,
    remaining_accounts: Vec<AccountMeta>,
}

impl InvocationDescriptor {
    pub fn new(
        program_id: Pubkey,
        instruction: DriftClientInstruction,
        accounts: Vec<AccountRole>,
    ) -> Self {
        Self {
            program_id,
            instruction,
            accounts,
            remaining_accounts: Vec::new(),
        }
    }

    pub fn with_remaining_accounts(mut self, remaining_accounts: Vec<AccountMeta>) -> Self {
        self.remaining_accounts = remaining_accounts;
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn method(&self) -> &'static str {
        self.instruction.method()
    }

    pub fn instruction(&self) -> &DriftClientInstruction {
        &self.instruction
    }

    /// Borsh-encoded positional arguments
    pub fn args(&self) -> Result<Vec<u8>> {
        Ok(self.instruction.args()?)
    }

    pub fn accounts(&self) -> &[AccountRole] {
        &self.accounts
    }

    /// Account bound to a named role in the fixed list
    pub fn account(&self, role: &str) -> Option<&AccountMeta> {
        self.accounts
            .iter()
            .find(|(name, _)| *name == role)
            .map(|(_, meta)| meta)
    }

    pub fn remaining_accounts(&self) -> &[AccountMeta] {
        &self.remaining_accounts
    }

    /// Keys that must sign, fixed list first
    pub fn signers(&self) -> Vec<Pubkey> {
        self.accounts
            .iter()
            .map(|(_, meta)| meta)
            .chain(self.remaining_accounts.iter())
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect()
    }

    /// Number of tail accounts the program will read for this invocation
    fn expected_remaining_accounts(&self) -> usize {
        match &self.instruction {
            DriftClientInstruction::OpenPosition(args) => args.optional_accounts.enabled_count(),
            DriftClientInstruction::ClosePosition(args) => args.optional_accounts.enabled_count(),
            _ => 0,
        }
    }

    /// Encode the invocation. This is the only place the optional-account
    /// tail is checked against the toggles the arguments carry; a mismatch
    /// fails with `InvalidInvocation` and nothing is encoded.
    pub fn into_instruction(self) -> Result<Instruction> {
        let expected = self.expected_remaining_accounts();
        if self.remaining_accounts.len() != expected {
            return Err(DriftSdkError::InvalidInvocation(format!(
                "{} expects {} optional accounts, got {}",
                self.method(),
                expected,
                self.remaining_accounts.len()
            )));
        }

        let data = self.instruction.pack()?;
        let accounts = self
            .accounts
            .into_iter()
            .map(|(_, meta)| meta)
            .chain(self.remaining_accounts)
            .collect();

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
