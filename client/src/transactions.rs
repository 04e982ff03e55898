//! Nonblocking RPC client utilities for signing and submitting the built
//! transaction sequence.

use std::time::Duration;

use anyhow::Context;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_instruction::Instruction;
use solana_sdk::{
    message::Message,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
    transaction::Transaction,
};

/// Priority fee from the original consumer walkthrough; generous enough to
/// land on a congested devnet.
pub const DEFAULT_COMPUTE_UNIT_PRICE_MICRO_LAMPORTS: u64 = 1_000_000;

/// How long to wait for a transaction to confirm before giving up.
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(220);

#[derive(Clone)]
pub struct SendTransactionConfig {
    /// Priority fee attached to every transaction, in micro-lamports per
    /// compute unit.
    pub compute_unit_price_micro_lamports: u64,
    /// Optional compute unit limit; when `None` the runtime default applies.
    pub compute_unit_limit: Option<u32>,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig {
            compute_unit_price_micro_lamports: DEFAULT_COMPUTE_UNIT_PRICE_MICRO_LAMPORTS,
            compute_unit_limit: None,
        }
    }
}

impl SendTransactionConfig {
    /// The compute-budget instructions prefixed onto every transaction.
    pub fn prefix_instructions(&self) -> Vec<Instruction> {
        let mut prefix = vec![ComputeBudgetInstruction::set_compute_unit_price(
            self.compute_unit_price_micro_lamports,
        )];
        if let Some(limit) = self.compute_unit_limit {
            prefix.push(ComputeBudgetInstruction::set_compute_unit_limit(limit));
        }
        prefix
    }
}

pub struct PushRpcClient {
    pub client: RpcClient,
    pub config: SendTransactionConfig,
}

impl PushRpcClient {
    pub fn new_from_url(url: &str, config: SendTransactionConfig) -> Self {
        PushRpcClient {
            client: RpcClient::new_with_timeout_and_commitment(
                url.into(),
                CONFIRM_TIMEOUT,
                CommitmentConfig::processed(),
            ),
            config,
        }
    }

    /// Signs with the payer plus any per-transaction ephemeral signers,
    /// submits, and waits for confirmation.
    pub async fn send_and_confirm(
        &self,
        payer: &Keypair,
        extra_signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> anyhow::Result<Signature> {
        let blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .context("Couldn't fetch a recent blockhash")?;

        let final_instructions: Vec<Instruction> = self
            .config
            .prefix_instructions()
            .into_iter()
            .chain(instructions.iter().cloned())
            .collect();

        let message = Message::new(&final_instructions, Some(&payer.pubkey()));
        let mut transaction = Transaction::new_unsigned(message);
        transaction
            .try_sign(
                &std::iter::once(payer)
                    .chain(extra_signers.iter().cloned())
                    .collect::<Vec<_>>(),
                blockhash,
            )
            .context("Couldn't sign transaction")?;

        self.client
            .send_and_confirm_transaction(&transaction)
            .await
            .context("Failed transaction submission")
    }
}
