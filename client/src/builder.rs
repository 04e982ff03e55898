//! Sequences the transactions that post price updates and then consume them.

use std::collections::HashMap;

use anyhow::Context;
use hermes::FeedId;
use receiver::{
    instructions::post_update_atomic,
    AccumulatorUpdateData,
};
use solana_address::Address;
use solana_instruction::Instruction;
use solana_sdk::signature::{
    Keypair,
    Signer,
};

/// One transaction's worth of instructions plus the ephemeral signers it
/// needs beyond the payer.
pub struct SequencedTransaction {
    pub instructions: Vec<Instruction>,
    pub signers: Vec<Keypair>,
}

/// Maps feeds to the price update accounts the builder allocated for them.
pub struct PriceUpdateLookup<'a>(&'a HashMap<FeedId, Address>);

impl PriceUpdateLookup<'_> {
    pub fn get(&self, feed: &FeedId) -> anyhow::Result<Address> {
        self.0
            .get(feed)
            .copied()
            .with_context(|| format!("No price update was posted for feed {feed}"))
    }
}

/// Builds the transaction sequence for a price push: one post-update
/// transaction per merkle update, then one transaction of consumer
/// instructions referencing the posted accounts.
///
/// Each posted update lives in a fresh ephemeral account, so the sequence can
/// be replayed without colliding with earlier runs. If a feed appears in more
/// than one payload, consumer lookups resolve to the last posted account.
pub struct TransactionBuilder {
    payer: Address,
    treasury_id: u8,
    transactions: Vec<SequencedTransaction>,
    price_update_accounts: HashMap<FeedId, Address>,
}

impl TransactionBuilder {
    pub fn new(payer: Address) -> Self {
        Self {
            payer,
            treasury_id: receiver::instructions::DEFAULT_TREASURY_ID,
            transactions: Vec::new(),
            price_update_accounts: HashMap::new(),
        }
    }

    /// Queues one post-update transaction per merkle update in the payloads.
    pub fn add_post_price_updates(&mut self, payloads: &[Vec<u8>]) -> anyhow::Result<()> {
        for payload in payloads {
            let parsed = AccumulatorUpdateData::parse(payload)
                .context("Couldn't parse price update payload")?;
            let guardian_set_index = parsed.guardian_set_index()?;

            for update in parsed.updates {
                let feed = update.feed_id()?;
                let price_update_account = Keypair::new();

                let instruction = post_update_atomic(
                    &self.payer,
                    &price_update_account.pubkey(),
                    guardian_set_index,
                    parsed.vaa.clone(),
                    update,
                    self.treasury_id,
                )?;

                self.price_update_accounts
                    .insert(feed, price_update_account.pubkey());
                self.transactions.push(SequencedTransaction {
                    instructions: vec![instruction],
                    signers: vec![price_update_account],
                });
            }
        }

        Ok(())
    }

    /// Queues the consumer instructions produced by `build` as one final
    /// transaction. `build` resolves price update accounts through the
    /// lookup; resolving a feed that was never posted is an error.
    pub fn add_price_consumer_instructions<F>(&mut self, build: F) -> anyhow::Result<()>
    where
        F: FnOnce(&PriceUpdateLookup<'_>) -> anyhow::Result<Vec<Instruction>>,
    {
        let instructions = build(&PriceUpdateLookup(&self.price_update_accounts))?;
        if instructions.is_empty() {
            return Ok(());
        }

        self.transactions.push(SequencedTransaction {
            instructions,
            signers: Vec::new(),
        });

        Ok(())
    }

    pub fn build(self) -> Vec<SequencedTransaction> {
        self.transactions
    }
}

#[cfg(test)]
mod tests {
    use receiver::MerklePriceUpdate;

    use super::*;

    fn payload_for_feeds(feed_bytes: &[u8]) -> Vec<u8> {
        let mut vaa = vec![1u8];
        vaa.extend_from_slice(&3u32.to_be_bytes());
        vaa.extend_from_slice(&[0xaa; 32]);

        AccumulatorUpdateData {
            vaa,
            updates: feed_bytes
                .iter()
                .map(|&b| {
                    let mut message = vec![0u8];
                    message.extend_from_slice(&[b; 32]);
                    MerklePriceUpdate {
                        message,
                        proof: vec![[b; 20]],
                    }
                })
                .collect(),
        }
        .to_bytes()
    }

    #[test]
    fn one_transaction_per_update() {
        let mut builder = TransactionBuilder::new(Address::new_unique());
        builder
            .add_post_price_updates(&[payload_for_feeds(&[0x11, 0x22])])
            .unwrap();

        let transactions = builder.build();
        assert_eq!(transactions.len(), 2);
        for transaction in &transactions {
            assert_eq!(transaction.instructions.len(), 1);
            // The price update account signs its own creation.
            assert_eq!(transaction.signers.len(), 1);
            let signer = transaction.signers[0].pubkey();
            assert!(transaction.instructions[0]
                .accounts
                .iter()
                .any(|meta| meta.pubkey == signer && meta.is_signer));
        }
    }

    #[test]
    fn consumer_resolves_posted_accounts() {
        let sol = FeedId::new([0x11; 32]);
        let consumer_program = Address::new_unique();

        let mut builder = TransactionBuilder::new(Address::new_unique());
        builder
            .add_post_price_updates(&[payload_for_feeds(&[0x11])])
            .unwrap();
        builder
            .add_price_consumer_instructions(|lookup| {
                let update_account = lookup.get(&sol)?;
                Ok(vec![receiver::instructions::consume(
                    &consumer_program,
                    &update_account,
                    &update_account,
                )])
            })
            .unwrap();

        let transactions = builder.build();
        assert_eq!(transactions.len(), 2);

        let posted = transactions[0].signers[0].pubkey();
        let consumer = &transactions[1];
        assert!(consumer.signers.is_empty());
        assert_eq!(consumer.instructions[0].accounts[0].pubkey, posted);
    }

    #[test]
    fn unknown_feed_lookup_fails() {
        let mut builder = TransactionBuilder::new(Address::new_unique());
        builder
            .add_post_price_updates(&[payload_for_feeds(&[0x11])])
            .unwrap();

        let missing = FeedId::new([0x99; 32]);
        let result = builder.add_price_consumer_instructions(|lookup| {
            lookup.get(&missing)?;
            unreachable!("lookup should have failed");
        });
        assert!(result.is_err());
    }

    #[test]
    fn empty_consumer_instructions_add_no_transaction() {
        let mut builder = TransactionBuilder::new(Address::new_unique());
        builder
            .add_price_consumer_instructions(|_| Ok(Vec::new()))
            .unwrap();
        assert!(builder.build().is_empty());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let mut builder = TransactionBuilder::new(Address::new_unique());
        assert!(builder
            .add_post_price_updates(&[b"not a payload".to_vec()])
            .is_err());
    }
}
