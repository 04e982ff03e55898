//! Fetches the latest SOL/USD and ETH/USD updates from the price service,
//! posts them to the receiver program, and optionally invokes a consumer
//! instruction that reads both posted prices.

use std::path::PathBuf;

use clap::Parser;
use client::{
    builder::TransactionBuilder,
    env::Env,
    print_kv,
    transactions::{
        SendTransactionConfig,
        DEFAULT_COMPUTE_UNIT_PRICE_MICRO_LAMPORTS,
    },
    LogColor,
};
use colored::Colorize;
use hermes::{
    FeedId,
    HermesClient,
    DEFAULT_HERMES_URL,
};
use receiver::instructions::consume;
use solana_address::Address;
use solana_sdk::signature::Signer;

const SOL_USD_FEED_ID: &str =
    "0xef0d8b6fda2ceba41da15d4095d1da392a0d2f8ed0c6c7bc0f4cfac8c280b56d";
const ETH_USD_FEED_ID: &str =
    "0xff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace";

#[derive(Parser)]
#[command(about = "Post Pyth price updates and read them back on-chain")]
struct Cli {
    #[arg(long, default_value = "https://api.devnet.solana.com")]
    rpc_url: String,

    #[arg(long, default_value = DEFAULT_HERMES_URL)]
    hermes_url: String,

    /// Path to the payer keypair file. Omit to use an ephemeral keypair.
    #[arg(long)]
    keypair: Option<PathBuf>,

    /// The consumer program to invoke with the posted price update accounts.
    /// When omitted, updates are posted but no consumer instruction is sent.
    #[arg(long)]
    consumer_program_id: Option<Address>,

    /// Priority fee in micro-lamports per compute unit.
    #[arg(long, default_value_t = DEFAULT_COMPUTE_UNIT_PRICE_MICRO_LAMPORTS)]
    compute_unit_price: u64,

    #[arg(long)]
    compute_unit_limit: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let sol_usd = FeedId::from_hex(SOL_USD_FEED_ID)?;
    let eth_usd = FeedId::from_hex(ETH_USD_FEED_ID)?;

    // Fetch the off-chain signed price update data.
    let price_service = HermesClient::new(&cli.hermes_url);
    let update_data = price_service
        .latest_update_data(&[sol_usd, eth_usd])
        .await?;
    print_kv!("Price update payloads", update_data.len());
    for payload in &update_data {
        print_kv!("Payload bytes", payload.len(), LogColor::Muted);
    }

    let env = Env::new(
        &cli.rpc_url,
        cli.keypair.as_deref(),
        SendTransactionConfig {
            compute_unit_price_micro_lamports: cli.compute_unit_price,
            compute_unit_limit: cli.compute_unit_limit,
        },
    )?;

    let mut builder = TransactionBuilder::new(env.payer.pubkey());
    builder.add_post_price_updates(&update_data)?;

    match cli.consumer_program_id {
        Some(consumer_program_id) => {
            builder.add_price_consumer_instructions(|lookup| {
                Ok(vec![consume(
                    &consumer_program_id,
                    &lookup.get(&sol_usd)?,
                    &lookup.get(&eth_usd)?,
                )])
            })?;
        }
        None => print_kv!(
            "No consumer program id",
            "skipping the consumer instruction",
            LogColor::Warning
        ),
    }

    for sequenced in builder.build() {
        let signers: Vec<_> = sequenced.signers.iter().collect();
        let signature = env
            .rpc
            .send_and_confirm(&env.payer, &signers, &sequenced.instructions)
            .await?;
        print_kv!("Confirmed", signature);
    }

    Ok(())
}
