//! Environment setup: RPC connection and payer keypair.

use std::path::Path;

use anyhow::anyhow;
use colored::Colorize;
use solana_sdk::signature::{
    Keypair,
    Signer,
};

use crate::{
    print_kv,
    transactions::{
        PushRpcClient,
        SendTransactionConfig,
    },
    LogColor,
};

pub struct Env {
    pub rpc: PushRpcClient,
    pub payer: Keypair,
}

impl Env {
    /// Connects to the given RPC endpoint and resolves the payer.
    ///
    /// With no keypair path a throwaway keypair is generated, which is only
    /// useful for dry runs: it holds no lamports, so submission will fail at
    /// the cluster.
    pub fn new(
        rpc_url: &str,
        keypair_path: Option<&Path>,
        config: SendTransactionConfig,
    ) -> anyhow::Result<Self> {
        print_kv!("Connecting to", rpc_url);

        let payer = match keypair_path {
            Some(path) => solana_keypair::read_keypair_file(path)
                .map_err(|e| anyhow!("couldn't read keypair file {}: {e}", path.display()))?,
            None => {
                print_kv!(
                    "No keypair provided",
                    "using an ephemeral unfunded payer",
                    LogColor::Warning
                );
                Keypair::new()
            }
        };
        print_kv!("Payer", payer.pubkey());

        Ok(Self {
            rpc: PushRpcClient::new_from_url(rpc_url, config),
            payer,
        })
    }
}
