//! Instruction builders for the receiver program and the sample consumer.
//!
//! Both programs are Anchor programs: instructions are tagged with the first
//! eight bytes of `sha256("global:<name>")` and arguments are borsh-encoded.

use borsh::BorshSerialize;
use sha2::{
    Digest,
    Sha256,
};
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::{
    pda::{
        find_config_address,
        find_guardian_set_address,
        find_treasury_address,
    },
    program::PYTH_RECEIVER_ID,
    MerklePriceUpdate,
    ReceiverError,
};

/// Treasury the posting fee is paid into. The receiver program accepts any
/// id; a fixed one is fine for a sequential sender.
pub const DEFAULT_TREASURY_ID: u8 = 0;

fn anchor_discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{name}").as_bytes());
    let mut tag = [0u8; 8];
    tag.copy_from_slice(&digest[..8]);
    tag
}

#[derive(BorshSerialize)]
struct PostUpdateAtomicParams {
    vaa: Vec<u8>,
    merkle_price_update: MerklePriceUpdate,
    treasury_id: u8,
}

/// Builds a `post_update_atomic` instruction: verify one merkle price update
/// against its VAA and store it in `price_update_account`.
///
/// `price_update_account` must be a fresh ephemeral signer; the receiver
/// program initializes it. The payer doubles as the account's write
/// authority.
pub fn post_update_atomic(
    payer: &Address,
    price_update_account: &Address,
    guardian_set_index: u32,
    vaa: Vec<u8>,
    merkle_price_update: MerklePriceUpdate,
    treasury_id: u8,
) -> Result<Instruction, ReceiverError> {
    let params = PostUpdateAtomicParams {
        vaa,
        merkle_price_update,
        treasury_id,
    };

    let mut data = anchor_discriminator("post_update_atomic").to_vec();
    params
        .serialize(&mut data)
        .map_err(ReceiverError::Encode)?;

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(find_guardian_set_address(guardian_set_index).0, false),
        AccountMeta::new_readonly(find_config_address().0, false),
        AccountMeta::new(find_treasury_address(treasury_id).0, false),
        AccountMeta::new(*price_update_account, true),
        AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        AccountMeta::new_readonly(*payer, true),
    ];

    Ok(Instruction {
        program_id: PYTH_RECEIVER_ID,
        accounts,
        data,
    })
}

/// Builds the sample consumer's `consume` instruction, which reads the two
/// posted price update accounts.
pub fn consume(
    consumer_program_id: &Address,
    sol_price_update: &Address,
    eth_price_update: &Address,
) -> Instruction {
    Instruction {
        program_id: *consumer_program_id,
        accounts: vec![
            AccountMeta::new_readonly(*sol_price_update, false),
            AccountMeta::new_readonly(*eth_price_update, false),
        ],
        data: anchor_discriminator("consume").to_vec(),
    }
}
