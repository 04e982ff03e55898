//! PDA derivations for the receiver and wormhole programs.

use solana_address::Address;

use crate::program::{
    PYTH_RECEIVER_ID,
    WORMHOLE_ID,
};

const CONFIG_SEED: &[u8] = b"config";
const TREASURY_SEED: &[u8] = b"treasury";
const GUARDIAN_SET_SEED: &[u8] = b"GuardianSet";

/// The receiver program's singleton config account.
pub fn find_config_address() -> (Address, u8) {
    Address::find_program_address(&[CONFIG_SEED], &PYTH_RECEIVER_ID)
}

/// One of the receiver program's fee treasuries, selected by a one-byte id.
pub fn find_treasury_address(treasury_id: u8) -> (Address, u8) {
    Address::find_program_address(&[TREASURY_SEED, &[treasury_id]], &PYTH_RECEIVER_ID)
}

/// The wormhole guardian set account for the given index.
///
/// The index is taken from the VAA being verified; the seed uses its
/// big-endian encoding.
pub fn find_guardian_set_address(index: u32) -> (Address, u8) {
    Address::find_program_address(&[GUARDIAN_SET_SEED, &index.to_be_bytes()], &WORMHOLE_ID)
}
