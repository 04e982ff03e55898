//! Codec for the accumulator update payloads served by the price service.
//!
//! A payload carries one wormhole VAA attesting to a merkle root, followed by
//! one merkle-proven price message per feed:
//!
//! ```text
//! "PNAU" | major u8 | minor u8 | trailer_len u8 | trailer | proof_type u8
//!   | vaa_len u16be | vaa | num_updates u8
//!   | ( message_len u16be | message | path_len u8 | path_len * 20-byte node )*
//! ```
//!
//! All multi-byte integers are big-endian. Only this crate's instruction
//! builders consume the parsed pieces; nothing here verifies proofs.

use borsh::BorshSerialize;
use hermes::FeedId;

use crate::ReceiverError;

const ACCUMULATOR_MAGIC: &[u8; 4] = b"PNAU";
const SUPPORTED_MAJOR_VERSION: u8 = 1;

/// Proof type tag for wormhole-attested merkle proofs, the only kind Hermes
/// serves.
const WORMHOLE_MERKLE_PROOF: u8 = 0;

/// Message type tag for price feed messages.
const PRICE_FEED_MESSAGE: u8 = 0;

/// Byte length of one merkle path node (a truncated keccak hash).
const MERKLE_NODE_LEN: usize = 20;

/// One price message together with its merkle path, ready to be posted.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize)]
pub struct MerklePriceUpdate {
    pub message: Vec<u8>,
    pub proof: Vec<[u8; MERKLE_NODE_LEN]>,
}

impl MerklePriceUpdate {
    /// The feed this update prices.
    ///
    /// Price feed messages carry the 32-byte feed id right after the message
    /// type tag.
    pub fn feed_id(&self) -> Result<FeedId, ReceiverError> {
        match self.message.first() {
            Some(&PRICE_FEED_MESSAGE) => {}
            Some(&other) => return Err(ReceiverError::UnsupportedMessageType(other)),
            None => return Err(ReceiverError::TruncatedPayload),
        }

        let bytes: [u8; 32] = self
            .message
            .get(1..33)
            .ok_or(ReceiverError::TruncatedPayload)?
            .try_into()
            .or(Err(ReceiverError::TruncatedPayload))?;

        Ok(FeedId::new(bytes))
    }
}

/// A parsed accumulator update payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccumulatorUpdateData {
    /// The wormhole VAA attesting to the merkle root, still serialized; the
    /// receiver program verifies it on-chain.
    pub vaa: Vec<u8>,
    pub updates: Vec<MerklePriceUpdate>,
}

impl AccumulatorUpdateData {
    pub fn parse(bytes: &[u8]) -> Result<Self, ReceiverError> {
        let mut cursor = Cursor::new(bytes);

        let magic: [u8; 4] = cursor
            .take(4)?
            .try_into()
            .or(Err(ReceiverError::TruncatedPayload))?;
        if &magic != ACCUMULATOR_MAGIC {
            return Err(ReceiverError::BadMagic(magic));
        }

        let major = cursor.take_u8()?;
        if major != SUPPORTED_MAJOR_VERSION {
            return Err(ReceiverError::UnsupportedMajorVersion(major));
        }

        // Minor version bumps and the trailing header are compatible
        // extensions; skip both.
        let _minor = cursor.take_u8()?;
        let trailer_len = cursor.take_u8()?;
        cursor.take(trailer_len as usize)?;

        let proof_type = cursor.take_u8()?;
        if proof_type != WORMHOLE_MERKLE_PROOF {
            return Err(ReceiverError::UnsupportedProofType(proof_type));
        }

        let vaa_len = cursor.take_u16_be()?;
        let vaa = cursor.take(vaa_len as usize)?.to_vec();

        let num_updates = cursor.take_u8()?;
        let mut updates = Vec::with_capacity(num_updates as usize);
        for _ in 0..num_updates {
            let message_len = cursor.take_u16_be()?;
            let message = cursor.take(message_len as usize)?.to_vec();

            let path_len = cursor.take_u8()?;
            let mut proof = Vec::with_capacity(path_len as usize);
            for _ in 0..path_len {
                let node: [u8; MERKLE_NODE_LEN] = cursor
                    .take(MERKLE_NODE_LEN)?
                    .try_into()
                    .or(Err(ReceiverError::TruncatedPayload))?;
                proof.push(node);
            }

            updates.push(MerklePriceUpdate { message, proof });
        }

        Ok(Self { vaa, updates })
    }

    /// Serializes back into the accumulator wire format.
    ///
    /// Always writes the current major/minor version with an empty trailing
    /// header, so `parse` followed by `to_bytes` normalizes a payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(ACCUMULATOR_MAGIC);
        out.push(SUPPORTED_MAJOR_VERSION);
        out.push(0); // minor version
        out.push(0); // trailing header length
        out.push(WORMHOLE_MERKLE_PROOF);
        out.extend_from_slice(&(self.vaa.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.vaa);
        out.push(self.updates.len() as u8);
        for update in &self.updates {
            out.extend_from_slice(&(update.message.len() as u16).to_be_bytes());
            out.extend_from_slice(&update.message);
            out.push(update.proof.len() as u8);
            for node in &update.proof {
                out.extend_from_slice(node);
            }
        }
        out
    }

    /// The guardian set that signed the embedded VAA.
    ///
    /// VAA layout starts `version u8 | guardian_set_index u32be`; the index
    /// selects the on-chain guardian set account used for verification.
    pub fn guardian_set_index(&self) -> Result<u32, ReceiverError> {
        let bytes: [u8; 4] = self
            .vaa
            .get(1..5)
            .ok_or(ReceiverError::VaaTooShort)?
            .try_into()
            .or(Err(ReceiverError::VaaTooShort))?;

        Ok(u32::from_be_bytes(bytes))
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ReceiverError> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(ReceiverError::TruncatedPayload)?;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or(ReceiverError::TruncatedPayload)?;
        self.offset = end;

        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8, ReceiverError> {
        Ok(self.take(1)?[0])
    }

    fn take_u16_be(&mut self) -> Result<u16, ReceiverError> {
        let bytes: [u8; 2] = self
            .take(2)?
            .try_into()
            .or(Err(ReceiverError::TruncatedPayload))?;
        Ok(u16::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_payload(vaa: &[u8], updates: &[MerklePriceUpdate]) -> Vec<u8> {
        AccumulatorUpdateData {
            vaa: vaa.to_vec(),
            updates: updates.to_vec(),
        }
        .to_bytes()
    }

    fn price_feed_message(feed_byte: u8) -> Vec<u8> {
        let mut message = vec![PRICE_FEED_MESSAGE];
        message.extend_from_slice(&[feed_byte; 32]);
        // Price, confidence, exponent etc. follow in a real message; the
        // parser treats everything past the feed id as opaque.
        message.extend_from_slice(&[0u8; 32]);
        message
    }

    fn test_vaa(guardian_set_index: u32) -> Vec<u8> {
        let mut vaa = vec![1u8]; // VAA version
        vaa.extend_from_slice(&guardian_set_index.to_be_bytes());
        vaa.extend_from_slice(&[0xaa; 64]); // signatures, body, etc.
        vaa
    }

    #[test]
    fn parses_payload_with_two_updates() {
        let updates = vec![
            MerklePriceUpdate {
                message: price_feed_message(0x11),
                proof: vec![[1; 20], [2; 20]],
            },
            MerklePriceUpdate {
                message: price_feed_message(0x22),
                proof: vec![[3; 20]],
            },
        ];
        let vaa = test_vaa(4);
        let payload = encode_payload(&vaa, &updates);

        let parsed = AccumulatorUpdateData::parse(&payload).unwrap();
        assert_eq!(parsed.vaa, vaa);
        assert_eq!(parsed.updates, updates);
        assert_eq!(parsed.guardian_set_index().unwrap(), 4);

        assert_eq!(
            parsed.updates[0].feed_id().unwrap(),
            hermes::FeedId::new([0x11; 32])
        );
        assert_eq!(
            parsed.updates[1].feed_id().unwrap(),
            hermes::FeedId::new([0x22; 32])
        );
    }

    #[test]
    fn skips_trailing_header() {
        let mut payload = encode_payload(&test_vaa(0), &[]);
        // Splice a 3-byte trailing header in after the version bytes.
        payload[6] = 3;
        payload.splice(7..7, [0xde, 0xad, 0xbe]);

        let parsed = AccumulatorUpdateData::parse(&payload).unwrap();
        assert!(parsed.updates.is_empty());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut payload = encode_payload(&test_vaa(0), &[]);
        payload[0] = b'X';
        assert!(matches!(
            AccumulatorUpdateData::parse(&payload),
            Err(ReceiverError::BadMagic(_))
        ));
    }

    #[test]
    fn rejects_unsupported_major_version() {
        let mut payload = encode_payload(&test_vaa(0), &[]);
        payload[4] = 2;
        assert!(matches!(
            AccumulatorUpdateData::parse(&payload),
            Err(ReceiverError::UnsupportedMajorVersion(2))
        ));
    }

    #[test]
    fn rejects_unknown_proof_type() {
        let mut payload = encode_payload(&test_vaa(0), &[]);
        payload[7] = 1;
        assert!(matches!(
            AccumulatorUpdateData::parse(&payload),
            Err(ReceiverError::UnsupportedProofType(1))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let payload = encode_payload(&test_vaa(0), &[]);
        for len in 0..payload.len() {
            assert!(
                AccumulatorUpdateData::parse(&payload[..len]).is_err(),
                "prefix of length {len} should not parse"
            );
        }
    }

    #[test]
    fn feed_id_rejects_non_price_messages() {
        let update = MerklePriceUpdate {
            message: vec![7; 64],
            proof: vec![],
        };
        assert!(matches!(
            update.feed_id(),
            Err(ReceiverError::UnsupportedMessageType(7))
        ));
    }

    #[test]
    fn guardian_set_index_requires_five_bytes() {
        let parsed = AccumulatorUpdateData {
            vaa: vec![1, 0, 0],
            updates: vec![],
        };
        assert!(matches!(
            parsed.guardian_set_index(),
            Err(ReceiverError::VaaTooShort)
        ));
    }
}
