//! Extra-data encoding.
//!
//! Layout:
//!
//! ```text
//! RLP_LIST [
//!     vanity      32-byte string
//!     validators  RLP_LIST [address, ...]
//!     vote        RLP_LIST [recipient, polarity byte] | empty list
//!     round       4-byte big-endian string
//!     seals       RLP_LIST [seal, ...]
//! ]
//! ```

use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, B256};
use alloy_rlp::{Decodable, Encodable, Header as RlpHeader, EMPTY_LIST_CODE};
use std::fmt::Debug;

use crate::{BftExtraData, Vote, VoteType, EXTRA_VANITY_LENGTH};

/// Errors decoding extra-data.
#[derive(Debug, thiserror::Error)]
pub enum ExtraDataError {
    /// Malformed RLP
    #[error("malformed extra-data rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    /// Vanity is not exactly [`EXTRA_VANITY_LENGTH`] bytes
    #[error("vanity must be {EXTRA_VANITY_LENGTH} bytes, got {0}")]
    InvalidVanityLength(usize),

    /// Vote polarity byte is neither add nor drop
    #[error("unknown vote polarity byte {0:#04x}")]
    InvalidVoteType(u8),

    /// Vote polarity is not a single byte
    #[error("vote polarity must be a single byte, got {0} bytes")]
    InvalidVoteLength(usize),

    /// Round is not a 4-byte integer
    #[error("round must be 4 bytes, got {0}")]
    InvalidRoundLength(usize),

    /// Bytes left over after the payload
    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),
}

/// Serializes [`BftExtraData`] to and from a header's extra-data bytes.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait BftExtraDataCodec: Send + Sync + Debug {
    /// Encode extra-data
    fn encode(&self, extra_data: &BftExtraData) -> Bytes;

    /// Decode extra-data
    fn decode(&self, bytes: &[u8]) -> Result<BftExtraData, ExtraDataError>;

    /// Decode the extra-data carried by `header`
    fn decode_header(&self, header: &Header) -> Result<BftExtraData, ExtraDataError> {
        self.decode(&header.extra_data)
    }
}

/// RLP extra-data codec.
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct RlpExtraDataCodec;

impl RlpExtraDataCodec {
    /// Create a new codec
    pub const fn new() -> Self {
        Self
    }
}

impl BftExtraDataCodec for RlpExtraDataCodec {
    fn encode(&self, extra_data: &BftExtraData) -> Bytes {
        let round = extra_data.round.to_be_bytes();
        let payload_length = extra_data.vanity.as_slice().length() +
            extra_data.validators.length() +
            vote_length(extra_data.vote.as_ref()) +
            round.as_slice().length() +
            extra_data.seals.length();

        let mut out = Vec::with_capacity(payload_length + 4);
        RlpHeader { list: true, payload_length }.encode(&mut out);
        extra_data.vanity.as_slice().encode(&mut out);
        extra_data.validators.encode(&mut out);
        encode_vote(extra_data.vote.as_ref(), &mut out);
        round.as_slice().encode(&mut out);
        extra_data.seals.encode(&mut out);
        out.into()
    }

    fn decode(&self, bytes: &[u8]) -> Result<BftExtraData, ExtraDataError> {
        let mut buf = bytes;
        let mut payload = RlpHeader::decode_bytes(&mut buf, true)?;
        if !buf.is_empty() {
            return Err(ExtraDataError::TrailingBytes(buf.len()))
        }

        let vanity = RlpHeader::decode_bytes(&mut payload, false)?;
        if vanity.len() != EXTRA_VANITY_LENGTH {
            return Err(ExtraDataError::InvalidVanityLength(vanity.len()))
        }
        let vanity = B256::from_slice(vanity);

        let validators = Vec::<Address>::decode(&mut payload)?;
        let vote = decode_vote(&mut payload)?;

        let round = RlpHeader::decode_bytes(&mut payload, false)?;
        let round: [u8; 4] =
            round.try_into().map_err(|_| ExtraDataError::InvalidRoundLength(round.len()))?;

        let seals = Vec::<Bytes>::decode(&mut payload)?;
        if !payload.is_empty() {
            return Err(ExtraDataError::TrailingBytes(payload.len()))
        }

        Ok(BftExtraData::new(vanity, seals, vote, u32::from_be_bytes(round), validators))
    }
}

fn vote_payload_length(vote: &Vote) -> usize {
    vote.recipient.length() + [vote.polarity.as_byte()].as_slice().length()
}

fn vote_length(vote: Option<&Vote>) -> usize {
    match vote {
        Some(vote) => {
            let payload_length = vote_payload_length(vote);
            RlpHeader { list: true, payload_length }.length() + payload_length
        }
        None => 1,
    }
}

fn encode_vote(vote: Option<&Vote>, out: &mut Vec<u8>) {
    match vote {
        Some(vote) => {
            RlpHeader { list: true, payload_length: vote_payload_length(vote) }.encode(out);
            vote.recipient.encode(out);
            [vote.polarity.as_byte()].as_slice().encode(out);
        }
        None => out.push(EMPTY_LIST_CODE),
    }
}

fn decode_vote(buf: &mut &[u8]) -> Result<Option<Vote>, ExtraDataError> {
    let mut payload = RlpHeader::decode_bytes(buf, true)?;
    if payload.is_empty() {
        return Ok(None)
    }

    let recipient = Address::decode(&mut payload)?;
    let polarity = match RlpHeader::decode_bytes(&mut payload, false)? {
        [byte] => VoteType::from_byte(*byte).ok_or(ExtraDataError::InvalidVoteType(*byte))?,
        other => return Err(ExtraDataError::InvalidVoteLength(other.len())),
    };
    if !payload.is_empty() {
        return Err(ExtraDataError::TrailingBytes(payload.len()))
    }

    Ok(Some(Vote::new(recipient, polarity)))
}
