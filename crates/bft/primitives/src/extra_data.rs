//! BFT extra-data payload.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::Vote;

/// Length of the vanity prefix in extra-data.
pub const EXTRA_VANITY_LENGTH: usize = 32;

/// Consensus data carried in a BFT header's extra-data field.
///
/// Built fresh for every block creation attempt and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BftExtraData {
    /// Operator-chosen vanity bytes
    pub vanity: B256,
    /// Commit seals, opaque to this layer
    pub seals: Vec<Bytes>,
    /// Validator-set vote carried by this block, if any
    pub vote: Option<Vote>,
    /// Consensus round the block was proposed in
    pub round: u32,
    /// Validator set the block was proposed under
    pub validators: Vec<Address>,
}

impl BftExtraData {
    /// Create extra-data from its parts
    pub const fn new(
        vanity: B256,
        seals: Vec<Bytes>,
        vote: Option<Vote>,
        round: u32,
        validators: Vec<Address>,
    ) -> Self {
        Self { vanity, seals, vote, round, validators }
    }

    /// Create unsealed extra-data, padding or truncating `vanity` to [`EXTRA_VANITY_LENGTH`].
    pub fn unsealed(
        vanity: &[u8],
        vote: Option<Vote>,
        round: u32,
        validators: Vec<Address>,
    ) -> Self {
        Self::new(vanity_from_slice(vanity), Vec::new(), vote, round, validators)
    }
}

/// Left-pad `input` with zeros to `length`, then keep the first `length` bytes.
///
/// Inputs longer than `length` lose their trailing bytes.
pub fn zero_left_pad(input: &[u8], length: usize) -> Vec<u8> {
    let padding = length.saturating_sub(input.len());
    let mut out = Vec::with_capacity(padding + input.len());
    out.resize(padding, 0);
    out.extend_from_slice(input);
    out.truncate(length);
    out
}

/// Vanity value for arbitrary operator-supplied bytes.
pub fn vanity_from_slice(input: &[u8]) -> B256 {
    B256::from_slice(&zero_left_pad(input, EXTRA_VANITY_LENGTH))
}
