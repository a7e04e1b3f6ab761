//! Vote tallies per block, rebuilt by replaying headers since the last checkpoint.

use alloy_consensus::Header;
use alloy_primitives::B256;
use bft_primitives::{BftExtraDataCodec, ChainHeaderReader, ValidatorVote};
use parking_lot::Mutex;
use schnellru::{ByLength, LruMap};
use std::{fmt, sync::Arc};
use tracing::trace;

use crate::{ValidatorProviderError, VoteTally};

/// Number of tallies kept in memory.
pub const DEFAULT_TALLY_CACHE_SIZE: u32 = 1024;

/// Computes the [`VoteTally`] after a block.
///
/// Genesis and every epoch block are checkpoints: the tally after them is the validator set
/// listed in their extra-data with no outstanding votes. Any other block's tally is its
/// parent's tally plus the vote the block carries, cast by its beneficiary.
pub struct VoteTallyCache {
    chain: Arc<dyn ChainHeaderReader>,
    codec: Arc<dyn BftExtraDataCodec>,
    epoch_length: u64,
    tallies: Mutex<LruMap<B256, VoteTally, ByLength>>,
}

impl VoteTallyCache {
    /// Create a cache holding [`DEFAULT_TALLY_CACHE_SIZE`] tallies.
    pub fn new(
        chain: Arc<dyn ChainHeaderReader>,
        codec: Arc<dyn BftExtraDataCodec>,
        epoch_length: u64,
    ) -> Self {
        Self::with_capacity(chain, codec, epoch_length, DEFAULT_TALLY_CACHE_SIZE)
    }

    /// Create a cache holding up to `capacity` tallies.
    pub fn with_capacity(
        chain: Arc<dyn ChainHeaderReader>,
        codec: Arc<dyn BftExtraDataCodec>,
        epoch_length: u64,
        capacity: u32,
    ) -> Self {
        Self {
            chain,
            codec,
            epoch_length: epoch_length.max(1),
            tallies: Mutex::new(LruMap::new(ByLength::new(capacity))),
        }
    }

    /// Header store the cache replays from
    pub fn chain(&self) -> &dyn ChainHeaderReader {
        self.chain.as_ref()
    }

    /// Whether `number` is a checkpoint height
    pub const fn is_epoch_block(&self, number: u64) -> bool {
        number % self.epoch_length == 0
    }

    /// Tally after `header` has been applied.
    pub fn tally_after(&self, header: &Header) -> Result<VoteTally, ValidatorProviderError> {
        let mut hash = header.hash_slow();
        if let Some(tally) = self.cached(&hash) {
            return Ok(tally)
        }

        let mut pending = Vec::new();
        let mut current = header.clone();
        let mut tally = loop {
            if self.is_epoch_block(current.number) {
                let extra_data = self
                    .codec
                    .decode_header(&current)
                    .map_err(|source| ValidatorProviderError::ExtraData { hash, source })?;
                let tally = VoteTally::new(extra_data.validators);
                trace!(
                    target: "bft::voting",
                    number = current.number,
                    validators = tally.validators().len(),
                    "Loaded checkpoint"
                );
                self.tallies.lock().insert(hash, tally.clone());
                break tally
            }

            let parent_hash = current.parent_hash;
            pending.push((hash, current));
            if let Some(tally) = self.cached(&parent_hash) {
                break tally
            }
            current = self
                .chain
                .header_by_hash(parent_hash)?
                .ok_or(ValidatorProviderError::MissingAncestor(parent_hash))?;
            hash = parent_hash;
        };

        trace!(target: "bft::voting", replayed = pending.len(), "Replaying votes");
        for (hash, header) in pending.into_iter().rev() {
            let extra_data = self
                .codec
                .decode_header(&header)
                .map_err(|source| ValidatorProviderError::ExtraData { hash, source })?;
            if let Some(vote) = extra_data.vote {
                tally.apply_vote(&ValidatorVote::from_vote(vote, header.beneficiary));
            }
            self.tallies.lock().insert(hash, tally.clone());
        }
        Ok(tally)
    }

    fn cached(&self, hash: &B256) -> Option<VoteTally> {
        self.tallies.lock().get(hash).cloned()
    }
}

impl fmt::Debug for VoteTallyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoteTallyCache")
            .field("chain", &self.chain)
            .field("codec", &self.codec)
            .field("epoch_length", &self.epoch_length)
            .field("cached", &self.tallies.lock().len())
            .finish()
    }
}
