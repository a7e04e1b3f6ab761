//! Header template for one proposal.

use alloy_consensus::{Header, EMPTY_OMMER_ROOT_HASH};
use alloy_primitives::{Address, Bytes, B256, B64, U256};
use bft_primitives::{BFT_DIFFICULTY, BFT_MIX_HASH};

/// Everything needed to produce the header of one proposed block.
///
/// Snapshots the factory's knobs when created, so a proposal in flight is unaffected by
/// later changes.
#[derive(Debug, Clone, PartialEq)]
pub struct BftBlockCreator {
    /// Parent block hash
    pub parent_hash: B256,
    /// Block number
    pub number: u64,
    /// Consensus round the block is proposed in
    pub round: u32,
    /// Proposing validator
    pub beneficiary: Address,
    /// Gas limit
    pub gas_limit: u64,
    /// Assembled, unsealed extra-data
    pub extra_data: Bytes,
    /// Minimum gas price for included transactions
    pub min_transaction_gas_price: U256,
    /// Fraction of the gas limit to fill before sealing
    pub min_block_occupancy_ratio: f64,
}

impl BftBlockCreator {
    /// Header for a block sealed at `timestamp`, before transactions are executed.
    pub fn create_header(&self, timestamp: u64) -> Header {
        Header {
            parent_hash: self.parent_hash,
            ommers_hash: EMPTY_OMMER_ROOT_HASH,
            beneficiary: self.beneficiary,
            difficulty: U256::from(BFT_DIFFICULTY),
            number: self.number,
            gas_limit: self.gas_limit,
            gas_used: 0,
            timestamp,
            extra_data: self.extra_data.clone(),
            mix_hash: BFT_MIX_HASH,
            nonce: B64::ZERO,
            ..Default::default()
        }
    }
}
