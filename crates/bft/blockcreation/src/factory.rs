//! Shared block creation state and extra-data assembly.

use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, U256};
use bft_consensus::BftContext;
use bft_primitives::{BftExtraData, Vote};
use parking_lot::RwLock;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::debug;

use crate::{BftBlockCreator, BlockCreationError, GasLimitCalculator, MiningParameters};

/// Builds [`BftBlockCreator`]s for the local validator.
///
/// Vanity, minimum gas price and minimum block occupancy can each be replaced at any time
/// from any thread. Every creation reads the latest value of each.
#[derive(Debug)]
pub struct BftBlockCreatorFactory {
    local_address: Address,
    context: BftContext,
    gas_limit_calculator: Arc<dyn GasLimitCalculator>,
    vanity: RwLock<Bytes>,
    min_transaction_gas_price: RwLock<U256>,
    min_block_occupancy_ratio: AtomicU64,
}

impl BftBlockCreatorFactory {
    /// Create a factory proposing as `local_address`.
    ///
    /// Fails if the validator membership in `context` is not vote-driven.
    pub fn new(
        params: &MiningParameters,
        local_address: Address,
        context: BftContext,
        gas_limit_calculator: Arc<dyn GasLimitCalculator>,
    ) -> Result<Self, BlockCreationError> {
        if context.validator_provider().vote_provider().is_none() {
            return Err(BlockCreationError::MissingVoteProvider)
        }
        if let Some(target) = params.target_gas_limit {
            gas_limit_calculator.change_target_gas_limit(Some(target));
        }
        Ok(Self {
            local_address,
            context,
            gas_limit_calculator,
            vanity: RwLock::new(params.extra_data.clone()),
            min_transaction_gas_price: RwLock::new(params.min_transaction_gas_price),
            min_block_occupancy_ratio: AtomicU64::new(params.min_block_occupancy_ratio.to_bits()),
        })
    }

    /// Address blocks are proposed as
    pub const fn local_address(&self) -> Address {
        self.local_address
    }

    /// Current vanity bytes, before padding
    pub fn vanity(&self) -> Bytes {
        self.vanity.read().clone()
    }

    /// Replace the vanity bytes
    pub fn set_vanity(&self, vanity: Bytes) {
        debug!(target: "bft::blockcreation", ?vanity, "Vanity changed");
        *self.vanity.write() = vanity;
    }

    /// Current minimum transaction gas price
    pub fn min_transaction_gas_price(&self) -> U256 {
        *self.min_transaction_gas_price.read()
    }

    /// Replace the minimum transaction gas price
    pub fn set_min_transaction_gas_price(&self, price: U256) {
        debug!(target: "bft::blockcreation", %price, "Minimum gas price changed");
        *self.min_transaction_gas_price.write() = price;
    }

    /// Current minimum block occupancy ratio
    pub fn min_block_occupancy_ratio(&self) -> f64 {
        f64::from_bits(self.min_block_occupancy_ratio.load(Ordering::Relaxed))
    }

    /// Replace the minimum block occupancy ratio
    pub fn set_min_block_occupancy_ratio(&self, ratio: f64) {
        debug!(target: "bft::blockcreation", ratio, "Minimum block occupancy changed");
        self.min_block_occupancy_ratio.store(ratio.to_bits(), Ordering::Relaxed);
    }

    /// Replace the gas limit target for subsequent blocks
    pub fn change_target_gas_limit(&self, target: Option<u64>) {
        debug!(target: "bft::blockcreation", ?target, "Gas limit target changed");
        self.gas_limit_calculator.change_target_gas_limit(target);
    }

    /// Encoded, unsealed extra-data for a block proposed on `parent` in `round`.
    ///
    /// Carries the current vanity padded to 32 bytes, the validators after `parent` and
    /// at most one vote from the local proposals. The proposals themselves are left
    /// untouched.
    pub fn create_extra_data(
        &self,
        round: u32,
        parent: &Header,
    ) -> Result<Bytes, BlockCreationError> {
        let validator_provider = self.context.validator_provider();
        let vote_provider =
            validator_provider.vote_provider().ok_or(BlockCreationError::MissingVoteProvider)?;

        let vote = vote_provider.next_vote(parent, self.local_address)?;
        let validators = validator_provider.validators_after_block(parent)?;
        let extra_data =
            BftExtraData::unsealed(&self.vanity(), vote.map(Vote::from), round, validators);

        debug!(
            target: "bft::blockcreation",
            parent = parent.number,
            round,
            vote = ?extra_data.vote,
            validators = extra_data.validators.len(),
            "Assembled extra-data"
        );
        Ok(self.context.codec().encode(&extra_data))
    }

    /// Creator for the block following `parent` in `round`.
    pub fn create(
        &self,
        parent: &Header,
        round: u32,
    ) -> Result<BftBlockCreator, BlockCreationError> {
        let number = parent.number.checked_add(1).ok_or(BlockCreationError::BlockNumberOverflow)?;
        Ok(BftBlockCreator {
            parent_hash: parent.hash_slow(),
            number,
            round,
            beneficiary: self.local_address,
            gas_limit: self.gas_limit_calculator.next_gas_limit(parent.gas_limit),
            extra_data: self.create_extra_data(round, parent)?,
            min_transaction_gas_price: self.min_transaction_gas_price(),
            min_block_occupancy_ratio: self.min_block_occupancy_ratio(),
        })
    }
}
