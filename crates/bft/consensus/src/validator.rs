use alloy_consensus::{Header, EMPTY_OMMER_ROOT_HASH};
use alloy_primitives::{B64, U256};
use bft_primitives::{BftExtraDataCodec, BFT_DIFFICULTY, BFT_MIX_HASH};
use bft_validation::{
    rules::{
        AncestryRule, ConstantFieldRule, GasLimitRangeAndDeltaRule, GasUsageRule,
        TimestampBoundedByFutureRule, TimestampMoreRecentThanParentRule,
    },
    BlockHeaderValidator, ProtocolContext,
};
use std::sync::Arc;

use crate::{
    rules::{BftCoinbaseRule, BftValidatorsRule, BftVanityDataRule},
    BftConfig, BftContext,
};

/// Header validator over [`BftContext`]
pub type BftBlockHeaderValidator = BlockHeaderValidator<BftContext>;

/// Protocol context BFT rules run against
pub type BftProtocolContext = ProtocolContext<BftContext>;

/// Build the header validator for a BFT chain configured by `config`.
pub fn bft_block_header_validator(
    config: &BftConfig,
    codec: Arc<dyn BftExtraDataCodec>,
) -> BftBlockHeaderValidator {
    BlockHeaderValidator::builder()
        .add_detached_rule(AncestryRule)
        .add_detached_rule(GasUsageRule)
        .add_detached_rule(GasLimitRangeAndDeltaRule::new(
            config.min_gas_limit,
            config.max_gas_limit,
        ))
        .add_detached_rule(TimestampMoreRecentThanParentRule::new(config.block_period_seconds))
        .add_detached_rule(TimestampBoundedByFutureRule::new(config.future_block_drift_seconds))
        .add_detached_rule(ConstantFieldRule::new(
            "mix_hash",
            |h: &Header| h.mix_hash,
            BFT_MIX_HASH,
        ))
        .add_detached_rule(ConstantFieldRule::new(
            "ommers_hash",
            |h: &Header| h.ommers_hash,
            EMPTY_OMMER_ROOT_HASH,
        ))
        .add_detached_rule(ConstantFieldRule::new(
            "difficulty",
            |h: &Header| h.difficulty,
            U256::from(BFT_DIFFICULTY),
        ))
        .add_detached_rule(ConstantFieldRule::new("nonce", |h: &Header| h.nonce, B64::ZERO))
        .add_detached_rule(BftVanityDataRule::new(codec))
        .add_attached_rule(BftCoinbaseRule)
        .add_attached_rule(BftValidatorsRule)
        .build()
}
