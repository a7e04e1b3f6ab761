//! Header rules specific to BFT chains.

use alloy_consensus::Header;
use alloy_primitives::Address;
use bft_primitives::BftExtraDataCodec;
use bft_validation::{AttachedHeaderRule, DetachedHeaderRule, ProtocolContext};
use bft_voting::ValidatorProviderError;
use std::sync::Arc;
use tracing::{trace, warn};

use crate::BftContext;

/// Extra-data decodes and carries a vanity of the expected length.
#[derive(Debug, Clone)]
pub struct BftVanityDataRule {
    codec: Arc<dyn BftExtraDataCodec>,
}

impl BftVanityDataRule {
    /// Create a rule decoding with `codec`
    pub fn new(codec: Arc<dyn BftExtraDataCodec>) -> Self {
        Self { codec }
    }
}

impl DetachedHeaderRule for BftVanityDataRule {
    fn validate(&self, header: &Header, _parent: &Header) -> bool {
        if let Err(err) = self.codec.decode_header(header) {
            trace!(
                target: "bft::validation",
                number = header.number,
                %err,
                "Undecodable extra-data"
            );
            return false
        }
        true
    }
}

/// Beneficiary is a validator after the parent block.
#[derive(Debug, Default, Clone, Copy)]
pub struct BftCoinbaseRule;

impl AttachedHeaderRule<BftContext> for BftCoinbaseRule {
    fn validate(
        &self,
        header: &Header,
        parent: &Header,
        context: &ProtocolContext<BftContext>,
    ) -> bool {
        let Some(validators) = validators_after(parent, context) else { return false };
        if !validators.contains(&header.beneficiary) {
            trace!(
                target: "bft::validation",
                number = header.number,
                beneficiary = %header.beneficiary,
                "Block proposed by non-validator"
            );
            return false
        }
        true
    }
}

/// Validator list in extra-data equals the sorted validators after the parent block.
#[derive(Debug, Default, Clone, Copy)]
pub struct BftValidatorsRule;

impl AttachedHeaderRule<BftContext> for BftValidatorsRule {
    fn validate(
        &self,
        header: &Header,
        parent: &Header,
        context: &ProtocolContext<BftContext>,
    ) -> bool {
        let extra_data = match context.consensus_state().codec().decode_header(header) {
            Ok(extra_data) => extra_data,
            Err(err) => {
                trace!(
                    target: "bft::validation",
                    number = header.number,
                    %err,
                    "Undecodable extra-data"
                );
                return false
            }
        };
        let Some(expected) = validators_after(parent, context) else { return false };
        if extra_data.validators != expected {
            trace!(
                target: "bft::validation",
                number = header.number,
                listed = ?extra_data.validators,
                ?expected,
                "Validator list mismatch"
            );
            return false
        }
        true
    }
}

fn validators_after(
    parent: &Header,
    context: &ProtocolContext<BftContext>,
) -> Option<Vec<Address>> {
    context
        .consensus_state()
        .validator_provider()
        .validators_after_block(parent)
        .inspect_err(|err: &ValidatorProviderError| {
            warn!(
                target: "bft::validation",
                parent = parent.number,
                %err,
                "Failed to resolve validators"
            );
        })
        .ok()
}
