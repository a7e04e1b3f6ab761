use bft_primitives::BftExtraDataCodec;
use bft_voting::ValidatorProvider;
use std::sync::Arc;

/// Consensus state BFT rules and block creation read.
#[derive(Debug, Clone)]
pub struct BftContext {
    validator_provider: Arc<dyn ValidatorProvider>,
    codec: Arc<dyn BftExtraDataCodec>,
}

impl BftContext {
    /// Create a new context
    pub fn new(
        validator_provider: Arc<dyn ValidatorProvider>,
        codec: Arc<dyn BftExtraDataCodec>,
    ) -> Self {
        Self { validator_provider, codec }
    }

    /// Validator membership
    pub fn validator_provider(&self) -> &dyn ValidatorProvider {
        self.validator_provider.as_ref()
    }

    /// Extra-data codec
    pub fn codec(&self) -> &dyn BftExtraDataCodec {
        self.codec.as_ref()
    }
}
