use bft_primitives::ChainHeaderReader;
use std::sync::Arc;

/// Chain state handed to attached rules and used to resolve parents.
///
/// `C` is the consensus-specific state, e.g. access to the validator set.
#[derive(Debug, Clone)]
pub struct ProtocolContext<C> {
    blockchain: Arc<dyn ChainHeaderReader>,
    consensus_state: C,
}

impl<C> ProtocolContext<C> {
    /// Create a new context
    pub fn new(blockchain: Arc<dyn ChainHeaderReader>, consensus_state: C) -> Self {
        Self { blockchain, consensus_state }
    }

    /// Header storage
    pub fn blockchain(&self) -> &dyn ChainHeaderReader {
        self.blockchain.as_ref()
    }

    /// Consensus-specific state
    pub const fn consensus_state(&self) -> &C {
        &self.consensus_state
    }
}
