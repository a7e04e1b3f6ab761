//! Pending local proposals.

use alloy_primitives::Address;
use bft_primitives::VoteType;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// The local node's pending validator-set proposals, one per address.
///
/// Shared by the operator-facing command surface and the block proposer, so every
/// operation takes `&self`. None of them can fail.
#[derive(Debug, Default)]
pub struct VoteStore {
    proposals: RwLock<HashMap<Address, VoteType>>,
}

impl VoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Propose `polarity` for `recipient`, replacing any earlier proposal for it.
    pub fn cast(&self, recipient: Address, polarity: VoteType) {
        let previous = self.proposals.write().insert(recipient, polarity);
        debug!(target: "bft::voting", %recipient, %polarity, ?previous, "Proposal cast");
    }

    /// Withdraw the proposal for `recipient`, if any.
    pub fn discard(&self, recipient: Address) {
        if let Some(polarity) = self.proposals.write().remove(&recipient) {
            debug!(target: "bft::voting", %recipient, %polarity, "Proposal discarded");
        }
    }

    /// Copy of the current proposals
    pub fn snapshot(&self) -> HashMap<Address, VoteType> {
        self.proposals.read().clone()
    }

    /// Number of pending proposals
    pub fn len(&self) -> usize {
        self.proposals.read().len()
    }

    /// Whether there are no pending proposals
    pub fn is_empty(&self) -> bool {
        self.proposals.read().is_empty()
    }
}
