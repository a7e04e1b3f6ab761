//! Validator set plus outstanding votes as of one block.

use alloy_primitives::Address;
use bft_primitives::{ValidatorVote, VoteType};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Validators and the votes cast for and against candidates since the last checkpoint.
///
/// A candidate is added or dropped once more than half of the current validators voted
/// for it. Votes for the candidate are then discarded, and a dropped validator's own votes
/// stop counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    validators: BTreeSet<Address>,
    add_votes: HashMap<Address, HashSet<Address>>,
    drop_votes: HashMap<Address, HashSet<Address>>,
}

impl VoteTally {
    /// Start a tally with no outstanding votes
    pub fn new(validators: impl IntoIterator<Item = Address>) -> Self {
        Self { validators: validators.into_iter().collect(), ..Default::default() }
    }

    /// Current validators in ascending address order
    pub fn validators(&self) -> Vec<Address> {
        self.validators.iter().copied().collect()
    }

    /// Whether `address` is a current validator
    pub fn is_validator(&self, address: &Address) -> bool {
        self.validators.contains(address)
    }

    /// Votes needed to add or drop a candidate
    pub fn votes_required(&self) -> usize {
        self.validators.len() / 2 + 1
    }

    /// Whether `proposer` has a counted vote of `polarity` for `recipient`.
    pub fn has_vote(&self, proposer: &Address, recipient: &Address, polarity: VoteType) -> bool {
        let votes = match polarity {
            VoteType::Add => &self.add_votes,
            VoteType::Drop => &self.drop_votes,
        };
        votes.get(recipient).is_some_and(|proposers| proposers.contains(proposer))
    }

    /// Count `vote`, applying the membership change once it reaches the threshold.
    ///
    /// Votes from non-validators, adds for existing validators and drops for non-validators
    /// are ignored. Returns `true` if the validator set changed.
    pub fn apply_vote(&mut self, vote: &ValidatorVote) -> bool {
        let ValidatorVote { polarity, proposer, recipient } = *vote;
        if !self.is_validator(&proposer) || polarity.is_add() == self.is_validator(&recipient) {
            debug!(target: "bft::voting", %proposer, %recipient, %polarity, "Ignoring vote");
            return false
        }

        let required = self.votes_required();
        let (counted, opposite) = match polarity {
            VoteType::Add => (&mut self.add_votes, &mut self.drop_votes),
            VoteType::Drop => (&mut self.drop_votes, &mut self.add_votes),
        };
        if let Some(proposers) = opposite.get_mut(&recipient) {
            proposers.remove(&proposer);
        }
        let proposers = counted.entry(recipient).or_default();
        proposers.insert(proposer);
        if proposers.len() < required {
            return false
        }

        self.add_votes.remove(&recipient);
        self.drop_votes.remove(&recipient);
        match polarity {
            VoteType::Add => {
                self.validators.insert(recipient);
            }
            VoteType::Drop => {
                self.validators.remove(&recipient);
                for proposers in self.add_votes.values_mut().chain(self.drop_votes.values_mut()) {
                    proposers.remove(&recipient);
                }
            }
        }
        debug!(
            target: "bft::voting",
            %recipient,
            %polarity,
            validators = self.validators.len(),
            "Validator set changed"
        );
        true
    }
}
