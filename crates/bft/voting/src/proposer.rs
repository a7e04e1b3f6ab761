//! Choosing which pending proposal to embed in the next block.

use alloy_primitives::Address;
use bft_primitives::{ValidatorVote, VoteType};
use std::collections::HashMap;

use crate::VoteTally;

/// Pick the proposal `local_address` should vote on in the block after height `parent_number`.
///
/// Only proposals that would still change the validator set are eligible, and proposals
/// the local validator already has a counted vote for are skipped. The eligible ones are
/// ordered by address and rotated by block height, so every pending proposal is voted on
/// in turn over consecutive proposals.
pub fn select_vote(
    proposals: &HashMap<Address, VoteType>,
    local_address: Address,
    tally: &VoteTally,
    parent_number: u64,
) -> Option<ValidatorVote> {
    let mut eligible: Vec<(Address, VoteType)> = proposals
        .iter()
        .filter(|&(recipient, &polarity)| {
            polarity.is_add() != tally.is_validator(recipient) &&
                !tally.has_vote(&local_address, recipient, polarity)
        })
        .map(|(recipient, polarity)| (*recipient, *polarity))
        .collect();
    if eligible.is_empty() {
        return None
    }

    eligible.sort_unstable_by_key(|(recipient, _)| *recipient);
    let index = (parent_number % eligible.len() as u64) as usize;
    let (recipient, polarity) = eligible[index];
    Some(ValidatorVote::new(polarity, local_address, recipient))
}
