//! Validator-set votes.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Direction of a validator-set vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Add the recipient to the validator set.
    Add,
    /// Drop the recipient from the validator set.
    Drop,
}

impl VoteType {
    /// Wire byte of an add vote.
    pub const ADD_BYTE: u8 = 0xFF;
    /// Wire byte of a drop vote.
    pub const DROP_BYTE: u8 = 0x00;

    /// Byte written into extra-data for this polarity.
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Add => Self::ADD_BYTE,
            Self::Drop => Self::DROP_BYTE,
        }
    }

    /// Parse a wire byte, `None` for anything but the two known values.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            Self::ADD_BYTE => Some(Self::Add),
            Self::DROP_BYTE => Some(Self::Drop),
            _ => None,
        }
    }

    /// Whether this is an add vote.
    pub const fn is_add(self) -> bool {
        matches!(self, Self::Add)
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

impl FromStr for VoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" | "auth" => Ok(Self::Add),
            "drop" | "remove" => Ok(Self::Drop),
            other => Err(format!("unknown vote type `{other}`, expected `add` or `drop`")),
        }
    }
}

/// A vote as embedded in a header's extra-data. At most one per header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vote {
    /// Address being voted on
    pub recipient: Address,
    /// Add or drop
    pub polarity: VoteType,
}

impl Vote {
    /// Create a new vote
    pub const fn new(recipient: Address, polarity: VoteType) -> Self {
        Self { recipient, polarity }
    }

    /// Vote to add `recipient`
    pub const fn add(recipient: Address) -> Self {
        Self::new(recipient, VoteType::Add)
    }

    /// Vote to drop `recipient`
    pub const fn drop(recipient: Address) -> Self {
        Self::new(recipient, VoteType::Drop)
    }
}

/// A vote together with the validator casting it.
///
/// Produced by a vote provider for the block the local node is about to propose, and
/// reconstructed from imported headers where the proposer is the header's beneficiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorVote {
    /// Add or drop
    pub polarity: VoteType,
    /// Validator casting the vote
    pub proposer: Address,
    /// Address being voted on
    pub recipient: Address,
}

impl ValidatorVote {
    /// Create a new validator vote
    pub const fn new(polarity: VoteType, proposer: Address, recipient: Address) -> Self {
        Self { polarity, proposer, recipient }
    }

    /// Attach a proposer to an extra-data vote
    pub const fn from_vote(vote: Vote, proposer: Address) -> Self {
        Self::new(vote.polarity, proposer, vote.recipient)
    }
}

impl From<ValidatorVote> for Vote {
    fn from(vote: ValidatorVote) -> Self {
        Self::new(vote.recipient, vote.polarity)
    }
}
