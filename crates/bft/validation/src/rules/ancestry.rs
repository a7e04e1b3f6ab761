use alloy_consensus::Header;
use tracing::trace;

use crate::DetachedHeaderRule;

/// Header links to its parent by hash and sits exactly one height above it.
#[derive(Debug, Default, Clone, Copy)]
pub struct AncestryRule;

impl DetachedHeaderRule for AncestryRule {
    fn validate(&self, header: &Header, parent: &Header) -> bool {
        let parent_hash = parent.hash_slow();
        if header.parent_hash != parent_hash {
            trace!(
                target: "bft::validation",
                expected = %parent_hash,
                got = %header.parent_hash,
                "Parent hash mismatch"
            );
            return false
        }

        if Some(header.number) != parent.number.checked_add(1) {
            trace!(
                target: "bft::validation",
                parent = parent.number,
                number = header.number,
                "Block number is not parent + 1"
            );
            return false
        }

        true
    }
}
