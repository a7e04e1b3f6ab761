use alloy_consensus::Header;
use std::fmt::Debug;
use tracing::trace;

use crate::DetachedHeaderRule;

/// A header field must always hold one fixed value.
#[derive(Debug, Clone)]
pub struct ConstantFieldRule<T> {
    field: &'static str,
    extract: fn(&Header) -> T,
    expected: T,
}

impl<T> ConstantFieldRule<T> {
    /// Create a rule checking that `extract(header) == expected`
    pub const fn new(field: &'static str, extract: fn(&Header) -> T, expected: T) -> Self {
        Self { field, extract, expected }
    }
}

impl<T> DetachedHeaderRule for ConstantFieldRule<T>
where
    T: PartialEq + Debug + Send + Sync,
{
    fn validate(&self, header: &Header, _parent: &Header) -> bool {
        let actual = (self.extract)(header);
        if actual != self.expected {
            trace!(
                target: "bft::validation",
                field = self.field,
                expected = ?self.expected,
                got = ?actual,
                "Constant field mismatch"
            );
            return false
        }
        true
    }

    fn name(&self) -> &'static str {
        self.field
    }
}
