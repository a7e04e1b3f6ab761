//! Chain header storage interface.

use alloy_consensus::Header;
use alloy_primitives::B256;
use parking_lot::RwLock;
use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
};

/// Storage fault while reading chain data.
///
/// Distinct from a missing header, which readers report as `Ok(None)`. A fault is
/// operational and may succeed on retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Underlying database failed
    #[error("database error: {0}")]
    Database(String),
}

/// Read access to stored block headers.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ChainHeaderReader: Send + Sync + Debug {
    /// Header with the given hash, if stored
    fn header_by_hash(&self, hash: B256) -> Result<Option<Header>, ProviderError>;

    /// Canonical header at the given height, if stored
    fn header_by_number(&self, number: u64) -> Result<Option<Header>, ProviderError>;

    /// Current canonical head, if any header is stored
    fn chain_head(&self) -> Result<Option<Header>, ProviderError>;
}

/// Header store kept entirely in memory.
///
/// The highest inserted header becomes the canonical head; inserting a header at an
/// existing height replaces the canonical entry for that height.
#[derive(Debug, Default)]
pub struct InMemoryChainHeaders {
    inner: RwLock<InMemoryChainInner>,
}

#[derive(Debug, Default)]
struct InMemoryChainInner {
    by_hash: HashMap<B256, Header>,
    canonical: BTreeMap<u64, B256>,
}

impl InMemoryChainHeaders {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `headers`
    pub fn from_headers(headers: impl IntoIterator<Item = Header>) -> Self {
        let chain = Self::new();
        for header in headers {
            chain.insert(header);
        }
        chain
    }

    /// Store a header, returning its hash
    pub fn insert(&self, header: Header) -> B256 {
        let hash = header.hash_slow();
        let mut inner = self.inner.write();
        inner.canonical.insert(header.number, hash);
        inner.by_hash.insert(hash, header);
        hash
    }

    /// Number of stored headers
    pub fn len(&self) -> usize {
        self.inner.read().by_hash.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChainHeaderReader for InMemoryChainHeaders {
    fn header_by_hash(&self, hash: B256) -> Result<Option<Header>, ProviderError> {
        Ok(self.inner.read().by_hash.get(&hash).cloned())
    }

    fn header_by_number(&self, number: u64) -> Result<Option<Header>, ProviderError> {
        let inner = self.inner.read();
        Ok(inner.canonical.get(&number).and_then(|hash| inner.by_hash.get(hash)).cloned())
    }

    fn chain_head(&self) -> Result<Option<Header>, ProviderError> {
        let inner = self.inner.read();
        Ok(inner
            .canonical
            .last_key_value()
            .and_then(|(_, hash)| inner.by_hash.get(hash))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(number: u64, parent_hash: B256) -> Header {
        Header { number, parent_hash, ..Default::default() }
    }

    #[test]
    fn test_lookup_by_hash_and_number() {
        let chain = InMemoryChainHeaders::new();
        let genesis = header(0, B256::ZERO);
        let genesis_hash = chain.insert(genesis.clone());
        let child_hash = chain.insert(header(1, genesis_hash));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.header_by_hash(genesis_hash).unwrap(), Some(genesis));
        assert_eq!(chain.header_by_number(1).unwrap().unwrap().hash_slow(), child_hash);
        assert_eq!(chain.chain_head().unwrap().unwrap().number, 1);
    }

    #[test]
    fn test_missing_header_is_none() {
        let chain = InMemoryChainHeaders::new();
        assert!(chain.is_empty());
        assert_eq!(chain.header_by_hash(B256::repeat_byte(1)).unwrap(), None);
        assert_eq!(chain.header_by_number(5).unwrap(), None);
        assert_eq!(chain.chain_head().unwrap(), None);
    }
}
