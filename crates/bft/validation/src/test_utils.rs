//! Recording rules for pipeline tests.

use alloy_consensus::Header;
use alloy_primitives::B256;
use bft_primitives::InMemoryChainHeaders;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::{AttachedHeaderRule, DetachedHeaderRule, ProtocolContext};

/// Shared log of rule invocations, in call order.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<(&'static str, B256)>>>);

impl CallLog {
    fn record(&self, name: &'static str, parent: &Header) {
        self.0.lock().push((name, parent.hash_slow()));
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.0.lock().iter().map(|(name, _)| *name).collect()
    }

    pub(crate) fn parents(&self) -> Vec<B256> {
        self.0.lock().iter().map(|(_, parent)| *parent).collect()
    }
}

#[derive(Debug)]
pub(crate) struct RecordingDetached {
    name: &'static str,
    passes: bool,
    light: bool,
    log: CallLog,
}

impl RecordingDetached {
    pub(crate) fn new(name: &'static str, passes: bool, light: bool, log: &CallLog) -> Self {
        Self { name, passes, light, log: log.clone() }
    }

    pub(crate) fn passing(name: &'static str, light: bool, log: &CallLog) -> Self {
        Self::new(name, true, light, log)
    }

    pub(crate) fn failing(name: &'static str, light: bool, log: &CallLog) -> Self {
        Self::new(name, false, light, log)
    }
}

impl DetachedHeaderRule for RecordingDetached {
    fn validate(&self, _header: &Header, parent: &Header) -> bool {
        self.log.record(self.name, parent);
        self.passes
    }

    fn include_in_light_validation(&self) -> bool {
        self.light
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug)]
pub(crate) struct RecordingAttached {
    name: &'static str,
    passes: bool,
    log: CallLog,
}

impl RecordingAttached {
    pub(crate) fn new(name: &'static str, passes: bool, log: &CallLog) -> Self {
        Self { name, passes, log: log.clone() }
    }

    pub(crate) fn passing(name: &'static str, log: &CallLog) -> Self {
        Self::new(name, true, log)
    }

    pub(crate) fn failing(name: &'static str, log: &CallLog) -> Self {
        Self::new(name, false, log)
    }
}

impl<C> AttachedHeaderRule<C> for RecordingAttached {
    fn validate(&self, _header: &Header, parent: &Header, _context: &ProtocolContext<C>) -> bool {
        self.log.record(self.name, parent);
        self.passes
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Context over an empty in-memory chain, plus a handle to insert headers.
pub(crate) fn context_with_chain() -> (ProtocolContext<()>, Arc<InMemoryChainHeaders>) {
    let chain = Arc::new(InMemoryChainHeaders::new());
    (ProtocolContext::new(chain.clone(), ()), chain)
}
