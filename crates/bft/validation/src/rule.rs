use alloy_consensus::Header;
use std::fmt::Debug;

use crate::{HeaderValidationMode, ProtocolContext};

/// A rule that judges a header from the header and its parent alone.
pub trait DetachedHeaderRule: Send + Sync + Debug {
    /// Whether `header` is valid as a child of `parent`
    fn validate(&self, header: &Header, parent: &Header) -> bool;

    /// Whether this rule also runs during light validation
    fn include_in_light_validation(&self) -> bool {
        true
    }

    /// Name reported when this rule rejects a header
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// A rule that needs chain state beyond the header pair.
pub trait AttachedHeaderRule<C>: Send + Sync + Debug {
    /// Whether `header` is valid as a child of `parent` given `context`
    fn validate(&self, header: &Header, parent: &Header, context: &ProtocolContext<C>) -> bool;

    /// Name reported when this rule rejects a header
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// One entry of a validator's rule list.
#[derive(Debug)]
pub enum HeaderValidationRule<C> {
    /// Rule over `(header, parent)`
    Detached(Box<dyn DetachedHeaderRule>),
    /// Rule over `(header, parent, context)`, full validation only
    Attached(Box<dyn AttachedHeaderRule<C>>),
}

impl<C> HeaderValidationRule<C> {
    /// Wrap a detached rule
    pub fn detached(rule: impl DetachedHeaderRule + 'static) -> Self {
        Self::Detached(Box::new(rule))
    }

    /// Wrap an attached rule
    pub fn attached(rule: impl AttachedHeaderRule<C> + 'static) -> Self {
        Self::Attached(Box::new(rule))
    }

    /// Whether this rule runs under `mode`
    pub fn is_eligible(&self, mode: HeaderValidationMode) -> bool {
        match (mode, self) {
            (HeaderValidationMode::Full, _) => true,
            (HeaderValidationMode::Light, Self::Detached(rule)) => {
                rule.include_in_light_validation()
            }
            (HeaderValidationMode::Light, Self::Attached(_)) => false,
        }
    }

    /// Name of the wrapped rule
    pub fn name(&self) -> &'static str {
        match self {
            Self::Detached(rule) => rule.name(),
            Self::Attached(rule) => rule.name(),
        }
    }

    /// Run the wrapped rule with the arguments its kind takes
    pub fn validate(&self, header: &Header, parent: &Header, context: &ProtocolContext<C>) -> bool {
        match self {
            Self::Detached(rule) => rule.validate(header, parent),
            Self::Attached(rule) => rule.validate(header, parent, context),
        }
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
