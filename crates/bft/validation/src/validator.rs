use alloy_consensus::Header;
use alloy_primitives::B256;
use bft_primitives::ProviderError;
use tracing::{debug, trace};

use crate::{
    AttachedHeaderRule, DetachedHeaderRule, HeaderValidationMode, HeaderValidationRule,
    ProtocolContext,
};

/// Result of validating a header.
///
/// A rejection is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every eligible rule passed
    Valid,
    /// The named rule rejected the header; later rules were not run
    Invalid {
        /// Name of the rejecting rule
        rule: &'static str,
    },
    /// The parent header is not in chain storage; no rule was run
    ParentUnavailable {
        /// Declared parent hash of the header
        parent_hash: B256,
    },
}

impl ValidationOutcome {
    /// Whether the header was accepted
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Runs an ordered list of header rules.
///
/// The rule list is fixed at [`BlockHeaderValidatorBuilder::build`] and always runs in
/// registration order. Cheap rejections should therefore be registered first.
#[derive(Debug)]
pub struct BlockHeaderValidator<C> {
    rules: Box<[HeaderValidationRule<C>]>,
}

impl<C> BlockHeaderValidator<C> {
    /// Start building a validator
    pub const fn builder() -> BlockHeaderValidatorBuilder<C> {
        BlockHeaderValidatorBuilder { rules: Vec::new() }
    }

    /// Registered rules in execution order
    pub fn rules(&self) -> &[HeaderValidationRule<C>] {
        &self.rules
    }

    /// Validate `header` against an already resolved `parent`.
    pub fn validate_header(
        &self,
        header: &Header,
        parent: &Header,
        context: &ProtocolContext<C>,
        mode: HeaderValidationMode,
    ) -> ValidationOutcome {
        for rule in self.rules.iter() {
            if !rule.is_eligible(mode) {
                trace!(target: "bft::validation", rule = rule.name(), %mode, "Skipping rule");
                continue
            }

            if !rule.validate(header, parent, context) {
                debug!(
                    target: "bft::validation",
                    rule = rule.name(),
                    number = header.number,
                    hash = %header.hash_slow(),
                    %mode,
                    "Invalid block header"
                );
                return ValidationOutcome::Invalid { rule: rule.name() }
            }
        }

        ValidationOutcome::Valid
    }

    /// Validate `header`, looking its parent up in chain storage first.
    ///
    /// A parent that is not stored yields [`ValidationOutcome::ParentUnavailable`]
    /// without running any rule. A storage fault is returned as an error so the caller
    /// can retry.
    ///
    /// The lookup may hit disk; callers on a latency-sensitive path should account for it.
    pub fn validate_header_from_chain(
        &self,
        header: &Header,
        context: &ProtocolContext<C>,
        mode: HeaderValidationMode,
    ) -> Result<ValidationOutcome, ProviderError> {
        let Some(parent) = context.blockchain().header_by_hash(header.parent_hash)? else {
            debug!(
                target: "bft::validation",
                number = header.number,
                parent_hash = %header.parent_hash,
                "Parent header unavailable"
            );
            return Ok(ValidationOutcome::ParentUnavailable { parent_hash: header.parent_hash })
        };

        Ok(self.validate_header(header, &parent, context, mode))
    }
}

/// Collects rules for a [`BlockHeaderValidator`] in execution order.
#[derive(Debug)]
pub struct BlockHeaderValidatorBuilder<C> {
    rules: Vec<HeaderValidationRule<C>>,
}

impl<C> Default for BlockHeaderValidatorBuilder<C> {
    fn default() -> Self {
        BlockHeaderValidator::builder()
    }
}

impl<C> BlockHeaderValidatorBuilder<C> {
    /// Append a rule
    pub fn add_rule(mut self, rule: HeaderValidationRule<C>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a detached rule
    pub fn add_detached_rule(self, rule: impl DetachedHeaderRule + 'static) -> Self {
        self.add_rule(HeaderValidationRule::detached(rule))
    }

    /// Append an attached rule
    pub fn add_attached_rule(self, rule: impl AttachedHeaderRule<C> + 'static) -> Self {
        self.add_rule(HeaderValidationRule::attached(rule))
    }

    /// Freeze the rule list
    pub fn build(self) -> BlockHeaderValidator<C> {
        BlockHeaderValidator { rules: self.rules.into_boxed_slice() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{context_with_chain, CallLog, RecordingAttached, RecordingDetached};
    use assert_matches::assert_matches;
    use bft_primitives::InMemoryChainHeaders;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn header(number: u64) -> Header {
        Header { number, parent_hash: B256::repeat_byte(number as u8), ..Default::default() }
    }

    #[test]
    fn test_validate_header_all_rules_pass() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_attached_rule(RecordingAttached::passing("attached", &log))
            .add_detached_rule(RecordingDetached::passing("detached", true, &log))
            .build();
        let (ctx, _) = context_with_chain();

        let outcome = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Full,
        );

        assert_eq!(outcome, ValidationOutcome::Valid);
        assert_eq!(log.calls(), vec!["attached", "detached"]);
    }

    #[test]
    fn test_failing_attached_rule_stops_pipeline() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_attached_rule(RecordingAttached::passing("passing1", &log))
            .add_attached_rule(RecordingAttached::failing("failing", &log))
            .add_detached_rule(RecordingDetached::passing("passing2", true, &log))
            .build();
        let (ctx, _) = context_with_chain();

        let outcome = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Full,
        );

        assert_eq!(outcome, ValidationOutcome::Invalid { rule: "failing" });
        assert_eq!(log.calls(), vec!["passing1", "failing"]);
    }

    #[test]
    fn test_failing_detached_rule_stops_pipeline() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_detached_rule(RecordingDetached::passing("passing1", true, &log))
            .add_detached_rule(RecordingDetached::failing("failing", true, &log))
            .add_attached_rule(RecordingAttached::passing("passing2", &log))
            .build();
        let (ctx, _) = context_with_chain();

        let outcome = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Full,
        );

        assert!(!outcome.is_valid());
        assert_eq!(log.calls(), vec!["passing1", "failing"]);
    }

    #[test]
    fn test_empty_rule_set_is_valid() {
        let validator = BlockHeaderValidator::<()>::builder().build();
        let (ctx, _) = context_with_chain();

        for mode in [HeaderValidationMode::Full, HeaderValidationMode::Light] {
            assert!(validator.validate_header(&header(2), &header(1), &ctx, mode).is_valid());
        }
    }

    #[test]
    fn test_light_skips_rules_not_flagged_for_light() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_detached_rule(RecordingDetached::passing("light", true, &log))
            .add_detached_rule(RecordingDetached::failing("heavy", false, &log))
            .build();
        let (ctx, _) = context_with_chain();

        let light = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Light,
        );
        assert!(light.is_valid());
        assert_eq!(log.calls(), vec!["light"]);

        let full = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Full,
        );
        assert_eq!(full, ValidationOutcome::Invalid { rule: "heavy" });
    }

    #[test]
    fn test_light_never_invokes_attached_rules() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_attached_rule(RecordingAttached::failing("attached", &log))
            .add_detached_rule(RecordingDetached::passing("detached", true, &log))
            .build();
        let (ctx, _) = context_with_chain();

        let light = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Light,
        );
        assert!(light.is_valid());
        assert_eq!(log.calls(), vec!["detached"]);

        let full = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Full,
        );
        assert!(!full.is_valid());
    }

    #[test]
    fn test_rules_run_in_registration_order() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_attached_rule(RecordingAttached::passing("rule1", &log))
            .add_detached_rule(RecordingDetached::passing("rule2", true, &log))
            .add_detached_rule(RecordingDetached::passing("rule3", false, &log))
            .add_attached_rule(RecordingAttached::passing("rule4", &log))
            .build();
        let (ctx, _) = context_with_chain();

        let outcome = validator.validate_header(
            &header(2),
            &header(1),
            &ctx,
            HeaderValidationMode::Full,
        );

        assert!(outcome.is_valid());
        assert_eq!(log.calls(), vec!["rule1", "rule2", "rule3", "rule4"]);
        assert_eq!(validator.rules().len(), 4);
    }

    #[test]
    fn test_validate_header_from_chain_resolves_parent() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_attached_rule(RecordingAttached::passing("attached", &log))
            .build();
        let (ctx, chain) = context_with_chain();
        let parent = header(1);
        let parent_hash = chain.insert(parent.clone());
        let child = Header { number: 2, parent_hash, ..Default::default() };

        let outcome =
            validator.validate_header_from_chain(&child, &ctx, HeaderValidationMode::Full).unwrap();

        assert!(outcome.is_valid());
        assert_eq!(log.parents(), vec![parent_hash]);
    }

    #[test]
    fn test_validate_header_from_chain_fails_without_parent() {
        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_attached_rule(RecordingAttached::passing("attached", &log))
            .add_detached_rule(RecordingDetached::passing("detached", true, &log))
            .build();
        let (ctx, _) = context_with_chain();
        let orphan = header(7);

        for mode in [HeaderValidationMode::Full, HeaderValidationMode::Light] {
            let outcome = validator.validate_header_from_chain(&orphan, &ctx, mode).unwrap();
            assert_matches!(
                outcome,
                ValidationOutcome::ParentUnavailable { parent_hash }
                    if parent_hash == orphan.parent_hash
            );
        }
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_validate_header_from_chain_propagates_storage_fault() {
        #[derive(Debug)]
        struct BrokenStorage;

        impl bft_primitives::ChainHeaderReader for BrokenStorage {
            fn header_by_hash(&self, _: B256) -> Result<Option<Header>, ProviderError> {
                Err(ProviderError::Database("disk on fire".into()))
            }

            fn header_by_number(&self, _: u64) -> Result<Option<Header>, ProviderError> {
                Err(ProviderError::Database("disk on fire".into()))
            }

            fn chain_head(&self) -> Result<Option<Header>, ProviderError> {
                Err(ProviderError::Database("disk on fire".into()))
            }
        }

        let log = CallLog::default();
        let validator = BlockHeaderValidator::builder()
            .add_attached_rule(RecordingAttached::passing("attached", &log))
            .build();
        let ctx = ProtocolContext::new(Arc::new(BrokenStorage), ());

        let result =
            validator.validate_header_from_chain(&header(3), &ctx, HeaderValidationMode::Light);

        assert_matches!(result, Err(ProviderError::Database(_)));
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_in_memory_chain_context() {
        let chain = Arc::new(InMemoryChainHeaders::new());
        let hash = chain.insert(header(0));
        let ctx = ProtocolContext::new(chain, 42u8);

        assert_eq!(*ctx.consensus_state(), 42);
        assert!(ctx.blockchain().header_by_hash(hash).unwrap().is_some());
    }

    proptest! {
        #[test]
        fn test_full_mode_runs_prefix_up_to_first_failure(
            outcomes in proptest::collection::vec(any::<(bool, bool, bool)>(), 0..12)
        ) {
            const NAMES: [&str; 12] =
                ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11"];
            let log = CallLog::default();
            let mut builder = BlockHeaderValidator::builder();
            for (i, (attached, passes, light)) in outcomes.iter().copied().enumerate() {
                builder = if attached {
                    builder.add_attached_rule(RecordingAttached::new(NAMES[i], passes, &log))
                } else {
                    builder.add_detached_rule(RecordingDetached::new(NAMES[i], passes, light, &log))
                };
            }
            let validator = builder.build();
            let (ctx, _) = context_with_chain();

            let outcome = validator.validate_header(
                &header(2),
                &header(1),
                &ctx,
                HeaderValidationMode::Full,
            );

            let first_failure = outcomes.iter().position(|(_, passes, _)| !passes);
            let expected_calls = first_failure.map_or(outcomes.len(), |i| i + 1);
            prop_assert_eq!(log.calls(), NAMES[..expected_calls].to_vec());
            prop_assert_eq!(outcome.is_valid(), first_failure.is_none());
        }

        #[test]
        fn test_light_mode_runs_only_flagged_detached_rules(
            outcomes in proptest::collection::vec(any::<(bool, bool, bool)>(), 0..12)
        ) {
            const NAMES: [&str; 12] =
                ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11"];
            let log = CallLog::default();
            let mut builder = BlockHeaderValidator::builder();
            for (i, (attached, passes, light)) in outcomes.iter().copied().enumerate() {
                builder = if attached {
                    builder.add_attached_rule(RecordingAttached::new(NAMES[i], passes, &log))
                } else {
                    builder.add_detached_rule(RecordingDetached::new(NAMES[i], passes, light, &log))
                };
            }
            let validator = builder.build();
            let (ctx, _) = context_with_chain();

            let outcome = validator.validate_header(
                &header(2),
                &header(1),
                &ctx,
                HeaderValidationMode::Light,
            );

            let mut expected = Vec::new();
            let mut valid = true;
            for (i, (attached, passes, light)) in outcomes.iter().copied().enumerate() {
                if attached || !light {
                    continue
                }
                expected.push(NAMES[i]);
                if !passes {
                    valid = false;
                    break
                }
            }
            prop_assert_eq!(log.calls(), expected);
            prop_assert_eq!(outcome.is_valid(), valid);
        }
    }
}
