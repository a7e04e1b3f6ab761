use alloy_consensus::Header;
use bft_consensus::{bft_block_header_validator, BftConfig, BftContext};
use bft_primitives::{InMemoryChainHeaders, RlpExtraDataCodec};
use bft_validation::{HeaderValidationMode, ProtocolContext, ValidationOutcome};
use bft_voting::BlockValidatorProvider;
use clap::Args;
use eyre::{bail, WrapErr};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

#[derive(Debug, Args)]
pub(crate) struct Command {
    /// JSON array of headers, genesis first
    #[arg(long)]
    chain: PathBuf,

    /// BFT config JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Validation mode
    #[arg(long, default_value_t = HeaderValidationMode::Full)]
    mode: HeaderValidationMode,
}

impl Command {
    pub(crate) fn execute(self) -> eyre::Result<()> {
        let config = match &self.config {
            Some(path) => BftConfig::load(path)
                .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
            None => BftConfig::default(),
        };
        let raw = std::fs::read_to_string(&self.chain)
            .wrap_err_with(|| format!("failed to read {}", self.chain.display()))?;
        let headers: Vec<Header> = serde_json::from_str(&raw).wrap_err("invalid header JSON")?;

        let rejected = validate_chain(&config, headers, self.mode)?;
        if rejected > 0 {
            bail!("{rejected} header(s) rejected")
        }
        Ok(())
    }
}

/// Import `headers` one by one, validating each against the headers before it.
///
/// Returns the number of rejected headers. Rejected headers are not imported.
fn validate_chain(
    config: &BftConfig,
    headers: Vec<Header>,
    mode: HeaderValidationMode,
) -> eyre::Result<usize> {
    let mut headers = headers.into_iter();
    let Some(genesis) = headers.next() else { bail!("chain file contains no headers") };

    let codec = Arc::new(RlpExtraDataCodec::new());
    let chain = Arc::new(InMemoryChainHeaders::from_headers([genesis]));
    let provider = BlockValidatorProvider::new(chain.clone(), codec.clone(), config.epoch_length);
    let context =
        ProtocolContext::new(chain.clone(), BftContext::new(Arc::new(provider), codec.clone()));
    let validator = bft_block_header_validator(config, codec);
    info!(target: "bft::cli", %mode, rules = validator.rules().len(), "Validating chain");

    let mut rejected = 0;
    for header in headers {
        let number = header.number;
        let hash = header.hash_slow();
        match validator.validate_header_from_chain(&header, &context, mode)? {
            ValidationOutcome::Valid => {
                println!("{number} {hash} valid");
                chain.insert(header);
            }
            ValidationOutcome::Invalid { rule } => {
                println!("{number} {hash} invalid ({rule})");
                rejected += 1;
            }
            ValidationOutcome::ParentUnavailable { parent_hash } => {
                warn!(target: "bft::cli", number, %parent_hash, "Unknown parent");
                println!("{number} {hash} unknown parent {parent_hash}");
                rejected += 1;
            }
        }
    }
    Ok(rejected)
}
