use alloy_primitives::{hex, Address, Bytes};
use bft_primitives::{BftExtraData, BftExtraDataCodec, RlpExtraDataCodec, Vote, VoteType};
use clap::{Args, Subcommand};
use tracing::debug;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the hex extra-data for the given contents
    Encode(EncodeArgs),
    /// Print hex extra-data as JSON
    Decode {
        /// Hex-encoded extra-data
        extra_data: Bytes,
    },
}

#[derive(Debug, Args)]
pub(crate) struct EncodeArgs {
    /// Vanity bytes, padded or truncated to 32 bytes
    #[arg(long, default_value = "0x")]
    vanity: Bytes,

    /// Validator address, repeatable
    #[arg(long = "validator")]
    validators: Vec<Address>,

    /// Consensus round
    #[arg(long, default_value_t = 0)]
    round: u32,

    /// Vote as `add:<address>` or `drop:<address>`
    #[arg(long, value_parser = parse_vote)]
    vote: Option<Vote>,
}

impl Command {
    pub(crate) fn execute(self) -> eyre::Result<()> {
        let codec = RlpExtraDataCodec::new();
        match self {
            Self::Encode(args) => {
                let mut validators = args.validators;
                validators.sort_unstable();
                validators.dedup();
                let extra_data =
                    BftExtraData::unsealed(&args.vanity, args.vote, args.round, validators);
                debug!(target: "bft::cli", ?extra_data, "Encoding extra-data");
                println!("{}", hex::encode_prefixed(codec.encode(&extra_data)));
            }
            Self::Decode { extra_data } => {
                let decoded = codec.decode(&extra_data)?;
                println!("{}", serde_json::to_string_pretty(&decoded)?);
            }
        }
        Ok(())
    }
}

fn parse_vote(s: &str) -> Result<Vote, String> {
    let (polarity, recipient) =
        s.split_once(':').ok_or_else(|| format!("expected `<add|drop>:<address>`, got `{s}`"))?;
    let polarity: VoteType = polarity.parse()?;
    let recipient: Address = recipient.parse().map_err(|err| format!("invalid address: {err}"))?;
    Ok(Vote::new(recipient, polarity))
}
