//! BFT consensus rules.
//!
//! Binds the generic validation pipeline to BFT chains: the [`BftContext`] gives attached
//! rules access to validator membership, and [`bft_block_header_validator`] registers the
//! full rule list a BFT header must pass.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
mod context;
pub mod rules;
mod validator;

pub use config::{BftConfig, BftConfigError};
pub use context::BftContext;
pub use validator::{bft_block_header_validator, BftBlockHeaderValidator, BftProtocolContext};
