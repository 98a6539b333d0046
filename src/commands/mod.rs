//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `extract.rs` — policy-rule extraction through the local model.
//! - `generate.rs` — synthetic dataset generation.
//!
//! ## Principles
//! - Resolve configuration (flags, env, files) here, once.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod extract;
pub mod generate;

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Extract(args) => extract::handle_extract(cli.json, args),
        Commands::Generate(args) => generate::handle_generate(cli.json, args),
    }
}
