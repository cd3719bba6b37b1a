use crate::api::Api;
use crate::commands::Context;
use anyhow::{Context as _, Result};
use clap::{ArgAction, Args};
use std::io::{self, BufRead, Write};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Start with an empty phonebook even if sample contacts are configured
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_seed: bool,
}

pub fn serve(ctx: &Context<'_>, args: ServeArgs) -> Result<()> {
    let seed = ctx.config.seed_sample_contacts && !args.no_seed;
    let service = ctx.service(seed);
    let api = Api::new(&service, ctx.config.logging.requests);
    debug!(seeded = seed, "serving requests from stdin");

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    for line in stdin.lines() {
        let line = line.with_context(|| "read request")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = api.handle_line(&line);
        serde_json::to_writer(&mut stdout, &response).with_context(|| "write response")?;
        writeln!(stdout)?;
        stdout.flush()?;
    }
    Ok(())
}
