use anyhow::Result;
use phonebook_config::AppConfig;
use phonebook_store::{ContactService, MemoryStore};
use serde::Serialize;
use std::io::{self, Write};

pub mod bench;
pub mod serve;

pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub json: bool,
}

impl Context<'_> {
    /// Fresh service over an in-memory store, seeded when configured.
    pub fn service(&self, seed: bool) -> ContactService<MemoryStore> {
        let store = if seed {
            MemoryStore::with_samples()
        } else {
            MemoryStore::new()
        };
        ContactService::new(store)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
