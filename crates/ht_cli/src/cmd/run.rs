use std::{fs, hash::BuildHasher, io, io::Write};

use camino::Utf8PathBuf;
use ht_config::{
    Config,
    table::{self, Hasher},
};
use ht_table::{AnyTable, Table as _, render::NULL};
use tracing::{debug, info, trace};

use crate::{
    error::Result,
    script::{self, Command, Key, Value},
};

#[derive(Debug, clap::Args)]
pub(crate) struct Run {
    /// Script to execute. Reads from stdin when omitted.
    script: Option<Utf8PathBuf>,
}

impl Run {
    pub(crate) fn run(self, config: &Config, out: &mut impl Write) -> Result<()> {
        let source = match &self.script {
            Some(path) => {
                trace!(%path, "Reading script file.");
                fs::read_to_string(path)?
            }
            None => io::read_to_string(io::stdin())?,
        };

        execute(config, &source, out)
    }
}

/// Run `source` against a fresh table built from `config`.
pub(crate) fn execute(config: &Config, source: &str, out: &mut impl Write) -> Result<()> {
    let commands = script::parse(source)?;
    let table::Config {
        strategy,
        capacity,
        hasher,
    } = config.table;

    info!(%strategy, capacity, ?hasher, "Running script.");

    match hasher {
        Hasher::Identity => apply(AnyTable::new(strategy, capacity)?, commands, out),
        Hasher::Random => apply(
            AnyTable::with_hasher(strategy, capacity, ahash::RandomState::new())?,
            commands,
            out,
        ),
    }
}

fn apply<S: BuildHasher>(
    mut table: AnyTable<Key, Value, S>,
    commands: Vec<Command>,
    out: &mut impl Write,
) -> Result<()> {
    for command in commands {
        trace!(?command, "Applying command.");

        let result = match command {
            Command::Put(key, value) => table.put(key, value).map(|()| "ok".to_owned()),
            Command::Get(key) => table
                .get(&key)
                .map(|value| value.as_deref().unwrap_or(NULL).to_owned()),
            Command::Remove(key) => table.remove(&key).map(|_| "ok".to_owned()),
            Command::Size => Ok(table.len().to_string()),
            Command::Empty => Ok(table.is_empty().to_string()),
            Command::Show => Ok(table.to_string()),
        };

        match result {
            Ok(line) => writeln!(out, "{line}")?,
            Err(error) => {
                debug!(%error, "Command failed.");
                writeln!(out, "error: {error}")?;
            }
        }
    }

    Ok(())
}
