mod run;
mod show_config;

use std::io::Write;

use ht_config::Config;

use crate::error::Result;

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Commands {
    /// Execute a table script.
    Run(run::Run),

    /// Print the effective configuration as TOML.
    #[command(visible_alias = "cfg")]
    ShowConfig(show_config::ShowConfig),
}

impl Commands {
    pub(crate) fn run(self, config: &Config, out: &mut impl Write) -> Result<()> {
        match self {
            Commands::Run(args) => args.run(config, out),
            Commands::ShowConfig(args) => args.run(config, out),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Commands::Run(_) => "run",
            Commands::ShowConfig(_) => "show-config",
        }
    }
}
