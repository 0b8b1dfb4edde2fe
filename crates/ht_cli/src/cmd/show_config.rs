use std::io::Write;

use ht_config::Config;

use crate::error::Result;

#[derive(Debug, clap::Args)]
pub(crate) struct ShowConfig {}

impl ShowConfig {
    pub(crate) fn run(self, config: &Config, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", config.to_toml()?)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn prints_toml() {
        let mut config = Config::default();
        config.set("table.strategy", "linear").unwrap();
        config.set("table.capacity", "5").unwrap();

        let mut out = Vec::new();
        ShowConfig {}.run(&config, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(Config::from_toml(&printed).unwrap(), config);
        assert!(printed.contains("strategy = \"linear\""));
    }
}
