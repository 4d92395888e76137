//! Command dispatch: configuration resolution, logging setup and routing.

use std::path::Path;

use crate::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand, MetaCommand};
use crate::adapter::inbound::cli::output::{self, OutputConfig};
use crate::adapter::inbound::cli::config as config_command;
use crate::adapter::inbound::cli::{meta, popularity, run, serve, show};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::paths;

/// Resolve the effective configuration for this invocation.
///
/// An explicit `--config` must exist; the default location may be absent.
fn load_config(cli: &Cli, path: &Path) -> Result<Config> {
    let mut config = if cli.config.is_some() {
        Config::load(path)?
    } else {
        Config::load_or_default(path)?
    };
    if let Some(db) = &cli.db {
        config.database = db.to_string_lossy().into_owned();
    }
    Ok(config)
}

/// Run the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(
        OutputConfig::new(cli.json, cli.quiet, cli.verbose),
        &cli.color,
    );
    let config_path = cli.config.clone().unwrap_or_else(paths::default_config);

    let setup = || -> Result<Config> {
        let config = load_config(&cli, &config_path)?;
        config.init_logging(cli.quiet, cli.verbose);
        Ok(config)
    };

    match &cli.command {
        // These inspect the file itself rather than the effective configuration.
        Commands::Config(ConfigCommand::Init(args)) => {
            config_command::execute_init(&config_path, args.force)
        }
        Commands::Config(ConfigCommand::Validate) => {
            config_command::execute_validate(&config_path, cli.config.is_some())
        }
        Commands::Config(ConfigCommand::Show) => {
            config_command::execute_show(&setup()?, &config_path)
        }
        Commands::Run => run::execute(&setup()?),
        Commands::Show(args) => show::execute(&setup()?, args),
        Commands::Meta(MetaCommand::Get { product_id }) => {
            meta::execute_get(&setup()?, *product_id)
        }
        Commands::Meta(MetaCommand::Set { product_id, value }) => {
            meta::execute_set(&setup()?, *product_id, *value)
        }
        Commands::Popularity(args) => popularity::execute(&setup()?, args.limit),
        Commands::Serve(args) => serve::execute(&setup()?, args.now).await,
    }
}
