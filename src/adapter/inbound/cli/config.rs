//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: vitalstats config validate -c {}",
        path.display()
    ));
    output::note("3. Run: vitalstats run");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config, path: &Path) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "file_exists": path.exists(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, defaults in use)");
    }
    output::field("Fiscal start month", config.fiscal_start_month);
    output::field("Database", output::highlight(&config.database));
    output::field("Run at", &config.schedule.run_at);
    output::field(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );

    if output::verbosity() > 0 {
        output::section("TOML");
        output::lines(&config.to_toml()?);
    }
    Ok(())
}

/// Execute `config validate`.
///
/// A missing file at the default location is fine; an explicitly named one
/// is not.
pub fn execute_validate(path: &Path, explicit: bool) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());

    if !path.exists() && !explicit {
        output::warning("No configuration file; defaults apply");
        return Ok(());
    }

    Config::load(path)?;
    output::success("Config file is valid");
    output::field("Next", format!("vitalstats config show -c {}", path.display()));
    Ok(())
}
