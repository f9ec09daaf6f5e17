//! Configuration check command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate a configuration file and print the effective settings.
pub fn check<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(&json!({
            "valid": true,
            "config": path,
            "book": config.book,
            "logging": { "level": config.logging.level, "format": config.logging.format },
            "gate": {
                "minActiveDays": config.gate.min_active_days,
                "dayOffsetMinutes": config.gate.day_offset_minutes,
            },
        }))?;
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Book", config.book.display());
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);
    output::field("Active days", config.gate.min_active_days);
    output::field("Day offset", format!("{} min", config.gate.day_offset_minutes));

    if !config.book.exists() {
        output::warning("Book file does not exist yet; it will be created on first write");
    }

    Ok(())
}
