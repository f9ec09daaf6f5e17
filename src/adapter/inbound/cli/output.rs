//! CLI output formatting.
//!
//! Provides consistent terminal output with support for JSON mode (for
//! scripting) and quiet mode. Human output is colored only when the stream
//! supports it, unless overridden with `--color`.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::{OwoColorize, Stream};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit one machine-readable JSON document instead of text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    /// Create a new output configuration.
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    *config_cell().read()
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!(
        "{} {}",
        "stakeladder".if_supports_color(Stream::Stdout, |t| t.bold()),
        version.if_supports_color(Stream::Stdout, |t| t.dimmed())
    );
}

/// Print a section header.
pub fn section(title: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!(
        "  {:<16} {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        message
    );
}

/// Print a warning line. Shown in quiet mode too.
pub fn warning(message: &str) {
    if read_config().json {
        return;
    }
    println!(
        "  {} {}",
        "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()),
        message
    );
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            serde_json::json!({ "type": "error", "payload": { "message": message } })
        );
        return;
    }
    eprintln!(
        "  {} {}",
        "×".if_supports_color(Stream::Stderr, |t| t.red()),
        message
    );
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a value as the command's JSON document.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn json_output<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a money amount with two decimals.
#[must_use]
pub fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Format a signed amount, green when positive and red when negative.
#[must_use]
pub fn signed(value: Decimal) -> String {
    let text = money(value);
    if value > Decimal::ZERO {
        format!("+{}", text).if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    } else if value < Decimal::ZERO {
        text.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
    } else {
        text
    }
}

/// Format an optional percentage, `-` when undefined.
#[must_use]
pub fn percent(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v.round_dp(1)))
}
