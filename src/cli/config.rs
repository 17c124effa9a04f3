//! Config command handlers

use crate::cli::ConfigInitArgs;
use crate::config::OpsboardConfig;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../opsboard.example.toml");
const EXAMPLE_BASE_URL_LINE: &str = "base_url = \"http://127.0.0.1:8080\"";

/// The example config, with the upstream URL filled in when one is given.
pub fn render_config_template(upstream: Option<&str>) -> String {
    match upstream {
        Some(url) => {
            // A TOML string value quotes and escapes the URL.
            let value = toml::Value::String(url.to_string());
            EXAMPLE_CONFIG.replacen(EXAMPLE_BASE_URL_LINE, &format!("base_url = {}", value), 1)
        }
        None => EXAMPLE_CONFIG.to_string(),
    }
}

/// Handle `opsboard config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    let content = render_config_template(args.upstream.as_deref());
    // Refuse to write a file `serve` would reject.
    let config: OpsboardConfig = toml::from_str(&content)?;
    config.validate()?;

    fs::write(&args.output, content)?;

    println!("✓ Wrote {}", args.output.display());
    if args.upstream.is_none() {
        println!("  Set [upstream].base_url to your monitoring API before running `opsboard serve`.");
    }

    Ok(())
}
