//! Status command implementation

use crate::cli::output::{format_repl_errors_pretty, format_status_pretty};
use crate::cli::StatusArgs;
use crate::client::Upstream;
use colored::Colorize;
use serde_json::json;

/// Fetch the snapshot and replication errors once and format them.
///
/// The snapshot is required; a failed replication error fetch is reported
/// in the output instead of failing the command.
pub async fn handle_status(
    args: &StatusArgs,
    upstream: &dyn Upstream,
    hours: u32,
) -> Result<String, Box<dyn std::error::Error>> {
    let (snapshot, repl_errors) =
        tokio::join!(upstream.status_snapshot(), upstream.repl_errors(hours));
    let snapshot = snapshot?;

    if args.json {
        let repl_json = match &repl_errors {
            Ok(report) => serde_json::to_value(report)?,
            Err(_) => serde_json::Value::Null,
        };
        return Ok(serde_json::to_string_pretty(&json!({
            "snapshot": snapshot,
            "repl_errors": repl_json,
            "repl_error_hours": hours,
        }))?);
    }

    let mut output = format_status_pretty(&snapshot);
    output.push_str("\n\n");
    match repl_errors {
        Ok(report) => output.push_str(&format_repl_errors_pretty(&report, hours)),
        Err(e) => output.push_str(
            &format!("Replication errors unavailable: {}", e)
                .yellow()
                .to_string(),
        ),
    }
    Ok(output)
}
