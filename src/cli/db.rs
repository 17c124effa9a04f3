//! Check-db command implementation

use crate::cli::output::format_topology_pretty;
use crate::cli::CheckDbArgs;
use crate::client::Upstream;

/// Run the topology check once.
pub async fn handle_check_db(
    args: &CheckDbArgs,
    upstream: &dyn Upstream,
) -> Result<String, Box<dyn std::error::Error>> {
    let topology = upstream.check_db().await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&topology)?);
    }
    Ok(format_topology_pretty(&topology))
}
