//! Details command implementation

use crate::cli::output::format_details_pretty;
use crate::cli::DetailsArgs;
use crate::client::{FetchError, Upstream};

/// Fetch one host's deep metrics. An `error` field from the API fails the command.
pub async fn handle_details(
    args: &DetailsArgs,
    upstream: &dyn Upstream,
) -> Result<String, Box<dyn std::error::Error>> {
    let details = upstream.db_details(&args.ip).await?;
    if let Some(message) = details.error {
        return Err(Box::new(FetchError::Upstream(message)));
    }

    if args.json {
        return Ok(serde_json::to_string_pretty(&details)?);
    }
    Ok(format_details_pretty(&args.ip, &details))
}
