//! Logging helpers shared by the server and CLI.

use crate::config::LoggingConfig;

/// Build filter directives string from LoggingConfig
///
/// Produces `"<base>,opsboard::<component>=<level>,..."`, components in
/// key order.
///
/// # Examples
///
/// ```
/// use opsboard::config::{LogFormat, LoggingConfig};
/// use opsboard::logging::build_filter_directives;
/// use std::collections::BTreeMap;
///
/// let mut component_levels = BTreeMap::new();
/// component_levels.insert("poller".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,opsboard::poller=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    for (component, level) in &config.component_levels {
        filter_str.push_str(&format!(",opsboard::{}={}", component, level));
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_base_level_only() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_component_levels_sorted() {
        let mut levels = BTreeMap::new();
        levels.insert("poller".to_string(), "trace".to_string());
        levels.insert("client".to_string(), "debug".to_string());
        let config = LoggingConfig {
            component_levels: levels,
            ..LoggingConfig::default()
        };
        assert_eq!(
            build_filter_directives(&config),
            "info,opsboard::client=debug,opsboard::poller=trace"
        );
    }
}
