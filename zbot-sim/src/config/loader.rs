//! TOML to `ShowcaseConfig`

use std::path::Path;

use tracing::{debug, info};
use zbot_core::config::ShowcaseConfig;

use crate::error::Result;

/// Embedded default configuration
pub const EMBEDDED_CONFIG: &str = include_str!("../../zbot.toml");

/// Parse and validate a TOML document
///
/// Missing tables and fields take their defaults.
pub fn parse(text: &str) -> Result<ShowcaseConfig> {
    let config: ShowcaseConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load from `path`, or from the embedded defaults when `path` is None
pub fn load(path: Option<&Path>) -> Result<ShowcaseConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            parse(&text)?
        }
        None => {
            info!("Using embedded configuration");
            parse(EMBEDDED_CONFIG)?
        }
    };

    debug!(
        "Grid {}x{} with {} walls, scan {} ms, carousel {} ms",
        config.grid.cols,
        config.grid.rows,
        config.grid.walls.len(),
        config.sequencer.scan_duration_ms,
        config.carousel.interval_ms
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use zbot_core::config::ConfigError;

    #[test]
    fn test_embedded_matches_defaults() {
        assert_eq!(parse(EMBEDDED_CONFIG).unwrap(), ShowcaseConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = parse(
            r#"
            [grid]
            cols = 4
            rows = 3
            walls = [5, 6]

            [carousel]
            restart_on_select = true
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.unit_count(), 12);
        assert_eq!(config.grid.walls.as_slice(), &[5, 6]);
        assert!(config.carousel.restart_on_select);
        assert_eq!(config.carousel.interval_ms, 2000);
        assert_eq!(config.sequencer.unit_interval_ms, 50);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse("").unwrap(), ShowcaseConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse("[grid]\ncols = 2\nrows = 2\nwalls = [9]\n").unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig(ConfigError::WallOutOfRange(9))
        ));

        let err = parse("[sequencer]\nunit_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(parse("[grid\ncols = "), Err(SimError::Toml(_))));
        assert!(matches!(
            parse("[grid]\ncols = \"six\"\n"),
            Err(SimError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
