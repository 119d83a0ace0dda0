pub mod schema;

pub use schema::{GeneratorConfig, IqConfig, ServerConfig, DEFAULT_MAX_BODY_BYTES};

use iq_core::{IqError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `IqConfig::default()` if
/// the file doesn't exist so both binaries always have sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<IqConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(IqConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| IqError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<IqConfig> {
    let config: IqConfig =
        toml::from_str(raw).map_err(|e| IqError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("iq").join("iq.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load("/definitely/not/here/iq.toml").unwrap();
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.server.capacity, 1_000);
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("iq-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();
        let config = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = parse("[generator]\npoints = 64\n").unwrap();
        assert_eq!(config.generator.points, 64);
        assert_eq!(config.generator.interval_ms, 1_000);
        assert_eq!(config.server.bind, "0.0.0.0");
    }

    #[test]
    fn body_limit_read_from_file() {
        let config = parse("[server]\nmax_body_bytes = 4096\n").unwrap();
        assert_eq!(config.server.max_body_bytes, 4096);
        assert!(parse("[server]\nmax_body_bytes = 512\n[generator]\npoints = 10\n").is_err());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = parse("[server\nport = ").unwrap_err();
        assert!(matches!(err, IqError::Config(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse("[server]\ncapacity = 0\n").is_err());
        assert!(parse("[generator]\nstep = -0.5\n").is_err());
    }

    #[test]
    fn default_path_ends_with_iq_toml() {
        assert!(default_path().ends_with("iq/iq.toml"));
    }
}
