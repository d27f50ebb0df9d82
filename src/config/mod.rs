use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 5000;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `{data_dir}/config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 5000).
    port: Option<u16>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,sentineld=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured for log aggregators).
    log_format: Option<String>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── GatewayConfig ────────────────────────────────────────────────────────────

/// Gateway runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    /// Bind address for the HTTP server (SENTINELD_BIND env var, default: "127.0.0.1").
    pub bind_address: String,
    /// Directory holding config.toml and the optional policy.json override.
    pub data_dir: PathBuf,
    pub log: String,
    /// Log output format: "pretty" (default) | "json".
    pub log_format: String,
}

impl GatewayConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer
        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let log_format = std::env::var("SENTINELD_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        Self {
            port,
            bind_address,
            data_dir,
            log,
            log_format,
        }
    }

    /// Path to the optional policy override file.
    pub fn policy_path(&self) -> PathBuf {
        self.data_dir.join("policy.json")
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/sentineld
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("sentineld");
        }
    }
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/sentineld or ~/.local/share/sentineld
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("sentineld");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("sentineld");
        }
    }
    #[cfg(target_os = "windows")]
    {
        // %APPDATA%\sentineld
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("sentineld");
        }
    }
    // Fallback
    PathBuf::from(".sentineld")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_when_nothing_is_configured() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = GatewayConfig::new(None, Some(dir.path().to_path_buf()), None, None);
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.log, "info");
    }

    #[test]
    fn toml_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::File::create(dir.path().join("config.toml"))
            .unwrap()
            .write_all(b"port = 8080\nlog = \"debug\"\n")
            .unwrap();

        let config = GatewayConfig::new(None, Some(dir.path().to_path_buf()), None, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.log, "debug");
    }

    #[test]
    fn cli_args_override_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::File::create(dir.path().join("config.toml"))
            .unwrap()
            .write_all(b"port = 8080\n")
            .unwrap();

        let config = GatewayConfig::new(
            Some(9000),
            Some(dir.path().to_path_buf()),
            None,
            Some("0.0.0.0".to_string()),
        );
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_address, "0.0.0.0");
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::File::create(dir.path().join("config.toml"))
            .unwrap()
            .write_all(b"port = \"not a port")
            .unwrap();

        let config = GatewayConfig::new(None, Some(dir.path().to_path_buf()), None, None);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn policy_path_lives_in_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = GatewayConfig::new(None, Some(dir.path().to_path_buf()), None, None);
        assert_eq!(config.policy_path(), dir.path().join("policy.json"));
    }
}
