//! Service settings resolution for cropdoc-dx
//!
//! Priority: command line / environment (merged by clap) → TOML → defaults.

use cropdoc_common::config::TomlConfig;
use tracing::info;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;

/// Values supplied on the command line or through `CROPDOC_DX_*` variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Flag form: only ever turns the option on
    pub preserve_grayscale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub host: String,
    pub port: u16,
    pub preserve_grayscale: bool,
}

impl ServiceSettings {
    pub fn resolve(overrides: SettingsOverrides, toml_config: &TomlConfig) -> Self {
        let host = pick(
            "host",
            overrides.host.filter(|h| !h.trim().is_empty()),
            toml_config.server.host.clone(),
            DEFAULT_HOST.to_string(),
        );
        let port = pick("port", overrides.port, toml_config.server.port, DEFAULT_PORT);
        let preserve_grayscale = pick(
            "preserve_grayscale",
            overrides.preserve_grayscale.then_some(true),
            toml_config.analysis.preserve_grayscale,
            false,
        );

        Self {
            host,
            port,
            preserve_grayscale,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn pick<T: std::fmt::Debug>(name: &str, cli: Option<T>, toml: Option<T>, default: T) -> T {
    if let Some(value) = cli {
        info!("{} = {:?} (command line / environment)", name, value);
        value
    } else if let Some(value) = toml {
        info!("{} = {:?} (TOML config)", name, value);
        value
    } else {
        info!("{} = {:?} (default)", name, default);
        default
    }
}
