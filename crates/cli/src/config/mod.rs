use clap::Parser;
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/cli.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// `EMPLOYEE`, `MANAGER` or `FINANCE`.
    pub role: String,
    pub user_id: Option<i64>,
    pub token: Option<String>,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            role: "EMPLOYEE".to_string(),
            user_id: None,
            token: None,
            level: "warn".to_string(),
        }
    }
}

/// Parses the command line and layers file, environment and flags.
pub fn load() -> Result<(AppConfig, Cli)> {
    let cli = Cli::parse();
    let settings = resolve(&cli)?;
    Ok((settings, cli))
}

pub(crate) fn resolve(cli: &Cli) -> Result<AppConfig> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("REIMBURSE_CLI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(role) = &cli.role {
        settings.role = role.clone();
    }
    if let Some(user_id) = cli.user_id {
        settings.user_id = Some(user_id);
    }
    if let Some(token) = &cli.token {
        settings.token = Some(token.clone());
    }
    if let Some(level) = &cli.level {
        settings.level = level.clone();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "reimburse_cli",
            "--config",
            "does/not/exist",
            "--role",
            "manager",
            "--user-id",
            "3",
            "--base-url",
            "http://localhost:8080",
            "dashboard",
        ])
        .unwrap();
        let settings = resolve(&cli).unwrap();
        assert_eq!(settings.role, "manager");
        assert_eq!(settings.user_id, Some(3));
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.token, None);
    }
}
