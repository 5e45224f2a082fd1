//! Server configuration options.

use std::path::{Path, PathBuf};

use anyhow::Error;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
    value::Uncased,
};
use serde::{Deserialize, Serialize};

/// The default port the server is hosted on.
pub const DEFAULT_PORT: u16 = 3000;

/// The default location of the data file.
pub const DEFAULT_DATA_PATH: &str = "./db.json";

/// Server configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
}

impl Config {
    /// Reads the config from the config file and the environment.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Config, Error> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("CARDSTORE_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATA_PATH", "PORT"])
                    .map(|k| Uncased::from(format!("SERVER.{}", k))),
            )
            .extract()
            .map_err(Error::from)
    }
}

/// Server config.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    /// The port the server is binded to.
    pub port: u16,
    /// The JSON file cards are kept in.
    pub data_path: PathBuf,
    /// How strictly card bodies are checked.
    #[serde(default)]
    pub validation: Validation,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            validation: Validation::default(),
        }
    }
}

/// Card body validation mode.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Validation {
    /// Every field is required to create a card, and deleting a card that
    /// does not exist is a `404`.
    #[default]
    Strict,
    /// Cards may be created with missing fields, and deletes always succeed.
    Lenient,
}

impl Validation {
    /// Checks if the validation is [`Validation::Strict`].
    pub fn is_strict(&self) -> bool {
        matches!(self, Validation::Strict)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::load("missing.toml").map_err(|e| e.to_string())?;

            assert_eq!(config, Config::default());
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.server.data_path, PathBuf::from("./db.json"));
            assert!(config.server.validation.is_strict());
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "cardstore.toml",
                r#"
                [server]
                port = 8080
                data_path = "data/cards.json"
                validation = "lenient"
                "#,
            )?;
            jail.set_env("PORT", "9000");

            let config = Config::load("cardstore.toml").map_err(|e| e.to_string())?;

            assert_eq!(config.server.port, 9000);
            assert_eq!(config.server.data_path, PathBuf::from("data/cards.json"));
            assert_eq!(config.server.validation, Validation::Lenient);
            Ok(())
        });
    }

    #[test]
    fn prefixed_environment() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("CARDSTORE_SERVER__VALIDATION", "lenient");
            jail.set_env("DATA_PATH", "/var/lib/cardstore/db.json");

            let config = Config::load("cardstore.toml").map_err(|e| e.to_string())?;

            assert_eq!(config.server.validation, Validation::Lenient);
            assert_eq!(
                config.server.data_path,
                PathBuf::from("/var/lib/cardstore/db.json")
            );
            Ok(())
        });
    }
}
