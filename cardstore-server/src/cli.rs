//! Card store command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use anyhow::Error;

use crate::{config::ServerConfig, store::FileStore};

/// The command line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Subcommands.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Operational commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints the stored cards as JSON.
    Dump,
    /// Checks the data file for problems.
    Check,
}

/// Runs a command.
pub async fn run_command(command: &Command, config: &ServerConfig) -> Result<(), Error> {
    match command {
        Command::Dump => dump(config).await,
        Command::Check => check(config).await,
    }
}

async fn dump(config: &ServerConfig) -> Result<(), Error> {
    let cards = FileStore::load(&config.data_path).await?;

    println!("{}", serde_json::to_string_pretty(&cards)?);

    Ok(())
}

async fn check(config: &ServerConfig) -> Result<(), Error> {
    let cards = FileStore::load(&config.data_path).await?;
    let duplicates = cards.duplicate_ids();

    println!(
        "{}: {} card(s)",
        config.data_path.display(),
        cards.len()
    );

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(Error::msg(format!(
            "duplicate card ids: {}",
            duplicates.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use cardstore_model::card::Card;
    use cardstore_model::request::card::CardFields;
    use uuid::Uuid;

    use crate::store::Cards;

    use super::*;

    async fn config_with(cards: &Cards) -> ServerConfig {
        let data_path = env::temp_dir().join(format!("cardstore_cli_{}.json", Uuid::new_v4()));
        tokio::fs::write(&data_path, serde_json::to_vec(cards).unwrap())
            .await
            .unwrap();

        ServerConfig {
            data_path,
            ..Default::default()
        }
    }

    #[test]
    fn parses_subcommands() {
        let args = Args::parse_from(["cardstore-server", "--config", "cards.toml", "check"]);

        assert_eq!(args.config, Some(PathBuf::from("cards.toml")));
        assert!(matches!(args.command, Some(Command::Check)));

        let args = Args::parse_from(["cardstore-server"]);
        assert!(args.command.is_none());
    }

    #[tokio::test]
    async fn check_reports_duplicates() {
        let clean = Cards::new(vec![
            Card::new("a", CardFields::default()),
            Card::new("b", CardFields::default()),
        ]);
        let config = config_with(&clean).await;
        assert!(run_command(&Command::Check, &config).await.is_ok());
        let _ = tokio::fs::remove_file(&config.data_path).await;

        let dirty = Cards::new(vec![
            Card::new("a", CardFields::default()),
            Card::new("a", CardFields::default()),
        ]);
        let config = config_with(&dirty).await;
        let err = run_command(&Command::Check, &config).await.unwrap_err();
        assert!(err.to_string().contains("duplicate card ids: a"));
        let _ = tokio::fs::remove_file(&config.data_path).await;
    }

    #[tokio::test]
    async fn dump_fails_on_missing_file() {
        let config = ServerConfig {
            data_path: env::temp_dir().join(format!("cardstore_cli_{}.json", Uuid::new_v4())),
            ..Default::default()
        };

        assert!(run_command(&Command::Dump, &config).await.is_err());
    }
}
