//! CLI module for the goodbye detector
//!
//! Provides subcommands:
//! - `interactive`: read utterances from stdin and print each verdict
//! - `classify`: classify the given texts
//! - `warm`: build or load the reference embeddings only

pub mod classify;
pub mod interactive;
pub mod warm;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::services::GoodbyeClassifier;

/// Goodbye detector - classifies utterances as conversation endings
#[derive(Parser)]
#[command(name = "goodbye-detector")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify lines read from stdin until EOF (blank lines are skipped)
    Interactive,

    /// Classify each given text
    Classify(classify::ClassifyArgs),

    /// Prime the reference embedding cache
    Warm,
}

/// Loads `.env` and configuration, sets up logging and returns an
/// initialized classifier
pub(crate) async fn bootstrap() -> anyhow::Result<GoodbyeClassifier> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    let mut classifier = GoodbyeClassifier::from_config(&config).await?;
    classifier.initialize().await?;

    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_interactive_help_mentions_blank_lines() {
        let command = Cli::command();
        let interactive = command.find_subcommand("interactive").unwrap();

        assert!(interactive
            .get_about()
            .is_some_and(|about| about.to_string().contains("blank lines are skipped")));
    }

    #[test]
    fn test_parse_classify_arguments() {
        let cli = Cli::try_parse_from(["goodbye-detector", "classify", "-v", "see you", "hi"])
            .unwrap();

        match cli.command {
            Command::Classify(args) => {
                assert!(args.verbose);
                assert_eq!(args.texts, vec!["see you", "hi"]);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_classify_requires_text() {
        assert!(Cli::try_parse_from(["goodbye-detector", "classify"]).is_err());
    }
}
