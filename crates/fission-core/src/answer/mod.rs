//! Where chat answers come from.
//!
//! Every provider is asynchronous so front ends can show a loading indicator
//! between send and completion. One call per send; nothing here retries.

pub mod ollama;

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::matcher::ResponseTable;
use crate::provider::Provider;
use crate::reading_level::ReadingLevel;
use crate::timeline::timeline_events;

pub use ollama::OllamaClient;

pub const APOLOGY_MESSAGE: &str = "I'm sorry, but I encountered an error while trying to answer your question. Please try again later.";

/// Answers from the built-in table after a short, simulated think.
#[derive(Debug, Clone)]
pub struct CannedAnswers {
    table: ResponseTable<'static>,
    delay: Duration,
}

impl CannedAnswers {
    pub fn new(delay: Duration) -> Self {
        Self {
            table: ResponseTable::builtin(),
            delay,
        }
    }

    pub fn with_table(table: ResponseTable<'static>, delay: Duration) -> Self {
        Self { table, delay }
    }

    pub async fn answer(&self, question: &str, level: ReadingLevel) -> String {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let matched = self.table.find(question).map(|entry| entry.question);
        debug!(?matched, level = level.as_str(), "canned answer");
        self.table.answer(question, level).to_string()
    }
}

#[derive(Clone)]
pub enum AnswerProvider {
    Canned(CannedAnswers),
    Ollama { client: OllamaClient, model: String },
}

impl AnswerProvider {
    pub fn from_config(config: &Config) -> Self {
        match config.provider() {
            Provider::Canned => AnswerProvider::Canned(CannedAnswers::new(Duration::from_millis(
                config.response_delay_ms(),
            ))),
            Provider::Ollama => AnswerProvider::Ollama {
                client: OllamaClient::new(config.ollama_url()),
                model: config.model().to_string(),
            },
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            AnswerProvider::Canned(_) => Provider::Canned,
            AnswerProvider::Ollama { .. } => Provider::Ollama,
        }
    }

    /// Short name for status lines, e.g. the Ollama model in use.
    pub fn description(&self) -> String {
        match self {
            AnswerProvider::Canned(_) => Provider::Canned.display_name().to_string(),
            AnswerProvider::Ollama { model, .. } => format!("Ollama: {}", model),
        }
    }

    pub async fn answer(&self, question: &str, level: ReadingLevel) -> Result<String> {
        match self {
            AnswerProvider::Canned(canned) => Ok(canned.answer(question, level).await),
            AnswerProvider::Ollama { client, model } => {
                let prompt = ollama::build_prompt(question, level, timeline_events());
                client.query(model, &prompt).await
            }
        }
    }
}

/// Ask once; a failure becomes the apology shown in the chat.
pub async fn answer_or_apology(provider: &AnswerProvider, question: &str, level: ReadingLevel) -> String {
    match provider.answer(question, level).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!(provider = provider.provider().as_str(), error = %e, "answer provider failed");
            APOLOGY_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{FALLBACK, RESPONSES};

    fn instant() -> AnswerProvider {
        AnswerProvider::Canned(CannedAnswers::new(Duration::ZERO))
    }

    #[tokio::test]
    async fn test_canned_provider_uses_matcher() {
        let provider = instant();
        let answer = provider
            .answer("What happened at Three Mile Island?", ReadingLevel::Expert)
            .await
            .unwrap();
        assert_eq!(answer, RESPONSES[3].answers.for_level(ReadingLevel::Expert));
    }

    #[tokio::test]
    async fn test_canned_provider_falls_back() {
        let answer = instant().answer("Who won the 1950 World Cup?", ReadingLevel::Kids).await.unwrap();
        assert_eq!(answer, FALLBACK.for_level(ReadingLevel::Kids));
    }

    #[tokio::test(start_paused = true)]
    async fn test_canned_provider_waits_its_delay() {
        let provider = CannedAnswers::new(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        provider.answer("What is nuclear fission?", ReadingLevel::Novice).await;
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_unreachable_ollama_becomes_apology() {
        let provider = AnswerProvider::Ollama {
            client: OllamaClient::new("http://127.0.0.1:9"),
            model: "llama3.2:latest".to_string(),
        };
        let answer = answer_or_apology(&provider, "What is nuclear fission?", ReadingLevel::Novice).await;
        assert_eq!(answer, APOLOGY_MESSAGE);
    }

    #[test]
    fn test_from_config_picks_provider() {
        let config = Config::new();
        assert_eq!(AnswerProvider::from_config(&config).provider(), Provider::Canned);

        let config = Config {
            provider: Some("ollama".to_string()),
            ..Config::default()
        };
        let provider = AnswerProvider::from_config(&config);
        assert_eq!(provider.provider(), Provider::Ollama);
        assert_eq!(provider.description(), "Ollama: llama3.2:latest");
    }
}
