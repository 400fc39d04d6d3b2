use reqwest::Client;
use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};

use crate::reading_level::ReadingLevel;
use crate::timeline::TimelineEvent;

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

#[derive(Deserialize)]
struct OllamaModelsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn query(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = OllamaRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Ollama request failed with status: {}. Make sure Ollama is running with: ollama serve",
                response.status()
            ));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        Ok(ollama_response.response)
    }

    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to list models: {}", response.status()));
        }

        let models_response: OllamaModelsResponse = response.json().await?;
        let model_names: Vec<String> = models_response
            .models
            .into_iter()
            .map(|model| model.name)
            .collect();

        Ok(model_names)
    }
}

/// One block per event, fed to the model as background knowledge.
pub fn knowledge_context(events: &[TimelineEvent]) -> String {
    events
        .iter()
        .map(|event| {
            format!(
                "Event ({}): {}\nDescription: {}\nImpact: {}\n",
                event.year,
                event.title,
                event.description,
                event.impact.unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn level_instruction(level: ReadingLevel) -> &'static str {
    match level {
        ReadingLevel::Kids => "Answer for a young child: one or two short sentences with simple words.",
        ReadingLevel::Novice => "Answer for a high school student: a short plain-language paragraph.",
        ReadingLevel::College => "Answer for a college student: a detailed paragraph with dates, names and context.",
        ReadingLevel::Expert => "Answer for a nuclear scientist: precise technical detail is welcome.",
    }
}

pub fn build_prompt(question: &str, level: ReadingLevel, events: &[TimelineEvent]) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are a guide to the history of nuclear fission and energy in the United States. ");
    prompt.push_str("Use the timeline below as your main source and say so when a question goes beyond it.\n\n");

    prompt.push_str("Timeline:\n");
    prompt.push_str(&knowledge_context(events));
    prompt.push_str("\n\n");

    prompt.push_str(level_instruction(level));
    prompt.push_str("\n\nQuestion: ");
    prompt.push_str(question.trim());

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::timeline_events;

    #[test]
    fn test_knowledge_context_has_a_block_per_event() {
        let events = timeline_events();
        let context = knowledge_context(events);
        assert_eq!(context.matches("Event (").count(), events.len());
        assert!(context.contains("Event (1938): Discovery of Nuclear Fission"));
    }

    #[test]
    fn test_prompt_carries_level_and_question() {
        let prompt = build_prompt("  What was Trinity? ", ReadingLevel::Kids, timeline_events());
        assert!(prompt.contains("young child"));
        assert!(prompt.ends_with("Question: What was Trinity?"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.base_url(), "http://localhost:11434");
    }
}
