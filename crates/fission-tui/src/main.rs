use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use fission_core::{
    answer_or_apology, present, timeline_events, AnswerProvider, Config, JsonFileStore,
    OllamaClient, PreferenceStore, ReadingLevel, UnavailableStore, SAMPLE_QUESTIONS,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod handler;
mod tui;
mod ui;

use app::App;

#[derive(Parser)]
#[command(name = "fission")]
#[command(version)]
#[command(about = "Explore the history of nuclear fission and energy in the United States")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question and print the answer
    Ask {
        /// Your question
        question: String,
        /// Reading level: kids, novice, college or expert
        #[arg(short, long, default_value = "novice", value_parser = parse_level)]
        level: ReadingLevel,
    },
    /// Print the timeline
    Events {
        /// Reading level: kids, novice, college or expert
        #[arg(short, long, default_value = "novice", value_parser = parse_level)]
        level: ReadingLevel,
    },
    /// List the sample questions
    Questions,
    /// List available Ollama models
    Models,
}

fn parse_level(s: &str) -> Result<ReadingLevel, String> {
    ReadingLevel::from_str(s).ok_or_else(|| {
        format!("unknown reading level '{}' (expected kids, novice, college or expert)", s)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = cli.command.is_none();
    init_logging(interactive);

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "could not read config, using defaults");
        Config::new()
    });

    match cli.command {
        None => run_tui(&mut config).await?,
        Some(Commands::Ask { question, level }) => ask(&config, &question, level).await?,
        Some(Commands::Events { level }) => list_events(level),
        Some(Commands::Questions) => list_questions(),
        Some(Commands::Models) => list_ollama_models(&config).await?,
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fission=info"))
}

/// The interactive mode owns the terminal, so it logs to a file instead.
fn init_logging(interactive: bool) {
    if interactive {
        let log_file = fission_core::config::config_dir().ok().and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("fission.log"))
                .ok()
        });

        if let Some(file) = log_file {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

fn preference_store() -> Box<dyn PreferenceStore + Send> {
    match fission_core::config::preferences_path() {
        Ok(path) => Box::new(JsonFileStore::new(path)),
        Err(e) => {
            warn!(error = %e, "no config directory, preferences will not be saved");
            Box::new(UnavailableStore)
        }
    }
}

async fn run_tui(config: &mut Config) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let (speech_tx, speech_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, preference_store(), speech_tx);
    let mut events = tui::EventHandler::new(speech_rx);
    info!("interactive session started");

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, config, event).await?,
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    info!("interactive session ended");
    result
}

async fn ask(config: &Config, question: &str, level: ReadingLevel) -> Result<()> {
    let provider = AnswerProvider::from_config(config);
    info!(provider = %provider.description(), level = level.as_str(), "answering");

    println!("{} {}", "Q:".bold().cyan(), question);
    let answer = answer_or_apology(&provider, question, level).await;
    println!("{} {}", "A:".bold().yellow(), answer);

    Ok(())
}

fn list_events(level: ReadingLevel) {
    println!(
        "\n{} {}",
        "Nuclear History Timeline".bold().blue(),
        format!("({})", level.label()).dimmed()
    );
    println!("{}", "=".repeat(50).dimmed());

    let mut events: Vec<_> = timeline_events().iter().collect();
    events.sort_by_key(|event| event.year);

    for event in events {
        let view = present(event, level);
        println!(
            "\n{}  {} {}",
            view.year.to_string().bold().yellow(),
            view.title.bold(),
            format!("[{}]", view.category.label()).dimmed()
        );
        println!("  {}", view.description);

        if let Some(impact) = &view.impact {
            println!("  {} {}", format!("{}:", impact.heading).green(), impact.body);
        }
        if let Some(figures) = &view.figures {
            let names: Vec<&str> = figures.body.iter().map(|f| f.name).collect();
            println!("  {} {}", format!("{}:", figures.heading).green(), names.join(", "));
        }
        if let Some(details) = &view.details {
            println!("  {} {}", format!("{}:", details.heading).green(), details.body);
        }
        if let Some(sources) = &view.sources {
            println!("  {}", format!("{}:", sources.heading).green());
            for source in sources.body {
                match source.url {
                    Some(url) => println!("    • {} {}", source.title, url.dimmed()),
                    None => println!("    • {}", source.title),
                }
            }
        }
    }
}

fn list_questions() {
    println!("\n{}", "Sample Questions".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    for (i, question) in SAMPLE_QUESTIONS.iter().enumerate() {
        println!("  {}. {}", (i + 1).to_string().bold(), question);
    }
}

async fn list_ollama_models(config: &Config) -> Result<()> {
    let ollama = OllamaClient::new(config.ollama_url());

    println!("\n{}", "Available Ollama Models".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    match ollama.list_models().await {
        Ok(models) => {
            if models.is_empty() {
                println!("{}", "No models found. Pull a model with: ollama pull llama3.2".yellow());
            } else {
                for model in models {
                    let marker = if model == config.model() { " (default)" } else { "" };
                    println!("  • {}{}", model.green(), marker.dimmed());
                }
            }
        }
        Err(e) => {
            println!("{}: {}", "Error connecting to Ollama".red(), e);
            println!("Make sure Ollama is running: {}", "ollama serve".bold());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_ask_with_level() {
        let cli = Cli::try_parse_from(["fission", "ask", "What is nuclear fission?", "--level", "kids"]).unwrap();
        match cli.command {
            Some(Commands::Ask { question, level }) => {
                assert_eq!(question, "What is nuclear fission?");
                assert_eq!(level, ReadingLevel::Kids);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["fission", "events", "--level", "wizard"]).is_err());
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["fission"]).unwrap();
        assert!(cli.command.is_none());
    }
}
