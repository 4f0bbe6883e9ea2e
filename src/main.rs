//! OpenAI Engine CLI
//!
//! Small command-line front end over the engine, mostly for smoke-testing
//! credentials and connectivity

use anyhow::{Context, Result};
use openai_engine::models::{CompletionOptions, ModerationOptions, RetrieveModelOptions};
use openai_engine::utils::logging::init_logging;
use openai_engine::{Engine, Model, RequestContext, Settings};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const USAGE: &str = "\
usage: openai-engine [--config <path>] <command>

commands:
  models              list available models
  model <id>          show one model
  moderate <text>     classify text against the content policy
  complete <prompt>   complete a prompt with the default model";

/// Parsed command line
#[derive(Debug)]
enum Command {
    Models,
    Model(String),
    Moderate(String),
    Complete(String),
}

fn parse_args(args: &[String]) -> Result<(Option<PathBuf>, Command)> {
    let mut config = None;
    let mut rest = args;

    if let [flag, path, tail @ ..] = rest {
        if flag == "--config" {
            config = Some(PathBuf::from(path));
            rest = tail;
        }
    }

    let command = match rest {
        [cmd] if cmd == "models" => Command::Models,
        [cmd, id] if cmd == "model" => Command::Model(id.clone()),
        [cmd, text @ ..] if cmd == "moderate" && !text.is_empty() => Command::Moderate(text.join(" ")),
        [cmd, prompt @ ..] if cmd == "complete" && !prompt.is_empty() => Command::Complete(prompt.join(" ")),
        _ => anyhow::bail!("{}", USAGE),
    };

    Ok((config, command))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, command) = parse_args(&args)?;

    let settings = match config_path {
        Some(path) => Settings::load(&path),
        None => Settings::new(),
    }
    .context("Failed to load settings")?;

    init_logging(&settings.logging)?;
    info!("{}", openai_engine::version_info());

    let engine = Engine::from_settings(&settings)?;
    let ctx = RequestContext::new().with_timeout(Duration::from_secs(settings.openai.timeout));

    match command {
        Command::Models => print_json(&engine.list_models(&ctx).await?),
        Command::Model(id) => print_json(&engine.retrieve_model(&ctx, RetrieveModelOptions::new(id)).await?),
        Command::Moderate(text) => print_json(&engine.moderate(&ctx, ModerationOptions::new(text)).await?),
        Command::Complete(prompt) => {
            let options = CompletionOptions::new(Model::DEFAULT, prompt);
            print_json(&engine.completion(&ctx, options).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        let (config, command) = parse_args(&args(&["model", "whisper-1"])).unwrap();
        assert!(config.is_none());
        assert!(matches!(command, Command::Model(id) if id == "whisper-1"));

        let (config, command) = parse_args(&args(&["--config", "c.json", "complete", "Say", "hi"])).unwrap();
        assert_eq!(config, Some(PathBuf::from("c.json")));
        assert!(matches!(command, Command::Complete(prompt) if prompt == "Say hi"));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["moderate"])).is_err());
        assert!(parse_args(&args(&["delete", "x"])).is_err());
    }
}
