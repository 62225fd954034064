use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use autolink_title::config::{ConfigStore, FileConfigStore};
use autolink_title::editor::buffer::offset_of;
use autolink_title::editor::{
    Command, ConversionOutcome, LinkTitleEngine, MemoryBuffer, StaticClipboard, TracingNotifier,
};
use autolink_title::links::Position;
use autolink_title::title::ReqwestClient;
use autolink_title::Configuration;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

fn build_engine(config: &Configuration) -> Result<LinkTitleEngine<ReqwestClient>> {
    let client = ReqwestClient::from_config(config).context("Failed to build HTTP client")?;
    Ok(LinkTitleEngine::new(client, Arc::new(TracingNotifier)))
}

/// Load `file` with the caret at the 1-based `line`/`column`.
async fn open_buffer(file: &Path, line: usize, column: usize) -> Result<MemoryBuffer> {
    if line == 0 || column == 0 {
        bail!("--line and --column are 1-based");
    }
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let cursor = Position::new(line - 1, column - 1);
    offset_of(&text, cursor)?;
    Ok(MemoryBuffer::new(text).with_cursor(cursor))
}

async fn apply(
    engine: &LinkTitleEngine<ReqwestClient>,
    command: Command,
    file: &Path,
    buffer: MemoryBuffer,
    clipboard: &StaticClipboard,
    config: &Configuration,
) -> Result<()> {
    let buffer = Mutex::new(buffer);
    let outcome = engine.run(command, &buffer, clipboard, config).await;
    info!(command = command.id(), ?outcome, "command finished");

    if outcome == ConversionOutcome::Nothing {
        println!("Nothing to convert at that position.");
        return Ok(());
    }

    tokio::fs::write(file, buffer.into_inner().into_text())
        .await
        .with_context(|| format!("Failed to write {}", file.display()))?;
    Ok(())
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let store = match cli.config {
        Some(path) => FileConfigStore::new(path),
        None => FileConfigStore::default_location()?,
    };
    let mut config = store.load()?;
    config.apply_env_overrides();

    match cli.command {
        Commands::Fetch { url } => {
            let engine = build_engine(&config)?;
            println!("{}", engine.title_for(url.trim(), &config).await);
            Ok(())
        }
        Commands::Paste {
            file,
            text,
            line,
            column,
            plain,
        } => {
            let engine = build_engine(&config)?;
            let buffer = open_buffer(&file, line, column).await?;
            let command = if plain {
                Command::NormalPaste
            } else {
                Command::PasteWithTitle
            };
            let clipboard = StaticClipboard::new(text);
            apply(&engine, command, &file, buffer, &clipboard, &config).await
        }
        Commands::Enhance { file, line, column } => {
            let engine = build_engine(&config)?;
            let buffer = open_buffer(&file, line, column).await?;
            let clipboard = StaticClipboard::empty();
            apply(&engine, Command::EnhanceUrl, &file, buffer, &clipboard, &config).await
        }
        Commands::Config => {
            let mut shown = config;
            if !shown.title_service_api_key.is_empty() {
                shown.title_service_api_key = "***".into();
            }
            println!("# {}", store.path().display());
            print!(
                "{}",
                toml::to_string_pretty(&shown).context("Failed to serialize config")?
            );
            Ok(())
        }
    }
}
