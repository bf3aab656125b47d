//! The `duoquiz play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use duoquiz_core::model::{AssetRef, Level, Slot};
use duoquiz_core::{parser, PresentationEvent, Presenter, SelectionOutcome, Session};

use crate::config::load_config_from;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown format: {other} (expected text or json)"),
        }
    }
}

/// Prints presenter calls to stdout.
struct TerminalPresenter {
    format: OutputFormat,
}

impl TerminalPresenter {
    fn emit_json(&self, event: &PresentationEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!("failed to serialize event: {e}"),
        }
    }
}

fn asset_suffix(label: &str, asset: Option<&AssetRef>) -> String {
    asset
        .map(|a| format!(" [{label}: {a}]"))
        .unwrap_or_default()
}

impl Presenter for TerminalPresenter {
    fn show_level_intro(&mut self, index: usize, level: &Level) {
        match self.format {
            OutputFormat::Json => self.emit_json(&PresentationEvent::level_intro(index, level)),
            OutputFormat::Text => println!(
                "\n== Level {}: {} =={}",
                index + 1,
                level.display_name(),
                asset_suffix("intro", level.intro_animation.as_ref())
            ),
        }
    }

    fn show_question(&mut self, text: &str, image: Option<&AssetRef>) {
        match self.format {
            OutputFormat::Json => self.emit_json(&PresentationEvent::question(text, image)),
            OutputFormat::Text => println!("\n{text}{}", asset_suffix("image", image)),
        }
    }

    fn show_answer_slot(&mut self, slot: Slot, text: &str, image: Option<&AssetRef>) {
        match self.format {
            OutputFormat::Json => self.emit_json(&PresentationEvent::answer_slot(slot, text, image)),
            OutputFormat::Text => println!("  [{slot}] {text}{}", asset_suffix("image", image)),
        }
    }

    fn show_wrong_answer_reaction(&mut self, animation: Option<&AssetRef>) {
        match self.format {
            OutputFormat::Json => {
                self.emit_json(&PresentationEvent::wrong_answer_reaction(animation))
            }
            OutputFormat::Text => {
                println!("Wrong, try again.{}", asset_suffix("reaction", animation))
            }
        }
    }

    fn show_completion(&mut self) {
        match self.format {
            OutputFormat::Json => self.emit_json(&PresentationEvent::Completion),
            OutputFormat::Text => println!("\nAll levels complete!"),
        }
    }
}

fn parse_answers(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(|a| {
            a.parse::<usize>()
                .with_context(|| format!("invalid slot in --answers: {a}"))
        })
        .collect()
}

pub fn execute(
    catalog_path: Option<PathBuf>,
    seed: Option<u64>,
    answers: Option<String>,
    format: String,
    repeat_on_wrong: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let config = load_config_from(config_path.as_deref())?;
    let catalog_path = config.resolve_catalog(catalog_path)?;

    let catalog = parser::load_catalog(&catalog_path)?;
    for w in parser::lint_catalog(&catalog) {
        tracing::warn!(level = w.level_id.as_deref().unwrap_or("-"), "{}", w.message);
    }

    let mut session_config = config.session.clone();
    if seed.is_some() {
        session_config.seed = seed;
    }
    session_config.repeat_question_on_wrong |= repeat_on_wrong;

    let mut session = Session::new(catalog, TerminalPresenter { format }, session_config);
    session.start()?;

    match answers {
        Some(script) => {
            for slot in parse_answers(&script)? {
                if session.is_completed() {
                    break;
                }
                session.select(slot)?;
            }
        }
        None => play_interactive(&mut session, format)?,
    }

    if !session.is_completed() {
        let progress = session.progress();
        tracing::info!(
            level = progress.level,
            question = progress.question,
            "stopped before completing the catalog"
        );
    }

    Ok(())
}

fn play_interactive(session: &mut Session<TerminalPresenter>, format: OutputFormat) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_completed() {
        if format == OutputFormat::Text {
            print!("> ");
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        match input {
            "" => continue,
            "q" | "quit" => break,
            _ => {}
        }
        let Ok(slot) = input.parse::<usize>() else {
            if format == OutputFormat::Text {
                println!("Enter 0 or 1 (q to quit).");
            }
            continue;
        };
        if session.select(slot)? == SelectionOutcome::Ignored && format == OutputFormat::Text {
            println!("Enter 0 or 1 (q to quit).");
        }
    }

    Ok(())
}
