//! The `duoquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use duoquiz_core::parser;

use crate::config::load_config_from;

pub fn execute(catalog_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog_path = config.resolve_catalog(catalog_path)?;

    let catalog = parser::load_catalog(&catalog_path)?;

    let title = if catalog.name().is_empty() {
        catalog_path.display().to_string()
    } else {
        catalog.name().to_string()
    };
    println!(
        "Catalog: {} ({} levels, {} questions)",
        title,
        catalog.len(),
        catalog.total_questions()
    );
    for (index, level) in catalog.levels().iter().enumerate() {
        println!(
            "  {}. {} [{}]: {} questions, {} wrong answers",
            index + 1,
            level.display_name(),
            level.id,
            level.question_count(),
            level.wrong_answers.len()
        );
    }

    let warnings = parser::lint_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .level_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
