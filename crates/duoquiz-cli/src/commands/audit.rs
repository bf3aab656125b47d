//! The `duoquiz audit` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use duoquiz_core::model::Slot;
use duoquiz_core::parser;
use duoquiz_core::statistics::{audit_catalog, QuestionBalance};

use crate::config::load_config_from;

pub fn execute(
    catalog_path: Option<PathBuf>,
    trials: u64,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(trials >= 1, "trials must be at least 1");

    let config = load_config_from(config_path.as_deref())?;
    let catalog_path = config.resolve_catalog(catalog_path)?;
    let catalog = parser::load_catalog(&catalog_path)?;

    let mut rng = match seed.or(config.session.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    eprintln!(
        "Auditing {} questions x {} trials",
        catalog.total_questions(),
        trials
    );
    let report = audit_catalog(&catalog, trials, &mut rng)?;

    print_summary(&report);

    let unbalanced = report.iter().filter(|b| !b.is_balanced()).count();
    if unbalanced == 0 {
        println!("All {} question(s) balanced.", report.len());
    } else {
        println!("{unbalanced} question(s) outside the p=0.001 bound.");
    }

    Ok(())
}

fn print_summary(report: &[QuestionBalance]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Level",
        "Question",
        "Slot 0",
        "Slot 1",
        "Slot χ²",
        "Wrong pool",
        "Pool χ²",
        "Balanced",
    ]);

    for balance in report {
        table.add_row(vec![
            Cell::new(&balance.level_id),
            Cell::new(balance.question),
            Cell::new(format!("{:.1}%", balance.slots.share(Slot::First) * 100.0)),
            Cell::new(format!("{:.1}%", balance.slots.share(Slot::Second) * 100.0)),
            Cell::new(format!("{:.2}", balance.slots.chi_square())),
            Cell::new(balance.wrong_counts.len()),
            Cell::new(format!("{:.2}", balance.wrong_chi_square())),
            Cell::new(if balance.is_balanced() { "yes" } else { "NO" }),
        ]);
    }

    println!("{table}");
}
