//! The `duoquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create duoquiz.toml
    if std::path::Path::new("duoquiz.toml").exists() {
        println!("duoquiz.toml already exists, skipping.");
    } else {
        std::fs::write("duoquiz.toml", SAMPLE_CONFIG)?;
        println!("Created duoquiz.toml");
    }

    // Create example catalog
    std::fs::create_dir_all("levels")?;
    let example_path = std::path::Path::new("levels/example.toml");
    if example_path.exists() {
        println!("levels/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created levels/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit levels/example.toml or add more level files to levels/");
    println!("  2. Run: duoquiz validate");
    println!("  3. Run: duoquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# duoquiz configuration

# Catalog file or directory, relative to this file.
catalog = "levels"

[session]
# seed = 42
repeat_question_on_wrong = false
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
name = "Example"
description = "A two-level example catalog to get started"

# Each level lists its questions, the correct answer for each question, and
# the correct value for each question. Correct values share an index space
# with wrong_answers: the wrong answer at that index is never shown next to
# the question.

[[levels]]
id = "colours"
name = "Colours"
intro_animation = "anim/colours-intro"
questions = ["What colour is the sky on a clear day?", "What colour is fresh grass?"]
answers = ["Blue", "Green"]
correct_sequence = [0, 1]
wrong_answers = ["Blue-ish", "Green-ish", "Red", "Orange", "Purple"]
wrong_answer_animations = ["anim/shake", "anim/buzz"]

[[levels]]
id = "sums"
name = "Quick sums"
questions = ["2 + 2 = ?", "3 + 4 = ?", "5 + 5 = ?"]
answers = ["4", "7", "10"]
correct_sequence = [0, 1, 2]
wrong_answers = ["5", "8", "11", "3", "6"]
"#;
