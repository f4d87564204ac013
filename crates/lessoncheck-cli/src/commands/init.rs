//! The `lessoncheck init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("lessoncheck.toml").exists() {
        println!("lessoncheck.toml already exists, skipping.");
    } else {
        std::fs::write("lessoncheck.toml", SAMPLE_CONFIG)?;
        println!("Created lessoncheck.toml");
    }

    std::fs::create_dir_all("banks")?;
    let example_path = Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/example.toml or add your own lesson files");
    println!("  2. Run: lessoncheck validate --bank banks/example.toml");
    println!("  3. Run: lessoncheck take --bank banks/example.toml --with-checks");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lessoncheck configuration

# Pass mark for quizzes that do not set passing_score themselves.
default_passing_score = 70

# Where `lessoncheck take --save` writes attempt records.
output_dir = "./lessoncheck-results"

# Directory checked by `lessoncheck validate` when no --bank is given.
banks_dir = "./banks"
"#;

const EXAMPLE_BANK: &str = r#"[quiz]
title = "Example Knowledge Check"
passing_score = 70

[[checks]]
id = "check-1"
prompt = "Which document records the hazards of a substance?"
options = ["Delivery note", "Safety data sheet", "Risk register"]
correct_answer = 1
explanation = "The supplier's safety data sheet lists hazards and handling advice."

[[questions]]
id = 1
prompt = "What does PPE stand for?"
options = [
    "Personal protective equipment",
    "Portable power equipment",
    "Primary protection enclosure",
]
correct_answer = 0
explanation = "PPE is personal protective equipment, the last line in the hierarchy of control."

[[questions]]
id = 2
prompt = "Which control measure should be considered first?"
options = ["PPE", "Elimination", "Administrative controls", "Engineering controls"]
correct_answer = 1
explanation = "Elimination sits at the top of the hierarchy of control."

[[questions]]
id = 3
prompt = "How often should a written risk assessment be reviewed?"
options = [
    "Only when an accident happens",
    "Every ten years",
    "Regularly, and whenever the work changes",
]
correct_answer = 2
explanation = "Assessments must stay valid, so review them regularly and after significant changes."
"#;
