//! The `paperly init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("paperly.toml").exists() {
        println!("paperly.toml already exists, skipping.");
    } else {
        std::fs::write("paperly.toml", SAMPLE_CONFIG)?;
        println!("Created paperly.toml");
    }

    std::fs::create_dir_all("params")?;
    let example_path = Path::new("params/example.toml");
    if example_path.exists() {
        println!("params/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PARAMS)?;
        println!("Created params/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit paperly.toml with your name and role");
    println!("  2. Run: paperly generate --params params/example.toml");
    println!("  3. Run: paperly generate --params params/example.toml --save");
    println!("  4. Run: paperly practice --paper 1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# paperly configuration

default_marks_per_question = 5
default_question_count = 10

[store]
type = "json"
dir = "./paperly-papers"

[identity]
creator = "${USER}"
role = "teacher"
"#;

const EXAMPLE_PARAMS: &str = r#"[paper]
title = "Mid-Term Examination"
subject = "Mathematics"
grade = "Grade 10"
questions = 10
marks_per_question = 5

[distribution]
easy = 40
medium = 40
hard = 20
"#;
