//! The `quizledger init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizledger.toml
    if std::path::Path::new("quizledger.toml").exists() {
        println!("quizledger.toml already exists, skipping.");
    } else {
        std::fs::write("quizledger.toml", SAMPLE_CONFIG)?;
        println!("Created quizledger.toml");
    }

    // Create the subject quiz banks
    std::fs::create_dir_all("quizzes")?;
    for (file, content) in QUIZ_BANKS {
        let path = std::path::Path::new("quizzes").join(file);
        if path.exists() {
            println!("quizzes/{file} already exists, skipping.");
        } else {
            std::fs::write(&path, content)?;
            println!("Created quizzes/{file}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Run: quizledger login --email you@example.com");
    println!("  2. Run: quizledger validate --quiz quizzes");
    println!("  3. Run: quizledger submit --quiz quizzes/python.toml --answers 0=1,1=1,2=0");
    println!("  4. Complete all {} subjects this week to unlock every reward", QUIZ_BANKS.len());
    println!("  5. Run: quizledger rewards");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizledger configuration

data_dir = "./.quizledger"
max_points_per_quiz = 10
subjects_per_week = 4

# "always": every completion earns points.
# "first_completion_only": repeats within a week earn nothing.
repeat_policy = "always"

[[rewards]]
id = "book"
name = "Programming Book"
description = "A comprehensive guide to programming concepts and best practices"
min_points = 20

[[rewards]]
id = "pen"
name = "Premium Pen Set"
description = "High-quality pens perfect for notes and annotations"
min_points = 30

[[rewards]]
id = "bag"
name = "Developer's Backpack"
description = "Durable and stylish backpack for students and developers"
min_points = 40
"#;

const QUIZ_BANKS: [(&str, &str); 4] = [
    ("python.toml", include_str!("../../quizzes/python.toml")),
    ("java.toml", include_str!("../../quizzes/java.toml")),
    ("c.toml", include_str!("../../quizzes/c.toml")),
    ("html.toml", include_str!("../../quizzes/html.toml")),
];
