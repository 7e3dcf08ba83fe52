//! The `quizledger validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let sets = if quiz_path.is_dir() {
        quizledger_core::quiz::load_quiz_directory(&quiz_path)?
    } else {
        vec![quizledger_core::quiz::parse_quiz_set(&quiz_path)?]
    };

    let mut total_warnings = 0;

    for set in &sets {
        println!(
            "Quiz: {} ({} questions, {} min)",
            set.subject,
            set.questions.len(),
            set.time_limit_minutes
        );

        let warnings = quizledger_core::quiz::validate_quiz_set(set);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
