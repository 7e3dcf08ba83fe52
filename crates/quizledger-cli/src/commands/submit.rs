//! The `quizledger submit` and `quizledger record` commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use quizledger_core::quiz::{self, GradedQuiz};
use quizledger_core::{points_for, Clock, QuizAttempt, ScoringOutcome, SystemClock};

use super::{GlobalOpts, Session};

pub fn execute(opts: &GlobalOpts, quiz_path: PathBuf, answers: String, format: String) -> Result<()> {
    let mut session = Session::open(opts)?;
    session.require_user()?;

    let set = quiz::parse_quiz_set(&quiz_path)?;
    anyhow::ensure!(
        !set.questions.is_empty(),
        "quiz '{}' has no questions",
        set.subject
    );

    let answers = parse_answers(&answers)?;
    let graded = quiz::grade(&set, &answers, session.config.max_points_per_quiz);

    let completed_at = SystemClock.now().timestamp_millis();
    let outcome = session
        .ledger
        .submit_attempt(graded.clone().into_attempt(completed_at))?;
    let week_complete = session.ledger.week_fully_completed();

    if format == "json" {
        let body = serde_json::json!({
            "result": graded,
            "outcome": outcome,
            "weekComplete": week_complete,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_review(&set, &graded);
    print_outcome(&graded.subject, &outcome, week_complete, session.config.subjects_per_week);
    Ok(())
}

pub fn record(opts: &GlobalOpts, subject: String, correct: u32, total: u32) -> Result<()> {
    anyhow::ensure!(total >= 1, "total must be at least 1");
    anyhow::ensure!(
        correct <= total,
        "correct ({correct}) cannot exceed total ({total})"
    );
    anyhow::ensure!(!subject.trim().is_empty(), "subject must not be empty");

    let mut session = Session::open(opts)?;
    session.require_user()?;

    let attempt = QuizAttempt {
        subject: subject.trim().to_string(),
        score: correct,
        total_questions: total,
        answers: BTreeMap::new(),
        completed_at: SystemClock.now().timestamp_millis(),
    };
    let outcome = session.ledger.submit_attempt(attempt)?;
    let week_complete = session.ledger.week_fully_completed();

    println!(
        "{}: {correct}/{total} correct, worth {} point(s).",
        subject.trim(),
        points_for(correct, total, session.config.max_points_per_quiz)
    );
    print_outcome(subject.trim(), &outcome, week_complete, session.config.subjects_per_week);
    Ok(())
}

/// Parse `"0=1,1=2"` into question index -> option index.
pub fn parse_answers(s: &str) -> Result<BTreeMap<usize, usize>> {
    let mut answers = BTreeMap::new();
    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (question, option) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid answer '{pair}', expected question=option"))?;
        let question: usize = question
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid question index in '{pair}'"))?;
        let option: usize = option
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid option index in '{pair}'"))?;
        answers.insert(question, option);
    }
    Ok(answers)
}

fn print_review(set: &quiz::QuizSet, graded: &GradedQuiz) {
    for (q, review) in set.questions.iter().zip(&graded.review) {
        let mark = if review.is_correct { "OK" } else { "WRONG" };
        println!("[{mark}] Q{}: {}", review.index + 1, q.text);
        if !review.is_correct {
            if let Some(answer) = q.options.get(q.correct_index) {
                println!("       answer: {answer}");
            }
            if !q.explanation.is_empty() {
                println!("       {}", q.explanation);
            }
        }
    }
    println!();
    println!(
        "{}: {}/{} correct ({}%), worth {} point(s).",
        graded.subject, graded.correct, graded.total, graded.percentage, graded.points
    );
}

fn print_outcome(subject: &str, outcome: &ScoringOutcome, week_complete: bool, per_week: usize) {
    if outcome.newly_completed {
        println!("Completed {subject} for week {}.", outcome.bucket);
    }
    println!(
        "Awarded {} point(s); {} this week.",
        outcome.awarded, outcome.week_points
    );
    if week_complete {
        println!("All {per_week} subjects completed this week!");
    }
}
