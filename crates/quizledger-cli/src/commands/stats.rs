//! The `quizledger stats` and `quizledger history` commands.

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use quizledger_core::{UserStats, WeekBucket, WeeklyPointsRecord};

use super::{format_timestamp, GlobalOpts, Session};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    user: String,
    current_week: WeekBucket,
    current_week_points: u32,
    completed_this_week: Vec<String>,
    week_fully_completed: bool,
    stats: UserStats,
    weekly_records: Vec<WeeklyPointsRecord>,
}

pub fn execute(opts: &GlobalOpts, format: String) -> Result<()> {
    let session = Session::open(opts)?;
    let user = session.require_user()?;
    let ledger = &session.ledger;

    let current = ledger.current_week_record();
    let mut weekly_records = ledger.get_weekly_records();
    weekly_records.sort_by_key(|r| std::cmp::Reverse(r.bucket()));

    let report = StatsReport {
        user: user.name,
        current_week: ledger.current_bucket(),
        current_week_points: current.as_ref().map(|r| r.points).unwrap_or(0),
        completed_this_week: current
            .map(|r| r.completed_subjects)
            .unwrap_or_default(),
        week_fully_completed: ledger.week_fully_completed(),
        stats: ledger.get_stats(),
        weekly_records,
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let per_week = session.config.subjects_per_week;
    println!("{} (week {})", report.user, report.current_week);
    println!("  This week:     {} points", report.current_week_points);
    println!(
        "  Subjects:      {}/{} ({})",
        report.completed_this_week.len(),
        per_week,
        if report.completed_this_week.is_empty() {
            "none yet".to_string()
        } else {
            report.completed_this_week.join(", ")
        }
    );
    println!("  All-time:      {} points", report.stats.all_time_score);
    println!("  Quizzes taken: {}", report.stats.total_attempts);
    if report.week_fully_completed {
        println!("  All subjects completed this week!");
    }

    if !report.weekly_records.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Week", "Points", "Subjects", "Last updated"]);
        for record in &report.weekly_records {
            table.add_row(vec![
                Cell::new(record.bucket()),
                Cell::new(record.points),
                Cell::new(record.completed_subjects.join(", ")),
                Cell::new(format_timestamp(record.last_updated)),
            ]);
        }
        println!("\n{table}");
    }

    Ok(())
}

pub fn history(opts: &GlobalOpts, subject: Option<String>) -> Result<()> {
    let session = Session::open(opts)?;
    session.require_user()?;

    let attempts = match &subject {
        Some(subject) => session.ledger.get_attempts_for_subject(subject),
        None => session.ledger.get_attempts(),
    };

    if attempts.is_empty() {
        println!("No quiz attempts yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Subject", "Score", "Completed"]);
    for (i, attempt) in attempts.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&attempt.subject),
            Cell::new(format!("{}/{}", attempt.score, attempt.total_questions)),
            Cell::new(format_timestamp(attempt.completed_at)),
        ]);
    }
    println!("{table}");
    println!("{} attempt(s).", attempts.len());

    Ok(())
}
