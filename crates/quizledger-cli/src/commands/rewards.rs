//! The `quizledger rewards` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizledger_core::evaluate;

use super::{GlobalOpts, Session};

pub fn execute(opts: &GlobalOpts, format: String) -> Result<()> {
    let session = Session::open(opts)?;
    session.require_user()?;

    let points = session.ledger.current_week_points();
    let statuses = evaluate(points, &session.config.rewards);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    println!("You have {points} point(s) this week.");

    let mut table = Table::new();
    table.set_header(vec!["Reward", "Needs", "Progress", "Status"]);
    for status in &statuses {
        let state = if status.unlocked {
            "Unlocked!".to_string()
        } else {
            format!("{} points needed", status.points_remaining)
        };
        table.add_row(vec![
            Cell::new(&status.reward.name),
            Cell::new(status.reward.min_points),
            Cell::new(format!("{:.0}%", status.progress() * 100.0)),
            Cell::new(state),
        ]);
    }
    println!("{table}");

    let unlocked = statuses.iter().filter(|s| s.unlocked).count();
    println!("{unlocked} of {} reward(s) unlocked.", statuses.len());
    Ok(())
}
