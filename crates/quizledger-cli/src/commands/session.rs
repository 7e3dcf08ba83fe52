//! The `quizledger login`, `logout`, `whoami` and `reset` commands.

use anyhow::Result;

use quizledger_core::{Clock, SystemClock, User};

use super::{format_timestamp, GlobalOpts, Session};

pub fn login(opts: &GlobalOpts, email: String, name: Option<String>) -> Result<()> {
    let mut session = Session::open(opts)?;

    let now_ms = SystemClock.now().timestamp_millis();
    let user = User::login(&email, name.as_deref(), now_ms)?;
    session.ledger.set_user(&user)?;
    tracing::debug!("logged in {} ({})", user.email, user.id);

    println!("Welcome, {}!", user.name);
    println!(
        "This week: {} points, {} quiz(zes) taken so far.",
        session.ledger.current_week_points(),
        session.ledger.get_stats().total_attempts
    );
    Ok(())
}

pub fn logout(opts: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(opts)?;

    match session.ledger.get_user() {
        Some(user) => {
            session.ledger.clear_all_data()?;
            println!("Logged out {}. Your quiz history is kept.", user.email);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

pub fn whoami(opts: &GlobalOpts) -> Result<()> {
    let session = Session::open(opts)?;
    let user = session.require_user()?;

    println!("{} <{}>", user.name, user.email);
    println!("Logged in since {}", format_timestamp(user.login_time));
    Ok(())
}

pub fn reset(opts: &GlobalOpts, yes: bool) -> Result<()> {
    anyhow::ensure!(yes, "reset deletes all history and points; pass --yes to confirm");

    let mut session = Session::open(opts)?;
    session.ledger.reset()?;
    println!(
        "Cleared all data in {}.",
        session.config.data_dir.display()
    );
    Ok(())
}
