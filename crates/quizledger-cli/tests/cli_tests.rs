//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated to `dir`: no user config, no inherited data dir.
fn quizledger(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizledger").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZLEDGER_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// Every correct option of the shipped Python bank.
const PYTHON_ANSWERS: &str = "0=1,1=1,2=0,3=2,4=1,5=0,6=1,7=2,8=1,9=1";

fn login(dir: &TempDir) {
    quizledger(dir)
        .args(["login", "--email", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, ada!"));
}

fn record(dir: &TempDir, subject: &str, correct: u32, total: u32) {
    quizledger(dir)
        .args(["record", "--subject", subject])
        .args(["--correct", &correct.to_string(), "--total", &total.to_string()])
        .assert()
        .success();
}

fn stats_json(dir: &TempDir) -> serde_json::Value {
    let output = quizledger(dir)
        .args(["stats", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly quiz points and rewards tracker"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizledger"));
}

#[test]
fn whoami_requires_login() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn login_and_whoami() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .args(["login", "--email", "grace@example.com", "--name", "Grace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Grace!"));

    quizledger(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace <grace@example.com>"));
}

#[test]
fn login_rejects_invalid_email() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .args(["login", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid email"));
}

#[test]
fn record_requires_login() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .args(["record", "--subject", "python", "--correct", "5", "--total", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn record_rejects_impossible_score() {
    let dir = TempDir::new().unwrap();
    login(&dir);
    quizledger(&dir)
        .args(["record", "--subject", "python", "--correct", "11", "--total", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));
}

#[test]
fn first_record_scenario() {
    let dir = TempDir::new().unwrap();
    login(&dir);

    quizledger(&dir)
        .args(["record", "--subject", "Python", "--correct", "10", "--total", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Awarded 10 point(s); 10 this week."));

    let stats = stats_json(&dir);
    assert_eq!(stats["currentWeekPoints"], 10);
    assert_eq!(stats["stats"]["allTimeScore"], 10);
    assert_eq!(stats["stats"]["totalAttempts"], 1);
    assert_eq!(stats["completedThisWeek"], serde_json::json!(["python"]));
    assert_eq!(stats["weekFullyCompleted"], false);
}

#[test]
fn four_subjects_complete_the_week() {
    let dir = TempDir::new().unwrap();
    login(&dir);
    for subject in ["python", "java", "c", "html"] {
        record(&dir, subject, 10, 10);
    }

    let stats = stats_json(&dir);
    assert_eq!(stats["currentWeekPoints"], 40);
    assert_eq!(stats["weekFullyCompleted"], true);
    assert_eq!(stats["weeklyRecords"].as_array().unwrap().len(), 1);

    quizledger(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("All subjects completed this week!"));
}

#[test]
fn rewards_at_25_points() {
    let dir = TempDir::new().unwrap();
    login(&dir);
    record(&dir, "python", 10, 10);
    record(&dir, "java", 10, 10);
    record(&dir, "c", 5, 10);

    let output = quizledger(&dir)
        .args(["rewards", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let statuses: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let unlocked: Vec<bool> = statuses
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["unlocked"].as_bool().unwrap())
        .collect();
    let remaining: Vec<u64> = statuses
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["points_remaining"].as_u64().unwrap())
        .collect();
    assert_eq!(unlocked, vec![true, false, false]);
    assert_eq!(remaining, vec![0, 5, 15]);

    quizledger(&dir)
        .arg("rewards")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have 25 point(s) this week."))
        .stdout(predicate::str::contains("1 of 3 reward(s) unlocked."));
}

#[test]
fn repeat_completion_policies() {
    // Default: repeats keep earning points.
    let dir = TempDir::new().unwrap();
    login(&dir);
    record(&dir, "python", 10, 10);
    record(&dir, "python", 10, 10);
    let stats = stats_json(&dir);
    assert_eq!(stats["stats"]["allTimeScore"], 20);
    assert_eq!(stats["completedThisWeek"], serde_json::json!(["python"]));

    // First completion only: the repeat earns nothing but still counts.
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("quizledger.toml"),
        "repeat_policy = \"first_completion_only\"\n",
    )
    .unwrap();
    login(&dir);
    record(&dir, "python", 10, 10);
    record(&dir, "python", 10, 10);
    let stats = stats_json(&dir);
    assert_eq!(stats["stats"]["allTimeScore"], 10);
    assert_eq!(stats["stats"]["totalAttempts"], 2);
    assert_eq!(stats["currentWeekPoints"], 10);
}

#[test]
fn logout_keeps_history() {
    let dir = TempDir::new().unwrap();
    login(&dir);
    record(&dir, "Java", 7, 10);

    quizledger(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out ada@example.com"));

    quizledger(&dir)
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));

    login(&dir);
    quizledger(&dir)
        .args(["history", "--subject", "Java"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7/10"))
        .stdout(predicate::str::contains("1 attempt(s)."));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizledger(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizledger.toml"))
        .stdout(predicate::str::contains("Created quizzes/python.toml"))
        .stdout(predicate::str::contains("Created quizzes/html.toml"));

    assert!(dir.path().join("quizledger.toml").exists());
    for file in ["python.toml", "java.toml", "c.toml", "html.toml"] {
        assert!(dir.path().join("quizzes").join(file).exists());
    }
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizledger(&dir).arg("init").assert().success();

    quizledger(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_generated_quiz() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir).arg("init").assert().success();

    quizledger(&dir)
        .args(["validate", "--quiz", "quizzes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz: C (10 questions, 10 min)"))
        .stdout(predicate::str::contains("Quiz: HTML (10 questions, 10 min)"))
        .stdout(predicate::str::contains("Quiz: Java (10 questions, 10 min)"))
        .stdout(predicate::str::contains("Quiz: Python (10 questions, 10 min)"))
        .stdout(predicate::str::contains("All quizzes valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.toml"),
        r#"
[quiz]
subject = "C"

[[questions]]
id = 1
text = "Pick one"
options = ["a", "b"]
correct_index = 2
"#,
    )
    .unwrap();

    quizledger(&dir)
        .args(["validate", "--quiz", "bad.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out of range"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .args(["validate", "--quiz", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn submit_grades_and_records() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir).arg("init").assert().success();
    login(&dir);

    quizledger(&dir)
        .args(["submit", "--quiz", "quizzes/python.toml"])
        .args(["--answers", PYTHON_ANSWERS])
        .assert()
        .success()
        .stdout(predicate::str::contains("10/10 correct (100%), worth 10 point(s)."))
        .stdout(predicate::str::contains("Completed Python"));

    quizledger(&dir)
        .args(["submit", "--quiz", "quizzes/python.toml", "--answers", "0=1,1=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/10 correct (10%), worth 1 point(s)."))
        .stdout(predicate::str::contains("answer: def"));

    let stats = stats_json(&dir);
    assert_eq!(stats["currentWeekPoints"], 11);
    assert_eq!(stats["stats"]["totalAttempts"], 2);

    // The config written by init keeps the ledger under ./.quizledger
    assert!(dir.path().join(".quizledger/quiz_app_attempts.json").exists());
}

#[test]
fn shipped_banks_complete_the_week() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir).arg("init").assert().success();
    login(&dir);

    let banks = [
        ("python", PYTHON_ANSWERS),
        ("java", "0=0,1=0,2=0,3=1,4=1,5=1,6=1,7=2,8=1,9=2"),
        ("c", "0=0,1=1,2=1,3=2,4=1,5=2,6=1,7=1,8=1,9=2"),
    ];
    for (subject, answers) in banks {
        quizledger(&dir)
            .args(["submit", "--quiz", &format!("quizzes/{subject}.toml")])
            .args(["--answers", answers])
            .assert()
            .success()
            .stdout(predicate::str::contains("10/10 correct (100%)"))
            .stdout(predicate::str::contains("All 4 subjects completed").not());
    }

    quizledger(&dir)
        .args(["submit", "--quiz", "quizzes/html.toml"])
        .args(["--answers", "0=0,1=2,2=0,3=1,4=0,5=1,6=1,7=3,8=0,9=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Awarded 10 point(s); 40 this week."))
        .stdout(predicate::str::contains("All 4 subjects completed this week!"));

    let stats = stats_json(&dir);
    assert_eq!(stats["weekFullyCompleted"], true);
    assert_eq!(
        stats["completedThisWeek"],
        serde_json::json!(["python", "java", "c", "html"])
    );
}

#[test]
fn submit_rejects_bad_answers() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir).arg("init").assert().success();
    login(&dir);

    quizledger(&dir)
        .args(["submit", "--quiz", "quizzes/python.toml", "--answers", "first=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid question index"));
}

#[test]
fn data_dir_flag_is_respected() {
    let dir = TempDir::new().unwrap();
    quizledger(&dir)
        .args(["--data-dir", "custom", "login", "--email", "ada@example.com"])
        .assert()
        .success();

    assert!(dir.path().join("custom/quiz_app_user.json").exists());
    quizledger(&dir)
        .arg("whoami")
        .assert()
        .failure();
}

#[test]
fn malformed_stats_read_as_defaults() {
    let dir = TempDir::new().unwrap();
    login(&dir);
    std::fs::write(dir.path().join(".quizledger/quiz_app_stats.json"), "{oops").unwrap();

    let stats = stats_json(&dir);
    assert_eq!(stats["stats"]["allTimeScore"], 0);

    record(&dir, "html", 10, 10);
    let stats = stats_json(&dir);
    assert_eq!(stats["stats"]["allTimeScore"], 10);
    assert_eq!(stats["stats"]["totalAttempts"], 1);
}

#[test]
fn reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    login(&dir);
    record(&dir, "c", 10, 10);

    quizledger(&dir)
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    quizledger(&dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all data"));

    quizledger(&dir)
        .arg("whoami")
        .assert()
        .failure();
    assert!(!dir.path().join(".quizledger/quiz_app_attempts.json").exists());
}
