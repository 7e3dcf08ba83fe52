//! The quizledger command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::GlobalOpts;

#[derive(Parser)]
#[command(
    name = "quizledger",
    version,
    about = "Weekly quiz points and rewards tracker"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the ledger is stored in (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in (no password check; local session only)
    Login {
        /// E-mail address
        #[arg(long)]
        email: String,

        /// Display name (defaults to the part of the e-mail before '@')
        #[arg(long)]
        name: Option<String>,
    },

    /// Log out, keeping quiz history and points
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Grade answers against a quiz bank and record the result
    Submit {
        /// Path to the subject's .toml quiz bank
        #[arg(long)]
        quiz: PathBuf,

        /// Answers as question=option pairs, 0-based (e.g. "0=1,1=2,3=0")
        #[arg(long, default_value = "")]
        answers: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Record an already-graded quiz result
    Record {
        /// Subject name (e.g. "Python")
        #[arg(long)]
        subject: String,

        /// Number of correct answers
        #[arg(long)]
        correct: u32,

        /// Number of questions
        #[arg(long)]
        total: u32,
    },

    /// Show points and weekly progress
    Stats {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List past quiz attempts
    History {
        /// Only attempts for this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show this week's rewards
    Rewards {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate quiz bank TOML files
    Validate {
        /// Path to a quiz bank file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create a starter config and example quiz bank
    Init,

    /// Delete all stored data, history included
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizledger=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let opts = GlobalOpts {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Login { email, name } => commands::session::login(&opts, email, name),
        Commands::Logout => commands::session::logout(&opts),
        Commands::Whoami => commands::session::whoami(&opts),
        Commands::Submit {
            quiz,
            answers,
            format,
        } => commands::submit::execute(&opts, quiz, answers, format),
        Commands::Record {
            subject,
            correct,
            total,
        } => commands::submit::record(&opts, subject, correct, total),
        Commands::Stats { format } => commands::stats::execute(&opts, format),
        Commands::History { subject } => commands::stats::history(&opts, subject),
        Commands::Rewards { format } => commands::rewards::execute(&opts, format),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
        Commands::Reset { yes } => commands::session::reset(&opts, yes),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
