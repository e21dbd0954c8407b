//! Command-line front end for the questions store.
//!
//! # Responsibility
//! - Open a database file and print finder results as JSON lines.
//! - Keep all query logic inside `questions_core`.

use clap::{Args, Parser, Subcommand};
use log::info;
use questions_core::{open_db, LogLevel, SqliteQuestionsService};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "questions")]
#[command(about = "Query users, questions, replies and follows", version)]
struct Cli {
    /// SQLite database file
    #[arg(long, default_value = "questions.db")]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, default_value = questions_core::default_log_level())]
    log_level: LogLevel,

    /// Absolute directory for log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every user
    Users,
    /// Find a user by exact first and last name
    User { fname: String, lname: String },
    /// List questions, optionally by author
    Questions {
        #[arg(long)]
        author: Option<i64>,
    },
    /// List replies by user or by question
    Replies(RepliesArgs),
    /// List every follow row
    Follows,
    /// List users following a question
    Followers { question_id: i64 },
    /// List questions a user follows
    Followed { user_id: i64 },
    /// List the N most followed questions
    MostFollowed { n: u32 },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct RepliesArgs {
    #[arg(long)]
    user: Option<i64>,
    #[arg(long)]
    question: Option<i64>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        questions_core::init_logging(cli.log_level.as_str(), log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        questions_core::core_version()
    );

    let conn = open_db(&cli.db)?;
    let service = SqliteQuestionsService::for_connection(&conn)?;

    match cli.command {
        Command::Users => print_rows(&service.list_all_users()?),
        Command::User { fname, lname } => {
            print_rows(service.find_user_by_name(&fname, &lname)?.as_slice())
        }
        Command::Questions { author: Some(id) } => {
            print_rows(&service.find_questions_by_author(id)?)
        }
        Command::Questions { author: None } => print_rows(&service.list_all_questions()?),
        Command::Replies(RepliesArgs {
            user: Some(id), ..
        }) => print_rows(&service.find_replies_by_user(id)?),
        Command::Replies(RepliesArgs {
            question: Some(id),
            ..
        }) => print_rows(&service.find_replies_by_question(id)?),
        Command::Replies(_) => Err("replies needs --user or --question".into()),
        Command::Follows => print_rows(&service.list_all_follows()?),
        Command::Followers { question_id } => {
            print_rows(&service.find_followers_of_question(question_id)?)
        }
        Command::Followed { user_id } => {
            print_rows(&service.find_questions_followed_by_user(user_id)?)
        }
        Command::MostFollowed { n } => print_rows(&service.find_most_followed_questions(n)?),
    }
}

fn print_rows<T: Serialize>(rows: &[T]) -> Result<(), Box<dyn std::error::Error>> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}
