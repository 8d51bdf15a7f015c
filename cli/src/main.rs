mod tui;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use nextup_core::{
    display_label, Board, BoardService, FileBoardRepository, List, Task, TaskState,
};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Parser)]
#[command(name = "nextup")]
#[command(about = "A keyboard-driven task board with schedule words", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task; date and time words are recognized and stripped
    /// (usage: add "call Bob at 3pm tomorrow" --list next)
    Add {
        /// Target list: next, waiting or someday
        #[arg(short, long, default_value = "next")]
        list: String,
        /// Task text
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Print lists as tables
    List {
        /// Limit output to one list: next, waiting or someday
        #[arg(short, long)]
        list: Option<String>,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn parse_list(name: &str) -> Result<List> {
    match name.to_lowercase().as_str() {
        "next" | "next-actions" | "actions" => Ok(List::NextActions),
        "waiting" | "waiting-on" => Ok(List::WaitingOn),
        "someday" | "someday-maybe" => Ok(List::SomedayMaybe),
        other => Err(anyhow!(
            "Unknown list '{}' (expected next, waiting or someday)",
            other
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add { list, text }) => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                println!("Error: Task text is required.");
                return Ok(());
            }

            let list = parse_list(&list)?;
            let repo = FileBoardRepository::new(None)?;
            let service = BoardService::new(repo);
            let today = Local::now().date_naive();

            let task = service.capture(list, &text, today)?;
            println!("Added to {}: {}", list.title(), task.text);
            if !task.date.is_empty() {
                println!("  Date: {}", display_label(&task.date, today));
            }
            if !task.time.is_empty() {
                println!("  Time: {}", task.time);
            }
        }
        Some(Commands::List { list }) => {
            let repo = FileBoardRepository::new(None)?;
            let service = BoardService::new(repo);
            let board = service.board()?;
            let today = Local::now().date_naive();

            let lists = match list {
                Some(name) => vec![parse_list(&name)?],
                None => List::ALL.to_vec(),
            };
            for list in lists {
                print_list(&board, list, today);
            }
        }
        Some(Commands::Tui) | None => {
            tui::run()?;
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct NextActionsRow {
    #[tabled(rename = "St")]
    state: &'static str,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Project")]
    project: String,
}

#[derive(Tabled)]
struct WaitingOnRow {
    #[tabled(rename = "St")]
    state: &'static str,
    #[tabled(rename = "Follow Up")]
    follow_up: String,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

#[derive(Tabled)]
struct SomedayMaybeRow {
    #[tabled(rename = "St")]
    state: &'static str,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

fn state_icon(task: &Task) -> &'static str {
    match task.state {
        TaskState::Done => "✔",
        TaskState::Todo => "☐",
    }
}

fn print_list(board: &Board, list: List, today: NaiveDate) {
    println!("\n\x1b[1;36m{}\x1b[0m", list.title());

    let tasks = board.tasks(list);
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }

    let mut table = match list {
        List::NextActions => {
            let rows: Vec<NextActionsRow> = tasks
                .iter()
                .map(|t| NextActionsRow {
                    state: state_icon(t),
                    date: display_label(&t.date, today),
                    text: t.text.clone(),
                    time: t.time.clone(),
                    project: t.project.clone(),
                })
                .collect();
            Table::new(rows)
        }
        List::WaitingOn => {
            let rows: Vec<WaitingOnRow> = tasks
                .iter()
                .map(|t| WaitingOnRow {
                    state: state_icon(t),
                    follow_up: display_label(&t.date, today),
                    text: t.text.clone(),
                    notes: t.notes.clone(),
                })
                .collect();
            Table::new(rows)
        }
        List::SomedayMaybe => {
            let rows: Vec<SomedayMaybeRow> = tasks
                .iter()
                .map(|t| SomedayMaybeRow {
                    state: state_icon(t),
                    text: t.text.clone(),
                    notes: t.notes.clone(),
                })
                .collect();
            Table::new(rows)
        }
    };

    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("{}", table);
}
