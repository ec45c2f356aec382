//! Rollbook CLI
//!
//! Command-line interface over a RecordStore.

use clap::{Parser, Subcommand};
use rollbook::{Config, RecordStore, StudentUpdate};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Rollbook CLI
#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(about = "Manage student records stored in a JSON file")]
#[command(version)]
struct Args {
    /// Backing JSON file
    #[arg(short = 'f', long, default_value = rollbook::config::DEFAULT_DATA_FILE)]
    data_file: String,

    /// Log store activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a student
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, allow_negative_numbers = true)]
        age: i64,

        #[arg(long)]
        grade: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        course: String,
    },

    /// Show all students, or one by id
    View {
        /// Student id (e.g. STU001)
        id: Option<String>,
    },

    /// Update fields of a student
    Update {
        /// Student id
        id: String,

        /// Field assignment, e.g. --set course=Math (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        assignments: Vec<String>,
    },

    /// Delete a student
    Delete {
        /// Student id
        id: String,
    },

    /// Search name, id and email
    Search {
        /// Case-insensitive substring
        term: String,
    },

    /// Show totals per grade
    Stats,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.verbose { "info,rollbook=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::builder().data_file(&args.data_file).build();
    let mut store = RecordStore::open(config);

    if let Err(e) = run(&mut store, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(store: &mut RecordStore, command: Commands) -> rollbook::Result<()> {
    match command {
        Commands::Add {
            name,
            age,
            grade,
            email,
            course,
        } => {
            let id = store.add(name, age, grade, email, course)?;
            println!("{}", id);
        }
        Commands::View { id } => {
            print_json(&store.view(id.as_deref()))?;
        }
        Commands::Update { id, assignments } => {
            let pairs = assignments
                .iter()
                .map(|a| split_assignment(a))
                .collect::<rollbook::Result<Vec<_>>>()?;
            let update = StudentUpdate::from_pairs(pairs)?;
            store.update(&id, &update)?;
            print_json(&store.view(Some(&id)))?;
        }
        Commands::Delete { id } => match store.delete(&id)? {
            Some(removed) => print_json(&removed)?,
            None => return Err(rollbook::RollbookError::StudentNotFound(id)),
        },
        Commands::Search { term } => {
            print_json(&store.search(&term))?;
        }
        Commands::Stats => {
            print_json(&store.statistics())?;
        }
    }
    Ok(())
}

/// Split `key=value`
fn split_assignment(raw: &str) -> rollbook::Result<(&str, &str)> {
    raw.split_once('=')
        .ok_or_else(|| rollbook::RollbookError::InvalidValue {
            field: "--set".to_string(),
            value: raw.to_string(),
        })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> rollbook::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
