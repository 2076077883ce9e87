use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;
use todone::record::parse_rank;
use todone::{Config, SortKey, TaskStore, launch, report};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "to")]
#[command(about = "ToDone - keep a ranked task list in a plain TSV file")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the task file (default: ~/.todo.tsv or the config file's `file`)
    #[arg(short, long, env = "TODO_FILE", global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add tasks at the given rank
    #[command(allow_negative_numbers = true)]
    Do {
        /// Importance of the added tasks
        #[arg(value_parser = parse_rank)]
        rank: i64,

        /// Tasks to add; quote each one that has spaces
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// Show your current tasks
    Doing {
        /// How many tasks to show
        #[arg(short, long)]
        number: Option<usize>,

        /// How to sort tasks (default: the config file's `sort`, else none)
        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,

        /// Open the task file in your editor afterwards
        #[arg(short, long)]
        edit: bool,

        /// Show the tasks as a desktop notification instead of printing them
        #[arg(short, long)]
        reminder: bool,

        /// Print tasks as JSON
        #[arg(long, conflicts_with = "reminder")]
        json: bool,
    },

    /// Remove completed tasks by their exact text
    Done {
        /// Tasks to remove; every task with matching text is removed
        #[arg(required = true)]
        tasks: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with listings
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let path = todone::config::resolve_store_path(cli.file, &config)?;

    let mut store = TaskStore::open(&path)?;

    match cli.command {
        Commands::Do { rank, tasks } => {
            let added = store.add_tasks(rank, tasks.as_slice())?;
            println!("{}", report::format_added(added));
        }
        Commands::Doing {
            number,
            sort,
            edit,
            reminder,
            json,
        } => {
            let sort = sort.unwrap_or(config.sort);
            let limit = number.unwrap_or(config.number);
            let listing = store.list_tasks(Some(limit), sort)?;

            if reminder {
                launch::run(launch::notify_command("ToDone", &report::format_reminder(&listing)))?;
            } else if json {
                println!("{}", serde_json::to_string_pretty(&listing.records)?);
            } else {
                print!("{}", report::format_table(&listing.records));
                if let Some(line) = report::shortfall_line(&listing) {
                    println!("{}", line.yellow());
                }
            }

            if edit {
                launch::run(launch::editor_command(&config.editor_command(), store.path())?)?;
            }
        }
        Commands::Done { tasks } => {
            let store_name = store
                .path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| store.path().display().to_string());

            for outcome in store.remove_tasks(tasks.as_slice())? {
                let message = report::format_removal(&outcome, &store_name);
                if outcome.is_deleted() {
                    println!("{}", message.green());
                } else {
                    println!("{}", message.yellow());
                }
            }
        }
    }

    Ok(())
}
