mod commands;
pub mod error;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::connectivity::ConnectivityMonitor;
use crate::remote::ApiClient;
use crate::store::{CacheStore, paths};
use crate::workspace::Workspace;

use error::CliResult;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(author, version, about = "Offline-first kanban board CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: TASKBOARD_API_URL env or http://localhost:3000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Work against the local cache only; no remote call is attempted
    #[arg(long, global = true)]
    pub offline: bool,

    /// Override the cache directory (default: XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Board management commands
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },
    /// Column management commands
    Column {
        #[command(subcommand)]
        command: ColumnCommands,
    },
    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

#[derive(Subcommand)]
enum BoardCommands {
    /// List boards
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a board
    Add {
        /// Board name
        name: String,
    },
    /// Rename a board
    Rename {
        /// Board ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a board (columns are left behind)
    Rm {
        /// Board ID
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ColumnCommands {
    /// List the columns of a board
    List {
        /// Board ID
        #[arg(long)]
        board: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Add a column at the end of a board
    Add {
        /// Board ID
        #[arg(long)]
        board: String,
        /// Column name
        name: String,
    },
    /// Delete a column and every task in it
    Rm {
        /// Column ID
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
    /// Move a column to a new index within its board
    Move {
        /// Board ID
        #[arg(long)]
        board: String,
        /// Current index
        from: usize,
        /// Target index
        to: usize,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// List the tasks of a column
    List {
        /// Column ID
        #[arg(long)]
        column: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Add a task at the end of a column
    Add {
        /// Column ID
        #[arg(long)]
        column: String,
        /// Task name
        name: String,
        /// Due date (opaque string, stored as-is)
        #[arg(long)]
        due: Option<String>,
        /// Tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Mark a task as complete
    Done {
        /// Column ID holding the task
        #[arg(long)]
        column: String,
        /// Task ID
        id: String,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
    /// Move a task within a column or into another column
    Move {
        /// Board ID
        #[arg(long)]
        board: String,
        /// Source column ID
        #[arg(long)]
        from_column: String,
        /// Target column ID
        #[arg(long)]
        to_column: String,
        /// Current index in the source column
        from: usize,
        /// Target index in the target column
        to: usize,
    },
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Required once before the first reqwest client is built.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let client = ApiClient::new(cli.api_url);
    let cache = Arc::new(CacheStore::open(
        cli.data_dir.unwrap_or_else(paths::get_data_dir),
    ));
    let connectivity = Arc::new(ConnectivityMonitor::new());
    if cli.offline {
        connectivity.set_online(false);
    }
    let mut workspace = Workspace::new(client, cache, connectivity);

    match cli.command {
        Commands::Board { command } => match command {
            BoardCommands::List { format } => {
                report(commands::board::list_boards(&workspace, &format).await);
            }
            BoardCommands::Add { name } => {
                report(commands::board::add_board(&workspace, &name).await);
            }
            BoardCommands::Rename { id, name } => {
                report(commands::board::rename_board(&workspace, &id, &name).await);
            }
            BoardCommands::Rm { id, force } => {
                report(commands::board::delete_board(&mut workspace, &id, force).await);
            }
        },
        Commands::Column { command } => match command {
            ColumnCommands::List { board, format } => {
                report(commands::column::list_columns(&mut workspace, &board, &format).await);
            }
            ColumnCommands::Add { board, name } => {
                report(commands::column::add_column(&mut workspace, &board, &name).await);
            }
            ColumnCommands::Rm { id, force } => {
                report(commands::column::delete_column(&mut workspace, &id, force).await);
            }
            ColumnCommands::Move { board, from, to } => {
                report(commands::column::move_column(&mut workspace, &board, from, to).await);
            }
        },
        Commands::Task { command } => match command {
            TaskCommands::List { column, format } => {
                report(commands::task::list_tasks(&workspace, &column, &format).await);
            }
            TaskCommands::Add {
                column,
                name,
                due,
                tags,
            } => {
                report(
                    commands::task::add_task(
                        &mut workspace,
                        &column,
                        &name,
                        due.as_deref(),
                        tags.as_deref(),
                    )
                    .await,
                );
            }
            TaskCommands::Done { column, id } => {
                report(commands::task::complete_task(&mut workspace, &column, &id).await);
            }
            TaskCommands::Rm { id, force } => {
                report(commands::task::delete_task(&mut workspace, &id, force).await);
            }
            TaskCommands::Move {
                board,
                from_column,
                to_column,
                from,
                to,
            } => {
                report(
                    commands::task::move_task(
                        &mut workspace,
                        &board,
                        &from_column,
                        &to_column,
                        from,
                        to,
                    )
                    .await,
                );
            }
        },
    }

    Ok(())
}

fn report(result: CliResult<String>) {
    match result {
        Ok(output) => println!("{}", output),
        Err(e) => eprintln!("Error: {}", e),
    }
}
