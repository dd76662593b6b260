use tabled::{Table, Tabled};

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::store::Board;
use crate::workspace::Workspace;

#[derive(Tabled)]
struct BoardDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Board> for BoardDisplay {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            name: truncate_with_ellipsis(&board.name, 50),
        }
    }
}

/// List all boards
pub async fn list_boards(workspace: &Workspace, format: &str) -> CliResult<String> {
    let boards = workspace.load_boards().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&boards)?),
        _ => {
            if boards.is_empty() {
                return Ok("No boards found.".to_string());
            }
            let display: Vec<BoardDisplay> = boards.iter().map(|b| b.into()).collect();
            let mut table = Table::new(display);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// Create a new board
pub async fn add_board(workspace: &Workspace, name: &str) -> CliResult<String> {
    let board = workspace.add_board(name).await?;
    Ok(format!("✓ Created board: {} ({})", board.name, board.id))
}

/// Rename a board
pub async fn rename_board(workspace: &Workspace, id: &str, name: &str) -> CliResult<String> {
    let board = workspace.rename_board(id, name).await?;
    Ok(format!("✓ Renamed board: {} ({})", board.name, board.id))
}

/// Delete a board (requires --force flag for safety)
///
/// Columns are not cascaded; they stay behind referencing the deleted
/// board.
pub async fn delete_board(workspace: &mut Workspace, id: &str, force: bool) -> CliResult<String> {
    if !force {
        return Err(CliError::Usage {
            message: "Delete operation requires --force flag. This action is destructive and cannot be undone.".to_string(),
        });
    }

    workspace.delete_board(id).await?;
    Ok(format!("✓ Deleted board: {}", id))
}
