pub mod board;
pub mod column;
pub mod task;

use crate::cli::error::{CliError, CliResult};
use crate::workspace::Workspace;

/// Look a board up by id and make it the workspace's current board.
pub(crate) async fn select_board_by_id(workspace: &mut Workspace, board_id: &str) -> CliResult<()> {
    let boards = workspace.load_boards().await?;
    let board = boards
        .into_iter()
        .find(|b| b.id == board_id)
        .ok_or_else(|| CliError::Usage {
            message: format!("No board with id '{}'", board_id),
        })?;
    workspace.select_board(board).await?;
    Ok(())
}
