use tabled::{Table, Tabled};

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::store::Column;
use crate::workspace::Workspace;

use super::select_board_by_id;

#[derive(Tabled)]
struct ColumnDisplay {
    #[tabled(rename = "Pos")]
    position: i64,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Column> for ColumnDisplay {
    fn from(column: &Column) -> Self {
        Self {
            position: column.position,
            id: column.id.clone(),
            name: truncate_with_ellipsis(&column.name, 50),
        }
    }
}

/// List the columns of a board, in board order
pub async fn list_columns(
    workspace: &mut Workspace,
    board_id: &str,
    format: &str,
) -> CliResult<String> {
    select_board_by_id(workspace, board_id).await?;
    let columns = workspace.columns();

    match format {
        "json" => Ok(serde_json::to_string_pretty(columns)?),
        _ => {
            if columns.is_empty() {
                return Ok("No columns found.".to_string());
            }
            let display: Vec<ColumnDisplay> = columns.iter().map(|c| c.into()).collect();
            let mut table = Table::new(display);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// Add a column at the end of a board
pub async fn add_column(
    workspace: &mut Workspace,
    board_id: &str,
    name: &str,
) -> CliResult<String> {
    select_board_by_id(workspace, board_id).await?;
    let column = workspace.add_column(name).await?.ok_or_else(|| CliError::Usage {
        message: "No board selected".to_string(),
    })?;
    Ok(format!(
        "✓ Created column: {} ({}) at position {}",
        column.name, column.id, column.position
    ))
}

/// Delete a column and every task in it (requires --force flag for safety)
pub async fn delete_column(workspace: &mut Workspace, id: &str, force: bool) -> CliResult<String> {
    if !force {
        return Err(CliError::Usage {
            message: "Delete operation requires --force flag. The column's tasks are deleted with it.".to_string(),
        });
    }

    workspace.delete_column(id).await?;
    Ok(format!("✓ Deleted column: {}", id))
}

/// Move a column from one index to another within its board
pub async fn move_column(
    workspace: &mut Workspace,
    board_id: &str,
    from: usize,
    to: usize,
) -> CliResult<String> {
    select_board_by_id(workspace, board_id).await?;
    workspace.move_column(from, to).await;

    let order: Vec<String> = workspace
        .columns()
        .iter()
        .map(|c| format!("{}:{}", c.position, c.name))
        .collect();
    Ok(format!("✓ Columns now ordered: {}", order.join(", ")))
}
