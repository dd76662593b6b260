use tabled::{Table, Tabled};

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_tags, parse_tags, truncate_with_ellipsis};
use crate::store::Task;
use crate::workspace::Workspace;

use super::select_board_by_id;

#[derive(Tabled)]
struct TaskDisplay {
    #[tabled(rename = "Pos")]
    position: i64,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Done")]
    completed: String,
    #[tabled(rename = "Due")]
    due_date: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Task> for TaskDisplay {
    fn from(task: &Task) -> Self {
        Self {
            position: task.position,
            id: task.id.clone(),
            name: truncate_with_ellipsis(&task.name, 40),
            completed: if task.completed { "✓" } else { "-" }.to_string(),
            due_date: task.due_date.clone(),
            tags: format_tags(&task.tags),
        }
    }
}

/// List the tasks of a column, in column order
pub async fn list_tasks(workspace: &Workspace, column_id: &str, format: &str) -> CliResult<String> {
    let tasks = workspace.list_tasks(column_id).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&tasks)?),
        _ => {
            if tasks.is_empty() {
                return Ok("No tasks found.".to_string());
            }
            let display: Vec<TaskDisplay> = tasks.iter().map(|t| t.into()).collect();
            let mut table = Table::new(display);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// Add a task at the end of a column
pub async fn add_task(
    workspace: &mut Workspace,
    column_id: &str,
    name: &str,
    due: Option<&str>,
    tags: Option<&str>,
) -> CliResult<String> {
    let task = workspace
        .add_task(column_id, name, due.map(|s| s.to_string()), parse_tags(tags))
        .await?;
    Ok(format!("✓ Created task: {} ({})", task.name, task.id))
}

/// Mark a task as complete
pub async fn complete_task(
    workspace: &mut Workspace,
    column_id: &str,
    task_id: &str,
) -> CliResult<String> {
    let tasks = workspace.list_tasks(column_id).await?;
    let mut task = tasks
        .into_iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| CliError::Usage {
            message: format!("No task with id '{}' in column '{}'", task_id, column_id),
        })?;

    task.completed = true;
    let updated = workspace.update_task(task).await?;
    Ok(format!("✓ Task {} marked as complete", updated.id))
}

/// Delete a task (requires --force flag for safety)
pub async fn delete_task(workspace: &mut Workspace, id: &str, force: bool) -> CliResult<String> {
    if !force {
        return Err(CliError::Usage {
            message: "Delete operation requires --force flag. This action is destructive and cannot be undone.".to_string(),
        });
    }

    workspace.delete_task(id).await?;
    Ok(format!("✓ Deleted task: {}", id))
}

/// Move a task within or across columns of a board
pub async fn move_task(
    workspace: &mut Workspace,
    board_id: &str,
    from_column: &str,
    to_column: &str,
    from: usize,
    to: usize,
) -> CliResult<String> {
    select_board_by_id(workspace, board_id).await?;
    workspace.move_task(from_column, to_column, from, to).await;

    let grouped = workspace.tasks_by_column();
    let target_len = grouped.get(to_column).map(|lane| lane.len()).unwrap_or(0);
    Ok(format!(
        "✓ Moved task to column {} (now {} tasks)",
        to_column, target_len
    ))
}
