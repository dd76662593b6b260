//! Board session state and move orchestration.
//!
//! Holds the selected board plus in-memory snapshots of its columns and
//! tasks, and turns a drag/move request into ordering recomputation followed
//! by a fan-out of per-item updates. The fan-out is a batch of independent
//! write intents: submitted concurrently, unordered, with no transaction
//! boundary, no rollback, and no retry. A partial network failure can leave
//! some items persisted at their new position and others not; each failure
//! is logged and dropped.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future;
use tracing::{error, warn};

use crate::connectivity::ConnectivityMonitor;
use crate::ordering;
use crate::projection;
use crate::remote::{ApiClient, RemoteResult};
use crate::repo::Repository;
use crate::store::util::{current_timestamp, generate_entity_id};
use crate::store::{Board, CacheStore, Column, Task};

pub struct Workspace {
    boards: Repository<Board>,
    columns: Repository<Column>,
    tasks: Repository<Task>,
    selected_board: Option<Board>,
    board_columns: Vec<Column>,
    board_tasks: Vec<Task>,
}

impl Workspace {
    pub fn new(
        client: ApiClient,
        cache: Arc<CacheStore>,
        connectivity: Arc<ConnectivityMonitor>,
    ) -> Self {
        Self {
            boards: Repository::new(client.clone(), Arc::clone(&cache), Arc::clone(&connectivity)),
            columns: Repository::new(client.clone(), Arc::clone(&cache), Arc::clone(&connectivity)),
            tasks: Repository::new(client, cache, connectivity),
            selected_board: None,
            board_columns: Vec::new(),
            board_tasks: Vec::new(),
        }
    }

    pub fn selected_board(&self) -> Option<&Board> {
        self.selected_board.as_ref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.board_columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.board_tasks
    }

    /// Tasks grouped by owning column, recomputed from the flat snapshot.
    pub fn tasks_by_column(&self) -> HashMap<String, Vec<Task>> {
        projection::tasks_by_column(&self.board_tasks)
    }

    pub async fn load_boards(&self) -> RemoteResult<Vec<Board>> {
        self.boards.get_all(None).await
    }

    /// Make a board current and pull its columns and tasks.
    pub async fn select_board(&mut self, board: Board) -> RemoteResult<()> {
        self.selected_board = Some(board);
        self.reload_columns().await?;
        self.reload_tasks().await
    }

    pub async fn reload_columns(&mut self) -> RemoteResult<()> {
        let Some(board) = &self.selected_board else {
            warn!("attempted to load columns with no board selected");
            return Ok(());
        };
        self.board_columns = self.columns.get_all(Some(&board.id)).await?;
        Ok(())
    }

    /// Fetch tasks column by column (concurrently) and flatten.
    pub async fn reload_tasks(&mut self) -> RemoteResult<()> {
        let reads = self
            .board_columns
            .iter()
            .map(|column| self.tasks.get_all(Some(&column.id)));
        let results = future::join_all(reads).await;

        let mut all = Vec::new();
        for result in results {
            all.extend(result?);
        }
        self.board_tasks = all;
        Ok(())
    }

    pub async fn add_board(&self, name: &str) -> RemoteResult<Board> {
        let board = Board {
            id: generate_entity_id(),
            name: name.to_string(),
        };
        self.boards.insert(board).await
    }

    pub async fn rename_board(&self, id: &str, name: &str) -> RemoteResult<Board> {
        let board = Board {
            id: id.to_string(),
            name: name.to_string(),
        };
        self.boards.update(id, board).await
    }

    /// Delete a board. Columns are NOT cascaded; orphaned columns stay in
    /// place (known limitation of the service contract).
    pub async fn delete_board(&mut self, id: &str) -> RemoteResult<()> {
        self.boards.delete(id).await?;
        if self.selected_board.as_ref().is_some_and(|b| b.id == id) {
            self.selected_board = None;
            self.board_columns.clear();
            self.board_tasks.clear();
        }
        Ok(())
    }

    /// Append a column to the selected board. Returns `None` (after a local
    /// warning) when no board is selected; no call is attempted.
    pub async fn add_column(&mut self, name: &str) -> RemoteResult<Option<Column>> {
        let Some(board) = &self.selected_board else {
            warn!("attempted to add a column with no board selected");
            return Ok(None);
        };
        let column = Column {
            id: generate_entity_id(),
            name: name.to_string(),
            position: self.board_columns.len() as i64,
            board_id: board.id.clone(),
        };
        let created = self.columns.insert(column).await?;
        self.board_columns.push(created.clone());
        Ok(Some(created))
    }

    /// Delete a column; its tasks are removed in the same logical operation.
    pub async fn delete_column(&mut self, id: &str) -> RemoteResult<()> {
        self.columns.delete(id).await?;
        self.board_columns.retain(|c| c.id != id);
        self.board_tasks.retain(|t| t.column_id != id);
        Ok(())
    }

    /// Append a task to a column, stamping creation time and end-of-lane
    /// position.
    pub async fn add_task(
        &mut self,
        column_id: &str,
        name: &str,
        due_date: Option<String>,
        tags: Vec<String>,
    ) -> RemoteResult<Task> {
        let lane = self.tasks.get_all(Some(column_id)).await?;
        let task = Task {
            id: generate_entity_id(),
            name: name.to_string(),
            position: lane.len() as i64,
            created_at: current_timestamp(),
            due_date: due_date.unwrap_or_else(current_timestamp),
            completed: false,
            tags,
            column_id: column_id.to_string(),
        };
        let created = self.tasks.insert(task).await?;
        if self.board_columns.iter().any(|c| c.id == column_id) {
            self.board_tasks.push(created.clone());
        }
        Ok(created)
    }

    /// Tasks of one column, without touching the board selection.
    pub async fn list_tasks(&self, column_id: &str) -> RemoteResult<Vec<Task>> {
        self.tasks.get_all(Some(column_id)).await
    }

    pub async fn update_task(&mut self, task: Task) -> RemoteResult<Task> {
        let id = task.id.clone();
        let updated = self.tasks.update(&id, task).await?;
        if let Some(existing) = self.board_tasks.iter_mut().find(|t| t.id == updated.id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_task(&mut self, id: &str) -> RemoteResult<()> {
        self.tasks.delete(id).await?;
        self.board_tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Reorder the selected board's columns. Requires a selected board;
    /// otherwise the request is rejected locally with a warning. Shifted
    /// columns are persisted fire-and-forget.
    pub async fn move_column(&mut self, from: usize, to: usize) {
        if self.selected_board.is_none() {
            warn!("attempted to reorder columns with no board selected");
            return;
        }
        let dirty = ordering::reorder(&mut self.board_columns, from, to);
        self.persist_columns(dirty).await;
    }

    /// Move a task within a column or across columns, then persist every
    /// affected task fire-and-forget.
    pub async fn move_task(
        &mut self,
        source_column: &str,
        target_column: &str,
        from: usize,
        to: usize,
    ) {
        let mut grouped = self.tasks_by_column();

        if source_column == target_column {
            let mut lane = grouped.remove(source_column).unwrap_or_default();
            let dirty = ordering::reorder(&mut lane, from, to);
            self.replace_lanes(vec![(source_column.to_string(), lane)]);
            self.persist_tasks(dirty).await;
        } else {
            let mut source = grouped.remove(source_column).unwrap_or_default();
            let mut target = grouped.remove(target_column).unwrap_or_default();
            let outcome = ordering::transfer_task(&mut source, &mut target, from, to, target_column);
            self.replace_lanes(vec![
                (source_column.to_string(), source),
                (target_column.to_string(), target),
            ]);
            let mut dirty = outcome.target_dirty;
            dirty.extend(outcome.source_dirty);
            self.persist_tasks(dirty).await;
        }
    }

    /// Swap the given lanes back into the flat snapshot, leaving every other
    /// column's tasks untouched.
    fn replace_lanes(&mut self, lanes: Vec<(String, Vec<Task>)>) {
        let replaced: HashSet<String> = lanes.iter().map(|(id, _)| id.clone()).collect();
        let mut rebuilt: Vec<Task> = self
            .board_tasks
            .iter()
            .filter(|t| !replaced.contains(&t.column_id))
            .cloned()
            .collect();
        for (_, lane) in lanes {
            rebuilt.extend(lane);
        }
        self.board_tasks = rebuilt;
    }

    async fn persist_columns(&self, dirty: Vec<Column>) {
        let updates = dirty.into_iter().map(|column| {
            let repo = self.columns.clone();
            async move {
                let id = column.id.clone();
                if let Err(error) = repo.update(&id, column).await {
                    error!(%error, column = %id, "failed to persist column position");
                }
            }
        });
        future::join_all(updates).await;
    }

    async fn persist_tasks(&self, dirty: Vec<Task>) {
        let updates = dirty.into_iter().map(|task| {
            let repo = self.tasks.clone();
            async move {
                let id = task.id.clone();
                if let Err(error) = repo.update(&id, task).await {
                    error!(%error, task = %id, "failed to persist task position");
                }
            }
        });
        future::join_all(updates).await;
    }
}
