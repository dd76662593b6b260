//! File-backed cache of the three entity collections.
//!
//! One JSON array file per entity kind (`boards.json`, `columns.json`,
//! `tasks.json`), rewritten whole on every mutation so the cache is durable
//! the moment an operation returns. Every operation is total: a missing or
//! unreadable file reads as an empty collection, and write failures are
//! logged and swallowed. The cache is only ever touched from the single
//! task driving a repository call, so no locking is needed.

use std::fs;
use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::models::{Board, Column, Task, TaskPatch};

const BOARDS_FILE: &str = "boards.json";
const COLUMNS_FILE: &str = "columns.json";
const TASKS_FILE: &str = "tasks.json";

/// Durable keyed storage for boards, columns, and tasks.
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Open (and create if needed) the cache directory.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(error) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), %error, "could not create cache directory");
        }
        Self { dir }
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.dir.join(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(error) => {
                debug!(file, %error, "discarding unreadable cache collection");
                Vec::new()
            }
        }
    }

    fn write<T: Serialize>(&self, file: &str, items: &[T]) {
        let path = self.dir.join(file);
        match serde_json::to_vec(items) {
            Ok(bytes) => {
                if let Err(error) = fs::write(&path, bytes) {
                    warn!(file, %error, "failed to persist cache collection");
                }
            }
            Err(error) => warn!(file, %error, "failed to serialize cache collection"),
        }
    }

    pub fn boards(&self) -> Vec<Board> {
        self.read(BOARDS_FILE)
    }

    /// Upsert a board (replace by id, else append).
    pub fn save_board(&self, board: &Board) {
        let mut boards = self.boards();
        match boards.iter_mut().find(|b| b.id == board.id) {
            Some(existing) => *existing = board.clone(),
            None => boards.push(board.clone()),
        }
        self.write(BOARDS_FILE, &boards);
    }

    /// Remove a board. Columns referencing it are left in place; board
    /// deletion does not cascade.
    pub fn delete_board(&self, id: &str) {
        let boards: Vec<Board> = self.boards().into_iter().filter(|b| b.id != id).collect();
        self.write(BOARDS_FILE, &boards);
    }

    /// Columns of one board, ascending by position.
    pub fn columns(&self, board_id: &str) -> Vec<Column> {
        let mut columns: Vec<Column> = self
            .read(COLUMNS_FILE)
            .into_iter()
            .filter(|c: &Column| c.board_id == board_id)
            .collect();
        columns.sort_by_key(|c| c.position);
        columns
    }

    /// Upsert a column (replace by id, else append).
    pub fn save_column(&self, column: &Column) {
        let mut columns: Vec<Column> = self.read(COLUMNS_FILE);
        match columns.iter_mut().find(|c| c.id == column.id) {
            Some(existing) => *existing = column.clone(),
            None => columns.push(column.clone()),
        }
        self.write(COLUMNS_FILE, &columns);
    }

    /// Remove a column and cascade: every task in it is removed too.
    pub fn delete_column(&self, column_id: &str) {
        let columns: Vec<Column> = self
            .read(COLUMNS_FILE)
            .into_iter()
            .filter(|c: &Column| c.id != column_id)
            .collect();
        self.write(COLUMNS_FILE, &columns);

        let tasks: Vec<Task> = self
            .read(TASKS_FILE)
            .into_iter()
            .filter(|t: &Task| t.column_id != column_id)
            .collect();
        self.write(TASKS_FILE, &tasks);
    }

    /// Tasks of one column, ascending by position.
    pub fn tasks_in_column(&self, column_id: &str) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .read(TASKS_FILE)
            .into_iter()
            .filter(|t: &Task| t.column_id == column_id)
            .collect();
        tasks.sort_by_key(|t| t.position);
        tasks
    }

    /// Upsert a task by shallow merge: fields absent from the patch keep
    /// their stored values. A task with no stored copy is materialized from
    /// the patch alone.
    pub fn save_task(&self, id: &str, patch: &TaskPatch) {
        let mut tasks: Vec<Task> = self.read(TASKS_FILE);
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(existing) => existing.apply(patch),
            None => tasks.push(Task::from_patch(id, patch)),
        }
        self.write(TASKS_FILE, &tasks);
    }

    pub fn delete_task(&self, task_id: &str) {
        let tasks: Vec<Task> = self
            .read(TASKS_FILE)
            .into_iter()
            .filter(|t: &Task| t.id != task_id)
            .collect();
        self.write(TASKS_FILE, &tasks);
    }
}
