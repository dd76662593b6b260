//! Position reassignment for ordered collections.
//!
//! Pure functions: callers move items between in-memory sequences, then
//! persist the returned dirty set themselves. The contract is that after
//! any successful move the positions within each affected sequence are
//! exactly `{0, .., n-1}` with no gaps or duplicates.

use crate::store::{Column, Task};

/// Anything living in a contiguously positioned sequence.
pub trait Positioned {
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

impl Positioned for Column {
    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

impl Positioned for Task {
    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

/// Move an element within a sequence, shifting the elements in between.
/// Out-of-range indices are clamped.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if items.is_empty() {
        return;
    }
    let from = from.min(items.len() - 1);
    let to = to.min(items.len() - 1);
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Move an element from one sequence into another. Out-of-range indices
/// are clamped; an empty source is a no-op.
pub fn transfer_item<T>(source: &mut Vec<T>, target: &mut Vec<T>, from: usize, to: usize) {
    if source.is_empty() {
        return;
    }
    let from = from.min(source.len() - 1);
    let to = to.min(target.len());
    let item = source.remove(from);
    target.insert(to, item);
}

/// Reassign `position = index` across the sequence; returns clones of the
/// elements whose position actually changed (the ones worth persisting).
pub fn reindex<T: Positioned + Clone>(items: &mut [T]) -> Vec<T> {
    let mut dirty = Vec::new();
    for (index, item) in items.iter_mut().enumerate() {
        let position = index as i64;
        if item.position() != position {
            item.set_position(position);
            dirty.push(item.clone());
        }
    }
    dirty
}

/// Intra-collection move: relocate one element and restore contiguity.
///
/// Moving an element to its own index is a no-op and returns an empty
/// dirty set.
pub fn reorder<T: Positioned + Clone>(items: &mut Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from == to {
        return Vec::new();
    }
    move_item(items, from, to);
    reindex(items)
}

/// Entities to persist after a cross-column task move.
#[derive(Debug, Default)]
pub struct TransferOutcome {
    /// The whole target sequence (the moved task changed columns; the rest
    /// shifted positions).
    pub target_dirty: Vec<Task>,
    /// Source tasks whose position shifted after the removal.
    pub source_dirty: Vec<Task>,
}

/// Cross-collection move: pull the task at `from` out of `source`, insert
/// it into `target` at `to`, reparent it to `target_column_id`, and restore
/// contiguity independently on both sides.
pub fn transfer_task(
    source: &mut Vec<Task>,
    target: &mut Vec<Task>,
    from: usize,
    to: usize,
    target_column_id: &str,
) -> TransferOutcome {
    if source.is_empty() {
        return TransferOutcome::default();
    }
    let from = from.min(source.len() - 1);
    let to = to.min(target.len());

    let mut task = source.remove(from);
    task.column_id = target_column_id.to_string();
    target.insert(to, task);

    for (index, task) in target.iter_mut().enumerate() {
        task.position = index as i64;
    }

    TransferOutcome {
        target_dirty: target.clone(),
        source_dirty: reindex(source),
    }
}
