//! Derived views over the flat task collection.

use std::collections::HashMap;

use crate::store::Task;

/// Group tasks by owning column id.
///
/// Pure and recomputed on demand, never incrementally patched, so it is
/// always consistent with its source. Tasks keep their input order within
/// each group.
pub fn tasks_by_column(tasks: &[Task]) -> HashMap<String, Vec<Task>> {
    let mut map: HashMap<String, Vec<Task>> = HashMap::new();
    for task in tasks {
        map.entry(task.column_id.clone()).or_default().push(task.clone());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, column_id: &str, position: i64) -> Task {
        Task {
            id: id.to_string(),
            name: format!("task {}", id),
            position,
            created_at: String::new(),
            due_date: String::new(),
            completed: false,
            tags: vec![],
            column_id: column_id.to_string(),
        }
    }

    #[test]
    fn groups_by_column_preserving_input_order() {
        let tasks = vec![
            make_task("t1", "c1", 0),
            make_task("t2", "c2", 0),
            make_task("t3", "c1", 1),
        ];

        let grouped = tasks_by_column(&tasks);

        assert_eq!(grouped.len(), 2);
        let c1: Vec<&str> = grouped["c1"].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(c1, vec!["t1", "t3"]);
        assert_eq!(grouped["c2"].len(), 1);
    }

    #[test]
    fn empty_collection_projects_to_empty_map() {
        assert!(tasks_by_column(&[]).is_empty());
    }
}
