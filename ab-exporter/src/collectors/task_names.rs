//! Task id to task name resolution.

use std::collections::HashMap;

use tracing::warn;

use crate::database::models::TaskNameDbModel;

/// Declared task names, keyed by task id.
///
/// Lookups never fail: an unknown id, or one declared with a blank name,
/// resolves to the id's decimal text.
#[derive(Debug, Clone, Default)]
pub struct TaskNameMap {
    names: HashMap<i64, String>,
}

impl TaskNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, task_id: i64, task_name: impl Into<String>) {
        self.names.insert(task_id, task_name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Label value for `task_id`.
    pub fn resolve(&self, task_id: i64) -> String {
        match self.names.get(&task_id) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => task_id.to_string(),
        }
    }

    /// Label values for `task_ids`, in the same order.
    ///
    /// When several ids resolve to the same label, each of them gets
    /// ` (<id>)` appended so every task keeps its own series.
    pub fn resolve_unique(&self, task_ids: &[i64]) -> Vec<String> {
        let labels: Vec<String> = task_ids.iter().map(|&id| self.resolve(id)).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for label in &labels {
            *counts.entry(label.as_str()).or_default() += 1;
        }
        let collisions: Vec<String> = counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(label, _)| label.to_string())
            .collect();
        if collisions.is_empty() {
            return labels;
        }

        warn!(labels = ?collisions, "Task names collide, appending task ids");
        labels
            .into_iter()
            .zip(task_ids)
            .map(|(label, id)| {
                if collisions.contains(&label) {
                    format!("{label} ({id})")
                } else {
                    label
                }
            })
            .collect()
    }
}

impl FromIterator<TaskNameDbModel> for TaskNameMap {
    fn from_iter<I: IntoIterator<Item = TaskNameDbModel>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|row| (row.task_id, row.task_name))
                .collect(),
        }
    }
}
