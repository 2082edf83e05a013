use super::task::{Task, TaskId};
use std::collections::BTreeSet;
use uuid::Uuid;

/// All tasks of one user, in file order, keyed by a session-local id
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    entries: Vec<(TaskId, Task)>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return the id it was given
    pub fn push(&mut self, task: Task) -> TaskId {
        let id = Uuid::new_v4();
        self.entries.push((id, task));
        id
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, task)| task)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, task)| task)
    }

    /// Remove a task, keeping the order of the rest
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate in file order
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.entries.iter().map(|(id, task)| (*id, task))
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.entries.iter().map(|(_, task)| task)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct subjects seen in the collection, sorted
    pub fn subjects(&self) -> Vec<String> {
        self.tasks()
            .map(|task| task.subject.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<Task> for TaskCollection {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut collection = Self::new();
        for task in iter {
            collection.push(task);
        }
        collection
    }
}
