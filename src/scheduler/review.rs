use super::ladder::Ladder;
use crate::domain::{Outcome, Task, TaskCollection, TaskId, Timestamp, Transition};
use crate::error::TaskTextError;
use crate::persistence::parser::SEPARATOR;

/// Apply a review outcome to a single task.
///
/// Good escalates along the ladder, bad resets to the first step (which
/// also reactivates a retired task). Both stamp `update_time`. Delete
/// leaves the task untouched and asks the caller to remove it.
pub fn apply_outcome(task: &mut Task, outcome: Outcome, ladder: &Ladder, now: Timestamp) -> Transition {
    match outcome {
        Outcome::Good => {
            task.interval = ladder.escalate(task.interval);
            task.update_time = now;
            Transition::Updated
        }
        Outcome::Bad => {
            task.interval = ladder.first();
            task.update_time = now;
            Transition::Updated
        }
        Outcome::Delete => Transition::Remove,
    }
}

/// A task created now, starting at the bottom of the ladder.
///
/// Subject and name must fit in one record: no `|`, no line breaks.
pub fn new_task(subject: String, name: String, ladder: &Ladder, now: Timestamp) -> Result<Task, TaskTextError> {
    check_text("subject", &subject)?;
    check_text("name", &name)?;
    Ok(Task::new(subject, name, ladder.first(), now))
}

fn check_text(field: &'static str, value: &str) -> Result<(), TaskTextError> {
    if value.contains(SEPARATOR) {
        return Err(TaskTextError::Separator { field });
    }
    if value.contains(|c: char| c == '\n' || c == '\r') {
        return Err(TaskTextError::LineBreak { field });
    }
    Ok(())
}

impl TaskCollection {
    /// Apply an outcome to the task with `id`.
    ///
    /// Returns the task as it stands afterwards, or the removed task on
    /// delete. `None` when no task has that id.
    pub fn review(&mut self, id: TaskId, outcome: Outcome, ladder: &Ladder, now: Timestamp) -> Option<Task> {
        let task = self.get_mut(id)?;
        let before = task.interval;

        match apply_outcome(task, outcome, ladder, now) {
            Transition::Updated => {
                log::info!(
                    "Reviewed {} as {}: interval {} -> {}",
                    task.description(),
                    outcome.name(),
                    before,
                    task.interval
                );
                Some(task.clone())
            }
            Transition::Remove => {
                let removed = self.remove(id)?;
                log::info!("Deleted {}", removed.description());
                Some(removed)
            }
        }
    }
}
