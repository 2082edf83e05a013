use crate::domain::{Task, TaskCollection, TaskId, Timestamp};
use chrono::Duration;

/// Default look-ahead for upcoming tasks
pub const DEFAULT_UPCOMING_WINDOW_HOURS: i64 = 48;

/// A task placed on the agenda, with the instant it falls due
#[derive(Debug, Clone, Copy)]
pub struct Scheduled<'a> {
    pub id: TaskId,
    pub task: &'a Task,
    pub due_at: Timestamp,
}

/// Due and upcoming tasks at one instant
#[derive(Debug, Clone, Default)]
pub struct Agenda<'a> {
    /// Due at or before now
    pub due: Vec<Scheduled<'a>>,
    /// Due after now but before the end of the window
    pub upcoming: Vec<Scheduled<'a>>,
}

impl<'a> Agenda<'a> {
    pub fn is_due(&self, id: TaskId) -> bool {
        self.due.iter().any(|entry| entry.id == id)
    }

    /// Both lists reordered soonest first (ties keep file order)
    pub fn sorted_by_due(mut self) -> Self {
        self.due.sort_by_key(|entry| entry.due_at);
        self.upcoming.sort_by_key(|entry| entry.due_at);
        self
    }
}

/// Split the active tasks of a collection into due and upcoming, in file order.
///
/// A task is due when `update_time + interval <= now` and upcoming when
/// it falls due strictly before `now + window`. Inactive tasks never appear.
pub fn classify(collection: &TaskCollection, now: Timestamp, window: Duration) -> Agenda<'_> {
    let horizon = now.checked_add_signed(window);
    let mut agenda = Agenda::default();

    for (id, task) in collection.iter() {
        let Some(due_at) = task.due_at() else {
            continue;
        };
        let entry = Scheduled { id, task, due_at };

        if due_at <= now {
            agenda.due.push(entry);
        } else if horizon.map_or(true, |h| due_at < h) {
            agenda.upcoming.push(entry);
        }
    }

    log::debug!(
        "Classified {} tasks: {} due, {} upcoming",
        collection.len(),
        agenda.due.len(),
        agenda.upcoming.len()
    );
    agenda
}
