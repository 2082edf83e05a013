use super::interval::Interval;
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

/// Timezone-aware instant as stored in `.srs` files
pub type Timestamp = DateTime<FixedOffset>;

/// Key of a task inside a collection (not persisted)
pub type TaskId = Uuid;

/// A recurring item reviewed on the interval ladder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Set once when the task is created
    pub create_time: Timestamp,
    /// Last good/bad review
    pub update_time: Timestamp,
    /// Wait after `update_time` before the task is due again
    pub interval: Interval,
    /// Category label, shared between tasks
    pub subject: String,
    /// Display text
    pub name: String,
}

impl Task {
    /// Create a fresh task, reviewed "now" with the given starting interval
    pub fn new(subject: String, name: String, interval: Interval, now: Timestamp) -> Self {
        Self {
            create_time: now,
            update_time: now,
            interval,
            subject,
            name,
        }
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_active()
    }

    /// When the task becomes due.
    /// `None` for inactive tasks and for instants past chrono's range.
    pub fn due_at(&self) -> Option<Timestamp> {
        let interval = self.interval.duration()?;
        self.update_time.checked_add_signed(interval)
    }

    /// One-line label: "[subject] name"
    pub fn description(&self) -> String {
        format!("[{}] {}", self.subject, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_task_new() {
        let now = at("2025-03-01T08:00:00+01:00");
        let task = Task::new("math".to_string(), "algebra".to_string(), Interval::Hours(12), now);

        assert_eq!(task.create_time, now);
        assert_eq!(task.update_time, now);
        assert_eq!(task.interval, Interval::Hours(12));
        assert!(task.is_active());
    }

    #[test]
    fn test_due_at() {
        let now = at("2025-03-01T08:00:00Z");
        let mut task = Task::new("s".to_string(), "n".to_string(), Interval::Days(7), now);
        assert_eq!(task.due_at(), Some(at("2025-03-08T08:00:00Z")));

        task.interval = Interval::Inactive;
        assert_eq!(task.due_at(), None);
    }

    #[test]
    fn test_description() {
        let now = at("2025-03-01T08:00:00Z");
        let task = Task::new("lang".to_string(), "irregular verbs".to_string(), Interval::Days(1), now);
        assert_eq!(task.description(), "[lang] irregular verbs");
    }
}
