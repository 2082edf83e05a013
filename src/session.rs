use crate::domain::{Outcome, Task, TaskCollection, TaskId, Timestamp};
use crate::persistence::{load_collection, save_collection};
use crate::scheduler::{classify, new_task, Agenda, Ladder};
use anyhow::{Context, Result};
use chrono::Duration;
use std::path::{Path, PathBuf};

/// One user's review session: the loaded collection and the rules applied to it
#[derive(Debug)]
pub struct Session {
    pub user: String,
    pub path: PathBuf,
    pub tasks: TaskCollection,
    /// Comment lines of the last load
    pub comments: Vec<String>,
    pub ladder: Ladder,
    pub window: Duration,
}

impl Session {
    /// Load a user's file. Any malformed record fails the whole load.
    pub fn open(user: &str, path: &Path, ladder: Ladder, window: Duration) -> Result<Self> {
        let decoded = load_collection(path)
            .with_context(|| format!("Error parsing data file for {}", user))?;

        Ok(Self {
            user: user.to_string(),
            path: path.to_path_buf(),
            tasks: decoded.tasks,
            comments: decoded.comments,
            ladder,
            window,
        })
    }

    /// Replace the in-memory collection with the file contents
    pub fn reload(&mut self) -> Result<()> {
        let decoded = load_collection(&self.path)
            .with_context(|| format!("Error parsing data file for {}", self.user))?;
        self.tasks = decoded.tasks;
        self.comments = decoded.comments;
        Ok(())
    }

    pub fn agenda(&self, now: Timestamp) -> Agenda<'_> {
        classify(&self.tasks, now, self.window)
    }

    /// Apply an outcome to a task that is due now.
    /// Returns the updated task, or the removed one on delete.
    pub fn review(&mut self, id: TaskId, outcome: Outcome, now: Timestamp) -> Result<Task> {
        if !self.agenda(now).is_due(id) {
            anyhow::bail!("Task is not due for review");
        }
        self.tasks
            .review(id, outcome, &self.ladder, now)
            .context("Task not found")
    }

    /// Add a new task at the bottom of the ladder
    pub fn add(&mut self, subject: &str, name: &str, now: Timestamp) -> Result<TaskId> {
        let task = new_task(subject.to_string(), name.to_string(), &self.ladder, now)?;
        log::info!("Added {}", task.description());
        Ok(self.tasks.push(task))
    }

    /// Rewrite the user's file with the whole collection
    pub fn save(&self, now: Timestamp) -> Result<()> {
        save_collection(&self.path, &self.tasks, now)
            .with_context(|| format!("Error writing data file for {}", self.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interval;
    use crate::persistence::user_file;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn at(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn open(dir: &Path, content: &str) -> Session {
        let path = user_file(dir, "alice");
        fs::write(&path, content).unwrap();
        Session::open("alice", &path, Ladder::default(), Duration::days(2)).unwrap()
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = user_file(temp_dir.path(), "alice");
        let original = "2024-01-01T00:00:00Z|2024-01-01T00:00:00Z|1|math\n";
        fs::write(&path, original).unwrap();

        let err = Session::open("alice", &path, Ladder::default(), Duration::days(2)).unwrap_err();
        assert!(format!("{:#}", err).contains("malformed record"));
        // Never truncated
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_review_good_then_save_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut session = open(
            temp_dir.path(),
            "# hello\n2025-05-01T12:00:00Z|2025-05-31T12:00:00Z|7|math|algebra\n",
        );
        assert_eq!(session.comments, vec!["# hello".to_string()]);

        let now = at("2025-06-10T12:00:00Z");
        let id = session.agenda(now).due[0].id;
        let updated = session.review(id, Outcome::Good, now).unwrap();
        assert_eq!(updated.interval, Interval::Days(21));

        session.save(now).unwrap();
        session.reload().unwrap();

        let task = session.tasks.tasks().next().unwrap();
        assert_eq!(task.interval, Interval::Days(21));
        assert_eq!(task.update_time, now);
        assert!(session.agenda(now).due.is_empty());
        assert!(session.agenda(now).upcoming.is_empty());
    }

    #[test]
    fn test_review_requires_due_task() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut session = open(
            temp_dir.path(),
            "2025-06-01T00:00:00Z|2025-06-10T00:00:00Z|30|math|not yet\n",
        );

        let now = at("2025-06-10T12:00:00Z");
        let id = session.tasks.iter().map(|(id, _)| id).next().unwrap();
        assert!(session.review(id, Outcome::Good, now).is_err());
        assert_eq!(session.tasks.get(id).unwrap().interval, Interval::Days(30));
    }

    #[test]
    fn test_delete_is_not_re_emitted() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut session = open(
            temp_dir.path(),
            "2025-06-01T00:00:00Z|2025-06-01T00:00:00Z|1|math|keep\n\
             2025-06-01T00:00:00Z|2025-06-01T00:00:00Z|1|math|drop\n",
        );

        let now = at("2025-06-10T12:00:00Z");
        let id = session.agenda(now).due[1].id;
        let removed = session.review(id, Outcome::Delete, now).unwrap();
        assert_eq!(removed.name, "drop");

        session.save(now).unwrap();
        let content = fs::read_to_string(&session.path).unwrap();
        assert!(content.contains("keep"));
        assert!(!content.contains("drop"));
    }

    #[test]
    fn test_add_task() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut session = open(temp_dir.path(), "");

        let now = at("2025-06-10T12:00:00Z");
        let id = session.add("lang", "verbs", now).unwrap();
        let task = session.tasks.get(id).unwrap();

        assert_eq!(task.interval, Interval::Hours(12));
        assert_eq!(task.create_time, now);
        assert_eq!(session.agenda(now).upcoming.len(), 1);
        assert_eq!(session.tasks.subjects(), vec!["lang".to_string()]);
    }

    #[test]
    fn test_add_rejects_text_that_breaks_the_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut session = open(temp_dir.path(), "");
        let now = at("2025-06-10T12:00:00Z");

        assert!(session.add("math", "a|b", now).is_err());
        assert!(session.add("math", "line1\nline2", now).is_err());
        assert!(session.tasks.is_empty());

        session.add("math", "fine", now).unwrap();
        session.save(now).unwrap();
        session.reload().unwrap();
        assert_eq!(session.tasks.len(), 1);
    }
}
